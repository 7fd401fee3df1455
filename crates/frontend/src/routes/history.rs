//! Browser history integration.
//!
//! Route paths are relative to the configured public path; these helpers
//! translate between them and the address bar.

use wasm_bindgen::JsValue;
use web_sys::window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    Push,
    Replace,
}

/// Route location (path and query) of an address bar path.
pub fn strip_base(public_path: &str, pathname: &str, search: &str) -> String {
    let base = public_path.trim_end_matches('/');
    let path = pathname
        .strip_prefix(base)
        .filter(|rest| rest.is_empty() || rest.starts_with('/'))
        .unwrap_or(pathname);
    let path = if path.is_empty() { "/" } else { path };
    format!("{}{}", path, search)
}

/// Address bar URL of a route location.
pub fn with_base(public_path: &str, location: &str) -> String {
    let base = public_path.trim_end_matches('/');
    if location == "/" && !base.is_empty() {
        return format!("{}/", base);
    }
    format!("{}{}", base, location)
}

/// Route location currently shown in the address bar.
pub fn current_location(public_path: &str) -> String {
    let Some(location) = window().map(|w| w.location()) else {
        return "/".to_string();
    };
    let pathname = location.pathname().unwrap_or_default();
    let search = location.search().unwrap_or_default();
    strip_base(public_path, &pathname, &search)
}

/// Write a route location to the address bar.
pub fn commit(public_path: &str, location: &str, mode: HistoryMode) {
    let url = with_base(public_path, location);
    let Some(history) = window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = match mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(&url)),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(&url)),
    };
    if let Err(err) = result {
        log::warn!("failed to update history with {}: {:?}", url, err);
    }
}
