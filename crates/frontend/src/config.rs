//! Application configuration.
//!
//! Defaults are embedded as TOML; build-time environment variables
//! (`GVB_BASE_API`, `GVB_BACK_ROUTER`, `GVB_PUBLIC_PATH`) override them,
//! the same way the bundler env file did for the JS client.

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub router: RouterConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Prefix of every backend call, e.g. `/api`.
    pub base_api: String,
    /// Request timeout in milliseconds. Enforced by the transport.
    pub timeout_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RouterConfig {
    /// Mount point of the admin app, e.g. `/admin`.
    pub public_path: String,
    /// `true`: routes come from the user's menu tree on the server.
    /// `false`: routes come from the static module registry.
    pub back_router: bool,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[api]
base_api = "/api"
timeout_ms = 12000

[router]
public_path = "/admin"
back_router = true
"#;

/// Load the embedded configuration and apply build-time overrides.
pub fn load_config() -> Result<AppConfig, toml::de::Error> {
    let mut config: AppConfig = toml::from_str(DEFAULT_CONFIG)?;
    apply_overrides(
        &mut config,
        option_env!("GVB_BASE_API"),
        option_env!("GVB_BACK_ROUTER"),
        option_env!("GVB_PUBLIC_PATH"),
    );
    Ok(config)
}

fn apply_overrides(
    config: &mut AppConfig,
    base_api: Option<&str>,
    back_router: Option<&str>,
    public_path: Option<&str>,
) {
    if let Some(base_api) = base_api.filter(|v| !v.is_empty()) {
        config.api.base_api = base_api.trim_end_matches('/').to_string();
    }
    if let Some(flag) = back_router {
        match flag.trim() {
            "true" | "1" => config.router.back_router = true,
            "false" | "0" => config.router.back_router = false,
            other => log::warn!("ignoring GVB_BACK_ROUTER={other:?}, expected true/false"),
        }
    }
    if let Some(public_path) = public_path.filter(|v| !v.is_empty()) {
        config.router.public_path = public_path.trim_end_matches('/').to_string();
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        match toml::from_str(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(err) => unreachable!("embedded config is valid TOML: {err}"),
        }
    }
}
