//! Live navigation table.
//!
//! Holds the registered route tree and answers name/path lookups. Names are
//! unique across the whole tree; `add_route` refuses anything that would
//! break that.

use std::collections::HashSet;

use super::error::RouteError;
use super::record::{join_path, RouteMeta, RouteRecord, ViewKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    /// Nothing installed yet.
    Empty,
    /// Only the basic routes are present.
    BasicOnly,
    /// Basic routes plus at least one dynamic route.
    Populated,
}

/// Flattened view of one registered record.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    pub name: String,
    pub full_path: String,
    pub component: ViewKey,
    pub redirect: Option<String>,
    pub meta: RouteMeta,
    pub is_hidden: bool,
    /// Names from the root down to this entry, inclusive.
    pub chain: Vec<String>,
}

/// Result of resolving a path.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    pub name: String,
    pub full_path: String,
    pub meta: RouteMeta,
    /// Components from the root down to the matched record.
    pub views: Vec<ViewKey>,
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteRecord>,
    basic: HashSet<String>,
    installed: bool,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_basic(basic: Vec<RouteRecord>) -> Self {
        let mut table = Self::new();
        table.install_basic(basic);
        table
    }

    /// Install the routes that never require authorization.
    ///
    /// Only the first call has an effect.
    pub fn install_basic(&mut self, basic: Vec<RouteRecord>) {
        if self.installed {
            log::warn!("basic routes already installed, ignoring");
            return;
        }
        for route in basic {
            self.basic.extend(route.names().into_iter().map(str::to_string));
            self.routes.push(route);
        }
        self.installed = true;
    }

    pub fn state(&self) -> TableState {
        if !self.installed {
            TableState::Empty
        } else if self.routes.iter().all(|r| self.basic.contains(&r.name)) {
            TableState::BasicOnly
        } else {
            TableState::Populated
        }
    }

    pub fn is_basic(&self, name: &str) -> bool {
        self.basic.contains(name)
    }

    /// Registered root records in insertion order.
    pub fn roots(&self) -> &[RouteRecord] {
        &self.routes
    }

    pub fn has_route(&self, name: &str) -> bool {
        fn walk(routes: &[RouteRecord], name: &str) -> bool {
            routes.iter().any(|r| r.name == name || walk(&r.children, name))
        }
        walk(&self.routes, name)
    }

    /// Append a root record together with its children.
    pub fn add_route(&mut self, route: RouteRecord) -> Result<(), RouteError> {
        let mut seen = HashSet::new();
        for name in route.names() {
            if self.has_route(name) || !seen.insert(name) {
                return Err(RouteError::DuplicateName(name.to_string()));
            }
        }
        self.routes.push(route);
        Ok(())
    }

    /// Remove a record by name, wherever it sits in the tree.
    ///
    /// Removing a parent removes its children with it.
    pub fn remove_route(&mut self, name: &str) -> Option<RouteRecord> {
        fn take(routes: &mut Vec<RouteRecord>, name: &str) -> Option<RouteRecord> {
            if let Some(pos) = routes.iter().position(|r| r.name == name) {
                return Some(routes.remove(pos));
            }
            routes.iter_mut().find_map(|r| take(&mut r.children, name))
        }
        take(&mut self.routes, name)
    }

    /// Visible, named roots ordered by `meta.order`, as the sidebar shows them.
    pub fn menus(&self) -> Vec<RouteRecord> {
        let mut menus: Vec<RouteRecord> = self
            .routes
            .iter()
            .filter(|r| !r.name.is_empty() && !r.is_hidden)
            .cloned()
            .collect();
        menus.sort_by_key(|r| r.meta.order);
        menus
    }

    /// Every record, parents before their children.
    pub fn get_routes(&self) -> Vec<RouteEntry> {
        fn walk(routes: &[RouteRecord], parent_path: &str, chain: &[String], out: &mut Vec<RouteEntry>) {
            for route in routes {
                let full_path = join_path(parent_path, &route.path);
                let mut chain = chain.to_vec();
                chain.push(route.name.clone());
                out.push(RouteEntry {
                    name: route.name.clone(),
                    full_path: full_path.clone(),
                    component: route.component.clone(),
                    redirect: route.redirect.clone(),
                    meta: route.meta.clone(),
                    is_hidden: route.is_hidden,
                    chain: chain.clone(),
                });
                walk(&route.children, &full_path, &chain, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.routes, "", &[], &mut out);
        out
    }

    /// Match a location path. Query strings and trailing slashes are ignored,
    /// a matched record's `redirect` is followed once.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let entries = self.get_routes();
        let target = normalize(path);
        let entry = entries
            .iter()
            .find(|e| e.full_path == target)
            .or_else(|| entries.iter().find(|e| path_matches(&e.full_path, &target)))?;

        if let Some(redirect) = &entry.redirect {
            let redirect = join_path(&entry.full_path, redirect);
            if normalize(&redirect) != target {
                if let Some(found) = entries.iter().find(|e| e.full_path == normalize(&redirect)) {
                    return Some(self.to_match(&entries, found));
                }
                log::warn!("route {} redirects to unknown path {}", entry.name, redirect);
            }
        }
        Some(self.to_match(&entries, entry))
    }

    fn to_match(&self, entries: &[RouteEntry], entry: &RouteEntry) -> RouteMatch {
        let views = entry
            .chain
            .iter()
            .filter_map(|name| entries.iter().find(|e| &e.name == name))
            .map(|e| e.component.clone())
            .collect();
        RouteMatch {
            name: entry.name.clone(),
            full_path: entry.full_path.clone(),
            meta: entry.meta.clone(),
            views,
        }
    }
}

/// Segment-wise match where `:param` segments accept any value.
fn path_matches(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('/').collect();
    let path: Vec<&str> = path.split('/').collect();
    pattern.len() == path.len()
        && pattern
            .iter()
            .zip(&path)
            .all(|(p, s)| p == s || (p.starts_with(':') && !s.is_empty()))
}

fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
