use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use super::persist::Persisted;
use crate::routes::error::RouteError;
use crate::routes::record::RouteRecord;
use crate::routes::registry::basic_routes;
use crate::routes::source::{ClientRouteSource, RouteSource, ServerRouteSource};
use crate::system::auth::api::AuthApi;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissionSnapshot {
    #[serde(default)]
    pub access_routes: Vec<RouteRecord>,
}

/// Routes the signed-in user may reach, on top of the basic ones.
#[derive(Clone, Copy)]
pub struct PermissionStore {
    access_routes: RwSignal<Vec<RouteRecord>>,
}

impl PermissionStore {
    pub fn new() -> Self {
        Self {
            access_routes: RwSignal::new(Vec::new()),
        }
    }

    pub fn access_routes(&self) -> Vec<RouteRecord> {
        self.access_routes.get_untracked()
    }

    /// Basic routes followed by the access routes.
    pub fn routes(&self) -> Vec<RouteRecord> {
        let mut routes = basic_routes();
        routes.extend(self.access_routes.get());
        routes
    }

    /// Named, visible routes for the sidebar.
    pub fn menus(&self) -> Vec<RouteRecord> {
        self.routes()
            .into_iter()
            .filter(|r| !r.name.is_empty() && !r.is_hidden)
            .collect()
    }

    /// Load access routes from `source`. The store is left untouched on failure.
    pub async fn generate_routes(&self, source: &dyn RouteSource) -> Result<Vec<RouteRecord>, RouteError> {
        let routes = source.access_routes().await?;
        self.access_routes.set(routes.clone());
        Ok(routes)
    }

    /// Access routes from the backend menu tree of the current user.
    pub async fn generate_routes_back<A: AuthApi + ?Sized>(&self, api: &A) -> Result<Vec<RouteRecord>, RouteError> {
        self.generate_routes(&ServerRouteSource::new(api)).await
    }

    /// Access routes from the client registry.
    pub async fn generate_routes_front(&self, roles: Vec<String>) -> Result<Vec<RouteRecord>, RouteError> {
        self.generate_routes(&ClientRouteSource::new(roles)).await
    }

    pub fn reset(&self) {
        self.access_routes.set(Vec::new());
    }
}

impl Default for PermissionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Persisted for PermissionStore {
    const KEY: &'static str = "gvb_admin_permission";
    type Snapshot = PermissionSnapshot;

    fn snapshot(&self) -> PermissionSnapshot {
        PermissionSnapshot {
            access_routes: self.access_routes.get(),
        }
    }

    fn restore(&self, snapshot: PermissionSnapshot) {
        self.access_routes.set(snapshot.access_routes);
    }
}
