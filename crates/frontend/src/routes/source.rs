//! Where the access routes of a session come from.
//!
//! With `back_router` on, the backend's menu tree for the current user is
//! turned into route records; otherwise the statically compiled registry is
//! used.

use async_trait::async_trait;
use contracts::system::menu::MenuTreeVo;

use super::error::RouteError;
use super::record::{RouteMeta, RouteRecord, ViewKey};
use super::registry;
use crate::system::auth::api::AuthApi;

/// Backend component name of the shared page frame.
const LAYOUT_COMPONENT: &str = "Layout";

#[async_trait(?Send)]
pub trait RouteSource {
    async fn access_routes(&self) -> Result<Vec<RouteRecord>, RouteError>;
}

/// Routes built from the menus the backend grants the current user.
pub struct ServerRouteSource<'a, A: AuthApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: AuthApi + ?Sized> ServerRouteSource<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }
}

#[async_trait(?Send)]
impl<'a, A: AuthApi + ?Sized> RouteSource for ServerRouteSource<'a, A> {
    async fn access_routes(&self) -> Result<Vec<RouteRecord>, RouteError> {
        let menus = self.api.user_menus().await?;
        log::debug!("received {} menu root(s) from backend", menus.len());
        Ok(menus_to_routes(menus))
    }
}

/// Routes declared by the client's module registry.
///
/// Role filtering is not implemented: every role sees the whole registry.
pub struct ClientRouteSource {
    roles: Vec<String>,
}

impl ClientRouteSource {
    pub fn new(roles: Vec<String>) -> Self {
        Self { roles }
    }
}

#[async_trait(?Send)]
impl RouteSource for ClientRouteSource {
    async fn access_routes(&self) -> Result<Vec<RouteRecord>, RouteError> {
        log::debug!("client routes requested for roles {:?}", self.roles);
        Ok(registry::route_modules())
    }
}

/// Convert the backend menu tree into route records, ordered by `order_num`.
pub fn menus_to_routes(mut menus: Vec<MenuTreeVo>) -> Vec<RouteRecord> {
    menus.sort_by_key(|m| m.menu.order_num);
    menus.into_iter().map(menu_to_route).collect()
}

fn menu_to_route(tree: MenuTreeVo) -> RouteRecord {
    let MenuTreeVo { menu, children } = tree;

    let component = if menu.component == LAYOUT_COMPONENT {
        ViewKey::new(ViewKey::LAYOUT)
    } else {
        ViewKey::new(menu.component.trim_start_matches('/'))
    };
    if !menu.component.is_empty() && !registry::is_known_view(&component) {
        log::warn!("menu {:?} points at unknown view {:?}", menu.name, menu.component);
    }

    RouteRecord {
        name: menu.name.clone(),
        path: menu.path,
        component,
        redirect: Some(menu.redirect).filter(|r| !r.is_empty()),
        is_hidden: menu.is_hidden,
        is_catalogue: menu.is_catalogue,
        meta: RouteMeta {
            title: menu.name,
            icon: Some(menu.icon).filter(|i| !i.is_empty()),
            order: menu.order_num,
            keep_alive: menu.keep_alive,
        },
        children: menus_to_routes(children),
    }
}

/// Pick the source matching the configured routing mode.
pub fn select_source<'a, A: AuthApi + ?Sized>(
    back_router: bool,
    api: &'a A,
    roles: Vec<String>,
) -> Box<dyn RouteSource + 'a> {
    if back_router {
        Box::new(ServerRouteSource::new(api))
    } else {
        Box::new(ClientRouteSource::new(roles))
    }
}
