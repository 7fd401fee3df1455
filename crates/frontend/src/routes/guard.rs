//! Navigation guard.
//!
//! Runs before every navigation: sends anonymous visitors to the login page,
//! installs the session's dynamic routes the first time a signed-in user
//! navigates, and maps unknown paths to the 404 page.

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::RouteError;
use super::record::RouteRecord;
use super::registrar::{RegisterReport, RouteRegistrar};
use super::registry::{basic_routes, LOGIN_PATH, NOT_FOUND_PATH};
use super::source::select_source;
use super::table::{RouteMatch, TableState};
use crate::store::{AuthStore, PermissionStore, UserStore};
use crate::system::auth::api::AuthApi;

/// Roles handed to the client-declared route source.
const DEFAULT_ROLES: [&str; 1] = ["admin"];

#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    Proceed(RouteMatch),
    Redirect(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Bootstrap {
    /// Nobody is signed in; nothing was registered.
    NoToken,
    Registered(RegisterReport),
    /// Loading failed; the table was left as it was.
    Failed,
}

#[derive(Debug, Serialize, Deserialize)]
struct LoginQuery {
    redirect: String,
}

/// Login page location that returns to `to` after signing in.
pub fn login_redirect(to: &str) -> String {
    if to.is_empty() || to == "/" {
        return LOGIN_PATH.to_string();
    }
    match serde_qs::to_string(&LoginQuery {
        redirect: to.to_string(),
    }) {
        Ok(query) => format!("{}?{}", LOGIN_PATH, query),
        Err(err) => {
            log::warn!("failed to encode login redirect: {}", err);
            LOGIN_PATH.to_string()
        }
    }
}

/// The `redirect` parameter of a login page query string.
pub fn redirect_target(query: &str) -> Option<String> {
    let query = query.trim_start_matches('?');
    serde_qs::from_str::<LoginQuery>(query)
        .ok()
        .map(|q| q.redirect)
        .filter(|r| r.starts_with('/'))
}

fn path_only(to: &str) -> &str {
    to.split(['?', '#']).next().unwrap_or_default()
}

#[derive(Clone, Copy)]
pub struct NavigationGuard {
    registrar: RwSignal<RouteRegistrar>,
    bootstrapped: RwSignal<bool>,
    auth: AuthStore,
    user: UserStore,
    permission: PermissionStore,
    back_router: bool,
}

impl NavigationGuard {
    pub fn new(auth: AuthStore, user: UserStore, permission: PermissionStore, back_router: bool) -> Self {
        Self {
            registrar: RwSignal::new(RouteRegistrar::new(basic_routes())),
            bootstrapped: RwSignal::new(false),
            auth,
            user,
            permission,
            back_router,
        }
    }

    pub fn registrar(&self) -> RwSignal<RouteRegistrar> {
        self.registrar
    }

    pub fn table_state(&self) -> TableState {
        self.registrar.with_untracked(|r| r.state())
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped.get_untracked()
    }

    /// Sidebar entries of the live table.
    pub fn menus(&self) -> Vec<RouteRecord> {
        self.registrar.with(|r| r.table().menus())
    }

    /// Fetch the user profile if needed, generate the access routes and
    /// register them.
    pub async fn add_dynamic_routes<A: AuthApi + ?Sized>(&self, api: &A) -> Bootstrap {
        if !self.auth.is_logged_in() {
            log::debug!("no token, skipping dynamic routes");
            return Bootstrap::NoToken;
        }

        let routes = match self.load_access_routes(api).await {
            Ok(routes) => routes,
            Err(err) => {
                log::error!("failed to add dynamic routes: {}", err);
                return Bootstrap::Failed;
            }
        };

        let mut report = RegisterReport::default();
        self.registrar.update(|r| report = r.register(routes));
        self.bootstrapped.set(true);
        log::info!("session bootstrapped with {} route(s)", report.added.len());
        Bootstrap::Registered(report)
    }

    async fn load_access_routes<A: AuthApi + ?Sized>(&self, api: &A) -> Result<Vec<RouteRecord>, RouteError> {
        if self.user.user_id().is_none() {
            self.user.load_user_info(api).await?;
        }
        let roles = DEFAULT_ROLES.iter().map(|r| r.to_string()).collect();
        let source = select_source(self.back_router, api, roles);
        self.permission.generate_routes(source.as_ref()).await
    }

    /// Decide where a navigation to `to` ends up.
    pub async fn before_each<A: AuthApi + ?Sized>(&self, to: &str, api: &A) -> Navigation {
        let path = path_only(to);

        if !self.auth.is_logged_in() {
            let basic = self
                .registrar
                .with_untracked(|r| r.table().resolve(to).filter(|m| r.table().is_basic(&m.name)));
            return match basic {
                Some(found) => Navigation::Proceed(found),
                None => Navigation::Redirect(login_redirect(to)),
            };
        }

        if !self.is_bootstrapped() {
            self.add_dynamic_routes(api).await;
        }

        if path.trim_end_matches('/') == LOGIN_PATH {
            return Navigation::Redirect("/".to_string());
        }

        match self.registrar.with_untracked(|r| r.table().resolve(to)) {
            Some(found) => Navigation::Proceed(found),
            None if path == NOT_FOUND_PATH => {
                log::error!("404 route is not registered");
                Navigation::Redirect(LOGIN_PATH.to_string())
            }
            None => {
                log::debug!("no route for {}, redirecting to 404", to);
                Navigation::Redirect(NOT_FOUND_PATH.to_string())
            }
        }
    }

    /// Drop every dynamic route; the next navigation bootstraps again.
    pub fn reset(&self) {
        self.registrar.update(|r| {
            r.reset();
        });
        self.bootstrapped.set(false);
    }
}

#[cfg(test)]
mod tests {
    use contracts::system::menu::{Menu, MenuTreeVo};

    use super::*;
    use crate::shared::http::ApiError;
    use crate::system::auth::api::testing::FakeAuthApi;

    fn guard(back_router: bool) -> (NavigationGuard, AuthStore) {
        let auth = AuthStore::new();
        let guard = NavigationGuard::new(auth, UserStore::new(), PermissionStore::new(), back_router);
        (guard, auth)
    }

    fn proceeds_to(nav: Navigation) -> String {
        match nav {
            Navigation::Proceed(found) => found.name,
            Navigation::Redirect(path) => panic!("unexpected redirect to {}", path),
        }
    }

    #[test]
    fn test_login_redirect_query() {
        assert_eq!(login_redirect("/"), "/login");
        let location = login_redirect("/article/list");
        let (path, query) = location.split_once('?').unwrap();
        assert_eq!(path, "/login");
        assert_eq!(redirect_target(query), Some("/article/list".to_string()));
        assert_eq!(redirect_target("redirect=https://evil.example"), None);
    }

    #[tokio::test]
    async fn test_without_token_redirects_and_registers_nothing() {
        let (guard, _) = guard(false);
        let api = FakeAuthApi::with_user(1);

        let nav = guard.before_each("/article/list", &api).await;
        assert_eq!(nav, Navigation::Redirect(login_redirect("/article/list")));
        assert_eq!(guard.add_dynamic_routes(&api).await, Bootstrap::NoToken);
        assert_eq!(guard.table_state(), TableState::BasicOnly);
        assert_eq!(api.user_info_calls.get(), 0);

        assert_eq!(proceeds_to(guard.before_each("/login?redirect=%2F", &api).await), "Login");
    }

    #[tokio::test]
    async fn test_bootstraps_once_per_session() {
        let (guard, auth) = guard(false);
        let api = FakeAuthApi::with_user(1);
        auth.set_token("token");

        assert_eq!(proceeds_to(guard.before_each("/", &api).await), "HomePage");
        assert!(guard.is_bootstrapped());
        assert_eq!(guard.table_state(), TableState::Populated);
        assert_eq!(proceeds_to(guard.before_each("/article/list", &api).await), "ArticleList");
        assert_eq!(api.user_info_calls.get(), 1);

        assert_eq!(guard.before_each("/login", &api).await, Navigation::Redirect("/".to_string()));
        assert_eq!(guard.before_each("/nowhere", &api).await, Navigation::Redirect("/404".to_string()));
    }

    #[tokio::test]
    async fn test_failed_bootstrap_retries_on_next_navigation() {
        let (guard, auth) = guard(true);
        let api = FakeAuthApi::with_user(1);
        api.set_menus(Err(ApiError::Network("offline".to_string())));
        auth.set_token("token");

        assert_eq!(guard.before_each("/home", &api).await, Navigation::Redirect("/404".to_string()));
        assert!(!guard.is_bootstrapped());
        assert_eq!(guard.table_state(), TableState::BasicOnly);

        api.set_menus(Ok(vec![MenuTreeVo {
            menu: Menu {
                name: "首页".to_string(),
                path: "/home".to_string(),
                component: "/home".to_string(),
                ..Menu::default()
            },
            children: Vec::new(),
        }]));
        assert_eq!(proceeds_to(guard.before_each("/home", &api).await), "首页");
        assert_eq!(api.menu_calls.get(), 2);
        assert_eq!(api.user_info_calls.get(), 1);
    }

    #[tokio::test]
    async fn test_reset_drops_dynamic_routes() {
        let (guard, auth) = guard(false);
        let api = FakeAuthApi::with_user(1);
        auth.set_token("token");
        guard.before_each("/", &api).await;

        guard.reset();
        assert!(!guard.is_bootstrapped());
        assert_eq!(guard.table_state(), TableState::BasicOnly);

        auth.clear();
        assert_eq!(
            guard.before_each("/home", &api).await,
            Navigation::Redirect(login_redirect("/home"))
        );
    }
}
