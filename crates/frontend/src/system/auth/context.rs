use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::api::AuthApi;
use crate::config::AppConfig;
use crate::routes::guard::{login_redirect, Navigation, NavigationGuard};
use crate::routes::history::{self, HistoryMode};
use crate::routes::registry::LOGIN_PATH;
use crate::routes::table::RouteMatch;
use crate::shared::dialog::{ConfirmOptions, Confirmer, DialogService};
use crate::shared::http::{AuthAction, ClientProfile, HttpClient, HttpContext};
use crate::shared::notify::{NotificationService, Notifier};
use crate::shared::storage::LocalStore;
use crate::store::persist;
use crate::store::{AuthStore, PermissionStore, UserStore};

/// Redirect chains longer than this are treated as a loop.
const MAX_REDIRECTS: usize = 5;

/// Everything the signed-in admin session needs, provided through context.
#[derive(Clone, Copy)]
pub struct Session {
    pub auth: AuthStore,
    pub user: UserStore,
    pub permission: PermissionStore,
    pub guard: NavigationGuard,
    pub notify: NotificationService,
    pub dialog: DialogService,
    current: RwSignal<Option<RouteMatch>>,
    location: RwSignal<String>,
    config: StoredValue<AppConfig>,
}

impl Session {
    pub fn new(config: AppConfig, notify: NotificationService, dialog: DialogService) -> Self {
        let auth = AuthStore::new();
        let user = UserStore::new();
        let permission = PermissionStore::new();
        Self {
            auth,
            user,
            permission,
            guard: NavigationGuard::new(auth, user, permission, config.router.back_router),
            notify,
            dialog,
            current: RwSignal::new(None),
            location: RwSignal::new("/".to_string()),
            config: StoredValue::new(config),
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// The admin API client bound to this session.
    pub fn client(&self) -> HttpClient<Session> {
        let base_api = self.config.with_value(|c| c.api.base_api.clone());
        HttpClient::new(base_api, ClientProfile::Admin, *self)
    }

    /// Route currently displayed.
    pub fn current(&self) -> RwSignal<Option<RouteMatch>> {
        self.current
    }

    /// Route location (path and query) currently displayed.
    pub fn location(&self) -> RwSignal<String> {
        self.location
    }

    /// Restore persisted stores and keep them saved on every change.
    pub fn init_persistence(&self) {
        let cache = LocalStore::browser();
        persist::load(&self.auth, &cache);
        persist::load(&self.permission, &cache);

        let auth = self.auth;
        Effect::new(move |_| persist::save(&auth, &LocalStore::browser()));
        let permission = self.permission;
        Effect::new(move |_| persist::save(&permission, &LocalStore::browser()));
    }

    pub fn navigate(&self, to: impl Into<String>) {
        self.spawn_navigation(to.into(), HistoryMode::Push);
    }

    /// Re-run the guard for the address bar location (startup, back/forward).
    pub fn sync_with_location(&self) {
        let public_path = self.config.with_value(|c| c.router.public_path.clone());
        self.spawn_navigation(history::current_location(&public_path), HistoryMode::Replace);
    }

    fn spawn_navigation(&self, to: String, mode: HistoryMode) {
        let session = *self;
        spawn_local(async move {
            session.run_navigation(to, mode).await;
        });
    }

    async fn run_navigation(&self, to: String, mut mode: HistoryMode) {
        let api = self.client();
        let mut target = to.clone();
        for _ in 0..MAX_REDIRECTS {
            match self.guard.before_each(&target, &api).await {
                Navigation::Proceed(found) => {
                    let public_path = self.config.with_value(|c| c.router.public_path.clone());
                    history::commit(&public_path, &target, mode);
                    log::debug!("navigated to {} ({})", target, found.name);
                    self.location.set(target);
                    self.current.set(Some(found));
                    return;
                }
                Navigation::Redirect(next) => {
                    log::debug!("redirect {} -> {}", target, next);
                    target = next;
                    mode = HistoryMode::Replace;
                }
            }
        }
        log::error!("too many redirects navigating to {}", to);
    }

    /// Sign in, then continue to `redirect` (or the home page).
    pub async fn login(&self, username: String, password: String, redirect: Option<String>) -> Result<(), String> {
        let response = self
            .client()
            .login(username, password)
            .await
            .map_err(|e| e.to_string())?;

        self.auth.set_token(response.token);
        self.user.set_user_info(response.user);
        self.notify.success("登录成功");
        self.navigate(redirect.unwrap_or_else(|| "/".to_string()));
        Ok(())
    }

    /// Ask for confirmation, tell the backend and clear the session.
    pub async fn logout(&self) {
        let options = ConfirmOptions::new("确认退出？").title("提示");
        if !self.dialog.confirm(options).await {
            return;
        }
        if let Err(err) = self.client().logout().await {
            log::warn!("logout request failed: {}", err);
        }
        self.reset_login_state();
        self.notify.success("您已经退出登录！");
        self.navigate(LOGIN_PATH);
    }

    /// Forget token, profile and dynamic routes.
    pub fn reset_login_state(&self) {
        self.auth.clear();
        self.user.reset();
        self.permission.reset();
        self.guard.reset();
        self.current.set(None);
    }

    /// Go to the login page, coming back here afterwards.
    pub fn to_login(&self) {
        let here = self.location.get_untracked();
        let target = if here.starts_with(LOGIN_PATH) {
            LOGIN_PATH.to_string()
        } else {
            login_redirect(&here)
        };
        self.navigate(target);
    }

    pub fn force_offline(&self) {
        self.notify.warning("您已被强制下线");
        self.reset_login_state();
        self.to_login();
    }
}

impl HttpContext for Session {
    fn token(&self) -> Option<String> {
        self.auth.token()
    }

    fn notify_error(&self, text: &str) {
        self.notify.error(text);
    }

    fn on_auth_action(&self, action: AuthAction) {
        match action {
            AuthAction::ToLogin => {
                self.reset_login_state();
                self.to_login();
            }
            AuthAction::ForceOffline => self.force_offline(),
            AuthAction::ResetLoginState => self.reset_login_state(),
            AuthAction::ShowLoginDialog => log::debug!("login dialog requested"),
        }
    }
}

pub fn use_session() -> Session {
    use_context::<Session>().expect("Session not provided in context")
}
