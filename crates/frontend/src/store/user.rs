use contracts::system::auth::UserInfo;
use leptos::prelude::*;

use crate::shared::http::ApiError;
use crate::system::auth::api::AuthApi;

/// Profile of the signed-in user. Not persisted: it is fetched again on
/// every bootstrap.
#[derive(Clone, Copy)]
pub struct UserStore {
    info: RwSignal<Option<UserInfo>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            info: RwSignal::new(None),
        }
    }

    pub fn info(&self) -> RwSignal<Option<UserInfo>> {
        self.info
    }

    pub fn user_id(&self) -> Option<i64> {
        self.info
            .with_untracked(|info| info.as_ref().map(|u| u.id))
            .filter(|id| *id != 0)
    }

    pub fn nickname(&self) -> String {
        self.info
            .with(|info| info.as_ref().map(|u| u.nickname.clone()))
            .unwrap_or_default()
    }

    pub fn set_user_info(&self, info: UserInfo) {
        self.info.set(Some(info));
    }

    /// Fetch the profile of the token's owner.
    pub async fn load_user_info<A: AuthApi + ?Sized>(&self, api: &A) -> Result<(), ApiError> {
        let info = api.user_info().await?;
        log::debug!("loaded profile of user {}", info.id);
        self.set_user_info(info);
        Ok(())
    }

    pub fn reset(&self) {
        self.info.set(None);
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
