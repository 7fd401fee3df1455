use async_trait::async_trait;
use contracts::system::auth::{LoginRequest, LoginResponse, UserInfo};
use contracts::system::menu::MenuTreeVo;

use crate::shared::http::{ApiError, HttpClient, HttpContext, RequestOptions};

/// Session endpoints of the blog backend.
#[async_trait(?Send)]
pub trait AuthApi {
    /// Login with username and password
    async fn login(&self, username: String, password: String) -> Result<LoginResponse, ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    /// Get current user info
    async fn user_info(&self) -> Result<UserInfo, ApiError>;

    /// Menu tree the current user may access
    async fn user_menus(&self) -> Result<Vec<MenuTreeVo>, ApiError>;
}

#[async_trait(?Send)]
impl<C: HttpContext> AuthApi for HttpClient<C> {
    async fn login(&self, username: String, password: String) -> Result<LoginResponse, ApiError> {
        let request = LoginRequest { username, password };
        self.post_data("/login", &request, RequestOptions::anonymous()).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.get("/logout", RequestOptions::default()).await.map(|_| ())
    }

    async fn user_info(&self) -> Result<UserInfo, ApiError> {
        self.get_data("/user/info", RequestOptions::default()).await
    }

    async fn user_menus(&self) -> Result<Vec<MenuTreeVo>, ApiError> {
        self.get_data("/menu/user_list", RequestOptions::default()).await
    }
}

#[cfg(test)]
pub mod testing {
    use std::cell::{Cell, RefCell};

    use async_trait::async_trait;
    use contracts::system::auth::{LoginResponse, UserInfo};
    use contracts::system::menu::MenuTreeVo;

    use super::AuthApi;
    use crate::shared::http::ApiError;

    /// In-memory backend with canned answers and call counters.
    #[derive(Debug)]
    pub struct FakeAuthApi {
        pub user: RefCell<Option<UserInfo>>,
        pub menus: RefCell<Result<Vec<MenuTreeVo>, ApiError>>,
        pub user_info_calls: Cell<usize>,
        pub menu_calls: Cell<usize>,
    }

    impl FakeAuthApi {
        /// No signed-in user, empty menu tree.
        pub fn anonymous() -> Self {
            Self {
                user: RefCell::new(None),
                menus: RefCell::new(Ok(Vec::new())),
                user_info_calls: Cell::new(0),
                menu_calls: Cell::new(0),
            }
        }

        pub fn with_user(id: i64) -> Self {
            let api = Self::anonymous();
            *api.user.borrow_mut() = Some(UserInfo {
                id,
                nickname: "admin".to_string(),
                ..UserInfo::default()
            });
            api
        }

        pub fn set_menus(&self, menus: Result<Vec<MenuTreeVo>, ApiError>) {
            *self.menus.borrow_mut() = menus;
        }
    }

    #[async_trait(?Send)]
    impl AuthApi for FakeAuthApi {
        async fn login(&self, _username: String, _password: String) -> Result<LoginResponse, ApiError> {
            let user = self.user.borrow().clone().ok_or(ApiError::Business {
                code: 500,
                message: "用户名或密码错误".to_string(),
            })?;
            Ok(LoginResponse {
                user,
                token: "token".to_string(),
            })
        }

        async fn logout(&self) -> Result<(), ApiError> {
            Ok(())
        }

        async fn user_info(&self) -> Result<UserInfo, ApiError> {
            self.user_info_calls.set(self.user_info_calls.get() + 1);
            self.user.borrow().clone().ok_or(ApiError::Auth {
                code: 1201,
                message: "token 不存在".to_string(),
            })
        }

        async fn user_menus(&self) -> Result<Vec<MenuTreeVo>, ApiError> {
            self.menu_calls.set(self.menu_calls.get() + 1);
            self.menus.borrow().clone()
        }
    }
}
