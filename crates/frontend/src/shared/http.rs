//! HTTP client with request/response interception.
//!
//! Every call goes through the same two steps:
//! - request: attach `Authorization: Bearer <token>` unless the call opts out;
//! - response: unwrap the `{code, message, data}` envelope, notify on
//!   failures and translate auth codes into session actions.
//!
//! The decision logic is kept in plain functions (`authorize`,
//! `intercept_response`) so it can be exercised without a browser.

use contracts::shared::response::{
    ApiResponse, ERR_FORCE_OFFLINE, ERR_TOKEN_NOT_EXIST, ERR_TOKEN_RUNTIME, ERR_TOKEN_WRONG,
};
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

const SERVER_ERROR_TEXT: &str = "服务端异常";
const NETWORK_ERROR_TEXT: &str = "网络异常，请稍后重试";
const NOT_LOGGED_IN_TEXT: &str = "当前没有登录，请先登录！";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Token missing, expired, invalid or revoked.
    #[error("{message} (code {code})")]
    Auth { code: i32, message: String },
    /// Any other non-zero business code.
    #[error("{message} (code {code})")]
    Business { code: i32, message: String },
    #[error("server responded with status {status}: {message}")]
    Server { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("not logged in")]
    NotLoggedIn,
}

/// Which client's interception rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientProfile {
    /// Admin panel: every call carries the token when there is one.
    Admin,
    /// Public blog: only calls marked `need_token` carry it.
    Front,
}

/// Session side effects requested by the interceptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    ToLogin,
    ForceOffline,
    ResetLoginState,
    ShowLoginDialog,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Admin profile: do not attach the token (login, captcha...).
    pub no_need_token: bool,
    /// Front profile: the call requires a signed-in user.
    pub need_token: bool,
}

impl RequestOptions {
    pub fn anonymous() -> Self {
        Self {
            no_need_token: true,
            need_token: false,
        }
    }

    pub fn authenticated() -> Self {
        Self {
            no_need_token: false,
            need_token: true,
        }
    }
}

/// What the response interceptor decided.
#[derive(Debug, Clone, PartialEq)]
pub struct Interception {
    pub result: Result<ApiResponse, ApiError>,
    pub notify: Option<String>,
    pub actions: Vec<AuthAction>,
}

impl Interception {
    fn ok(resp: ApiResponse) -> Self {
        Self {
            result: Ok(resp),
            notify: None,
            actions: Vec::new(),
        }
    }

    fn fail(err: ApiError, notify: Option<String>, actions: Vec<AuthAction>) -> Self {
        Self {
            result: Err(err),
            notify,
            actions,
        }
    }
}

/// Request interceptor: the `Authorization` header to send, if any.
pub fn authorize(
    profile: ClientProfile,
    options: RequestOptions,
    token: Option<&str>,
) -> Result<Option<String>, ApiError> {
    let token = token.filter(|t| !t.is_empty());
    match profile {
        ClientProfile::Admin if options.no_need_token => Ok(None),
        ClientProfile::Admin => Ok(token.map(|t| format!("Bearer {}", t))),
        ClientProfile::Front if !options.need_token => Ok(None),
        ClientProfile::Front => match token {
            Some(t) => Ok(Some(format!("Bearer {}", t))),
            None => Err(ApiError::NotLoggedIn),
        },
    }
}

/// Response interceptor for a completed HTTP exchange.
pub fn intercept_response(profile: ClientProfile, status: u16, body: &str) -> Interception {
    if (200..300).contains(&status) {
        let resp: ApiResponse = match serde_json::from_str(body) {
            Ok(resp) => resp,
            Err(err) => {
                log::error!("undecodable response body: {}", err);
                return Interception::fail(ApiError::Decode(err.to_string()), None, Vec::new());
            }
        };
        if resp.is_success() {
            return Interception::ok(resp);
        }
        return intercept_business_error(profile, resp);
    }

    let envelope: Option<ApiResponse> = serde_json::from_str(body).ok();
    match (profile, status) {
        (ClientProfile::Front, 401) => {
            let message = envelope
                .map(|e| e.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| NOT_LOGGED_IN_TEXT.to_string());
            not_logged_in(message)
        }
        (_, 500..=599) => {
            let (message, notify) = match envelope {
                Some(e) if !e.message.is_empty() && e.data.as_ref().is_some_and(|d| !d.is_null()) => {
                    (e.message.clone(), e.error_text())
                }
                Some(e) => (e.message, SERVER_ERROR_TEXT.to_string()),
                None => (String::new(), SERVER_ERROR_TEXT.to_string()),
            };
            Interception::fail(ApiError::Server { status, message }, Some(notify), Vec::new())
        }
        _ => {
            let message = envelope.map(|e| e.message).unwrap_or_default();
            Interception::fail(ApiError::Server { status, message }, None, Vec::new())
        }
    }
}

/// Interception for a request that never produced a readable response.
pub fn network_failure(detail: String) -> Interception {
    Interception::fail(ApiError::Network(detail), Some(NETWORK_ERROR_TEXT.to_string()), Vec::new())
}

/// Interception for a call the request interceptor refused (front profile).
pub fn not_logged_in(message: String) -> Interception {
    Interception::fail(
        ApiError::NotLoggedIn,
        Some(message),
        vec![AuthAction::ResetLoginState, AuthAction::ShowLoginDialog],
    )
}

fn intercept_business_error(profile: ClientProfile, resp: ApiResponse) -> Interception {
    log::error!("request failed: code={} message={}", resp.code, resp.message);
    let code = resp.code;
    match profile {
        ClientProfile::Admin => {
            let notify = Some(resp.error_text());
            let action = match code {
                ERR_TOKEN_NOT_EXIST => Some(AuthAction::ToLogin),
                ERR_TOKEN_RUNTIME | ERR_TOKEN_WRONG | ERR_FORCE_OFFLINE => Some(AuthAction::ForceOffline),
                _ => None,
            };
            let message = resp.message;
            match action {
                Some(action) => Interception::fail(ApiError::Auth { code, message }, notify, vec![action]),
                None => Interception::fail(ApiError::Business { code, message }, notify, Vec::new()),
            }
        }
        ClientProfile::Front => {
            let notify = Some(resp.message.clone());
            let message = resp.message;
            if code == ERR_TOKEN_WRONG {
                Interception::fail(
                    ApiError::Auth { code, message },
                    notify,
                    vec![AuthAction::ResetLoginState],
                )
            } else {
                Interception::fail(ApiError::Business { code, message }, notify, Vec::new())
            }
        }
    }
}

/// What the client needs from the running application.
pub trait HttpContext {
    fn token(&self) -> Option<String>;
    fn notify_error(&self, text: &str);
    fn on_auth_action(&self, action: AuthAction);
}

#[derive(Debug, Clone, Copy)]
enum Verb {
    Get,
    Post,
    Delete,
}

#[derive(Clone)]
pub struct HttpClient<C: HttpContext> {
    base_url: String,
    profile: ClientProfile,
    ctx: C,
}

impl<C: HttpContext> HttpClient<C> {
    pub fn new(base_url: impl Into<String>, profile: ClientProfile, ctx: C) -> Self {
        Self {
            base_url: base_url.into(),
            profile,
            ctx,
        }
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        self.send::<()>(Verb::Get, path, None, options).await
    }

    pub async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        self.send(Verb::Post, path, Some(body), options).await
    }

    pub async fn delete<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        self.send(Verb::Delete, path, Some(body), options).await
    }

    /// GET and decode `data`; a missing payload is an error.
    pub async fn get_data<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T, ApiError> {
        decode_data(self.get(path, options).await?)
    }

    /// POST and decode `data`; a missing payload is an error.
    pub async fn post_data<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        decode_data(self.post(path, body, options).await?)
    }

    async fn send<B: Serialize>(
        &self,
        verb: Verb,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let token = self.ctx.token();
        let authorization = match authorize(self.profile, options, token.as_deref()) {
            Ok(header) => header,
            Err(_) => return self.apply(not_logged_in(NOT_LOGGED_IN_TEXT.to_string())),
        };

        let url = format!("{}{}", self.base_url, path);
        let mut builder: RequestBuilder = match verb {
            Verb::Get => Request::get(&url),
            Verb::Post => Request::post(&url),
            Verb::Delete => Request::delete(&url),
        };
        if let Some(value) = &authorization {
            builder = builder.header("Authorization", value);
        }

        let request = match body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Decode(format!("failed to serialize request: {}", e)))?;

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                log::error!("{:?} {} failed: {}", verb, url, err);
                return self.apply(network_failure(err.to_string()));
            }
        };
        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                log::error!("{:?} {} failed to read response: {}", verb, url, err);
                return self.apply(network_failure(format!("failed to read response: {}", err)));
            }
        };

        self.apply(intercept_response(self.profile, status, &text))
    }

    fn apply(&self, interception: Interception) -> Result<ApiResponse, ApiError> {
        if let Some(text) = &interception.notify {
            self.ctx.notify_error(text);
        }
        for action in &interception.actions {
            self.ctx.on_auth_action(*action);
        }
        interception.result
    }
}

pub fn decode_data<T: DeserializeOwned>(resp: ApiResponse) -> Result<T, ApiError> {
    let data = resp.data.unwrap_or(Value::Null);
    serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_admin_attaches_token_unless_opted_out() {
        assert_eq!(
            authorize(ClientProfile::Admin, RequestOptions::default(), Some("t0k")),
            Ok(Some("Bearer t0k".to_string()))
        );
        assert_eq!(authorize(ClientProfile::Admin, RequestOptions::default(), None), Ok(None));
        assert_eq!(
            authorize(ClientProfile::Admin, RequestOptions::anonymous(), Some("t0k")),
            Ok(None)
        );
    }

    #[test]
    fn test_front_requires_token_only_when_asked() {
        assert_eq!(authorize(ClientProfile::Front, RequestOptions::default(), Some("t0k")), Ok(None));
        assert_eq!(
            authorize(ClientProfile::Front, RequestOptions::authenticated(), Some("t0k")),
            Ok(Some("Bearer t0k".to_string()))
        );
        assert_eq!(
            authorize(ClientProfile::Front, RequestOptions::authenticated(), Some("")),
            Err(ApiError::NotLoggedIn)
        );
    }

    #[test]
    fn test_success_passes_through() {
        let body = json!({"code": 0, "message": "OK", "data": {"id": 1}}).to_string();
        let out = intercept_response(ClientProfile::Admin, 200, &body);
        assert!(out.notify.is_none());
        assert!(out.actions.is_empty());
        let resp = out.result.unwrap();
        assert_eq!(resp.data, Some(json!({"id": 1})));
    }

    #[test]
    fn test_admin_auth_codes() {
        let body = json!({"code": 1201, "message": "token not exist"}).to_string();
        let out = intercept_response(ClientProfile::Admin, 200, &body);
        assert_eq!(out.actions, vec![AuthAction::ToLogin]);
        assert!(matches!(out.result, Err(ApiError::Auth { code: 1201, .. })));

        for code in [1202, 1203, 1207] {
            let body = json!({"code": code, "message": "offline"}).to_string();
            let out = intercept_response(ClientProfile::Admin, 200, &body);
            assert_eq!(out.actions, vec![AuthAction::ForceOffline]);
            assert_eq!(out.notify.as_deref(), Some("offline"));
        }
    }

    #[test]
    fn test_admin_business_error_notifies_with_detail() {
        let body = json!({"code": 9002, "message": "操作失败", "data": "duplicate key"}).to_string();
        let out = intercept_response(ClientProfile::Admin, 200, &body);
        assert_eq!(out.notify.as_deref(), Some("操作失败 duplicate key"));
        assert!(out.actions.is_empty());
        assert_eq!(
            out.result,
            Err(ApiError::Business {
                code: 9002,
                message: "操作失败".to_string()
            })
        );
    }

    #[test]
    fn test_front_rules() {
        let body = json!({"code": 1203, "message": "token wrong", "data": "sig"}).to_string();
        let out = intercept_response(ClientProfile::Front, 200, &body);
        assert_eq!(out.actions, vec![AuthAction::ResetLoginState]);
        assert_eq!(out.notify.as_deref(), Some("token wrong"));

        let body = json!({"code": 1202, "message": "expired"}).to_string();
        let out = intercept_response(ClientProfile::Front, 200, &body);
        assert!(out.actions.is_empty());
        assert!(matches!(out.result, Err(ApiError::Business { code: 1202, .. })));

        let out = intercept_response(ClientProfile::Front, 401, "");
        assert_eq!(
            out.actions,
            vec![AuthAction::ResetLoginState, AuthAction::ShowLoginDialog]
        );
        assert_eq!(out.result, Err(ApiError::NotLoggedIn));
    }

    #[test]
    fn test_server_errors() {
        let out = intercept_response(ClientProfile::Admin, 500, "<html>");
        assert_eq!(out.notify.as_deref(), Some(SERVER_ERROR_TEXT));
        assert!(matches!(out.result, Err(ApiError::Server { status: 500, .. })));

        let body = json!({"code": 500, "message": "FAIL", "data": "panic"}).to_string();
        let out = intercept_response(ClientProfile::Admin, 500, &body);
        assert_eq!(out.notify.as_deref(), Some("FAIL panic"));

        for status in [502, 503, 504] {
            let out = intercept_response(ClientProfile::Admin, status, "");
            assert_eq!(out.notify.as_deref(), Some(SERVER_ERROR_TEXT));
            assert!(matches!(out.result, Err(ApiError::Server { status: s, .. }) if s == status));
        }
        let out = intercept_response(ClientProfile::Front, 503, "");
        assert_eq!(out.notify.as_deref(), Some(SERVER_ERROR_TEXT));

        let out = intercept_response(ClientProfile::Admin, 404, "");
        assert!(out.notify.is_none());
        assert!(matches!(out.result, Err(ApiError::Server { status: 404, .. })));

        let out = intercept_response(ClientProfile::Admin, 200, "not json");
        assert!(matches!(out.result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_network_failure_notifies() {
        let out = network_failure("failed to read response: aborted".to_string());
        assert_eq!(out.notify.as_deref(), Some(NETWORK_ERROR_TEXT));
        assert!(out.actions.is_empty());
        assert!(matches!(out.result, Err(ApiError::Network(ref d)) if d.contains("aborted")));
    }

    #[test]
    fn test_decode_data() {
        let resp = ApiResponse {
            code: 0,
            message: "OK".to_string(),
            data: Some(json!([1, 2])),
        };
        let data: Vec<i32> = decode_data(resp).unwrap();
        assert_eq!(data, vec![1, 2]);
    }
}
