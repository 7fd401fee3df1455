use thiserror::Error;

use crate::shared::http::ApiError;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route name {0:?} is already registered")]
    DuplicateName(String),
    #[error("failed to load routes: {0}")]
    Api(#[from] ApiError),
}
