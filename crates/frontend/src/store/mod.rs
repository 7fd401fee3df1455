pub mod auth;
pub mod permission;
pub mod persist;
pub mod user;

pub use auth::AuthStore;
pub use permission::PermissionStore;
pub use user::UserStore;
