pub mod category;
pub mod home;
pub mod module;
pub mod not_found;
