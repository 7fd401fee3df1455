//! DTOs shared between the admin client and the blog REST backend.

pub mod blog;
pub mod shared;
pub mod system;
