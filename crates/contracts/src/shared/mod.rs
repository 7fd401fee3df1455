pub mod page;
pub mod response;
