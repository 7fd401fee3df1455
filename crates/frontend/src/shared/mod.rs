pub mod dialog;
pub mod http;
pub mod notify;
pub mod storage;
