pub mod config;
pub mod http;
pub mod panels;
pub mod poll;
pub mod status;
pub mod utils;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
