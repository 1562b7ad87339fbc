pub mod dashboard;
mod handlers;
pub mod models;
pub mod server;

// Re-export commonly used types
pub use handlers::AppState;
pub use models::*;
