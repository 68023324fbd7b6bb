// HTTP routes
pub mod auth;
pub mod chat;
pub mod health;

pub use auth::*;
pub use chat::*;
pub use health::*;
