//! Ghibli Gateway - A caching HTTP façade for the Studio Ghibli catalog API
//!
//! Serves catalog documents through a 5-minute cache-aside layer and stores
//! user comments in MySQL.

pub mod api;
pub mod cache;
pub mod comments;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
pub mod upstream;

pub use api::{create_router, AppState};
pub use config::Config;
pub use resolver::{ResourceKind, Resolver};
