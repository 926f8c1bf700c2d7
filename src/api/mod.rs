//! API Module
//!
//! HTTP handlers and routing for the gateway REST API.
//!
//! # Endpoints
//! - `GET /api/` - Welcome message
//! - `GET /api/films/:id?` - Films, cached
//! - `GET /api/locations/:id?` - Locations, cached
//! - `GET /api/people/:id` - People, cached
//! - `GET /api/species/:id?` - Species, cached
//! - `GET /api/vehicles/:id?` - Vehicles, cached
//! - `POST /api/comments` - Store a comment

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
