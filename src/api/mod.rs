//! API Module
//!
//! HTTP handlers and routing for the editor host.
//!
//! # Endpoints
//! - `POST /editor/active` - Active editor changed
//! - `POST /switch` - Friend file to open
//! - `PUT /settings` - Settings changed
//! - `GET /stats` - Path cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
