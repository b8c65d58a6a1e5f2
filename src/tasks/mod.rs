//! Background Tasks Module
//!
//! Work that runs alongside the HTTP server.
//!
//! # Tasks
//! - Startup resolution: resolves the file that was active when the host
//!   started the server

mod startup;

pub use startup::spawn_startup_resolution;
