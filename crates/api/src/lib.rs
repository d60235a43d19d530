//! Drone media map server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! views) so integration tests and the binary entrypoint can both use them.

pub mod config;
pub mod error;
pub mod flows;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;
