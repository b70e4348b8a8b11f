//! # readsim-server
//!
//! HTTP front end: query validation, range fetching and the streamed
//! simulation pipeline wired into an `axum` router.

pub mod cli;
pub mod config;
pub mod consts;
pub mod cors;
pub mod errors;
pub mod routes;
pub mod sink;
pub mod state;

pub use config::ServerConfig;
pub use routes::build_router;
pub use state::AppState;
