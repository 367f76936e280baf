//! # NewsBot Gateway
//!
//! HTTP surface of the dashboard: a JSON API under `/api/v1` and a
//! server-rendered HTML page with the sidebar and the four views.

pub mod dashboard;
pub mod routes;
pub mod server;

pub use server::{AppState, build_router, start};
