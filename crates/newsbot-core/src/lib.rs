//! # NewsBot Core
//!
//! Shared building blocks for the NewsBot workspace: the broadcast data model,
//! the TOML configuration and the error type every other crate returns.

pub mod config;
pub mod error;
pub mod types;

pub use config::NewsBotConfig;
pub use error::{NewsBotError, Result};
pub use types::{BroadcastStatus, Group, ScheduledBroadcast, View};
