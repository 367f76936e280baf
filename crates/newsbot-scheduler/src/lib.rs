//! # NewsBot Scheduler
//!
//! In-memory broadcast scheduling behind the NewsBot dashboard.
//!
//! ## Architecture
//! ```text
//! Dashboard (state holder, one per process)
//!   ├── View          — which sidebar view is active
//!   ├── GroupRegistry — fixed audience segments (all, vip, new, inactive)
//!   ├── ComposeForm   — text + group id + date-time draft
//!   │     └── submit → BroadcastStore (newest first) → DeliveryChannel::accept
//!   ├── Confirmation  — one-shot "scheduled" flag, restarted by each submit
//!   └── StatsPanel    — overview metrics, "scheduled" derived from the store
//! ```
//!
//! Nothing here ever moves a broadcast from `pending` to `sent`; that is the
//! job of an external delivery worker.

pub mod compose;
pub mod dashboard;
pub mod delivery;
pub mod notify;
pub mod registry;
pub mod stats;
pub mod store;

pub use compose::ComposeForm;
pub use dashboard::{Dashboard, SubmitOutcome};
pub use delivery::{DeliveryChannel, TelegramStub};
pub use notify::Confirmation;
pub use registry::GroupRegistry;
pub use stats::{Stat, StatsPanel};
pub use store::BroadcastStore;
