//! TrialPulse digital twin: what-if projections for site recovery.

pub mod analysis;
pub mod capacity;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod metrics;
pub mod projection;
pub mod scenario;
pub mod session;
pub mod snapshot;
pub mod types;
