//! Session snapshot — the full view state of a what-if session.
//!
//! This is what a UI renders: the active selection and the projection
//! derived from it. It is never persisted.

use crate::{
    capacity::CapacityFactor,
    projection::Projection,
    scenario::Scenario,
    types::SessionId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwinSnapshot {
    pub session_id:     SessionId,
    pub scenario:       Scenario,
    pub scenario_label: String,
    pub capacity:       CapacityFactor,
    pub projection:     Projection,
    pub events_logged:  u64,
}
