//! Session events — the audit trail of a what-if session.
//!
//! RULE: Every state change in a session is recorded as an event.
//! Rejected commands are recorded too, with the state left untouched.

use crate::{
    capacity::CapacityFactor,
    scenario::Scenario,
    types::SessionId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TwinEvent {
    SessionStarted {
        session_id: SessionId,
        scenario:   Scenario,
        capacity:   CapacityFactor,
    },
    ScenarioSelected {
        from: Scenario,
        to:   Scenario,
    },
    CapacityAdjusted {
        from: CapacityFactor,
        to:   CapacityFactor,
    },
    ProjectionComputed {
        scenario:      Scenario,
        capacity:      CapacityFactor,
        final_backlog: u32,
        peak_backlog:  u32,
    },
    SessionReset,
    CommandRejected {
        command: String,
        reason:  String,
    },
}

impl TwinEvent {
    /// Stable name used for the event_type column of the log.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SessionStarted { .. }     => "session_started",
            Self::ScenarioSelected { .. }   => "scenario_selected",
            Self::CapacityAdjusted { .. }   => "capacity_adjusted",
            Self::ProjectionComputed { .. } => "projection_computed",
            Self::SessionReset              => "session_reset",
            Self::CommandRejected { .. }    => "command_rejected",
        }
    }
}

/// One row of the in-memory session log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLogEntry {
    pub seq:         u64,
    pub session_id:  SessionId,
    pub event_type:  String,
    pub payload:     String, // JSON-serialized TwinEvent
    pub recorded_at: DateTime<Utc>,
}
