use serde::{Deserialize, Serialize};
use crate::scenario::Scenario;

/// All commands a what-if session accepts.
/// Variants are append-only; the tag names are part of the IPC format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum TwinCommand {
    SelectScenario { scenario: Scenario },
    /// Raw percentage; validated when applied.
    SetCapacity { percent: i64 },
    /// Back to baseline at nominal capacity.
    Reset,
}

impl TwinCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectScenario { .. } => "select_scenario",
            Self::SetCapacity { .. }    => "set_capacity",
            Self::Reset                 => "reset",
        }
    }
}
