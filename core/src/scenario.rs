//! Intervention scenarios and their base trajectories.
//!
//! The set of scenarios is closed. Adding one means adding a variant,
//! a profile in `TwinConfig::builtin()` and an entry in the data file.

use crate::{
    error::{TwinError, TwinResult},
    metrics::{MetricScores, METRIC_CEILING},
    types::PROJECTION_POINTS,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Do nothing; current trajectory.
    #[default]
    Baseline,
    /// Reassign a senior CRA from another site.
    Reassign,
    /// Tighten the query-resolution SLA.
    Sla,
}

impl Scenario {
    /// Catalog order. Comparisons and tie-breaks follow it.
    pub const ALL: [Scenario; 3] = [Scenario::Baseline, Scenario::Reassign, Scenario::Sla];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Reassign => "reassign",
            Self::Sla      => "sla",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = TwinError;

    fn from_str(s: &str) -> TwinResult<Self> {
        Scenario::ALL
            .into_iter()
            .find(|sc| sc.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TwinError::UnknownScenario { name: s.to_string() })
    }
}

/// Everything the twin knows about one scenario at nominal staffing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProfile {
    pub scenario:    Scenario,
    pub label:       String,
    pub description: String,
    /// Total workload at each projection day. Capacity never changes it.
    pub workload:    [u32; PROJECTION_POINTS],
    /// Open backlog at each projection day, at 100% capacity.
    pub backlog:     [u32; PROJECTION_POINTS],
    /// Recovery metric scores expected after 90 days, at 100% capacity.
    pub projected_metrics: MetricScores,
    /// Database lock slip in days. Positive = late, negative = early.
    pub db_lock_delta_days: i32,
    /// Revenue effect in USD. Negative = revenue lost.
    pub revenue_impact_usd: i64,
}

impl ScenarioProfile {
    pub fn validate(&self) -> TwinResult<()> {
        if let Some((metric, value)) = self.projected_metrics.first_out_of_range() {
            return Err(TwinError::InvalidProfile {
                scenario: self.scenario.to_string(),
                reason:   format!(
                    "{} base score {value} exceeds {METRIC_CEILING}",
                    metric.label()
                ),
            });
        }
        if self.label.trim().is_empty() {
            return Err(TwinError::InvalidProfile {
                scenario: self.scenario.to_string(),
                reason:   "label is empty".into(),
            });
        }
        Ok(())
    }
}
