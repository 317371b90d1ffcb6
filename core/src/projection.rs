//! The projection calculator.
//!
//! Maps (scenario, capacity factor) to a four-point workload/backlog
//! series and three recovery metric scores.
//!
//! RULES:
//!   - Workload is scenario-fixed; capacity never changes it.
//!   - backlog = round(base × (1 + (100 − cf)/100)), floored at 0.
//!   - metric  = round(base × cf/100), capped at 100.
//!   - Rounding is half-up. All arithmetic is integer.
//!   - Pure: same inputs, same projection. Nothing is stored.

use crate::{
    capacity::CapacityFactor,
    config::TwinConfig,
    error::TwinResult,
    metrics::{metric_rows, MetricScores, RecoveryMetricRow},
    scenario::{Scenario, ScenarioProfile},
    types::{day_label, DayOffset, PROJECTION_DAYS},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub day:      DayOffset,
    pub label:    String,
    pub workload: u32,
    pub backlog:  u32,
}

/// When the trial database is expected to lock, relative to plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "days", rename_all = "snake_case")]
pub enum DbLockOutlook {
    Late(u32),
    OnTime,
    Early(u32),
}

impl DbLockOutlook {
    pub fn from_delta_days(delta: i32) -> Self {
        match delta {
            d if d > 0 => Self::Late(d.unsigned_abs()),
            d if d < 0 => Self::Early(d.unsigned_abs()),
            _ => Self::OnTime,
        }
    }
}

impl fmt::Display for DbLockOutlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Late(d)  => write!(f, "+{d} Days"),
            Self::OnTime   => f.write_str("On Time"),
            Self::Early(d) => write!(f, "-{d} Days"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub scenario:           Scenario,
    pub capacity:           CapacityFactor,
    pub points:             Vec<ProjectionPoint>,
    pub projected_metrics:  MetricScores,
    pub metrics:            Vec<RecoveryMetricRow>,
    pub db_lock:            DbLockOutlook,
    pub revenue_impact_usd: i64,
}

impl Projection {
    pub fn backlog_series(&self) -> Vec<u32> {
        self.points.iter().map(|p| p.backlog).collect()
    }

    pub fn workload_series(&self) -> Vec<u32> {
        self.points.iter().map(|p| p.workload).collect()
    }

    /// Backlog at +90d.
    pub fn final_backlog(&self) -> u32 {
        self.points.last().map(|p| p.backlog).unwrap_or(0)
    }

    pub fn peak_backlog(&self) -> u32 {
        self.points.iter().map(|p| p.backlog).max().unwrap_or(0)
    }

    /// "-$2.5M Revenue" for losses, "Savings Secured" otherwise.
    pub fn financial_impact_label(&self) -> String {
        if self.revenue_impact_usd < 0 {
            let millions = self.revenue_impact_usd.unsigned_abs() as f64 / 1_000_000.0;
            format!("-${millions:.1}M Revenue")
        } else {
            "Savings Secured".to_string()
        }
    }
}

/// round(base × (200 − cf) / 100). Never negative since cf ≤ 150.
/// Saturates at u32::MAX for absurdly large catalog values.
pub fn project_backlog(base: u32, capacity: CapacityFactor) -> u32 {
    let scaled = (base as u64 * capacity.backlog_multiplier_pct() as u64 + 50) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Project one scenario profile at the given capacity.
pub fn project(
    profile: &ScenarioProfile,
    current: &MetricScores,
    capacity: CapacityFactor,
) -> Projection {
    let points = PROJECTION_DAYS
        .iter()
        .zip(profile.workload.iter().zip(profile.backlog.iter()))
        .map(|(&day, (&workload, &backlog))| ProjectionPoint {
            day,
            label: day_label(day),
            workload,
            backlog: project_backlog(backlog, capacity),
        })
        .collect();

    let projected_metrics = profile.projected_metrics.scaled(capacity);

    Projection {
        scenario: profile.scenario,
        capacity,
        points,
        projected_metrics,
        metrics: metric_rows(current, &projected_metrics),
        db_lock: DbLockOutlook::from_delta_days(profile.db_lock_delta_days),
        revenue_impact_usd: profile.revenue_impact_usd,
    }
}

/// Look up the scenario in the config and project it.
pub fn project_scenario(
    config: &TwinConfig,
    scenario: Scenario,
    capacity: CapacityFactor,
) -> TwinResult<Projection> {
    let profile = config.profile(scenario)?;
    Ok(project(profile, &config.current_metrics, capacity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backlog_rounds_half_up() {
        // 5 × 1.5 = 7.5 → 8
        assert_eq!(project_backlog(5, CapacityFactor::new(50).unwrap()), 8);
        // 15 × 0.5 = 7.5 → 8
        assert_eq!(project_backlog(15, CapacityFactor::new(150).unwrap()), 8);
        assert_eq!(project_backlog(0, CapacityFactor::new(50).unwrap()), 0);
    }

    #[test]
    fn backlog_saturates_instead_of_overflowing() {
        let short = CapacityFactor::new(50).unwrap();
        assert_eq!(project_backlog(30_000_000, short), 45_000_000);
        assert_eq!(project_backlog(u32::MAX, short), u32::MAX);
        assert_eq!(project_backlog(u32::MAX, CapacityFactor::new(150).unwrap()), u32::MAX / 2 + 1);
    }

    #[test]
    fn outlook_display() {
        assert_eq!(DbLockOutlook::from_delta_days(45).to_string(), "+45 Days");
        assert_eq!(DbLockOutlook::from_delta_days(0).to_string(), "On Time");
        assert_eq!(DbLockOutlook::from_delta_days(-5).to_string(), "-5 Days");
    }
}
