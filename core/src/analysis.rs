//! Cross-scenario comparison and capacity sweeps.
//!
//! Both are repeated calls to the projection calculator; neither keeps
//! state between calls.

use crate::{
    capacity::CapacityFactor,
    config::TwinConfig,
    error::{TwinError, TwinResult},
    projection::{project_scenario, Projection},
    scenario::Scenario,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub capacity:    CapacityFactor,
    /// One projection per scenario, in catalog order.
    pub projections: Vec<Projection>,
    /// Lowest +90d backlog. Ties go to the earlier scenario in the catalog.
    pub best:        Scenario,
}

impl ScenarioComparison {
    pub fn get(&self, scenario: Scenario) -> Option<&Projection> {
        self.projections.iter().find(|p| p.scenario == scenario)
    }
}

pub fn compare_scenarios(
    config: &TwinConfig,
    capacity: CapacityFactor,
) -> TwinResult<ScenarioComparison> {
    let projections = Scenario::ALL
        .into_iter()
        .map(|scenario| project_scenario(config, scenario, capacity))
        .collect::<TwinResult<Vec<_>>>()?;

    // min_by_key keeps the first minimum, which is catalog order.
    let best = projections
        .iter()
        .min_by_key(|p| p.final_backlog())
        .map(|p| p.scenario)
        .unwrap_or_default();

    Ok(ScenarioComparison { capacity, projections, best })
}

/// Project one scenario at cf = MIN, MIN+step, ... and always MAX.
pub fn capacity_sweep(
    config: &TwinConfig,
    scenario: Scenario,
    step: u16,
) -> TwinResult<Vec<Projection>> {
    if step == 0 {
        return Err(TwinError::InvalidSweepStep);
    }

    let mut percents: Vec<u16> = (CapacityFactor::MIN..=CapacityFactor::MAX)
        .step_by(step as usize)
        .collect();
    if percents.last() != Some(&CapacityFactor::MAX) {
        percents.push(CapacityFactor::MAX);
    }

    percents
        .into_iter()
        .map(|pct| {
            let capacity = CapacityFactor::new(pct as i64)?;
            project_scenario(config, scenario, capacity)
        })
        .collect()
}
