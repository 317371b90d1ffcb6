use crate::{
    error::{TwinError, TwinResult},
    metrics::{MetricScores, METRIC_CEILING},
    scenario::{Scenario, ScenarioProfile},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
struct ScenarioCatalogFile {
    current_metrics: MetricScores,
    scenarios:       Vec<ScenarioProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwinConfig {
    /// Recovery metric scores before any intervention.
    pub current_metrics: MetricScores,
    pub scenarios:       BTreeMap<Scenario, ScenarioProfile>,
}

impl TwinConfig {
    /// Load from the data/ directory.
    /// In tests, use TwinConfig::builtin().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/scenarios/scenarios.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config = Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario catalog {path}: {e}"))?;
        log::debug!(
            "Loaded {} scenario profiles from {path}",
            config.scenarios.len()
        );
        Ok(config)
    }

    /// Parse and validate a scenario catalog document.
    pub fn from_json(content: &str) -> TwinResult<Self> {
        let file: ScenarioCatalogFile = serde_json::from_str(content)?;
        let mut scenarios = BTreeMap::new();
        for profile in file.scenarios {
            let scenario = profile.scenario;
            if scenarios.insert(scenario, profile).is_some() {
                return Err(TwinError::DuplicateProfile { scenario: scenario.to_string() });
            }
        }
        let config = Self { current_metrics: file.current_metrics, scenarios };
        config.validate()?;
        Ok(config)
    }

    /// Every scenario has a valid profile and current scores are in range.
    pub fn validate(&self) -> TwinResult<()> {
        if let Some((metric, value)) = self.current_metrics.first_out_of_range() {
            return Err(TwinError::InvalidCurrentMetrics {
                reason: format!("{} score {value} exceeds {METRIC_CEILING}", metric.label()),
            });
        }
        for scenario in Scenario::ALL {
            self.profile(scenario)?.validate()?;
        }
        Ok(())
    }

    pub fn profile(&self, scenario: Scenario) -> TwinResult<&ScenarioProfile> {
        self.scenarios
            .get(&scenario)
            .ok_or_else(|| TwinError::MissingProfile { scenario: scenario.to_string() })
    }

    /// The Site 042 intervention catalog.
    pub fn builtin() -> Self {
        let profiles = [
            ScenarioProfile {
                scenario:    Scenario::Baseline,
                label:       "Do Nothing (Baseline)".into(),
                description: "Current trajectory. High risk of DB lock delay.".into(),
                workload:    [100, 120, 150, 180],
                backlog:     [20, 45, 80, 120],
                projected_metrics:  MetricScores::new(30, 20, 55),
                db_lock_delta_days: 45,
                revenue_impact_usd: -2_500_000,
            },
            ScenarioProfile {
                scenario:    Scenario::Reassign,
                label:       "Strategy A: Reassign CRA".into(),
                description: "Deploy resource from Site 008. +20% capacity.".into(),
                workload:    [100, 110, 90, 80],
                backlog:     [20, 25, 15, 5],
                projected_metrics:  MetricScores::new(85, 90, 88),
                db_lock_delta_days: 0,
                revenue_impact_usd: 0,
            },
            ScenarioProfile {
                scenario:    Scenario::Sla,
                label:       "Strategy B: Change SLA".into(),
                description: "Reduce query time 48h -> 24h. High short-term load.".into(),
                workload:    [100, 140, 80, 60],
                backlog:     [20, 10, 5, 0],
                projected_metrics:  MetricScores::new(85, 90, 88),
                db_lock_delta_days: -5,
                revenue_impact_usd: 0,
            },
        ];

        Self {
            current_metrics: MetricScores::new(40, 35, 60),
            scenarios: profiles.into_iter().map(|p| (p.scenario, p)).collect(),
        }
    }
}

impl Default for TwinConfig {
    fn default() -> Self {
        Self::builtin()
    }
}
