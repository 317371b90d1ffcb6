//! Site recovery metrics shown beside the backlog projection.

use crate::capacity::CapacityFactor;
use serde::{Deserialize, Serialize};

/// Metric scores are percentages; nothing above this is ever reported.
pub const METRIC_CEILING: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryMetric {
    VisitCompletion,
    QueryResolution,
    DataConformance,
}

impl RecoveryMetric {
    pub const ALL: [RecoveryMetric; 3] = [
        RecoveryMetric::VisitCompletion,
        RecoveryMetric::QueryResolution,
        RecoveryMetric::DataConformance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::VisitCompletion => "Visit Comp",
            Self::QueryResolution => "Query Res",
            Self::DataConformance => "Data Conf",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricScores {
    pub visit_completion: u32,
    pub query_resolution: u32,
    pub data_conformance: u32,
}

impl MetricScores {
    pub fn new(visit_completion: u32, query_resolution: u32, data_conformance: u32) -> Self {
        Self { visit_completion, query_resolution, data_conformance }
    }

    pub fn get(&self, metric: RecoveryMetric) -> u32 {
        match metric {
            RecoveryMetric::VisitCompletion => self.visit_completion,
            RecoveryMetric::QueryResolution => self.query_resolution,
            RecoveryMetric::DataConformance => self.data_conformance,
        }
    }

    /// Scale every score by the capacity factor, rounded half-up, capped at 100.
    pub fn scaled(&self, capacity: CapacityFactor) -> Self {
        Self {
            visit_completion: scale_metric(self.visit_completion, capacity),
            query_resolution: scale_metric(self.query_resolution, capacity),
            data_conformance: scale_metric(self.data_conformance, capacity),
        }
    }

    /// First metric whose score exceeds the ceiling, if any.
    pub fn first_out_of_range(&self) -> Option<(RecoveryMetric, u32)> {
        RecoveryMetric::ALL
            .into_iter()
            .map(|m| (m, self.get(m)))
            .find(|(_, v)| *v > METRIC_CEILING)
    }
}

/// round(base × cf / 100), capped at 100.
pub fn scale_metric(base: u32, capacity: CapacityFactor) -> u32 {
    let scaled = (base as u64 * capacity.percent() as u64 + 50) / 100;
    scaled.min(METRIC_CEILING as u64) as u32
}

/// One bar of the before/after chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryMetricRow {
    pub metric:    RecoveryMetric,
    pub label:     String,
    pub current:   u32,
    pub projected: u32,
}

impl RecoveryMetricRow {
    pub fn improvement(&self) -> i64 {
        self.projected as i64 - self.current as i64
    }
}

/// Pair current scores with projected scores in display order.
pub fn metric_rows(current: &MetricScores, projected: &MetricScores) -> Vec<RecoveryMetricRow> {
    RecoveryMetric::ALL
        .into_iter()
        .map(|metric| RecoveryMetricRow {
            metric,
            label:     metric.label().to_string(),
            current:   current.get(metric),
            projected: projected.get(metric),
        })
        .collect()
}
