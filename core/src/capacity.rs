//! Staffing capacity factor — the one human-adjustable input of the twin.
//!
//! RULE: A CapacityFactor is always within MIN..=MAX.
//! The calculator never re-checks the range; construction does.

use crate::error::{TwinError, TwinResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Staffing level as a percentage of nominal. 100 = fully staffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u16")]
pub struct CapacityFactor(u16);

impl CapacityFactor {
    pub const MIN: u16 = 50;
    pub const MAX: u16 = 150;
    pub const NOMINAL: u16 = 100;

    /// Validate a raw percentage.
    pub fn new(percent: i64) -> TwinResult<Self> {
        if percent < Self::MIN as i64 || percent > Self::MAX as i64 {
            return Err(TwinError::CapacityOutOfRange {
                value: percent,
                min:   Self::MIN,
                max:   Self::MAX,
            });
        }
        Ok(Self(percent as u16))
    }

    /// Clamp a raw percentage into range. For slider-style inputs.
    pub fn saturating(percent: i64) -> Self {
        Self(percent.clamp(Self::MIN as i64, Self::MAX as i64) as u16)
    }

    pub fn nominal() -> Self {
        Self(Self::NOMINAL)
    }

    pub fn percent(self) -> u16 {
        self.0
    }

    /// Backlog multiplier in hundredths: 200 - percent.
    /// 100 = unchanged, 150 = half-staffed, 50 = 150% staffed.
    pub fn backlog_multiplier_pct(self) -> u32 {
        200 - self.0 as u32
    }
}

impl Default for CapacityFactor {
    fn default() -> Self {
        Self::nominal()
    }
}

impl TryFrom<i64> for CapacityFactor {
    type Error = TwinError;

    fn try_from(percent: i64) -> TwinResult<Self> {
        Self::new(percent)
    }
}

impl From<CapacityFactor> for u16 {
    fn from(cf: CapacityFactor) -> u16 {
        cf.0
    }
}

impl fmt::Display for CapacityFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(CapacityFactor::new(50).unwrap().percent(), 50);
        assert_eq!(CapacityFactor::new(150).unwrap().percent(), 150);
        assert!(CapacityFactor::new(49).is_err());
        assert!(CapacityFactor::new(151).is_err());
        assert!(CapacityFactor::new(-100).is_err());
    }

    #[test]
    fn saturating_clamps() {
        assert_eq!(CapacityFactor::saturating(10).percent(), 50);
        assert_eq!(CapacityFactor::saturating(999).percent(), 150);
        assert_eq!(CapacityFactor::saturating(80).percent(), 80);
    }

    #[test]
    fn serde_rejects_out_of_range() {
        let cf: CapacityFactor = serde_json::from_str("75").unwrap();
        assert_eq!(cf.percent(), 75);
        assert_eq!(serde_json::to_string(&cf).unwrap(), "75");
        assert!(serde_json::from_str::<CapacityFactor>("200").is_err());
    }
}
