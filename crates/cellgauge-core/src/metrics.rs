//! Battery health metrics
//!
//! Names the five aging metrics both computation paths produce, with the
//! labels and units used when reporting them.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Number of derived health metrics
pub const METRIC_COUNT: usize = 5;

/// A derived battery aging metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// Weighted indicator of overall battery condition (%)
    Health,
    /// Share of the original capacity that remains (%)
    CapacityRetention,
    /// Ability to deliver peak power (%)
    PowerCapability,
    /// Actual capacity (mAh)
    EstimatedCapacity,
    /// Charge lost per month while idle (%/month)
    SelfDischargeRate,
}

impl Metric {
    /// All metrics, in reporting order
    pub const ALL: [Self; METRIC_COUNT] = [
        Self::Health,
        Self::CapacityRetention,
        Self::PowerCapability,
        Self::EstimatedCapacity,
        Self::SelfDischargeRate,
    ];

    /// Position of this metric in [`Metric::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::Health => 0,
            Self::CapacityRetention => 1,
            Self::PowerCapability => 2,
            Self::EstimatedCapacity => 3,
            Self::SelfDischargeRate => 4,
        }
    }

    /// Get the display label for this metric
    pub const fn label(self) -> &'static str {
        match self {
            Self::Health => "Health",
            Self::CapacityRetention => "Capacity retention",
            Self::PowerCapability => "Power capability",
            Self::EstimatedCapacity => "Estimated capacity",
            Self::SelfDischargeRate => "Self-discharge",
        }
    }

    /// Get the unit this metric is expressed in
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Health | Self::CapacityRetention | Self::PowerCapability => "%",
            Self::EstimatedCapacity => "mAh",
            Self::SelfDischargeRate => "%/month",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_position_in_all() {
        for (position, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(metric.index(), position);
        }
    }

    #[test]
    fn test_units() {
        assert_eq!(Metric::Health.unit(), "%");
        assert_eq!(Metric::EstimatedCapacity.unit(), "mAh");
        assert_eq!(Metric::SelfDischargeRate.unit(), "%/month");
    }
}
