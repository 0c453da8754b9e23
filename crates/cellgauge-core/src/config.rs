//! Battery ratings and configuration validation
//!
//! The ratings are compiled in as [`BatterySpec::DEFAULT`]. A provisioning
//! blob can replace them at startup through [`BatterySpec::from_bytes`]; either
//! way the values are validated once before any model is built, never per call.

use log::error;
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::metrics::Metric;

/// Nominal capacity of a new cell (mAh)
pub const NOMINAL_CAPACITY_MAH: u16 = 3000;

/// Cycle count up to which the cell degrades at its rated pace
pub const RATED_CYCLES: u16 = 500;

/// Cycle count treated as end-of-life
pub const MAX_CYCLES: u16 = 600;

const _: () = assert!(MAX_CYCLES > RATED_CYCLES);
const _: () = assert!(RATED_CYCLES > 0);

/// Fatal configuration errors, raised once at startup
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max cycles ({max}) must exceed rated cycles ({rated})")]
    CycleSpan { rated: u16, max: u16 },
    #[error("rated cycles must be non-zero")]
    ZeroRatedCycles,
    #[error("nominal capacity must be non-zero")]
    ZeroNominalCapacity,
    #[error("{metric} table has {actual} entries, reference has {expected}")]
    TableLength {
        metric: Metric,
        expected: usize,
        actual: usize,
    },
    #[error("reference cycles are not strictly increasing at index {index}")]
    ReferenceOrder { index: usize },
    #[error("reference cycles must start at zero")]
    ReferenceOrigin,
    #[error("last reference point ({last}) does not match max cycles ({max})")]
    ReferenceEnd { last: u16, max: u16 },
    #[error("battery spec could not be decoded")]
    Decode,
}

/// Constants shared by both computation paths
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatterySpec {
    pub nominal_capacity_mah: u16,
    pub rated_cycles: u16,
    pub max_cycles: u16,
}

impl BatterySpec {
    /// The compiled-in cell ratings
    pub const DEFAULT: Self = Self {
        nominal_capacity_mah: NOMINAL_CAPACITY_MAH,
        rated_cycles: RATED_CYCLES,
        max_cycles: MAX_CYCLES,
    };

    /// Check the invariants the analytic formulas divide by.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rated_cycles == 0 {
            error!("Battery spec rejected: rated cycles is zero");
            return Err(ConfigError::ZeroRatedCycles);
        }

        if self.max_cycles <= self.rated_cycles {
            error!(
                "Battery spec rejected: max cycles {} <= rated cycles {}",
                self.max_cycles, self.rated_cycles
            );
            return Err(ConfigError::CycleSpan {
                rated: self.rated_cycles,
                max: self.max_cycles,
            });
        }

        if self.nominal_capacity_mah == 0 {
            error!("Battery spec rejected: nominal capacity is zero");
            return Err(ConfigError::ZeroNominalCapacity);
        }

        Ok(())
    }

    /// Decode a postcard-encoded spec and validate it.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let spec: Self = postcard::from_bytes(bytes).map_err(|e| {
            error!("Battery spec decode failed: {:?}", e);
            ConfigError::Decode
        })?;

        spec.validate()?;
        Ok(spec)
    }

    /// Number of cycles between the rated and end-of-life thresholds.
    ///
    /// Always non-zero for a validated spec.
    pub const fn cycle_span(&self) -> u16 {
        self.max_cycles - self.rated_cycles
    }
}

impl Default for BatterySpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spec_is_valid() {
        assert_eq!(BatterySpec::DEFAULT.validate(), Ok(()));
        assert_eq!(BatterySpec::default(), BatterySpec::DEFAULT);
        assert_eq!(BatterySpec::DEFAULT.cycle_span(), 100);
    }

    #[test]
    fn test_rejects_inverted_cycle_span() {
        let spec = BatterySpec {
            max_cycles: 500,
            ..BatterySpec::DEFAULT
        };

        assert_eq!(
            spec.validate(),
            Err(ConfigError::CycleSpan {
                rated: 500,
                max: 500
            })
        );
    }

    #[test]
    fn test_rejects_zero_rated_cycles() {
        let spec = BatterySpec {
            rated_cycles: 0,
            ..BatterySpec::DEFAULT
        };

        assert_eq!(spec.validate(), Err(ConfigError::ZeroRatedCycles));
    }

    #[test]
    fn test_rejects_zero_nominal_capacity() {
        let spec = BatterySpec {
            nominal_capacity_mah: 0,
            ..BatterySpec::DEFAULT
        };

        assert_eq!(spec.validate(), Err(ConfigError::ZeroNominalCapacity));
    }

    #[test]
    fn test_from_bytes_decodes_and_validates() {
        let custom = BatterySpec {
            nominal_capacity_mah: 2500,
            ..BatterySpec::DEFAULT
        };
        let mut buf = [0u8; 16];
        let bytes = postcard::to_slice(&custom, &mut buf).unwrap();

        assert_eq!(BatterySpec::from_bytes(bytes), Ok(custom));
    }

    #[test]
    fn test_from_bytes_rejects_truncated_blob() {
        assert_eq!(BatterySpec::from_bytes(&[]), Err(ConfigError::Decode));
    }

    #[test]
    fn test_from_bytes_rejects_invalid_spec() {
        let invalid = BatterySpec {
            rated_cycles: 700,
            ..BatterySpec::DEFAULT
        };
        let mut buf = [0u8; 16];
        let bytes = postcard::to_slice(&invalid, &mut buf).unwrap();

        assert_eq!(
            BatterySpec::from_bytes(bytes),
            Err(ConfigError::CycleSpan {
                rated: 700,
                max: 600
            })
        );
    }
}
