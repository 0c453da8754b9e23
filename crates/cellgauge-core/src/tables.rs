//! Reference lookup tables for the battery aging model
//!
//! Every metric table is aligned one-to-one with [`REFERENCE_CYCLES`]. The
//! values are illustrative placeholders and are not physically derived.

use log::error;

use crate::config::{BatterySpec, ConfigError};
use crate::metrics::Metric;

/// Number of data points in every lookup table
pub const TABLE_SIZE: usize = 21;

/// Cycle count checkpoints (0 to 600 cycles in steps of 30)
pub static REFERENCE_CYCLES: [u16; TABLE_SIZE] = [
    0, 30, 60, 90, 120, 150, 180, 210, 240, 270, 300, 330, 360, 390, 420, 450, 480, 510, 540, 570,
    600,
];

/// Overall battery health (%)
pub static HEALTH_TABLE: [f32; TABLE_SIZE] = [
    100.6, 97.7, 96.4, 95.9, 93.2, 89.3, 89.7, 86.4, 87.0, 82.7, 82.9, 80.6, 79.1, 77.1, 73.5, 74.3,
    71.4, 63.3, 46.9, 27.7, 10.0,
];

/// Capacity retention (%)
pub static CAPACITY_RETENTION_TABLE: [f32; TABLE_SIZE] = [
    100.4, 99.8, 96.2, 96.1, 94.9, 92.1, 92.4, 91.5, 89.4, 88.2, 88.2, 87.6, 86.4, 83.3, 82.0, 80.6,
    79.9, 75.3, 59.2, 44.9, 30.1,
];

/// Power capability (%)
pub static POWER_CAPABILITY_TABLE: [f32; TABLE_SIZE] = [
    100.5, 97.7, 96.5, 97.7, 95.2, 94.3, 94.9, 96.1, 94.1, 92.8, 90.3, 91.9, 90.6, 90.3, 89.5, 88.9,
    87.2, 81.6, 70.9, 59.5, 46.7,
];

/// Estimated capacity (mAh)
pub static ESTIMATED_CAPACITY_TABLE: [u16; TABLE_SIZE] = [
    3012, 2994, 2886, 2883, 2847, 2763, 2772, 2745, 2682, 2646, 2646, 2628, 2592, 2499, 2460, 2418,
    2397, 2259, 1776, 1347, 903,
];

/// Self-discharge rate (%/month)
pub static SELF_DISCHARGE_TABLE: [f32; TABLE_SIZE] = [
    2.01, 2.04, 2.00, 2.10, 2.16, 2.13, 2.21, 2.31, 2.31, 2.28, 2.37, 2.59, 2.52, 2.68, 2.92, 2.89,
    3.12, 3.42, 4.38, 5.42, 6.43,
];

/// The reference sequence together with one table per metric.
///
/// Held as slices so a provisioning error (mismatched lengths) is caught by
/// [`LookupTables::validate`] rather than at the first out-of-bounds read.
#[derive(Debug, Clone, Copy)]
pub struct LookupTables {
    pub reference: &'static [u16],
    pub health: &'static [f32],
    pub capacity_retention: &'static [f32],
    pub power_capability: &'static [f32],
    pub estimated_capacity: &'static [u16],
    pub self_discharge: &'static [f32],
}

/// The compiled-in tables
pub static DEFAULT_TABLES: LookupTables = LookupTables {
    reference: &REFERENCE_CYCLES,
    health: &HEALTH_TABLE,
    capacity_retention: &CAPACITY_RETENTION_TABLE,
    power_capability: &POWER_CAPABILITY_TABLE,
    estimated_capacity: &ESTIMATED_CAPACITY_TABLE,
    self_discharge: &SELF_DISCHARGE_TABLE,
};

impl LookupTables {
    /// Length of the metric table backing `metric`
    pub fn table_len(&self, metric: Metric) -> usize {
        match metric {
            Metric::Health => self.health.len(),
            Metric::CapacityRetention => self.capacity_retention.len(),
            Metric::PowerCapability => self.power_capability.len(),
            Metric::EstimatedCapacity => self.estimated_capacity.len(),
            Metric::SelfDischargeRate => self.self_discharge.len(),
        }
    }

    /// Check the reference sequence and table alignment against `spec`.
    pub fn validate(&self, spec: &BatterySpec) -> Result<(), ConfigError> {
        let Some((&first, &last)) = self.reference.first().zip(self.reference.last()) else {
            error!("Lookup tables rejected: empty reference sequence");
            return Err(ConfigError::ReferenceOrigin);
        };

        if first != 0 {
            error!("Lookup tables rejected: reference starts at {}", first);
            return Err(ConfigError::ReferenceOrigin);
        }

        if let Some(index) = self
            .reference
            .windows(2)
            .position(|pair| pair[1] <= pair[0])
        {
            error!(
                "Lookup tables rejected: reference not increasing at index {}",
                index + 1
            );
            return Err(ConfigError::ReferenceOrder { index: index + 1 });
        }

        if last != spec.max_cycles {
            error!(
                "Lookup tables rejected: last reference {} != max cycles {}",
                last, spec.max_cycles
            );
            return Err(ConfigError::ReferenceEnd {
                last,
                max: spec.max_cycles,
            });
        }

        let expected = self.reference.len();
        for metric in Metric::ALL {
            let actual = self.table_len(metric);
            if actual != expected {
                error!(
                    "Lookup tables rejected: {} table has {} entries, expected {}",
                    metric, actual, expected
                );
                return Err(ConfigError::TableLength {
                    metric,
                    expected,
                    actual,
                });
            }
        }

        Ok(())
    }
}
