//! Snapshot of all health metrics at one cycle count

use serde::{Deserialize, Serialize};

use crate::metrics::Metric;

/// The five health metrics evaluated at a single cycle count.
///
/// Serializable so the push transport can forward it as-is. The postcard
/// encoding is bounded by [`HealthReport::MAX_ENCODED_SIZE`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct HealthReport {
    pub cycle_count: u16,
    /// Overall health (%)
    pub health: f32,
    /// Capacity retention (%)
    pub capacity_retention: f32,
    /// Power capability (%)
    pub power_capability: f32,
    /// Estimated capacity (mAh)
    pub estimated_capacity_mah: u16,
    /// Self-discharge rate (%/month)
    pub self_discharge_rate: f32,
}

impl HealthReport {
    /// Worst-case postcard size: two varint `u16` (3 bytes each) and four `f32`
    pub const MAX_ENCODED_SIZE: usize = 2 * 3 + 4 * 4;

    /// Get a single metric as `f32`
    pub fn value(&self, metric: Metric) -> f32 {
        match metric {
            Metric::Health => self.health,
            Metric::CapacityRetention => self.capacity_retention,
            Metric::PowerCapability => self.power_capability,
            Metric::EstimatedCapacity => f32::from(self.estimated_capacity_mah),
            Metric::SelfDischargeRate => self.self_discharge_rate,
        }
    }

    /// Encode into `buf` with postcard, returning the used prefix.
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> postcard::Result<&'a mut [u8]> {
        postcard::to_slice(self, buf)
    }

    pub fn decode(bytes: &[u8]) -> postcard::Result<Self> {
        postcard::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HealthReport {
        HealthReport {
            cycle_count: u16::MAX,
            health: 82.9,
            capacity_retention: 88.2,
            power_capability: 90.3,
            estimated_capacity_mah: u16::MAX,
            self_discharge_rate: 2.37,
        }
    }

    #[test]
    fn test_value_selects_field() {
        let report = sample();

        assert_eq!(report.value(Metric::Health), 82.9);
        assert_eq!(report.value(Metric::PowerCapability), 90.3);
        assert_eq!(report.value(Metric::EstimatedCapacity), 65535.0);
    }

    #[test]
    fn test_worst_case_fits_encoded_size() {
        let report = sample();
        let mut buf = [0u8; HealthReport::MAX_ENCODED_SIZE];

        let encoded = report.encode(&mut buf).unwrap();
        assert_eq!(encoded.len(), HealthReport::MAX_ENCODED_SIZE);
        assert_eq!(HealthReport::decode(encoded).unwrap(), report);
    }

    #[test]
    fn test_encode_rejects_short_buffer() {
        let mut buf = [0u8; 4];
        assert!(sample().encode(&mut buf).is_err());
    }
}
