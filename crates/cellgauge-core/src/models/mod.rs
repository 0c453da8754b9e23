mod analytic;
mod table;

pub use analytic::AnalyticModel;
pub use table::TableModel;

use crate::metrics::Metric;
use crate::report::HealthReport;

/// A computation path mapping a cycle count to the five health metrics.
///
/// Implemented by the table-driven [`TableModel`] and the formula-driven
/// [`AnalyticModel`]. Every method is total over `u16` and free of side
/// effects, so models can be shared across threads without locking.
pub trait HealthModel {
    /// Overall battery health (%)
    fn health(&self, cycle_count: u16) -> f32;

    /// Capacity retention (%)
    fn capacity_retention(&self, cycle_count: u16) -> f32;

    /// Power capability (%)
    fn power_capability(&self, cycle_count: u16) -> f32;

    /// Estimated actual capacity (mAh), truncated toward zero
    fn estimated_capacity(&self, cycle_count: u16) -> u16;

    /// Self-discharge rate (%/month)
    fn self_discharge_rate(&self, cycle_count: u16) -> f32;

    /// Evaluate a single metric as `f32`
    fn value(&self, metric: Metric, cycle_count: u16) -> f32 {
        match metric {
            Metric::Health => self.health(cycle_count),
            Metric::CapacityRetention => self.capacity_retention(cycle_count),
            Metric::PowerCapability => self.power_capability(cycle_count),
            Metric::EstimatedCapacity => f32::from(self.estimated_capacity(cycle_count)),
            Metric::SelfDischargeRate => self.self_discharge_rate(cycle_count),
        }
    }

    /// Evaluate all five metrics at `cycle_count`
    fn report(&self, cycle_count: u16) -> HealthReport {
        HealthReport {
            cycle_count,
            health: self.health(cycle_count),
            capacity_retention: self.capacity_retention(cycle_count),
            power_capability: self.power_capability(cycle_count),
            estimated_capacity_mah: self.estimated_capacity(cycle_count),
            self_discharge_rate: self.self_discharge_rate(cycle_count),
        }
    }
}
