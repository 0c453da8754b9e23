//! Fuel gauge combining both computation paths
//!
//! The telemetry loop asks the gauge for a [`HealthReport`] once per interval.
//! Which path answers is chosen per metric by a [`PathSelection`]; both paths
//! can also be evaluated side by side to check that they agree.

use heapless::Vec;
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::{BatterySpec, ConfigError};
use crate::metrics::{METRIC_COUNT, Metric};
use crate::models::{AnalyticModel, HealthModel, TableModel};
use crate::report::HealthReport;
use crate::tables::{DEFAULT_TABLES, LookupTables};

/// Relative divergence the two paths are expected to stay within (5 %)
pub const DEFAULT_AGREEMENT_TOLERANCE: f32 = 0.05;

/// Which computation path answers for a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModelPath {
    /// Interpolate the reference lookup tables
    #[default]
    Table,
    /// Evaluate the closed-form formulas
    Analytic,
}

/// One [`ModelPath`] per metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSelection {
    paths: [ModelPath; METRIC_COUNT],
}

impl PathSelection {
    /// Every metric from the lookup tables
    pub const TABLE: Self = Self::uniform(ModelPath::Table);

    /// Every metric from the formulas
    pub const ANALYTIC: Self = Self::uniform(ModelPath::Analytic);

    pub const fn uniform(path: ModelPath) -> Self {
        Self {
            paths: [path; METRIC_COUNT],
        }
    }

    /// Route `metric` through `path`.
    pub const fn with(mut self, metric: Metric, path: ModelPath) -> Self {
        self.paths[metric.index()] = path;
        self
    }

    pub const fn path(&self, metric: Metric) -> ModelPath {
        self.paths[metric.index()]
    }
}

impl Default for PathSelection {
    fn default() -> Self {
        Self::TABLE
    }
}

/// Both paths' value for one metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricDivergence {
    pub metric: Metric,
    pub table: f32,
    pub analytic: f32,
}

impl MetricDivergence {
    pub fn absolute(&self) -> f32 {
        let diff = self.table - self.analytic;
        diff.max(-diff)
    }

    /// Divergence relative to the analytic value
    pub fn relative(&self) -> f32 {
        let base = self.analytic.max(-self.analytic);
        if base > 0.0 {
            self.absolute() / base
        } else {
            self.absolute()
        }
    }
}

/// Side-by-side evaluation of both paths at one cycle count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathComparison {
    pub cycle_count: u16,
    pub divergences: [MetricDivergence; METRIC_COUNT],
}

impl PathComparison {
    pub fn divergence(&self, metric: Metric) -> &MetricDivergence {
        &self.divergences[metric.index()]
    }

    /// Metrics whose relative divergence exceeds `tolerance`
    pub fn exceeding(&self, tolerance: f32) -> Vec<Metric, METRIC_COUNT> {
        let mut metrics = Vec::new();
        for divergence in self.divergences.iter() {
            if divergence.relative() > tolerance {
                // Capacity equals the number of metrics, so this cannot fail.
                let _ = metrics.push(divergence.metric);
            }
        }
        metrics
    }

    pub fn agrees_within(&self, tolerance: f32) -> bool {
        self.exceeding(tolerance).is_empty()
    }

    /// The metric on which the paths disagree most
    pub fn worst(&self) -> MetricDivergence {
        self.divergences
            .iter()
            .copied()
            .fold(self.divergences[0], |worst, d| {
                if d.relative() > worst.relative() {
                    d
                } else {
                    worst
                }
            })
    }
}

/// Battery fuel gauge holding both computation paths
#[derive(Debug, Clone, Copy)]
pub struct FuelGauge {
    table: TableModel,
    analytic: AnalyticModel,
    selection: PathSelection,
}

impl FuelGauge {
    /// Build a gauge over the compiled-in tables, reading every metric from them.
    pub fn new(spec: BatterySpec) -> Result<Self, ConfigError> {
        Self::with_tables(spec, &DEFAULT_TABLES)
    }

    /// Build a gauge over `tables`. Configuration is validated here, once.
    pub fn with_tables(
        spec: BatterySpec,
        tables: &'static LookupTables,
    ) -> Result<Self, ConfigError> {
        let table = TableModel::with_tables(spec, tables)?;
        let analytic = AnalyticModel::new(spec)?;

        info!(
            "Fuel gauge ready: {} mAh nominal, rated {} cycles, end-of-life {} cycles, {} reference points",
            spec.nominal_capacity_mah,
            spec.rated_cycles,
            spec.max_cycles,
            tables.reference.len()
        );

        Ok(Self {
            table,
            analytic,
            selection: PathSelection::default(),
        })
    }

    pub fn with_selection(mut self, selection: PathSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn set_selection(&mut self, selection: PathSelection) {
        self.selection = selection;
    }

    pub fn selection(&self) -> PathSelection {
        self.selection
    }

    pub fn spec(&self) -> &BatterySpec {
        self.table.spec()
    }

    pub fn table_model(&self) -> &TableModel {
        &self.table
    }

    pub fn analytic_model(&self) -> &AnalyticModel {
        &self.analytic
    }

    fn model_for(&self, metric: Metric) -> &dyn HealthModel {
        match self.selection.path(metric) {
            ModelPath::Table => &self.table,
            ModelPath::Analytic => &self.analytic,
        }
    }

    /// Evaluate every metric through its selected path.
    pub fn report(&self, cycle_count: u16) -> HealthReport {
        HealthReport {
            cycle_count,
            health: self.model_for(Metric::Health).health(cycle_count),
            capacity_retention: self
                .model_for(Metric::CapacityRetention)
                .capacity_retention(cycle_count),
            power_capability: self
                .model_for(Metric::PowerCapability)
                .power_capability(cycle_count),
            estimated_capacity_mah: self
                .model_for(Metric::EstimatedCapacity)
                .estimated_capacity(cycle_count),
            self_discharge_rate: self
                .model_for(Metric::SelfDischargeRate)
                .self_discharge_rate(cycle_count),
        }
    }

    /// Evaluate both paths for every metric.
    pub fn compare(&self, cycle_count: u16) -> PathComparison {
        let divergences = Metric::ALL.map(|metric| MetricDivergence {
            metric,
            table: self.table.value(metric, cycle_count),
            analytic: self.analytic.value(metric, cycle_count),
        });

        PathComparison {
            cycle_count,
            divergences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::REFERENCE_CYCLES;

    fn gauge() -> FuelGauge {
        FuelGauge::new(BatterySpec::DEFAULT).unwrap()
    }

    #[test]
    fn test_default_selection_reads_tables() {
        let gauge = gauge();

        assert_eq!(gauge.selection(), PathSelection::TABLE);
        assert_eq!(gauge.report(300), gauge.table_model().report(300));
        assert_eq!(gauge.report(300).health, 82.9);
    }

    #[test]
    fn test_analytic_selection_reads_formulas() {
        let gauge = gauge().with_selection(PathSelection::ANALYTIC);

        assert_eq!(gauge.report(450), gauge.analytic_model().report(450));
    }

    #[test]
    fn test_mixed_selection_routes_per_metric() {
        let selection = PathSelection::TABLE
            .with(Metric::Health, ModelPath::Analytic)
            .with(Metric::EstimatedCapacity, ModelPath::Analytic);
        let gauge = gauge().with_selection(selection);
        let report = gauge.report(600);

        assert_eq!(selection.path(Metric::Health), ModelPath::Analytic);
        assert_eq!(selection.path(Metric::PowerCapability), ModelPath::Table);

        assert_eq!(report.health, 10.0);
        assert_eq!(report.estimated_capacity_mah, 900);
        assert_eq!(report.capacity_retention, 30.1);
        assert_eq!(report.self_discharge_rate, 6.43);
    }

    #[test]
    fn test_paths_agree_at_every_knot() {
        let gauge = gauge();

        for &cycles in REFERENCE_CYCLES.iter() {
            let comparison = gauge.compare(cycles);
            assert!(
                comparison.agrees_within(DEFAULT_AGREEMENT_TOLERANCE),
                "paths diverge at {}: {:?}",
                cycles,
                comparison.worst()
            );
        }
    }

    #[test]
    fn test_paths_agree_between_knots_except_rated_kink() {
        let gauge = gauge();

        // The formula bends at 500 cycles while the 480..510 table segment is
        // straight, so health drifts just past tolerance right around the kink.
        for cycles in 0..=600 {
            let exceeding = gauge.compare(cycles).exceeding(DEFAULT_AGREEMENT_TOLERANCE);
            if (498..=501).contains(&cycles) {
                assert_eq!(exceeding.as_slice(), &[Metric::Health], "at {}", cycles);
            } else {
                assert!(exceeding.is_empty(), "paths diverge at {}: {:?}", cycles, exceeding);
            }
        }
    }

    #[test]
    fn test_unclamped_self_discharge_diverges_past_max() {
        let comparison = gauge().compare(750);

        assert_eq!(
            comparison.exceeding(DEFAULT_AGREEMENT_TOLERANCE).as_slice(),
            &[Metric::SelfDischargeRate]
        );
        assert_eq!(comparison.worst().metric, Metric::SelfDischargeRate);
    }

    #[test]
    fn test_divergence_measures() {
        let divergence = MetricDivergence {
            metric: Metric::Health,
            table: 63.3,
            analytic: 64.0,
        };

        assert!((divergence.absolute() - 0.7).abs() < 1e-4);
        assert!((divergence.relative() - 0.7 / 64.0).abs() < 1e-5);
    }

    #[test]
    fn test_tight_tolerance_flags_noisy_metrics() {
        // Table 2.16 vs formula 2.069 at 120 cycles
        let comparison = gauge().compare(120);

        assert!(comparison.exceeding(0.01).contains(&Metric::SelfDischargeRate));
        assert!(!comparison.agrees_within(0.01));
    }

    #[test]
    fn test_rejects_invalid_spec() {
        let spec = BatterySpec {
            rated_cycles: 0,
            ..BatterySpec::DEFAULT
        };

        assert_eq!(FuelGauge::new(spec).unwrap_err(), ConfigError::ZeroRatedCycles);
    }
}
