//! Closed-form computation path
//!
//! Each metric degrades linearly up to the rated cycle count and on a steeper
//! line between the rated and end-of-life thresholds, held at a floor beyond.
//! The cycle count itself is never clamped, so the steep line keeps
//! extrapolating past max cycles until the floor catches it.

use crate::config::{BatterySpec, ConfigError};

use super::HealthModel;

/// Value of every degradation curve at zero cycles
const FULL: f32 = 100.0;

/// Self-discharge of a new cell (%/month)
const BASE_SELF_DISCHARGE: f32 = 2.0;

/// Cap on the cycle contribution to self-discharge, as a multiple of rated life
const MAX_SELF_DISCHARGE_CYCLE_FACTOR: f32 = 1.5;

/// Weight of the cycle-driven term in power capability
const POWER_CYCLE_WEIGHT: f32 = 0.7;

/// Weight of the capacity-driven term in power capability
const POWER_CAPACITY_WEIGHT: f32 = 0.3;

/// A two-regime degradation curve
struct Degradation {
    /// Points lost between zero and rated cycles
    rated_drop: f32,
    /// Points lost between rated and max cycles
    beyond_drop: f32,
    /// Lowest value past rated life
    floor: f32,
}

const HEALTH: Degradation = Degradation {
    rated_drop: 30.0,
    beyond_drop: 60.0,
    floor: 10.0,
};

const CAPACITY_RETENTION: Degradation = Degradation {
    rated_drop: 20.0,
    beyond_drop: 50.0,
    floor: 30.0,
};

const POWER_CYCLE_FACTOR: Degradation = Degradation {
    rated_drop: 15.0,
    beyond_drop: 45.0,
    floor: 40.0,
};

/// Health metrics computed from closed-form formulas
#[derive(Debug, Clone, Copy)]
pub struct AnalyticModel {
    spec: BatterySpec,
}

impl AnalyticModel {
    /// Build an analytic model, validating the cycle span once.
    pub fn new(spec: BatterySpec) -> Result<Self, ConfigError> {
        spec.validate()?;
        Ok(Self { spec })
    }

    pub fn spec(&self) -> &BatterySpec {
        &self.spec
    }

    fn degrade(&self, cycle_count: u16, curve: &Degradation) -> f32 {
        let rated = self.spec.rated_cycles;

        if cycle_count <= rated {
            FULL - (f32::from(cycle_count) / f32::from(rated)) * curve.rated_drop
        } else {
            let excess = f32::from(cycle_count - rated);
            let span = f32::from(self.spec.cycle_span());
            let at_rated = FULL - curve.rated_drop;

            (at_rated - (excess / span) * curve.beyond_drop).max(curve.floor)
        }
    }
}

impl HealthModel for AnalyticModel {
    fn health(&self, cycle_count: u16) -> f32 {
        self.degrade(cycle_count, &HEALTH)
    }

    fn capacity_retention(&self, cycle_count: u16) -> f32 {
        self.degrade(cycle_count, &CAPACITY_RETENTION)
    }

    fn power_capability(&self, cycle_count: u16) -> f32 {
        let cycle_factor = self.degrade(cycle_count, &POWER_CYCLE_FACTOR);
        let capacity_factor = 50.0 + self.capacity_retention(cycle_count) * 0.5;

        POWER_CYCLE_WEIGHT * cycle_factor + POWER_CAPACITY_WEIGHT * capacity_factor
    }

    fn estimated_capacity(&self, cycle_count: u16) -> u16 {
        let retention = self.capacity_retention(cycle_count);
        ((retention / 100.0) * f32::from(self.spec.nominal_capacity_mah)) as u16
    }

    fn self_discharge_rate(&self, cycle_count: u16) -> f32 {
        let health_factor = (100.0 - self.health(cycle_count)) / 100.0;
        let cycle_factor = (f32::from(cycle_count) / f32::from(self.spec.rated_cycles))
            .min(MAX_SELF_DISCHARGE_CYCLE_FACTOR);

        BASE_SELF_DISCHARGE * (1.0 + 2.0 * health_factor * cycle_factor)
    }
}
