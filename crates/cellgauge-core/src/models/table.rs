//! Table-driven computation path

use crate::config::{BatterySpec, ConfigError};
use crate::interpolation::{TableValue, interpolate};
use crate::tables::{DEFAULT_TABLES, LookupTables};

use super::HealthModel;

/// Health metrics interpolated from the reference lookup tables
#[derive(Debug, Clone, Copy)]
pub struct TableModel {
    spec: BatterySpec,
    tables: &'static LookupTables,
}

impl TableModel {
    /// Build a table model over the compiled-in tables.
    pub fn new(spec: BatterySpec) -> Result<Self, ConfigError> {
        Self::with_tables(spec, &DEFAULT_TABLES)
    }

    /// Build a table model over `tables`, validating their alignment once.
    pub fn with_tables(
        spec: BatterySpec,
        tables: &'static LookupTables,
    ) -> Result<Self, ConfigError> {
        spec.validate()?;
        tables.validate(&spec)?;
        Ok(Self { spec, tables })
    }

    pub fn spec(&self) -> &BatterySpec {
        &self.spec
    }

    pub fn tables(&self) -> &'static LookupTables {
        self.tables
    }

    fn lookup<T: TableValue>(&self, cycle_count: u16, table: &[T]) -> f32 {
        interpolate(
            cycle_count,
            self.spec.max_cycles,
            self.tables.reference,
            table,
        )
    }
}

impl HealthModel for TableModel {
    fn health(&self, cycle_count: u16) -> f32 {
        self.lookup(cycle_count, self.tables.health)
    }

    fn capacity_retention(&self, cycle_count: u16) -> f32 {
        self.lookup(cycle_count, self.tables.capacity_retention)
    }

    fn power_capability(&self, cycle_count: u16) -> f32 {
        self.lookup(cycle_count, self.tables.power_capability)
    }

    fn estimated_capacity(&self, cycle_count: u16) -> u16 {
        self.lookup(cycle_count, self.tables.estimated_capacity) as u16
    }

    fn self_discharge_rate(&self, cycle_count: u16) -> f32 {
        self.lookup(cycle_count, self.tables.self_discharge)
    }
}
