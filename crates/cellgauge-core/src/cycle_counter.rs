//! Volatile charge/discharge cycle counter

use log::debug;

/// Cycle count the emulated cell starts from after boot
pub const INITIAL_CYCLE_COUNT: u16 = 300;

/// Number of completed charge/discharge cycles.
///
/// Held in RAM only: the count restarts from its initial value on every boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleCounter {
    count: u16,
}

impl CycleCounter {
    pub const fn new(initial: u16) -> Self {
        Self { count: initial }
    }

    pub const fn count(&self) -> u16 {
        self.count
    }

    /// Record one completed discharge, returning the new count.
    pub fn complete_cycle(&mut self) -> u16 {
        self.count = self.count.saturating_add(1);
        debug!("Discharge complete, cycle count now {}", self.count);
        self.count
    }

    /// The count as the table path sees it, saturated at `max_cycles`
    pub fn evaluation_count(&self, max_cycles: u16) -> u16 {
        self.count.min(max_cycles)
    }
}

impl Default for CycleCounter {
    fn default() -> Self {
        Self::new(INITIAL_CYCLE_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_initial_count() {
        assert_eq!(CycleCounter::default().count(), 300);
        assert_eq!(CycleCounter::new(0).count(), 0);
    }

    #[test]
    fn test_complete_cycle_increments() {
        let mut counter = CycleCounter::new(599);

        assert_eq!(counter.complete_cycle(), 600);
        assert_eq!(counter.complete_cycle(), 601);
        assert_eq!(counter.count(), 601);
    }

    #[test]
    fn test_complete_cycle_saturates() {
        let mut counter = CycleCounter::new(u16::MAX);

        assert_eq!(counter.complete_cycle(), u16::MAX);
    }

    #[test]
    fn test_evaluation_count_clamps() {
        assert_eq!(CycleCounter::new(750).evaluation_count(600), 600);
        assert_eq!(CycleCounter::new(450).evaluation_count(600), 450);
    }
}
