//! Piecewise-linear interpolation over cycle-indexed lookup tables
//!
//! One routine serves every metric table. The element type is a generic
//! parameter so integer and floating-point tables share the same lookup.

/// A lookup table element that widens losslessly to `f32`
pub trait TableValue: Copy {
    fn to_f32(self) -> f32;
}

impl TableValue for f32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self
    }
}

impl TableValue for u16 {
    #[inline]
    fn to_f32(self) -> f32 {
        f32::from(self)
    }
}

/// Interpolate `table` at `cycle_count`
///
/// The cycle count is clamped to `max_cycles` first. The scan then finds the
/// largest index `i` with `reference[i] <= cycle_count`; a knot hit or the last
/// index returns the tabulated value as-is, otherwise the result lies on the
/// line through `(reference[i], table[i])` and `(reference[i + 1], table[i + 1])`.
///
/// # Arguments
///
/// * `cycle_count` - Current number of charge/discharge cycles
/// * `max_cycles` - Cycle count at which evaluation saturates
/// * `reference` - Strictly increasing cycle checkpoints starting at zero
/// * `table` - Metric values aligned with `reference`
///
/// `reference` and `table` must be non-empty and of equal length. Both are
/// checked once by [`crate::tables::LookupTables::validate`].
pub fn interpolate<T: TableValue>(
    cycle_count: u16,
    max_cycles: u16,
    reference: &[u16],
    table: &[T],
) -> f32 {
    debug_assert!(!reference.is_empty());
    debug_assert_eq!(reference.len(), table.len());

    let cycle_count = cycle_count.min(max_cycles);
    let last = reference.len() - 1;

    let mut index = 0;
    while index < last && reference[index + 1] <= cycle_count {
        index += 1;
    }

    if reference[index] == cycle_count || index == last {
        return table[index].to_f32();
    }

    let x0 = f32::from(reference[index]);
    let x1 = f32::from(reference[index + 1]);
    let y0 = table[index].to_f32();
    let y1 = table[index + 1].to_f32();

    y0 + (y1 - y0) * (f32::from(cycle_count) - x0) / (x1 - x0)
}
