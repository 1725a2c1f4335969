//! Static regulatory lookup tables
//!
//! Exact-key tables are `Lazy` maps; range tables are ordered slices of
//! [`RangeRow`]s searched front to back.

pub mod envelope;
pub mod hvac;
pub mod lighting;

/// One row of a range table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeRow<T> {
    pub low: f64,
    pub high: f64,
    pub value: T,
}

impl<T> RangeRow<T> {
    pub const fn new(low: f64, high: f64, value: T) -> Self {
        Self { low, high, value }
    }

    /// `low < x < high`
    pub fn contains_open(&self, x: f64) -> bool {
        self.low < x && x < self.high
    }

    /// `low <= x < high`
    pub fn contains_half_open(&self, x: f64) -> bool {
        self.low <= x && x < self.high
    }
}

/// First row whose open interval strictly contains `x`. A value sitting on
/// a breakpoint matches no row.
pub fn find_open<T>(rows: &[RangeRow<T>], x: f64) -> Option<&T> {
    rows.iter().find(|r| r.contains_open(x)).map(|r| &r.value)
}

/// First row whose half-open interval `[low, high)` contains `x`
pub fn find_half_open<T>(rows: &[RangeRow<T>], x: f64) -> Option<&T> {
    rows.iter().find(|r| r.contains_half_open(x)).map(|r| &r.value)
}

/// Value at the smallest breakpoint that is `>= x`
pub fn smallest_at_least<T>(breakpoints: &[(f64, T)], x: f64) -> Option<&T> {
    breakpoints
        .iter()
        .filter(|(bp, _)| *bp >= x)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS: [RangeRow<&str>; 2] = [RangeRow::new(0.0, 10.0, "low"), RangeRow::new(10.0, 20.0, "high")];

    #[test]
    fn test_open_interval_excludes_breakpoints() {
        assert_eq!(find_open(&ROWS, 5.0), Some(&"low"));
        assert_eq!(find_open(&ROWS, 15.0), Some(&"high"));
        assert_eq!(find_open(&ROWS, 10.0), None);
        assert_eq!(find_open(&ROWS, 0.0), None);
    }

    #[test]
    fn test_half_open_interval() {
        assert_eq!(find_half_open(&ROWS, 0.0), Some(&"low"));
        assert_eq!(find_half_open(&ROWS, 10.0), Some(&"high"));
        assert_eq!(find_half_open(&ROWS, 20.0), None);
    }

    #[test]
    fn test_smallest_at_least() {
        let breakpoints = [(1.0, 'a'), (5.0, 'b'), (10.0, 'c')];
        assert_eq!(smallest_at_least(&breakpoints, 0.5), Some(&'a'));
        assert_eq!(smallest_at_least(&breakpoints, 5.0), Some(&'b'));
        assert_eq!(smallest_at_least(&breakpoints, 5.1), Some(&'c'));
        assert_eq!(smallest_at_least(&breakpoints, 11.0), None);
    }
}
