//! Numeric type utilities for snapshot calculations
//!
//! Exchange snapshots arrive as floats and the computations on them (VWAP
//! walks, random walks, `tanh`) stay in `f64`. Rounding for output goes
//! through `rust_decimal` so that values like `100.5` round the way a decimal
//! reader expects.

/// Price type of snapshot data
pub type Price = f64;

/// Quantity type of snapshot data
pub type Quantity = f64;

/// Amount type (typically Price * Quantity)
pub type Amount = f64;

/// Precision helpers for common operations
pub mod precision {
    use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
    use rust_decimal::{Decimal, RoundingStrategy};

    /// Price precision (8 decimal places)
    pub const PRICE_PRECISION: u32 = 8;

    /// Percentage precision (4 decimal places)
    pub const PERCENT_PRECISION: u32 = 4;

    /// Plot coordinate precision (1 decimal place)
    pub const COORDINATE_PRECISION: u32 = 1;

    /// Round to `dp` decimal places, half away from zero.
    ///
    /// Values that cannot be represented as a `Decimal` (NaN, infinities,
    /// magnitudes beyond ~7.9e28) are returned unchanged.
    pub fn round_to(value: f64, dp: u32) -> f64 {
        let rounded = Decimal::from_f64(value)
            .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|d| d.to_f64())
            .unwrap_or(value);
        // Collapse -0.0 so it never prints as "-0"
        rounded + 0.0
    }

    /// Round price-like values to standard precision
    pub fn round_price(price: f64) -> f64 {
        round_to(price, PRICE_PRECISION)
    }

    /// Round percentages to standard precision
    pub fn round_percent(pct: f64) -> f64 {
        round_to(pct, PERCENT_PRECISION)
    }

    /// Round plot coordinates
    pub fn round_coordinate(coord: f64) -> f64 {
        round_to(coord, COORDINATE_PRECISION)
    }

}
