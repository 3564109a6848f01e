//! Synthetic sparkline generation
//!
//! Exchanges only publish 24h summary figures for a ticker, so the history
//! drawn behind a ticker card is synthesised: a seeded random walk run
//! backward from the last price, biased by the 24h trend and scaled by the
//! 24h range. The same symbol, day and rounded change always produce the
//! same curve.

pub mod render;
pub mod rng;

use crate::models::{MarketSnapshot, PlotPoints, SparkSeries, TrendDirection, ViewBox};
use rng::{compute_seed, current_day_bucket, Xorshift32};

/// Default number of sparkline points
pub const DEFAULT_COUNT: usize = 40;

/// Noise amplitude as fraction of price range
const NOISE_SCALE: f64 = 0.012;

/// Drift amplitude as fraction of price range
const DRIFT_SCALE: f64 = 0.005;

/// Maximum step as fraction of price range
const MAX_STEP_SCALE: f64 = 0.05;

/// Smallest range, as a fraction of the last price
const MIN_RANGE_FRACTION: f64 = 0.001;

/// Floor keeping every generated price positive
const PRICE_FLOOR: f64 = 1e-9;

/// Sparkline generator with its output defaults
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparklineGenerator {
    /// Points per series
    pub count: usize,
    /// Plot area for projections
    pub view_box: ViewBox,
}

impl Default for SparklineGenerator {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            view_box: ViewBox::default(),
        }
    }
}

impl SparklineGenerator {
    /// Create a generator with the given defaults
    pub fn new(count: usize, view_box: ViewBox) -> Self {
        Self { count, view_box }
    }

    /// Generate `count` prices ending at `last_price`, seeded with today's date.
    ///
    /// Returns an empty series when `last_price <= 0` or `count < 2`.
    pub fn generate_prices(
        &self,
        last_price: f64,
        high_24h: f64,
        low_24h: f64,
        change_pct_24h: f64,
        symbol: &str,
        count: usize,
    ) -> SparkSeries {
        let snapshot = MarketSnapshot {
            symbol: symbol.to_string(),
            last_price,
            high_24h,
            low_24h,
            change_pct_24h,
        };
        self.generate_prices_on_day(&snapshot, count, current_day_bucket())
    }

    /// Generate a series for `snapshot` with the generator's default count
    pub fn generate_for_snapshot(&self, snapshot: &MarketSnapshot) -> SparkSeries {
        self.generate_prices_on_day(snapshot, self.count, current_day_bucket())
    }

    /// Generate a series seeded for an explicit Unix day index
    pub fn generate_prices_on_day(
        &self,
        snapshot: &MarketSnapshot,
        count: usize,
        day_bucket: i64,
    ) -> SparkSeries {
        let last_price = snapshot.last_price;
        // Negated so NaN prices are rejected too
        if !(last_price > 0.0) || !last_price.is_finite() || count < 2 {
            return Vec::new();
        }

        // A missing bound collapses the range onto the last price
        let bound = |value: f64| if value.is_finite() { value } else { last_price };
        let (mut low, mut high) = (bound(snapshot.low_24h), bound(snapshot.high_24h));
        if high < low {
            std::mem::swap(&mut low, &mut high);
        }
        let change_pct_24h = if snapshot.change_pct_24h.is_finite() {
            snapshot.change_pct_24h
        } else {
            0.0
        };

        let price_range = (high - low).max(last_price * MIN_RANGE_FRACTION);
        let trend = (change_pct_24h / 10.0).tanh();
        let noise_scale = price_range * NOISE_SCALE;
        let drift = -trend * price_range * DRIFT_SCALE;
        let max_step = price_range * MAX_STEP_SCALE;

        let seed = compute_seed(&snapshot.symbol, day_bucket, change_pct_24h);
        let mut rng = Xorshift32::new(seed);

        let mut prices = vec![0.0; count];
        prices[count - 1] = last_price;
        let mut price = last_price;

        // Walk backward so the series always ends on the real last price
        for slot in prices[..count - 1].iter_mut().rev() {
            let noise = rng.next_signed() * noise_scale;
            let step = (drift + noise).clamp(-max_step, max_step);
            price = (price + step).max(PRICE_FLOOR);
            *slot = price;
        }

        tracing::trace!(symbol = %snapshot.symbol, seed, count, "generated sparkline");
        prices
    }

    /// Project prices onto the generator's view box
    pub fn render_svg_points(&self, prices: &[f64]) -> PlotPoints {
        render::render_svg_points(prices, self.view_box)
    }

    /// Classify a 24h change; zero counts as positive
    pub fn get_trend_direction(&self, change_pct_24h: f64) -> TrendDirection {
        trend_direction(change_pct_24h)
    }
}

/// Classify a 24h change; zero counts as positive
pub fn trend_direction(change_pct_24h: f64) -> TrendDirection {
    if change_pct_24h >= 0.0 {
        TrendDirection::Positive
    } else {
        TrendDirection::Negative
    }
}
