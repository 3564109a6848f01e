//! Seeded xorshift32 generator for sparkline noise
//!
//! Not a statistical RNG. It exists so the same snapshot draws the same curve
//! for a whole UTC day.

/// Seconds per day bucket
const SECONDS_PER_DAY: i64 = 86_400;

/// xorshift32 state, passed by value through the generation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the state and return it
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Advance the state and map it into [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32() & 0x7FFF_FFFF) / 2_147_483_648.0
    }

    /// Advance the state and map it into [-1, 1)
    pub fn next_signed(&mut self) -> f64 {
        (self.next_f64() - 0.5) * 2.0
    }
}

/// Seed for a symbol on a given day and trend bucket.
///
/// CRC-32 of the concatenation `symbol + day_bucket + round(change_pct_24h)`,
/// with rounding half away from zero.
pub fn compute_seed(symbol: &str, day_bucket: i64, change_pct_24h: f64) -> u32 {
    let trend_bucket = change_pct_24h.round() as i64;
    let key = format!("{}{}{}", symbol, day_bucket, trend_bucket);
    crc32fast::hash(key.as_bytes())
}

/// Unix day index for the current time
pub fn current_day_bucket() -> i64 {
    chrono::Utc::now().timestamp().div_euclid(SECONDS_PER_DAY)
}
