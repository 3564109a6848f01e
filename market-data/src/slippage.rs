//! Order book slippage calculation
//!
//! Walks a best-first ladder greedily until the target amount is filled and
//! reports the volume-weighted average price against the best price.

use common::decimal::precision::{round_percent, round_price};
use common::decimal::Quantity;

use crate::models::{PriceLevel, SlippageResult};

/// Estimate execution of `target_amount` base units against `levels`.
///
/// `levels` must be sorted best-first (asks ascending, bids descending); the
/// walk trusts that order. An empty ladder or a non-positive amount yields
/// [`SlippageResult::zero`]. When the ladder runs out before the target is
/// reached, the result describes the partial fill, so `depth_used` may be
/// smaller than `target_amount`.
pub fn calculate_slippage(levels: &[PriceLevel], target_amount: Quantity) -> SlippageResult {
    // Written as a negated `>` so NaN amounts also land here
    if levels.is_empty() || !(target_amount > 0.0) {
        return SlippageResult::zero();
    }

    let best_price = levels[0].price;
    let mut remaining = target_amount;
    let mut total_cost = 0.0;
    let mut depth_used = 0.0;

    for level in levels {
        if remaining <= 0.0 {
            break;
        }

        let fill = remaining.min(level.size);
        total_cost += fill * level.price;
        depth_used += fill;
        remaining -= fill;
    }

    let filled = target_amount - remaining;
    let avg_price = if filled > 0.0 { total_cost / filled } else { 0.0 };
    let slippage_pct = if best_price > 0.0 {
        (avg_price - best_price).abs() / best_price * 100.0
    } else {
        0.0
    };

    SlippageResult {
        avg_price: round_price(avg_price),
        best_price: round_price(best_price),
        slippage_pct: round_percent(slippage_pct),
        depth_used: round_price(depth_used),
        total_cost: round_price(total_cost),
    }
}
