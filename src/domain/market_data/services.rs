use crate::domain::errors::{AppError, ValidationResult};
use crate::domain::market_data::{Side, Snapshot};
use ordered_float::OrderedFloat;
use std::collections::BTreeSet;

/// Derived figures over a window of snapshots.
pub struct DepthAnalysis;

impl DepthAnalysis {
    /// Sorted, de-duplicated prices appearing as a buy rate, a sell rate or a
    /// last-traded price anywhere in `window`.
    pub fn distinct_prices(window: &[Snapshot]) -> Vec<f64> {
        window
            .iter()
            .flat_map(Snapshot::price_points)
            .map(OrderedFloat)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(OrderedFloat::into_inner)
            .collect()
    }

    /// Largest last-traded quantity in `window`; 1 when nothing traded.
    pub fn max_traded_volume(window: &[Snapshot]) -> f64 {
        let max = window
            .iter()
            .map(|s| s.market_depth.last_traded_qty.value())
            .fold(0.0_f64, f64::max);
        if max > 0.0 { max } else { 1.0 }
    }

    /// Buy/sell order-volume ratio over the trailing `seconds` snapshots of
    /// `window` (one snapshot per second). The divisor never drops below 1.
    pub fn buy_sell_ratio(window: &[Snapshot], seconds: usize) -> Option<f64> {
        if window.is_empty() {
            return None;
        }
        let take = seconds.clamp(1, window.len());
        let (buy, sell) = window[window.len() - take..]
            .iter()
            .fold((0.0, 0.0), |(buy, sell), s| {
                (
                    buy + s.market_depth.buy_order_volume.value(),
                    sell + s.market_depth.sell_order_volume.value(),
                )
            });
        Some(buy / sell.max(1.0))
    }
}

/// Ingestion checks applied before a snapshot enters the series.
pub struct SnapshotValidator;

impl SnapshotValidator {
    pub fn validate(snapshot: &Snapshot) -> ValidationResult<()> {
        let depth = &snapshot.market_depth;

        if !depth.last_traded_price.value().is_finite() {
            return Err(AppError::ValidationError(format!(
                "{}: last traded price is not finite",
                snapshot.ts
            )));
        }

        for (field, value) in [
            ("last traded quantity", depth.last_traded_qty.value()),
            ("buy order volume", depth.buy_order_volume.value()),
            ("sell order volume", depth.sell_order_volume.value()),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::ValidationError(format!(
                    "{}: invalid {} {}",
                    snapshot.ts, field, value
                )));
            }
        }

        for side in [Side::Buy, Side::Sell] {
            let mut seen = BTreeSet::new();
            for level in depth.levels(side) {
                let rate = level.rate.value();
                let qty = level.qty.value();
                if !rate.is_finite() || !qty.is_finite() {
                    return Err(AppError::ValidationError(format!(
                        "{}: {} level has a non-finite value",
                        snapshot.ts, side
                    )));
                }
                if qty < 0.0 {
                    return Err(AppError::ValidationError(format!(
                        "{}: {} level {} has negative quantity",
                        snapshot.ts, side, rate
                    )));
                }
                if !seen.insert(OrderedFloat(rate)) {
                    return Err(AppError::ValidationError(format!(
                        "{}: duplicate {} rate {}",
                        snapshot.ts, side, rate
                    )));
                }
            }
        }

        Ok(())
    }
}
