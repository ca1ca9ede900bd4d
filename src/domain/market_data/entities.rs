use super::value_objects::{DepthLevel, Price, Quantity, QuoteStats, Side};
use serde::{Deserialize, Serialize};

/// Order-book depth at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDepth {
    pub last_traded_price: Price,
    pub last_traded_qty: Quantity,
    pub buy_order_volume: Quantity,
    pub sell_order_volume: Quantity,
    pub buys: Vec<DepthLevel>,
    pub sells: Vec<DepthLevel>,
    pub quote: QuoteStats,
}

impl MarketDepth {
    pub fn levels(&self, side: Side) -> &[DepthLevel] {
        match side {
            Side::Buy => &self.buys,
            Side::Sell => &self.sells,
        }
    }

    /// Every level of both sides, buys first.
    pub fn all_levels(&self) -> impl Iterator<Item = (Side, &DepthLevel)> {
        self.buys
            .iter()
            .map(|level| (Side::Buy, level))
            .chain(self.sells.iter().map(|level| (Side::Sell, level)))
    }
}

/// Domain entity - one timestamped depth record. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Display timestamp, typically `HH:mm:ss`.
    pub ts: String,
    pub market_depth: MarketDepth,
    pub trading_symbol: Option<String>,
}

impl Snapshot {
    pub fn new(ts: impl Into<String>, market_depth: MarketDepth) -> Self {
        Self {
            ts: ts.into(),
            market_depth,
            trading_symbol: None,
        }
    }

    /// Largest resting quantity on either side; 1 when the book is empty or all zero.
    pub fn max_volume(&self) -> f64 {
        let max = self
            .market_depth
            .all_levels()
            .map(|(_, level)| level.qty.value())
            .fold(0.0_f64, f64::max);
        if max > 0.0 { max } else { 1.0 }
    }

    /// Every price this snapshot contributes to the price axis.
    pub fn price_points(&self) -> impl Iterator<Item = f64> + '_ {
        self.market_depth
            .all_levels()
            .map(|(_, level)| level.rate.value())
            .chain(std::iter::once(self.market_depth.last_traded_price.value()))
    }
}

/// Domain entity - the append-only, time-ordered snapshot series.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSeries {
    snapshots: Vec<Snapshot>,
}

impl SnapshotSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole series. Empty input is ignored and reported as `false`.
    pub fn replace(&mut self, snapshots: Vec<Snapshot>) -> bool {
        if snapshots.is_empty() {
            return false;
        }
        self.snapshots = snapshots;
        true
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// `series[position .. position + length)`, truncated to the stored data.
    pub fn window(&self, position: usize, length: usize) -> &[Snapshot] {
        let start = position.min(self.snapshots.len());
        let end = position.saturating_add(length).min(self.snapshots.len());
        &self.snapshots[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(buys: Vec<DepthLevel>, sells: Vec<DepthLevel>, ltp: f64) -> MarketDepth {
        MarketDepth {
            last_traded_price: Price::from(ltp),
            last_traded_qty: Quantity::from(1.0),
            buy_order_volume: Quantity::from(10.0),
            sell_order_volume: Quantity::from(5.0),
            buys,
            sells,
            quote: QuoteStats::default(),
        }
    }

    #[test]
    fn max_volume_spans_both_sides() {
        let snapshot = Snapshot::new(
            "09:15:00",
            depth(
                vec![DepthLevel::new(100.0, 5.0, 1)],
                vec![DepthLevel::new(102.0, 10.0, 2)],
                101.0,
            ),
        );
        assert_eq!(snapshot.max_volume(), 10.0);
    }

    #[test]
    fn max_volume_of_empty_book_is_one() {
        let snapshot = Snapshot::new("09:15:00", depth(vec![], vec![], 101.0));
        assert_eq!(snapshot.max_volume(), 1.0);
    }

    #[test]
    fn price_points_include_last_traded_price() {
        let snapshot = Snapshot::new(
            "09:15:00",
            depth(vec![DepthLevel::new(100.0, 5.0, 1)], vec![], 101.0),
        );
        assert_eq!(snapshot.price_points().collect::<Vec<_>>(), vec![100.0, 101.0]);
    }

    #[test]
    fn replace_ignores_empty_input() {
        let mut series = SnapshotSeries::new();
        series.push(Snapshot::new("09:15:00", depth(vec![], vec![], 1.0)));
        assert!(!series.replace(Vec::new()));
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn window_is_truncated_to_available_data() {
        let mut series = SnapshotSeries::new();
        for i in 0..5 {
            series.push(Snapshot::new(format!("t{i}"), depth(vec![], vec![], 1.0)));
        }
        assert_eq!(series.window(3, 40).len(), 2);
        assert!(series.window(9, 3).is_empty());
    }
}
