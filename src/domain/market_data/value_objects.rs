use derive_more::{Constructor, Deref, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter};

/// Value Object - price of a level or trade
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - resting or traded quantity
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor, Serialize, Deserialize)]
pub struct Quantity(f64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0.0);

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Book side of a depth level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

/// One price level of the order book: `{rate, qty, orders}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthLevel {
    pub rate: Price,
    pub qty: Quantity,
    pub orders: u32,
}

impl DepthLevel {
    pub fn new(rate: f64, qty: f64, orders: u32) -> Self {
        Self {
            rate: Price::from(rate),
            qty: Quantity::from(qty),
            orders,
        }
    }
}

/// Session statistics carried alongside the depth; optional in the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteStats {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub avg_price: f64,
    pub price_change_amt: f64,
    pub price_change_pct: f64,
    pub last_traded_ts: f64,
}
