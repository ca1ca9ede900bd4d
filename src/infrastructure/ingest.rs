//! Wire format of snapshots pushed by the host.
//!
//! Numeric fields accept JSON numbers or numeric strings; blank strings and
//! `null` read as zero.

use crate::domain::errors::{AppError, ValidationResult};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{DepthLevel, MarketDepth, Price, Quantity, QuoteStats, Snapshot};
use crate::log_warn;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

fn numeric<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Option::<Numeric>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Numeric::Number(value)) => Ok(value),
        Some(Numeric::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(0.0)
            } else {
                text.parse::<f64>().map_err(D::Error::custom)
            }
        }
    }
}

fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = numeric(deserializer)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value as u32)
    } else {
        Err(D::Error::custom(format!("invalid order count {value}")))
    }
}

/// DTO for one `{rate, qty, orders}` level
#[derive(Debug, Clone, Deserialize)]
pub struct DepthLevelDto {
    #[serde(deserialize_with = "numeric")]
    pub rate: f64,
    #[serde(deserialize_with = "numeric")]
    pub qty: f64,
    #[serde(default, deserialize_with = "count")]
    pub orders: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketDepthDto {
    #[serde(deserialize_with = "numeric")]
    pub last_traded_price: f64,
    #[serde(default, deserialize_with = "numeric")]
    pub last_traded_qty: f64,
    #[serde(default, deserialize_with = "numeric")]
    pub buy_order_volume: f64,
    #[serde(default, deserialize_with = "numeric")]
    pub sell_order_volume: f64,
    #[serde(default)]
    pub buys: Vec<DepthLevelDto>,
    #[serde(default)]
    pub sells: Vec<DepthLevelDto>,
    #[serde(default, deserialize_with = "numeric")]
    pub open: f64,
    #[serde(default, deserialize_with = "numeric")]
    pub high: f64,
    #[serde(default, deserialize_with = "numeric")]
    pub low: f64,
    #[serde(default, deserialize_with = "numeric")]
    pub close: f64,
    #[serde(default, deserialize_with = "numeric")]
    pub volume: f64,
    #[serde(default, deserialize_with = "numeric")]
    pub avg_price: f64,
    #[serde(default, deserialize_with = "numeric")]
    pub price_change_amt: f64,
    #[serde(default, deserialize_with = "numeric")]
    pub price_change_pct: f64,
    #[serde(default, rename = "lastTradedTS", deserialize_with = "numeric")]
    pub last_traded_ts: f64,
}

/// DTO for one snapshot as pushed through `setData` / `addData`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDto {
    pub ts: String,
    pub market_depth: MarketDepthDto,
    #[serde(default, rename = "tradingsymbol")]
    pub trading_symbol: Option<String>,
    /// Carried by the feed but not rendered.
    #[serde(default)]
    pub pending_orders: serde_json::Value,
}

impl DepthLevelDto {
    fn to_domain(&self) -> DepthLevel {
        DepthLevel::new(self.rate, self.qty, self.orders)
    }
}

impl SnapshotDto {
    /// Converts the DTO into a domain snapshot
    pub fn to_domain_snapshot(&self) -> Snapshot {
        let depth = &self.market_depth;
        Snapshot {
            ts: self.ts.clone(),
            trading_symbol: self.trading_symbol.clone(),
            market_depth: MarketDepth {
                last_traded_price: Price::from(depth.last_traded_price),
                last_traded_qty: Quantity::from(depth.last_traded_qty),
                buy_order_volume: Quantity::from(depth.buy_order_volume),
                sell_order_volume: Quantity::from(depth.sell_order_volume),
                buys: depth.buys.iter().map(DepthLevelDto::to_domain).collect(),
                sells: depth.sells.iter().map(DepthLevelDto::to_domain).collect(),
                quote: QuoteStats {
                    open: depth.open,
                    high: depth.high,
                    low: depth.low,
                    close: depth.close,
                    volume: depth.volume,
                    avg_price: depth.avg_price,
                    price_change_amt: depth.price_change_amt,
                    price_change_pct: depth.price_change_pct,
                    last_traded_ts: depth.last_traded_ts,
                },
            },
        }
    }
}

/// Parse one snapshot object.
pub fn parse_snapshot(json: &str) -> ValidationResult<Snapshot> {
    let dto: SnapshotDto = serde_json::from_str(json)?;
    Ok(dto.to_domain_snapshot())
}

/// Parse an array of snapshots. Elements that do not decode are skipped
/// with a warning; a payload that is not an array is an error.
pub fn parse_snapshots(json: &str) -> ValidationResult<Vec<Snapshot>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let total = values.len();
    let snapshots: Vec<Snapshot> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<SnapshotDto>(value) {
            Ok(dto) => Some(dto.to_domain_snapshot()),
            Err(e) => {
                log_warn!(
                    LogComponent::Infrastructure("Ingest"),
                    "skipping snapshot {}: {}",
                    index,
                    e
                );
                None
            }
        })
        .collect();

    if total > 0 && snapshots.is_empty() {
        return Err(AppError::ValidationError(format!(
            "none of {total} snapshots could be decoded"
        )));
    }
    Ok(snapshots)
}
