//! Domain layer: order-book snapshots, chart state and the pure computations
//! that derive windows, scales and animation frames from them.

pub mod chart;
pub mod errors;
pub mod logging;
pub mod market_data;
