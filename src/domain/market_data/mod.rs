//! Market data aggregate: snapshots, the series that owns them, and the
//! analysis helpers the chart derives its scales from.

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use services::*;
pub use value_objects::*;
