//! Chart aggregate: viewport, scales, animation and interaction state.

pub mod animation;
pub mod entities;
pub mod interaction;
pub mod options;
pub mod scales;
pub mod value_objects;
pub mod viewport;

pub use animation::*;
pub use entities::*;
pub use interaction::*;
pub use options::*;
pub use scales::*;
pub use value_objects::*;
pub use viewport::*;
