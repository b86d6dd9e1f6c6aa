//! Numerical primitives shared by the bound engine.

pub mod math;

pub use math::holder::*;
pub use math::stable::*;
