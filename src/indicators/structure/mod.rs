//! Market structure: local extrema, support/resistance, Fibonacci retracements

pub mod extrema;
pub mod fibonacci;
pub mod support_resistance;

pub use extrema::*;
pub use fibonacci::*;
pub use support_resistance::*;
