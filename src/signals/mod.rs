//! Confluence pipeline: level extraction, grouping, scoring and signal synthesis.

pub mod decision;
pub mod engine;
pub mod grouping;
pub mod levels;
pub mod scoring;

pub use decision::*;
pub use engine::*;
pub use grouping::*;
pub use levels::*;
pub use scoring::*;
