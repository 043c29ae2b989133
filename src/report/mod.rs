//! Report rendering.
//!
//! Text and JSON renderings of the order aggregates, with labels per locale.

pub mod generator;
pub mod labels;

pub use generator::*;
pub use labels::Labels;
