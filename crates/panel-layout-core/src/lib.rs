//! Rooftop solar-panel layout engine.
//!
//! Takes a binary roof mask and a catalogue of rectangular panel footprints,
//! erodes the mask by a safety margin, and packs each footprint greedily in
//! both orientations to find the best panel model per roof.

pub mod config;
pub mod geometry;
pub mod grid;
pub mod planner;
pub mod shapes;
pub mod types;

pub use config::{default_catalogue, LayoutConfig};
pub use geometry::ScanStrategy;
pub use grid::{Grid, RawMask};
pub use planner::Planner;
pub use shapes::RoofShape;
pub use types::*;
