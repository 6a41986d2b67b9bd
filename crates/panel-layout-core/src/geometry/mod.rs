//! Pixel-grid primitives of the layout engine.
//!
//! Everything here is a pure function over an immutable [`Grid`](crate::grid::Grid);
//! callers own any scratch state.

mod erode;
mod estimate;
mod pack;
mod scan;
mod units;

pub use erode::erode;
pub use estimate::estimate_by_area;
pub use pack::pack;
pub use scan::{scan, scan_naive, scan_with, ScanStrategy, SummedAreaTable};
pub(crate) use units::check_gsd;
pub use units::{gsd_from_known_length, gsd_from_roof_area, pixel_area_m2, pixels_from_meters};
