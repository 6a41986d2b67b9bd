use serde::{Deserialize, Serialize};

/// Panel footprint - a named rectangular panel from the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelFootprint {
    pub name: String,
    /// Physical length in meters (maps to pixel height when laid as given)
    pub length_m: f64,
    /// Physical width in meters
    pub width_m: f64,
}

impl PanelFootprint {
    pub fn new(name: impl Into<String>, length_m: f64, width_m: f64) -> Self {
        Self {
            name: name.into(),
            length_m,
            width_m,
        }
    }

    /// Physical panel area in square meters, without spacing.
    pub fn area_m2(&self) -> f64 {
        self.length_m * self.width_m
    }
}

/// Orientation of a footprint on the pixel grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Length runs along the rows (pixel height), width along the columns
    AsGiven,
    /// Footprint turned by 90 degrees
    Rotated90,
}

impl Orientation {
    /// Maps (length, width) to (height, width) for this orientation.
    pub fn apply<T>(self, length: T, width: T) -> (T, T) {
        match self {
            Orientation::AsGiven => (length, width),
            Orientation::Rotated90 => (width, length),
        }
    }
}

/// Top-left grid position of a rectangle that fits entirely inside the mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Anchor {
    // Field order gives row-major ordering under the derived Ord
    pub y: usize,
    pub x: usize,
}

impl Anchor {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Placement of a panel in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Placement {
    /// Returns true when the two rectangles share at least one pixel.
    pub fn overlaps(&self, other: &Placement) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Greedy layout of one footprint in one orientation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub footprint_name: String,
    pub orientation: Orientation,
    pub placements: Vec<Placement>,
    pub count: usize,
}

impl LayoutResult {
    pub fn new(
        footprint_name: impl Into<String>,
        orientation: Orientation,
        placements: Vec<Placement>,
    ) -> Self {
        let count = placements.len();
        Self {
            footprint_name: footprint_name.into(),
            orientation,
            placements,
            count,
        }
    }
}

/// Pixel size of a footprint (spacing included) as laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub height: usize,
    pub width: usize,
}

/// Everything computed for one catalogue entry on one roof
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintReport {
    /// Layout of the winning orientation
    pub layout: LayoutResult,
    /// Pixel size of the footprint in the winning orientation
    pub pixel_size: PixelSize,
    pub as_given_count: usize,
    pub rotated_count: usize,
    /// Usable area divided by panel area, rounded down
    pub area_estimate: u64,
}

/// Per-roof result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofSummary {
    pub roof_area_m2: f64,
    pub usable_area_m2: f64,
    /// Safety margin applied, in pixels
    pub margin_px: usize,
    /// One report per catalogue entry, in catalogue order
    pub footprints: Vec<FootprintReport>,
    /// Footprint with the highest count (first in catalogue order on ties)
    pub best_footprint: Option<String>,
    pub max_count: usize,
    pub total_capacity_kw: f64,
}

impl RoofSummary {
    /// Report of the recommended footprint, if the catalogue was non-empty.
    pub fn best(&self) -> Option<&FootprintReport> {
        let name = self.best_footprint.as_deref()?;
        self.footprints
            .iter()
            .find(|report| report.layout.footprint_name == name)
    }
}

/// Outcome of planning a single roof inside a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RoofOutcome {
    Planned(RoofSummary),
    Failed { reason: String },
}

impl RoofOutcome {
    pub fn summary(&self) -> Option<&RoofSummary> {
        match self {
            RoofOutcome::Planned(summary) => Some(summary),
            RoofOutcome::Failed { .. } => None,
        }
    }

    pub fn is_planned(&self) -> bool {
        matches!(self, RoofOutcome::Planned(_))
    }
}

/// Roof entry of a batch, in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofReport {
    pub roof_index: usize,
    pub outcome: RoofOutcome,
}

/// Totals over the successfully planned roofs of a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchTotals {
    pub roofs_planned: usize,
    pub roofs_failed: usize,
    pub total_panels: usize,
    pub total_capacity_kw: f64,
    pub total_roof_area_m2: f64,
    pub total_usable_area_m2: f64,
}

/// Output of a batch request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub roofs: Vec<RoofReport>,
    pub totals: BatchTotals,
}

/// Error type for layout planning
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid mask: {0}")]
    InvalidMask(String),

    #[error("Roof mask has no occupied cells")]
    EmptyMask,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
