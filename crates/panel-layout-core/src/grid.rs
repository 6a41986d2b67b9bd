use crate::types::{LayoutError, Result};
use serde::{Deserialize, Serialize};

/// Raster values above this are treated as roof.
pub const OCCUPIED_THRESHOLD: u8 = 127;

/// 8-bit raster as delivered by the roof-mask producer (0 = background, 255 = roof)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMask {
    pub width: usize,
    pub height: usize,
    /// Row-major pixel values, `width * height` entries
    pub data: Vec<u8>,
}

/// Binary occupancy grid, row-major with the origin at the top-left.
///
/// `true` marks an occupied (roof) cell. Dimensions are always non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Builds a grid from a row-major cell buffer.
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LayoutError::InvalidMask(format!(
                "Grid dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        let expected = cell_count(width, height)?;
        if cells.len() != expected {
            return Err(LayoutError::InvalidMask(format!(
                "Expected {} cells for a {}x{} grid, got {}",
                expected,
                width,
                height,
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Grid with every cell set to `occupied`.
    pub fn filled(width: usize, height: usize, occupied: bool) -> Result<Self> {
        let count = cell_count(width, height)?;
        Self::from_cells(width, height, vec![occupied; count])
    }

    /// Parses rows of `#` (occupied) and `.` (free).
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(LayoutError::InvalidMask(format!(
                    "Row {} has {} cells, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for ch in row.chars() {
                match ch {
                    '#' => cells.push(true),
                    '.' => cells.push(false),
                    other => {
                        return Err(LayoutError::InvalidMask(format!(
                            "Unexpected cell character '{}' in row {}",
                            other, y
                        )))
                    }
                }
            }
        }
        Self::from_cells(width, height, cells)
    }

    /// Binarizes an 8-bit raster: values above 127 are occupied.
    pub fn from_raw(mask: &RawMask) -> Result<Self> {
        if mask.data.len() != cell_count(mask.width, mask.height)? {
            return Err(LayoutError::InvalidMask(format!(
                "Raster of {}x{} carries {} bytes",
                mask.width,
                mask.height,
                mask.data.len()
            )));
        }
        let cells = mask
            .data
            .iter()
            .map(|&value| value > OCCUPIED_THRESHOLD)
            .collect();
        Self::from_cells(mask.width, mask.height, cells)
    }

    /// Converts back to a 0/255 raster.
    pub fn to_raw(&self) -> RawMask {
        RawMask {
            width: self.width,
            height: self.height,
            data: self
                .cells
                .iter()
                .map(|&occupied| if occupied { 255 } else { 0 })
                .collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at (x, y); out-of-range cells read as free.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y * self.width + x]
    }

    /// Returns a copy with the cell at (x, y) changed. Out-of-range writes are ignored.
    pub fn with_cell(mut self, x: usize, y: usize, occupied: bool) -> Self {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = occupied;
        }
        self
    }

    /// Returns a copy with every cell of the rectangle set to `occupied`, clipped to the grid.
    pub fn with_rect(
        mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        occupied: bool,
    ) -> Self {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for row in y.min(y_end)..y_end {
            let base = row * self.width;
            self.cells[base + x.min(x_end)..base + x_end].fill(occupied);
        }
        self
    }

    /// Grid of the same dimensions with a new cell buffer.
    pub(crate) fn replaced_cells(&self, cells: Vec<bool>) -> Grid {
        debug_assert_eq!(cells.len(), self.cells.len());
        Grid {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&occupied| occupied).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&occupied| occupied)
    }

    /// Row-major view of the cells.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Occupied area in square meters at the given ground sample distance.
    pub fn occupied_area_m2(&self, gsd: f64) -> f64 {
        self.occupied_count() as f64 * gsd * gsd
    }
}

fn cell_count(width: usize, height: usize) -> Result<usize> {
    width.checked_mul(height).ok_or_else(|| {
        LayoutError::InvalidMask(format!("Grid of {}x{} is too large", width, height))
    })
}

impl TryFrom<&RawMask> for Grid {
    type Error = LayoutError;

    fn try_from(mask: &RawMask) -> Result<Self> {
        Grid::from_raw(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_parses_cells() {
        let grid = Grid::from_rows(&["##.", ".#."]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert!(grid.get(0, 0));
        assert!(!grid.get(2, 0));
        assert!(grid.get(1, 1));
        assert_eq!(grid.occupied_count(), 3);
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let err = Grid::from_rows(&["###", "##"]).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidMask(_)));
    }

    #[test]
    fn test_zero_sized_grid_is_rejected() {
        assert!(Grid::filled(0, 4, true).is_err());
        assert!(Grid::from_rows(&[]).is_err());
    }

    #[test]
    fn test_raw_mask_thresholds_at_127() {
        let raw = RawMask {
            width: 4,
            height: 1,
            data: vec![0, 127, 128, 255],
        };
        let grid = Grid::try_from(&raw).unwrap();
        assert_eq!(grid.cells(), &[false, false, true, true]);
        assert_eq!(grid.to_raw().data, vec![0, 0, 255, 255]);
    }

    #[test]
    fn test_raw_mask_length_mismatch_is_invalid() {
        let raw = RawMask {
            width: 3,
            height: 3,
            data: vec![255; 8],
        };
        assert!(matches!(
            Grid::from_raw(&raw),
            Err(LayoutError::InvalidMask(_))
        ));
    }

    #[test]
    fn test_overflowing_dimensions_are_invalid() {
        let raw = RawMask {
            width: usize::MAX,
            height: 2,
            data: Vec::new(),
        };
        assert!(matches!(
            Grid::from_raw(&raw),
            Err(LayoutError::InvalidMask(_))
        ));
        assert!(matches!(
            Grid::from_cells(2, usize::MAX, Vec::new()),
            Err(LayoutError::InvalidMask(_))
        ));
        assert!(Grid::filled(usize::MAX, usize::MAX, false).is_err());
    }

    #[test]
    fn test_with_rect_clips_to_grid() {
        let grid = Grid::filled(5, 5, false)
            .unwrap()
            .with_rect(3, 3, 10, 10, true);
        assert_eq!(grid.occupied_count(), 4);
        assert!(grid.get(4, 4));
        assert!(!grid.get(2, 3));
    }

    #[test]
    fn test_occupied_area_uses_squared_gsd() {
        let grid = Grid::filled(10, 10, true).unwrap();
        assert!((grid.occupied_area_m2(0.5) - 25.0).abs() < 1e-9);
    }
}
