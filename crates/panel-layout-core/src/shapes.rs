//! Reference roof outlines rendered as masks.
//!
//! Each shape is drawn at fixed fractions of the frame so that results can be
//! compared across raster sizes. Useful for calibrating GSD, margin and
//! catalogue settings without a segmentation model in the loop.

use crate::grid::Grid;
use crate::types::{LayoutError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofShape {
    /// Flat roof covering most of the frame
    #[serde(alias = "rikuyane")]
    Flat,
    /// One face of a gable roof
    #[serde(alias = "kiritsuma_side")]
    Gable,
    /// Main trapezoidal face of a hip roof
    #[serde(alias = "yosemune_main")]
    Hip,
    /// Single-pitch shed roof
    #[serde(alias = "katanagare")]
    Shed,
    /// Rectangle with a triangular ridge on top
    #[serde(alias = "original_sample")]
    GableWithRidge,
}

impl RoofShape {
    pub const ALL: [RoofShape; 5] = [
        RoofShape::Flat,
        RoofShape::Gable,
        RoofShape::Hip,
        RoofShape::Shed,
        RoofShape::GableWithRidge,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RoofShape::Flat => "flat",
            RoofShape::Gable => "gable",
            RoofShape::Hip => "hip",
            RoofShape::Shed => "shed",
            RoofShape::GableWithRidge => "gable_with_ridge",
        }
    }

    /// Draws the shape on a `height` x `width` frame.
    pub fn render(self, height: usize, width: usize) -> Result<Grid> {
        let grid = Grid::filled(width, height, false)?;
        let (w, h) = (width as f64, height as f64);
        let px = |fraction: f64, extent: f64| (extent * fraction) as usize;

        let grid = match self {
            RoofShape::Flat => fill_frac_rect(grid, w, h, (0.05, 0.05), (0.95, 0.95)),
            RoofShape::Gable => fill_frac_rect(grid, w, h, (0.1, 0.1), (0.9, 0.9)),
            RoofShape::Shed => fill_frac_rect(grid, w, h, (0.1, 0.15), (0.9, 0.85)),
            RoofShape::Hip => fill_convex(
                grid,
                &[
                    (px(0.1, w), px(0.7, h)),
                    (px(0.9, w), px(0.7, h)),
                    (px(0.7, w), px(0.2, h)),
                    (px(0.3, w), px(0.2, h)),
                ],
            ),
            RoofShape::GableWithRidge => {
                let body = fill_frac_rect(grid, w, h, (0.1, 0.375), (0.9, 0.875));
                fill_convex(
                    body,
                    &[
                        (px(0.1, w), px(0.375, h)),
                        (px(0.5, w), px(0.125, h)),
                        (px(0.9, w), px(0.375, h)),
                    ],
                )
            }
        };

        Ok(grid)
    }
}

impl fmt::Display for RoofShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoofShape {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "flat" | "rikuyane" => Ok(RoofShape::Flat),
            "gable" | "kiritsuma_side" => Ok(RoofShape::Gable),
            "hip" | "yosemune_main" => Ok(RoofShape::Hip),
            "shed" | "katanagare" => Ok(RoofShape::Shed),
            "gable_with_ridge" | "original_sample" => Ok(RoofShape::GableWithRidge),
            other => Err(LayoutError::InvalidParameter(format!(
                "Unknown roof shape '{}'",
                other
            ))),
        }
    }
}

/// Fills the rectangle between two corners given as frame fractions; both corners are inclusive.
fn fill_frac_rect(
    grid: Grid,
    w: f64,
    h: f64,
    top_left: (f64, f64),
    bottom_right: (f64, f64),
) -> Grid {
    let x0 = (w * top_left.0) as usize;
    let y0 = (h * top_left.1) as usize;
    let x1 = (w * bottom_right.0) as usize;
    let y1 = (h * bottom_right.1) as usize;
    grid.with_rect(x0, y0, x1 - x0 + 1, y1 - y0 + 1, true)
}

/// Fills a convex polygon, boundary pixels included.
fn fill_convex(grid: Grid, vertices: &[(usize, usize)]) -> Grid {
    let points: Vec<(f64, f64)> = vertices
        .iter()
        .map(|&(x, y)| (x as f64, y as f64))
        .collect();

    let min_y = vertices.iter().map(|v| v.1).min().unwrap_or(0);
    let max_y = vertices.iter().map(|v| v.1).max().unwrap_or(0);
    let min_x = vertices.iter().map(|v| v.0).min().unwrap_or(0);
    let max_x = vertices.iter().map(|v| v.0).max().unwrap_or(0);

    let mut grid = grid;
    for y in min_y..=max_y.min(grid.height().saturating_sub(1)) {
        for x in min_x..=max_x.min(grid.width().saturating_sub(1)) {
            if inside_convex(&points, x as f64, y as f64) {
                grid = grid.with_cell(x, y, true);
            }
        }
    }
    grid
}

fn inside_convex(points: &[(f64, f64)], x: f64, y: f64) -> bool {
    let mut sign = 0.0;
    for (i, &(ax, ay)) in points.iter().enumerate() {
        let (bx, by) = points[(i + 1) % points.len()];
        let cross = (bx - ax) * (y - ay) - (by - ay) * (x - ax);
        if cross == 0.0 {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_renders_a_roof() {
        for shape in RoofShape::ALL {
            let grid = shape.render(200, 300).unwrap();
            assert_eq!(grid.width(), 300);
            assert_eq!(grid.height(), 200);
            assert!(!grid.is_empty(), "{} rendered empty", shape);
        }
    }

    #[test]
    fn test_flat_roof_bounds_are_inclusive() {
        let grid = RoofShape::Flat.render(100, 100).unwrap();
        // Columns and rows 5..=95
        assert_eq!(grid.occupied_count(), 91 * 91);
        assert!(grid.get(5, 5));
        assert!(grid.get(95, 95));
        assert!(!grid.get(4, 50));
    }

    #[test]
    fn test_hip_is_narrower_at_the_ridge() {
        let grid = RoofShape::Hip.render(100, 100).unwrap();
        let row_width = |y: usize| (0..100).filter(|&x| grid.get(x, y)).count();
        assert!(row_width(25) < row_width(65));
        assert_eq!(row_width(10), 0);
        assert_eq!(row_width(80), 0);
    }

    #[test]
    fn test_ridge_extends_above_the_body() {
        let grid = RoofShape::GableWithRidge.render(400, 500).unwrap();
        assert!(grid.get(250, 60));
        assert!(!grid.get(60, 60));
        assert!(grid.get(60, 200));
    }

    #[test]
    fn test_shape_names_round_trip() {
        for shape in RoofShape::ALL {
            assert_eq!(shape.name().parse::<RoofShape>().unwrap(), shape);
        }
        assert_eq!("rikuyane".parse::<RoofShape>().unwrap(), RoofShape::Flat);
        assert!("dome".parse::<RoofShape>().is_err());
    }
}
