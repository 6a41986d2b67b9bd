use crate::grid::Grid;
use crate::types::{Anchor, LayoutError, Result};
use serde::{Deserialize, Serialize};

/// How candidate positions are found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStrategy {
    /// Constant-time window test on a summed-area table
    #[default]
    SummedArea,
    /// Cell-by-cell window test, kept as a reference
    Naive,
}

/// 2-D prefix sums of occupied cells.
///
/// `sums[(y) * (width + 1) + x]` holds the number of occupied cells in the
/// half-open block `[0, x) x [0, y)`, so any window count is four lookups.
/// Counts are `usize`, wide enough for any grid that fits in memory.
#[derive(Debug, Clone)]
pub struct SummedAreaTable {
    width: usize,
    height: usize,
    sums: Vec<usize>,
}

impl SummedAreaTable {
    pub fn new(grid: &Grid) -> Self {
        let width = grid.width();
        let height = grid.height();
        let stride = width + 1;
        let mut sums = vec![0usize; stride * (height + 1)];

        for y in 0..height {
            let mut row_sum = 0usize;
            for x in 0..width {
                row_sum += usize::from(grid.get(x, y));
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + row_sum;
            }
        }

        Self {
            width,
            height,
            sums,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Occupied cells in the `rect_w` x `rect_h` window at (x, y). The window must be in bounds.
    pub fn window_sum(&self, x: usize, y: usize, rect_w: usize, rect_h: usize) -> usize {
        let stride = self.width + 1;
        let (x1, y1) = (x + rect_w, y + rect_h);
        self.sums[y1 * stride + x1] + self.sums[y * stride + x]
            - self.sums[y * stride + x1]
            - self.sums[y1 * stride + x]
    }

    /// True when the window lies inside the grid and every cell in it is occupied.
    pub fn is_full(&self, x: usize, y: usize, rect_w: usize, rect_h: usize) -> bool {
        let fits = |start: usize, extent: usize, limit: usize| {
            start.checked_add(extent).is_some_and(|end| end <= limit)
        };
        if !fits(x, rect_w, self.width) || !fits(y, rect_h, self.height) {
            return false;
        }
        self.window_sum(x, y, rect_w, rect_h) == rect_w * rect_h
    }

    /// Every top-left position whose window is fully occupied, in row-major order.
    pub fn candidates(&self, rect_h: usize, rect_w: usize) -> Vec<Anchor> {
        if rect_h > self.height || rect_w > self.width {
            return Vec::new();
        }
        let mut anchors = Vec::new();
        for y in 0..=(self.height - rect_h) {
            for x in 0..=(self.width - rect_w) {
                if self.is_full(x, y, rect_w, rect_h) {
                    anchors.push(Anchor::new(x, y));
                }
            }
        }
        anchors
    }
}

/// Finds every position where a `rect_h` x `rect_w` rectangle lies entirely in the mask.
///
/// Runs in O(H*W) regardless of rectangle size. Positions come back in
/// row-major order; a rectangle larger than the grid yields no positions.
pub fn scan(mask: &Grid, rect_h: usize, rect_w: usize) -> Result<Vec<Anchor>> {
    check_rect(rect_h, rect_w)?;
    Ok(SummedAreaTable::new(mask).candidates(rect_h, rect_w))
}

/// Reference scanner testing every cell of every window.
pub fn scan_naive(mask: &Grid, rect_h: usize, rect_w: usize) -> Result<Vec<Anchor>> {
    check_rect(rect_h, rect_w)?;
    if rect_h > mask.height() || rect_w > mask.width() {
        return Ok(Vec::new());
    }

    let mut anchors = Vec::new();
    for y in 0..=(mask.height() - rect_h) {
        for x in 0..=(mask.width() - rect_w) {
            let full = (y..y + rect_h).all(|row| (x..x + rect_w).all(|col| mask.get(col, row)));
            if full {
                anchors.push(Anchor::new(x, y));
            }
        }
    }
    Ok(anchors)
}

/// Dispatches to the scanner selected by `strategy`.
pub fn scan_with(
    strategy: ScanStrategy,
    mask: &Grid,
    rect_h: usize,
    rect_w: usize,
) -> Result<Vec<Anchor>> {
    match strategy {
        ScanStrategy::SummedArea => scan(mask, rect_h, rect_w),
        ScanStrategy::Naive => scan_naive(mask, rect_h, rect_w),
    }
}

fn check_rect(rect_h: usize, rect_w: usize) -> Result<()> {
    if rect_h == 0 || rect_w == 0 {
        return Err(LayoutError::InvalidParameter(format!(
            "Rectangle dimensions must be positive: {}x{}",
            rect_h, rect_w
        )));
    }
    Ok(())
}
