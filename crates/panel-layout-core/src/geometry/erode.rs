use super::scan::SummedAreaTable;
use crate::grid::Grid;

/// Shrinks the occupied region by `margin_px` cells in every direction.
///
/// A cell stays occupied only if the whole `(2 * margin_px + 1)` square centred
/// on it is occupied. Cells beyond the grid edge count as free, so the edge of
/// the raster bounds the roof as well. A zero margin returns an independent copy.
pub fn erode(mask: &Grid, margin_px: usize) -> Grid {
    if margin_px == 0 {
        return mask.clone();
    }

    let width = mask.width();
    let height = mask.height();
    let mut cells = vec![false; mask.cells().len()];

    let kernel = margin_px.checked_mul(2).and_then(|k| k.checked_add(1));
    if let Some(kernel) = kernel.filter(|&k| k <= width && k <= height) {
        let table = SummedAreaTable::new(mask);
        for y in margin_px..height - margin_px {
            for x in margin_px..width - margin_px {
                cells[y * width + x] = table.is_full(x - margin_px, y - margin_px, kernel, kernel);
            }
        }
    }

    mask.replaced_cells(cells)
}
