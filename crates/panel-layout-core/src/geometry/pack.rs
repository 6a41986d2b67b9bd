use crate::types::{Anchor, Placement};

/// Occupancy of already accepted placements
struct TakenMap {
    width: usize,
    cells: Vec<bool>,
}

impl TakenMap {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            cells: vec![false; width * height],
        }
    }

    fn is_free(&self, placement: &Placement) -> bool {
        (placement.y..placement.y + placement.height).all(|row| {
            let base = row * self.width;
            !self.cells[base + placement.x..base + placement.x + placement.width]
                .iter()
                .any(|&taken| taken)
        })
    }

    fn mark(&mut self, placement: &Placement) {
        for row in placement.y..placement.y + placement.height {
            let base = row * self.width;
            self.cells[base + placement.x..base + placement.x + placement.width].fill(true);
        }
    }
}

/// Greedy first-fit packing of equally sized rectangles.
///
/// Candidates are visited in row-major order (y, then x) whatever order they
/// arrive in. A candidate is accepted when none of its cells is covered by an
/// earlier acceptance. Candidates must come from a scan of a `height` x `width`
/// mask, so every rectangle is in bounds.
pub fn pack(
    candidates: &[Anchor],
    rect_h: usize,
    rect_w: usize,
    height: usize,
    width: usize,
) -> Vec<Placement> {
    if rect_h == 0 || rect_w == 0 || candidates.is_empty() {
        return Vec::new();
    }

    let mut ordered = candidates.to_vec();
    ordered.sort_unstable();

    let mut taken = TakenMap::new(width, height);
    let mut placements = Vec::new();

    for anchor in ordered {
        let placement = Placement {
            x: anchor.x,
            y: anchor.y,
            width: rect_w,
            height: rect_h,
        };

        if taken.is_free(&placement) {
            taken.mark(&placement);
            placements.push(placement);
        }
    }

    placements
}
