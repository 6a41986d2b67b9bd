use super::*;
use crate::geometry::{estimate_by_area, pack, scan_with};
use tracing::debug;

impl Planner {
    /// Tries both orientations of a footprint and keeps the better one.
    /// Ties go to `AsGiven`, the orientation evaluated first.
    pub(super) fn evaluate_footprint(
        &self,
        usable: &Grid,
        usable_area_m2: f64,
        sized: &SizedFootprint,
    ) -> Result<FootprintReport> {
        let footprint = &sized.footprint;
        let area_estimate = estimate_by_area(usable_area_m2, footprint)?;

        let (given_h, given_w) = Orientation::AsGiven.apply(sized.length_px, sized.width_px);
        let as_given =
            self.layout_orientation(usable, &footprint.name, Orientation::AsGiven, given_h, given_w)?;

        let (rot_h, rot_w) = Orientation::Rotated90.apply(sized.length_px, sized.width_px);
        let rotated =
            self.layout_orientation(usable, &footprint.name, Orientation::Rotated90, rot_h, rot_w)?;

        debug!(
            "Panel '{}': area estimate {}, as given {}, rotated {}",
            footprint.name, area_estimate, as_given.count, rotated.count
        );

        let as_given_count = as_given.count;
        let rotated_count = rotated.count;

        let (layout, pixel_size) = if rotated.count > as_given.count {
            (
                rotated,
                PixelSize {
                    height: rot_h,
                    width: rot_w,
                },
            )
        } else {
            (
                as_given,
                PixelSize {
                    height: given_h,
                    width: given_w,
                },
            )
        };

        Ok(FootprintReport {
            layout,
            pixel_size,
            as_given_count,
            rotated_count,
            area_estimate,
        })
    }

    /// Scans and packs one orientation on its own working copy of the usable mask.
    fn layout_orientation(
        &self,
        usable: &Grid,
        footprint_name: &str,
        orientation: Orientation,
        height: usize,
        width: usize,
    ) -> Result<LayoutResult> {
        let working = usable.clone();
        let candidates = scan_with(self.config.scan_strategy, &working, height, width)?;
        let placements = pack(&candidates, height, width, working.height(), working.width());
        Ok(LayoutResult::new(footprint_name, orientation, placements))
    }
}
