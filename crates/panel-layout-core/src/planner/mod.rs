use crate::config::LayoutConfig;
use crate::geometry::{erode, pixels_from_meters};
use crate::grid::Grid;
use crate::types::*;
use tracing::info;

mod batch;
mod footprint;
mod summary;

/// Catalogue entry with its pixel size (spacing included) as given
#[derive(Debug, Clone)]
struct SizedFootprint {
    footprint: PanelFootprint,
    length_px: usize,
    width_px: usize,
}

/// Lays out panels on roof masks using greedy first-fit packing.
pub struct Planner {
    config: LayoutConfig,
    margin_px: usize,
    footprints: Vec<SizedFootprint>,
}

impl Planner {
    /// Validates the configuration and converts every physical size to pixels.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;

        let margin_px = pixels_from_meters(config.margin_m, config.gsd)?;

        let mut footprints = Vec::with_capacity(config.catalogue.len());
        for footprint in &config.catalogue {
            let length_px = pixels_from_meters(footprint.length_m + config.spacing_m, config.gsd)?;
            let width_px = pixels_from_meters(footprint.width_m + config.spacing_m, config.gsd)?;
            footprints.push(SizedFootprint {
                footprint: footprint.clone(),
                length_px,
                width_px,
            });
        }

        Ok(Self {
            config,
            margin_px,
            footprints,
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Safety margin in pixels.
    pub fn margin_px(&self) -> usize {
        self.margin_px
    }

    /// Plans a single roof.
    ///
    /// An unoccupied mask, or one the margin erodes away entirely, is not an
    /// error: every footprint reports a count of zero.
    pub fn plan_roof(&self, roof: &Grid) -> Result<RoofSummary> {
        let gsd = self.config.gsd;
        let usable = erode(roof, self.margin_px);

        let roof_area_m2 = roof.occupied_area_m2(gsd);
        let usable_area_m2 = usable.occupied_area_m2(gsd);

        info!(
            "Roof area {:.2} m2, usable area {:.2} m2 (margin {} px)",
            roof_area_m2, usable_area_m2, self.margin_px
        );

        let mut reports = Vec::with_capacity(self.footprints.len());
        for sized in &self.footprints {
            reports.push(self.evaluate_footprint(&usable, usable_area_m2, sized)?);
        }

        Ok(self.summarize_roof(roof_area_m2, usable_area_m2, reports))
    }
}
