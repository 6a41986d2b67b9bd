use super::*;
use crate::grid::RawMask;
use rayon::prelude::*;
use tracing::{info_span, warn};

impl Planner {
    /// Plans every roof of a request with the shared configuration.
    ///
    /// A roof that fails (undecodable or empty mask) is recorded with its
    /// reason and the batch carries on. Reports keep the input order whether
    /// or not the roofs are planned in parallel.
    pub fn plan_batch(&self, masks: &[RawMask]) -> BatchSummary {
        info!("Planning batch of {} roofs", masks.len());

        let roofs: Vec<RoofReport> = if self.config.parallel {
            masks
                .par_iter()
                .enumerate()
                .map(|(index, mask)| self.plan_entry(index, mask))
                .collect()
        } else {
            masks
                .iter()
                .enumerate()
                .map(|(index, mask)| self.plan_entry(index, mask))
                .collect()
        };

        let totals = self.calculate_totals(&roofs);

        info!(
            "Batch complete: {} planned, {} failed, {} panels, {:.2} kW",
            totals.roofs_planned, totals.roofs_failed, totals.total_panels, totals.total_capacity_kw
        );

        BatchSummary { roofs, totals }
    }

    fn plan_entry(&self, roof_index: usize, mask: &RawMask) -> RoofReport {
        let span = info_span!("roof", index = roof_index);
        let _guard = span.enter();

        let outcome = match self.plan_raw(mask) {
            Ok(summary) => RoofOutcome::Planned(summary),
            Err(err) => {
                warn!("Roof {} skipped: {}", roof_index, err);
                RoofOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        };

        RoofReport {
            roof_index,
            outcome,
        }
    }

    /// Decodes a raster and plans it. Unlike [`Planner::plan_roof`], a mask
    /// without any roof cell is an error here.
    pub fn plan_raw(&self, mask: &RawMask) -> Result<RoofSummary> {
        let roof = Grid::from_raw(mask)?;
        if roof.is_empty() {
            return Err(LayoutError::EmptyMask);
        }
        self.plan_roof(&roof)
    }
}
