use super::*;

impl Planner {
    /// Picks the recommended footprint and derives the roof totals.
    ///
    /// Running maximum with a strict comparison: the first footprint in
    /// catalogue order wins ties, including the all-zero case.
    pub(super) fn summarize_roof(
        &self,
        roof_area_m2: f64,
        usable_area_m2: f64,
        footprints: Vec<FootprintReport>,
    ) -> RoofSummary {
        let mut best: Option<(&str, usize)> = None;
        for report in &footprints {
            let count = report.layout.count;
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((report.layout.footprint_name.as_str(), count)),
            }
        }

        let best_footprint = best.map(|(name, _)| name.to_string());
        let max_count = best.map(|(_, count)| count).unwrap_or(0);

        RoofSummary {
            roof_area_m2,
            usable_area_m2,
            margin_px: self.margin_px,
            footprints,
            best_footprint,
            max_count,
            total_capacity_kw: max_count as f64 * self.config.panel_rating_kw,
        }
    }

    /// Sums panel counts and areas over the planned roofs; failed roofs are only counted.
    pub(super) fn calculate_totals(&self, roofs: &[RoofReport]) -> BatchTotals {
        let mut totals = BatchTotals::default();
        for roof in roofs {
            match &roof.outcome {
                RoofOutcome::Planned(summary) => {
                    totals.roofs_planned += 1;
                    totals.total_panels += summary.max_count;
                    totals.total_capacity_kw += summary.total_capacity_kw;
                    totals.total_roof_area_m2 += summary.roof_area_m2;
                    totals.total_usable_area_m2 += summary.usable_area_m2;
                }
                RoofOutcome::Failed { .. } => totals.roofs_failed += 1,
            }
        }
        totals
    }
}
