use crate::types::{LayoutError, PanelFootprint, Result};

/// Upper-bound style panel count: usable area divided by panel area, rounded down.
///
/// Shape constraints usually make the packed count lower; this is only a
/// cross-check against the greedy layout.
pub fn estimate_by_area(usable_area_m2: f64, footprint: &PanelFootprint) -> Result<u64> {
    if !usable_area_m2.is_finite() || usable_area_m2 < 0.0 {
        return Err(LayoutError::InvalidParameter(format!(
            "Usable area must be non-negative, got {}",
            usable_area_m2
        )));
    }
    if !(footprint.length_m > 0.0 && footprint.width_m > 0.0)
        || !footprint.length_m.is_finite()
        || !footprint.width_m.is_finite()
    {
        return Err(LayoutError::InvalidParameter(format!(
            "Panel '{}' dimensions must be positive: {}x{}",
            footprint.name, footprint.length_m, footprint.width_m
        )));
    }

    Ok((usable_area_m2 / footprint.area_m2()).floor() as u64)
}
