use crate::types::{LayoutError, Result};

/// Converts a physical distance to pixels, rounding up.
///
/// Rounding up keeps margins and footprints from being represented by fewer
/// pixels than they physically span.
pub fn pixels_from_meters(value_m: f64, gsd: f64) -> Result<usize> {
    check_gsd(gsd)?;
    if !value_m.is_finite() || value_m < 0.0 {
        return Err(LayoutError::InvalidParameter(format!(
            "Distance must be a non-negative number of meters, got {}",
            value_m
        )));
    }
    let pixels = (value_m / gsd).ceil();
    if pixels >= usize::MAX as f64 {
        return Err(LayoutError::InvalidParameter(format!(
            "{} m at {} m/px exceeds the pixel range",
            value_m, gsd
        )));
    }
    Ok(pixels as usize)
}

/// Ground area covered by a single pixel.
pub fn pixel_area_m2(gsd: f64) -> f64 {
    gsd * gsd
}

/// Derives the GSD from an object of known length and its measured pixel length.
pub fn gsd_from_known_length(real_length_m: f64, pixel_length: f64) -> Result<f64> {
    if !real_length_m.is_finite() || real_length_m <= 0.0 {
        return Err(LayoutError::InvalidParameter(format!(
            "Known length must be positive, got {}",
            real_length_m
        )));
    }
    if !pixel_length.is_finite() || pixel_length <= 0.0 {
        return Err(LayoutError::InvalidParameter(format!(
            "Pixel length must be positive, got {}",
            pixel_length
        )));
    }
    Ok(real_length_m / pixel_length)
}

/// Derives the GSD from an estimated roof area and the fraction of the image it covers.
pub fn gsd_from_roof_area(roof_area_m2: f64, image_pixels: usize, roof_fraction: f64) -> Result<f64> {
    if !roof_area_m2.is_finite() || roof_area_m2 <= 0.0 {
        return Err(LayoutError::InvalidParameter(format!(
            "Roof area must be positive, got {}",
            roof_area_m2
        )));
    }
    if image_pixels == 0 {
        return Err(LayoutError::InvalidParameter(
            "Image must contain at least one pixel".to_string(),
        ));
    }
    if !(roof_fraction > 0.0 && roof_fraction <= 1.0) {
        return Err(LayoutError::InvalidParameter(format!(
            "Roof fraction must be in (0, 1], got {}",
            roof_fraction
        )));
    }
    let roof_pixels = image_pixels as f64 * roof_fraction;
    Ok((roof_area_m2 / roof_pixels).sqrt())
}

pub(crate) fn check_gsd(gsd: f64) -> Result<()> {
    if !gsd.is_finite() || gsd <= 0.0 {
        return Err(LayoutError::InvalidParameter(format!(
            "GSD must be positive, got {}",
            gsd
        )));
    }
    Ok(())
}
