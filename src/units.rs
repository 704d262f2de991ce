//! Pixel / millimeter conversion at a fixed document resolution.
//!
//! Canvas bounds are reported in pixels; print sizes are specified in
//! millimeters. The canvas is assumed to be 72 pixels per inch.

/// Assumed canvas resolution.
pub const PIXELS_PER_INCH: f64 = 72.0;

pub const MM_PER_INCH: f64 = 25.4;

/// Millimeters covered by one pixel (≈ 0.352778).
pub const MM_PER_PIXEL: f64 = MM_PER_INCH / PIXELS_PER_INCH;

/// Convert pixels to millimeters, rounded to one decimal place.
pub fn pixels_to_mm(px: f64) -> f64 {
    round_to_tenth(px * MM_PER_PIXEL)
}

/// Convert millimeters to pixels. Not rounded: the result feeds scale factors.
pub fn mm_to_pixels(mm: f64) -> f64 {
    mm / MM_PER_PIXEL
}

fn round_to_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
