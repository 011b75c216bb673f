//! Length and size conversions into WordprocessingML units

pub const TWIPS_PER_INCH: f64 = 1440.0;
pub const CM_PER_INCH: f64 = 2.54;

/// Line spacing in `w:spacing/@w:line` is expressed in 240ths of a line
/// when `w:lineRule="auto"`.
pub const LINE_UNITS: f64 = 240.0;

/// Convert centimeters to twips (1/20 pt, 1/1440 inch).
pub fn cm_to_twips(cm: f64) -> u32 {
    (cm / CM_PER_INCH * TWIPS_PER_INCH).round() as u32
}

/// Convert a point size to half-points, as used by `w:sz`.
pub fn pt_to_half_points(pt: f64) -> u32 {
    (pt * 2.0).round() as u32
}

/// Convert a line spacing multiple (1.0 = single) to 240ths of a line.
pub fn line_spacing_units(multiple: f64) -> u32 {
    (multiple * LINE_UNITS).round() as u32
}
