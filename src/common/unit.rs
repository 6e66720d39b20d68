//! Unit conversion utilities.
//!
//! Slide geometry is authored in pixels and written in English Metric
//! Units (EMU): 914400 per inch, so 9525 per pixel at 96 DPI.

pub const EMUS_PER_INCH: i64 = 914_400;

/// Angles in DrawingML are expressed in 60000ths of a degree.
pub const ANGLE_UNITS_PER_DEGREE: i64 = 60_000;

/// Default screen resolution used for pixel measurements.
pub const DEFAULT_DPI: u32 = 96;

#[inline]
pub fn px_to_emu(px: i64, dpi: u32) -> i64 {
    if dpi == 0 {
        return 0;
    }
    px.saturating_mul(EMUS_PER_INCH) / i64::from(dpi)
}

#[inline]
pub fn px_to_emu_96(px: i64) -> i64 {
    px_to_emu(px, DEFAULT_DPI)
}

#[inline]
pub fn degrees_to_angle(degrees: i32) -> i64 {
    i64::from(degrees) * ANGLE_UNITS_PER_DEGREE
}
