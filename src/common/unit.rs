//! Length units used by the Office formats.
//!
//! DrawingML positions and sizes are expressed in EMUs (English Metric
//! Units), WordprocessingML page geometry in twentieths of a point (dxa),
//! and font sizes in half points (docx) or hundredths of a point (charts).

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_PT: i64 = 12_700;

/// Screen resolution assumed when an image carries no density information.
pub const DEFAULT_DPI: u32 = 96;

#[inline]
pub fn px_to_emu(px: u32, dpi: u32) -> i64 {
    ((px as f64) * EMUS_PER_INCH as f64 / dpi.max(1) as f64) as i64
}

#[inline]
pub fn pt_to_emu(pt: f64) -> i64 {
    (pt * EMUS_PER_PT as f64).round() as i64
}

/// Font size in points to WordprocessingML half points (`w:sz`).
#[inline]
pub fn pt_to_half_points(pt: f64) -> u32 {
    (pt * 2.0).round().max(0.0) as u32
}

/// Font size in points to DrawingML hundredths of a point (`a:rPr/@sz`).
#[inline]
pub fn pt_to_centipoints(pt: f64) -> u32 {
    (pt * 100.0).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_to_emu() {
        assert_eq!(px_to_emu(96, DEFAULT_DPI), EMUS_PER_INCH);
        assert_eq!(px_to_emu(300, 300), EMUS_PER_INCH);
        assert_eq!(pt_to_emu(1.0), EMUS_PER_PT);
    }

    #[test]
    fn test_font_sizes() {
        assert_eq!(pt_to_half_points(11.0), 22);
        assert_eq!(pt_to_centipoints(12.5), 1250);
    }
}
