//! Chart palette

use plotters::style::RGBColor;
use usability_survey_core::Strength;

/// Bars and radar fill for strong heuristics
pub const SEA_GREEN: RGBColor = RGBColor(0x2E, 0x8B, 0x57);

/// Bars for acceptable heuristics
pub const ORANGE: RGBColor = RGBColor(0xFF, 0xA5, 0x00);

/// Bars for weak heuristics
pub const SALMON: RGBColor = RGBColor(0xFF, 0x6B, 0x6B);

/// Question trend line
pub const ROYAL_BLUE: RGBColor = RGBColor(0x41, 0x69, 0xE1);

/// Grid lines and ring labels
pub const GREY: RGBColor = RGBColor(0x80, 0x80, 0x80);

const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Bar colour for a strength band
pub fn strength_color(strength: Strength) -> RGBColor {
    match strength {
        Strength::High => SEA_GREEN,
        Strength::Medium => ORANGE,
        Strength::Low => SALMON,
    }
}

/// Diverging blue-white-red colour for a correlation in [-1, 1], centred at 0
pub fn coolwarm(r: f64) -> RGBColor {
    let r = if r.is_nan() { 0.0 } else { r.clamp(-1.0, 1.0) };
    let (from, to, t) = if r < 0.0 {
        (COOL, NEUTRAL, r + 1.0)
    } else {
        (NEUTRAL, WARM, r)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_colors() {
        assert_eq!(strength_color(Strength::High), SEA_GREEN);
        assert_eq!(strength_color(Strength::Medium), ORANGE);
        assert_eq!(strength_color(Strength::Low), SALMON);
    }

    #[test]
    fn test_coolwarm_endpoints() {
        assert_eq!(coolwarm(-1.0), RGBColor(59, 76, 192));
        assert_eq!(coolwarm(0.0), RGBColor(221, 221, 221));
        assert_eq!(coolwarm(1.0), RGBColor(180, 4, 38));
    }

    #[test]
    fn test_coolwarm_clamps_and_handles_nan() {
        assert_eq!(coolwarm(3.0), coolwarm(1.0));
        assert_eq!(coolwarm(-7.0), coolwarm(-1.0));
        assert_eq!(coolwarm(f64::NAN), coolwarm(0.0));
    }

    #[test]
    fn test_coolwarm_midpoints() {
        let RGBColor(r, _, b) = coolwarm(-0.5);
        assert_eq!((r, b), (140, 207));
        let RGBColor(r, g, _) = coolwarm(0.5);
        assert_eq!((r, g), (201, 113));
    }
}
