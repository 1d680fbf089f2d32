//! Colour maps

use plotters::style::RGBColor;

const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

pub(crate) const MISSING: RGBColor = RGBColor(245, 245, 245);
pub(crate) const BAR: RGBColor = RGBColor(68, 114, 196);
pub(crate) const CATEGORY_BAR: RGBColor = RGBColor(33, 145, 140);
pub(crate) const KDE_LINE: RGBColor = RGBColor(31, 56, 120);

fn lerp(a: (f64, f64, f64), b: (f64, f64, f64), t: f64) -> RGBColor {
    let channel = |x: f64, y: f64| (x + (y - x) * t).round().clamp(0.0, 255.0) as u8;
    RGBColor(channel(a.0, b.0), channel(a.1, b.1), channel(a.2, b.2))
}

/// Diverging blue-white-red map over [-1, 1]
pub(crate) fn coolwarm(value: f64) -> RGBColor {
    let v = value.clamp(-1.0, 1.0);
    if v < 0.0 {
        lerp(NEUTRAL, COOL, -v)
    } else {
        lerp(NEUTRAL, WARM, v)
    }
}
