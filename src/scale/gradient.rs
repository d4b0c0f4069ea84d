//! Linear gradient helpers shared by the scales.

use crate::colors::HexColor;

/// Get the weights `(start, end)` for linear interpolation at `ratio`
pub fn linear_weight(ratio: f64) -> (f64, f64) {
    (1.0 - ratio, ratio)
}

/// Linear interpolation between two colors, each channel rounded to the
/// nearest integer (halves round up)
pub fn lerp_color(start: HexColor, end: HexColor, ratio: f64) -> HexColor {
    let (ws, we) = linear_weight(ratio);
    let [sr, sg, sb] = start.to_rgb();
    let [er, eg, eb] = end.to_rgb();
    let channel = |s: u8, e: u8| (e as f64 * we + s as f64 * ws).round().clamp(0.0, 255.0) as u8;
    HexColor::from_rgb(channel(sr, er), channel(sg, eg), channel(sb, eb))
}

/// Map a ratio onto `[start, end]`. Ratios outside `[0, 1]` extrapolate.
pub fn ratio_to_value(ratio: f64, start: f64, end: f64) -> f64 {
    start + ratio * (end - start)
}

/// Relative position of `value` within `[start, end]`, unclamped.
/// An empty range (a single selected value) maps to 0.5.
pub fn value_to_ratio(value: f64, start: f64, end: f64) -> f64 {
    if end != start {
        (value - start) / (end - start)
    } else {
        0.5
    }
}
