use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Diverging colour scale: correlation value → Color32
// ---------------------------------------------------------------------------

/// ColorBrewer RdBu, dark red → neutral → dark blue.
const RDBU: [(u8, u8, u8); 11] = [
    (0x67, 0x00, 0x1f),
    (0xb2, 0x18, 0x2b),
    (0xd6, 0x60, 0x4d),
    (0xf4, 0xa5, 0x82),
    (0xfd, 0xdb, 0xc7),
    (0xf7, 0xf7, 0xf7),
    (0xd1, 0xe5, 0xf0),
    (0x92, 0xc5, 0xde),
    (0x43, 0x93, 0xc3),
    (0x21, 0x66, 0xac),
    (0x05, 0x30, 0x61),
];

fn to_linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

/// Sample the ramp at `t` in [0, 1], interpolating in linear RGB.
fn sample_ramp(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (RDBU.len() - 1) as f32;
    let lo = (scaled.floor() as usize).min(RDBU.len() - 2);
    let frac = scaled - lo as f32;

    let mixed = to_linear(RDBU[lo]).mix(to_linear(RDBU[lo + 1]), frac);
    let rgb: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

/// Colour for a correlation value: +1 dark blue, 0 neutral, −1 dark red.
///
/// Values outside [-1, 1] from rounding are clamped.
pub fn correlation_color(value: f64) -> Color32 {
    let v = if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    };
    sample_ramp(((v + 1.0) / 2.0) as f32)
}

/// Legend gradient stops from top (+1) to bottom (−1): `(offset, value, colour)`.
pub fn legend_stops(steps: usize) -> Vec<(f32, f64, Color32)> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|k| {
            let offset = k as f32 / steps as f32;
            let value = 1.0 - 2.0 * offset as f64;
            (offset, value, correlation_color(value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: Color32, b: Color32) -> i32 {
        (a.r() as i32 - b.r() as i32).abs()
            + (a.g() as i32 - b.g() as i32).abs()
            + (a.b() as i32 - b.b() as i32).abs()
    }

    #[test]
    fn endpoints_and_midpoint() {
        assert_eq!(correlation_color(1.0), Color32::from_rgb(0x05, 0x30, 0x61));
        assert_eq!(correlation_color(-1.0), Color32::from_rgb(0x67, 0x00, 0x1f));
        assert_eq!(correlation_color(0.0), Color32::from_rgb(0xf7, 0xf7, 0xf7));
    }

    #[test]
    fn overshoot_and_nan_are_tolerated() {
        assert_eq!(correlation_color(1.0000001), correlation_color(1.0));
        assert_eq!(correlation_color(-1.3), correlation_color(-1.0));
        assert_eq!(correlation_color(f64::NAN), correlation_color(0.0));
    }

    #[test]
    fn symmetric_distance_from_neutral() {
        let neutral = correlation_color(0.0);
        for v in [0.2, 0.5, 0.8] {
            let pos = distance(correlation_color(v), neutral);
            let neg = distance(correlation_color(-v), neutral);
            assert!(pos > 0 && neg > 0);
            // Both halves move away from neutral as |v| grows.
            assert!(distance(correlation_color(v + 0.1), neutral) >= pos);
            assert!(distance(correlation_color(-v - 0.1), neutral) >= neg);
        }
    }

    #[test]
    fn positive_is_blue_negative_is_red() {
        let pos = correlation_color(0.6);
        let neg = correlation_color(-0.6);
        assert!(pos.b() > pos.r());
        assert!(neg.r() > neg.b());
    }

    #[test]
    fn legend_runs_top_positive_to_bottom_negative() {
        let stops = legend_stops(20);
        assert_eq!(stops.len(), 21);
        assert_eq!(stops[0].1, 1.0);
        assert_eq!(stops[10].1, 0.0);
        assert_eq!(stops[20].1, -1.0);
        assert_eq!(stops[0].2, correlation_color(1.0));
    }
}
