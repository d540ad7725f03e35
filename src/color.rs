use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Sequential colour scale: artist count → Color32
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Maps per-country artist counts onto a continuous dark-blue → yellow ramp
/// for the country chart. Higher counts read warmer and brighter.
#[derive(Debug, Clone)]
pub struct CountScale {
    min: f64,
    max: f64,
}

impl CountScale {
    /// Build a scale spanning the counts present in the chart data.
    pub fn new(counts: &[(String, usize)]) -> Option<Self> {
        let min = counts.iter().map(|(_, n)| *n).min()? as f64;
        let max = counts.iter().map(|(_, n)| *n).max()? as f64;
        Some(CountScale { min, max })
    }

    /// Colour for a count, interpolated across the scale's range.
    pub fn color_for(&self, count: usize) -> Color32 {
        let span = self.max - self.min;
        let t = if span.abs() < f64::EPSILON {
            1.0
        } else {
            ((count as f64 - self.min) / span) as f32
        };
        let hue = 250.0 - 190.0 * t;
        let lightness = 0.30 + 0.30 * t;
        hsl_to_color32(hue, 0.70, lightness)
    }
}
