use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Fixed colours for the two-slice site view.
pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(0x2c, 0xa0, 0x2c);
pub const FAILURE_COLOR: Color32 = Color32::from_rgb(0xd6, 0x27, 0x28);

// ---------------------------------------------------------------------------
// Booster category → Color32
// ---------------------------------------------------------------------------

/// Known booster version families and their marker colours.
const CATEGORY_COLORS: &[(&str, Color32)] = &[
    ("v1.0", Color32::from_rgb(0x1f, 0x77, 0xb4)),
    ("v1.1", Color32::from_rgb(0xff, 0x7f, 0x0e)),
    ("FT", Color32::from_rgb(0x2c, 0xa0, 0x2c)),
    ("B4", Color32::from_rgb(0xd6, 0x27, 0x28)),
    ("B5", Color32::from_rgb(0x94, 0x67, 0xbd)),
];

/// Used for any category missing from [`CATEGORY_COLORS`].
pub const DEFAULT_CATEGORY_COLOR: Color32 = Color32::GRAY;

/// Look up the marker colour for a booster category.
pub fn category_color(category: &str) -> Color32 {
    CATEGORY_COLORS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, c)| *c)
        .unwrap_or(DEFAULT_CATEGORY_COLOR)
}

/// `#rrggbb`, the form chart specs are exported with.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}
