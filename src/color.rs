use eframe::egui::Color32;
use palette::Srgb;

// ---------------------------------------------------------------------------
// Fixed chart palette
// ---------------------------------------------------------------------------

/// Colours assigned cyclically to proportion-chart slices.
pub const CHART_PALETTE: [Srgb<u8>; 10] = [
    Srgb::new(0x00, 0x88, 0xFE),
    Srgb::new(0x00, 0xC4, 0x9F),
    Srgb::new(0xFF, 0xBB, 0x28),
    Srgb::new(0xFF, 0x80, 0x42),
    Srgb::new(0xAA, 0x66, 0xCC),
    Srgb::new(0xFF, 0x6F, 0x61),
    Srgb::new(0xA3, 0xCB, 0x38),
    Srgb::new(0x12, 0xCB, 0xC4),
    Srgb::new(0xFD, 0xA7, 0xDC),
    Srgb::new(0xED, 0x4C, 0x67),
];

pub const FULL_RANGE_COLOR: Srgb<u8> = Srgb::new(0x29, 0x80, 0xB9);
pub const SEGMENT_RANGE_COLOR: Srgb<u8> = Srgb::new(0x9B, 0x59, 0xB6);
pub const PROGRESSION_COLOR: Srgb<u8> = Srgb::new(0xE6, 0x7E, 0x22);

pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

/// Palette entry for series index `i`, wrapping around.
pub fn palette_color(i: usize) -> Color32 {
    to_color32(CHART_PALETTE[i % CHART_PALETTE.len()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps_around() {
        assert_eq!(palette_color(0), Color32::from_rgb(0x00, 0x88, 0xFE));
        assert_eq!(palette_color(10), palette_color(0));
        assert_eq!(palette_color(13), Color32::from_rgb(0xFF, 0x80, 0x42));
    }
}
