use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::channel::Channel;

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

// ---------------------------------------------------------------------------
// Channel colours for the preview charts
// ---------------------------------------------------------------------------

/// Dark channels are drawn in neutral grey; measurement channels get
/// distinct hues.
#[derive(Debug, Clone)]
pub struct ChannelColors {
    mapping: BTreeMap<Channel, Color32>,
    dark_color: Color32,
}

impl Default for ChannelColors {
    fn default() -> Self {
        let measured: Vec<Channel> = Channel::ALL.into_iter().filter(|c| !c.is_dark()).collect();
        let mapping = measured
            .iter()
            .copied()
            .zip(generate_palette(measured.len()))
            .collect();

        ChannelColors {
            mapping,
            dark_color: Color32::GRAY,
        }
    }
}

impl ChannelColors {
    pub fn color_for(&self, channel: Channel) -> Color32 {
        self.mapping
            .get(&channel)
            .copied()
            .unwrap_or(self.dark_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(4).len(), 4);
    }

    #[test]
    fn measurement_channels_are_distinct() {
        let colors = ChannelColors::default();
        assert_eq!(colors.color_for(Channel::DarkRef), Color32::GRAY);
        assert_eq!(colors.color_for(Channel::DarkSig), Color32::GRAY);

        let mut seen: Vec<Color32> = Channel::ALL
            .into_iter()
            .filter(|c| !c.is_dark())
            .map(|c| colors.color_for(c))
            .collect();
        seen.dedup();
        assert_eq!(seen.len(), 4);
    }
}
