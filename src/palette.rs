//! Height-to-color gradient.

/// Number of entries the renderer expects.
pub const PALETTE_STEPS: usize = 256;

/// Precomputed gradient from the bottom color (height 0) to the top color (height 255).
#[derive(Clone, Debug, PartialEq)]
pub struct ColorPalette {
    colors: Vec<[u8; 3]>,
}

impl ColorPalette {
    /// Linear gradient with `steps` entries, rounded per channel.
    pub fn generate(top: [u8; 3], bottom: [u8; 3], steps: usize) -> Self {
        let colors = (0..steps)
            .map(|i| {
                let t = if steps > 1 { i as f32 / (steps - 1) as f32 } else { 0.0 };
                lerp_color(bottom, top, t)
            })
            .collect();
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<[u8; 3]> {
        self.colors.get(index).copied()
    }

    /// Base color for a height in [0, 255].
    pub fn color_for_height(&self, height: f32) -> [u8; 3] {
        if self.colors.is_empty() {
            return [0, 0, 0];
        }
        let last = self.colors.len() - 1;
        let scaled = (height / 255.0 * self.colors.len() as f32).floor();
        let index = if scaled <= 0.0 { 0 } else { (scaled as usize).min(last) };
        self.colors[index]
    }
}

fn lerp_color(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let channel = |c0: u8, c1: u8| (c0 as f32 * (1.0 - t) + c1 as f32 * t).round() as u8;
    [channel(a[0], b[0]), channel(a[1], b[1]), channel(a[2], b[2])]
}

/// Parse `#RRGGBB` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

pub fn to_hex_color(color: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", color[0], color[1], color[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_to_white_endpoints() {
        let palette = ColorPalette::generate([255, 255, 255], [0, 0, 0], PALETTE_STEPS);
        assert_eq!(palette.len(), 256);
        assert_eq!(palette.get(0), Some([0, 0, 0]));
        assert_eq!(palette.get(255), Some([255, 255, 255]));
    }

    #[test]
    fn test_monotonic_channels() {
        let palette = ColorPalette::generate([250, 200, 90], [10, 40, 60], PALETTE_STEPS);
        for i in 1..palette.len() {
            let prev = palette.get(i - 1).unwrap();
            let cur = palette.get(i).unwrap();
            for c in 0..3 {
                assert!(cur[c] >= prev[c], "channel {} decreased at {}", c, i);
            }
        }
    }

    #[test]
    fn test_color_for_height_index() {
        let palette = ColorPalette::generate([255, 255, 255], [0, 0, 0], PALETTE_STEPS);
        assert_eq!(palette.color_for_height(0.0), [0, 0, 0]);
        assert_eq!(palette.color_for_height(255.0), [255, 255, 255]);
        // floor(128 / 255 * 256) = 128
        assert_eq!(palette.color_for_height(128.0), palette.get(128).unwrap());
    }

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(parse_hex_color("#FFFFFF"), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("1a2B3c"), Some([0x1a, 0x2b, 0x3c]));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
        assert_eq!(to_hex_color([0x1a, 0x2b, 0x3c]), "#1A2B3C");
    }
}
