//! Gravel shading
//!
//! Each cell takes its base color from the palette and is brightened when it
//! stands above its light-facing neighbor and darkened when it stands above
//! its shadow-facing neighbor. The result is drawn as a `grain_size` square
//! block into a 0RGB `u32` buffer, the layout minifb blits directly.

use serde::{Deserialize, Serialize};

use crate::heightfield::HeightField;
use crate::palette::ColorPalette;
use crate::region::Rect;

/// Side the light comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LightDirection {
    #[default]
    Left,
    Right,
    Up,
    Down,
}

impl LightDirection {
    pub fn all() -> &'static [Self] {
        &[Self::Left, Self::Right, Self::Up, Self::Down]
    }

    /// Offsets of the (light-facing, shadow-facing) neighbors.
    pub fn neighbor_offsets(&self) -> ((i32, i32), (i32, i32)) {
        match self {
            Self::Left => ((-1, 0), (1, 0)),
            Self::Right => ((1, 0), (-1, 0)),
            Self::Up => ((0, -1), (0, 1)),
            Self::Down => ((0, 1), (0, -1)),
        }
    }

    /// Next direction, for cycling through them from a key press.
    pub fn next(&self) -> Self {
        match self {
            Self::Left => Self::Up,
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
        }
    }
}

impl std::fmt::Display for LightDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadingSettings {
    pub light: LightDirection,
    pub highlight_intensity: f32,
    pub shadow_intensity: f32,
}

/// Screen-side pixel buffer in 0RGB format.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn rgb(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(unpack_rgb(self.pixels[y * self.width + x]))
    }

    /// Fill a square block, clipped to the buffer.
    pub fn fill_block(&mut self, x: usize, y: usize, size: usize, color: u32) {
        let x_end = (x + size).min(self.width);
        let y_end = (y + size).min(self.height);
        for py in y.min(y_end)..y_end {
            let row = py * self.width;
            self.pixels[row + x.min(x_end)..row + x_end].fill(color);
        }
    }
}

pub fn pack_rgb(color: [u8; 3]) -> u32 {
    ((color[0] as u32) << 16) | ((color[1] as u32) << 8) | color[2] as u32
}

pub fn unpack_rgb(pixel: u32) -> [u8; 3] {
    [(pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8]
}

/// Final color of one visible cell.
pub fn shade_cell(field: &HeightField, palette: &ColorPalette, settings: &ShadingSettings, x: i32, y: i32) -> [u8; 3] {
    let Some(h) = field.get(x, y) else {
        return [0, 0, 0];
    };
    let ((lx, ly), (sx, sy)) = settings.light.neighbor_offsets();

    let mut light = 0.0f32;
    if field.get(x + lx, y + ly).is_some_and(|n| h > n) {
        light += h * settings.highlight_intensity;
    }
    if field.get(x + sx, y + sy).is_some_and(|n| h > n) {
        light -= h * settings.shadow_intensity;
    }

    let base = palette.color_for_height(h);
    let channel = |c: u8| (c as f32 + light).round().clamp(0.0, 255.0) as u8;
    [channel(base[0]), channel(base[1]), channel(base[2])]
}

/// Repaint the cells in `region` (all visible cells when None).
/// Returns the cell rectangle actually drawn.
pub fn render_region(
    field: &HeightField,
    palette: &ColorPalette,
    settings: &ShadingSettings,
    grain_size: usize,
    region: Option<Rect>,
    frame: &mut FrameBuffer,
) -> Option<Rect> {
    let full = Rect::new(0, 0, field.width as i32, field.height as i32);
    let rect = region.unwrap_or(full).clip(field.width, field.height)?;

    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            let color = pack_rgb(shade_cell(field, palette, settings, x, y));
            frame.fill_block(x as usize * grain_size, y as usize * grain_size, grain_size, color);
        }
    }

    Some(rect)
}
