//! Garden configuration
//!
//! Every tunable the interactive tools read. Values are clamped into their
//! supported ranges rather than rejected.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::brush::{BrushSettings, Tool};
use crate::heightfield::SeedDistribution;
use crate::rake::RakeConfig;
use crate::render::{LightDirection, ShadingSettings};

pub const GRAIN_SIZE_RANGE: (usize, usize) = (1, 6);
pub const BRUSH_RADIUS_RANGE: (f32, f32) = (5.0, 60.0);
pub const WOBBLE_RANGE: (f32, f32) = (0.0, 10.0);
pub const DIG_DEPTH_RANGE: (f32, f32) = (20.0, 160.0);
pub const INTENSITY_RANGE: (f32, f32) = (0.0, 1.5);
pub const TINE_COUNT_RANGE: (usize, usize) = (1, 31);
pub const MAX_PIVOTS_PER_SIDE: usize = 7;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandParams {
    /// Screen pixels per grid cell
    pub grain_size: usize,
    /// Base radius of the dig brush (cells); also sets tine spacing
    pub dig_brush_radius: f32,
    /// Base radius of the reset brush (cells)
    pub reset_brush_radius: f32,
    /// Random outline offset applied to both brushes
    pub brush_wobble: f32,
    /// Height dug cells settle around
    pub dig_depth: f32,
    /// Darkening factor on the shadowed side of a grain
    pub shadow_intensity: f32,
    /// Brightening factor on the lit side of a grain
    pub highlight_intensity: f32,
    pub light_direction: LightDirection,
    /// Color of the highest sand
    pub top_color: [u8; 3],
    /// Color of the lowest sand
    pub bottom_color: [u8; 3],
    pub tine_count: usize,
    /// Fixed tines at each end of the rake
    pub pivot_tine_count: usize,
    /// Heights used to fill and reset the field
    pub seed_distribution: SeedDistribution,
}

impl Default for SandParams {
    fn default() -> Self {
        Self {
            grain_size: 3,
            dig_brush_radius: 10.0,
            reset_brush_radius: 20.0,
            brush_wobble: 3.0,
            dig_depth: 100.0,
            shadow_intensity: 0.8,
            highlight_intensity: 0.4,
            light_direction: LightDirection::Left,
            top_color: [255, 255, 255],
            bottom_color: [0, 0, 0],
            tine_count: 15,
            pivot_tine_count: 5,
            seed_distribution: SeedDistribution::default(),
        }
    }
}

impl SandParams {
    /// Clamp every value into its supported range.
    pub fn sanitize(&mut self) {
        self.grain_size = self.grain_size.clamp(GRAIN_SIZE_RANGE.0, GRAIN_SIZE_RANGE.1);
        self.dig_brush_radius = clamp_f32(self.dig_brush_radius, BRUSH_RADIUS_RANGE);
        self.reset_brush_radius = clamp_f32(self.reset_brush_radius, BRUSH_RADIUS_RANGE);
        self.brush_wobble = clamp_f32(self.brush_wobble, WOBBLE_RANGE);
        self.dig_depth = clamp_f32(self.dig_depth, DIG_DEPTH_RANGE);
        self.shadow_intensity = clamp_f32(self.shadow_intensity, INTENSITY_RANGE);
        self.highlight_intensity = clamp_f32(self.highlight_intensity, INTENSITY_RANGE);
        self.tine_count = self.tine_count.clamp(TINE_COUNT_RANGE.0, TINE_COUNT_RANGE.1);
        self.validate_rake();
    }

    /// Cap the pivots so they can never cover the whole rake.
    pub fn validate_rake(&mut self) {
        let max_pivots = (self.tine_count.saturating_sub(1) / 2).min(MAX_PIVOTS_PER_SIDE);
        self.pivot_tine_count = self.pivot_tine_count.min(max_pivots);
    }

    pub fn set_tine_count(&mut self, count: usize) {
        self.tine_count = count.clamp(TINE_COUNT_RANGE.0, TINE_COUNT_RANGE.1);
        self.validate_rake();
    }

    pub fn set_pivot_tine_count(&mut self, count: usize) {
        self.pivot_tine_count = count;
        self.validate_rake();
    }

    pub fn brush_settings(&self, tool: Tool) -> BrushSettings {
        let radius = match tool {
            Tool::Dig => self.dig_brush_radius,
            Tool::Reset => self.reset_brush_radius,
        };
        BrushSettings {
            radius,
            wobble: self.brush_wobble,
            dig_depth: self.dig_depth,
        }
    }

    pub fn rake_config(&self) -> RakeConfig {
        RakeConfig::new(self.tine_count, self.pivot_tine_count, self.dig_brush_radius)
    }

    pub fn shading(&self) -> ShadingSettings {
        ShadingSettings {
            light: self.light_direction,
            highlight_intensity: self.highlight_intensity,
            shadow_intensity: self.shadow_intensity,
        }
    }

    /// Read parameters from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut params: SandParams = serde_json::from_str(&text).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Invalid config: {}", e))
        })?;
        params.sanitize();
        Ok(params)
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_json()?)
    }

    pub fn to_json(&self) -> io::Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            io::Error::new(io::ErrorKind::Other, format!("Serialization failed: {}", e))
        })
    }
}

fn clamp_f32(value: f32, (lo, hi): (f32, f32)) -> f32 {
    if value.is_nan() {
        lo
    } else {
        value.clamp(lo, hi)
    }
}
