//! Sand brushes
//!
//! Two tools share one footprint:
//! - **Dig**: lowers the inner disk toward the configured depth band and piles
//!   the removed sand in the surrounding ring, so the total volume is kept.
//! - **Reset**: re-seeds the inner disk from the initial height distribution.
//!
//! The outer edge of the footprint is a [`WobblyShape`], the inner edge a
//! plain circle at half the base radius.

pub mod line;
pub mod shape;

pub use line::{line_cells, trace_line};
pub use shape::{WobblyShape, WOBBLE_VERTICES};

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::heightfield::{HeightField, SeedDistribution, MAX_HEIGHT, MIN_HEIGHT};
use crate::region::Rect;

/// Half-width of the band dug cells settle into around the dig depth.
pub const DIG_BAND: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Dig,
    Reset,
}

/// Geometry and depth for a single brush application.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushSettings {
    /// Base outer radius in cells
    pub radius: f32,
    /// Maximum random offset of each outline vertex
    pub wobble: f32,
    /// Center of the band dug cells are pulled toward
    pub dig_depth: f32,
}

impl BrushSettings {
    pub fn inner_radius(&self) -> f32 {
        self.radius.max(0.0) / 2.0
    }

    /// Half-side of the square that can contain the wobbled outline.
    pub fn reach(&self) -> i32 {
        (self.radius.max(0.0) + self.wobble.max(0.0)).ceil() as i32
    }
}

/// What one application did to the field.
#[derive(Clone, Debug, PartialEq)]
pub struct BrushStats {
    /// Cells rewritten inside the inner disk
    pub core_cells: usize,
    /// Cells that received redistributed sand
    pub ring_cells: usize,
    /// Height removed from the core (dig only, negative if the core rose)
    pub volume_removed: f64,
    /// Height added to the ring
    pub volume_deposited: f64,
    /// Area needing a repaint, one cell wider than the footprint
    pub bounds: Rect,
}

/// Apply `tool` centered on (cx, cy).
///
/// Cells outside the padded grid are skipped. The ring only takes part when
/// its total weight is positive.
pub fn apply_brush(
    field: &mut HeightField,
    tool: Tool,
    cx: i32,
    cy: i32,
    settings: &BrushSettings,
    seed: &SeedDistribution,
    rng: &mut ChaCha8Rng,
) -> BrushStats {
    let inner = settings.inner_radius();
    let inner_sq = inner * inner;
    let reach = settings.reach();
    let outline = WobblyShape::generate(settings.radius.max(0.0), settings.wobble.max(0.0), WOBBLE_VERTICES, rng);

    let mut core: Vec<(i32, i32, f32)> = Vec::new();
    let mut ring: Vec<(i32, i32, f32)> = Vec::new();
    let mut total_weight = 0.0f32;
    let mut removed = 0.0f64;

    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let outer = outline.interpolated_radius(dx as f32, dy as f32);
            let dist_sq = (dx * dx + dy * dy) as f32;
            if dist_sq > outer * outer {
                continue;
            }

            let (x, y) = (cx + dx, cy + dy);
            let Some(old) = field.get(x, y) else {
                continue;
            };
            let dist = dist_sq.sqrt();

            if dist_sq <= inner_sq {
                let new = match tool {
                    Tool::Dig => dig_height(old, dist, inner, settings.dig_depth, rng),
                    Tool::Reset => seed.sample(rng),
                }
                .clamp(MIN_HEIGHT, MAX_HEIGHT);

                if tool == Tool::Dig {
                    removed += (old - new) as f64;
                }
                core.push((x, y, new));
            } else {
                let ring_width = outer - inner;
                if ring_width > 0.0 {
                    let weight = 1.0 - (dist - inner) / ring_width;
                    if weight > 0.0 {
                        ring.push((x, y, weight));
                        total_weight += weight;
                    }
                }
            }
        }
    }

    for &(x, y, new) in &core {
        field.set(x, y, new);
    }

    let mut deposited = 0.0f64;
    if !ring.is_empty() && total_weight > 0.0 {
        for &(x, y, weight) in &ring {
            let share = removed * (weight / total_weight) as f64;
            field.add(x, y, share as f32);
            deposited += share;
        }
    }

    for &(x, y, _) in core.iter().chain(ring.iter()) {
        field.clamp(x, y);
    }

    BrushStats {
        core_cells: core.len(),
        ring_cells: ring.len(),
        volume_removed: removed,
        volume_deposited: deposited,
        bounds: Rect::around(cx, cy, reach, 1),
    }
}

/// Pull a core cell toward a random height in the dig band.
/// Cells already below the band are left alone.
fn dig_height(old: f32, dist: f32, inner_radius: f32, dig_depth: f32, rng: &mut ChaCha8Rng) -> f32 {
    let floor = dig_depth - DIG_BAND;
    if old < floor {
        return old;
    }
    let falloff = if inner_radius > 0.0 { 1.0 - dist / inner_radius } else { 1.0 };
    let target = floor + rng.gen::<f32>() * 2.0 * DIG_BAND;
    old * (1.0 - falloff) + target * falloff
}
