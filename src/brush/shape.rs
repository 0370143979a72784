//! Irregular radial brush outline.

use std::f32::consts::PI;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Number of outline vertices used by the brush.
pub const WOBBLE_VERTICES: usize = 12;

/// One radius per evenly spaced angle, interpolated linearly in between.
#[derive(Clone, Debug, PartialEq)]
pub struct WobblyShape {
    radii: Vec<f32>,
}

impl WobblyShape {
    /// Each vertex gets `base_radius` plus a uniform offset in [-fluctuation, fluctuation).
    pub fn generate(base_radius: f32, fluctuation: f32, vertex_count: usize, rng: &mut ChaCha8Rng) -> Self {
        let radii = (0..vertex_count.max(1))
            .map(|_| base_radius + (rng.gen::<f32>() - 0.5) * 2.0 * fluctuation)
            .collect();
        Self { radii }
    }

    /// None when `radii` is empty.
    pub fn from_radii(radii: Vec<f32>) -> Option<Self> {
        (!radii.is_empty()).then_some(Self { radii })
    }

    pub fn radii(&self) -> &[f32] {
        &self.radii
    }

    /// Offset direction whose interpolated radius is exactly vertex `i`.
    pub fn vertex_direction(&self, i: usize) -> (f32, f32) {
        let angle = 2.0 * PI * i as f32 / self.radii.len() as f32 - PI;
        (angle.cos(), angle.sin())
    }

    /// Outline radius in the direction of offset (dx, dy).
    ///
    /// The angle `atan2(dy, dx) + PI` lands in [0, 2PI] and is spread over the
    /// vertices; the last segment wraps back to vertex 0 so the outline is closed.
    pub fn interpolated_radius(&self, dx: f32, dy: f32) -> f32 {
        let n = self.radii.len();
        let angle = dy.atan2(dx) + PI;
        let float_index = angle / (2.0 * PI) * n as f32;
        let floor = float_index.floor();
        let i0 = (floor as usize) % n;
        let i1 = (i0 + 1) % n;
        let blend = float_index - floor;
        self.radii[i0] * (1.0 - blend) + self.radii[i1] * blend
    }
}
