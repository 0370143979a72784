//! Padded height field holding the sand surface.
//!
//! The grid stores one extra cell on every side of the visible area so that
//! shading and brushing always find a neighbor at the edges. Callers work in
//! logical coordinates; the padding ring is addressed as `-1` and `width` /
//! `height` and is never drawn.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Lowest storable height.
pub const MIN_HEIGHT: f32 = 0.0;
/// Highest storable height.
pub const MAX_HEIGHT: f32 = 255.0;

/// Heights a freshly raked garden is built from.
pub const INITIAL_HEIGHT_PALETTE: [f32; 7] = [80.0, 100.0, 120.0, 140.0, 160.0, 180.0, 200.0];

/// Distribution used to seed the field and to restore it with the reset tool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SeedDistribution {
    /// Pick from a list of heights, biased toward the middle entries.
    Palette(Vec<f32>),
    /// Every sample has the same height.
    Constant(f32),
}

impl Default for SeedDistribution {
    fn default() -> Self {
        SeedDistribution::Palette(INITIAL_HEIGHT_PALETTE.to_vec())
    }
}

impl SeedDistribution {
    /// Draw one height.
    pub fn sample(&self, rng: &mut ChaCha8Rng) -> f32 {
        match self {
            SeedDistribution::Palette(heights) => {
                centered_index(heights.len(), rng).map_or(MIN_HEIGHT, |i| heights[i])
            }
            SeedDistribution::Constant(h) => h.clamp(MIN_HEIGHT, MAX_HEIGHT),
        }
    }
}

/// Average of three uniform draws scaled to an index.
/// Cheap bell-ish bias toward the middle of the list, not a real Gaussian.
/// None for an empty list.
pub fn centered_index(len: usize, rng: &mut ChaCha8Rng) -> Option<usize> {
    const DRAWS: usize = 3;
    if len == 0 {
        return None;
    }
    let sum: f32 = (0..DRAWS).map(|_| rng.gen::<f32>()).sum();
    let normalized = sum / DRAWS as f32;
    Some(((normalized * len as f32) as usize).min(len - 1))
}

/// Scalar height grid with a one-cell border.
#[derive(Clone, Debug)]
pub struct HeightField {
    /// Visible width in cells
    pub width: usize,
    /// Visible height in cells
    pub height: usize,
    data: Vec<f32>,
}

impl HeightField {
    /// Flat field at height zero.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![MIN_HEIGHT; (width + 2) * (height + 2)],
        }
    }

    /// Build a field and fill every cell, padding included, from `seed`.
    pub fn seeded(width: usize, height: usize, seed: &SeedDistribution, rng: &mut ChaCha8Rng) -> Self {
        let mut field = Self::new(width, height);
        field.initialize(seed, rng);
        field
    }

    /// Refill every stored cell from the distribution.
    pub fn initialize(&mut self, seed: &SeedDistribution, rng: &mut ChaCha8Rng) {
        for h in self.data.iter_mut() {
            *h = seed.sample(rng);
        }
    }

    fn stride(&self) -> usize {
        self.width + 2
    }

    /// Physical index for a logical coordinate, or None outside the padded grid.
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        Some((y + 1) as usize * self.stride() + (x + 1) as usize)
    }

    /// True if the cell exists in storage (visible area or padding ring).
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= -1 && y >= -1 && x <= self.width as i32 && y <= self.height as i32
    }

    /// True if the cell is part of the visible area.
    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Write a height. Coordinates outside the padded grid are ignored.
    pub fn set(&mut self, x: i32, y: i32, value: f32) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = value;
        }
    }

    /// Add to a height without clamping; call `clamp` once accumulation is done.
    pub fn add(&mut self, x: i32, y: i32, amount: f32) {
        if let Some(i) = self.index(x, y) {
            self.data[i] += amount;
        }
    }

    /// Force the stored value back into [0, 255].
    pub fn clamp(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = self.data[i].clamp(MIN_HEIGHT, MAX_HEIGHT);
        }
    }

    /// Every stored height, padding included.
    pub fn values(&self) -> &[f32] {
        &self.data
    }

    /// Iterate over visible cells with their logical coordinates.
    pub fn iter_visible(&self) -> impl Iterator<Item = (i32, i32, f32)> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| (x, y)))
            .filter_map(move |(x, y)| self.get(x, y).map(|h| (x, y, h)))
    }

    /// Sum of all stored heights, padding included.
    pub fn total_volume(&self) -> f64 {
        self.data.iter().map(|&h| h as f64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_padding_is_addressable() {
        let mut field = HeightField::new(4, 3);
        assert!(field.contains(-1, -1));
        assert!(field.contains(4, 3));
        assert!(!field.contains(5, 0));
        assert!(!field.is_visible(-1, 0));
        assert!(field.is_visible(3, 2));

        field.set(-1, 3, 42.0);
        assert_eq!(field.get(-1, 3), Some(42.0));
        assert_eq!(field.values().len(), 6 * 5);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut field = HeightField::new(4, 4);
        field.set(-2, 0, 10.0);
        field.add(0, 9, 10.0);
        field.clamp(100, 100);
        assert_eq!(field.get(-2, 0), None);
        assert_eq!(field.total_volume(), 0.0);
    }

    #[test]
    fn test_clamp_bounds() {
        let mut field = HeightField::new(2, 2);
        field.set(0, 0, 300.0);
        field.set(1, 1, -12.0);
        field.clamp(0, 0);
        field.clamp(1, 1);
        assert_eq!(field.get(0, 0), Some(MAX_HEIGHT));
        assert_eq!(field.get(1, 1), Some(MIN_HEIGHT));
    }

    #[test]
    fn test_seeded_uses_palette_values() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let field = HeightField::seeded(16, 16, &SeedDistribution::default(), &mut rng);
        for &h in field.values() {
            assert!(INITIAL_HEIGHT_PALETTE.contains(&h), "unexpected height {}", h);
        }
    }

    #[test]
    fn test_centered_index_prefers_middle() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut counts = [0usize; 7];
        for _ in 0..7000 {
            counts[centered_index(7, &mut rng).unwrap()] += 1;
        }
        assert!(counts[3] > counts[0] * 3);
        assert!(counts[3] > counts[6] * 3);
    }

    #[test]
    fn test_empty_palette_falls_back_to_floor() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert_eq!(centered_index(0, &mut rng), None);
        assert_eq!(centered_index(1, &mut rng), Some(0));
        assert_eq!(SeedDistribution::Palette(Vec::new()).sample(&mut rng), MIN_HEIGHT);
    }

    #[test]
    fn test_constant_distribution() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let field = HeightField::seeded(3, 3, &SeedDistribution::Constant(150.0), &mut rng);
        assert!(field.iter_visible().all(|(_, _, h)| h == 150.0));
        assert_eq!(field.iter_visible().count(), 9);
    }
}
