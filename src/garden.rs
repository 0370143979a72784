//! The sand garden: one owner for all simulation state.
//!
//! Input glue calls into [`SandGarden`] with grid coordinates; every edit
//! grows the dirty region, and [`SandGarden::render`] (or `tick`) repaints
//! only that region into the frame buffer.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::brush::{self, line_cells, BrushStats, Tool};
use crate::heightfield::HeightField;
use crate::palette::{ColorPalette, PALETTE_STEPS};
use crate::params::SandParams;
use crate::rake::{Point, Rake, RakeConfig, TineStroke};
use crate::region::{DirtyRegion, Rect};
use crate::render::{self, FrameBuffer, LightDirection};

pub struct SandGarden {
    params: SandParams,
    field: HeightField,
    palette: ColorPalette,
    rake: Rake,
    dirty: DirtyRegion,
    frame: FrameBuffer,
    rng: ChaCha8Rng,
    seed: u64,
}

impl SandGarden {
    /// Garden filling a canvas of the given pixel size.
    pub fn new(canvas_width: usize, canvas_height: usize, mut params: SandParams, seed: u64) -> Self {
        params.sanitize();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (width, height) = grid_size(canvas_width, canvas_height, params.grain_size);
        let field = HeightField::seeded(width, height, &params.seed_distribution, &mut rng);
        let palette = ColorPalette::generate(params.top_color, params.bottom_color, PALETTE_STEPS);

        let mut garden = Self {
            rake: Rake::new(grid_center(&field)),
            field,
            palette,
            dirty: DirtyRegion::new(),
            frame: FrameBuffer::new(canvas_width, canvas_height),
            rng,
            seed,
            params,
        };
        garden.repaint_all();
        garden
    }

    /// Garden with an exact grid size; the canvas is sized to fit.
    pub fn with_grid(width: usize, height: usize, params: SandParams, seed: u64) -> Self {
        let grain = params.grain_size.clamp(1, crate::params::GRAIN_SIZE_RANGE.1);
        Self::new(width * grain, height * grain, params, seed)
    }

    pub fn params(&self) -> &SandParams {
        &self.params
    }

    pub fn field(&self) -> &HeightField {
        &self.field
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    pub fn rake(&self) -> &Rake {
        &self.rake
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn dirty_region(&self) -> Option<Rect> {
        self.dirty.rect()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rake_config(&self) -> RakeConfig {
        self.params.rake_config()
    }

    // ------------------------------------------------------------------
    // Brushing
    // ------------------------------------------------------------------

    pub fn apply_brush(&mut self, tool: Tool, x: i32, y: i32) -> BrushStats {
        let settings = self.params.brush_settings(tool);
        let stats = brush::apply_brush(
            &mut self.field,
            tool,
            x,
            y,
            &settings,
            &self.params.seed_distribution,
            &mut self.rng,
        );
        self.dirty.grow(stats.bounds);
        stats
    }

    /// Brush every cell on the line between two points. Returns the number
    /// of applications.
    pub fn trace_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, tool: Tool) -> usize {
        let cells = line_cells(x0, y0, x1, y1);
        for &(x, y) in &cells {
            self.apply_brush(tool, x, y);
        }
        cells.len()
    }

    fn dig_strokes(&mut self, strokes: &[TineStroke]) {
        for &(from, to) in strokes {
            let (x0, y0) = from.cell();
            let (x1, y1) = to.cell();
            self.trace_line(x0, y0, x1, y1, Tool::Dig);
        }
    }

    // ------------------------------------------------------------------
    // Rake
    // ------------------------------------------------------------------

    /// Signed index of the tine within grab reach of a cell.
    pub fn rake_tine_at(&self, x: i32, y: i32) -> Option<i32> {
        let grab_radius = self.params.dig_brush_radius as f64;
        self.rake.tine_at(Point::new(x as f64, y as f64), grab_radius, &self.rake_config())
    }

    /// Grab the tine under the pointer. Returns false if none is in reach.
    pub fn begin_rake_drag(&mut self, x: i32, y: i32) -> bool {
        let Some(tine) = self.rake_tine_at(x, y) else {
            return false;
        };
        let config = self.rake_config();
        self.rake.begin_drag(tine, Point::new(x as f64, y as f64), &config);
        true
    }

    /// Move the grabbed tine; digging tines furrow the sand on the way.
    pub fn update_rake_drag(&mut self, x: i32, y: i32) -> bool {
        let config = self.rake_config();
        match self.rake.drag_to(Point::new(x as f64, y as f64), &config) {
            Some(strokes) => {
                self.dig_strokes(&strokes);
                true
            }
            None => false,
        }
    }

    /// Pointer released: drop the tine and stop any auto-rotation.
    pub fn end_rake_drag(&mut self) {
        self.rake.release();
    }

    pub fn begin_auto_rotate(&mut self) {
        self.rake.begin_auto_rotate();
    }

    pub fn end_auto_rotate(&mut self) {
        if self.rake.is_auto_rotating() {
            self.rake.release();
        }
    }

    pub fn place_rake(&mut self, x: i32, y: i32) {
        self.rake.center = Point::new(x as f64, y as f64);
    }

    pub fn set_rake_angle(&mut self, angle: f64) {
        self.rake.angle = angle;
    }

    pub fn rake_horizontal(&mut self) {
        self.set_rake_angle(0.0);
    }

    pub fn rake_vertical(&mut self) {
        self.set_rake_angle(std::f64::consts::FRAC_PI_2);
    }

    // ------------------------------------------------------------------
    // Frame
    // ------------------------------------------------------------------

    /// Advance auto-rotation by `dt` seconds and repaint what changed.
    pub fn tick(&mut self, dt: f64) -> Option<Rect> {
        let config = self.rake_config();
        if let Some(strokes) = self.rake.advance(dt, &config) {
            self.dig_strokes(&strokes);
        }
        self.render()
    }

    /// Repaint the dirty region and clear it.
    pub fn render(&mut self) -> Option<Rect> {
        let region = self.dirty.take()?;
        render::render_region(
            &self.field,
            &self.palette,
            &self.params.shading(),
            self.params.grain_size,
            Some(region),
            &mut self.frame,
        )
    }

    pub fn repaint_all(&mut self) {
        self.dirty = DirtyRegion::new();
        render::render_region(
            &self.field,
            &self.palette,
            &self.params.shading(),
            self.params.grain_size,
            None,
            &mut self.frame,
        );
    }

    // ------------------------------------------------------------------
    // Whole-field changes
    // ------------------------------------------------------------------

    /// Re-seed every cell and re-center the rake.
    pub fn reset_field(&mut self) {
        self.field.initialize(&self.params.seed_distribution, &mut self.rng);
        self.rake.center = grid_center(&self.field);
        self.repaint_all();
    }

    pub fn regenerate_palette(&mut self, top: [u8; 3], bottom: [u8; 3]) {
        self.params.top_color = top;
        self.params.bottom_color = bottom;
        self.palette = ColorPalette::generate(top, bottom, PALETTE_STEPS);
        self.repaint_all();
    }

    pub fn set_light_direction(&mut self, light: LightDirection) {
        self.params.light_direction = light;
        self.repaint_all();
    }

    /// Change the canvas size; the field is rebuilt to match.
    pub fn resize(&mut self, canvas_width: usize, canvas_height: usize) {
        self.frame = FrameBuffer::new(canvas_width, canvas_height);
        self.rebuild_field();
    }

    pub fn set_grain_size(&mut self, grain_size: usize) {
        let mut params = self.params.clone();
        params.grain_size = grain_size;
        self.update_params(params);
    }

    /// Swap in new parameters, rebuilding whatever depends on the ones that changed.
    pub fn update_params(&mut self, mut params: SandParams) {
        params.sanitize();
        let old = std::mem::replace(&mut self.params, params);
        let old_rake = old.rake_config();

        if old.top_color != self.params.top_color || old.bottom_color != self.params.bottom_color {
            self.palette = ColorPalette::generate(self.params.top_color, self.params.bottom_color, PALETTE_STEPS);
        }
        if old_rake != self.rake_config() {
            self.rake.release();
        }
        if old.grain_size != self.params.grain_size {
            self.rebuild_field();
        } else {
            self.repaint_all();
        }
    }

    fn rebuild_field(&mut self) {
        let (width, height) = grid_size(self.frame.width, self.frame.height, self.params.grain_size);
        self.field = HeightField::seeded(width, height, &self.params.seed_distribution, &mut self.rng);
        self.rake.center = grid_center(&self.field);
        self.rake.release();
        self.frame.pixels.fill(0);
        self.repaint_all();
    }
}

/// Visible cells needed to cover a canvas.
fn grid_size(canvas_width: usize, canvas_height: usize, grain_size: usize) -> (usize, usize) {
    let grain = grain_size.max(1);
    (canvas_width.div_ceil(grain), canvas_height.div_ceil(grain))
}

fn grid_center(field: &HeightField) -> Point {
    Point::new(field.width as f64 / 2.0, field.height as f64 / 2.0)
}
