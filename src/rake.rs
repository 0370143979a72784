//! Rake kinematics
//!
//! A rake is a straight row of tines rotated by `angle` around `center`.
//! Tines are addressed two ways: array index `0..n` (as returned by
//! [`tine_positions`]) and signed index `-half..=half` relative to the center
//! tine (used while dragging).
//!
//! Dragging the center tine slides the rake along its normal. Dragging any
//! other tine rotates the whole rake about the mirrored tine, which stays put.

use std::f64::consts::PI;
use std::ops::{Add, Mul, Sub};

/// Tine spacing as a multiple of the dig brush radius.
pub const TINE_SPACING_FACTOR: f64 = 1.5;

/// Auto-rotation rate in radians per second.
pub const AUTO_ROTATE_SPEED: f64 = PI;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance_sq(self, other: Point) -> f64 {
        let d = self - other;
        d.dot(d)
    }

    /// Rotate counter-clockwise (in grid space, y down) by `angle` radians.
    pub fn rotate(self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Nearest grid cell.
    pub fn cell(self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, s: f64) -> Point {
        Point::new(self.x * s, self.y * s)
    }
}

/// Tine layout taken from the current parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RakeConfig {
    pub tine_count: usize,
    pub pivots_per_side: usize,
    /// Distance between neighbouring tines in cells
    pub spacing: f64,
}

impl RakeConfig {
    pub fn new(tine_count: usize, pivots_per_side: usize, dig_radius: f32) -> Self {
        Self {
            tine_count,
            pivots_per_side,
            spacing: dig_radius as f64 * TINE_SPACING_FACTOR,
        }
    }

    pub fn half(&self) -> usize {
        self.tine_count / 2
    }

    /// Tines actually laid out: `-half..=half`, so even counts round up by one.
    pub fn effective_count(&self) -> usize {
        2 * self.half() + 1
    }

    /// Array index of a tine given its signed index.
    pub fn array_index(&self, tine: i32) -> usize {
        (tine + self.half() as i32) as usize
    }

    /// Array index of the tine opposite `tine` across the center.
    pub fn mirrored_index(&self, tine: i32) -> usize {
        (self.effective_count() - 1) - self.array_index(tine)
    }
}

/// Tine positions for a pose, ordered from `-half` to `+half`.
pub fn tine_positions(center: Point, angle: f64, config: &RakeConfig) -> Vec<Point> {
    let half = config.half() as i32;
    let axis = Point::new(angle.cos(), angle.sin());
    (-half..=half)
        .map(|i| center + axis * (i as f64 * config.spacing))
        .collect()
}

/// True for the `pivots_per_side` tines at either end; never for the center tine.
pub fn is_pivot_tine(index: usize, total: usize, pivots_per_side: usize) -> bool {
    if index == total / 2 {
        return false;
    }
    index < pivots_per_side || index >= total.saturating_sub(pivots_per_side)
}

/// Pose captured when a tine is grabbed.
#[derive(Clone, Debug, PartialEq)]
pub struct RakeSnapshot {
    pub center: Point,
    pub angle: f64,
    pub tines: Vec<Point>,
    /// Pointer position at grab time
    pub grab_point: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    /// Signed index of the grabbed tine
    pub tine: i32,
    pub initial: RakeSnapshot,
    /// Tine positions after the previous move
    pub last_tines: Vec<Point>,
    /// Layout the grab was made with
    pub config: RakeConfig,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum RakeState {
    #[default]
    Idle,
    Dragging(DragState),
    AutoRotating,
}

/// Segment a digging tine travelled during one update.
pub type TineStroke = (Point, Point);

/// Work out the new pose from the grab snapshot and the pointer position.
pub fn solve_drag(initial: &RakeSnapshot, tine: i32, pointer: Point, config: &RakeConfig) -> (Point, f64) {
    if tine == 0 {
        let normal = Point::new(-initial.angle.sin(), initial.angle.cos());
        let along = (pointer - initial.grab_point).dot(normal);
        return (initial.center + normal * along, initial.angle);
    }

    let pivot = initial.tines[config.mirrored_index(tine)];
    let grabbed = initial.tines[config.array_index(tine)];
    let from = grabbed - pivot;
    let to = pointer - pivot;
    let delta = to.y.atan2(to.x) - from.y.atan2(from.x);

    let center = pivot + (initial.center - pivot).rotate(delta);
    (center, initial.angle + delta)
}

/// Strokes for every tine that is not a pivot.
fn digging_strokes(last: &[Point], current: &[Point], config: &RakeConfig) -> Vec<TineStroke> {
    let total = current.len();
    last.iter()
        .zip(current.iter())
        .enumerate()
        .filter(|(i, _)| !is_pivot_tine(*i, total, config.pivots_per_side))
        .map(|(_, (&from, &to))| (from, to))
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rake {
    pub center: Point,
    pub angle: f64,
    pub state: RakeState,
}

impl Rake {
    pub fn new(center: Point) -> Self {
        Self { center, angle: 0.0, state: RakeState::Idle }
    }

    pub fn tine_positions(&self, config: &RakeConfig) -> Vec<Point> {
        tine_positions(self.center, self.angle, config)
    }

    /// Signed index of the tine under `point`. When several are in reach the
    /// highest index wins.
    pub fn tine_at(&self, point: Point, grab_radius: f64, config: &RakeConfig) -> Option<i32> {
        let half = config.half() as i32;
        self.tine_positions(config)
            .iter()
            .enumerate()
            .filter(|(_, p)| p.distance_sq(point) < grab_radius * grab_radius)
            .map(|(i, _)| i as i32 - half)
            .last()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, RakeState::Dragging(_))
    }

    pub fn is_auto_rotating(&self) -> bool {
        matches!(self.state, RakeState::AutoRotating)
    }

    pub fn begin_drag(&mut self, tine: i32, grab_point: Point, config: &RakeConfig) {
        let tines = self.tine_positions(config);
        self.state = RakeState::Dragging(DragState {
            tine,
            initial: RakeSnapshot {
                center: self.center,
                angle: self.angle,
                tines: tines.clone(),
                grab_point,
            },
            last_tines: tines,
            config: *config,
        });
    }

    /// Move the grabbed tine toward `pointer`. Returns the strokes the
    /// digging tines made, or None when nothing is grabbed. A layout change
    /// since the grab drops the tine.
    pub fn drag_to(&mut self, pointer: Point, config: &RakeConfig) -> Option<Vec<TineStroke>> {
        let RakeState::Dragging(drag) = &self.state else {
            return None;
        };
        if drag.config != *config {
            self.state = RakeState::Idle;
            return None;
        }
        let (center, angle) = solve_drag(&drag.initial, drag.tine, pointer, config);
        self.center = center;
        self.angle = angle;

        let current = self.tine_positions(config);
        let strokes = digging_strokes(&drag.last_tines, &current, config);
        if let RakeState::Dragging(drag) = &mut self.state {
            drag.last_tines = current;
        }
        Some(strokes)
    }

    pub fn begin_auto_rotate(&mut self) {
        self.state = RakeState::AutoRotating;
    }

    /// Back to idle, whatever was going on.
    pub fn release(&mut self) {
        self.state = RakeState::Idle;
    }

    /// Advance auto-rotation by `dt` seconds. Returns the digging strokes,
    /// or None when not auto-rotating.
    pub fn advance(&mut self, dt: f64, config: &RakeConfig) -> Option<Vec<TineStroke>> {
        if !self.is_auto_rotating() {
            return None;
        }
        let before = self.tine_positions(config);
        self.angle += AUTO_ROTATE_SPEED * dt;
        let after = self.tine_positions(config);
        Some(digging_strokes(&before, &after, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn config() -> RakeConfig {
        RakeConfig::new(5, 1, 2.0)
    }

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
    }

    #[test]
    fn test_tines_symmetric_at_angle_zero() {
        let cfg = RakeConfig::new(7, 2, 4.0);
        let center = Point::new(50.0, 40.0);
        let tines = tine_positions(center, 0.0, &cfg);
        assert_eq!(tines.len(), 7);
        assert_eq!(tines[3], center);
        for i in 0..3 {
            let left = tines[i];
            let right = tines[6 - i];
            assert!((left.y - center.y).abs() < EPS && (right.y - center.y).abs() < EPS);
            assert!(((center.x - left.x) - (right.x - center.x)).abs() < EPS);
        }
        assert!((tines[4].x - tines[3].x - 6.0).abs() < EPS);
    }

    #[test]
    fn test_even_count_rounds_up() {
        let cfg = RakeConfig::new(4, 1, 2.0);
        assert_eq!(cfg.effective_count(), 5);
        assert_eq!(tine_positions(Point::default(), 0.0, &cfg).len(), 5);
    }

    #[test]
    fn test_pivot_tines() {
        let pivots: Vec<bool> = (0..5).map(|i| is_pivot_tine(i, 5, 1)).collect();
        assert_eq!(pivots, vec![true, false, false, false, true]);
        assert!(!is_pivot_tine(7, 15, 7));
        assert!(is_pivot_tine(6, 15, 7));
        assert!((0..15).all(|i| !is_pivot_tine(i, 15, 0)));
    }

    #[test]
    fn test_center_drag_along_rake_does_nothing() {
        let cfg = config();
        let mut rake = Rake::new(Point::new(20.0, 20.0));
        rake.begin_drag(0, Point::new(20.0, 20.0), &cfg);
        rake.drag_to(Point::new(23.0, 20.0), &cfg);
        assert!(close(rake.center, Point::new(20.0, 20.0)));
        assert_eq!(rake.angle, 0.0);
    }

    #[test]
    fn test_center_drag_across_rake_translates() {
        let cfg = config();
        let mut rake = Rake::new(Point::new(20.0, 20.0));
        rake.begin_drag(0, Point::new(20.0, 20.0), &cfg);
        rake.drag_to(Point::new(25.0, 24.0), &cfg);
        assert!(close(rake.center, Point::new(20.0, 24.0)));
    }

    #[test]
    fn test_end_drag_rotates_about_mirrored_tine() {
        let cfg = config();
        let mut rake = Rake::new(Point::new(20.0, 20.0));
        let start = rake.tine_positions(&cfg);
        let pivot = start[0];
        let grabbed = start[4];
        rake.begin_drag(2, grabbed, &cfg);

        // Swing the far end a quarter turn around the pivot
        let radius = grabbed.x - pivot.x;
        rake.drag_to(Point::new(pivot.x, pivot.y + radius), &cfg);

        assert!((rake.angle - PI / 2.0).abs() < 1e-9);
        let after = rake.tine_positions(&cfg);
        assert!(close(after[0], pivot));
        assert!(close(after[4], Point::new(pivot.x, pivot.y + radius)));
    }

    #[test]
    fn test_pivot_never_moves() {
        let cfg = RakeConfig::new(9, 2, 3.0);
        for tine in [-4, -3, -1, 1, 2, 4] {
            let mut rake = Rake::new(Point::new(60.0, 60.0));
            rake.angle = 0.3;
            let start = rake.tine_positions(&cfg);
            let pivot = start[cfg.mirrored_index(tine)];
            rake.begin_drag(tine, start[cfg.array_index(tine)], &cfg);
            for step in 0..20 {
                let t = step as f64 * 0.37;
                rake.drag_to(Point::new(60.0 + 25.0 * t.cos(), 60.0 + 25.0 * t.sin()), &cfg);
                let now = rake.tine_positions(&cfg);
                assert!(close(now[cfg.mirrored_index(tine)], pivot), "tine {} step {}", tine, step);
            }
        }
    }

    #[test]
    fn test_drag_strokes_skip_pivots() {
        let cfg = config();
        let mut rake = Rake::new(Point::new(20.0, 20.0));
        rake.begin_drag(0, Point::new(20.0, 20.0), &cfg);
        let strokes = rake.drag_to(Point::new(20.0, 26.0), &cfg).unwrap();
        assert_eq!(strokes.len(), 3);
        for (from, to) in strokes {
            assert!((to.y - from.y - 6.0).abs() < EPS);
            assert!((to.x - from.x).abs() < EPS);
        }
    }

    #[test]
    fn test_tine_at_returns_signed_index() {
        let cfg = config();
        let rake = Rake::new(Point::new(20.0, 20.0));
        assert_eq!(rake.tine_at(Point::new(20.0, 20.0), 1.0, &cfg), Some(0));
        assert_eq!(rake.tine_at(Point::new(26.0, 20.5), 1.0, &cfg), Some(2));
        assert_eq!(rake.tine_at(Point::new(14.0, 20.0), 1.0, &cfg), Some(-2));
        assert_eq!(rake.tine_at(Point::new(20.0, 30.0), 1.0, &cfg), None);
    }

    #[test]
    fn test_layout_change_drops_grabbed_tine() {
        let cfg = RakeConfig::new(15, 5, 10.0);
        let mut rake = Rake::new(Point::new(200.0, 200.0));
        let start = rake.tine_positions(&cfg);
        rake.begin_drag(7, start[14], &cfg);

        let fewer = RakeConfig::new(5, 2, 10.0);
        assert!(rake.drag_to(Point::new(start[14].x, start[14].y + 5.0), &fewer).is_none());
        assert_eq!(rake.state, RakeState::Idle);
        assert_eq!(rake.center, Point::new(200.0, 200.0));
        assert_eq!(rake.angle, 0.0);
    }

    #[test]
    fn test_point_operators() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, -3.0);
        assert_eq!(a + b, Point::new(5.0, -1.0));
        assert_eq!(b - a, Point::new(3.0, -5.0));
        assert_eq!(a * 2.5, Point::new(2.5, 5.0));
        assert_eq!(a.distance_sq(b), 34.0);
    }

    #[test]
    fn test_state_transitions() {
        let cfg = config();
        let mut rake = Rake::new(Point::new(20.0, 20.0));
        assert!(rake.drag_to(Point::new(1.0, 1.0), &cfg).is_none());
        assert!(rake.advance(0.1, &cfg).is_none());

        rake.begin_auto_rotate();
        assert!(rake.is_auto_rotating());
        let strokes = rake.advance(0.5, &cfg).unwrap();
        assert_eq!(strokes.len(), 3);
        assert!((rake.angle - PI / 2.0).abs() < 1e-9);

        rake.release();
        assert_eq!(rake.state, RakeState::Idle);
    }
}
