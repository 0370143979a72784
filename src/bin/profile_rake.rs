//! Profiling tool for brushing, raking and repainting

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use karesansui::brush::Tool;
use karesansui::garden::SandGarden;
use karesansui::params::SandParams;

fn main() {
    let canvas = 720;
    let seed = 1337u64;
    let params = SandParams::default();

    println!("=== Performance Profiling ===");
    println!("Canvas: {}x{} px, grain size {}", canvas, canvas, params.grain_size);
    println!();

    // Profile field initialization (includes the first full repaint)
    let start = Instant::now();
    let mut garden = SandGarden::new(canvas, canvas, params, seed);
    let init_time = start.elapsed();
    let (width, height) = (garden.field().width, garden.field().height);
    println!("Field init + first paint: {:?} ({}x{} cells)", init_time, width, height);

    // Profile a full repaint
    let start = Instant::now();
    garden.repaint_all();
    let repaint_time = start.elapsed();
    println!("Full repaint: {:?}", repaint_time);

    // Profile scattered brush applications
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let start = Instant::now();
    let mut removed = 0.0;
    for i in 0..1000 {
        let x = rng.gen_range(0..width as i32);
        let y = rng.gen_range(0..height as i32);
        let tool = if i % 10 == 0 { Tool::Reset } else { Tool::Dig };
        removed += garden.apply_brush(tool, x, y).volume_removed;
    }
    let brush_time = start.elapsed();
    println!("1000 brush applications: {:?}", brush_time);
    println!("  Volume moved to berms: {:.0} units", removed);

    let start = Instant::now();
    garden.render();
    let dirty_time = start.elapsed();
    println!("Dirty repaint: {:?}", dirty_time);

    // Profile a scripted rake drag across the garden
    let start = Instant::now();
    let (cx, cy) = (width as i32 / 2, height as i32 / 2);
    let mut dragged = Duration::ZERO;
    if garden.begin_rake_drag(cx, cy) {
        for step in 1..=60 {
            garden.update_rake_drag(cx, cy + step);
            garden.render();
        }
        garden.end_rake_drag();
        dragged = start.elapsed();
    }
    println!("Rake drag (60 moves): {:?}", dragged);

    // Profile one simulated second of auto-rotation at 60 fps
    let start = Instant::now();
    garden.begin_auto_rotate();
    for _ in 0..60 {
        garden.tick(1.0 / 60.0);
    }
    garden.end_auto_rotate();
    let rotate_time = start.elapsed();
    println!("Auto-rotation (60 ticks): {:?}", rotate_time);

    let total = init_time + repaint_time + brush_time + dirty_time + dragged + rotate_time;
    let pct = |d: Duration| 100.0 * d.as_secs_f64() / total.as_secs_f64();
    println!("\n=== Summary ===");
    println!("Init:          {:>8.2}% ({:?})", pct(init_time), init_time);
    println!("Full repaint:  {:>8.2}% ({:?})", pct(repaint_time), repaint_time);
    println!("Brushing:      {:>8.2}% ({:?})", pct(brush_time), brush_time);
    println!("Dirty repaint: {:>8.2}% ({:?})", pct(dirty_time), dirty_time);
    println!("Rake drag:     {:>8.2}% ({:?})", pct(dragged), dragged);
    println!("Auto-rotation: {:>8.2}% ({:?})", pct(rotate_time), rotate_time);
    println!("─────────────────────────────────");
    println!("TOTAL:         {:>8}  {:?}", "100%", total);
}
