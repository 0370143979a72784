use std::error::Error;
use std::path::Path;
use std::time::Instant;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::brush::Tool;
use crate::export;
use crate::garden::SandGarden;
use crate::rake::is_pivot_tine;
use crate::render::{pack_rgb, FrameBuffer};

const CENTER_TINE_COLOR: [u8; 3] = [200, 0, 0];
const PIVOT_TINE_COLOR: [u8; 3] = [0, 180, 0];
const TINE_COLOR: [u8; 3] = [0, 0, 0];
const TINE_OUTLINE_COLOR: [u8; 3] = [255, 255, 255];

/// Pointer bookkeeping between frames.
#[derive(Default)]
struct PointerState {
    drawing: bool,
    tool: Tool,
    last_cell: (i32, i32),
    left_was_down: bool,
    right_was_down: bool,
}

/// Run the interactive garden until the window closes or Escape is pressed.
pub fn run_viewer(mut garden: SandGarden) -> Result<(), Box<dyn Error>> {
    let width = garden.frame().width;
    let height = garden.frame().height;

    let mut window = Window::new(
        "Karesansui - LMB: Dig, RMB: Reset, K: Rake, R: Reset, S: Save, Esc: Exit",
        width,
        height,
        WindowOptions {
            resize: false,
            scale: minifb::Scale::X1,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(60);

    println!("Viewer started. Controls:");
    println!("  Left drag:  dig");
    println!("  Right drag: reset sand");
    println!("  K: toggle rake mode (drag a tine; right-click the red tine to spin)");
    println!("  H / V: rake horizontal / vertical");
    println!("  L: cycle light direction");
    println!("  R: reset field");
    println!("  S: save PNG");
    println!("  Esc: exit");

    let mut pointer = PointerState::default();
    let mut rake_mode = false;
    let mut display = FrameBuffer::new(width, height);
    let mut last_frame = Instant::now();

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;

        let grain = garden.params().grain_size as f32;
        let mouse = window.get_mouse_pos(MouseMode::Pass);
        let cell = mouse.map(|(mx, my)| ((mx / grain).floor() as i32, (my / grain).floor() as i32));

        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            garden.reset_field();
            println!("Field reset");
        }
        if window.is_key_pressed(Key::S, KeyRepeat::No) {
            let filename = export::timestamped_filename();
            match export::export_png(&garden, Path::new(&filename)) {
                Ok(()) => println!("Saved {}", filename),
                Err(e) => eprintln!("Failed to save {}: {}", filename, e),
            }
        }
        if window.is_key_pressed(Key::K, KeyRepeat::No) {
            rake_mode = !rake_mode;
            if rake_mode {
                if let Some((x, y)) = cell {
                    garden.place_rake(x, y);
                }
            }
            println!("Rake mode: {}", if rake_mode { "on" } else { "off" });
        }
        if window.is_key_pressed(Key::H, KeyRepeat::No) {
            garden.rake_horizontal();
        }
        if window.is_key_pressed(Key::V, KeyRepeat::No) {
            garden.rake_vertical();
        }
        if window.is_key_pressed(Key::L, KeyRepeat::No) {
            let light = garden.params().light_direction.next();
            garden.set_light_direction(light);
            println!("Light: {}", light);
        }

        let left = window.get_mouse_down(MouseButton::Left);
        let right = window.get_mouse_down(MouseButton::Right);
        let left_pressed = left && !pointer.left_was_down;
        let right_pressed = right && !pointer.right_was_down;
        pointer.left_was_down = left;
        pointer.right_was_down = right;

        if let Some((x, y)) = cell {
            if !pointer.drawing && (left_pressed || right_pressed) {
                press(&mut garden, &mut pointer, rake_mode, left_pressed, (x, y), width, height);
            } else if pointer.drawing && (left || right) && (x, y) != pointer.last_cell {
                if rake_mode {
                    if !garden.rake().is_auto_rotating() {
                        garden.update_rake_drag(x, y);
                    }
                } else {
                    let (lx, ly) = pointer.last_cell;
                    pointer.tool = if left { Tool::Dig } else { Tool::Reset };
                    garden.trace_line(lx, ly, x, y, pointer.tool);
                }
                pointer.last_cell = (x, y);
            }
        }

        if !left && !right && pointer.drawing {
            pointer.drawing = false;
            garden.end_rake_drag();
        }

        garden.tick(dt);

        display.pixels.copy_from_slice(&garden.frame().pixels);
        if rake_mode {
            draw_rake_overlay(&garden, &mut display);
        }

        window.update_with_buffer(&display.pixels, width, height)?;
    }

    Ok(())
}

fn press(
    garden: &mut SandGarden,
    pointer: &mut PointerState,
    rake_mode: bool,
    left: bool,
    cell: (i32, i32),
    width: usize,
    height: usize,
) {
    let (x, y) = cell;
    pointer.last_cell = cell;

    if rake_mode {
        match garden.rake_tine_at(x, y) {
            Some(0) if !left => {
                garden.begin_auto_rotate();
                pointer.drawing = true;
            }
            Some(_) if left => {
                pointer.drawing = garden.begin_rake_drag(x, y);
            }
            _ => {}
        }
        return;
    }

    let grain = garden.params().grain_size as i32;
    let inside = x >= 0 && y >= 0 && x * grain < width as i32 && y * grain < height as i32;
    if inside {
        pointer.tool = if left { Tool::Dig } else { Tool::Reset };
        garden.apply_brush(pointer.tool, x, y);
        pointer.drawing = true;
    }
}

/// Tine markers: center red, pivots green, the rest black.
fn draw_rake_overlay(garden: &SandGarden, display: &mut FrameBuffer) {
    let config = garden.rake_config();
    let grain = garden.params().grain_size as f64;
    let tines = garden.rake().tine_positions(&config);
    let radius = grain * 2.5;

    for (i, tine) in tines.iter().enumerate() {
        let fill = if i == tines.len() / 2 {
            CENTER_TINE_COLOR
        } else if is_pivot_tine(i, tines.len(), config.pivots_per_side) {
            PIVOT_TINE_COLOR
        } else {
            TINE_COLOR
        };
        draw_dot(display, tine.x * grain, tine.y * grain, radius, fill);
    }
}

fn draw_dot(display: &mut FrameBuffer, cx: f64, cy: f64, radius: f64, fill: [u8; 3]) {
    let outline = radius + 2.0;
    let x0 = (cx - outline).floor().max(0.0) as usize;
    let y0 = (cy - outline).floor().max(0.0) as usize;
    let x1 = ((cx + outline).ceil().max(0.0) as usize).min(display.width);
    let y1 = ((cy + outline).ceil().max(0.0) as usize).min(display.height);

    for py in y0..y1 {
        for px in x0..x1 {
            let dx = px as f64 + 0.5 - cx;
            let dy = py as f64 + 0.5 - cy;
            let d = (dx * dx + dy * dy).sqrt();
            let color = if d <= radius {
                fill
            } else if d <= outline {
                TINE_OUTLINE_COLOR
            } else {
                continue;
            };
            display.pixels[py * display.width + px] = pack_rgb(color);
        }
    }
}
