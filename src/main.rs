use std::path::PathBuf;

use clap::Parser;

use karesansui::export;
use karesansui::garden::SandGarden;
use karesansui::palette::{parse_hex_color, to_hex_color};
use karesansui::params::SandParams;
use karesansui::render::LightDirection;
use karesansui::viewer;

#[derive(Parser, Debug)]
#[command(name = "karesansui")]
#[command(about = "Rake a zen sand garden")]
struct Args {
    /// Canvas width in pixels
    #[arg(short = 'W', long, default_value = "720")]
    width: usize,

    /// Canvas height in pixels
    #[arg(short = 'H', long, default_value = "720")]
    height: usize,

    /// Pixels per sand cell (1-6)
    #[arg(short, long)]
    grain_size: Option<usize>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON parameter file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Color of the highest sand, e.g. "#FFFFFF"
    #[arg(long, value_parser = parse_color_arg)]
    top_color: Option<[u8; 3]>,

    /// Color of the lowest sand, e.g. "#000000"
    #[arg(long, value_parser = parse_color_arg)]
    bottom_color: Option<[u8; 3]>,

    /// Light direction: left, right, up or down
    #[arg(long, value_parser = parse_light_arg)]
    light: Option<LightDirection>,

    /// Print the effective parameters as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Render the freshly seeded garden to a PNG and exit
    #[arg(long)]
    export: Option<PathBuf>,
}

fn parse_color_arg(s: &str) -> Result<[u8; 3], String> {
    parse_hex_color(s).ok_or_else(|| format!("expected #RRGGBB, got '{}'", s))
}

fn parse_light_arg(s: &str) -> Result<LightDirection, String> {
    LightDirection::all()
        .iter()
        .copied()
        .find(|d| d.to_string().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("expected left, right, up or down, got '{}'", s))
}

fn main() {
    let args = Args::parse();

    let mut params = match args.config {
        Some(ref path) => match SandParams::load(path) {
            Ok(params) => {
                println!("Loaded parameters from {}", path.display());
                params
            }
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => SandParams::default(),
    };
    if let Some(grain) = args.grain_size {
        params.grain_size = grain;
    }
    if let Some(top) = args.top_color {
        params.top_color = top;
    }
    if let Some(bottom) = args.bottom_color {
        params.bottom_color = bottom;
    }
    if let Some(light) = args.light {
        params.light_direction = light;
    }
    params.sanitize();

    if args.dump_config {
        match params.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize parameters: {}", e),
        }
        return;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    println!("Raking garden with seed: {}", seed);
    println!("Canvas: {}x{} px, grain size {}", args.width, args.height, params.grain_size);
    println!(
        "Palette: {} -> {}, light from {}",
        to_hex_color(params.bottom_color),
        to_hex_color(params.top_color),
        params.light_direction
    );

    let garden = SandGarden::new(args.width, args.height, params, seed);
    println!("Field: {}x{} cells", garden.field().width, garden.field().height);

    if let Some(ref path) = args.export {
        match export::export_png(&garden, path) {
            Ok(()) => println!("Exported garden to: {}", path.display()),
            Err(e) => eprintln!("Failed to export garden: {}", e),
        }
        return;
    }

    if let Err(e) = viewer::run_viewer(garden) {
        eprintln!("Viewer error: {}", e);
    }
}
