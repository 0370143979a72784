use std::path::Path;

use chrono::Local;
use image::{ImageBuffer, Rgb, RgbImage};

use crate::garden::SandGarden;
use crate::render::shade_cell;

/// One pixel per visible cell: the canvas downsampled by the grain size.
pub fn render_cell_image(garden: &SandGarden) -> RgbImage {
    let field = garden.field();
    let shading = garden.params().shading();
    let mut img: RgbImage = ImageBuffer::new(field.width as u32, field.height as u32);

    for (x, y, _) in field.iter_visible() {
        let color = shade_cell(field, garden.palette(), &shading, x, y);
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }

    img
}

/// Save the current garden as a PNG.
pub fn export_png(garden: &SandGarden, path: &Path) -> Result<(), image::ImageError> {
    render_cell_image(garden).save(path)
}

/// `karesansui_YYYYMMDD_HHMMSS.png` for the current local time.
pub fn timestamped_filename() -> String {
    format!("karesansui_{}.png", Local::now().format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightfield::SeedDistribution;
    use crate::params::SandParams;
    use crate::render::unpack_rgb;

    #[test]
    fn test_cell_image_matches_frame() {
        let garden = SandGarden::with_grid(12, 9, SandParams::default(), 21);
        let img = render_cell_image(&garden);
        assert_eq!(img.dimensions(), (12, 9));

        let grain = garden.params().grain_size;
        let frame = garden.frame();
        for (x, y, pixel) in img.enumerate_pixels() {
            let fx = x as usize * grain;
            let fy = y as usize * grain;
            assert_eq!(unpack_rgb(frame.pixels[fy * frame.width + fx]), pixel.0);
        }
    }

    #[test]
    fn test_export_writes_png() {
        let params = SandParams {
            seed_distribution: SeedDistribution::Constant(128.0),
            ..Default::default()
        };
        let garden = SandGarden::with_grid(8, 8, params, 2);
        let path = std::env::temp_dir().join(format!("karesansui_export_{}.png", std::process::id()));
        export_png(&garden, &path).unwrap();
        let loaded = image::open(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.width(), 8);
        assert_eq!(loaded.height(), 8);
    }

    #[test]
    fn test_timestamped_filename_shape() {
        let name = timestamped_filename();
        assert!(name.starts_with("karesansui_"));
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), "karesansui_20250101_120000.png".len());
    }
}
