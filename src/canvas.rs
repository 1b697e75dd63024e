//! Raster render target.

use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

use image::{imageops, ImageFormat, Rgba, RgbaImage};
use log::info;
use uuid::Uuid;

use crate::error::Result;

/// RGBA canvas exclusively owned by one render call.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Canvas {
            image: RgbaImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Composites `color` over the pixel at `(x, y)`, scaled by `coverage`.
    /// Points outside the canvas are clipped.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.image.width() || y as u32 >= self.image.height() {
            return;
        }
        let alpha = coverage.clamp(0.0, 1.0) * color[3] as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }

        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        let Rgba([r, g, b, a]) = *pixel;
        let mix =
            |src: u8, dst: u8| (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8;
        *pixel = Rgba([
            mix(color[0], r),
            mix(color[1], g),
            mix(color[2], b),
            (alpha * 255.0 + a as f32 * (1.0 - alpha)).round() as u8,
        ]);
    }

    /// One-pixel horizontal rule from `x1` to `x2` inclusive.
    pub fn hline(&mut self, x1: f32, x2: f32, y: f32, color: Rgba<u8>) {
        let y = y.round() as i32;
        for x in x1.round() as i32..=x2.round() as i32 {
            self.blend_pixel(x, y, color, 1.0);
        }
    }

    /// Fills the rectangle spanned by two inclusive corners.
    pub fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba<u8>) {
        for y in y1..=y2 {
            for x in x1..=x2 {
                self.blend_pixel(x, y, color, 1.0);
            }
        }
    }

    /// Copies `source` over the canvas with its top-left corner at `(x, y)`.
    pub fn paste(&mut self, source: &RgbaImage, x: i64, y: i64) {
        imageops::replace(&mut self.image, source, x, y);
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Cursor::new(Vec::new());
        self.image.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    /// Writes the canvas; the format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = ImageFormat::from_path(path)?;
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.image.write_to(&mut writer, format)?;
        info!(
            "saved {}x{} image to {}",
            self.image.width(),
            self.image.height(),
            path.display()
        );
        Ok(())
    }
}

/// Random file name for renders whose caller gave no output path, so
/// concurrent renders never share a file.
pub fn random_file_name(extension: &str) -> String {
    format!("{}.{}", Uuid::new_v4().simple(), extension)
}
