//! Demotivator template: a photo in a white frame on black with a two-line
//! caption underneath.

use std::io::Read;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Deserialize;

use crate::canvas::Canvas;
use crate::error::{RenderError, Result};
use crate::page::Composer;
use crate::text::TextStyle;

pub const DM_WIDTH: u32 = 1024;
pub const DM_HEIGHT: u32 = 1150;
const FRAME: (i32, i32, i32, i32) = (62, 62, 961, 961);
const PHOTO_SIZE: u32 = 896;
const PHOTO_ORIGIN: i64 = 64;
const TITLE_Y: f32 = 968.0;
const TEXT_Y: f32 = 1048.0;
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Caption lines under the photo. In a caption pool an entry is either a
/// bare string (title only) or a `[title, text]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "PoolEntry")]
pub struct Caption {
    pub title: String,
    pub text: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PoolEntry {
    Title(String),
    Pair(String, String),
}

impl From<PoolEntry> for Caption {
    fn from(entry: PoolEntry) -> Self {
        match entry {
            PoolEntry::Title(title) => Caption::new(&title, ""),
            PoolEntry::Pair(title, text) => Caption::new(&title, &text),
        }
    }
}

impl Caption {
    pub fn new(title: &str, text: &str) -> Self {
        Caption {
            title: title.to_string(),
            text: text.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.text.is_empty()
    }
}

/// Returns `supplied` unless both of its lines are empty, in which case a
/// random entry of `pool` is used.
pub fn pick_caption<R: Rng + ?Sized>(
    supplied: Caption,
    pool: &[Caption],
    rng: &mut R,
) -> Result<Caption> {
    if !supplied.is_empty() {
        return Ok(supplied);
    }
    pool.choose(rng).cloned().ok_or(RenderError::NoCaption)
}

/// Loads a photo from a file path or an http(s) URL.
pub fn load_photo(source: &str) -> Result<DynamicImage> {
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        let response = ureq::get(source)
            .call()
            .map_err(|e| RenderError::PhotoError(format!("Failed to fetch URL: {}", e)))?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| RenderError::PhotoError(format!("Failed to read response: {}", e)))?;
        bytes
    } else {
        std::fs::read(source).map_err(|e| RenderError::PhotoError(format!("{}: {}", source, e)))?
    };

    image::load_from_memory(&bytes)
        .map_err(|e| RenderError::PhotoError(format!("Failed to decode image: {}", e)))
}

impl Composer {
    pub fn demotivator(&self, photo: &DynamicImage, caption: &Caption) -> Canvas {
        let typography = self.typography();
        let mut canvas = Canvas::new(DM_WIDTH, DM_HEIGHT, BLACK);

        let (x1, y1, x2, y2) = FRAME;
        canvas.fill_rect(x1, y1, x2, y2, WHITE);

        let resized =
            imageops::resize(&photo.to_rgba8(), PHOTO_SIZE, PHOTO_SIZE, FilterType::CatmullRom);
        canvas.paste(&resized, PHOTO_ORIGIN, PHOTO_ORIGIN);

        for (line, style, y) in [
            (&caption.title, TextStyle::DmTitle, TITLE_Y),
            (&caption.text, TextStyle::Dm, TEXT_Y),
        ] {
            let width = typography.text_length(line, style);
            let x = DM_WIDTH as f32 / 2.0 - width / 2.0;
            typography.draw_text(&mut canvas, x, y, line, style, WHITE);
        }
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn supplied_caption_wins() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = vec![Caption::new("из пула", "")];
        let caption = pick_caption(Caption::new("Свой", "текст"), &pool, &mut rng).unwrap();
        assert_eq!(caption, Caption::new("Свой", "текст"));
    }

    #[test]
    fn empty_caption_draws_from_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool: Vec<Caption> = serde_json::from_str(r#"["Один", ["Два", "три"]]"#).unwrap();
        assert_eq!(pool[1], Caption::new("Два", "три"));
        let caption = pick_caption(Caption::default(), &pool, &mut rng).unwrap();
        assert!(pool.contains(&caption));
    }

    #[test]
    fn empty_pool_is_an_error() {
        let mut rng = StdRng::seed_from_u64(7);
        let result = pick_caption(Caption::default(), &[], &mut rng);
        assert!(matches!(result, Err(RenderError::NoCaption)));
    }

    #[test]
    fn photo_sits_inside_white_frame() {
        let composer = Composer::new(crate::text::Typography::embedded().unwrap());
        let red = Rgba([200, 10, 10, 255]);
        let photo = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(40, 30, red));
        let canvas = composer.demotivator(&photo, &Caption::new("Заголовок", "подпись"));

        assert_eq!((canvas.width(), canvas.height()), (DM_WIDTH, DM_HEIGHT));
        assert_eq!(*canvas.image().get_pixel(62, 62), WHITE);
        assert_eq!(*canvas.image().get_pixel(500, 500), red);
        assert_eq!(*canvas.image().get_pixel(10, 10), BLACK);
    }
}
