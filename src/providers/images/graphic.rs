//! Raster images of random colored lines.

use super::{encode, MAX_ICO_SIDE};
use crate::core::fake::{Fake, Hue, Luminosity};
use crate::domain::model::{FileData, RasterFormat, Rendered};
use crate::domain::ports::FileProvider;
use crate::utils::error::{FakeFileError, Result};
use crate::utils::validation::validate_range;
use image::{Rgb, RgbImage};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_IMAGE_SIZE: (u32, u32) = (256, 256);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicImageFile {
    /// Picked by the registry name, never by options.
    #[serde(skip)]
    pub format: RasterFormat,
    pub size: (u32, u32),
    pub hue: Option<Hue>,
    pub luminosity: Option<Luminosity>,
    /// Number of lines; random in 10..=40 when unset.
    pub lines: Option<usize>,
}

impl Default for GraphicImageFile {
    fn default() -> Self {
        Self {
            format: RasterFormat::Png,
            size: DEFAULT_IMAGE_SIZE,
            hue: None,
            luminosity: None,
            lines: None,
        }
    }
}

impl GraphicImageFile {
    pub fn new(format: RasterFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn ico() -> Self {
        Self::new(RasterFormat::Ico)
    }

    pub fn jpeg() -> Self {
        Self::new(RasterFormat::Jpeg)
    }

    pub fn png() -> Self {
        Self::new(RasterFormat::Png)
    }

    pub fn webp() -> Self {
        Self::new(RasterFormat::Webp)
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn hue(mut self, hue: Hue) -> Self {
        self.hue = Some(hue);
        self
    }

    fn draw(&self, fake: &mut Fake) -> Result<RgbImage> {
        let (width, height) = self.size;
        let hue = self.hue.as_ref();
        let background = fake.color(hue, Some(Luminosity::Light))?;
        let mut img = RgbImage::from_pixel(width, height, Rgb(background));

        let lines = match self.lines {
            Some(lines) => lines,
            None => fake.rng().gen_range(10..=40),
        };
        for _ in 0..lines {
            let color = Rgb(fake.color(hue, self.luminosity)?);
            let from = (
                fake.rng().gen_range(0..width) as i64,
                fake.rng().gen_range(0..height) as i64,
            );
            let to = (
                fake.rng().gen_range(0..width) as i64,
                fake.rng().gen_range(0..height) as i64,
            );
            draw_line(&mut img, from, to, color);
        }
        Ok(img)
    }
}

/// Bresenham line, clipped to the image.
fn draw_line(img: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
            img.put_pixel(x as u32, y as u32, color);
        }
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

impl FileProvider for GraphicImageFile {
    fn name(&self) -> &'static str {
        match self.format {
            RasterFormat::Ico => "graphic_ico_file",
            RasterFormat::Jpeg => "graphic_jpeg_file",
            RasterFormat::Png => "graphic_png_file",
            RasterFormat::Webp => "graphic_webp_file",
        }
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let (width, height) = self.size;
        if width == 0 || height == 0 {
            return Err(FakeFileError::invalid_option("size", "width and height must be positive"));
        }
        if self.format == RasterFormat::Ico {
            validate_range("size", width.max(height), 1, MAX_ICO_SIDE)?;
        }

        let bytes = encode(self.draw(fake)?, self.format)?;

        let mut data = FileData::default();
        data.insert_extra("size", serde_json::json!([width, height]));
        data.insert_extra("format", self.format.extension());
        Ok(Rendered::new(bytes, self.format.extension(), data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;

    #[test]
    fn test_png_dimensions() {
        let rendered = GraphicImageFile::png()
            .size(64, 32)
            .render(&mut Fake::seeded(1))
            .unwrap();
        assert_eq!(rendered.extension, "png");
        let img = image::load_from_memory_with_format(&rendered.bytes, ImageFormat::Png).unwrap();
        assert_eq!((img.width(), img.height()), (64, 32));
    }

    #[test]
    fn test_jpeg_magic() {
        let rendered = GraphicImageFile::jpeg()
            .size(16, 16)
            .render(&mut Fake::seeded(1))
            .unwrap();
        assert_eq!(&rendered.bytes[..3], &[0xFF, 0xD8, 0xFF]);
        assert_eq!(rendered.extension, "jpg");
    }

    #[test]
    fn test_ico_and_webp_encode() {
        let ico = GraphicImageFile::ico().size(32, 32).render(&mut Fake::seeded(1)).unwrap();
        assert_eq!(&ico.bytes[..4], &[0, 0, 1, 0]);

        let webp = GraphicImageFile::webp().size(32, 32).render(&mut Fake::seeded(1)).unwrap();
        assert_eq!(&webp.bytes[..4], b"RIFF");
        assert_eq!(&webp.bytes[8..12], b"WEBP");
    }

    #[test]
    fn test_ico_side_limit() {
        let result = GraphicImageFile::ico().size(300, 16).render(&mut Fake::seeded(1));
        assert!(matches!(result, Err(FakeFileError::InvalidConfigValueError { .. })));
    }

    #[test]
    fn test_hue_from_options() {
        for hue in [serde_json::json!(120), serde_json::json!([90, 150]), serde_json::json!("green")] {
            let provider: GraphicImageFile =
                serde_json::from_value(serde_json::json!({"size": [8, 8], "hue": hue})).unwrap();
            assert!(provider.render(&mut Fake::seeded(4)).is_ok());
        }

        let provider = GraphicImageFile::png().size(8, 8).hue(Hue::Named("teal-ish".to_string()));
        assert!(matches!(
            provider.render(&mut Fake::seeded(4)),
            Err(FakeFileError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_draw_line_clips() {
        let mut img = RgbImage::new(4, 4);
        draw_line(&mut img, (-2, -2), (10, 10), Rgb([255, 0, 0]));
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(img.get_pixel(3, 3), &Rgb([255, 0, 0]));
        assert_eq!(img.get_pixel(3, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_names_follow_format() {
        assert_eq!(GraphicImageFile::webp().name(), "graphic_webp_file");
        assert_eq!(GraphicImageFile::jpeg().name(), "graphic_jpeg_file");
    }
}
