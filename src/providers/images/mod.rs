//! Raster images: text drawn through a swappable [`ImageGenerator`]
//! (`ico_file`, `jpeg_file`, `png_file`, `webp_file`) and graphic images of
//! random lines (`graphic_*_file`).

pub mod graphic;
pub mod raster;
pub mod wkhtmltoimage;

pub use graphic::GraphicImageFile;
pub use raster::RasterTextGenerator;
pub use wkhtmltoimage::WkhtmltoimageGenerator;

use crate::core::fake::Fake;
use crate::core::template::{TextContent, DEFAULT_IMAGE_MAX_NB_CHARS};
use crate::domain::model::{FileData, RasterFormat, Rendered};
use crate::domain::ports::{FileProvider, ImageGenerator};
use crate::utils::error::Result;
use image::{DynamicImage, ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::sync::Arc;

/// Largest side an ICO image may have.
pub const MAX_ICO_SIDE: u32 = 256;

fn image_format(format: RasterFormat) -> ImageFormat {
    match format {
        RasterFormat::Ico => ImageFormat::Ico,
        RasterFormat::Jpeg => ImageFormat::Jpeg,
        RasterFormat::Png => ImageFormat::Png,
        RasterFormat::Webp => ImageFormat::WebP,
    }
}

/// Encode an RGB canvas. ICO and WebP encoders want an alpha channel.
pub(crate) fn encode(img: RgbImage, format: RasterFormat) -> Result<Vec<u8>> {
    let img = DynamicImage::ImageRgb8(img);
    let img = match format {
        RasterFormat::Ico | RasterFormat::Webp => DynamicImage::ImageRgba8(img.to_rgba8()),
        RasterFormat::Jpeg | RasterFormat::Png => img,
    };

    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, image_format(format))?;
    Ok(cursor.into_inner())
}

fn default_generator() -> Arc<dyn ImageGenerator> {
    Arc::new(RasterTextGenerator::default())
}

/// Image showing generated text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageFile {
    /// Picked by the registry name, never by options.
    #[serde(skip)]
    pub format: RasterFormat,
    #[serde(flatten)]
    pub text: TextContent,
    #[serde(skip, default = "default_generator")]
    pub generator: Arc<dyn ImageGenerator>,
}

impl Default for ImageFile {
    fn default() -> Self {
        Self {
            format: RasterFormat::Png,
            text: TextContent::default(),
            generator: default_generator(),
        }
    }
}

impl ImageFile {
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

    pub fn generator(mut self, generator: impl ImageGenerator + 'static) -> Self {
        self.generator = Arc::new(generator);
        self
    }

    pub fn text(mut self, text: TextContent) -> Self {
        self.text = text;
        self
    }
}

impl FileProvider for ImageFile {
    fn name(&self) -> &'static str {
        match self.format {
            RasterFormat::Ico => "ico_file",
            RasterFormat::Jpeg => "jpeg_file",
            RasterFormat::Png => "png_file",
            RasterFormat::Webp => "webp_file",
        }
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let content = self.text.generate(fake, DEFAULT_IMAGE_MAX_NB_CHARS)?;
        let bytes = self.generator.generate(fake, &content, self.format)?;
        tracing::debug!("{} produced {} bytes", self.generator.name(), bytes.len());

        let mut data = FileData::with_content(content);
        data.insert_extra("generator", self.generator.name());
        data.insert_extra("format", self.format.extension());
        Ok(Rendered::new(bytes, self.format.extension(), data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_image_defaults_to_raster() {
        let provider = ImageFile::png().text(TextContent::new("Hello {{name}}"));
        let rendered = provider.render(&mut Fake::seeded(1)).unwrap();

        assert_eq!(provider.name(), "png_file");
        assert_eq!(rendered.extension, "png");
        assert_eq!(rendered.data.extra["generator"], "raster");
        assert!(rendered.data.content.unwrap().starts_with("Hello "));
        image::load_from_memory_with_format(&rendered.bytes, ImageFormat::Png).unwrap();
    }

    #[test]
    fn test_every_format_encodes() {
        let mut fake = Fake::seeded(2);
        for (provider, magic) in [
            (ImageFile::ico(), &[0u8, 0, 1, 0][..]),
            (ImageFile::jpeg(), &[0xFF, 0xD8, 0xFF][..]),
            (ImageFile::webp(), &b"RIFF"[..]),
        ] {
            let provider = provider.text(TextContent::default().max_nb_chars(300));
            let rendered = provider.render(&mut fake).unwrap();
            assert!(rendered.bytes.starts_with(magic), "{}", provider.name());
        }
    }

    #[test]
    fn test_missing_converter_surfaces() {
        let provider = ImageFile::jpeg()
            .generator(WkhtmltoimageGenerator::with_binary("/nonexistent/wkhtmltoimage-binary"));
        let err = provider.render(&mut Fake::seeded(1)).unwrap_err();
        assert!(matches!(
            err,
            crate::utils::error::FakeFileError::ConverterError { .. }
        ));
    }
}
