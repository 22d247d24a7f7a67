use super::{encode, MAX_ICO_SIDE};
use crate::core::fake::Fake;
use crate::domain::model::RasterFormat;
use crate::domain::ports::ImageGenerator;
use crate::providers::converter;
use crate::providers::markup::html_document;
use crate::utils::error::Result;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Renders the text as HTML and converts it with an external `wkhtmltoimage`.
///
/// The tool always writes PNG; other formats are re-encoded in process, and
/// ICO output is scaled down to fit 256x256.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WkhtmltoimageGenerator {
    pub binary: PathBuf,
    pub encoding: String,
    /// Viewport width in pixels.
    pub width: u32,
    pub extra_args: Vec<String>,
}

impl Default for WkhtmltoimageGenerator {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("wkhtmltoimage"),
            encoding: "utf-8".to_string(),
            width: 1024,
            extra_args: Vec::new(),
        }
    }
}

impl WkhtmltoimageGenerator {
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            ..Self::default()
        }
    }
}

fn convert(png: &[u8], format: RasterFormat) -> Result<Vec<u8>> {
    if format == RasterFormat::Png {
        return Ok(png.to_vec());
    }
    let mut img = image::load_from_memory(png)?;
    if format == RasterFormat::Ico && img.width().max(img.height()) > MAX_ICO_SIDE {
        img = img.resize(MAX_ICO_SIDE, MAX_ICO_SIDE, FilterType::Triangle);
    }
    encode(img.to_rgb8(), format)
}

impl ImageGenerator for WkhtmltoimageGenerator {
    fn name(&self) -> &'static str {
        "wkhtmltoimage"
    }

    fn generate(&self, _fake: &mut Fake, text: &str, format: RasterFormat) -> Result<Vec<u8>> {
        let work_dir = tempfile::tempdir()?;
        let input = work_dir.path().join("input.html");
        let output = work_dir.path().join("output.png");
        fs::write(&input, html_document(text, &self.encoding))?;

        let tool = self.binary.to_string_lossy().into_owned();
        converter::run(
            &tool,
            Command::new(&self.binary)
                .arg("--quiet")
                .arg("--encoding")
                .arg(&self.encoding)
                .arg("--format")
                .arg("png")
                .arg("--width")
                .arg(self.width.to_string())
                .args(&self.extra_args)
                .arg(&input)
                .arg(&output),
        )?;
        convert(&fs::read(&output)?, format)
    }
}
