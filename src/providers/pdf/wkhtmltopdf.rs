use crate::core::fake::Fake;
use crate::domain::ports::PdfGenerator;
use crate::providers::converter;
use crate::providers::markup::html_document;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Renders the text as HTML and converts it with an external `wkhtmltopdf`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WkhtmltopdfGenerator {
    pub binary: PathBuf,
    pub encoding: String,
    pub extra_args: Vec<String>,
}

impl Default for WkhtmltopdfGenerator {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("wkhtmltopdf"),
            encoding: "utf-8".to_string(),
            extra_args: Vec::new(),
        }
    }
}

impl WkhtmltopdfGenerator {
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            ..Self::default()
        }
    }
}

impl PdfGenerator for WkhtmltopdfGenerator {
    fn name(&self) -> &'static str {
        "wkhtmltopdf"
    }

    fn generate(&self, _fake: &mut Fake, text: &str) -> Result<Vec<u8>> {
        let work_dir = tempfile::tempdir()?;
        let input = work_dir.path().join("input.html");
        let output = work_dir.path().join("output.pdf");
        fs::write(&input, html_document(text, &self.encoding))?;

        let tool = self.binary.to_string_lossy().into_owned();
        converter::run(
            &tool,
            Command::new(&self.binary)
                .arg("--quiet")
                .arg("--encoding")
                .arg(&self.encoding)
                .args(&self.extra_args)
                .arg(&input)
                .arg(&output),
        )?;
        Ok(fs::read(&output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FakeFileError;

    #[test]
    fn test_missing_binary_is_converter_error() {
        let generator = WkhtmltopdfGenerator::with_binary("/nonexistent/wkhtmltopdf-binary");
        let err = generator.generate(&mut Fake::seeded(1), "text").unwrap_err();
        assert!(matches!(err, FakeFileError::ConverterError { .. }));
    }
}
