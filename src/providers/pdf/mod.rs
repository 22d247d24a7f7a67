//! PDF documents. Bytes come from a swappable [`PdfGenerator`].

pub mod minimal;
pub mod wkhtmltopdf;

pub use minimal::{MinimalPdfGenerator, Snippet};
pub use wkhtmltopdf::WkhtmltopdfGenerator;

use crate::core::fake::Fake;
use crate::core::template::{TextContent, DEFAULT_TEXT_MAX_NB_CHARS};
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::{FileProvider, PdfGenerator};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

fn default_generator() -> Arc<dyn PdfGenerator> {
    Arc::new(MinimalPdfGenerator::default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfFile {
    #[serde(flatten)]
    pub text: TextContent,
    #[serde(skip, default = "default_generator")]
    pub generator: Arc<dyn PdfGenerator>,
}

impl Default for PdfFile {
    fn default() -> Self {
        Self {
            text: TextContent::default(),
            generator: default_generator(),
        }
    }
}

impl PdfFile {
    pub fn with_generator(generator: impl PdfGenerator + 'static) -> Self {
        Self {
            generator: Arc::new(generator),
            ..Self::default()
        }
    }
}

impl FileProvider for PdfFile {
    fn name(&self) -> &'static str {
        "pdf_file"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let content = self.text.generate(fake, DEFAULT_TEXT_MAX_NB_CHARS)?;
        let bytes = self.generator.generate(fake, &content)?;
        tracing::debug!("{} produced {} bytes", self.generator.name(), bytes.len());

        let mut data = FileData::with_content(content);
        data.insert_extra("generator", self.generator.name());
        Ok(Rendered::new(bytes, "pdf", data))
    }
}
