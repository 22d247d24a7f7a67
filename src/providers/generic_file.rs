use crate::core::fake::Fake;
use crate::core::template::render;
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::FileProvider;
use crate::utils::error::Result;
use crate::utils::validation::validate_extension;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenericContent {
    /// Template, may contain `{{token}}` placeholders.
    Text(String),
    Bytes(Vec<u8>),
}

/// Any content under any extension, e.g. an HTML page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericFile {
    pub content: GenericContent,
    pub extension: String,
}

impl GenericFile {
    pub fn text(content: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            content: GenericContent::Text(content.into()),
            extension: extension.into(),
        }
    }

    pub fn bytes(content: impl Into<Vec<u8>>, extension: impl Into<String>) -> Self {
        Self {
            content: GenericContent::Bytes(content.into()),
            extension: extension.into(),
        }
    }
}

impl FileProvider for GenericFile {
    fn name(&self) -> &'static str {
        "generic_file"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        validate_extension("extension", &self.extension)?;

        let (bytes, data) = match &self.content {
            GenericContent::Text(template) => {
                let content = render(fake, template)?;
                (content.clone().into_bytes(), FileData::with_content(content))
            }
            GenericContent::Bytes(bytes) => (bytes.clone(), FileData::default()),
        };
        Ok(Rendered::new(bytes, self.extension.clone(), data))
    }
}
