use crate::core::fake::Fake;
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::FileProvider;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BIN_LENGTH: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinFile {
    pub length: usize,
    /// Used verbatim when set.
    pub content: Option<Vec<u8>>,
}

impl Default for BinFile {
    fn default() -> Self {
        Self {
            length: DEFAULT_BIN_LENGTH,
            content: None,
        }
    }
}

impl BinFile {
    pub fn with_length(length: usize) -> Self {
        Self {
            length,
            content: None,
        }
    }

    pub fn with_content(content: impl Into<Vec<u8>>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }
}

impl FileProvider for BinFile {
    fn name(&self) -> &'static str {
        "bin_file"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let bytes = match &self.content {
            Some(content) => content.clone(),
            None => fake.bytes(self.length),
        };
        let mut data = FileData::default();
        data.insert_extra("length", bytes.len());
        Ok(Rendered::new(bytes, "bin", data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_length() {
        let rendered = BinFile::default().render(&mut Fake::seeded(1)).unwrap();
        assert_eq!(rendered.bytes.len(), DEFAULT_BIN_LENGTH);
        assert_eq!(rendered.data.extra["length"], DEFAULT_BIN_LENGTH);
    }

    #[test]
    fn test_given_content() {
        let rendered = BinFile::with_content(b"Lorem ipsum".to_vec())
            .render(&mut Fake::seeded(1))
            .unwrap();
        assert_eq!(rendered.bytes, b"Lorem ipsum");
    }
}
