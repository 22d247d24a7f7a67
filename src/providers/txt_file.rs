use crate::core::fake::Fake;
use crate::core::template::{TextContent, DEFAULT_TEXT_MAX_NB_CHARS};
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::FileProvider;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TxtFile {
    #[serde(flatten)]
    pub text: TextContent,
}

impl TxtFile {
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            text: TextContent::new(content),
        }
    }
}

impl FileProvider for TxtFile {
    fn name(&self) -> &'static str {
        "txt_file"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let content = self.text.generate(fake, DEFAULT_TEXT_MAX_NB_CHARS)?;
        Ok(Rendered::new(
            content.clone().into_bytes(),
            "txt",
            FileData::with_content(content),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_respects_max_nb_chars() {
        let provider = TxtFile {
            text: TextContent::default().max_nb_chars(100),
        };
        let rendered = provider.render(&mut Fake::seeded(1)).unwrap();
        assert_eq!(rendered.extension, "txt");
        assert!(rendered.bytes.len() <= 100);
        assert_eq!(rendered.data.content.unwrap().as_bytes(), &rendered.bytes[..]);
    }

    #[test]
    fn test_txt_rejects_limit_below_minimum() {
        let provider = TxtFile {
            text: TextContent::default().max_nb_chars(2),
        };
        let err = provider.render(&mut Fake::seeded(1)).unwrap_err();
        assert!(matches!(err, crate::utils::error::FakeFileError::InvalidOption { .. }));
    }

    #[test]
    fn test_txt_from_options() {
        let provider: TxtFile = serde_json::from_value(serde_json::json!({
            "content": "{{name}}",
            "wrap_chars_after": 40
        }))
        .unwrap();
        assert_eq!(provider.text.wrap_chars_after, Some(40));
        let rendered = provider.render(&mut Fake::seeded(1)).unwrap();
        assert!(String::from_utf8(rendered.bytes).unwrap().contains(' '));
    }
}
