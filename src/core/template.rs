use crate::core::fake::Fake;
use crate::utils::error::{FakeFileError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_TEXT_MAX_NB_CHARS: usize = 10_000;
pub const DEFAULT_IMAGE_MAX_NB_CHARS: usize = 5_000;
pub const DEFAULT_AUDIO_MAX_NB_CHARS: usize = 500;

pub const DEFAULT_TEXT_CONTENT_TEMPLATE: &str = "\
{{date}} {{city}}, {{country}}

Hello {{name}},

{{text}} {{text}} {{text}}

{{text}} {{text}} {{text}}

{{text}} {{text}} {{text}}

Address: {{address}}

Best regards,

{{name}}
{{address}}
{{phone_number}}
";

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{\s*([a-z0-9_]+)\s*\}\}").expect("static pattern"))
}

fn token_value(fake: &mut Fake, token: &str) -> Result<Option<String>> {
    let value = match token {
        "word" => fake.word(),
        "sentence" => fake.sentence(),
        "paragraph" => fake.paragraph(),
        "text" => fake.text(200)?,
        "name" => fake.name(),
        "first_name" => fake.first_name(),
        "last_name" => fake.last_name(),
        "email" => fake.email(),
        "address" => fake.address(),
        "street_address" => fake.street_address(),
        "postcode" => fake.postcode(),
        "city" => fake.city(),
        "country" => fake.country(),
        "company" => fake.company(),
        "url" => fake.url(),
        "date" => fake.date().format("%Y-%m-%d").to_string(),
        "date_time" => fake.date_time().to_rfc3339(),
        "year" => fake.date().format("%Y").to_string(),
        "isbn13" => fake.isbn13(),
        "uuid4" => fake.hex_token(32),
        "pyint" => fake.int(0, 9999).to_string(),
        "phone_number" => format!(
            "+{} {} {}",
            fake.int(1, 99),
            fake.int(100, 999),
            fake.int(100_000, 999_999)
        ),
        _ => return Ok(None),
    };
    Ok(Some(value))
}

/// Replace every `{{token}}` in `template` with a fresh fake value.
pub fn render(fake: &mut Fake, template: &str) -> Result<String> {
    let re = token_regex();
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in re.captures_iter(template) {
        let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = token_value(fake, token.as_str())?.ok_or_else(|| FakeFileError::TemplateError {
            template: template.chars().take(60).collect(),
            message: format!("unknown token '{}'", token.as_str()),
        })?;
        out.push_str(&template[last..whole.start()]);
        out.push_str(&value);
        last = whole.end();
    }
    out.push_str(&template[last..]);
    Ok(out)
}

/// Text options shared by every provider whose file carries readable text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextContent {
    pub max_nb_chars: Option<usize>,
    pub wrap_chars_after: Option<usize>,
    /// Template; may contain `{{token}}` placeholders.
    pub content: Option<String>,
}

impl TextContent {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn max_nb_chars(mut self, max_nb_chars: usize) -> Self {
        self.max_nb_chars = Some(max_nb_chars);
        self
    }

    pub fn wrap_chars_after(mut self, wrap_chars_after: usize) -> Self {
        self.wrap_chars_after = Some(wrap_chars_after);
        self
    }

    pub fn generate(&self, fake: &mut Fake, default_max_nb_chars: usize) -> Result<String> {
        let text = match &self.content {
            Some(template) => render(fake, template)?,
            None => fake.text(self.max_nb_chars.unwrap_or(default_max_nb_chars))?,
        };

        Ok(match self.wrap_chars_after {
            Some(width) if width > 0 => textwrap::fill(&text, width),
            _ => text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_tokens() {
        let mut fake = Fake::seeded(11);
        let out = render(&mut fake, "Dear {{name}}, see {{ url }}.").unwrap();
        assert!(out.starts_with("Dear "));
        assert!(!out.contains("{{"));
        assert!(out.contains("https://"));
        assert!(out.ends_with('.'));
    }

    #[test]
    fn test_render_unknown_token_fails() {
        let mut fake = Fake::seeded(11);
        let err = render(&mut fake, "{{does_not_exist}}").unwrap_err();
        assert!(matches!(err, FakeFileError::TemplateError { .. }));
    }

    #[test]
    fn test_render_keeps_plain_text() {
        let mut fake = Fake::seeded(11);
        assert_eq!(render(&mut fake, "Lorem ipsum").unwrap(), "Lorem ipsum");
    }

    #[test]
    fn test_default_template_renders() {
        let mut fake = Fake::seeded(5);
        let out = render(&mut fake, DEFAULT_TEXT_CONTENT_TEMPLATE).unwrap();
        assert!(out.contains("Best regards"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_text_content_wraps() {
        let mut fake = Fake::seeded(9);
        let text = TextContent::default()
            .max_nb_chars(2_000)
            .wrap_chars_after(40)
            .generate(&mut fake, DEFAULT_TEXT_MAX_NB_CHARS)
            .unwrap();
        assert!(text.lines().all(|line| line.chars().count() <= 40));
    }

    #[test]
    fn test_text_content_uses_default_limit() {
        let mut fake = Fake::seeded(9);
        let text = TextContent::default()
            .generate(&mut fake, DEFAULT_AUDIO_MAX_NB_CHARS)
            .unwrap();
        assert!(text.chars().count() <= DEFAULT_AUDIO_MAX_NB_CHARS);
    }
}
