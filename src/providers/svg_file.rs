use crate::core::fake::Fake;
use crate::core::template::{TextContent, DEFAULT_IMAGE_MAX_NB_CHARS};
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::FileProvider;
use crate::providers::markup::escape;
use crate::utils::error::Result;
use crate::utils::validation::validate_positive_number;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

const LINE_HEIGHT: u32 = 18;
const DEFAULT_WRAP: usize = 60;

/// SVG image showing the text, one `<text>` element per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SvgFile {
    pub width: u32,
    pub height: u32,
    #[serde(flatten)]
    pub text: TextContent,
}

impl Default for SvgFile {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            text: TextContent::default(),
        }
    }
}

impl FileProvider for SvgFile {
    fn name(&self) -> &'static str {
        "svg_file"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        validate_positive_number("width", self.width as usize, 1)?;
        validate_positive_number("height", self.height as usize, 1)?;

        let content = self.text.generate(fake, DEFAULT_IMAGE_MAX_NB_CHARS)?;
        let wrapped = if self.text.wrap_chars_after.is_some() {
            content.clone()
        } else {
            textwrap::fill(&content, DEFAULT_WRAP)
        };

        let mut svg = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n\
             <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n",
            w = self.width,
            h = self.height
        );
        for (i, line) in wrapped.lines().enumerate() {
            let y = LINE_HEIGHT * (i as u32 + 1);
            let _ = writeln!(
                svg,
                "<text x=\"10\" y=\"{}\" font-family=\"Helvetica\" font-size=\"14\">{}</text>",
                y,
                escape(line)
            );
        }
        svg.push_str("</svg>\n");

        Ok(Rendered::new(
            svg.into_bytes(),
            "svg",
            FileData::with_content(content),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_lines() {
        let provider = SvgFile {
            text: TextContent::new("one & two\nthree"),
            ..SvgFile::default()
        };
        let rendered = provider.render(&mut Fake::seeded(1)).unwrap();
        let svg = String::from_utf8(rendered.bytes).unwrap();
        assert_eq!(svg.matches("<text ").count(), 2);
        assert!(svg.contains("one &amp; two"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_zero_width_rejected() {
        let provider = SvgFile {
            width: 0,
            ..SvgFile::default()
        };
        assert!(provider.render(&mut Fake::seeded(1)).is_err());
    }
}
