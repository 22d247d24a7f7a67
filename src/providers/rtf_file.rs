use crate::core::fake::Fake;
use crate::core::template::{TextContent, DEFAULT_TEXT_MAX_NB_CHARS};
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::FileProvider;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RtfFile {
    #[serde(flatten)]
    pub text: TextContent,
}

/// RTF control characters are escaped; non-ASCII goes out as `\uN?`.
fn escape_rtf(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\n' => out.push_str("\\par\n"),
            c if c.is_ascii() => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{}?", *unit as i16));
                }
            }
        }
    }
    out
}

impl FileProvider for RtfFile {
    fn name(&self) -> &'static str {
        "rtf_file"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let content = self.text.generate(fake, DEFAULT_TEXT_MAX_NB_CHARS)?;
        let document = format!(
            "{{\\rtf1\\ansi\\deff0{{\\fonttbl{{\\f0 Helvetica;}}}}\\f0\\fs24\n{}\n}}",
            escape_rtf(&content)
        );
        Ok(Rendered::new(
            document.into_bytes(),
            "rtf",
            FileData::with_content(content),
        ))
    }
}
