//! RFC 5322 messages with a text body and attachments built from inner files.

use crate::core::fake::Fake;
use crate::core::inner::{compose, inner_data, ArchiveOptions};
use crate::core::template::{render, TextContent, DEFAULT_TEXT_MAX_NB_CHARS};
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::FileProvider;
use crate::utils::error::Result;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

const LINE_WIDTH: usize = 76;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmlFile {
    pub to: String,
    pub from: String,
    pub subject: String,
    #[serde(flatten)]
    pub text: TextContent,
    #[serde(flatten)]
    pub attachments: ArchiveOptions,
}

impl Default for EmlFile {
    fn default() -> Self {
        Self {
            to: "{{email}}".to_string(),
            from: "{{email}}".to_string(),
            subject: "{{sentence}}".to_string(),
            text: TextContent::default(),
            attachments: ArchiveOptions::default(),
        }
    }
}

impl EmlFile {
    pub fn new(attachments: ArchiveOptions) -> Self {
        Self {
            attachments,
            ..Self::default()
        }
    }
}

pub fn mime_type(name: &str) -> &'static str {
    let extension = name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    match extension.as_str() {
        "txt" => "text/plain",
        "csv" => "text/csv",
        "xml" => "application/xml",
        "svg" => "image/svg+xml",
        "rtf" => "application/rtf",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "mp3" => "audio/mpeg",
        "zip" => "application/zip",
        "tar" => "application/x-tar",
        "gz" => "application/gzip",
        "eml" => "message/rfc822",
        "epub" => "application/epub+zip",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "odt" => "application/vnd.oasis.opendocument.text",
        "ods" => "application/vnd.oasis.opendocument.spreadsheet",
        _ => "application/octet-stream",
    }
}

/// Header value, as an RFC 2047 encoded word when it is not plain ASCII.
fn header_value(value: &str) -> String {
    if value.is_ascii() && !value.contains(['\r', '\n']) {
        value.to_string()
    } else {
        format!("=?utf-8?b?{}?=", STANDARD.encode(value))
    }
}

fn base64_lines(bytes: &[u8]) -> String {
    let encoded = STANDARD.encode(bytes);
    encoded
        .as_bytes()
        .chunks(LINE_WIDTH)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join("\r\n")
}

impl FileProvider for EmlFile {
    fn name(&self) -> &'static str {
        "eml_file"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let to = render(fake, &self.to)?;
        let from = render(fake, &self.from)?;
        let subject = render(fake, &self.subject)?;
        let content = self.text.generate(fake, DEFAULT_TEXT_MAX_NB_CHARS)?;
        let members = compose(fake, &self.attachments)?;

        let boundary = format!("==============={}==", fake.alphanumeric(19));
        let message_id = format!("<{}@fake-file.local>", fake.hex_token(24));

        let mut eml = String::new();
        eml.push_str(&format!("From: {}\r\n", header_value(&from)));
        eml.push_str(&format!("To: {}\r\n", header_value(&to)));
        eml.push_str(&format!("Subject: {}\r\n", header_value(&subject)));
        eml.push_str(&format!("Date: {}\r\n", chrono::Utc::now().to_rfc2822()));
        eml.push_str(&format!("Message-ID: {}\r\n", message_id));
        eml.push_str("MIME-Version: 1.0\r\n");
        eml.push_str(&format!("Content-Type: multipart/mixed; boundary=\"{}\"\r\n\r\n", boundary));

        eml.push_str(&format!("--{}\r\n", boundary));
        eml.push_str("Content-Type: text/plain; charset=\"utf-8\"\r\n");
        eml.push_str("Content-Transfer-Encoding: base64\r\n\r\n");
        eml.push_str(&base64_lines(content.as_bytes()));
        eml.push_str("\r\n");

        for member in &members {
            eml.push_str(&format!("--{}\r\n", boundary));
            eml.push_str(&format!("Content-Type: {}\r\n", mime_type(&member.name)));
            eml.push_str("Content-Transfer-Encoding: base64\r\n");
            eml.push_str(&format!(
                "Content-Disposition: attachment; filename=\"{}\"\r\n\r\n",
                header_value(&member.name)
            ));
            eml.push_str(&base64_lines(&member.rendered.bytes));
            eml.push_str("\r\n");
        }
        eml.push_str(&format!("--{}--\r\n", boundary));

        let mut data = FileData::with_content(content);
        data.inner = inner_data(&members);
        data.insert_extra("to", to);
        data.insert_extra("from", from);
        data.insert_extra("subject", subject);
        Ok(Rendered::new(eml.into_bytes(), "eml", data))
    }
}
