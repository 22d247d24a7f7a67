use crate::core::fake::Fake;
use crate::core::template::{TextContent, DEFAULT_TEXT_MAX_NB_CHARS};
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::FileProvider;
use crate::providers::markup::escape;
use crate::providers::package::write_package;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

/// Word document, one paragraph per line of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocxFile {
    #[serde(flatten)]
    pub text: TextContent,
}

pub(crate) fn document_xml(text: &str) -> String {
    let mut body = String::new();
    for line in text.lines() {
        body.push_str("<w:p><w:r><w:t xml:space=\"preserve\">");
        body.push_str(&escape(line));
        body.push_str("</w:t></w:r></w:p>");
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{}</w:body></w:document>",
        body
    )
}

impl FileProvider for DocxFile {
    fn name(&self) -> &'static str {
        "docx_file"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let content = self.text.generate(fake, DEFAULT_TEXT_MAX_NB_CHARS)?;
        let bytes = write_package(
            None,
            &[
                ("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec()),
                ("_rels/.rels", ROOT_RELS.as_bytes().to_vec()),
                ("word/document.xml", document_xml(&content).into_bytes()),
            ],
        )?;
        Ok(Rendered::new(bytes, "docx", FileData::with_content(content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn test_docx_contains_paragraphs() {
        let provider = DocxFile {
            text: TextContent::new("first\nsecond <b>"),
        };
        let rendered = provider.render(&mut Fake::seeded(1)).unwrap();
        assert_eq!(rendered.extension, "docx");

        let mut archive = zip::ZipArchive::new(Cursor::new(rendered.bytes)).unwrap();
        let mut document = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut document)
            .unwrap();
        assert_eq!(document.matches("<w:p>").count(), 2);
        assert!(document.contains("second &lt;b&gt;"));
        assert!(archive.by_name("[Content_Types].xml").is_ok());
    }
}
