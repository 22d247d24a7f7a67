use crate::core::fake::Fake;
use crate::core::template::{TextContent, DEFAULT_TEXT_MAX_NB_CHARS};
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::FileProvider;
use crate::providers::markup::escape;
use crate::providers::package::write_package;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

pub(crate) const ODF_NAMESPACES: &str = "xmlns:office=\"urn:oasis:names:tc:opendocument:xmlns:office:1.0\" \
xmlns:text=\"urn:oasis:names:tc:opendocument:xmlns:text:1.0\" \
xmlns:table=\"urn:oasis:names:tc:opendocument:xmlns:table:1.0\" \
office:version=\"1.2\"";

/// Manifest listing `content.xml` for the given package media type.
pub(crate) fn manifest(media_type: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <manifest:manifest xmlns:manifest=\"urn:oasis:names:tc:opendocument:xmlns:manifest:1.0\" manifest:version=\"1.2\">\
         <manifest:file-entry manifest:full-path=\"/\" manifest:media-type=\"{}\"/>\
         <manifest:file-entry manifest:full-path=\"content.xml\" manifest:media-type=\"text/xml\"/>\
         </manifest:manifest>",
        media_type
    )
}

const MEDIA_TYPE: &str = "application/vnd.oasis.opendocument.text";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OdtFile {
    #[serde(flatten)]
    pub text: TextContent,
}

impl FileProvider for OdtFile {
    fn name(&self) -> &'static str {
        "odt_file"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let content = self.text.generate(fake, DEFAULT_TEXT_MAX_NB_CHARS)?;
        let paragraphs: String = content
            .lines()
            .map(|line| format!("<text:p>{}</text:p>", escape(line)))
            .collect();
        let content_xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <office:document-content {}><office:body><office:text>{}</office:text></office:body></office:document-content>",
            ODF_NAMESPACES, paragraphs
        );

        let bytes = write_package(
            Some(MEDIA_TYPE),
            &[
                ("META-INF/manifest.xml", manifest(MEDIA_TYPE).into_bytes()),
                ("content.xml", content_xml.into_bytes()),
            ],
        )?;
        Ok(Rendered::new(bytes, "odt", FileData::with_content(content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn test_odt_package() {
        let provider = OdtFile {
            text: TextContent::new("a\nb\nc"),
        };
        let rendered = provider.render(&mut Fake::seeded(1)).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(rendered.bytes)).unwrap();
        assert_eq!(archive.by_index(0).unwrap().name(), "mimetype");

        let mut content = String::new();
        archive
            .by_name("content.xml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content.matches("<text:p>").count(), 3);
    }
}
