use crate::core::fake::Fake;
use crate::core::template::{render, TextContent, DEFAULT_TEXT_MAX_NB_CHARS};
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::FileProvider;
use crate::providers::markup::escape;
use crate::providers::package::write_package;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

const CONTAINER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
<rootfiles><rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/></rootfiles>
</container>"#;

/// EPUB 2 book with a title page and a single chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpubFile {
    /// Template for the book title.
    pub title: String,
    /// Template for the chapter heading.
    pub chapter_title: String,
    #[serde(flatten)]
    pub text: TextContent,
}

impl Default for EpubFile {
    fn default() -> Self {
        Self {
            title: "{{sentence}}".to_string(),
            chapter_title: "{{word}}".to_string(),
            text: TextContent::default(),
        }
    }
}

impl FileProvider for EpubFile {
    fn name(&self) -> &'static str {
        "epub_file"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let title = render(fake, &self.title)?;
        let chapter_title = render(fake, &self.chapter_title)?;
        let author = fake.name();
        let identifier = fake.isbn13();
        let content = self.text.generate(fake, DEFAULT_TEXT_MAX_NB_CHARS)?;

        let opf = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <package xmlns=\"http://www.idpf.org/2007/opf\" version=\"2.0\" unique-identifier=\"BookId\">\
             <metadata xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\
             <dc:title>{title}</dc:title><dc:creator>{author}</dc:creator>\
             <dc:language>en</dc:language><dc:identifier id=\"BookId\">urn:isbn:{id}</dc:identifier>\
             </metadata>\
             <manifest>\
             <item id=\"ncx\" href=\"toc.ncx\" media-type=\"application/x-dtbncx+xml\"/>\
             <item id=\"chapter1\" href=\"chapter1.xhtml\" media-type=\"application/xhtml+xml\"/>\
             </manifest>\
             <spine toc=\"ncx\"><itemref idref=\"chapter1\"/></spine>\
             </package>",
            title = escape(&title),
            author = escape(&author),
            id = identifier
        );
        let ncx = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <ncx xmlns=\"http://www.daisy.org/z3986/2005/ncx/\" version=\"2005-1\">\
             <head><meta name=\"dtb:uid\" content=\"urn:isbn:{id}\"/></head>\
             <docTitle><text>{title}</text></docTitle>\
             <navMap><navPoint id=\"chapter1\" playOrder=\"1\">\
             <navLabel><text>{chapter}</text></navLabel><content src=\"chapter1.xhtml\"/>\
             </navPoint></navMap></ncx>",
            id = identifier,
            title = escape(&title),
            chapter = escape(&chapter_title)
        );
        let paragraphs: String = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| format!("<p>{}</p>", escape(line)))
            .collect();
        let chapter = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <html xmlns=\"http://www.w3.org/1999/xhtml\"><head><title>{chapter}</title></head>\
             <body><h1>{chapter}</h1>{paragraphs}</body></html>",
            chapter = escape(&chapter_title),
            paragraphs = paragraphs
        );

        let bytes = write_package(
            Some("application/epub+zip"),
            &[
                ("META-INF/container.xml", CONTAINER.as_bytes().to_vec()),
                ("OEBPS/content.opf", opf.into_bytes()),
                ("OEBPS/toc.ncx", ncx.into_bytes()),
                ("OEBPS/chapter1.xhtml", chapter.into_bytes()),
            ],
        )?;

        let mut data = FileData::with_content(content);
        data.insert_extra("title", title);
        data.insert_extra("chapter_title", chapter_title);
        Ok(Rendered::new(bytes, "epub", data))
    }
}
