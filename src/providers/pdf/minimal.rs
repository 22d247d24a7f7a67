//! Self-contained PDF 1.4 writer using the standard Helvetica fonts.

use crate::core::fake::Fake;
use crate::domain::ports::{FileProvider, PdfGenerator};
use crate::providers::images::GraphicImageFile;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;
const FONT_SIZE: f32 = 11.0;
const LEADING: f32 = 14.0;
const ROW_HEIGHT: f32 = 20.0;
/// Average Helvetica glyph width at `FONT_SIZE`.
const CHAR_WIDTH: f32 = 5.5;

/// Building block appended after the text body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Snippet {
    Paragraph {
        #[serde(default = "default_paragraph_chars")]
        max_nb_chars: usize,
    },
    Table {
        #[serde(default = "default_rows")]
        rows: usize,
        #[serde(default = "default_cols")]
        cols: usize,
    },
    Picture {
        #[serde(default = "default_picture_side")]
        width: u32,
        #[serde(default = "default_picture_side")]
        height: u32,
    },
    PageBreak,
}

fn default_paragraph_chars() -> usize {
    5_000
}

fn default_rows() -> usize {
    3
}

fn default_cols() -> usize {
    4
}

fn default_picture_side() -> u32 {
    200
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimalPdfGenerator {
    pub snippets: Vec<Snippet>,
}

impl MinimalPdfGenerator {
    pub fn with_snippets(snippets: Vec<Snippet>) -> Self {
        Self { snippets }
    }
}

struct JpegImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

#[derive(Default)]
struct Page {
    ops: String,
    images: Vec<usize>,
}

/// Top-down layout cursor over a growing list of pages.
struct Layout {
    pages: Vec<Page>,
    images: Vec<JpegImage>,
    y: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            images: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn page_break(&mut self) {
        self.pages.push(Page::default());
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn reserve(&mut self, height: f32) {
        if self.y - height < MARGIN {
            self.page_break();
        }
    }

    fn text_line(&mut self, font: &str, x: f32, line: &str) {
        self.reserve(LEADING);
        self.y -= LEADING;
        let y = self.y;
        let _ = writeln!(
            self.page().ops,
            "BT /{} {} Tf {:.2} {:.2} Td ({}) Tj ET",
            font,
            FONT_SIZE,
            x,
            y,
            escape_pdf(line)
        );
    }

    fn paragraph(&mut self, text: &str) {
        let width = ((PAGE_WIDTH - 2.0 * MARGIN) / CHAR_WIDTH) as usize;
        for source_line in text.lines() {
            if source_line.trim().is_empty() {
                self.reserve(LEADING);
                self.y -= LEADING;
                continue;
            }
            for line in textwrap::wrap(source_line, width) {
                self.text_line("F1", MARGIN, &line);
            }
        }
    }

    fn table(&mut self, rows: &[Vec<String>]) {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return;
        }
        let col_width = (PAGE_WIDTH - 2.0 * MARGIN) / cols as f32;
        let max_chars = ((col_width - 6.0) / CHAR_WIDTH).max(1.0) as usize;

        for (i, row) in rows.iter().enumerate() {
            self.reserve(ROW_HEIGHT);
            self.y -= ROW_HEIGHT;
            let y = self.y;
            let font = if i == 0 { "F2" } else { "F1" };
            let mut ops = String::new();
            for (j, cell) in row.iter().enumerate() {
                let x = MARGIN + j as f32 * col_width;
                if i == 0 {
                    let _ = writeln!(ops, "0.6 g {:.2} {:.2} {:.2} {:.2} re f 0 g", x, y, col_width, ROW_HEIGHT);
                }
                let _ = writeln!(ops, "{:.2} {:.2} {:.2} {:.2} re S", x, y, col_width, ROW_HEIGHT);
                let cell: String = cell.chars().take(max_chars).collect();
                let _ = writeln!(
                    ops,
                    "BT /{} {} Tf {:.2} {:.2} Td ({}) Tj ET",
                    font,
                    FONT_SIZE,
                    x + 3.0,
                    y + 6.0,
                    escape_pdf(&cell)
                );
            }
            self.page().ops.push_str(&ops);
        }
    }

    fn picture(&mut self, image: JpegImage) {
        let max_width = PAGE_WIDTH - 2.0 * MARGIN;
        let max_height = PAGE_HEIGHT - 2.0 * MARGIN;
        let scale = (max_width / image.width as f32)
            .min(max_height / image.height as f32)
            .min(1.0);
        let (w, h) = (image.width as f32 * scale, image.height as f32 * scale);

        self.reserve(h);
        self.y -= h;
        let y = self.y;
        let index = self.images.len();
        self.images.push(image);

        let page = self.page();
        page.images.push(index);
        let _ = writeln!(page.ops, "q {:.2} 0 0 {:.2} {:.2} {:.2} cm /Im{} Do Q", w, h, MARGIN, y, index);
    }
}

/// PDF literal string body. Helvetica uses WinAnsi, so anything past
/// Latin-1 becomes `?`.
fn escape_pdf(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            c if (c as u32) < 0x20 => out.push(' '),
            c if c.is_ascii() => out.push(c),
            c if (c as u32) <= 0xFF => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            _ => out.push('?'),
        }
    }
    out
}

struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    /// Objects must be written in id order, starting at 1.
    fn object(&mut self, body: &[u8]) {
        self.offsets.push(self.buf.len());
        let id = self.offsets.len();
        self.buf.extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn stream(&mut self, dict: &str, data: &[u8]) {
        let mut body = format!("<< {} /Length {} >>\nstream\n", dict, data.len()).into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(b"\nendstream");
        self.object(&body);
    }

    fn finish(mut self) -> Vec<u8> {
        let xref = self.buf.len();
        let mut tail = format!("xref\n0 {}\n0000000000 65535 f \n", self.offsets.len() + 1);
        for offset in &self.offsets {
            let _ = writeln!(tail, "{:010} 00000 n ", offset);
        }
        let _ = write!(
            tail,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            self.offsets.len() + 1,
            xref
        );
        self.buf.extend_from_slice(tail.as_bytes());
        self.buf
    }
}

fn write_document(layout: Layout) -> Vec<u8> {
    const FIRST_IMAGE: usize = 5;
    let first_page = FIRST_IMAGE + layout.images.len();
    let page_ids: Vec<usize> = (0..layout.pages.len()).map(|i| first_page + 2 * i).collect();

    let mut pdf = PdfWriter::new();
    pdf.object(b"<< /Type /Catalog /Pages 2 0 R >>");
    let kids: Vec<String> = page_ids.iter().map(|id| format!("{} 0 R", id)).collect();
    pdf.object(
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_ids.len()
        )
        .as_bytes(),
    );
    pdf.object(b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>");
    pdf.object(b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>");

    for image in &layout.images {
        pdf.stream(
            &format!(
                "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /DCTDecode",
                image.width, image.height
            ),
            &image.bytes,
        );
    }

    for (page, id) in layout.pages.iter().zip(&page_ids) {
        let xobjects: String = page
            .images
            .iter()
            .map(|i| format!("/Im{} {} 0 R ", i, FIRST_IMAGE + i))
            .collect();
        pdf.object(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> /XObject << {}>> >> /Contents {} 0 R >>",
                PAGE_WIDTH,
                PAGE_HEIGHT,
                xobjects,
                id + 1
            )
            .as_bytes(),
        );
        pdf.stream("", page.ops.as_bytes());
    }

    pdf.finish()
}

impl PdfGenerator for MinimalPdfGenerator {
    fn name(&self) -> &'static str {
        "minimal"
    }

    fn generate(&self, fake: &mut Fake, text: &str) -> Result<Vec<u8>> {
        let mut layout = Layout::new();
        layout.paragraph(text);

        for snippet in &self.snippets {
            match snippet {
                Snippet::Paragraph { max_nb_chars } => {
                    let text = fake.text(*max_nb_chars)?;
                    layout.paragraph(&text);
                }
                Snippet::Table { rows, cols } => {
                    let mut data = vec![(1..=*cols).map(|i| format!("Header {}", i)).collect::<Vec<_>>()];
                    for _ in 0..*rows {
                        data.push(fake.words(*cols));
                    }
                    layout.table(&data);
                }
                Snippet::Picture { width, height } => {
                    let rendered = GraphicImageFile::jpeg().size(*width, *height).render(fake)?;
                    layout.picture(JpegImage {
                        bytes: rendered.bytes,
                        width: *width,
                        height: *height,
                    });
                }
                Snippet::PageBreak => layout.page_break(),
            }
        }

        Ok(write_document(layout))
    }
}
