//! Built-in text renderer: a 5x7 bitmap font drawn straight onto the canvas.

use super::{encode, MAX_ICO_SIDE};
use crate::core::fake::Fake;
use crate::domain::model::RasterFormat;
use crate::domain::ports::ImageGenerator;
use crate::utils::error::Result;
use crate::utils::validation::validate_range;
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
/// Cell size including one column and one row of spacing.
const CELL_WIDTH: u32 = GLYPH_WIDTH + 1;
const CELL_HEIGHT: u32 = GLYPH_HEIGHT + 2;

/// Printable ASCII from `' '` to `'~'`. Five columns per glyph, bit 0 is the top row.
const FONT: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], [0x00, 0x00, 0x5F, 0x00, 0x00], [0x00, 0x07, 0x00, 0x07, 0x00],
    [0x14, 0x7F, 0x14, 0x7F, 0x14], [0x24, 0x2A, 0x7F, 0x2A, 0x12], [0x23, 0x13, 0x08, 0x64, 0x62],
    [0x36, 0x49, 0x55, 0x22, 0x50], [0x00, 0x05, 0x03, 0x00, 0x00], [0x00, 0x1C, 0x22, 0x41, 0x00],
    [0x00, 0x41, 0x22, 0x1C, 0x00], [0x08, 0x2A, 0x1C, 0x2A, 0x08], [0x08, 0x08, 0x3E, 0x08, 0x08],
    [0x00, 0x50, 0x30, 0x00, 0x00], [0x08, 0x08, 0x08, 0x08, 0x08], [0x00, 0x60, 0x60, 0x00, 0x00],
    [0x20, 0x10, 0x08, 0x04, 0x02], [0x3E, 0x51, 0x49, 0x45, 0x3E], [0x00, 0x42, 0x7F, 0x40, 0x00],
    [0x42, 0x61, 0x51, 0x49, 0x46], [0x21, 0x41, 0x45, 0x4B, 0x31], [0x18, 0x14, 0x12, 0x7F, 0x10],
    [0x27, 0x45, 0x45, 0x45, 0x39], [0x3C, 0x4A, 0x49, 0x49, 0x30], [0x01, 0x71, 0x09, 0x05, 0x03],
    [0x36, 0x49, 0x49, 0x49, 0x36], [0x06, 0x49, 0x49, 0x29, 0x1E], [0x00, 0x36, 0x36, 0x00, 0x00],
    [0x00, 0x56, 0x36, 0x00, 0x00], [0x08, 0x14, 0x22, 0x41, 0x00], [0x14, 0x14, 0x14, 0x14, 0x14],
    [0x00, 0x41, 0x22, 0x14, 0x08], [0x02, 0x01, 0x51, 0x09, 0x06], [0x32, 0x49, 0x79, 0x41, 0x3E],
    [0x7E, 0x11, 0x11, 0x11, 0x7E], [0x7F, 0x49, 0x49, 0x49, 0x36], [0x3E, 0x41, 0x41, 0x41, 0x22],
    [0x7F, 0x41, 0x41, 0x22, 0x1C], [0x7F, 0x49, 0x49, 0x49, 0x41], [0x7F, 0x09, 0x09, 0x01, 0x01],
    [0x3E, 0x41, 0x41, 0x51, 0x32], [0x7F, 0x08, 0x08, 0x08, 0x7F], [0x00, 0x41, 0x7F, 0x41, 0x00],
    [0x20, 0x40, 0x41, 0x3F, 0x01], [0x7F, 0x08, 0x14, 0x22, 0x41], [0x7F, 0x40, 0x40, 0x40, 0x40],
    [0x7F, 0x02, 0x04, 0x02, 0x7F], [0x7F, 0x04, 0x08, 0x10, 0x7F], [0x3E, 0x41, 0x41, 0x41, 0x3E],
    [0x7F, 0x09, 0x09, 0x09, 0x06], [0x3E, 0x41, 0x51, 0x21, 0x5E], [0x7F, 0x09, 0x19, 0x29, 0x46],
    [0x46, 0x49, 0x49, 0x49, 0x31], [0x01, 0x01, 0x7F, 0x01, 0x01], [0x3F, 0x40, 0x40, 0x40, 0x3F],
    [0x1F, 0x20, 0x40, 0x20, 0x1F], [0x7F, 0x20, 0x18, 0x20, 0x7F], [0x63, 0x14, 0x08, 0x14, 0x63],
    [0x03, 0x04, 0x78, 0x04, 0x03], [0x61, 0x51, 0x49, 0x45, 0x43], [0x00, 0x7F, 0x41, 0x41, 0x00],
    [0x02, 0x04, 0x08, 0x10, 0x20], [0x00, 0x41, 0x41, 0x7F, 0x00], [0x04, 0x02, 0x01, 0x02, 0x04],
    [0x40, 0x40, 0x40, 0x40, 0x40], [0x00, 0x01, 0x02, 0x04, 0x00], [0x20, 0x54, 0x54, 0x54, 0x78],
    [0x7F, 0x48, 0x44, 0x44, 0x38], [0x38, 0x44, 0x44, 0x44, 0x20], [0x38, 0x44, 0x44, 0x48, 0x7F],
    [0x38, 0x54, 0x54, 0x54, 0x18], [0x08, 0x7E, 0x09, 0x01, 0x02], [0x08, 0x14, 0x54, 0x54, 0x3C],
    [0x7F, 0x08, 0x04, 0x04, 0x78], [0x00, 0x44, 0x7D, 0x40, 0x00], [0x20, 0x40, 0x44, 0x3D, 0x00],
    [0x00, 0x7F, 0x10, 0x28, 0x44], [0x00, 0x41, 0x7F, 0x40, 0x00], [0x7C, 0x04, 0x18, 0x04, 0x78],
    [0x7C, 0x08, 0x04, 0x04, 0x78], [0x38, 0x44, 0x44, 0x44, 0x38], [0x7C, 0x14, 0x14, 0x14, 0x08],
    [0x08, 0x14, 0x14, 0x18, 0x7C], [0x7C, 0x08, 0x04, 0x04, 0x08], [0x48, 0x54, 0x54, 0x54, 0x20],
    [0x04, 0x3F, 0x44, 0x40, 0x20], [0x3C, 0x40, 0x40, 0x20, 0x7C], [0x1C, 0x20, 0x40, 0x20, 0x1C],
    [0x3C, 0x40, 0x30, 0x40, 0x3C], [0x44, 0x28, 0x10, 0x28, 0x44], [0x0C, 0x50, 0x50, 0x50, 0x3C],
    [0x44, 0x64, 0x54, 0x4C, 0x44], [0x00, 0x08, 0x36, 0x41, 0x00], [0x00, 0x00, 0x7F, 0x00, 0x00],
    [0x00, 0x41, 0x36, 0x08, 0x00], [0x08, 0x08, 0x2A, 0x1C, 0x08],
];

fn glyph(c: char) -> &'static [u8; 5] {
    let index = match c {
        ' '..='~' => c as usize - ' ' as usize,
        _ => '?' as usize - ' ' as usize,
    };
    &FONT[index]
}

/// Draws the text line by line. The canvas grows with the text up to
/// `max_width` x `max_height`; ICO output is further capped at 256 pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterTextGenerator {
    /// Pixel size of one font dot.
    pub scale: u32,
    pub margin: u32,
    /// Lines longer than this are wrapped.
    pub columns: usize,
    pub foreground: [u8; 3],
    pub background: [u8; 3],
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for RasterTextGenerator {
    fn default() -> Self {
        Self {
            scale: 2,
            margin: 8,
            columns: 80,
            foreground: [0, 0, 0],
            background: [255, 255, 255],
            max_width: 2048,
            max_height: 2048,
        }
    }
}

impl RasterTextGenerator {
    fn lines(&self, text: &str) -> Vec<String> {
        let lines: Vec<String> = text
            .lines()
            .flat_map(|line| {
                if line.is_empty() {
                    vec![String::new()]
                } else {
                    textwrap::wrap(line, self.columns)
                        .into_iter()
                        .map(|l| l.into_owned())
                        .collect()
                }
            })
            .collect();
        if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        }
    }

    fn canvas_size(&self, lines: &[String], format: RasterFormat) -> (u32, u32) {
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u32;
        let width = 2 * self.margin + longest.max(1) * CELL_WIDTH * self.scale;
        let height = 2 * self.margin + lines.len() as u32 * CELL_HEIGHT * self.scale;

        let (max_width, max_height) = match format {
            RasterFormat::Ico => (self.max_width.min(MAX_ICO_SIDE), self.max_height.min(MAX_ICO_SIDE)),
            _ => (self.max_width, self.max_height),
        };
        (width.min(max_width), height.min(max_height))
    }

    fn draw(&self, text: &str, format: RasterFormat) -> RgbImage {
        let lines = self.lines(text);
        let (width, height) = self.canvas_size(&lines, format);
        let mut img = RgbImage::from_pixel(width, height, Rgb(self.background));
        let ink = Rgb(self.foreground);

        for (row, line) in lines.iter().enumerate() {
            let top = self.margin + row as u32 * CELL_HEIGHT * self.scale;
            if top >= height {
                break;
            }
            for (col, c) in line.chars().enumerate() {
                let left = self.margin + col as u32 * CELL_WIDTH * self.scale;
                if left >= width {
                    break;
                }
                self.draw_glyph(&mut img, glyph(c), left, top, ink);
            }
        }
        img
    }

    fn draw_glyph(&self, img: &mut RgbImage, glyph: &[u8; 5], left: u32, top: u32, ink: Rgb<u8>) {
        for (gx, column) in glyph.iter().enumerate() {
            for gy in 0..GLYPH_HEIGHT {
                if column & (1 << gy) == 0 {
                    continue;
                }
                let x0 = left + gx as u32 * self.scale;
                let y0 = top + gy * self.scale;
                for y in y0..y0 + self.scale {
                    for x in x0..x0 + self.scale {
                        if x < img.width() && y < img.height() {
                            img.put_pixel(x, y, ink);
                        }
                    }
                }
            }
        }
    }
}

impl ImageGenerator for RasterTextGenerator {
    fn name(&self) -> &'static str {
        "raster"
    }

    fn generate(&self, _fake: &mut Fake, text: &str, format: RasterFormat) -> Result<Vec<u8>> {
        validate_range("scale", self.scale, 1, 16)?;
        validate_range("columns", self.columns, 1, 1000)?;
        validate_range("max_width", self.max_width, 1, 16_384)?;
        validate_range("max_height", self.max_height, 1, 16_384)?;

        encode(self.draw(text, format), format)
    }
}
