//! Offline MP3: an ID3v2.4 tag carrying the text, then silent frames.

use crate::domain::ports::Mp3Generator;
use crate::utils::error::Result;
use crate::utils::validation::validate_range;
use serde::{Deserialize, Serialize};

/// MPEG-1 Layer III, 128 kbit/s, 44.1 kHz, no CRC, no padding.
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];
const FRAME_LEN: usize = 417;
const SAMPLES_PER_FRAME: f64 = 1152.0;
const SAMPLE_RATE: f64 = 44_100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SilentMp3Generator {
    /// Reading speed used to derive the duration.
    pub chars_per_second: f64,
    pub title_words: usize,
}

impl Default for SilentMp3Generator {
    fn default() -> Self {
        Self {
            chars_per_second: 15.0,
            title_words: 5,
        }
    }
}

fn syncsafe(size: usize) -> [u8; 4] {
    [
        ((size >> 21) & 0x7F) as u8,
        ((size >> 14) & 0x7F) as u8,
        ((size >> 7) & 0x7F) as u8,
        (size & 0x7F) as u8,
    ]
}

fn frame(id: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(10 + body.len());
    out.extend_from_slice(id);
    out.extend_from_slice(&syncsafe(body.len()));
    out.extend_from_slice(&[0, 0]);
    out.extend_from_slice(body);
    out
}

/// `TIT2` with the first words, `USLT` with the full text. UTF-8 encoded.
fn id3_tag(title: &str, text: &str) -> Vec<u8> {
    let mut title_body = vec![0x03];
    title_body.extend_from_slice(title.as_bytes());

    let mut lyrics_body = vec![0x03];
    lyrics_body.extend_from_slice(b"eng");
    lyrics_body.push(0);
    lyrics_body.extend_from_slice(text.as_bytes());

    let mut frames = frame(b"TIT2", &title_body);
    frames.extend(frame(b"USLT", &lyrics_body));

    let mut tag = b"ID3\x04\x00\x00".to_vec();
    tag.extend_from_slice(&syncsafe(frames.len()));
    tag.extend(frames);
    tag
}

impl SilentMp3Generator {
    pub fn frame_count(&self, text: &str) -> usize {
        let seconds = (text.chars().count() as f64 / self.chars_per_second).max(1.0);
        (seconds * SAMPLE_RATE / SAMPLES_PER_FRAME).ceil() as usize
    }
}

impl Mp3Generator for SilentMp3Generator {
    fn name(&self) -> &'static str {
        "silent"
    }

    fn generate(&self, text: &str) -> Result<Vec<u8>> {
        validate_range("chars_per_second", self.chars_per_second, 0.1, 1_000.0)?;

        let title = text
            .split_whitespace()
            .take(self.title_words)
            .collect::<Vec<_>>()
            .join(" ");
        let frames = self.frame_count(text);

        let mut out = id3_tag(&title, text);
        out.reserve(frames * FRAME_LEN);
        let mut silent = vec![0u8; FRAME_LEN];
        silent[..4].copy_from_slice(&FRAME_HEADER);
        for _ in 0..frames {
            out.extend_from_slice(&silent);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syncsafe() {
        assert_eq!(syncsafe(0x7F), [0, 0, 0, 0x7F]);
        assert_eq!(syncsafe(0x80), [0, 0, 1, 0]);
        assert_eq!(syncsafe(257), [0, 0, 2, 1]);
    }

    #[test]
    fn test_layout() {
        let generator = SilentMp3Generator::default();
        let text = "Lorem ipsum dolor sit amet consectetur";
        let bytes = generator.generate(text).unwrap();

        assert_eq!(&bytes[..5], b"ID3\x04\x00");
        let tag_size = bytes[6..10]
            .iter()
            .fold(0usize, |acc, b| (acc << 7) | usize::from(*b));
        let audio = &bytes[10 + tag_size..];
        assert_eq!(&audio[..4], &FRAME_HEADER);
        assert_eq!(audio.len(), generator.frame_count(text) * FRAME_LEN);
    }

    #[test]
    fn test_minimum_one_second() {
        let generator = SilentMp3Generator::default();
        assert_eq!(generator.frame_count("a"), 39);
    }

    #[test]
    fn test_rejects_zero_speed() {
        let generator = SilentMp3Generator {
            chars_per_second: 0.0,
            ..SilentMp3Generator::default()
        };
        assert!(generator.generate("x").is_err());
    }
}
