//! ZIP-based document packages (DOCX, XLSX, ODF, EPUB).

use crate::utils::error::Result;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub fn options(method: CompressionMethod) -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(method)
}

/// Writes a package. When `mimetype` is given it becomes the first entry,
/// stored uncompressed, as ODF and EPUB readers require.
pub fn write_package(mimetype: Option<&str>, entries: &[(&str, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    if let Some(mimetype) = mimetype {
        zip.start_file("mimetype", options(CompressionMethod::Stored))?;
        zip.write_all(mimetype.as_bytes())?;
    }

    for (name, data) in entries {
        zip.start_file(*name, options(CompressionMethod::Deflated))?;
        zip.write_all(data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_mimetype_is_first_and_stored() {
        let bytes = write_package(
            Some("application/epub+zip"),
            &[("content.xml", b"<x/>".to_vec())],
        )
        .unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "mimetype");
        assert_eq!(first.compression(), CompressionMethod::Stored);
        let mut content = String::new();
        first.read_to_string(&mut content).unwrap();
        assert_eq!(content, "application/epub+zip");
    }
}
