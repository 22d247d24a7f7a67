use crate::core::fake::Fake;
use crate::core::inner::{compose, inner_data, ArchiveOptions};
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::FileProvider;
use crate::providers::package::options;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Write};
use zip::{CompressionMethod, ZipWriter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZipCompression {
    Stored,
    #[default]
    Deflated,
}

impl From<ZipCompression> for CompressionMethod {
    fn from(value: ZipCompression) -> Self {
        match value {
            ZipCompression::Stored => CompressionMethod::Stored,
            ZipCompression::Deflated => CompressionMethod::Deflated,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ZipFile {
    #[serde(flatten)]
    pub archive: ArchiveOptions,
    pub compression: ZipCompression,
}

impl ZipFile {
    pub fn new(archive: ArchiveOptions) -> Self {
        Self {
            archive,
            compression: ZipCompression::default(),
        }
    }
}

impl FileProvider for ZipFile {
    fn name(&self) -> &'static str {
        "zip_file"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let members = compose(fake, &self.archive)?;

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for member in &members {
            zip.start_file(member.name.as_str(), options(self.compression.into()))?;
            zip.write_all(&member.rendered.bytes)?;
        }
        let bytes = zip.finish()?.into_inner();

        let data = FileData {
            inner: inner_data(&members),
            ..FileData::default()
        };
        Ok(Rendered::new(bytes, "zip", data))
    }
}
