use crate::core::fake::Fake;
use crate::core::inner::{compose, inner_data, ArchiveOptions, Member};
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::FileProvider;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TarCompression {
    #[default]
    None,
    Gz,
    Bz2,
    Xz,
}

impl TarCompression {
    pub fn extension(self) -> &'static str {
        match self {
            TarCompression::None => "tar",
            TarCompression::Gz => "tar.gz",
            TarCompression::Bz2 => "tar.bz2",
            TarCompression::Xz => "tar.xz",
        }
    }

    fn compress(self, tar: Vec<u8>) -> std::io::Result<Vec<u8>> {
        match self {
            TarCompression::None => Ok(tar),
            TarCompression::Gz => {
                let mut encoder =
                    flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
                encoder.write_all(&tar)?;
                encoder.finish()
            }
            TarCompression::Bz2 => {
                let mut encoder =
                    bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
                encoder.write_all(&tar)?;
                encoder.finish()
            }
            TarCompression::Xz => {
                let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
                encoder.write_all(&tar)?;
                encoder.finish()
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TarFile {
    #[serde(flatten)]
    pub archive: ArchiveOptions,
    pub compression: TarCompression,
}

impl TarFile {
    pub fn new(archive: ArchiveOptions) -> Self {
        Self {
            archive,
            compression: TarCompression::default(),
        }
    }

    pub fn compression(mut self, compression: TarCompression) -> Self {
        self.compression = compression;
        self
    }
}

fn write_tar(members: &[Member]) -> std::io::Result<Vec<u8>> {
    let mtime = chrono::Utc::now().timestamp().max(0) as u64;
    let mut builder = tar::Builder::new(Vec::new());
    for member in members {
        let mut header = tar::Header::new_gnu();
        header.set_size(member.rendered.bytes.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(mtime);
        header.set_cksum();
        builder.append_data(&mut header, &member.name, member.rendered.bytes.as_slice())?;
    }
    builder.into_inner()
}

impl FileProvider for TarFile {
    fn name(&self) -> &'static str {
        "tar_file"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let members = compose(fake, &self.archive)?;
        let bytes = self.compression.compress(write_tar(&members)?)?;

        let mut data = FileData {
            inner: inner_data(&members),
            ..FileData::default()
        };
        data.insert_extra("compression", self.compression.extension());
        Ok(Rendered::new(bytes, self.compression.extension(), data))
    }
}
