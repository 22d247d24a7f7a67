use crate::core::fake::Fake;
use crate::domain::model::{BytesValue, Naming, RasterFormat, Rendered, StringValue};
use crate::utils::error::Result;
use std::fmt::Debug;

pub trait Storage: Send + Sync + Debug {
    /// Storage key for a new file. Fails when `extension` is empty.
    fn generate_filename(
        &self,
        extension: &str,
        prefix: Option<&str>,
        basename: Option<&str>,
    ) -> Result<String>;
    fn write_bytes(&self, filename: &str, data: &[u8]) -> Result<usize>;
    fn write_text(&self, filename: &str, data: &str) -> Result<usize> {
        self.write_bytes(filename, data.as_bytes())
    }
    fn read_bytes(&self, filename: &str) -> Result<Vec<u8>>;
    fn exists(&self, filename: &str) -> Result<bool>;
    fn unlink(&self, filename: &str) -> Result<()>;
    fn relpath(&self, filename: &str) -> String;
    fn abspath(&self, filename: &str) -> String;
    fn describe(&self) -> String;
}

pub trait FileProvider: Send + Sync + Debug {
    /// Registry name, e.g. `docx_file`.
    fn name(&self) -> &'static str;
    fn render(&self, fake: &mut Fake) -> Result<Rendered>;
}

pub trait FileProviderExt: FileProvider {
    fn save(&self, fake: &mut Fake, storage: &dyn Storage, naming: &Naming) -> Result<StringValue> {
        let rendered = self.render(fake)?;
        let filename = storage.generate_filename(
            &rendered.extension,
            naming.prefix.as_deref(),
            naming.basename.as_deref(),
        )?;
        let written = storage.write_bytes(&filename, &rendered.bytes)?;
        tracing::debug!(
            "{} wrote {} bytes to {}",
            self.name(),
            written,
            storage.abspath(&filename)
        );

        let mut data = rendered.data;
        data.filename = Some(storage.abspath(&filename));
        data.storage = Some(storage.describe());
        Ok(StringValue::new(storage.relpath(&filename), data))
    }

    fn raw(&self, fake: &mut Fake) -> Result<BytesValue> {
        let rendered = self.render(fake)?;
        tracing::debug!("{} rendered {} bytes", self.name(), rendered.bytes.len());
        Ok(rendered.into())
    }
}

impl<P: FileProvider + ?Sized> FileProviderExt for P {}

/// Backend that turns text into MP3 bytes.
pub trait Mp3Generator: Send + Sync + Debug {
    fn name(&self) -> &'static str;
    fn generate(&self, text: &str) -> Result<Vec<u8>>;
}

/// Backend that turns text into a PDF document.
pub trait PdfGenerator: Send + Sync + Debug {
    fn name(&self) -> &'static str;
    fn generate(&self, fake: &mut Fake, text: &str) -> Result<Vec<u8>>;
}

/// Backend that draws text into a raster image of the requested format.
pub trait ImageGenerator: Send + Sync + Debug {
    fn name(&self) -> &'static str;
    fn generate(&self, fake: &mut Fake, text: &str, format: RasterFormat) -> Result<Vec<u8>>;
}
