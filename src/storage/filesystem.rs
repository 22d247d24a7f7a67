use crate::domain::ports::Storage;
use crate::storage::{generate_name, DEFAULT_REL_PATH};
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Files under `<root_path>/<rel_path>` on the local disk.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    root_path: PathBuf,
    rel_path: String,
}

impl Default for FileSystemStorage {
    fn default() -> Self {
        Self::new(std::env::temp_dir(), DEFAULT_REL_PATH)
    }
}

impl FileSystemStorage {
    pub fn new(root_path: impl Into<PathBuf>, rel_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            rel_path: rel_path.into(),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn full_path(&self, filename: &str) -> PathBuf {
        let path = Path::new(filename);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_path.join(path)
        }
    }
}

impl Storage for FileSystemStorage {
    fn generate_filename(
        &self,
        extension: &str,
        prefix: Option<&str>,
        basename: Option<&str>,
    ) -> Result<String> {
        let name = generate_name(extension, prefix, basename)?;
        let path = self.root_path.join(&self.rel_path).join(name);
        Ok(path.to_string_lossy().into_owned())
    }

    fn write_bytes(&self, filename: &str, data: &[u8]) -> Result<usize> {
        let full_path = self.full_path(filename);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(data.len())
    }

    fn read_bytes(&self, filename: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.full_path(filename))?)
    }

    fn exists(&self, filename: &str) -> Result<bool> {
        Ok(self.full_path(filename).is_file())
    }

    fn unlink(&self, filename: &str) -> Result<()> {
        fs::remove_file(self.full_path(filename))?;
        Ok(())
    }

    fn relpath(&self, filename: &str) -> String {
        let full_path = self.full_path(filename);
        full_path
            .strip_prefix(&self.root_path)
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|_| full_path.to_string_lossy().into_owned())
    }

    fn abspath(&self, filename: &str) -> String {
        self.full_path(filename).to_string_lossy().into_owned()
    }

    fn describe(&self) -> String {
        format!(
            "FileSystemStorage(root_path={}, rel_path={})",
            self.root_path.display(),
            self.rel_path
        )
    }
}
