use crate::core::fake::Fake;
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::FileProvider;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Copy of an existing file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFromPath {
    pub path: PathBuf,
    /// Defaults to the extension of `path`.
    #[serde(default)]
    pub extension: Option<String>,
}

impl FileFromPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            extension: None,
        }
    }
}

pub(crate) fn extension_of(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.strip_prefix('.').unwrap_or(name))
        .and_then(|name| name.split_once('.').map(|(_, ext)| ext.to_string()))
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "bin".to_string())
}

impl FileProvider for FileFromPath {
    fn name(&self) -> &'static str {
        "file_from_path"
    }

    fn render(&self, _fake: &mut Fake) -> Result<Rendered> {
        let bytes = fs::read(&self.path)?;
        let extension = self
            .extension
            .clone()
            .unwrap_or_else(|| extension_of(&self.path));

        let mut data = FileData::default();
        data.insert_extra("source", self.path.to_string_lossy().into_owned());
        Ok(Rendered::new(bytes, extension, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FakeFileError;
    use tempfile::TempDir;

    #[test]
    fn test_dotfiles_keep_their_real_extension() {
        assert_eq!(extension_of(Path::new("/home/user/.bashrc")), "bin");
        assert_eq!(extension_of(Path::new("/etc/.config.json")), "json");
        assert_eq!(extension_of(Path::new("archive.tar.gz")), "tar.gz");
        assert_eq!(extension_of(Path::new("trailing.")), "bin");
    }

    #[test]
    fn test_copies_source() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("notes.tar.gz");
        fs::write(&source, b"payload").unwrap();

        let rendered = FileFromPath::new(&source).render(&mut Fake::seeded(1)).unwrap();
        assert_eq!(rendered.bytes, b"payload");
        assert_eq!(rendered.extension, "tar.gz");
    }

    #[test]
    fn test_missing_source_is_io_error() {
        let result = FileFromPath::new("/definitely/not/here.txt").render(&mut Fake::seeded(1));
        assert!(matches!(result, Err(FakeFileError::IoError(_))));
    }

    #[test]
    fn test_extension_fallback() {
        assert_eq!(extension_of(Path::new("/tmp/README")), "bin");
        assert_eq!(extension_of(Path::new("/tmp/a.txt")), "txt");
    }
}
