use crate::core::fake::Fake;
use crate::domain::model::{FileData, Rendered};
use crate::domain::ports::FileProvider;
use crate::providers::file_from_path::extension_of;
use crate::utils::error::{FakeFileError, Result};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Copy of a random regular file directly inside `source_dir_path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomFileFromDir {
    pub source_dir_path: PathBuf,
}

impl RandomFileFromDir {
    pub fn new(source_dir_path: impl Into<PathBuf>) -> Self {
        Self {
            source_dir_path: source_dir_path.into(),
        }
    }
}

impl FileProvider for RandomFileFromDir {
    fn name(&self) -> &'static str {
        "random_file_from_dir"
    }

    fn render(&self, fake: &mut Fake) -> Result<Rendered> {
        let mut candidates = Vec::new();
        for entry in fs::read_dir(&self.source_dir_path)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                candidates.push(entry.path());
            }
        }
        // read_dir order is platform dependent; sort so seeded runs repeat.
        candidates.sort();

        let source = candidates
            .choose(fake.rng())
            .ok_or_else(|| FakeFileError::EmptySource {
                message: format!("no files in {}", self.source_dir_path.display()),
            })?;

        let bytes = fs::read(source)?;
        let mut data = FileData::default();
        data.insert_extra("source", source.to_string_lossy().into_owned());
        Ok(Rendered::new(bytes, extension_of(source), data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_picks_a_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), b"a").unwrap();
        fs::write(temp_dir.path().join("b.csv"), b"b").unwrap();
        fs::create_dir(temp_dir.path().join("sub.dir")).unwrap();

        let provider = RandomFileFromDir::new(temp_dir.path());
        let mut fake = Fake::seeded(5);
        for _ in 0..10 {
            let rendered = provider.render(&mut fake).unwrap();
            assert!(rendered.extension == "txt" || rendered.extension == "csv");
            assert_eq!(rendered.bytes.len(), 1);
        }
    }

    #[test]
    fn test_empty_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = RandomFileFromDir::new(temp_dir.path()).render(&mut Fake::seeded(5));
        assert!(matches!(result, Err(FakeFileError::EmptySource { .. })));
    }
}
