use crate::domain::ports::Storage;
use crate::storage::{generate_name, DEFAULT_REL_PATH};
use crate::utils::error::{FakeFileError, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Keeps every file in memory. Clones share the same files.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    rel_path: String,
    files: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new(DEFAULT_REL_PATH)
    }
}

impl MemoryStorage {
    pub fn new(rel_path: impl Into<String>) -> Self {
        Self {
            rel_path: rel_path.into(),
            files: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    fn files(&self) -> MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_file(&self, filename: &str) -> Option<Vec<u8>> {
        self.files().get(filename).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.files().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.files().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files().is_empty()
    }
}

fn not_found(filename: &str) -> FakeFileError {
    FakeFileError::IoError(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("File not found: {}", filename),
    ))
}

impl Storage for MemoryStorage {
    fn generate_filename(
        &self,
        extension: &str,
        prefix: Option<&str>,
        basename: Option<&str>,
    ) -> Result<String> {
        let name = generate_name(extension, prefix, basename)?;
        if self.rel_path.is_empty() {
            Ok(name)
        } else {
            Ok(format!("{}/{}", self.rel_path.trim_end_matches('/'), name))
        }
    }

    fn write_bytes(&self, filename: &str, data: &[u8]) -> Result<usize> {
        self.files().insert(filename.to_string(), data.to_vec());
        Ok(data.len())
    }

    fn read_bytes(&self, filename: &str) -> Result<Vec<u8>> {
        self.get_file(filename).ok_or_else(|| not_found(filename))
    }

    fn exists(&self, filename: &str) -> Result<bool> {
        Ok(self.files().contains_key(filename))
    }

    fn unlink(&self, filename: &str) -> Result<()> {
        self.files()
            .remove(filename)
            .map(|_| ())
            .ok_or_else(|| not_found(filename))
    }

    fn relpath(&self, filename: &str) -> String {
        filename.to_string()
    }

    fn abspath(&self, filename: &str) -> String {
        format!("memory://{}", filename)
    }

    fn describe(&self) -> String {
        format!("MemoryStorage(rel_path={})", self.rel_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_files() {
        let storage = MemoryStorage::default();
        let handle = storage.clone();

        let filename = storage.generate_filename("txt", None, Some("a")).unwrap();
        assert_eq!(filename, "tmp/a.txt");
        storage.write_text(&filename, "hello").unwrap();

        assert_eq!(handle.get_file("tmp/a.txt").unwrap(), b"hello");
        assert_eq!(handle.len(), 1);
        assert_eq!(handle.abspath(&filename), "memory://tmp/a.txt");
    }

    #[test]
    fn test_missing_file_errors() {
        let storage = MemoryStorage::default();
        assert!(!storage.exists("nope").unwrap());
        assert!(storage.read_bytes("nope").is_err());
        assert!(storage.unlink("nope").is_err());
    }
}
