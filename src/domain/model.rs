use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

/// Provenance attached to every generated file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Absolute location in the storage backend. Only set once the file is saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    /// Archive member name -> member provenance, in insertion order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub inner: IndexMap<String, FileData>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FileData {
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn insert_extra(&mut self, key: &str, value: impl Into<serde_json::Value>) {
        self.extra.insert(key.to_string(), value.into());
    }
}

/// Bytes produced by a provider, before they are persisted anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub bytes: Vec<u8>,
    pub extension: String,
    pub data: FileData,
}

impl Rendered {
    pub fn new(bytes: Vec<u8>, extension: impl Into<String>, data: FileData) -> Self {
        Self {
            bytes,
            extension: extension.into(),
            data,
        }
    }
}

/// Path of a saved file, relative to the storage root.
#[derive(Debug, Clone, PartialEq)]
pub struct StringValue {
    pub path: String,
    pub data: FileData,
}

impl StringValue {
    pub fn new(path: String, data: FileData) -> Self {
        Self { path, data }
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for StringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl AsRef<str> for StringValue {
    fn as_ref(&self) -> &str {
        &self.path
    }
}

/// Raw content of a generated file.
#[derive(Debug, Clone, PartialEq)]
pub struct BytesValue {
    pub bytes: Vec<u8>,
    pub extension: String,
    pub data: FileData,
}

impl BytesValue {
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<Rendered> for BytesValue {
    fn from(rendered: Rendered) -> Self {
        Self {
            bytes: rendered.bytes,
            extension: rendered.extension,
            data: rendered.data,
        }
    }
}

impl Deref for BytesValue {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Encodings available to the image providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterFormat {
    Ico,
    Jpeg,
    #[default]
    Png,
    Webp,
}

impl RasterFormat {
    pub fn extension(self) -> &'static str {
        match self {
            RasterFormat::Ico => "ico",
            RasterFormat::Jpeg => "jpg",
            RasterFormat::Png => "png",
            RasterFormat::Webp => "webp",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Naming {
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub basename: Option<String>,
}

impl Naming {
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            basename: None,
        }
    }

    pub fn basename(basename: impl Into<String>) -> Self {
        Self {
            prefix: None,
            basename: Some(basename.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_data_serialization_skips_empty_fields() {
        let mut data = FileData::with_content("hello");
        data.insert_extra("size", serde_json::json!([16, 16]));

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["content"], "hello");
        assert_eq!(json["extra"]["size"][0], 16);
        assert!(json.get("filename").is_none());
        assert!(json.get("inner").is_none());
    }

    #[test]
    fn test_bytes_value_derefs_to_slice() {
        let value = BytesValue::from(Rendered::new(vec![1, 2, 3], "bin", FileData::default()));
        assert_eq!(value.len(), 3);
        assert_eq!(&value[..], &[1, 2, 3]);
        assert_eq!(value.extension, "bin");
    }
}
