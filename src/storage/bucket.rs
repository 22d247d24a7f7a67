//! Cloud-style storage: objects addressed as `<scheme>://<bucket>/<key>`.
//!
//! The bucket layout is backend independent; an [`ObjectStore`] decides where
//! the bytes actually live. [`FsObjectStore`] maps buckets to local
//! directories, `S3ObjectStore` (feature `s3`) talks to AWS S3.

use crate::domain::ports::Storage;
use crate::storage::{generate_name, DEFAULT_REL_PATH};
use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;
use std::fmt::Debug;
use std::fs;
use std::path::PathBuf;

pub trait ObjectStore: Send + Sync + Debug {
    fn scheme(&self) -> &str;
    fn put(&self, bucket: &str, key: &str, data: &[u8]) -> Result<()>;
    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;
    fn exists(&self, bucket: &str, key: &str) -> Result<bool>;
    fn delete(&self, bucket: &str, key: &str) -> Result<()>;
}

/// Buckets are directories below `root`.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
    scheme: String,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            scheme: "gs".to_string(),
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    fn path(&self, bucket: &str, key: &str) -> PathBuf {
        self.root.join(bucket).join(key)
    }
}

impl ObjectStore for FsObjectStore {
    fn scheme(&self) -> &str {
        &self.scheme
    }

    fn put(&self, bucket: &str, key: &str, data: &[u8]) -> Result<()> {
        let path = self.path(bucket, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        Ok(())
    }

    fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.path(bucket, key))?)
    }

    fn exists(&self, bucket: &str, key: &str) -> Result<bool> {
        Ok(self.path(bucket, key).is_file())
    }

    fn delete(&self, bucket: &str, key: &str) -> Result<()> {
        fs::remove_file(self.path(bucket, key))?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct BucketStorage<O: ObjectStore> {
    bucket_name: String,
    rel_path: String,
    store: O,
}

impl<O: ObjectStore> BucketStorage<O> {
    pub fn new(store: O, bucket_name: impl Into<String>, rel_path: impl Into<String>) -> Result<Self> {
        let bucket_name = bucket_name.into();
        validate_non_empty_string("bucket_name", &bucket_name)?;
        Ok(Self {
            bucket_name,
            rel_path: rel_path.into(),
            store,
        })
    }

    pub fn with_default_rel_path(store: O, bucket_name: impl Into<String>) -> Result<Self> {
        Self::new(store, bucket_name, DEFAULT_REL_PATH)
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Accepts both bare keys and full `<scheme>://<bucket>/<key>` locations.
    fn key<'a>(&self, filename: &'a str) -> &'a str {
        let prefix = format!("{}://{}/", self.store.scheme(), self.bucket_name);
        filename.strip_prefix(prefix.as_str()).unwrap_or(filename)
    }
}

impl<O: ObjectStore> Storage for BucketStorage<O> {
    fn generate_filename(
        &self,
        extension: &str,
        prefix: Option<&str>,
        basename: Option<&str>,
    ) -> Result<String> {
        let name = generate_name(extension, prefix, basename)?;
        let rel_path = self.rel_path.trim_matches('/');
        if rel_path.is_empty() {
            Ok(name)
        } else {
            Ok(format!("{}/{}", rel_path, name))
        }
    }

    fn write_bytes(&self, filename: &str, data: &[u8]) -> Result<usize> {
        let key = self.key(filename);
        tracing::debug!("Putting {} bytes to {}/{}", data.len(), self.bucket_name, key);
        self.store.put(&self.bucket_name, key, data)?;
        Ok(data.len())
    }

    fn read_bytes(&self, filename: &str) -> Result<Vec<u8>> {
        self.store.get(&self.bucket_name, self.key(filename))
    }

    fn exists(&self, filename: &str) -> Result<bool> {
        self.store.exists(&self.bucket_name, self.key(filename))
    }

    fn unlink(&self, filename: &str) -> Result<()> {
        self.store.delete(&self.bucket_name, self.key(filename))
    }

    fn relpath(&self, filename: &str) -> String {
        self.key(filename).to_string()
    }

    fn abspath(&self, filename: &str) -> String {
        format!(
            "{}://{}/{}",
            self.store.scheme(),
            self.bucket_name,
            self.key(filename)
        )
    }

    fn describe(&self) -> String {
        format!(
            "BucketStorage({}://{}, rel_path={})",
            self.store.scheme(),
            self.bucket_name,
            self.rel_path
        )
    }
}

#[cfg(feature = "s3")]
mod s3 {
    use super::ObjectStore;
    use crate::utils::error::{FakeFileError, Result};
    use aws_sdk_s3::primitives::ByteStream;
    use aws_sdk_s3::Client as S3Client;
    use tokio::runtime::Runtime;

    /// AWS S3 backend. Owns a small runtime so callers stay synchronous.
    #[derive(Debug)]
    pub struct S3ObjectStore {
        client: S3Client,
        runtime: Runtime,
    }

    fn s3_error(action: &str, e: impl std::fmt::Display) -> FakeFileError {
        FakeFileError::converter("s3", format!("Failed to {}: {}", action, e))
    }

    impl S3ObjectStore {
        pub fn new(client: S3Client) -> Result<Self> {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            Ok(Self { client, runtime })
        }

        /// Client configured from the environment (`AWS_REGION`, credentials chain, ...).
        pub fn from_env() -> Result<Self> {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let config = runtime.block_on(aws_config::load_defaults(
                aws_config::BehaviorVersion::latest(),
            ));
            Ok(Self {
                client: S3Client::new(&config),
                runtime,
            })
        }
    }

    impl ObjectStore for S3ObjectStore {
        fn scheme(&self) -> &str {
            "s3"
        }

        fn put(&self, bucket: &str, key: &str, data: &[u8]) -> Result<()> {
            self.runtime
                .block_on(
                    self.client
                        .put_object()
                        .bucket(bucket)
                        .key(key)
                        .body(ByteStream::from(data.to_vec()))
                        .send(),
                )
                .map_err(|e| s3_error("write to S3", e))?;
            Ok(())
        }

        fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
            self.runtime.block_on(async {
                let resp = self
                    .client
                    .get_object()
                    .bucket(bucket)
                    .key(key)
                    .send()
                    .await
                    .map_err(|e| s3_error("read from S3", e))?;

                let data = resp
                    .body
                    .collect()
                    .await
                    .map_err(|e| s3_error("collect S3 data", e))?;

                Ok(data.into_bytes().to_vec())
            })
        }

        fn exists(&self, bucket: &str, key: &str) -> Result<bool> {
            let result = self
                .runtime
                .block_on(self.client.head_object().bucket(bucket).key(key).send());
            match result {
                Ok(_) => Ok(true),
                Err(err) => {
                    let service_error = err.into_service_error();
                    if service_error.is_not_found() {
                        Ok(false)
                    } else {
                        Err(s3_error("check S3 object", service_error))
                    }
                }
            }
        }

        fn delete(&self, bucket: &str, key: &str) -> Result<()> {
            self.runtime
                .block_on(self.client.delete_object().bucket(bucket).key(key).send())
                .map_err(|e| s3_error("delete from S3", e))?;
            Ok(())
        }
    }
}

#[cfg(feature = "s3")]
pub use s3::S3ObjectStore;
