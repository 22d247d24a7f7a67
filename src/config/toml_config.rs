use crate::core::batch::FileJob;
use crate::core::registry::is_provider;
use crate::domain::ports::Storage;
use crate::storage::{BucketStorage, FileSystemStorage, FsObjectStore, DEFAULT_REL_PATH};
use crate::utils::error::{FakeFileError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Batch file for `fake-file run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Fixed seed for reproducible content.
    #[serde(default)]
    pub seed: Option<u64>,
    pub storage: StorageConfig,
    #[serde(default)]
    pub files: Vec<FileJob>,
}

fn default_rel_path() -> String {
    DEFAULT_REL_PATH.to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketBackend {
    #[default]
    Fs,
    S3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    Filesystem {
        root_path: String,
        #[serde(default = "default_rel_path")]
        rel_path: String,
    },
    Bucket {
        bucket_name: String,
        #[serde(default = "default_rel_path")]
        rel_path: String,
        #[serde(default)]
        backend: BucketBackend,
        /// Directory holding the buckets for the `fs` backend.
        #[serde(default)]
        root_path: Option<String>,
        #[serde(default)]
        scheme: Option<String>,
    },
}

impl StorageConfig {
    pub fn build(&self) -> Result<Box<dyn Storage>> {
        match self {
            StorageConfig::Filesystem { root_path, rel_path } => {
                Ok(Box::new(FileSystemStorage::new(root_path, rel_path.clone())))
            }
            StorageConfig::Bucket {
                bucket_name,
                rel_path,
                backend: BucketBackend::Fs,
                root_path,
                scheme,
            } => {
                let root_path = root_path.as_ref().ok_or_else(|| FakeFileError::MissingConfigError {
                    field: "storage.root_path".to_string(),
                })?;
                let mut store = FsObjectStore::new(root_path);
                if let Some(scheme) = scheme {
                    store = store.with_scheme(scheme.clone());
                }
                Ok(Box::new(BucketStorage::new(store, bucket_name.clone(), rel_path.clone())?))
            }
            #[cfg(feature = "s3")]
            StorageConfig::Bucket {
                bucket_name,
                rel_path,
                backend: BucketBackend::S3,
                ..
            } => {
                let store = crate::storage::S3ObjectStore::from_env()?;
                Ok(Box::new(BucketStorage::new(store, bucket_name.clone(), rel_path.clone())?))
            }
            #[cfg(not(feature = "s3"))]
            StorageConfig::Bucket {
                backend: BucketBackend::S3,
                ..
            } => Err(FakeFileError::ConfigError {
                message: "the s3 backend needs the `s3` feature".to_string(),
            }),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as is.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        match &self.storage {
            StorageConfig::Filesystem { root_path, .. } => {
                validate_path("storage.root_path", root_path)?;
            }
            StorageConfig::Bucket {
                bucket_name,
                backend,
                root_path,
                ..
            } => {
                validate_non_empty_string("storage.bucket_name", bucket_name)?;
                if *backend == BucketBackend::Fs {
                    match root_path {
                        Some(root_path) => validate_path("storage.root_path", root_path)?,
                        None => {
                            return Err(FakeFileError::MissingConfigError {
                                field: "storage.root_path".to_string(),
                            })
                        }
                    }
                }
            }
        }

        if self.files.is_empty() {
            return Err(FakeFileError::MissingConfigError {
                field: "files".to_string(),
            });
        }

        for (i, job) in self.files.iter().enumerate() {
            if !is_provider(&job.provider) {
                return Err(FakeFileError::InvalidConfigValueError {
                    field: format!("files[{}].provider", i),
                    value: job.provider.clone(),
                    reason: "Unknown provider. Run `fake-file list` for the known names".to_string(),
                });
            }
            validate_positive_number(&format!("files[{}].count", i), job.count, 1)?;

            let endpoint = job
                .options
                .get("generator_options")
                .and_then(|o| o.get("endpoint"))
                .and_then(|e| e.as_str());
            if let Some(endpoint) = endpoint {
                validate_url(&format!("files[{}].options.generator_options.endpoint", i), endpoint)?;
            }
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
