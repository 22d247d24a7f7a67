use crate::core::fake::Fake;
use crate::core::registry::resolve_provider;
use crate::domain::model::{Naming, StringValue};
use crate::domain::ports::{FileProviderExt, Storage};
use crate::utils::error::Result;
use crate::utils::validation::validate_positive_number;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_count() -> usize {
    1
}

/// `count` files from one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileJob {
    pub provider: String,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(flatten)]
    pub naming: Naming,
    #[serde(default)]
    pub options: Value,
}

impl FileJob {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            count: default_count(),
            naming: Naming::default(),
            options: Value::Null,
        }
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }
}

/// Runs jobs against one storage backend with one fake-data source.
pub struct BatchEngine {
    storage: Box<dyn Storage>,
    fake: Fake,
}

impl BatchEngine {
    pub fn new(storage: Box<dyn Storage>, fake: Fake) -> Self {
        Self { storage, fake }
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn run(&mut self, jobs: &[FileJob]) -> Result<Vec<StringValue>> {
        tracing::info!("Generating {} job(s) into {}", jobs.len(), self.storage.describe());

        let mut saved = Vec::new();
        for job in jobs {
            validate_positive_number("count", job.count, 1)?;
            let provider = resolve_provider(&job.provider, &job.options)?;
            for _ in 0..job.count {
                let value = provider.save(&mut self.fake, self.storage.as_ref(), &job.naming)?;
                tracing::debug!("Saved {}", value);
                saved.push(value);
            }
            tracing::info!("{}: {} file(s)", job.provider, job.count);
        }

        Ok(saved)
    }
}
