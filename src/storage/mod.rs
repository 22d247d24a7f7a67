pub mod bucket;
pub mod filesystem;
pub mod memory;

pub use bucket::{BucketStorage, FsObjectStore, ObjectStore};
#[cfg(feature = "s3")]
pub use bucket::S3ObjectStore;
pub use filesystem::FileSystemStorage;
pub use memory::MemoryStorage;

use crate::utils::error::Result;
use crate::utils::validation::validate_extension;
use rand::distributions::Alphanumeric;
use rand::Rng;

pub const DEFAULT_REL_PATH: &str = "tmp";
pub const DEFAULT_PREFIX: &str = "tmp";

/// File name (no directory) for a new file.
///
/// `<basename>.<extension>` when a basename is given, otherwise
/// `<prefix><8 random alphanumerics>.<extension>`.
pub fn generate_name(extension: &str, prefix: Option<&str>, basename: Option<&str>) -> Result<String> {
    validate_extension("extension", extension)?;

    if let Some(basename) = basename.filter(|b| !b.is_empty()) {
        return Ok(format!("{}.{}", basename, extension));
    }

    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    Ok(format!(
        "{}{}.{}",
        prefix.unwrap_or(DEFAULT_PREFIX),
        suffix,
        extension
    ))
}
