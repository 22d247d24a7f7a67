//! Fake files for tests: documents, images, audio and archives, rendered in
//! memory and written to a pluggable storage backend.
//!
//! ```no_run
//! use fake_file::{Fake, FileProviderExt, FileSystemStorage, Naming, TxtFile};
//!
//! let mut fake = Fake::new();
//! let storage = FileSystemStorage::default();
//! let file = TxtFile::default().save(&mut fake, &storage, &Naming::prefix("zzz_"))?;
//! println!("{} ({:?})", file, file.data.content);
//! # Ok::<(), fake_file::FakeFileError>(())
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod providers;
pub mod storage;
pub mod utils;

pub use crate::core::inner::{ArchiveOptions, InnerFile, InnerFiles};
pub use crate::core::{provider_names, resolve_provider, BatchEngine, Fake, FileJob};
pub use crate::core::fake::{Hue, Luminosity};
pub use domain::model::{BytesValue, FileData, Naming, RasterFormat, Rendered, StringValue};
pub use domain::ports::{
    FileProvider, FileProviderExt, ImageGenerator, Mp3Generator, PdfGenerator, Storage,
};
pub use providers::*;
pub use storage::{BucketStorage, FileSystemStorage, FsObjectStore, MemoryStorage, ObjectStore};
pub use utils::error::{FakeFileError, Result};
