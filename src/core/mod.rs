pub mod batch;
pub mod fake;
pub mod inner;
pub mod registry;
pub mod template;

pub use batch::{BatchEngine, FileJob};
pub use fake::Fake;
pub use registry::{provider_names, resolve_provider};
