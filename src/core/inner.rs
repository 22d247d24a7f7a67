//! Members of container files (ZIP, TAR, EML attachments).
//!
//! Every member is rendered in memory by an arbitrary provider. Containers are
//! providers themselves, so an inner file may be another archive with its own
//! inner files.

use crate::core::fake::Fake;
use crate::domain::model::{FileData, Naming, Rendered};
use crate::domain::ports::FileProvider;
use crate::providers::txt_file::TxtFile;
use crate::storage::generate_name;
use crate::utils::error::{FakeFileError, Result};
use indexmap::IndexMap;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

pub const DEFAULT_INNER_COUNT: usize = 5;

#[derive(Debug, Clone)]
pub struct InnerFile {
    pub provider: Arc<dyn FileProvider>,
    pub naming: Naming,
}

impl InnerFile {
    pub fn new(provider: impl FileProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
            naming: Naming::default(),
        }
    }

    pub fn from_arc(provider: Arc<dyn FileProvider>) -> Self {
        Self {
            provider,
            naming: Naming::default(),
        }
    }

    pub fn naming(mut self, naming: Naming) -> Self {
        self.naming = naming;
        self
    }
}

#[derive(Debug, Clone)]
pub enum InnerFiles {
    /// Plain-text members, optionally from a content template.
    Text { content: Option<String> },
    /// The same inner file, produced `count` times.
    Each(InnerFile),
    /// Every entry exactly once, in order. `count` does not apply.
    List(Vec<InnerFile>),
    /// `count` members, each from a uniformly random entry.
    FuzzyChoice(Vec<InnerFile>),
}

impl Default for InnerFiles {
    fn default() -> Self {
        InnerFiles::Text { content: None }
    }
}

/// Member layout shared by ZIP, TAR and EML. `inner` is never read from
/// plain options; the registry builds it from an `inner` description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveOptions {
    pub count: usize,
    /// Directory inside the container; empty means the container root.
    pub directory: String,
    /// Name prefix for members whose inner file does not name itself.
    pub prefix: Option<String>,
    #[serde(skip)]
    pub inner: InnerFiles,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            count: DEFAULT_INNER_COUNT,
            directory: String::new(),
            prefix: None,
            inner: InnerFiles::default(),
        }
    }
}

impl ArchiveOptions {
    pub fn new(inner: InnerFiles) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Member {
    pub name: String,
    pub rendered: Rendered,
}

pub fn compose(fake: &mut Fake, options: &ArchiveOptions) -> Result<Vec<Member>> {
    let plan: Vec<InnerFile> = match &options.inner {
        InnerFiles::Text { content } => {
            let txt = match content {
                Some(content) => TxtFile::with_content(content.clone()),
                None => TxtFile::default(),
            };
            let inner = InnerFile::new(txt);
            vec![inner; options.count]
        }
        InnerFiles::Each(inner) => vec![inner.clone(); options.count],
        InnerFiles::List(list) => list.clone(),
        InnerFiles::FuzzyChoice(choices) => {
            if choices.is_empty() {
                return Err(FakeFileError::EmptySource {
                    message: "fuzzy choice needs at least one inner file".to_string(),
                });
            }
            let mut plan = Vec::with_capacity(options.count);
            for _ in 0..options.count {
                if let Some(choice) = choices.choose(fake.rng()) {
                    plan.push(choice.clone());
                }
            }
            plan
        }
    };

    let mut seen = HashSet::new();
    let mut members = Vec::with_capacity(plan.len());
    for inner in plan {
        let rendered = inner.provider.render(fake)?;
        let prefix = inner.naming.prefix.as_deref().or(options.prefix.as_deref());
        let file_name = generate_name(&rendered.extension, prefix, inner.naming.basename.as_deref())?;
        let name = unique_name(
            &mut seen,
            &join_directory(&options.directory, &file_name),
            &rendered.extension,
        );
        tracing::debug!(
            "Composed inner file {} from {} ({} bytes)",
            name,
            inner.provider.name(),
            rendered.bytes.len()
        );
        members.push(Member { name, rendered });
    }

    Ok(members)
}

/// Provenance of every member, keyed by member name.
pub fn inner_data(members: &[Member]) -> IndexMap<String, FileData> {
    members
        .iter()
        .map(|m| (m.name.clone(), m.rendered.data.clone()))
        .collect()
}

fn join_directory(directory: &str, file_name: &str) -> String {
    let directory = directory.trim_matches('/');
    if directory.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", directory, file_name)
    }
}

fn unique_name(seen: &mut HashSet<String>, name: &str, extension: &str) -> String {
    if seen.insert(name.to_string()) {
        return name.to_string();
    }

    let suffix = format!(".{}", extension);
    let stem = name.strip_suffix(suffix.as_str()).unwrap_or(name);
    let mut n = 1;
    loop {
        let candidate = format!("{}-{}{}", stem, n, suffix);
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::bin_file::BinFile;

    #[test]
    fn test_default_composes_text_members() {
        let mut fake = Fake::seeded(1);
        let members = compose(&mut fake, &ArchiveOptions::default()).unwrap();
        assert_eq!(members.len(), DEFAULT_INNER_COUNT);
        assert!(members.iter().all(|m| m.name.ends_with(".txt")));
        assert!(members.iter().all(|m| !m.rendered.bytes.is_empty()));
    }

    #[test]
    fn test_text_content_template_is_used() {
        let mut fake = Fake::seeded(1);
        let options = ArchiveOptions::new(InnerFiles::Text {
            content: Some("Lorem ipsum".to_string()),
        })
        .count(2);
        let members = compose(&mut fake, &options).unwrap();
        assert_eq!(members[0].rendered.bytes, b"Lorem ipsum");
        assert_eq!(members[1].rendered.data.content.as_deref(), Some("Lorem ipsum"));
    }

    #[test]
    fn test_list_ignores_count() {
        let mut fake = Fake::seeded(1);
        let options = ArchiveOptions::new(InnerFiles::List(vec![
            InnerFile::new(TxtFile::with_content("a")),
            InnerFile::new(BinFile::with_length(8)),
        ]))
        .count(10);
        let members = compose(&mut fake, &options).unwrap();
        assert_eq!(members.len(), 2);
        assert!(members[0].name.ends_with(".txt"));
        assert!(members[1].name.ends_with(".bin"));
    }

    #[test]
    fn test_fuzzy_choice_draws_from_choices() {
        let mut fake = Fake::seeded(2);
        let options = ArchiveOptions::new(InnerFiles::FuzzyChoice(vec![
            InnerFile::new(TxtFile::with_content("a")),
            InnerFile::new(BinFile::with_length(8)),
        ]))
        .count(20);
        let members = compose(&mut fake, &options).unwrap();
        assert_eq!(members.len(), 20);
        assert!(members
            .iter()
            .all(|m| m.name.ends_with(".txt") || m.name.ends_with(".bin")));
    }

    #[test]
    fn test_fuzzy_choice_requires_choices() {
        let mut fake = Fake::seeded(2);
        let options = ArchiveOptions::new(InnerFiles::FuzzyChoice(vec![]));
        assert!(matches!(
            compose(&mut fake, &options),
            Err(FakeFileError::EmptySource { .. })
        ));
    }

    #[test]
    fn test_duplicate_basenames_are_suffixed() {
        let mut fake = Fake::seeded(3);
        let inner = InnerFile::new(TxtFile::with_content("x")).naming(Naming::basename("same"));
        let options = ArchiveOptions::new(InnerFiles::Each(inner))
            .count(3)
            .directory("docs/");
        let names: Vec<String> = compose(&mut fake, &options)
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["docs/same.txt", "docs/same-1.txt", "docs/same-2.txt"]);
    }

    #[test]
    fn test_archive_prefix_applies_to_members() {
        let mut fake = Fake::seeded(3);
        let options = ArchiveOptions::default().count(2).prefix("zzz_file_");
        let members = compose(&mut fake, &options).unwrap();
        assert!(members.iter().all(|m| m.name.starts_with("zzz_file_")));
    }
}
