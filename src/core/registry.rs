//! Name-based lookup of providers and generators.
//!
//! Generators are addressed either by a short alias (`silent`) or by their
//! Rust path (`fake_file::providers::mp3::SilentMp3Generator`); `.` works as
//! a separator too. Providers are addressed by their registry name and built
//! from a JSON options object. Archive and email providers accept an
//! `inner` description that is resolved recursively.

use crate::core::inner::{InnerFile, InnerFiles};
use crate::domain::model::{Naming, RasterFormat};
use crate::domain::ports::{FileProvider, ImageGenerator, Mp3Generator, PdfGenerator};
use crate::providers::images::{RasterTextGenerator, WkhtmltoimageGenerator};
use crate::providers::mp3::{HttpTtsMp3Generator, Mp3File, SilentMp3Generator};
use crate::providers::pdf::{MinimalPdfGenerator, PdfFile, WkhtmltopdfGenerator};
use crate::providers::{
    BinFile, CsvFile, DocxFile, EmlFile, EpubFile, FileFromPath, GenericFile, GraphicImageFile,
    ImageFile, OdsFile, OdtFile, RandomFileFromDir, RtfFile, SvgFile, TarFile, TxtFile, XlsxFile,
    XmlFile, ZipFile,
};
use crate::utils::error::{FakeFileError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

const PROVIDER_NAMES: &[&str] = &[
    "bin_file",
    "csv_file",
    "docx_file",
    "eml_file",
    "epub_file",
    "file_from_path",
    "generic_file",
    "graphic_ico_file",
    "graphic_jpeg_file",
    "graphic_png_file",
    "graphic_webp_file",
    "ico_file",
    "jpeg_file",
    "mp3_file",
    "odt_file",
    "ods_file",
    "pdf_file",
    "png_file",
    "random_file_from_dir",
    "rtf_file",
    "svg_file",
    "tar_file",
    "txt_file",
    "webp_file",
    "xlsx_file",
    "xml_file",
    "zip_file",
];

/// Trait objects that cannot be built: they only describe a generator.
const ABSTRACT_GENERATORS: &[&str] = &["ImageGenerator", "Mp3Generator", "PdfGenerator"];
const PORTS_MODULE: &str = "fake_file::domain::ports";

struct GeneratorEntry<T: ?Sized> {
    alias: &'static str,
    name: &'static str,
    modules: &'static [&'static str],
    build: fn(&Value) -> Result<Arc<T>>,
}

impl<T: ?Sized> GeneratorEntry<T> {
    fn path(&self) -> String {
        format!("{}::{}", self.modules[0], self.name)
    }
}

fn build_mp3<G>(kwargs: &Value) -> Result<Arc<dyn Mp3Generator>>
where
    G: Mp3Generator + DeserializeOwned + 'static,
{
    Ok(Arc::new(parse_options::<G>("generator_options", kwargs)?))
}

fn build_pdf<G>(kwargs: &Value) -> Result<Arc<dyn PdfGenerator>>
where
    G: PdfGenerator + DeserializeOwned + 'static,
{
    Ok(Arc::new(parse_options::<G>("generator_options", kwargs)?))
}

fn build_image<G>(kwargs: &Value) -> Result<Arc<dyn ImageGenerator>>
where
    G: ImageGenerator + DeserializeOwned + 'static,
{
    Ok(Arc::new(parse_options::<G>("generator_options", kwargs)?))
}

static MP3_GENERATORS: &[GeneratorEntry<dyn Mp3Generator>] = &[
    GeneratorEntry {
        alias: "silent",
        name: "SilentMp3Generator",
        modules: &["fake_file::providers::mp3", "fake_file::providers::mp3::silent"],
        build: build_mp3::<SilentMp3Generator>,
    },
    GeneratorEntry {
        alias: "http_tts",
        name: "HttpTtsMp3Generator",
        modules: &["fake_file::providers::mp3", "fake_file::providers::mp3::http_tts"],
        build: build_mp3::<HttpTtsMp3Generator>,
    },
];

static PDF_GENERATORS: &[GeneratorEntry<dyn PdfGenerator>] = &[
    GeneratorEntry {
        alias: "minimal",
        name: "MinimalPdfGenerator",
        modules: &["fake_file::providers::pdf", "fake_file::providers::pdf::minimal"],
        build: build_pdf::<MinimalPdfGenerator>,
    },
    GeneratorEntry {
        alias: "wkhtmltopdf",
        name: "WkhtmltopdfGenerator",
        modules: &["fake_file::providers::pdf", "fake_file::providers::pdf::wkhtmltopdf"],
        build: build_pdf::<WkhtmltopdfGenerator>,
    },
];

static IMAGE_GENERATORS: &[GeneratorEntry<dyn ImageGenerator>] = &[
    GeneratorEntry {
        alias: "raster",
        name: "RasterTextGenerator",
        modules: &["fake_file::providers::images", "fake_file::providers::images::raster"],
        build: build_image::<RasterTextGenerator>,
    },
    GeneratorEntry {
        alias: "wkhtmltoimage",
        name: "WkhtmltoimageGenerator",
        modules: &[
            "fake_file::providers::images",
            "fake_file::providers::images::wkhtmltoimage",
        ],
        build: build_image::<WkhtmltoimageGenerator>,
    },
];

fn resolve_generator<T: ?Sized>(
    entries: &[GeneratorEntry<T>],
    path: &str,
    kwargs: &Value,
) -> Result<Arc<T>> {
    let path = path.trim();
    if let Some(entry) = entries.iter().find(|e| e.alias == path) {
        return (entry.build)(kwargs);
    }

    let normalized = path.replace('.', "::");
    let (module, name) = normalized.rsplit_once("::").ok_or_else(|| {
        FakeFileError::resolve(path, "expected an alias or a path like `module::Name`")
    })?;

    if module == PORTS_MODULE && ABSTRACT_GENERATORS.contains(&name) {
        return Err(FakeFileError::resolve(path, format!("{} is abstract", name)));
    }
    if !entries.iter().any(|e| e.modules.contains(&module)) {
        return Err(FakeFileError::resolve(path, format!("unknown module `{}`", module)));
    }

    let entry = entries
        .iter()
        .find(|e| e.name == name && e.modules.contains(&module))
        .ok_or_else(|| {
            FakeFileError::resolve(path, format!("no generator `{}` in `{}`", name, module))
        })?;
    tracing::debug!("Resolved {} to {}", path, entry.path());
    (entry.build)(kwargs)
}

pub fn resolve_mp3_generator(path: &str, kwargs: &Value) -> Result<Arc<dyn Mp3Generator>> {
    resolve_generator(MP3_GENERATORS, path, kwargs)
}

pub fn resolve_pdf_generator(path: &str, kwargs: &Value) -> Result<Arc<dyn PdfGenerator>> {
    resolve_generator(PDF_GENERATORS, path, kwargs)
}

pub fn resolve_image_generator(path: &str, kwargs: &Value) -> Result<Arc<dyn ImageGenerator>> {
    resolve_generator(IMAGE_GENERATORS, path, kwargs)
}

/// `(alias, full path)` of every registered generator.
pub fn generator_paths() -> Vec<(&'static str, String)> {
    MP3_GENERATORS
        .iter()
        .map(|e| (e.alias, e.path()))
        .chain(PDF_GENERATORS.iter().map(|e| (e.alias, e.path())))
        .chain(IMAGE_GENERATORS.iter().map(|e| (e.alias, e.path())))
        .collect()
}

pub fn provider_names() -> &'static [&'static str] {
    PROVIDER_NAMES
}

pub fn is_provider(name: &str) -> bool {
    PROVIDER_NAMES.contains(&name)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InnerMode {
    Each,
    List,
    Fuzzy,
    #[default]
    Text,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InnerFileSpec {
    pub provider: String,
    #[serde(default)]
    pub options: Value,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub basename: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InnerSpec {
    pub mode: InnerMode,
    pub files: Vec<InnerFileSpec>,
    /// Template for `text` mode.
    pub content: Option<String>,
}

impl InnerFileSpec {
    fn build(&self) -> Result<InnerFile> {
        let provider = resolve_provider(&self.provider, &self.options)?;
        Ok(InnerFile::from_arc(provider).naming(Naming {
            prefix: self.prefix.clone(),
            basename: self.basename.clone(),
        }))
    }
}

impl InnerSpec {
    fn resolve_files(&self) -> Result<Vec<InnerFile>> {
        self.files.iter().map(InnerFileSpec::build).collect()
    }

    pub fn build(&self) -> Result<InnerFiles> {
        match self.mode {
            InnerMode::Text if !self.files.is_empty() => Err(FakeFileError::invalid_option(
                "inner.files",
                "`text` mode takes no files; use `each`, `list` or `fuzzy`",
            )),
            InnerMode::Text => Ok(InnerFiles::Text {
                content: self.content.clone(),
            }),
            InnerMode::Each => {
                let mut files = self.resolve_files()?.into_iter();
                match (files.next(), files.next()) {
                    (Some(file), None) => Ok(InnerFiles::Each(file)),
                    _ => Err(FakeFileError::invalid_option(
                        "inner.files",
                        "`each` mode takes exactly one file",
                    )),
                }
            }
            InnerMode::List => Ok(InnerFiles::List(self.resolve_files()?)),
            InnerMode::Fuzzy => Ok(InnerFiles::FuzzyChoice(self.resolve_files()?)),
        }
    }
}

fn parse_options<T: DeserializeOwned>(option: &str, value: &Value) -> Result<T> {
    let value = match value {
        Value::Null => Value::Object(Map::new()),
        other => other.clone(),
    };
    serde_json::from_value(value).map_err(|e| FakeFileError::invalid_option(option, e.to_string()))
}

fn options_map(name: &str, options: &Value) -> Result<Map<String, Value>> {
    match options {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map.clone()),
        _ => Err(FakeFileError::invalid_option(name, "options must be a JSON object")),
    }
}

fn take_inner(map: &mut Map<String, Value>) -> Result<Option<InnerFiles>> {
    match map.remove("inner") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(parse_options::<InnerSpec>("inner", &value)?.build()?)),
    }
}

fn take_generator(map: &mut Map<String, Value>) -> Result<(Option<String>, Value)> {
    let path = match map.remove("generator") {
        None | Some(Value::Null) => None,
        Some(Value::String(path)) => Some(path),
        Some(_) => {
            return Err(FakeFileError::invalid_option(
                "generator",
                "expected an alias or a path string",
            ))
        }
    };
    let kwargs = map.remove("generator_options").unwrap_or(Value::Null);
    Ok((path, kwargs))
}

fn graphic(name: &str, format: RasterFormat, options: Value) -> Result<Arc<dyn FileProvider>> {
    let mut provider: GraphicImageFile = parse_options(name, &options)?;
    provider.format = format;
    Ok(Arc::new(provider))
}

fn text_image(
    name: &str,
    format: RasterFormat,
    mut map: Map<String, Value>,
) -> Result<Arc<dyn FileProvider>> {
    let (path, kwargs) = take_generator(&mut map)?;
    let mut provider: ImageFile = parse_options(name, &Value::Object(map))?;
    provider.format = format;
    if let Some(path) = path {
        provider.generator = resolve_image_generator(&path, &kwargs)?;
    }
    Ok(Arc::new(provider))
}

/// Build a provider from its registry name and JSON options.
pub fn resolve_provider(name: &str, options: &Value) -> Result<Arc<dyn FileProvider>> {
    let mut map = options_map(name, options)?;
    tracing::debug!("Resolving provider {} with {} option(s)", name, map.len());

    let provider: Arc<dyn FileProvider> = match name {
        "bin_file" => Arc::new(parse_options::<BinFile>(name, &Value::Object(map))?),
        "csv_file" => Arc::new(parse_options::<CsvFile>(name, &Value::Object(map))?),
        "docx_file" => Arc::new(parse_options::<DocxFile>(name, &Value::Object(map))?),
        "epub_file" => Arc::new(parse_options::<EpubFile>(name, &Value::Object(map))?),
        "file_from_path" => Arc::new(parse_options::<FileFromPath>(name, &Value::Object(map))?),
        "generic_file" => Arc::new(parse_options::<GenericFile>(name, &Value::Object(map))?),
        "odt_file" => Arc::new(parse_options::<OdtFile>(name, &Value::Object(map))?),
        "ods_file" => Arc::new(parse_options::<OdsFile>(name, &Value::Object(map))?),
        "random_file_from_dir" => {
            Arc::new(parse_options::<RandomFileFromDir>(name, &Value::Object(map))?)
        }
        "rtf_file" => Arc::new(parse_options::<RtfFile>(name, &Value::Object(map))?),
        "svg_file" => Arc::new(parse_options::<SvgFile>(name, &Value::Object(map))?),
        "txt_file" => Arc::new(parse_options::<TxtFile>(name, &Value::Object(map))?),
        "xlsx_file" => Arc::new(parse_options::<XlsxFile>(name, &Value::Object(map))?),
        "xml_file" => Arc::new(parse_options::<XmlFile>(name, &Value::Object(map))?),
        "ico_file" => text_image(name, RasterFormat::Ico, map)?,
        "jpeg_file" => text_image(name, RasterFormat::Jpeg, map)?,
        "png_file" => text_image(name, RasterFormat::Png, map)?,
        "webp_file" => text_image(name, RasterFormat::Webp, map)?,
        "graphic_ico_file" => graphic(name, RasterFormat::Ico, Value::Object(map))?,
        "graphic_jpeg_file" => graphic(name, RasterFormat::Jpeg, Value::Object(map))?,
        "graphic_png_file" => graphic(name, RasterFormat::Png, Value::Object(map))?,
        "graphic_webp_file" => graphic(name, RasterFormat::Webp, Value::Object(map))?,
        "mp3_file" => {
            let (path, kwargs) = take_generator(&mut map)?;
            let mut provider: Mp3File = parse_options(name, &Value::Object(map))?;
            if let Some(path) = path {
                provider.generator = resolve_mp3_generator(&path, &kwargs)?;
            }
            Arc::new(provider)
        }
        "pdf_file" => {
            let (path, kwargs) = take_generator(&mut map)?;
            let mut provider: PdfFile = parse_options(name, &Value::Object(map))?;
            if let Some(path) = path {
                provider.generator = resolve_pdf_generator(&path, &kwargs)?;
            }
            Arc::new(provider)
        }
        "zip_file" => {
            let inner = take_inner(&mut map)?;
            let mut provider: ZipFile = parse_options(name, &Value::Object(map))?;
            if let Some(inner) = inner {
                provider.archive.inner = inner;
            }
            Arc::new(provider)
        }
        "tar_file" => {
            let inner = take_inner(&mut map)?;
            let mut provider: TarFile = parse_options(name, &Value::Object(map))?;
            if let Some(inner) = inner {
                provider.archive.inner = inner;
            }
            Arc::new(provider)
        }
        "eml_file" => {
            let inner = take_inner(&mut map)?;
            let mut provider: EmlFile = parse_options(name, &Value::Object(map))?;
            if let Some(inner) = inner {
                provider.attachments.inner = inner;
            }
            Arc::new(provider)
        }
        _ => {
            return Err(FakeFileError::resolve(
                name,
                format!("unknown provider; known: {}", PROVIDER_NAMES.join(", ")),
            ))
        }
    };

    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_listed_provider_resolves() {
        for name in provider_names() {
            let options = match *name {
                "file_from_path" => json!({"path": "/tmp/x.txt"}),
                "random_file_from_dir" => json!({"source_dir_path": "/tmp"}),
                "generic_file" => json!({"content": "x", "extension": "txt"}),
                _ => Value::Null,
            };
            let provider = resolve_provider(name, &options).unwrap();
            assert_eq!(provider.name(), *name);
        }
    }

    #[test]
    fn test_unknown_provider() {
        let err = resolve_provider("pptx_file", &Value::Null).unwrap_err();
        assert!(matches!(err, FakeFileError::ResolveError { .. }));
    }

    #[test]
    fn test_generator_aliases_and_paths() {
        assert_eq!(resolve_mp3_generator("silent", &Value::Null).unwrap().name(), "silent");
        assert_eq!(
            resolve_mp3_generator("fake_file::providers::mp3::SilentMp3Generator", &Value::Null)
                .unwrap()
                .name(),
            "silent"
        );
        assert_eq!(
            resolve_pdf_generator("fake_file.providers.pdf.wkhtmltopdf.WkhtmltopdfGenerator", &Value::Null)
                .unwrap()
                .name(),
            "wkhtmltopdf"
        );
    }

    #[test]
    fn test_generator_errors_are_distinguished() {
        let reason = |path: &str| match resolve_mp3_generator(path, &Value::Null) {
            Err(FakeFileError::ResolveError { reason, .. }) => reason,
            other => panic!("unexpected {:?}", other.map(|g| g.name())),
        };
        assert!(reason("NoSeparator").contains("expected"));
        assert!(reason("fake_file::nowhere::SilentMp3Generator").contains("unknown module"));
        assert!(reason("fake_file::providers::mp3::Missing").contains("no generator"));
        assert!(reason("fake_file::domain::ports::Mp3Generator").contains("abstract"));
    }

    #[test]
    fn test_generator_options_are_applied() {
        let err = resolve_mp3_generator("silent", &json!({"chars_per_second": "fast"})).unwrap_err();
        assert!(matches!(err, FakeFileError::InvalidOption { .. }));
    }

    #[test]
    fn test_nested_inner_description() {
        let options = json!({
            "count": 3,
            "inner": {
                "mode": "fuzzy",
                "files": [
                    {"provider": "txt_file", "options": {"content": "hi"}},
                    {"provider": "zip_file", "options": {"count": 1}, "prefix": "nested_"}
                ]
            }
        });
        let provider = resolve_provider("zip_file", &options).unwrap();
        assert_eq!(provider.name(), "zip_file");
    }

    #[test]
    fn test_each_mode_requires_one_file() {
        let options = json!({"inner": {"mode": "each", "files": []}});
        assert!(matches!(
            resolve_provider("tar_file", &options),
            Err(FakeFileError::InvalidOption { .. })
        ));
    }

    #[test]
    fn test_text_mode_rejects_files_without_resolving_them() {
        let options = json!({
            "inner": {"mode": "text", "files": [{"provider": "no_such_file"}]}
        });
        match resolve_provider("zip_file", &options) {
            Err(FakeFileError::InvalidOption { option, .. }) => assert_eq!(option, "inner.files"),
            other => panic!("unexpected {:?}", other.map(|p| p.name())),
        }

        let options = json!({"inner": {"mode": "text", "content": "{{word}}"}});
        assert!(resolve_provider("zip_file", &options).is_ok());
    }

    #[test]
    fn test_image_generators_resolve() {
        assert_eq!(resolve_image_generator("raster", &Value::Null).unwrap().name(), "raster");
        assert_eq!(
            resolve_image_generator(
                "fake_file::providers::images::wkhtmltoimage::WkhtmltoimageGenerator",
                &json!({"width": 800})
            )
            .unwrap()
            .name(),
            "wkhtmltoimage"
        );
        assert!(matches!(
            resolve_image_generator("fake_file::domain::ports::ImageGenerator", &Value::Null),
            Err(FakeFileError::ResolveError { .. })
        ));
    }

    #[test]
    fn test_text_and_graphic_images_are_distinct() {
        let text = resolve_provider(
            "jpeg_file",
            &json!({"content": "{{sentence}}", "generator": "wkhtmltoimage"}),
        )
        .unwrap();
        assert_eq!(text.name(), "jpeg_file");

        let graphic = resolve_provider("graphic_jpeg_file", &json!({"size": [8, 8], "hue": "blue"})).unwrap();
        assert_eq!(graphic.name(), "graphic_jpeg_file");
    }

    #[test]
    fn test_non_object_options_rejected() {
        assert!(resolve_provider("txt_file", &json!([1, 2])).is_err());
    }
}
