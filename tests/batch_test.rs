use fake_file::config::TomlConfig;
use fake_file::utils::validation::Validate;
use fake_file::{BatchEngine, Fake};
use tempfile::TempDir;

#[test]
fn test_toml_batch_end_to_end() {
    let output = TempDir::new().unwrap();
    std::env::set_var("FAKE_FILE_BATCH_ROOT", output.path());

    let config = TomlConfig::from_toml_str(
        r#"
seed = 11

[storage]
type = "filesystem"
root_path = "${FAKE_FILE_BATCH_ROOT}"
rel_path = "fixtures"

[[files]]
provider = "txt_file"
count = 2
prefix = "note_"

[[files]]
provider = "xlsx_file"
basename = "report"

[files.options]
num_rows = 3

[[files]]
provider = "zip_file"
basename = "bundle"

[files.options]
count = 2

[files.options.inner]
mode = "each"
files = [{ provider = "graphic_jpeg_file", options = { size = [16, 16] } }]
"#,
    )
    .unwrap();
    config.validate().unwrap();

    let mut engine = BatchEngine::new(config.storage.build().unwrap(), Fake::seeded(config.seed.unwrap()));
    let saved = engine.run(&config.files).unwrap();
    std::env::remove_var("FAKE_FILE_BATCH_ROOT");

    assert_eq!(saved.len(), 4);
    assert!(output.path().join("fixtures/report.xlsx").is_file());
    assert!(output.path().join("fixtures/bundle.zip").is_file());

    let notes = std::fs::read_dir(output.path().join("fixtures"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("note_"))
        .count();
    assert_eq!(notes, 2);

    let bundle = &saved[3];
    assert_eq!(bundle.data.inner.len(), 2);
    assert!(bundle.data.inner.keys().all(|k| k.ends_with(".jpg")));
}

#[test]
fn test_unknown_provider_fails_validation() {
    let config = TomlConfig::from_toml_str(
        r#"
[storage]
type = "filesystem"
root_path = "/tmp"

[[files]]
provider = "odp_file"
"#,
    )
    .unwrap();
    assert!(config.validate().is_err());
}
