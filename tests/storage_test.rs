use fake_file::{
    BucketStorage, Fake, FileProvider, FileProviderExt, FileSystemStorage, FsObjectStore,
    GraphicImageFile, MemoryStorage, Naming, Storage, TxtFile,
};
use tempfile::TempDir;

fn save_into(storage: &dyn Storage) -> fake_file::StringValue {
    TxtFile::with_content("Lorem ipsum")
        .save(&mut Fake::seeded(1), storage, &Naming::prefix("zzz_"))
        .unwrap()
}

#[test]
fn test_same_provider_on_every_backend() {
    let temp_dir = TempDir::new().unwrap();
    let filesystem = FileSystemStorage::new(temp_dir.path().join("fs"), "tmp");
    let memory = MemoryStorage::default();
    let bucket = BucketStorage::new(
        FsObjectStore::new(temp_dir.path().join("buckets")),
        "fixtures",
        "tmp",
    )
    .unwrap();

    let backends: [&dyn Storage; 3] = [&filesystem, &memory, &bucket];
    for storage in backends {
        let value = save_into(storage);
        assert!(value.as_str().starts_with("tmp/zzz_"), "{}", storage.describe());
        assert_eq!(storage.read_bytes(value.as_str()).unwrap(), b"Lorem ipsum");
        assert_eq!(
            value.data.filename.as_deref(),
            Some(storage.abspath(value.as_str()).as_str())
        );
    }
}

#[test]
fn test_bucket_locations() {
    let temp_dir = TempDir::new().unwrap();
    let storage = BucketStorage::new(
        FsObjectStore::new(temp_dir.path()).with_scheme("s3"),
        "fixtures",
        "images",
    )
    .unwrap();

    let value = GraphicImageFile::png()
        .size(8, 8)
        .save(&mut Fake::seeded(1), &storage, &Naming::basename("logo"))
        .unwrap();
    assert_eq!(value.as_str(), "images/logo.png");
    assert_eq!(
        value.data.filename.as_deref(),
        Some("s3://fixtures/images/logo.png")
    );
    assert!(temp_dir.path().join("fixtures/images/logo.png").is_file());
    assert_eq!(
        value.data.storage.as_deref(),
        Some("BucketStorage(s3://fixtures, rel_path=images)")
    );

    storage.unlink("s3://fixtures/images/logo.png").unwrap();
    assert!(!storage.exists(value.as_str()).unwrap());
}

#[test]
fn test_filesystem_default_is_temp_dir() {
    let storage = FileSystemStorage::default();
    assert_eq!(storage.root_path(), std::env::temp_dir().as_path());
    let name = storage.generate_filename("txt", None, Some("scratch")).unwrap();
    assert!(name.ends_with("tmp/scratch.txt") || name.ends_with("tmp\\scratch.txt"));
}

#[test]
fn test_memory_storage_keeps_saved_files() {
    let storage = MemoryStorage::new("fixtures");
    let handle = storage.clone();
    let provider = TxtFile::default();

    let value = provider
        .save(&mut Fake::seeded(1), &storage, &Naming::basename("notes"))
        .unwrap();
    assert_eq!(provider.name(), "txt_file");
    assert_eq!(handle.keys(), vec!["fixtures/notes.txt".to_string()]);
    assert_eq!(
        handle.get_file(value.as_str()).unwrap(),
        value.data.content.unwrap().into_bytes()
    );
    assert_eq!(storage.describe(), "MemoryStorage(rel_path=fixtures)");
}
