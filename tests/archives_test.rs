use fake_file::{
    resolve_provider, ArchiveOptions, BinFile, EmlFile, Fake, FileProvider, FileProviderExt,
    InnerFile, InnerFiles, MemoryStorage, Naming, TarCompression, TarFile, TxtFile, ZipFile,
};
use serde_json::json;
use std::io::{Cursor, Read};

fn zip_names(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    archive.file_names().map(str::to_string).collect()
}

#[test]
fn test_zip_of_zips() {
    let inner_zip = ZipFile::new(
        ArchiveOptions::new(InnerFiles::Each(InnerFile::new(TxtFile::with_content("deep"))))
            .count(2),
    );
    let outer = ZipFile::new(
        ArchiveOptions::new(InnerFiles::Each(
            InnerFile::new(inner_zip).naming(Naming::prefix("nested_")),
        ))
        .count(3)
        .directory("archives"),
    );

    let rendered = outer.render(&mut Fake::seeded(1)).unwrap();
    let names = zip_names(&rendered.bytes);
    assert_eq!(names.len(), 3);
    assert!(names
        .iter()
        .all(|n| n.starts_with("archives/nested_") && n.ends_with(".zip")));

    // provenance follows the nesting
    let (_, first) = rendered.data.inner.first().unwrap();
    assert_eq!(first.inner.len(), 2);
    assert!(first
        .inner
        .values()
        .all(|d| d.content.as_deref() == Some("deep")));

    let mut archive = zip::ZipArchive::new(Cursor::new(rendered.bytes)).unwrap();
    let mut nested = Vec::new();
    archive.by_index(0).unwrap().read_to_end(&mut nested).unwrap();
    assert_eq!(zip_names(&nested).len(), 2);
}

#[test]
fn test_list_mode_keeps_order_and_ignores_count() {
    let provider = ZipFile::new(
        ArchiveOptions::new(InnerFiles::List(vec![
            InnerFile::new(TxtFile::with_content("a")).naming(Naming::basename("first")),
            InnerFile::new(BinFile::with_length(4)).naming(Naming::basename("second")),
        ]))
        .count(50),
    );
    let rendered = provider.render(&mut Fake::seeded(1)).unwrap();
    assert_eq!(zip_names(&rendered.bytes), vec!["first.txt", "second.bin"]);
}

#[test]
fn test_tar_with_fuzzy_members_from_registry() {
    let options = json!({
        "count": 6,
        "compression": "gz",
        "inner": {
            "mode": "fuzzy",
            "files": [
                {"provider": "txt_file", "options": {"max_nb_chars": 50}},
                {"provider": "graphic_png_file", "options": {"size": [8, 8]}},
                {"provider": "csv_file", "options": {"num_rows": 2}}
            ]
        }
    });
    let provider = resolve_provider("tar_file", &options).unwrap();
    let rendered = provider.raw(&mut Fake::seeded(5)).unwrap();
    assert_eq!(rendered.extension, "tar.gz");
    assert_eq!(rendered.data.inner.len(), 6);

    let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(&rendered.bytes[..]));
    let names: Vec<String> = archive
        .entries()
        .unwrap()
        .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 6);
    assert!(names
        .iter()
        .all(|n| n.ends_with(".txt") || n.ends_with(".png") || n.ends_with(".csv")));
}

#[test]
fn test_eml_with_zip_attachment() {
    let attachment = ZipFile::new(ArchiveOptions::default().count(1));
    let eml = EmlFile::new(
        ArchiveOptions::new(InnerFiles::Each(
            InnerFile::new(attachment).naming(Naming::basename("bundle")),
        ))
        .count(1),
    );
    let rendered = eml.render(&mut Fake::seeded(8)).unwrap();
    let text = String::from_utf8(rendered.bytes).unwrap();

    assert!(text.contains("Content-Type: application/zip\r\n"));
    assert!(text.contains("filename=\"bundle.zip\""));
    assert_eq!(rendered.data.inner["bundle.zip"].inner.len(), 1);
}

#[test]
fn test_tar_saved_to_storage() {
    let storage = MemoryStorage::default();
    let provider = TarFile::new(ArchiveOptions::default().count(2)).compression(TarCompression::Bz2);
    let value = provider
        .save(&mut Fake::seeded(1), &storage, &Naming::basename("fixtures"))
        .unwrap();
    assert_eq!(value.as_str(), "tmp/fixtures.tar.bz2");
    assert!(storage.get_file("tmp/fixtures.tar.bz2").unwrap().starts_with(b"BZh"));
}
