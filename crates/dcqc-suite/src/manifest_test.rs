use super::*;
use dcqc_core::MemoryStore;
use tempfile::tempdir;

const MANIFEST: &str = "\
url,file_type,md5_checksum
test.txt,TXT,14758f1afd44c09b7992073ccf00b43d
mem://manifest_remote.tif,TIFF,
";

fn write_manifest(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("targets.csv");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_list_rows_keeps_header_order() {
    let dir = tempdir().unwrap();
    let manifest = CsvManifest::new(write_manifest(dir.path(), MANIFEST), false);
    let rows = manifest.list_rows().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].index, 1);
    assert_eq!(rows[0].cells[0], ("url".to_string(), "test.txt".to_string()));
    assert_eq!(rows[1].get("file_type"), Some("TIFF"));
}

#[test]
fn test_create_targets() {
    let dir = tempdir().unwrap();
    let manifest = CsvManifest::new(write_manifest(dir.path(), MANIFEST), false);
    let targets = manifest.create_targets().unwrap();
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0].id(), Some("0001"));
    assert_eq!(targets[1].id(), Some("0002"));

    let local = targets[0].file();
    assert_eq!(local.file_type_name(), "TXT");
    assert_eq!(local.url(), dir.path().join("test.txt").display().to_string());
    assert_eq!(
        local.get_metadata("md5_checksum").unwrap(),
        "14758f1afd44c09b7992073ccf00b43d"
    );
    assert!(local.get_metadata("file_type").is_err());

    let remote = targets[1].file();
    assert_eq!(remote.url(), "mem://manifest_remote.tif");
    assert!(!remote.is_file_local());
}

#[test]
fn test_stage_files_into_manifest_dir() {
    MemoryStore::global().write("mem://manifest_remote.tif", "II*\0");
    let dir = tempdir().unwrap();
    let manifest = CsvManifest::new(write_manifest(dir.path(), MANIFEST), true);
    let targets = manifest.create_targets().unwrap();
    let staged = dir
        .path()
        .join("staged_files")
        .join("index_2")
        .join("manifest_remote.tif");
    assert_eq!(targets[1].file().local_path(), Some(staged.as_path()));
    assert_eq!(fs::read(&staged).unwrap(), b"II*\0");
    assert!(!dir.path().join("staged_files").join("index_1").exists());
}

#[test]
fn test_missing_url_column() {
    let dir = tempdir().unwrap();
    let manifest = CsvManifest::new(write_manifest(dir.path(), "path,file_type\na.txt,TXT\n"), false);
    assert!(matches!(
        manifest.create_targets().unwrap_err(),
        SuiteError::MissingUrlColumn { .. }
    ));
}

#[test]
fn test_create_suites() {
    let dir = tempdir().unwrap();
    let manifest = CsvManifest::new(write_manifest(dir.path(), MANIFEST), false);
    let suites = manifest.create_suites(None, None).unwrap();
    assert_eq!(suites[0].name(), &"TXTSuite");
    assert_eq!(suites[1].name(), &"TiffSuite");
}
