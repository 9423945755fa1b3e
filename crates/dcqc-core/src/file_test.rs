use super::*;
use crate::staging::MemoryStore;
use serde_json::json;
use tempfile::tempdir;

fn metadata(value: Value) -> Metadata {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_file_type_is_popped_from_metadata() {
    let file = File::new(
        "data/test.txt",
        metadata(json!({"file_type": "TXT", "md5_checksum": "abc"})),
        None,
    );
    assert_eq!(file.file_type_name(), "TXT");
    assert!(!file.metadata().contains_key(FILE_TYPE_KEY));
    assert_eq!(file.get_metadata("md5_checksum").unwrap(), "abc");
}

#[test]
fn test_missing_file_type_defaults_to_wildcard() {
    let file = File::new("data/test.txt", Metadata::new(), None);
    assert_eq!(file.file_type_name(), "*");
    assert!(file.get_file_type().unwrap().is_wildcard());
}

#[test]
fn test_missing_metadata_key_is_an_error() {
    let file = File::with_type("data/test.txt", "TXT");
    let err = file.get_metadata("md5_checksum").unwrap_err();
    assert!(matches!(err, CoreError::MissingMetadata { .. }));
    assert!(err.to_string().contains("md5_checksum"));
}

#[test]
fn test_local_file_has_local_path_at_construction() {
    let file = File::with_type("data/test.txt", "TXT");
    assert!(file.is_url_local());
    assert!(file.is_file_local());
    assert_eq!(file.get_local_path().unwrap(), Path::new("data/test.txt"));
}

#[test]
fn test_remote_file_is_not_local_until_staged() {
    let file = File::with_type("syn://syn50555279", "TXT");
    assert!(!file.is_url_local());
    assert!(!file.is_file_local());
    assert!(matches!(
        file.get_local_path().unwrap_err(),
        CoreError::NotStaged { .. }
    ));
}

#[test]
fn test_relative_url_rebased() {
    let file = File::new("test.txt", Metadata::new(), Some(Path::new("/manifests")));
    assert_eq!(file.url(), "/manifests/test.txt");
}

#[test]
fn test_name_from_url() {
    let file = File::with_type("s3://bucket/images/circuit.tif", "TIFF");
    assert_eq!(file.name(), "circuit.tif");
}

#[test]
fn test_equality_ignores_local_path() {
    MemoryStore::global().write("mem://file_eq_test.txt", "foobar\n");
    let staged = File::with_type("mem://file_eq_test.txt", "TXT");
    staged.stage().unwrap();
    let unstaged = File::with_type("mem://file_eq_test.txt", "TXT");
    assert_eq!(staged, unstaged);
    assert_ne!(staged, File::with_type("mem://file_eq_test.txt", "JSON"));
}

#[test]
fn test_stage_remote_file_is_idempotent() {
    MemoryStore::global().write("mem://file_stage_test.txt", "foobar\n");
    let file = File::with_type("mem://file_stage_test.txt", "TXT");
    let first = file.stage().unwrap();
    let second = file.stage().unwrap();
    assert_eq!(first, second);
    assert_eq!(std::fs::read_to_string(&first).unwrap(), "foobar\n");
    assert_eq!(file.name(), "file_stage_test.txt");
}

#[test]
fn test_stage_to_directory_symlinks_local_file() {
    let src_dir = tempdir().unwrap();
    let source = src_dir.path().join("test.txt");
    std::fs::write(&source, "foobar\n").unwrap();
    let dest_dir = tempdir().unwrap();

    let mut file = File::with_type(source.to_str().unwrap(), "TXT");
    let staged = file.stage_to(dest_dir.path(), false).unwrap();
    assert_eq!(staged, dest_dir.path().join("test.txt"));
    assert_eq!(std::fs::read_to_string(&staged).unwrap(), "foobar\n");
    assert_eq!(file.get_local_path().unwrap(), staged.as_path());
}

#[test]
fn test_stage_to_existing_destination_requires_overwrite() {
    let src_dir = tempdir().unwrap();
    let source = src_dir.path().join("test.txt");
    std::fs::write(&source, "foobar\n").unwrap();
    let dest_dir = tempdir().unwrap();
    std::fs::write(dest_dir.path().join("test.txt"), "old").unwrap();

    let mut file = File::with_type(source.to_str().unwrap(), "TXT");
    let err = file.stage_to(dest_dir.path(), false).unwrap_err();
    assert!(matches!(err, CoreError::DestinationExists { .. }));

    let staged = file.stage_to(dest_dir.path(), true).unwrap();
    assert_eq!(std::fs::read_to_string(staged).unwrap(), "foobar\n");
}

#[test]
fn test_stage_to_missing_parent_fails() {
    let dest_dir = tempdir().unwrap();
    let destination = dest_dir.path().join("missing").join("test.txt");
    let mut file = File::with_type("data/test.txt", "TXT");
    let err = file.stage_to(&destination, false).unwrap_err();
    assert!(matches!(err, CoreError::DestinationParentMissing { .. }));
}

#[test]
fn test_serialized_record_shape() {
    let file = File::new(
        "data/test.txt",
        metadata(json!({"file_type": "TXT", "md5_checksum": "14758f1afd44c09b7992073ccf00b43d"})),
        None,
    );
    let value = serde_json::to_value(&file).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "TXT",
            "url": "data/test.txt",
            "metadata": {"md5_checksum": "14758f1afd44c09b7992073ccf00b43d"},
            "name": "test.txt",
            "local_path": "data/test.txt",
        })
    );
}

#[test]
fn test_deserialize_restores_local_path_and_type() {
    let value = json!({
        "type": "TIFF",
        "url": "syn://syn50555279",
        "metadata": {},
        "name": "circuit.tif",
        "local_path": "/tmp/staged/circuit.tif",
    });
    let file: File = serde_json::from_value(value.clone()).unwrap();
    assert_eq!(file.file_type_name(), "TIFF");
    assert_eq!(
        file.get_local_path().unwrap(),
        Path::new("/tmp/staged/circuit.tif")
    );
    assert_eq!(serde_json::to_value(&file).unwrap(), value);
}
