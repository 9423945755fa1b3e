use super::*;
use serde_json::json;

fn txt(url: &str) -> File {
    File::with_type(url, "TXT")
}

#[test]
fn test_single_target_requires_one_file() {
    let err = Target::new(TargetKind::Single, vec![txt("a.txt"), txt("b.txt")], None).unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidFileCount {
            expected: 1,
            found: 2,
            ..
        }
    ));
    assert!(Target::new(TargetKind::Single, vec![txt("a.txt")], None).is_ok());
}

#[test]
fn test_paired_target_requires_two_files() {
    let err = Target::new(TargetKind::Paired, vec![txt("a.txt")], None).unwrap_err();
    assert!(err.to_string().contains("PairedTarget"));
    assert!(Target::new(TargetKind::Paired, vec![txt("a.txt"), txt("b.txt")], None).is_ok());
}

#[test]
fn test_empty_file_list_rejected() {
    assert!(Target::new(TargetKind::Single, vec![], None).is_err());
}

#[test]
fn test_kind_from_name() {
    assert_eq!(TargetKind::from_name("SingleTarget").unwrap(), TargetKind::Single);
    assert_eq!(TargetKind::from_name("PairedTarget").unwrap(), TargetKind::Paired);
    let err = TargetKind::from_name("TripleTarget").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("SingleTarget"));
    assert!(message.contains("PairedTarget"));
}

#[test]
fn test_get_file_type_single() {
    let target = Target::single(File::with_type("circuit.tif", "TIFF"), None);
    assert_eq!(target.get_file_type().unwrap().name(), "TIFF");
}

#[test]
fn test_get_file_type_paired_requires_shared_type() {
    let same = Target::paired(
        File::with_type("r1.fastq", "FASTQ"),
        File::with_type("r2.fastq", "fastq"),
        None,
    );
    assert_eq!(same.get_file_type().unwrap().name(), "FASTQ");

    let mixed = Target::paired(
        File::with_type("r1.fastq", "FASTQ"),
        File::with_type("r2.txt", "TXT"),
        None,
    );
    assert!(matches!(
        mixed.get_file_type().unwrap_err(),
        CoreError::MixedFileTypes { .. }
    ));
}

#[test]
fn test_value_equality() {
    let a = Target::single(txt("data/test.txt"), Some("0001".into()));
    let b = Target::single(txt("data/test.txt"), Some("0001".into()));
    let c = Target::single(txt("data/test.txt"), Some("0002".into()));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_record_shape() {
    let target = Target::single(txt("data/test.txt"), Some("0001".into()));
    let value = serde_json::to_value(&target).unwrap();
    assert_eq!(value["type"], "SingleTarget");
    assert_eq!(value["id"], "0001");
    assert_eq!(value["files"][0]["type"], "TXT");
}

#[test]
fn test_record_roundtrip_is_byte_identical() {
    let target = Target::paired(
        File::with_type("data/r1.fastq", "FASTQ"),
        File::with_type("data/r2.fastq", "FASTQ"),
        Some("pair".into()),
    );
    let first = serde_json::to_string(&target).unwrap();
    let restored: Target = serde_json::from_str(&first).unwrap();
    assert_eq!(restored, target);
    assert_eq!(serde_json::to_string(&restored).unwrap(), first);
}

#[test]
fn test_load_revalidates_file_count() {
    let value = json!({
        "type": "PairedTarget",
        "id": null,
        "files": [
            {"type": "TXT", "url": "a.txt", "metadata": {}, "name": "a.txt", "local_path": "a.txt"}
        ]
    });
    let err = serde_json::from_value::<Target>(value).unwrap_err();
    assert!(err.to_string().contains("PairedTarget is restricted to 2 file(s)"));
}

#[test]
fn test_load_unknown_kind() {
    let value = json!({"type": "GroupTarget", "id": null, "files": []});
    let err = serde_json::from_value::<Target>(value).unwrap_err();
    assert!(err.to_string().contains("GroupTarget"));
}
