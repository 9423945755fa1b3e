use super::*;
use dcqc_test::TestKind::*;

fn catalog() -> &'static SuiteCatalog {
    SuiteCatalog::builtin().unwrap()
}

#[test]
fn test_builtin_catalog_is_valid() {
    let catalog = catalog();
    assert_eq!(catalog.defs().len(), 12);
    assert_eq!(catalog.get_by_file_type(WILDCARD).unwrap().name, "FileSuite");
}

#[test]
fn test_resolve_file_suite() {
    assert_eq!(
        catalog().resolve("FileSuite").unwrap(),
        vec![FileExtension, Md5Checksum]
    );
}

#[test]
fn test_resolve_walks_grandparents() {
    assert_eq!(
        catalog().resolve("JsonLdSuite").unwrap(),
        vec![FileExtension, Md5Checksum, JsonLoad, JsonLdLoad]
    );
}

#[test]
fn test_resolve_applies_deletions() {
    assert_eq!(
        catalog().resolve("OmeTiffSuite").unwrap(),
        vec![
            FileExtension,
            Md5Checksum,
            LibTiffInfo,
            TiffTag306DateTime,
            TiffDateTime,
            OmeXmlSchema,
            BioFormatsInfo,
        ]
    );
}

#[test]
fn test_deleted_test_returns_only_when_re_added() {
    let defs = vec![
        SuiteDef::new("FileSuite", WILDCARD).add(&[FileExtension, Md5Checksum]),
        SuiteDef::new("TxtSuite", "TXT").parent("FileSuite").del(&[Md5Checksum]),
        SuiteDef::new("CsvSuite", "CSV").parent("TxtSuite"),
        SuiteDef::new("TsvSuite", "TSV").parent("TxtSuite").add(&[Md5Checksum]),
    ];
    let catalog = SuiteCatalog::new(defs).unwrap();
    assert_eq!(catalog.resolve("TxtSuite").unwrap(), vec![FileExtension]);
    assert_eq!(catalog.resolve("CsvSuite").unwrap(), vec![FileExtension]);
    assert_eq!(
        catalog.resolve("TsvSuite").unwrap(),
        vec![FileExtension, Md5Checksum]
    );
}

#[test]
fn test_default_required_tests_stop_at_tier_two() {
    assert_eq!(
        catalog().default_required_tests("TiffSuite").unwrap(),
        vec![FileExtension, Md5Checksum, LibTiffInfo]
    );
}

#[test]
fn test_file_type_lookup_is_case_insensitive_with_fallback() {
    let catalog = catalog();
    assert_eq!(catalog.get_by_file_type("tiff").unwrap().name, "TiffSuite");
    assert_eq!(catalog.get_by_file_type("ome-tiff").unwrap().name, "OmeTiffSuite");
    assert_eq!(catalog.get_by_file_type("PDF").unwrap().name, "FileSuite");
}

#[test]
fn test_unknown_suite_lists_options() {
    let err = catalog().get_by_name("PdfSuite").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("PdfSuite"));
    assert!(message.contains("TiffSuite"));
}

#[test]
fn test_list_test_classes_by_file_type() {
    let listing = catalog().list_test_classes_by_file_type().unwrap();
    let (file_type, tests) = &listing[0];
    assert_eq!(file_type, "*");
    assert_eq!(tests, &vec![FileExtension, Md5Checksum]);
    assert!(listing.iter().any(|(ft, tests)| ft == "FASTQ" && tests.contains(&PairedFastqParity)));
}

#[test]
fn test_cycle_is_rejected() {
    let mut root = SuiteDef::new("FileSuite", WILDCARD);
    root.parent = Some(SuiteName::from_static("TxtSuite"));
    let defs = vec![root, SuiteDef::new("TxtSuite", "TXT").parent("FileSuite")];
    let err = SuiteCatalog::new(defs).unwrap_err();
    match err {
        SuiteError::CircularInheritance { cycle } => {
            assert!(cycle.contains("FileSuite"));
            assert!(cycle.contains("TxtSuite"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_wildcard_suite_is_rejected() {
    let defs = vec![SuiteDef::new("TxtSuite", "TXT")];
    assert!(matches!(
        SuiteCatalog::new(defs).unwrap_err(),
        SuiteError::InvalidCatalog { .. }
    ));
}

#[test]
fn test_unknown_parent_is_rejected() {
    let defs = vec![
        SuiteDef::new("FileSuite", WILDCARD),
        SuiteDef::new("TxtSuite", "TXT").parent("PlainSuite"),
    ];
    let err = SuiteCatalog::new(defs).unwrap_err();
    assert!(err.to_string().contains("PlainSuite"));
}

#[test]
fn test_duplicate_file_type_is_rejected() {
    let defs = vec![
        SuiteDef::new("FileSuite", WILDCARD),
        SuiteDef::new("TxtSuite", "TXT"),
        SuiteDef::new("TextSuite", "txt"),
    ];
    assert!(SuiteCatalog::new(defs).is_err());
}

#[test]
fn test_unregistered_file_type_is_rejected() {
    let defs = vec![
        SuiteDef::new("FileSuite", WILDCARD),
        SuiteDef::new("PdfSuite", "NOT-A-REGISTERED-TYPE"),
    ];
    assert!(matches!(
        SuiteCatalog::new(defs).unwrap_err(),
        SuiteError::Core(_)
    ));
}
