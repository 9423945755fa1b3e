//! File type catalog and process-wide registry.
//!
//! File types are registered once (the built-in catalog below, plus any
//! types declared in `dcqc.yml`) and looked up by case-insensitive name.

use crate::error::{CoreError, CoreResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{OnceLock, PoisonError, RwLock};

/// Name of the file type that matches every file.
pub const WILDCARD: &str = "*";

/// Built-in catalog: (name, extensions, EDAM format identifier).
const BUILTIN_FILE_TYPES: &[(&str, &[&str], Option<&str>)] = &[
    (WILDCARD, &[], Some("format_1915")),
    ("TXT", &[".txt"], Some("format_1964")),
    ("JSON", &[".json"], Some("format_3464")),
    ("JSON-LD", &[".jsonld"], Some("format_3749")),
    ("TIFF", &[".tif", ".tiff"], Some("format_3591")),
    ("OME-TIFF", &[".ome.tif", ".ome.tiff"], Some("format_3727")),
    ("TSV", &[".tsv"], Some("format_3475")),
    ("CSV", &[".csv"], Some("format_3752")),
    ("BAM", &[".bam"], Some("format_2572")),
    (
        "FASTQ",
        &[".fastq", ".fq", ".fastq.gz", ".fq.gz"],
        Some("format_1930"),
    ),
    ("HDF5", &[".hdf", ".hdf5", ".h5", ".he5"], Some("format_3590")),
    ("H5AD", &[".h5ad"], None),
];

/// Information shared by every file of a given type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileType {
    name: String,
    file_extensions: Vec<String>,
    edam_iri: Option<String>,
}

impl FileType {
    fn from_parts(name: &str, file_extensions: &[&str], edam_iri: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            file_extensions: file_extensions.iter().map(|e| e.to_string()).collect(),
            edam_iri: edam_iri.map(String::from),
        }
    }

    /// Register a new file type.
    ///
    /// Fails if a file type with the same lowercased name exists.
    pub fn register(
        name: &str,
        file_extensions: &[&str],
        edam_iri: Option<&str>,
    ) -> CoreResult<FileType> {
        let file_type = Self::from_parts(name, file_extensions, edam_iri);
        let key = name.to_lowercase();
        let mut registry = registry().write().unwrap_or_else(PoisonError::into_inner);
        if registry.contains_key(&key) {
            return Err(CoreError::DuplicateFileType { name: key });
        }
        log::debug!("Registered file type {}", file_type.name);
        registry.insert(key, file_type.clone());
        Ok(file_type)
    }

    /// Look up a registered file type by case-insensitive name.
    pub fn get(name: &str) -> CoreResult<FileType> {
        let key = name.to_lowercase();
        let registry = registry().read().unwrap_or_else(PoisonError::into_inner);
        registry
            .get(&key)
            .cloned()
            .ok_or_else(|| CoreError::UnknownFileType {
                name: key,
                options: registry.keys().cloned().collect::<Vec<_>>().join(", "),
            })
    }

    /// List every registered file type, ordered by lowercased name.
    pub fn list_all() -> Vec<FileType> {
        let registry = registry().read().unwrap_or_else(PoisonError::into_inner);
        registry.values().cloned().collect()
    }

    /// Display name as registered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accepted file name suffixes.
    pub fn file_extensions(&self) -> &[String] {
        &self.file_extensions
    }

    /// EDAM format ontology identifier, if any.
    pub fn edam_iri(&self) -> Option<&str> {
        self.edam_iri.as_deref()
    }

    /// Whether this is the catch-all file type.
    pub fn is_wildcard(&self) -> bool {
        self.name == WILDCARD
    }

    /// Check a file name against the accepted extensions.
    ///
    /// Case-sensitive suffix match. A type without extensions accepts any name.
    pub fn accepts_file_name(&self, file_name: &str) -> bool {
        self.file_extensions.is_empty()
            || self
                .file_extensions
                .iter()
                .any(|ext| file_name.ends_with(ext.as_str()))
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

fn registry() -> &'static RwLock<BTreeMap<String, FileType>> {
    static REGISTRY: OnceLock<RwLock<BTreeMap<String, FileType>>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let catalog = BUILTIN_FILE_TYPES
            .iter()
            .map(|(name, exts, edam)| (name.to_lowercase(), FileType::from_parts(name, exts, *edam)))
            .collect();
        RwLock::new(catalog)
    })
}

#[cfg(test)]
#[path = "file_type_test.rs"]
mod tests;
