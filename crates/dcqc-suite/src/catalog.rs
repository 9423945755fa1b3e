//! Suite catalog and test resolution.
//!
//! Each suite declares the file type it handles, an optional parent, and
//! the tests it adds and removes. The tests of a suite are resolved by
//! walking its parent chain from the root down, adding then removing at
//! every step.

use crate::error::{SuiteError, SuiteResult};
use dcqc_core::file_type::WILDCARD;
use dcqc_core::{FileType, SuiteName};
use dcqc_test::{TestKind, TestTier};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

/// Declaration of one suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteDef {
    pub name: SuiteName,
    pub file_type: String,
    pub parent: Option<SuiteName>,
    pub add_tests: Vec<TestKind>,
    pub del_tests: Vec<TestKind>,
}

impl SuiteDef {
    pub fn new(name: &'static str, file_type: &str) -> Self {
        Self {
            name: SuiteName::from_static(name),
            file_type: file_type.to_string(),
            parent: None,
            add_tests: Vec::new(),
            del_tests: Vec::new(),
        }
    }

    pub fn parent(mut self, parent: &'static str) -> Self {
        self.parent = Some(SuiteName::from_static(parent));
        self
    }

    pub fn add(mut self, tests: &[TestKind]) -> Self {
        self.add_tests.extend_from_slice(tests);
        self
    }

    pub fn del(mut self, tests: &[TestKind]) -> Self {
        self.del_tests.extend_from_slice(tests);
        self
    }
}

fn builtin_defs() -> Vec<SuiteDef> {
    use TestKind::*;
    vec![
        SuiteDef::new("FileSuite", WILDCARD).add(&[FileExtension, Md5Checksum]),
        SuiteDef::new("JsonSuite", "JSON")
            .parent("FileSuite")
            .add(&[JsonLoad]),
        SuiteDef::new("JsonLdSuite", "JSON-LD")
            .parent("JsonSuite")
            .add(&[JsonLdLoad]),
        SuiteDef::new("TiffSuite", "TIFF").parent("FileSuite").add(&[
            LibTiffInfo,
            GrepDate,
            TiffTag306DateTime,
            TiffDateTime,
        ]),
        SuiteDef::new("OmeTiffSuite", "OME-TIFF")
            .parent("TiffSuite")
            .add(&[OmeXmlSchema, BioFormatsInfo])
            .del(&[GrepDate]),
        SuiteDef::new("TXTSuite", "TXT").parent("FileSuite"),
        SuiteDef::new("TSVSuite", "TSV").parent("FileSuite"),
        SuiteDef::new("CSVSuite", "CSV").parent("FileSuite"),
        SuiteDef::new("BAMSuite", "BAM").parent("FileSuite"),
        SuiteDef::new("FastqSuite", "FASTQ")
            .parent("FileSuite")
            .add(&[PairedFastqParity]),
        SuiteDef::new("HDF5Suite", "HDF5").parent("FileSuite"),
        SuiteDef::new("H5adSuite", "H5AD")
            .parent("FileSuite")
            .add(&[H5adHtanValidator]),
    ]
}

/// A validated set of suite declarations.
#[derive(Debug, Clone)]
pub struct SuiteCatalog {
    defs: Vec<SuiteDef>,
    by_name: HashMap<SuiteName, usize>,
}

impl SuiteCatalog {
    /// The built-in suites, validated on first use.
    pub fn builtin() -> SuiteResult<&'static SuiteCatalog> {
        static BUILTIN: OnceLock<SuiteCatalog> = OnceLock::new();
        if let Some(catalog) = BUILTIN.get() {
            return Ok(catalog);
        }
        let catalog = SuiteCatalog::new(builtin_defs())?;
        Ok(BUILTIN.get_or_init(|| catalog))
    }

    /// Validate and index suite declarations.
    ///
    /// Names and file types must be unique, parents must exist, the parent
    /// graph must be acyclic, and one suite must handle the wildcard type.
    pub fn new(defs: Vec<SuiteDef>) -> SuiteResult<Self> {
        let mut by_name = HashMap::new();
        let mut file_types = HashSet::new();
        for (idx, def) in defs.iter().enumerate() {
            if by_name.insert(def.name.clone(), idx).is_some() {
                return Err(invalid(format!("duplicate suite name {}", def.name)));
            }
            if !file_types.insert(def.file_type.to_lowercase()) {
                return Err(invalid(format!(
                    "more than one suite handles file type {}",
                    def.file_type
                )));
            }
            FileType::get(&def.file_type)?;
        }
        if !file_types.contains(WILDCARD) {
            return Err(invalid(format!("no suite handles file type {}", WILDCARD)));
        }

        let mut graph: DiGraph<SuiteName, ()> = DiGraph::new();
        let nodes: Vec<NodeIndex> = defs.iter().map(|d| graph.add_node(d.name.clone())).collect();
        for (idx, def) in defs.iter().enumerate() {
            if let Some(parent) = &def.parent {
                let parent_idx = by_name.get(parent).ok_or_else(|| {
                    invalid(format!("suite {} has unknown parent {}", def.name, parent))
                })?;
                graph.add_edge(nodes[*parent_idx], nodes[idx], ());
            }
        }
        if let Err(cycle) = toposort(&graph, None) {
            let start = &graph[cycle.node_id()];
            return Err(SuiteError::CircularInheritance {
                cycle: describe_cycle(&defs, &by_name, start),
            });
        }

        Ok(Self { defs, by_name })
    }

    /// Every suite, in declaration order.
    pub fn defs(&self) -> &[SuiteDef] {
        &self.defs
    }

    /// Look up a suite by exact name.
    pub fn get_by_name(&self, name: &str) -> SuiteResult<&SuiteDef> {
        self.by_name
            .get(name)
            .map(|&idx| &self.defs[idx])
            .ok_or_else(|| SuiteError::UnknownSuite {
                name: name.to_string(),
                options: self.names().join(", "),
            })
    }

    /// The suite for a file type, falling back to the wildcard suite.
    pub fn get_by_file_type(&self, file_type: &str) -> SuiteResult<&SuiteDef> {
        let find = |ft: &str| self.defs.iter().find(|d| d.file_type.eq_ignore_ascii_case(ft));
        match find(file_type) {
            Some(def) => Ok(def),
            None => {
                log::debug!("No suite for file type {}, using {}", file_type, WILDCARD);
                find(WILDCARD).ok_or_else(|| invalid(format!("no suite handles file type {}", WILDCARD)))
            }
        }
    }

    /// Resolve the ordered, duplicate-free tests of a suite.
    ///
    /// Ancestors are replayed root first: each adds its tests, then removes
    /// its deletions, before the next one applies.
    pub fn resolve(&self, name: &str) -> SuiteResult<Vec<TestKind>> {
        let mut chain = Vec::new();
        let mut current = Some(self.get_by_name(name)?);
        while let Some(def) = current {
            chain.push(def);
            current = match &def.parent {
                Some(parent) => Some(self.get_by_name(parent)?),
                None => None,
            };
        }

        let mut tests: Vec<TestKind> = Vec::new();
        for def in chain.into_iter().rev() {
            for kind in &def.add_tests {
                if !tests.contains(kind) {
                    tests.push(*kind);
                }
            }
            tests.retain(|kind| !def.del_tests.contains(kind));
        }
        Ok(tests)
    }

    /// Resolved tests whose tier is at most 2.
    pub fn default_required_tests(&self, name: &str) -> SuiteResult<Vec<TestKind>> {
        Ok(self
            .resolve(name)?
            .into_iter()
            .filter(|kind| kind.tier() <= TestTier::DEFAULT_REQUIRED_MAX)
            .collect())
    }

    /// Resolved tests for every suite, keyed by file type name.
    pub fn list_test_classes_by_file_type(&self) -> SuiteResult<Vec<(String, Vec<TestKind>)>> {
        self.defs
            .iter()
            .map(|def| Ok((def.file_type.clone(), self.resolve(&def.name)?)))
            .collect()
    }

    fn names(&self) -> Vec<&str> {
        self.defs.iter().map(|d| d.name.as_str()).collect()
    }
}

fn invalid(message: String) -> SuiteError {
    SuiteError::InvalidCatalog { message }
}

fn describe_cycle(defs: &[SuiteDef], by_name: &HashMap<SuiteName, usize>, start: &SuiteName) -> String {
    let mut path = vec![start.to_string()];
    let mut seen = HashSet::new();
    seen.insert(start.clone());
    let mut current = start;
    while let Some(parent) = by_name.get(current).and_then(|&idx| defs[idx].parent.as_ref()) {
        path.push(parent.to_string());
        if !seen.insert(parent.clone()) {
            break;
        }
        current = parent;
    }
    path.join(" -> ")
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
