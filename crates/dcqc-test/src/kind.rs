//! Registry of concrete QC tests.

use crate::error::{TestError, TestResult};
use crate::external::{self, ExternalSpec};
use crate::internal;
use crate::status::{Outcome, TestTier};
use dcqc_core::{Target, TargetKind};
use std::fmt;

/// Every concrete test known to dcqc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TestKind {
    FileExtension,
    Md5Checksum,
    JsonLoad,
    JsonLdLoad,
    PairedFastqParity,
    LibTiffInfo,
    BioFormatsInfo,
    OmeXmlSchema,
    H5adHtanValidator,
    GrepDate,
    GrepLabelMacro,
    TiffTag306DateTime,
    TiffDateTime,
}

impl TestKind {
    pub const ALL: [TestKind; 13] = [
        TestKind::FileExtension,
        TestKind::Md5Checksum,
        TestKind::JsonLoad,
        TestKind::JsonLdLoad,
        TestKind::PairedFastqParity,
        TestKind::LibTiffInfo,
        TestKind::BioFormatsInfo,
        TestKind::OmeXmlSchema,
        TestKind::H5adHtanValidator,
        TestKind::GrepDate,
        TestKind::GrepLabelMacro,
        TestKind::TiffTag306DateTime,
        TestKind::TiffDateTime,
    ];

    /// Serialized type name, e.g. `Md5ChecksumTest`.
    pub fn name(self) -> &'static str {
        match self {
            TestKind::FileExtension => "FileExtensionTest",
            TestKind::Md5Checksum => "Md5ChecksumTest",
            TestKind::JsonLoad => "JsonLoadTest",
            TestKind::JsonLdLoad => "JsonLdLoadTest",
            TestKind::PairedFastqParity => "PairedFastqParityTest",
            TestKind::LibTiffInfo => "LibTiffInfoTest",
            TestKind::BioFormatsInfo => "BioFormatsInfoTest",
            TestKind::OmeXmlSchema => "OmeXmlSchemaTest",
            TestKind::H5adHtanValidator => "H5adHtanValidatorTest",
            TestKind::GrepDate => "GrepDateTest",
            TestKind::GrepLabelMacro => "GrepLabelMacroTest",
            TestKind::TiffTag306DateTime => "TiffTag306DateTimeTest",
            TestKind::TiffDateTime => "TiffDateTimeTest",
        }
    }

    /// Resolve a serialized type name (exact match).
    pub fn from_name(name: &str) -> TestResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| TestError::UnknownTest {
                name: name.to_string(),
                options: Self::ALL.map(TestKind::name).join(", "),
            })
    }

    pub fn tier(self) -> TestTier {
        match self {
            TestKind::FileExtension | TestKind::Md5Checksum => TestTier::FileIntegrity,
            TestKind::JsonLoad
            | TestKind::JsonLdLoad
            | TestKind::PairedFastqParity
            | TestKind::LibTiffInfo
            | TestKind::BioFormatsInfo
            | TestKind::OmeXmlSchema
            | TestKind::H5adHtanValidator => TestTier::InternalConformance,
            TestKind::GrepDate
            | TestKind::GrepLabelMacro
            | TestKind::TiffTag306DateTime
            | TestKind::TiffDateTime => TestTier::SubjectiveConformance,
        }
    }

    /// Process description for external tests; `None` for in-process tests.
    pub fn external_spec(self) -> Option<&'static ExternalSpec> {
        match self {
            TestKind::LibTiffInfo => Some(&external::LIBTIFF_INFO),
            TestKind::BioFormatsInfo => Some(&external::BIOFORMATS_INFO),
            TestKind::OmeXmlSchema => Some(&external::OME_XML_SCHEMA),
            TestKind::H5adHtanValidator => Some(&external::H5AD_HTAN_VALIDATOR),
            TestKind::GrepDate => Some(&external::GREP_DATE),
            TestKind::GrepLabelMacro => Some(&external::GREP_LABEL_MACRO),
            TestKind::TiffTag306DateTime => Some(&external::TIFF_TAG_306_DATE_TIME),
            TestKind::TiffDateTime => Some(&external::TIFF_DATE_TIME),
            TestKind::FileExtension
            | TestKind::Md5Checksum
            | TestKind::JsonLoad
            | TestKind::JsonLdLoad
            | TestKind::PairedFastqParity => None,
        }
    }

    pub fn is_external(self) -> bool {
        self.external_spec().is_some()
    }

    /// Whether the test can run against this kind of target.
    ///
    /// External tests run on one file; the parity check needs a pair.
    pub fn supports(self, target: TargetKind) -> bool {
        match self {
            TestKind::PairedFastqParity => target == TargetKind::Paired,
            _ if self.is_external() => target == TargetKind::Single,
            _ => true,
        }
    }

    /// Run an in-process check.
    ///
    /// Only called for internal tests; external tests are interpreted from
    /// process outputs instead.
    pub(crate) fn compute_internal(self, target: &Target) -> TestResult<Outcome> {
        match self {
            TestKind::FileExtension => internal::file_extension(target),
            TestKind::Md5Checksum => internal::md5_checksum(target),
            TestKind::JsonLoad => internal::json_load(target),
            TestKind::JsonLdLoad => internal::jsonld_load(target),
            TestKind::PairedFastqParity => internal::paired_fastq_parity(target),
            _ => Err(TestError::NotInternal {
                test: self.name().to_string(),
            }),
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
