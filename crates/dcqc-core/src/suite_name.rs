//! Strongly-typed suite name.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// A non-empty suite name, e.g. `TiffSuite`.
    pub struct SuiteName;
}

impl SuiteName {
    /// Build a name from a compile-time constant, kept verbatim.
    ///
    /// The constant must not be empty.
    pub fn from_static(name: &'static str) -> Self {
        debug_assert!(!name.is_empty(), "suite names must not be empty");
        Self(name.to_string())
    }
}
