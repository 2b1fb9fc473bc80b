use thiserror::Error;

use crate::unit_variants::CanonicalUnit;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitTableError {
    #[error("Ambiguous unit spelling '{spelling}': maps to both {first} and {second}")]
    AmbiguousVariant {
        spelling: String,
        first: CanonicalUnit,
        second: CanonicalUnit,
    },
}
