//! Categorical error type for the public API (spec.md §7). Modeled with
//! `thiserror` the way `burdges-rs-ec-perf` and the sibling `ccsds-rs`
//! crate both derive their RS error enums, rather than the original
//! C source's `NULL`-return convention.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum MultiCodeError {
    #[error("invalid argument: {0}")]
    InvalidInput(String),

    #[error("code could not be corrected")]
    Uncorrectable,

    #[error("input glyph matched both alphabets, or repair settled at the wrong length")]
    StructuralMismatch,
}
