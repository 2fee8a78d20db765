//! Normalization passes
//!
//! Conditions are normalized in two passes: negations are pushed down to the
//! leaves and comparisons (`nnf`), then the result is flattened and sorted
//! into a canonical tree with a signature (`canonicalizer`).

pub mod canonicalizer;
pub mod nnf;

pub use canonicalizer::Canonicalizer;
pub use nnf::{fold_header_name, NnfTransformer};
