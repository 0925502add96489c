//! Paper search primitives
//!
//! Two pure building blocks, wired together by the papers API handler:
//! - `translate`: canonicalizes a single query token via a fixed lookup table
//! - `SearchQuery`: builds the parameterized AND-of-ORs filter over the
//!   paper metadata columns

mod query;
mod translate;

pub use query::{SearchQuery, SEARCH_COLUMNS};
pub use translate::translate;
