//! Catalog import
//!
//! Reads the two-section text format (books, then users) into open
//! [`SortedList`](crate::collection::SortedList)s. Nothing here knows about
//! loans; the catalog seals the lists once an import succeeds.

pub mod parser;

pub use parser::{import_file, CatalogReader, ImportDraft, ImportLimits};
