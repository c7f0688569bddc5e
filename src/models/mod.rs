//! Value types shared between the catalog and its callers

pub mod import_report;
pub mod loan;
pub mod search;

// Re-export commonly used types
pub use import_report::ImportReport;
pub use loan::{IssueOutcome, ReturnOutcome};
pub use search::{SearchHit, Shelf};
