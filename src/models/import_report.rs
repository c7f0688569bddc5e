//! Summary of a successful catalog import.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Report returned after both sections of an import file were accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportReport {
    pub books: usize,
    pub users: usize,
    /// Physical lines consumed, including count lines.
    pub lines: usize,
    pub imported_at: DateTime<Utc>,
}
