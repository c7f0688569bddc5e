//! Search request and result types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which shelf a query or index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shelf {
    Books,
    Users,
}

impl fmt::Display for Shelf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shelf::Books => f.write_str("book"),
            Shelf::Users => f.write_str("user"),
        }
    }
}

/// A matching record and its current index on the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a, T> {
    pub index: usize,
    pub record: &'a T,
}
