//! Borrower record

use std::cmp::Ordering;

use crate::collection::{cmp_ignore_case, Ranked};

/// Most books a single user may hold at once
pub const MAX_LOANS_PER_USER: u8 = 3;

/// A library user, ranked by surname then forename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    forename: String,
    surname: String,
    loaned_count: u8,
}

impl User {
    pub(crate) fn new(forename: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            forename: forename.into(),
            surname: surname.into(),
            loaned_count: 0,
        }
    }

    pub fn forename(&self) -> &str {
        &self.forename
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn loaned_count(&self) -> u8 {
        self.loaned_count
    }

    pub fn at_capacity(&self) -> bool {
        self.loaned_count >= MAX_LOANS_PER_USER
    }

    /// "Surname, Forename"
    pub fn name_by_surname(&self) -> String {
        format!("{}, {}", self.surname, self.forename)
    }

    /// Number of searchable fields containing `needle`, checked as surname
    /// then forename.
    pub(crate) fn matching_fields(&self, needle: &str) -> usize {
        [&self.surname, &self.forename]
            .into_iter()
            .filter(|field| field.contains(needle))
            .count()
    }

    pub(super) fn borrow_one(&mut self) -> bool {
        if self.at_capacity() {
            return false;
        }
        self.loaned_count += 1;
        true
    }

    pub(super) fn return_one(&mut self) -> bool {
        match self.loaned_count.checked_sub(1) {
            Some(count) => {
                self.loaned_count = count;
                true
            }
            None => false,
        }
    }
}

impl Ranked for User {
    fn rank(&self, other: &Self) -> Ordering {
        cmp_ignore_case(&self.surname, &other.surname)
            .then_with(|| cmp_ignore_case(&self.forename, &other.forename))
    }
}
