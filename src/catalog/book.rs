//! Book record

use std::cmp::Ordering;

use crate::collection::{cmp_ignore_case, Ranked};

/// A book on the shelf, ranked by author surname ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    title: String,
    author_forename: String,
    author_surname: String,
    loaned_to: Option<usize>,
}

impl Book {
    pub(crate) fn new(
        title: impl Into<String>,
        author_forename: impl Into<String>,
        author_surname: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author_forename: author_forename.into(),
            author_surname: author_surname.into(),
            loaned_to: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author_forename(&self) -> &str {
        &self.author_forename
    }

    pub fn author_surname(&self) -> &str {
        &self.author_surname
    }

    /// Index of the borrowing user, if any
    pub fn loaned_to(&self) -> Option<usize> {
        self.loaned_to
    }

    pub fn is_on_loan(&self) -> bool {
        self.loaned_to.is_some()
    }

    /// "Surname, Forename. Title."
    pub fn citation(&self) -> String {
        format!(
            "{}, {}. {}.",
            self.author_surname, self.author_forename, self.title
        )
    }

    /// Number of searchable fields containing `needle`, checked as
    /// surname, forename, then title.
    pub(crate) fn matching_fields(&self, needle: &str) -> usize {
        [&self.author_surname, &self.author_forename, &self.title]
            .into_iter()
            .filter(|field| field.contains(needle))
            .count()
    }

    /// Record `user` as the borrower. Fails if the book is already out.
    pub(super) fn lend(&mut self, user: usize) -> bool {
        if self.loaned_to.is_some() {
            return false;
        }
        self.loaned_to = Some(user);
        true
    }

    /// Clear the borrower. Fails if the book was not out.
    pub(super) fn take_back(&mut self) -> bool {
        self.loaned_to.take().is_some()
    }
}

impl Ranked for Book {
    fn rank(&self, other: &Self) -> Ordering {
        cmp_ignore_case(&self.author_surname, &other.author_surname)
    }
}
