//! Catalog coordinator
//!
//! Owns the book shelf and the user register and keeps the two consistent:
//! a book's borrower index and that user's loan count always move together.
//! Every index here is an internal 0-based position; callers showing IDs to
//! people translate them.

mod book;
mod user;

use std::io::BufRead;
use std::path::Path;

pub use book::Book;
pub use user::{User, MAX_LOANS_PER_USER};

use crate::{
    collection::SealedList,
    error::{AppError, AppResult, ImportError},
    import::{self, CatalogReader, ImportDraft, ImportLimits},
    models::{ImportReport, IssueOutcome, ReturnOutcome, SearchHit, Shelf},
    notice::NoticeSink,
};

/// Books and users addressed by their shelf positions.
#[derive(Debug, Default)]
pub struct Catalog {
    books: SealedList<Book>,
    users: SealedList<User>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog straight from a parsed draft.
    pub fn from_draft(draft: ImportDraft) -> Self {
        let (books, users) = draft.into_parts();
        Self {
            books: books.seal(),
            users: users.seal(),
        }
    }

    /// Replace the whole catalog with the contents of `reader`.
    ///
    /// The catalog is emptied first. If the input is rejected it stays empty.
    pub fn import_from_reader<R: BufRead>(
        &mut self,
        reader: R,
        limits: ImportLimits,
    ) -> Result<ImportReport, ImportError> {
        self.clear();
        let draft = CatalogReader::with_limits(reader, limits).parse()?;
        Ok(self.install(draft))
    }

    /// Replace the whole catalog with the contents of the file at `path`.
    pub fn import_file(
        &mut self,
        path: impl AsRef<Path>,
        limits: ImportLimits,
    ) -> Result<ImportReport, ImportError> {
        self.clear();
        let draft = import::import_file(path, limits)?;
        Ok(self.install(draft))
    }

    fn install(&mut self, draft: ImportDraft) -> ImportReport {
        let report = draft.report();
        *self = Self::from_draft(draft);
        tracing::debug!(books = report.books, users = report.users, "catalog installed");
        report
    }

    /// Drop every book and user.
    pub fn clear(&mut self) {
        self.books.clear();
        self.users.clear();
    }

    pub fn books(&self) -> &SealedList<Book> {
        &self.books
    }

    pub fn users(&self) -> &SealedList<User> {
        &self.users
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn book(&self, index: usize) -> AppResult<&Book> {
        self.books.get(index).ok_or(AppError::OutOfRange {
            kind: Shelf::Books,
            index,
            len: self.books.len(),
        })
    }

    pub fn user(&self, index: usize) -> AppResult<&User> {
        self.users.get(index).ok_or(AppError::OutOfRange {
            kind: Shelf::Users,
            index,
            len: self.users.len(),
        })
    }

    /// Index of the user currently holding `book`, if it is out.
    pub fn borrower_of(&self, book: usize) -> AppResult<Option<usize>> {
        Ok(self.book(book)?.loaned_to())
    }

    /// Indices of the books on loan to `user`, in shelf order.
    pub fn loans_of(&self, user: usize) -> AppResult<Vec<usize>> {
        self.user(user)?;
        Ok(self
            .books
            .iter()
            .enumerate()
            .filter(|(_, b)| b.loaned_to() == Some(user))
            .map(|(i, _)| i)
            .collect())
    }

    fn check_indices(&self, book: usize, user: usize) -> AppResult<()> {
        self.book(book)?;
        self.user(user)?;
        Ok(())
    }

    /// Lend `book` to `user`.
    ///
    /// The book is marked first; if the user then turns out to be at the
    /// loan limit the mark is undone before returning.
    pub fn issue(&mut self, book: usize, user: usize) -> AppResult<IssueOutcome> {
        self.check_indices(book, user)?;

        let b = self
            .books
            .get_mut(book)
            .ok_or_else(|| desync(book, user))?;
        if !b.lend(user) {
            tracing::debug!(book, user, borrower = ?b.loaned_to(), "book already on loan");
            return Ok(IssueOutcome::AlreadyOnLoan);
        }

        let user_accepted = self
            .users
            .get_mut(user)
            .map(User::borrow_one)
            .unwrap_or(false);
        if user_accepted {
            tracing::debug!(book, user, "book issued");
            return Ok(IssueOutcome::Issued);
        }

        // roll back the book side
        if self.books.get_mut(book).is_some_and(Book::take_back) {
            tracing::debug!(book, user, "user at loan limit, issue rolled back");
            Ok(IssueOutcome::AtCapacity)
        } else {
            Err(desync(book, user))
        }
    }

    /// Take `book` back from `user`.
    ///
    /// Returns [`ReturnOutcome::NotLoanedToUser`] without touching anything if
    /// the book is not out to that user. If the book lists the user but the
    /// user has no loans recorded, the catalog is corrupt and
    /// [`AppError::InvariantViolation`] is returned.
    pub fn return_book(&mut self, book: usize, user: usize) -> AppResult<ReturnOutcome> {
        self.check_indices(book, user)?;

        if self.borrower_of(book)? != Some(user) {
            return Ok(ReturnOutcome::NotLoanedToUser);
        }
        if self.user(user)?.loaned_count() == 0 {
            return Err(desync(book, user));
        }

        let book_released = self
            .books
            .get_mut(book)
            .map(Book::take_back)
            .unwrap_or(false);
        let user_released = self
            .users
            .get_mut(user)
            .map(User::return_one)
            .unwrap_or(false);
        if !(book_released && user_released) {
            return Err(desync(book, user));
        }

        tracing::debug!(book, user, "book returned");
        Ok(ReturnOutcome::Returned)
    }

    /// Indices of every field match for `needle`, in shelf order.
    ///
    /// Matching is a case-sensitive substring test. A record matching on
    /// several fields appears once per matching field.
    pub fn search(&self, kind: Shelf, needle: &str) -> Vec<usize> {
        self.match_counts(kind, needle)
            .flat_map(|(index, count)| std::iter::repeat(index).take(count))
            .collect()
    }

    pub fn search_books<'a>(&'a self, needle: &str) -> Vec<SearchHit<'a, Book>> {
        self.search(Shelf::Books, needle)
            .into_iter()
            .filter_map(|index| {
                self.books
                    .get(index)
                    .map(|record| SearchHit { index, record })
            })
            .collect()
    }

    pub fn search_users<'a>(&'a self, needle: &str) -> Vec<SearchHit<'a, User>> {
        self.search(Shelf::Users, needle)
            .into_iter()
            .filter_map(|index| {
                self.users
                    .get(index)
                    .map(|record| SearchHit { index, record })
            })
            .collect()
    }

    /// Index of the record holding the `n`th field match (1-based), scanning
    /// in the same order as [`Catalog::search`].
    pub fn nth_match_index(&self, kind: Shelf, needle: &str, n: usize) -> Option<usize> {
        if n == 0 {
            return None;
        }
        let mut remaining = n;
        for (index, count) in self.match_counts(kind, needle) {
            if remaining <= count {
                return Some(index);
            }
            remaining -= count;
        }
        None
    }

    fn match_counts<'a>(
        &'a self,
        kind: Shelf,
        needle: &'a str,
    ) -> Box<dyn Iterator<Item = (usize, usize)> + 'a> {
        match kind {
            Shelf::Books => Box::new(
                self.books
                    .iter()
                    .map(move |b| b.matching_fields(needle))
                    .enumerate(),
            ),
            Shelf::Users => Box::new(
                self.users
                    .iter()
                    .map(move |u| u.matching_fields(needle))
                    .enumerate(),
            ),
        }
    }

    /// Hand the borrower's forename and the book citation to `sink`.
    ///
    /// Returns `false` when the book is not on loan or the sink fails.
    pub fn send_return_notice(&self, book: usize, sink: &mut dyn NoticeSink) -> AppResult<bool> {
        let b = self.book(book)?;
        let Some(user) = b.loaned_to() else {
            return Ok(false);
        };
        let recipient = self.users.get(user).ok_or_else(|| desync(book, user))?;

        match sink.write_return_notice(recipient.forename(), &b.citation()) {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::debug!(book, user, error = %e, "return notice not written");
                Ok(false)
            }
        }
    }
}

fn desync(book: usize, user: usize) -> AppError {
    AppError::InvariantViolation(format!(
        "book {book} and user {user} disagree about their loan"
    ))
}
