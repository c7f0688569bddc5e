//! Catalog file parser
//!
//! Format, one record field per line, no blank lines:
//!
//! ```text
//! <number of books>
//! <title>
//! <author forename(s)> <author surname>
//! ...
//! <number of users>
//! <forename> <surname>
//! ...
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::num::IntErrorKind;
use std::path::Path;

use chrono::Utc;

use crate::{
    catalog::{Book, User},
    collection::SortedList,
    error::ImportError,
    models::ImportReport,
};

/// Sections in the order they must appear
const SECTIONS: [Section; 2] = [Section::Books, Section::Users];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Books,
    Users,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Books => f.write_str("books"),
            Section::Users => f.write_str("users"),
        }
    }
}

/// Bounds applied to declared section counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportLimits {
    /// Largest count a section may declare before it is a range error
    pub max_section_records: usize,
}

impl Default for ImportLimits {
    fn default() -> Self {
        Self {
            max_section_records: i32::MAX as usize,
        }
    }
}

/// Books and users read from one import, still open for insertion.
#[derive(Debug, Default)]
pub struct ImportDraft {
    books: SortedList<Book>,
    users: SortedList<User>,
    lines: usize,
}

impl ImportDraft {
    pub fn books(&self) -> &SortedList<Book> {
        &self.books
    }

    pub fn users(&self) -> &SortedList<User> {
        &self.users
    }

    pub fn report(&self) -> ImportReport {
        ImportReport {
            books: self.books.len(),
            users: self.users.len(),
            lines: self.lines,
            imported_at: Utc::now(),
        }
    }

    pub(crate) fn into_parts(self) -> (SortedList<Book>, SortedList<User>) {
        (self.books, self.users)
    }
}

/// Line-oriented reader for the catalog format.
pub struct CatalogReader<R> {
    lines: Lines<R>,
    line_no: usize,
    limits: ImportLimits,
}

impl<R: BufRead> CatalogReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_limits(reader, ImportLimits::default())
    }

    pub fn with_limits(reader: R, limits: ImportLimits) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            limits,
        }
    }

    /// Consume the whole input. Either every declared record is read or an
    /// error is returned and the partial draft is dropped.
    pub fn parse(mut self) -> Result<ImportDraft, ImportError> {
        let mut draft = ImportDraft::default();

        for section in SECTIONS {
            let Some(line) = self.next_line()? else {
                let reason = if self.line_no == 0 {
                    "input is empty".to_string()
                } else {
                    format!("missing {section} count")
                };
                return Err(ImportError::syntax(self.line_no + 1, reason));
            };
            let declared = self.parse_count(&line)?;
            tracing::debug!(%section, declared, line = self.line_no, "reading section");

            for read in 0..declared {
                let Some(line) = self.next_line()? else {
                    return Err(self.shortfall(section, declared, read));
                };
                self.check_record_start(&line, section, declared, read)?;
                match section {
                    Section::Books => {
                        let book = self.read_book(line)?;
                        draft.books.insert(book);
                    }
                    Section::Users => {
                        let user = self.parse_user(&line)?;
                        draft.users.insert(user);
                    }
                }
            }
        }

        if self.next_line()?.is_some() {
            return Err(ImportError::syntax(
                self.line_no,
                "unexpected content after the users section",
            ));
        }

        draft.lines = self.line_no;
        tracing::debug!(
            books = draft.books.len(),
            users = draft.users.len(),
            lines = draft.lines,
            "import parsed"
        );
        Ok(draft)
    }

    fn next_line(&mut self) -> Result<Option<String>, ImportError> {
        match self.lines.next() {
            Some(line) => {
                self.line_no += 1;
                Ok(Some(line?))
            }
            None => Ok(None),
        }
    }

    fn parse_count(&self, line: &str) -> Result<usize, ImportError> {
        if line.is_empty() {
            return Err(ImportError::syntax(
                self.line_no,
                "empty line where a count was expected",
            ));
        }
        match line.parse::<usize>() {
            Ok(0) => Err(ImportError::syntax(self.line_no, "count must be over 0")),
            Ok(n) if n > self.limits.max_section_records => Err(self.range(line)),
            Ok(n) => Ok(n),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Err(self.range(line)),
            Err(_) => Err(ImportError::syntax(
                self.line_no,
                format!("expected a count, found {line:?}"),
            )),
        }
    }

    fn range(&self, line: &str) -> ImportError {
        ImportError::Range {
            line: self.line_no,
            value: line.to_string(),
        }
    }

    fn shortfall(&self, section: Section, declared: usize, read: usize) -> ImportError {
        ImportError::syntax(
            self.line_no,
            format!("declared {declared} {section} but found {read}"),
        )
    }

    /// The first line of a record may not be blank or look like a count.
    fn check_record_start(
        &self,
        line: &str,
        section: Section,
        declared: usize,
        read: usize,
    ) -> Result<(), ImportError> {
        if line.is_empty() {
            return Err(ImportError::syntax(self.line_no, "empty line"));
        }
        if is_positive_count(line) {
            return Err(self.shortfall(section, declared, read));
        }
        Ok(())
    }

    fn read_book(&mut self, title: String) -> Result<Book, ImportError> {
        let Some(author) = self.next_line()? else {
            return Err(ImportError::syntax(
                self.line_no + 1,
                format!("missing author line for {title:?}"),
            ));
        };
        if author.is_empty() {
            return Err(ImportError::syntax(self.line_no, "empty line"));
        }
        let (forename, surname) = split_author(&author).ok_or_else(|| {
            ImportError::syntax(
                self.line_no,
                format!("author {author:?} needs a forename and a surname"),
            )
        })?;
        Ok(Book::new(title, forename, surname))
    }

    fn parse_user(&self, line: &str) -> Result<User, ImportError> {
        let mut names = line.split_whitespace();
        match (names.next(), names.next(), names.next()) {
            (Some(forename), Some(surname), None) => Ok(User::new(forename, surname)),
            _ => Err(ImportError::syntax(
                self.line_no,
                format!("user {line:?} must be exactly a forename and a surname"),
            )),
        }
    }
}

/// Split on the last run of whitespace so forenames may contain spaces.
fn split_author(line: &str) -> Option<(&str, &str)> {
    let (forename, surname) = line.rsplit_once(char::is_whitespace)?;
    let forename = forename.trim_end();
    if forename.is_empty() || surname.is_empty() {
        return None;
    }
    Some((forename, surname))
}

fn is_positive_count(line: &str) -> bool {
    matches!(line.parse::<usize>(), Ok(n) if n > 0)
}

/// Open `path` and parse it. The file is closed on every return path.
pub fn import_file(path: impl AsRef<Path>, limits: ImportLimits) -> Result<ImportDraft, ImportError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening catalog file");
    let file = File::open(path)?;
    CatalogReader::with_limits(BufReader::new(file), limits).parse()
}
