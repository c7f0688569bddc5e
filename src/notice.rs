//! Return notice hand-off
//!
//! The catalog decides who gets a return notice and for which book; the
//! wording and the destination belong to whoever implements [`NoticeSink`].

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoticeError {
    #[error("Failed to write return notice: {0}")]
    Write(#[from] io::Error),

    #[error("Notice rejected: {0}")]
    Rejected(String),
}

/// Destination for return notices.
#[cfg_attr(test, mockall::automock)]
pub trait NoticeSink {
    /// `recipient` is the borrower's forename, `book` a one-line citation.
    fn write_return_notice(&mut self, recipient: &str, book: &str) -> Result<(), NoticeError>;
}

/// Sink that passes both strings to a formatting function and writes the
/// result to a file, truncating it.
pub struct FileNoticeSink<F> {
    path: PathBuf,
    format: F,
}

impl<F> FileNoticeSink<F>
where
    F: Fn(&str, &str) -> String,
{
    pub fn new(path: impl Into<PathBuf>, format: F) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }
}

impl<F> NoticeSink for FileNoticeSink<F>
where
    F: Fn(&str, &str) -> String,
{
    fn write_return_notice(&mut self, recipient: &str, book: &str) -> Result<(), NoticeError> {
        let mut file = File::create(&self.path)?;
        file.write_all((self.format)(recipient, book).as_bytes())?;
        file.flush()?;
        Ok(())
    }
}
