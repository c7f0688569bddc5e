//! Loan operation outcomes

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

/// Result of issuing a book to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueOutcome {
    Issued,
    /// The book already has a borrower; nothing changed.
    AlreadyOnLoan,
    /// The user already holds the maximum number of loans; the book was
    /// released again.
    AtCapacity,
}

impl IssueOutcome {
    pub fn is_issued(self) -> bool {
        self == IssueOutcome::Issued
    }

    /// Legacy numeric status for this outcome
    pub fn code(self) -> ErrorCode {
        match self {
            IssueOutcome::Issued => ErrorCode::Success,
            IssueOutcome::AlreadyOnLoan => ErrorCode::AlreadyOnLoan,
            IssueOutcome::AtCapacity => ErrorCode::AtCapacity,
        }
    }
}

/// Result of returning a book from a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnOutcome {
    Returned,
    NotLoanedToUser,
}

impl ReturnOutcome {
    pub fn is_returned(self) -> bool {
        self == ReturnOutcome::Returned
    }
}
