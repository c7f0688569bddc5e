//! Lending Catalog
//!
//! Core of a small lending library: books and users kept in sorted shelves
//! whose positions double as their identifiers, a strict importer for the
//! two-section catalog file, and loan bookkeeping that keeps both shelves
//! consistent.

pub mod catalog;
pub mod collection;
pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod notice;

pub use catalog::{Book, Catalog, User, MAX_LOANS_PER_USER};
pub use config::AppConfig;
pub use error::{AppError, AppResult, ImportError};
