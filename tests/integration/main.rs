//! Integration tests for the lending catalog

mod import_tests;
mod loan_tests;
