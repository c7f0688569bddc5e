//! Import tests against files on disk

use std::io::Write;

use lending_catalog::{import::ImportLimits, Book, Catalog, ImportError, User};
use tempfile::NamedTempFile;

fn catalog_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[test]
fn test_import_well_formed_file() {
    let file = catalog_file(
        "3\nDune\nFrank Herbert\nEmma\nJane Austen\nThe Hobbit\nJ. R. R. Tolkien\n\
         2\nJohn Smith\nanna smith\n",
    );
    let mut catalog = Catalog::new();
    let report = catalog
        .import_file(file.path(), ImportLimits::default())
        .expect("Import should succeed");

    assert_eq!(report.books, 3);
    assert_eq!(report.users, 2);
    assert_eq!(catalog.book_count(), 3);
    assert_eq!(catalog.user_count(), 2);

    let surnames: Vec<_> = catalog.books().iter().map(Book::author_surname).collect();
    assert_eq!(surnames, vec!["Austen", "Herbert", "Tolkien"]);
    // surnames equal ignoring case, so forenames decide
    let forenames: Vec<_> = catalog.users().iter().map(User::forename).collect();
    assert_eq!(forenames, vec!["anna", "John"]);
}

#[test]
fn test_short_surname_ranks_first() {
    let file = catalog_file("2\nDune\nFrank Herbert\nTitle2\nA B\n1\nJohn Smith\n");
    let mut catalog = Catalog::new();
    catalog
        .import_file(file.path(), ImportLimits::default())
        .expect("Import should succeed");
    assert_eq!(catalog.book(0).unwrap().title(), "Title2");
    assert_eq!(catalog.book(1).unwrap().title(), "Dune");
}

#[test]
fn test_malformed_files_leave_catalog_empty() {
    let inputs = [
        "",
        "0\n1\nJohn Smith\n",
        "1\nDune\nNoSpaceHere\n1\nJohn Smith\n",
        "1\nDune\nFrank Herbert\n",
        "1\nDune\nFrank Herbert\n1\nJohn\n",
        "2\nDune\nFrank Herbert\n1\nJohn Smith\n",
        "1\nDune\nFrank Herbert\n1\nJohn Smith\n1\n",
        "1\n\nFrank Herbert\n1\nJohn Smith\n",
        "1\nDune\nFrank Herbert\n99999999999999999999999\nJohn Smith\n",
    ];

    for input in inputs {
        let good = catalog_file("1\nDune\nFrank Herbert\n1\nJohn Smith\n");
        let bad = catalog_file(input);
        let mut catalog = Catalog::new();
        catalog
            .import_file(good.path(), ImportLimits::default())
            .expect("Import should succeed");
        catalog.issue(0, 0).expect("Issue should succeed");

        let err = catalog
            .import_file(bad.path(), ImportLimits::default())
            .expect_err("Import should fail");
        assert!(err.is_recoverable(), "{input:?} gave {err}");
        assert_eq!(catalog.book_count(), 0, "{input:?}");
        assert_eq!(catalog.user_count(), 0, "{input:?}");
    }
}

#[test]
fn test_range_error_is_distinct() {
    let file = catalog_file("1\nDune\nFrank Herbert\n99999999999999999999999\nJohn Smith\n");
    let mut catalog = Catalog::new();
    let err = catalog
        .import_file(file.path(), ImportLimits::default())
        .expect_err("Import should fail");
    assert!(matches!(err, ImportError::Range { line: 4, .. }));
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut catalog = Catalog::new();
    let err = catalog
        .import_file(dir.path().join("missing.txt"), ImportLimits::default())
        .expect_err("Import should fail");
    assert!(matches!(err, ImportError::Read(_)));
    assert!(!err.is_recoverable());
}
