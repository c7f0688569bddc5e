//! Loan protocol tests through the public API

use std::fs;

use lending_catalog::{
    import::ImportLimits,
    models::{IssueOutcome, ReturnOutcome, Shelf},
    notice::FileNoticeSink,
    AppError, Catalog, MAX_LOANS_PER_USER,
};

const CATALOG: &str = "5\n\
Dune\nFrank Herbert\n\
Emma\nJane Austen\n\
Persuasion\nJane Austen\n\
Kindred\nOctavia E. Butler\n\
Beloved\nToni Morrison\n\
3\n\
John Smith\n\
Ada Lovelace\n\
Jane Smith\n";

fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .import_from_reader(CATALOG.as_bytes(), ImportLimits::default())
        .expect("Import should succeed");
    catalog
}

fn snapshot(catalog: &Catalog) -> (Vec<Option<usize>>, Vec<u8>) {
    (
        catalog.books().iter().map(|b| b.loaned_to()).collect(),
        catalog.users().iter().map(|u| u.loaned_count()).collect(),
    )
}

#[test]
fn test_shelf_positions() {
    let catalog = catalog();
    let titles: Vec<_> = catalog.books().iter().map(|b| b.title()).collect();
    assert_eq!(titles, vec!["Emma", "Persuasion", "Kindred", "Dune", "Beloved"]);
    let names: Vec<_> = catalog.users().iter().map(|u| u.name_by_surname()).collect();
    assert_eq!(names, vec!["Lovelace, Ada", "Smith, Jane", "Smith, John"]);
}

#[test]
fn test_capacity_rollback_is_idempotent() {
    let mut catalog = catalog();
    for book in 0..3 {
        assert_eq!(catalog.issue(book, 2).unwrap(), IssueOutcome::Issued);
    }
    assert_eq!(
        catalog.user(2).unwrap().loaned_count(),
        MAX_LOANS_PER_USER
    );

    let before = snapshot(&catalog);
    assert_eq!(catalog.issue(3, 2).unwrap(), IssueOutcome::AtCapacity);
    assert_eq!(catalog.issue(3, 2).unwrap(), IssueOutcome::AtCapacity);
    assert_eq!(snapshot(&catalog), before);

    // another user can still take it
    assert_eq!(catalog.issue(3, 0).unwrap(), IssueOutcome::Issued);
}

#[test]
fn test_loan_exclusivity() {
    let mut catalog = catalog();
    assert_eq!(catalog.issue(4, 0).unwrap(), IssueOutcome::Issued);
    for user in 0..3 {
        assert_eq!(catalog.issue(4, user).unwrap(), IssueOutcome::AlreadyOnLoan);
    }
    assert_eq!(catalog.borrower_of(4).unwrap(), Some(0));
    assert_eq!(catalog.user(0).unwrap().loaned_count(), 1);
}

#[test]
fn test_return_wrong_user_changes_nothing() {
    let mut catalog = catalog();
    catalog.issue(0, 0).unwrap();
    let before = snapshot(&catalog);
    assert_eq!(
        catalog.return_book(0, 1).unwrap(),
        ReturnOutcome::NotLoanedToUser
    );
    assert_eq!(snapshot(&catalog), before);

    assert_eq!(catalog.return_book(0, 0).unwrap(), ReturnOutcome::Returned);
    assert_eq!(
        catalog.return_book(0, 0).unwrap(),
        ReturnOutcome::NotLoanedToUser
    );
}

#[test]
fn test_out_of_range_never_mutates() {
    let mut catalog = catalog();
    let before = snapshot(&catalog);
    assert!(matches!(catalog.issue(5, 0), Err(AppError::OutOfRange { .. })));
    assert!(matches!(catalog.issue(0, 3), Err(AppError::OutOfRange { .. })));
    assert!(matches!(
        catalog.return_book(0, 3),
        Err(AppError::OutOfRange { .. })
    ));
    assert_eq!(snapshot(&catalog), before);
}

#[test]
fn test_search_then_issue_by_match() {
    let mut catalog = catalog();
    let hits = catalog.search_books("Jane");
    assert_eq!(hits.iter().map(|h| h.index).collect::<Vec<_>>(), vec![0, 1]);

    let second = catalog
        .nth_match_index(Shelf::Books, "Jane", 2)
        .expect("Second match should exist");
    let smith = catalog
        .nth_match_index(Shelf::Users, "Smith", 1)
        .expect("Match should exist");
    assert_eq!(catalog.issue(second, smith).unwrap(), IssueOutcome::Issued);
    assert_eq!(catalog.loans_of(smith).unwrap(), vec![1]);

    assert_eq!(catalog.search(Shelf::Users, "Jane"), vec![1]);
}

#[test]
fn test_return_notice_written_to_file() {
    let mut catalog = catalog();
    catalog.issue(3, 1).unwrap();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notice.txt");
    let mut sink = FileNoticeSink::new(&path, |recipient: &str, book: &str| {
        format!("Dear {recipient},\n\n{book}\n")
    });

    assert!(catalog.send_return_notice(3, &mut sink).unwrap());
    let written = fs::read_to_string(&path).expect("Notice should exist");
    assert_eq!(written, "Dear Jane,\n\nHerbert, Frank. Dune.\n");
}

#[test]
fn test_return_notice_unwritable_destination() {
    let mut catalog = catalog();
    catalog.issue(3, 1).unwrap();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut sink = FileNoticeSink::new(dir.path().join("missing/notice.txt"), |r: &str, b: &str| {
        format!("{r} {b}")
    });
    assert!(!catalog.send_return_notice(3, &mut sink).unwrap());
}
