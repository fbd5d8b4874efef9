//! Shared fixtures for storyline_core tests.
#![allow(dead_code)]

use storyline_core::{Book, BookMetadata, Choice, ContentStore, Library, Page};

/// Library used across the navigation and catalog tests.
///
/// - Book 0: three pages; page 0 branches, page 1 has no options,
///   page 2 has a custom type and no story.
/// - Book 1: the introduction book, one page.
pub fn sample_library() -> Library {
    let cave = Book::builder()
        .metadata(
            BookMetadata::titled("The Cave").with_field("author", serde_json::json!("A. Writer")),
        )
        .pages(vec![
            Page::builder()
                .story("You stand at the mouth of a cave.")
                .page_type("start")
                .options(vec![Choice::new(1, "Enter"), Choice::new(2, "Walk away")])
                .build()
                .expect("Valid page"),
            Page::builder()
                .story("You wake up.")
                .build()
                .expect("Valid page"),
            Page::builder()
                .page_type("ending")
                .build()
                .expect("Valid page"),
        ])
        .build()
        .expect("Valid book");

    let welcome = Book::builder()
        .pages(vec![
            Page::builder()
                .story("Welcome, reader.")
                .build()
                .expect("Valid page"),
        ])
        .build()
        .expect("Valid book");

    Library::new(vec![cave, welcome], Some(1)).expect("Valid library")
}

/// Content store over [`sample_library`].
pub fn sample_store() -> ContentStore {
    ContentStore::new(sample_library())
}
