//! Page-graph navigation for branching interactive fiction.
//!
//! Content is loaded once into a [`ContentStore`] and never changes. Every
//! query is a pure lookup:
//!
//! - [`PageResolver`] maps (book, page) coordinates to a page
//! - [`NavigationEngine`] answers story, type, choices and metadata queries,
//!   substituting fallback content for missing pages
//! - [`BookCatalog`] lists book and page routes
//! - [`Dictionary`] serves the companion word list
//!
//! # Example
//!
//! ```
//! use storyline_core::{BookCatalog, Choice, ContentStore, NavigationEngine, PageResolver};
//!
//! let json = r#"{
//!     "introduction": 1,
//!     "books": [
//!         {"pages": [{"story": "Start", "options": [{"toPage": 1, "name": "On"}]}, {"story": "You wake up."}]},
//!         {"pages": [{"story": "Welcome"}]}
//!     ]
//! }"#;
//! let store = ContentStore::from_json(json).unwrap();
//! let catalog = BookCatalog::new(store.clone());
//! let engine = NavigationEngine::new(PageResolver::new(store));
//!
//! assert_eq!(catalog.list_books(), vec!["/0"]);
//! assert_eq!(engine.story_of(0, 1), "You wake up.");
//! assert_eq!(engine.choices_of(0, 1), vec![Choice::go_back()]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod dictionary;
mod model;
mod navigation;
mod resolver;
mod store;

pub use catalog::BookCatalog;
pub use dictionary::{Dictionary, DictionaryEntry};
pub use model::{
    Book, BookBuilder, BookMetadata, Choice, DEFAULT_PAGE_TYPE, DanglingChoice, Library, Page,
    PageBuilder,
};
pub use navigation::{FALLBACK_STORIES, NavigationEngine};
pub use resolver::PageResolver;
pub use store::ContentStore;
