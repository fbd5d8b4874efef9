//! Public book and page listings.

use crate::ContentStore;

/// Formats a library position as a route segment.
fn route(index: usize) -> String {
    format!("/{}", index)
}

/// Route listings derived from a [`ContentStore`].
///
/// Routes are data positions: hiding the introduction book leaves a gap in
/// the listing rather than renumbering the books after it.
///
/// # Examples
///
/// ```
/// use storyline_core::{BookCatalog, ContentStore};
///
/// let json = r#"{"introduction":1,"books":[{"pages":[{}]},{"pages":[{}]},{"pages":[{},{}]}]}"#;
/// let catalog = BookCatalog::new(ContentStore::from_json(json).unwrap());
///
/// assert_eq!(catalog.list_books(), vec!["/0", "/2"]);
/// assert_eq!(catalog.introduction_route().as_deref(), Some("/1"));
/// assert_eq!(catalog.list_pages(2), Some(vec!["/0".to_string(), "/1".to_string()]));
/// ```
#[derive(Debug, Clone)]
pub struct BookCatalog {
    store: ContentStore,
}

impl BookCatalog {
    /// Creates a catalog over `store`.
    pub fn new(store: ContentStore) -> Self {
        Self { store }
    }

    /// Number of books, including the introduction.
    pub fn book_count(&self) -> usize {
        self.store.book_count()
    }

    /// One route per book, skipping the introduction book.
    pub fn list_books(&self) -> Vec<String> {
        let introduction = *self.store.library().introduction();
        (0..self.store.book_count())
            .filter(|&index| Some(index) != introduction)
            .map(route)
            .collect()
    }

    /// Route of the introduction book, if one is configured.
    pub fn introduction_route(&self) -> Option<String> {
        (*self.store.library().introduction()).map(route)
    }

    /// One route per page of `book`, or `None` if the book does not exist.
    pub fn list_pages(&self, book: usize) -> Option<Vec<String>> {
        self.store
            .book_at(book)
            .map(|b| (0..b.page_count()).map(route).collect())
    }
}
