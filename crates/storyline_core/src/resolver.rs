//! Two-level page lookup shared by every page query.

use crate::{ContentStore, Page};
use tracing::trace;

/// Resolves (book, page) coordinates to a page.
///
/// All page-level queries go through [`PageResolver::resolve`] so they agree
/// on bounds.
#[derive(Debug, Clone)]
pub struct PageResolver {
    store: ContentStore,
}

impl PageResolver {
    /// Creates a resolver over `store`.
    pub fn new(store: ContentStore) -> Self {
        Self { store }
    }

    /// The store this resolver reads from.
    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// The page at (`book`, `page`), or `None` if the book or page does not exist.
    pub fn resolve(&self, book: usize, page: usize) -> Option<&Page> {
        let resolved = self.store.page_at(book, page);
        if resolved.is_none() {
            trace!(book, page, "Page not found");
        }
        resolved
    }
}
