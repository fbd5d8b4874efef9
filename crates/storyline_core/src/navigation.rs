//! Page queries with fallback content.
//!
//! Missing pages never produce errors. A story that is not there is replaced
//! by a placeholder sentence, a missing type by [`DEFAULT_PAGE_TYPE`], and a
//! page without choices offers [`Choice::go_back`] so the reader is never
//! stuck. Metadata is the exception: an unknown book has none.

use crate::{BookMetadata, Choice, DEFAULT_PAGE_TYPE, PageResolver};
use rand::Rng;
use tracing::debug;

/// Placeholder sentences served in place of a missing story.
pub const FALLBACK_STORIES: [&str; 2] = [
    "This part of the story went missing.",
    "This part of the story got burned up.",
];

/// Answers the content questions behind a single page view.
#[derive(Debug, Clone)]
pub struct NavigationEngine {
    resolver: PageResolver,
}

impl NavigationEngine {
    /// Creates an engine over `resolver`.
    pub fn new(resolver: PageResolver) -> Self {
        Self { resolver }
    }

    /// The resolver backing this engine.
    pub fn resolver(&self) -> &PageResolver {
        &self.resolver
    }

    /// Story text of a page, or a random placeholder from [`FALLBACK_STORIES`].
    pub fn story_of(&self, book: usize, page: usize) -> String {
        self.story_of_with_rng(book, page, &mut rand::thread_rng())
    }

    /// Like [`story_of`](Self::story_of), drawing the placeholder from `rng`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::{SeedableRng, rngs::StdRng};
    /// use storyline_core::{ContentStore, FALLBACK_STORIES, NavigationEngine, PageResolver};
    ///
    /// let store = ContentStore::from_json(r#"{"books":[{"pages":[{"story":"Hi"}]}]}"#).unwrap();
    /// let engine = NavigationEngine::new(PageResolver::new(store));
    /// let mut rng = StdRng::seed_from_u64(7);
    ///
    /// assert_eq!(engine.story_of_with_rng(0, 0, &mut rng), "Hi");
    /// let missing = engine.story_of_with_rng(0, 9, &mut rng);
    /// assert!(FALLBACK_STORIES.contains(&missing.as_str()));
    /// ```
    pub fn story_of_with_rng<R: Rng>(&self, book: usize, page: usize, rng: &mut R) -> String {
        match self.resolver.resolve(book, page).and_then(|p| p.story().as_ref()) {
            Some(story) => story.clone(),
            None => {
                let placeholder = FALLBACK_STORIES[rng.gen_range(0..FALLBACK_STORIES.len())];
                debug!(book, page, placeholder, "Serving placeholder story");
                placeholder.to_string()
            }
        }
    }

    /// Type tag of a page, or `"page"`.
    pub fn type_of(&self, book: usize, page: usize) -> String {
        match self.resolver.resolve(book, page) {
            Some(p) => p.page_type().clone(),
            None => {
                debug!(book, page, "Serving default page type");
                DEFAULT_PAGE_TYPE.to_string()
            }
        }
    }

    /// Choices of a page in authored order, or a single [`Choice::go_back`].
    pub fn choices_of(&self, book: usize, page: usize) -> Vec<Choice> {
        match self.resolver.resolve(book, page) {
            Some(p) if !p.options().is_empty() => p.options().clone(),
            _ => {
                debug!(book, page, "Serving default choice");
                vec![Choice::go_back()]
            }
        }
    }

    /// Metadata of a book, or `None` if the book does not exist.
    pub fn metadata_of(&self, book: usize) -> Option<&BookMetadata> {
        self.resolver.store().book_at(book).map(|b| b.metadata())
    }
}
