//! Library, book, page and choice types.

use derive_getters::Getters;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use storyline_error::{ContentError, ContentErrorKind};
use tracing::warn;

/// Type tag given to pages that do not declare one.
pub const DEFAULT_PAGE_TYPE: &str = "page";

fn default_page_type() -> String {
    DEFAULT_PAGE_TYPE.to_string()
}

/// Reads an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default_page_type<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_page_type))
}

/// A player choice leading to another page of the same book.
///
/// The target is a page index and is not checked against the book's page
/// count; see [`Library::dangling_choices`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Zero-based index of the target page
    to_page: usize,
    /// Label shown to the player
    name: String,
}

impl Choice {
    /// Creates a choice pointing at `to_page`.
    pub fn new(to_page: usize, name: impl Into<String>) -> Self {
        Self {
            to_page,
            name: name.into(),
        }
    }

    /// The choice offered when a page has nothing authored: back to page 0.
    pub fn go_back() -> Self {
        Self::new(0, "Go back")
    }
}

/// One narrative unit.
///
/// # Examples
///
/// ```
/// use storyline_core::{Choice, Page};
///
/// let page = Page::builder()
///     .story("You stand at the mouth of a cave.")
///     .options(vec![Choice::new(1, "Enter")])
///     .build()
///     .unwrap();
///
/// assert_eq!(page.page_type(), "page");
/// assert_eq!(page.options().len(), 1);
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct Page {
    /// Story text; pages may be authored without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    story: Option<String>,
    /// Page type tag
    #[serde(
        rename = "type",
        default = "default_page_type",
        deserialize_with = "null_as_default_page_type"
    )]
    #[builder(default = "default_page_type()")]
    page_type: String,
    /// Outgoing choices in authored order
    #[serde(default, deserialize_with = "null_as_default")]
    #[builder(default)]
    options: Vec<Choice>,
}

impl Page {
    /// Returns a builder for constructing a Page.
    pub fn builder() -> PageBuilder {
        PageBuilder::default()
    }
}

/// Book metadata: an optional title plus any author-defined fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct BookMetadata {
    /// Book title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    /// Remaining key/value pairs, kept verbatim
    #[serde(flatten)]
    fields: BTreeMap<String, serde_json::Value>,
}

impl BookMetadata {
    /// Creates metadata with the given title and no extra fields.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            fields: BTreeMap::new(),
        }
    }

    /// Adds an author-defined field.
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }
}

/// One story: metadata and an ordered sequence of pages.
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct Book {
    /// Book metadata
    #[serde(default, deserialize_with = "null_as_default")]
    #[builder(default)]
    metadata: BookMetadata,
    /// Pages in reading order
    pages: Vec<Page>,
}

impl Book {
    /// Returns a builder for constructing a Book.
    pub fn builder() -> BookBuilder {
        BookBuilder::default()
    }

    /// Number of pages in this book.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// A choice whose target page does not exist in its book.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct DanglingChoice {
    /// Book holding the choice
    book: usize,
    /// Page holding the choice
    page: usize,
    /// Target that is out of range
    to_page: usize,
}

/// The complete, immutable content dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Library {
    /// Books in library order
    books: Vec<Book>,
    /// Book excluded from the public listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    introduction: Option<usize>,
}

impl Library {
    /// Creates a validated library.
    ///
    /// # Errors
    ///
    /// Returns an error if any book has no pages or if `introduction` is not
    /// a valid book index.
    #[track_caller]
    pub fn new(books: Vec<Book>, introduction: Option<usize>) -> Result<Self, ContentError> {
        let library = Self {
            books,
            introduction,
        };
        library.validate()?;
        Ok(library)
    }

    /// Replaces the introduction index, re-validating it.
    #[track_caller]
    pub fn with_introduction(self, introduction: Option<usize>) -> Result<Self, ContentError> {
        Self::new(self.books, introduction)
    }

    /// Number of books, including the introduction.
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Total number of pages across all books.
    pub fn page_count(&self) -> usize {
        self.books.iter().map(Book::page_count).sum()
    }

    /// Choices whose target page is past the end of their book.
    ///
    /// These are served as authored; callers may report them.
    pub fn dangling_choices(&self) -> Vec<DanglingChoice> {
        let mut dangling = Vec::new();
        for (book_index, book) in self.books.iter().enumerate() {
            for (page_index, page) in book.pages.iter().enumerate() {
                for choice in &page.options {
                    if choice.to_page >= book.page_count() {
                        dangling.push(DanglingChoice {
                            book: book_index,
                            page: page_index,
                            to_page: choice.to_page,
                        });
                    }
                }
            }
        }
        dangling
    }

    #[track_caller]
    pub(crate) fn validate(&self) -> Result<(), ContentError> {
        if let Some(index) = self.books.iter().position(|book| book.pages.is_empty()) {
            return Err(ContentError::new(ContentErrorKind::EmptyBook(index)));
        }

        match self.introduction {
            Some(index) if index >= self.books.len() => {
                return Err(ContentError::new(ContentErrorKind::InvalidIntroduction {
                    index,
                    count: self.books.len(),
                }));
            }
            _ => {}
        }

        for dangling in self.dangling_choices() {
            warn!(
                book = dangling.book,
                page = dangling.page,
                to_page = dangling.to_page,
                "Choice targets a page that does not exist"
            );
        }

        Ok(())
    }
}
