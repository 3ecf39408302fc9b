//! Book model and related types

use async_graphql::{InputObject, MaybeUndefined, SimpleObject, ID};
use validator::Validate;

use super::merge_nullable;

/// A Book represents a book in the library with all its details
#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct Book {
    /// Unique identifier for the book
    pub id: ID,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Publication year
    pub year: Option<i32>,
    /// Whether the book is available for borrowing
    pub available: bool,
    /// Category of the book
    pub category: Option<String>,
}

impl Book {
    pub fn new(id: ID, input: CreateBook) -> Self {
        Self {
            id,
            title: input.title,
            author: input.author,
            year: input.year,
            available: input.available,
            category: input.category,
        }
    }

    /// Merge the provided fields over this record
    pub fn apply(&mut self, update: UpdateBook) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(author) = update.author {
            self.author = author;
        }
        merge_nullable(&mut self.year, update.year);
        if let Some(available) = update.available {
            self.available = available;
        }
        merge_nullable(&mut self.category, update.category);
    }
}

/// Input for creating a new book
#[derive(Debug, Clone, Validate, InputObject)]
#[graphql(name = "BookInput")]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
    pub year: Option<i32>,
    #[graphql(default = true)]
    pub available: bool,
    pub category: Option<String>,
}

/// Input for updating a book
///
/// Absent fields keep their value; `year` and `category` may be cleared with `null`.
#[derive(Debug, Clone, Default, Validate, InputObject)]
#[graphql(name = "BookUpdateInput")]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: Option<String>,
    pub year: MaybeUndefined<i32>,
    pub available: Option<bool>,
    pub category: MaybeUndefined<String>,
}
