//! Library user model and related types

use async_graphql::{InputObject, MaybeUndefined, SimpleObject, ID};
use indexmap::IndexSet;
use validator::Validate;

use super::merge_nullable;

/// A User represents a library member
///
/// `borrowed_books` holds book ids only; the GraphQL layer resolves them
/// against the current book collection.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(complex)]
pub struct User {
    /// Unique identifier for the user
    pub id: ID,
    /// Full name of the user
    pub name: String,
    /// Email address
    pub email: String,
    /// Age in years
    pub age: Option<i32>,
    #[graphql(skip)]
    pub borrowed_books: IndexSet<String>,
}

impl User {
    pub fn new(id: ID, input: CreateUser) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            age: input.age,
            borrowed_books: IndexSet::new(),
        }
    }

    /// Merge the provided fields over this record
    pub fn apply(&mut self, update: UpdateUser) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        merge_nullable(&mut self.age, update.age);
    }

    pub fn holds(&self, book_id: &str) -> bool {
        self.borrowed_books.contains(book_id)
    }
}

/// Input for creating a new user
#[derive(Debug, Clone, Validate, InputObject)]
#[graphql(name = "UserInput")]
pub struct CreateUser {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Email must not be empty"))]
    pub email: String,
    pub age: Option<i32>,
}

/// Fields accepted by `updateUser`; built from the mutation arguments
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Email must not be empty"))]
    pub email: Option<String>,
    pub age: MaybeUndefined<i32>,
}
