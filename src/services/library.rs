//! Library lending service

use indexmap::IndexSet;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{Book, CreateBook, CreateUser, UpdateBook, UpdateUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct LibraryService {
    repository: Repository,
}

impl LibraryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_books(&self) -> Vec<Book> {
        self.repository.library.list_books().await
    }

    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.repository.library.get_book(id).await
    }

    pub async fn search_books(&self, query: &str) -> Vec<Book> {
        self.repository.library.search_books(query).await
    }

    pub async fn available_books(&self) -> Vec<Book> {
        self.repository.library.available_books().await
    }

    pub async fn books_by_category(&self, category: &str) -> Vec<Book> {
        self.repository.library.books_by_category(category).await
    }

    /// Books held by a user, skipping ids that no longer resolve
    pub async fn borrowed_books(&self, ids: &IndexSet<String>) -> Vec<Book> {
        self.repository.library.resolve_books(ids).await
    }

    /// Add a book to the catalog. Duplicate titles are allowed.
    pub async fn add_book(&self, input: CreateBook) -> AppResult<Book> {
        input.validate()?;
        let book = self.repository.library.create_book(input).await?;
        tracing::info!(book_id = %book.id.as_str(), title = %book.title, "book added");
        Ok(book)
    }

    pub async fn update_book(&self, id: &str, input: UpdateBook) -> AppResult<Book> {
        input.validate()?;
        let book = self.repository.library.update_book(id, input).await?;
        tracing::info!(book_id = %id, "book updated");
        Ok(book)
    }

    pub async fn delete_book(&self, id: &str) -> bool {
        let deleted = self.repository.library.delete_book(id).await;
        tracing::info!(book_id = %id, deleted, "book delete requested");
        deleted
    }

    pub async fn list_users(&self) -> Vec<User> {
        self.repository.library.list_users().await
    }

    pub async fn get_user(&self, id: &str) -> AppResult<User> {
        self.repository.library.get_user(id).await
    }

    pub async fn add_user(&self, input: CreateUser) -> AppResult<User> {
        input.validate()?;
        let user = self.repository.library.create_user(input).await;
        tracing::info!(user_id = %user.id.as_str(), "user added");
        Ok(user)
    }

    pub async fn update_user(&self, id: &str, input: UpdateUser) -> AppResult<User> {
        input.validate()?;
        let user = self.repository.library.update_user(id, input).await?;
        tracing::info!(user_id = %id, "user updated");
        Ok(user)
    }

    pub async fn delete_user(&self, id: &str) -> bool {
        match self.repository.library.delete_user(id).await {
            Some(released) => {
                let released: Vec<&str> = released.iter().map(|id| id.as_str()).collect();
                tracing::info!(user_id = %id, ?released, "user deleted");
                true
            }
            None => {
                tracing::debug!(user_id = %id, "delete of unknown user");
                false
            }
        }
    }

    pub async fn borrow_book(&self, user_id: &str, book_id: &str) -> AppResult<Book> {
        let result = self.repository.library.borrow_book(user_id, book_id).await;
        match &result {
            Ok(_) => tracing::info!(user_id = %user_id, book_id = %book_id, "book borrowed"),
            Err(e) => tracing::debug!(user_id = %user_id, book_id = %book_id, error = %e, "borrow rejected"),
        }
        result
    }

    pub async fn return_book(&self, user_id: &str, book_id: &str) -> AppResult<Book> {
        let result = self.repository.library.return_book(user_id, book_id).await;
        match &result {
            Ok(_) => tracing::info!(
                user_id = %user_id,
                book_id = %book_id,
                policy = ?self.repository.library.return_policy(),
                "book returned"
            ),
            Err(e) => tracing::debug!(user_id = %user_id, book_id = %book_id, error = %e, "return rejected"),
        }
        result
    }
}
