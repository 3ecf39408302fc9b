//! Library catalog store: books, members and the borrow/return state machine
//!
//! Books and users share one lock so that every mutation, including the
//! check-then-set in [`LibraryRepository::borrow_book`], is serialized.
//!
//! Invariant: a book is unavailable iff exactly one user's `borrowed_books`
//! contains its id.

use async_graphql::ID;
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    config::ReturnPolicy,
    error::{AppError, AppResult},
    models::{Book, CreateBook, CreateUser, UpdateBook, UpdateUser, User},
};

use super::{seed, IdSequence};

#[derive(Debug, Default)]
struct LibraryData {
    books: IndexMap<String, Book>,
    users: IndexMap<String, User>,
    book_ids: IdSequence,
    user_ids: IdSequence,
}

impl LibraryData {
    fn seeded() -> Self {
        let books: IndexMap<String, Book> = seed::books()
            .into_iter()
            .map(|b| (b.id.to_string(), b))
            .collect();
        let users: IndexMap<String, User> = seed::library_users()
            .into_iter()
            .map(|u| (u.id.to_string(), u))
            .collect();

        Self {
            book_ids: IdSequence::after(books.len() as u64),
            user_ids: IdSequence::after(users.len() as u64),
            books,
            users,
        }
    }
}

fn book_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Book with ID {} not found", id))
}

fn user_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("User with ID {} not found", id))
}

fn not_lendable_directly(title: &str) -> AppError {
    AppError::Conflict(format!(
        "Book \"{}\" can only become unavailable by being borrowed",
        title
    ))
}

#[derive(Clone)]
pub struct LibraryRepository {
    data: Arc<RwLock<LibraryData>>,
    seed: bool,
    return_policy: ReturnPolicy,
}

impl LibraryRepository {
    pub fn new(seed: bool, return_policy: ReturnPolicy) -> Self {
        let data = if seed {
            LibraryData::seeded()
        } else {
            LibraryData::default()
        };

        Self {
            data: Arc::new(RwLock::new(data)),
            seed,
            return_policy,
        }
    }

    pub fn return_policy(&self) -> ReturnPolicy {
        self.return_policy
    }

    /// Restore the startup contents, including the id sequences
    pub async fn reset(&self) {
        let mut data = self.data.write().await;
        *data = if self.seed {
            LibraryData::seeded()
        } else {
            LibraryData::default()
        };
    }

    // Books

    /// All books in insertion order
    pub async fn list_books(&self) -> Vec<Book> {
        self.data.read().await.books.values().cloned().collect()
    }

    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.data
            .read()
            .await
            .books
            .get(id)
            .cloned()
            .ok_or_else(|| book_not_found(id))
    }

    /// Case-insensitive substring match on title or author
    pub async fn search_books(&self, query: &str) -> Vec<Book> {
        let needle = query.to_lowercase();
        self.data
            .read()
            .await
            .books
            .values()
            .filter(|b| {
                b.title.to_lowercase().contains(&needle)
                    || b.author.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub async fn available_books(&self) -> Vec<Book> {
        self.data
            .read()
            .await
            .books
            .values()
            .filter(|b| b.available)
            .cloned()
            .collect()
    }

    /// Case-insensitive exact match; uncategorized books never match
    pub async fn books_by_category(&self, category: &str) -> Vec<Book> {
        self.data
            .read()
            .await
            .books
            .values()
            .filter(|b| {
                b.category
                    .as_deref()
                    .is_some_and(|c| crate::models::eq_ignore_case(c, category))
            })
            .cloned()
            .collect()
    }

    /// Resolve held book ids, dropping ids whose book no longer exists
    pub async fn resolve_books(&self, ids: &IndexSet<String>) -> Vec<Book> {
        let data = self.data.read().await;
        ids.iter()
            .filter_map(|id| data.books.get(id).cloned())
            .collect()
    }

    /// Add a book. New books start on the shelf; only a borrow takes one off.
    pub async fn create_book(&self, input: CreateBook) -> AppResult<Book> {
        if !input.available {
            return Err(not_lendable_directly(&input.title));
        }

        let mut data = self.data.write().await;
        let book = Book::new(data.book_ids.next_id(), input);
        data.books.insert(book.id.to_string(), book.clone());
        Ok(book)
    }

    /// Merge fields into a book.
    ///
    /// `available: true` on a held book releases it from its holder.
    /// `available: false` on a shelved book is a conflict.
    pub async fn update_book(&self, id: &str, update: UpdateBook) -> AppResult<Book> {
        let mut guard = self.data.write().await;
        let data = &mut *guard;

        let book = data.books.get_mut(id).ok_or_else(|| book_not_found(id))?;
        let was_available = book.available;
        if was_available && update.available == Some(false) {
            return Err(not_lendable_directly(&book.title));
        }

        book.apply(update);
        if book.available && !was_available {
            for holder in data.users.values_mut() {
                holder.borrowed_books.shift_remove(id);
            }
        }
        Ok(book.clone())
    }

    /// Remove a book and cascade its id out of every user's borrowed list.
    /// Returns whether a book was removed.
    pub async fn delete_book(&self, id: &str) -> bool {
        let mut data = self.data.write().await;
        let removed = data.books.shift_remove(id).is_some();
        for user in data.users.values_mut() {
            user.borrowed_books.shift_remove(id);
        }
        removed
    }

    // Users

    pub async fn list_users(&self) -> Vec<User> {
        self.data.read().await.users.values().cloned().collect()
    }

    pub async fn get_user(&self, id: &str) -> AppResult<User> {
        self.data
            .read()
            .await
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| user_not_found(id))
    }

    pub async fn create_user(&self, input: CreateUser) -> User {
        let mut data = self.data.write().await;
        let user = User::new(data.user_ids.next_id(), input);
        data.users.insert(user.id.to_string(), user.clone());
        user
    }

    pub async fn update_user(&self, id: &str, update: UpdateUser) -> AppResult<User> {
        let mut data = self.data.write().await;
        let user = data.users.get_mut(id).ok_or_else(|| user_not_found(id))?;
        user.apply(update);
        Ok(user.clone())
    }

    /// Remove a user; books they held become available again.
    /// Returns the released book ids, or `None` if no such user existed.
    pub async fn delete_user(&self, id: &str) -> Option<Vec<ID>> {
        let mut data = self.data.write().await;
        let user = data.users.shift_remove(id)?;

        let mut released = Vec::new();
        for book_id in &user.borrowed_books {
            if let Some(book) = data.books.get_mut(book_id) {
                book.available = true;
                released.push(book.id.clone());
            }
        }
        Some(released)
    }

    // Lending

    /// Lend an available book to a user
    pub async fn borrow_book(&self, user_id: &str, book_id: &str) -> AppResult<Book> {
        let mut guard = self.data.write().await;
        let data = &mut *guard;

        let user = data
            .users
            .get_mut(user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        let book = data
            .books
            .get_mut(book_id)
            .ok_or_else(|| book_not_found(book_id))?;

        if !book.available {
            return Err(AppError::Conflict(format!(
                "Book \"{}\" is not available",
                book.title
            )));
        }

        book.available = false;
        user.borrowed_books.insert(book_id.to_string());
        Ok(book.clone())
    }

    /// Release a book back to the shelf.
    ///
    /// Under [`ReturnPolicy::AnyUser`] the book is taken off every holder's
    /// list; under [`ReturnPolicy::BorrowerOnly`] the user must hold it.
    pub async fn return_book(&self, user_id: &str, book_id: &str) -> AppResult<Book> {
        let mut guard = self.data.write().await;
        let data = &mut *guard;

        let user = data
            .users
            .get(user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        let book = data
            .books
            .get_mut(book_id)
            .ok_or_else(|| book_not_found(book_id))?;

        if self.return_policy == ReturnPolicy::BorrowerOnly && !user.holds(book_id) {
            return Err(AppError::Conflict(format!(
                "User with ID {} has not borrowed book \"{}\"",
                user_id, book.title
            )));
        }

        book.available = true;
        for holder in data.users.values_mut() {
            holder.borrowed_books.shift_remove(book_id);
        }
        Ok(book.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> LibraryRepository {
        LibraryRepository::new(true, ReturnPolicy::AnyUser)
    }

    fn new_book(title: &str, category: Option<&str>) -> CreateBook {
        CreateBook {
            title: title.to_string(),
            author: "Test Author".to_string(),
            year: Some(2001),
            available: true,
            category: category.map(str::to_string),
        }
    }

    /// Every unavailable book has exactly one holder, every available book none
    async fn assert_invariant(repo: &LibraryRepository) {
        let books = repo.list_books().await;
        let users = repo.list_users().await;
        for book in &books {
            let holders = users.iter().filter(|u| u.holds(&book.id)).count();
            if book.available {
                assert_eq!(holders, 0, "available book {} has holders", book.id.as_str());
            } else {
                assert_eq!(holders, 1, "unavailable book {} holders", book.id.as_str());
            }
        }
    }

    #[tokio::test]
    async fn test_seed_data() {
        let repo = store();
        assert_eq!(repo.list_books().await.len(), 3);
        assert_eq!(repo.list_users().await.len(), 2);
        assert_invariant(&repo).await;
    }

    #[tokio::test]
    async fn test_add_then_get() {
        let repo = store();
        let created = repo.create_book(new_book("Dune", Some("SciFi"))).await.unwrap();
        assert_eq!(created.id, ID::from("4"));
        assert!(created.available);

        let fetched = repo.get_book("4").await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "Dune");
        assert_eq!(fetched.year, Some(2001));
    }

    #[tokio::test]
    async fn test_get_missing_book() {
        let repo = store();
        let err = repo.get_book("42").await.unwrap_err();
        assert_eq!(err, AppError::NotFound("Book with ID 42 not found".to_string()));
    }

    #[tokio::test]
    async fn test_search_books() {
        let repo = store();
        let found = repo.search_books("gatsby").await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "The Great Gatsby");

        // author match
        let found = repo.search_books("ORWELL").await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "1984");

        assert!(repo.search_books("zzz").await.is_empty());
    }

    #[tokio::test]
    async fn test_books_by_category_ignores_case() {
        let repo = store();
        repo.create_book(new_book("Uncategorized", None)).await.unwrap();

        let lower = repo.books_by_category("classic").await;
        let upper = repo.books_by_category("Classic").await;
        assert_eq!(lower, upper);
        assert_eq!(lower.len(), 1);
        assert!(repo.books_by_category("").await.is_empty());
    }

    #[tokio::test]
    async fn test_available_books() {
        let repo = store();
        let ids: Vec<ID> = repo
            .available_books()
            .await
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec![ID::from("1"), ID::from("3")]);
    }

    #[tokio::test]
    async fn test_update_book_merges_fields() {
        let repo = store();
        let updated = repo
            .update_book(
                "1",
                UpdateBook {
                    year: async_graphql::MaybeUndefined::Value(1926),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.year, Some(1926));
        assert_eq!(updated.title, "The Great Gatsby");
        assert_eq!(updated.category.as_deref(), Some("Classic"));

        let cleared = repo
            .update_book(
                "1",
                UpdateBook {
                    category: async_graphql::MaybeUndefined::Null,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.category, None);

        assert!(repo.update_book("99", UpdateBook::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_borrow_and_conflict() {
        let repo = store();
        let book = repo.borrow_book("2", "1").await.unwrap();
        assert!(!book.available);

        let jane = repo.get_user("2").await.unwrap();
        assert_eq!(jane.borrowed_books.iter().filter(|id| *id == "1").count(), 1);

        let err = repo.borrow_book("1", "1").await.unwrap_err();
        assert_eq!(
            err,
            AppError::Conflict("Book \"The Great Gatsby\" is not available".to_string())
        );

        // state unchanged by the failed borrow
        let john = repo.get_user("1").await.unwrap();
        assert!(!john.holds("1"));
        assert!(!repo.get_book("1").await.unwrap().available);
        assert_invariant(&repo).await;
    }

    #[tokio::test]
    async fn test_borrow_missing_user_or_book() {
        let repo = store();
        assert_eq!(
            repo.borrow_book("9", "1").await.unwrap_err(),
            AppError::NotFound("User with ID 9 not found".to_string())
        );
        assert_eq!(
            repo.borrow_book("1", "9").await.unwrap_err(),
            AppError::NotFound("Book with ID 9 not found".to_string())
        );
        assert!(repo.get_book("1").await.unwrap().available);
    }

    #[tokio::test]
    async fn test_borrow_then_return() {
        let repo = store();
        repo.borrow_book("1", "1").await.unwrap();
        assert!(!repo.get_book("1").await.unwrap().available);

        let book = repo.return_book("1", "1").await.unwrap();
        assert!(book.available);
        let john = repo.get_user("1").await.unwrap();
        assert!(!john.holds("1"));
        assert!(john.holds("2"));
        assert_invariant(&repo).await;
    }

    #[tokio::test]
    async fn test_return_by_other_user_releases_book() {
        let repo = store();
        // Jane returns the book John holds
        let book = repo.return_book("2", "2").await.unwrap();
        assert!(book.available);
        assert!(!repo.get_user("1").await.unwrap().holds("2"));
        assert_invariant(&repo).await;
    }

    #[tokio::test]
    async fn test_strict_return_policy() {
        let repo = LibraryRepository::new(true, ReturnPolicy::BorrowerOnly);
        let err = repo.return_book("2", "2").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(!repo.get_book("2").await.unwrap().available);

        let book = repo.return_book("1", "2").await.unwrap();
        assert!(book.available);
    }

    #[tokio::test]
    async fn test_delete_book_cascades() {
        let repo = store();
        assert!(repo.delete_book("2").await);
        assert!(repo.get_book("2").await.is_err());
        for user in repo.list_users().await {
            assert!(!user.holds("2"));
        }

        assert!(!repo.delete_book("2").await);
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let repo = store();
        assert!(repo.delete_book("2").await);
        let created = repo.create_book(new_book("Fresh", None)).await.unwrap();
        assert_eq!(created.id, ID::from("4"));
        assert_eq!(repo.get_book("3").await.unwrap().title, "1984");
    }

    #[tokio::test]
    async fn test_resolve_drops_dangling_ids() {
        let repo = store();
        let mut ids = IndexSet::new();
        ids.insert("3".to_string());
        ids.insert("404".to_string());
        ids.insert("1".to_string());

        let titles: Vec<String> = repo
            .resolve_books(&ids)
            .await
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["1984".to_string(), "The Great Gatsby".to_string()]);
    }

    #[tokio::test]
    async fn test_update_user_applies_zero_age() {
        let repo = store();
        let user = repo
            .update_user(
                "1",
                UpdateUser {
                    age: async_graphql::MaybeUndefined::Value(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(user.age, Some(0));
        assert_eq!(user.name, "John Doe");
    }

    #[tokio::test]
    async fn test_delete_user_releases_books() {
        let repo = store();
        let released = repo.delete_user("1").await.unwrap();
        assert_eq!(released, vec![ID::from("2")]);
        assert!(repo.get_book("2").await.unwrap().available);
        assert!(repo.delete_user("1").await.is_none());
        assert_invariant(&repo).await;
    }

    #[tokio::test]
    async fn test_reset_restores_seed() {
        let repo = store();
        repo.delete_book("1").await;
        repo.create_user(CreateUser {
            name: "Temp".to_string(),
            email: "temp@example.com".to_string(),
            age: None,
        })
        .await;

        repo.reset().await;
        assert_eq!(repo.list_books().await.len(), 3);
        assert_eq!(repo.list_users().await.len(), 2);
        let created = repo.create_book(new_book("After reset", None)).await.unwrap();
        assert_eq!(created.id, ID::from("4"));
    }

    #[tokio::test]
    async fn test_marking_held_book_available_releases_holder() {
        let repo = store();
        let book = repo
            .update_book(
                "2",
                UpdateBook {
                    available: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(book.available);
        assert!(!repo.get_user("1").await.unwrap().holds("2"));
        assert_invariant(&repo).await;

        // the released book can be lent to exactly one new holder
        repo.borrow_book("2", "2").await.unwrap();
        assert!(repo.borrow_book("1", "2").await.is_err());
        assert_invariant(&repo).await;
    }

    #[tokio::test]
    async fn test_marking_shelved_book_unavailable_conflicts() {
        let repo = store();
        let err = repo
            .update_book(
                "1",
                UpdateBook {
                    title: Some("Renamed".to_string()),
                    available: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // nothing was applied
        let book = repo.get_book("1").await.unwrap();
        assert!(book.available);
        assert_eq!(book.title, "The Great Gatsby");
        assert_invariant(&repo).await;

        // a held book may be restated as unavailable
        let held = repo
            .update_book(
                "2",
                UpdateBook {
                    available: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!held.available);
        assert!(repo.get_user("1").await.unwrap().holds("2"));
        assert_invariant(&repo).await;
    }

    #[tokio::test]
    async fn test_create_unavailable_book_conflicts() {
        let repo = store();
        let mut input = new_book("Ghost", None);
        input.available = false;

        let err = repo.create_book(input).await.unwrap_err();
        assert_eq!(
            err,
            AppError::Conflict(
                "Book \"Ghost\" can only become unavailable by being borrowed".to_string()
            )
        );
        assert_eq!(repo.list_books().await.len(), 3);
        assert_invariant(&repo).await;

        // the id was not consumed
        let created = repo.create_book(new_book("Ghost", None)).await.unwrap();
        assert_eq!(created.id, ID::from("4"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_borrows_have_one_winner() {
        let repo = store();
        let mut user_ids = Vec::new();
        for i in 0..16 {
            let user = repo
                .create_user(CreateUser {
                    name: format!("Reader {}", i),
                    email: format!("reader{}@example.com", i),
                    age: None,
                })
                .await;
            user_ids.push(user.id.to_string());
        }

        let handles: Vec<_> = user_ids
            .into_iter()
            .map(|user_id| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.borrow_book(&user_id, "1").await })
            })
            .collect();

        let mut won = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(book) => {
                    assert!(!book.available);
                    won += 1;
                }
                Err(AppError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {:?}", other),
            }
        }

        assert_eq!(won, 1);
        assert_eq!(conflicts, 15);
        assert_invariant(&repo).await;
    }
}
