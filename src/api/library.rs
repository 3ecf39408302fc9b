//! GraphQL schema of the library lending catalog

use async_graphql::{
    ComplexObject, Context, EmptySubscription, ErrorExtensions, MaybeUndefined, Object, Result,
    Schema, ID,
};

use crate::{
    config::GraphqlConfig,
    error::AppError,
    models::{Book, CreateBook, CreateUser, UpdateBook, UpdateUser, User},
    services::library::LibraryService,
};

pub type LibrarySchema = Schema<LibraryQuery, LibraryMutation, EmptySubscription>;

/// Build the library schema around the given service
pub fn build_schema(service: LibraryService, config: &GraphqlConfig) -> LibrarySchema {
    let mut builder =
        Schema::build(LibraryQuery, LibraryMutation, EmptySubscription).data(service);
    if !config.introspection {
        builder = builder.disable_introspection();
    }
    builder.finish()
}

/// The service registered on the schema; its absence is a wiring bug
fn service<'a>(ctx: &Context<'a>) -> Result<&'a LibraryService> {
    ctx.data::<LibraryService>()
        .map_err(|e| AppError::Internal(e.message).extend())
}

/// Queries for fetching data
#[derive(Default)]
pub struct LibraryQuery;

#[Object(name = "Query")]
impl LibraryQuery {
    /// Get all books in the library
    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        Ok(service(ctx)?.list_books().await)
    }

    /// Get a specific book by ID
    async fn book(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Book>> {
        service(ctx)?
            .get_book(&id)
            .await
            .map(Some)
            .map_err(|e| e.extend())
    }

    /// Get all users
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        Ok(service(ctx)?.list_users().await)
    }

    /// Get a specific user by ID
    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<User>> {
        service(ctx)?
            .get_user(&id)
            .await
            .map(Some)
            .map_err(|e| e.extend())
    }

    /// Search books by title or author
    async fn search_books(&self, ctx: &Context<'_>, query: String) -> Result<Vec<Book>> {
        Ok(service(ctx)?.search_books(&query).await)
    }

    /// Get only available books
    async fn available_books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        Ok(service(ctx)?.available_books().await)
    }

    /// Get books by category
    async fn books_by_category(&self, ctx: &Context<'_>, category: String) -> Result<Vec<Book>> {
        Ok(service(ctx)?.books_by_category(&category).await)
    }
}

/// Mutations for modifying data
#[derive(Default)]
pub struct LibraryMutation;

#[Object(name = "Mutation")]
impl LibraryMutation {
    /// Add a new book to the library
    async fn add_book(&self, ctx: &Context<'_>, input: CreateBook) -> Result<Book> {
        service(ctx)?.add_book(input).await.map_err(|e| e.extend())
    }

    /// Update an existing book
    async fn update_book(&self, ctx: &Context<'_>, id: ID, input: UpdateBook) -> Result<Book> {
        service(ctx)?
            .update_book(&id, input)
            .await
            .map_err(|e| e.extend())
    }

    /// Delete a book from the library
    async fn delete_book(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        Ok(service(ctx)?.delete_book(&id).await)
    }

    /// Add a new user
    async fn add_user(&self, ctx: &Context<'_>, input: CreateUser) -> Result<User> {
        service(ctx)?.add_user(input).await.map_err(|e| e.extend())
    }

    /// Borrow a book
    async fn borrow_book(&self, ctx: &Context<'_>, user_id: ID, book_id: ID) -> Result<Book> {
        service(ctx)?
            .borrow_book(&user_id, &book_id)
            .await
            .map_err(|e| e.extend())
    }

    /// Return a borrowed book
    async fn return_book(&self, ctx: &Context<'_>, user_id: ID, book_id: ID) -> Result<Book> {
        service(ctx)?
            .return_book(&user_id, &book_id)
            .await
            .map_err(|e| e.extend())
    }

    /// Update user information
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        email: Option<String>,
        age: MaybeUndefined<i32>,
    ) -> Result<User> {
        let update = UpdateUser { name, email, age };
        service(ctx)?
            .update_user(&id, update)
            .await
            .map_err(|e| e.extend())
    }

    /// Delete a user
    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        Ok(service(ctx)?.delete_user(&id).await)
    }
}

#[ComplexObject]
impl User {
    /// Books currently borrowed by the user
    async fn borrowed_books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        Ok(service(ctx)?.borrowed_books(&self.borrowed_books).await)
    }
}
