//! Users, posts and products service

use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        CreatePost, CreateProduct, CreateProfile, DeleteResponse, Post, Product, Profile,
        UpdatePost, UpdateProduct, UpdateProfile,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EntitiesService {
    repository: Repository,
}

impl EntitiesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // Users

    pub async fn list_users(&self) -> Vec<Profile> {
        self.repository.entities.list_users().await
    }

    pub async fn get_user(&self, id: &str) -> Option<Profile> {
        self.repository.entities.get_user(id).await
    }

    pub async fn create_user(&self, input: CreateProfile) -> AppResult<Profile> {
        input.validate()?;
        let user = self.repository.entities.create_user(input).await;
        tracing::info!(user_id = %user.id.as_str(), "user created");
        Ok(user)
    }

    pub async fn update_user(&self, id: &str, input: UpdateProfile) -> AppResult<Option<Profile>> {
        input.validate()?;
        Ok(self.repository.entities.update_user(id, input).await)
    }

    pub async fn delete_user(&self, id: &str) -> DeleteResponse {
        let deleted = self.repository.entities.delete_user(id).await;
        tracing::info!(user_id = %id, deleted, "user delete requested");
        DeleteResponse::for_outcome("User", id, deleted)
    }

    // Posts

    pub async fn list_posts(&self, published: Option<bool>) -> Vec<Post> {
        self.repository.entities.list_posts(published).await
    }

    pub async fn get_post(&self, id: &str) -> Option<Post> {
        self.repository.entities.get_post(id).await
    }

    pub async fn posts_by_author(&self, author_id: &str) -> Vec<Post> {
        self.repository.entities.posts_by_author(author_id).await
    }

    pub async fn create_post(&self, input: CreatePost) -> AppResult<Post> {
        input.validate()?;
        let post = self.repository.entities.create_post(input).await?;
        tracing::info!(post_id = %post.id.as_str(), author_id = %post.author_id.as_str(), "post created");
        Ok(post)
    }

    pub async fn update_post(&self, id: &str, input: UpdatePost) -> AppResult<Option<Post>> {
        input.validate()?;
        Ok(self.repository.entities.update_post(id, input).await)
    }

    pub async fn delete_post(&self, id: &str) -> DeleteResponse {
        let deleted = self.repository.entities.delete_post(id).await;
        tracing::info!(post_id = %id, deleted, "post delete requested");
        DeleteResponse::for_outcome("Post", id, deleted)
    }

    // Products

    pub async fn list_products(&self) -> Vec<Product> {
        self.repository.entities.list_products().await
    }

    pub async fn get_product(&self, id: &str) -> Option<Product> {
        self.repository.entities.get_product(id).await
    }

    pub async fn products_by_category(&self, category: &str) -> Vec<Product> {
        self.repository.entities.products_by_category(category).await
    }

    pub async fn search_products(&self, name: &str) -> Vec<Product> {
        self.repository.entities.search_products(name).await
    }

    pub async fn create_product(&self, input: CreateProduct) -> AppResult<Product> {
        input.validate()?;
        let product = self.repository.entities.create_product(input).await;
        tracing::info!(product_id = %product.id.as_str(), "product created");
        Ok(product)
    }

    pub async fn update_product(&self, id: &str, input: UpdateProduct) -> AppResult<Option<Product>> {
        input.validate()?;
        Ok(self.repository.entities.update_product(id, input).await)
    }

    pub async fn delete_product(&self, id: &str) -> DeleteResponse {
        let deleted = self.repository.entities.delete_product(id).await;
        tracing::info!(product_id = %id, deleted, "product delete requested");
        DeleteResponse::for_outcome("Product", id, deleted)
    }
}
