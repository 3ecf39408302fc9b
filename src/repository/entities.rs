//! Entity catalog store: users, posts and products
//!
//! Lookups return `None` for unknown ids instead of failing. Posts reference
//! their author by id only.

use indexmap::IndexMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{
        contains_ignore_case, eq_ignore_case, CreatePost, CreateProduct, CreateProfile, Post,
        Product, Profile, UpdatePost, UpdateProduct, UpdateProfile,
    },
};

use super::{seed, IdSequence};

#[derive(Debug, Default)]
struct EntitiesData {
    users: IndexMap<String, Profile>,
    posts: IndexMap<String, Post>,
    products: IndexMap<String, Product>,
    user_ids: IdSequence,
    post_ids: IdSequence,
    product_ids: IdSequence,
}

impl EntitiesData {
    fn seeded() -> Self {
        let users: IndexMap<String, Profile> = seed::profiles()
            .into_iter()
            .map(|u| (u.id.to_string(), u))
            .collect();
        let posts: IndexMap<String, Post> = seed::posts()
            .into_iter()
            .map(|p| (p.id.to_string(), p))
            .collect();
        let products: IndexMap<String, Product> = seed::products()
            .into_iter()
            .map(|p| (p.id.to_string(), p))
            .collect();

        Self {
            user_ids: IdSequence::after(users.len() as u64),
            post_ids: IdSequence::after(posts.len() as u64),
            product_ids: IdSequence::after(products.len() as u64),
            users,
            posts,
            products,
        }
    }
}

#[derive(Clone)]
pub struct EntitiesRepository {
    data: Arc<RwLock<EntitiesData>>,
    seed: bool,
}

impl EntitiesRepository {
    pub fn new(seed: bool) -> Self {
        let data = if seed {
            EntitiesData::seeded()
        } else {
            EntitiesData::default()
        };

        Self {
            data: Arc::new(RwLock::new(data)),
            seed,
        }
    }

    pub async fn reset(&self) {
        let mut data = self.data.write().await;
        *data = if self.seed {
            EntitiesData::seeded()
        } else {
            EntitiesData::default()
        };
    }

    // Users

    pub async fn list_users(&self) -> Vec<Profile> {
        self.data.read().await.users.values().cloned().collect()
    }

    pub async fn get_user(&self, id: &str) -> Option<Profile> {
        self.data.read().await.users.get(id).cloned()
    }

    pub async fn create_user(&self, input: CreateProfile) -> Profile {
        let mut data = self.data.write().await;
        let user = Profile::new(data.user_ids.next_id(), input);
        data.users.insert(user.id.to_string(), user.clone());
        user
    }

    pub async fn update_user(&self, id: &str, update: UpdateProfile) -> Option<Profile> {
        let mut data = self.data.write().await;
        let user = data.users.get_mut(id)?;
        user.apply(update);
        Some(user.clone())
    }

    /// Posts of a deleted user are kept; their `author` resolves to null.
    pub async fn delete_user(&self, id: &str) -> bool {
        self.data.write().await.users.shift_remove(id).is_some()
    }

    // Posts

    /// All posts, optionally restricted to the given published state
    pub async fn list_posts(&self, published: Option<bool>) -> Vec<Post> {
        self.data
            .read()
            .await
            .posts
            .values()
            .filter(|p| published.map_or(true, |state| p.published == state))
            .cloned()
            .collect()
    }

    pub async fn get_post(&self, id: &str) -> Option<Post> {
        self.data.read().await.posts.get(id).cloned()
    }

    pub async fn posts_by_author(&self, author_id: &str) -> Vec<Post> {
        self.data
            .read()
            .await
            .posts
            .values()
            .filter(|p| p.author_id.as_str() == author_id)
            .cloned()
            .collect()
    }

    /// Create a post for an existing author
    pub async fn create_post(&self, input: CreatePost) -> AppResult<Post> {
        let mut data = self.data.write().await;
        if !data.users.contains_key(input.author_id.as_str()) {
            return Err(AppError::NotFound(format!(
                "User with ID {} not found",
                input.author_id.as_str()
            )));
        }

        let post = Post::new(data.post_ids.next_id(), input);
        data.posts.insert(post.id.to_string(), post.clone());
        Ok(post)
    }

    pub async fn update_post(&self, id: &str, update: UpdatePost) -> Option<Post> {
        let mut data = self.data.write().await;
        let post = data.posts.get_mut(id)?;
        post.apply(update);
        Some(post.clone())
    }

    pub async fn delete_post(&self, id: &str) -> bool {
        self.data.write().await.posts.shift_remove(id).is_some()
    }

    // Products

    pub async fn list_products(&self) -> Vec<Product> {
        self.data.read().await.products.values().cloned().collect()
    }

    pub async fn get_product(&self, id: &str) -> Option<Product> {
        self.data.read().await.products.get(id).cloned()
    }

    pub async fn products_by_category(&self, category: &str) -> Vec<Product> {
        self.data
            .read()
            .await
            .products
            .values()
            .filter(|p| {
                p.category
                    .as_deref()
                    .is_some_and(|c| eq_ignore_case(c, category))
            })
            .cloned()
            .collect()
    }

    /// Case-insensitive substring match on the product name
    pub async fn search_products(&self, name: &str) -> Vec<Product> {
        self.data
            .read()
            .await
            .products
            .values()
            .filter(|p| contains_ignore_case(&p.name, name))
            .cloned()
            .collect()
    }

    pub async fn create_product(&self, input: CreateProduct) -> Product {
        let mut data = self.data.write().await;
        let product = Product::new(data.product_ids.next_id(), input);
        data.products.insert(product.id.to_string(), product.clone());
        product
    }

    pub async fn update_product(&self, id: &str, update: UpdateProduct) -> Option<Product> {
        let mut data = self.data.write().await;
        let product = data.products.get_mut(id)?;
        product.apply(update);
        Some(product.clone())
    }

    pub async fn delete_product(&self, id: &str) -> bool {
        self.data.write().await.products.shift_remove(id).is_some()
    }
}
