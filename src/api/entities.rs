//! GraphQL schema of the users/posts/products catalog

use async_graphql::{
    ComplexObject, Context, EmptySubscription, ErrorExtensions, Object, Result, Schema, ID,
};

use crate::{
    config::GraphqlConfig,
    error::AppError,
    models::{
        CreatePost, CreateProduct, CreateProfile, DeleteResponse, Post, Product, Profile,
        UpdatePost, UpdateProduct, UpdateProfile,
    },
    services::entities::EntitiesService,
};

pub type EntitiesSchema = Schema<EntitiesQuery, EntitiesMutation, EmptySubscription>;

pub fn build_schema(service: EntitiesService, config: &GraphqlConfig) -> EntitiesSchema {
    let mut builder =
        Schema::build(EntitiesQuery, EntitiesMutation, EmptySubscription).data(service);
    if !config.introspection {
        builder = builder.disable_introspection();
    }
    builder.finish()
}

/// The service registered on the schema; its absence is a wiring bug
fn service<'a>(ctx: &Context<'a>) -> Result<&'a EntitiesService> {
    ctx.data::<EntitiesService>()
        .map_err(|e| AppError::Internal(e.message).extend())
}

#[derive(Default)]
pub struct EntitiesQuery;

#[Object(name = "Query")]
impl EntitiesQuery {
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<Profile>> {
        Ok(service(ctx)?.list_users().await)
    }

    /// `null` when no user has this id
    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Profile>> {
        Ok(service(ctx)?.get_user(&id).await)
    }

    /// All posts, or only those matching `published` when given
    async fn posts(&self, ctx: &Context<'_>, published: Option<bool>) -> Result<Vec<Post>> {
        Ok(service(ctx)?.list_posts(published).await)
    }

    async fn post(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Post>> {
        Ok(service(ctx)?.get_post(&id).await)
    }

    async fn posts_by_author(&self, ctx: &Context<'_>, author_id: ID) -> Result<Vec<Post>> {
        Ok(service(ctx)?.posts_by_author(&author_id).await)
    }

    async fn products(&self, ctx: &Context<'_>) -> Result<Vec<Product>> {
        Ok(service(ctx)?.list_products().await)
    }

    async fn product(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Product>> {
        Ok(service(ctx)?.get_product(&id).await)
    }

    async fn products_by_category(
        &self,
        ctx: &Context<'_>,
        category: String,
    ) -> Result<Vec<Product>> {
        Ok(service(ctx)?.products_by_category(&category).await)
    }

    async fn search_products(&self, ctx: &Context<'_>, name: String) -> Result<Vec<Product>> {
        Ok(service(ctx)?.search_products(&name).await)
    }
}

#[derive(Default)]
pub struct EntitiesMutation;

#[Object(name = "Mutation")]
impl EntitiesMutation {
    async fn create_user(&self, ctx: &Context<'_>, input: CreateProfile) -> Result<Profile> {
        service(ctx)?.create_user(input).await.map_err(|e| e.extend())
    }

    /// Returns `null` when no user has this id
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateProfile,
    ) -> Result<Option<Profile>> {
        service(ctx)?
            .update_user(&id, input)
            .await
            .map_err(|e| e.extend())
    }

    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> Result<DeleteResponse> {
        Ok(service(ctx)?.delete_user(&id).await)
    }

    async fn create_post(&self, ctx: &Context<'_>, input: CreatePost) -> Result<Post> {
        service(ctx)?.create_post(input).await.map_err(|e| e.extend())
    }

    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdatePost,
    ) -> Result<Option<Post>> {
        service(ctx)?
            .update_post(&id, input)
            .await
            .map_err(|e| e.extend())
    }

    async fn delete_post(&self, ctx: &Context<'_>, id: ID) -> Result<DeleteResponse> {
        Ok(service(ctx)?.delete_post(&id).await)
    }

    async fn create_product(&self, ctx: &Context<'_>, input: CreateProduct) -> Result<Product> {
        service(ctx)?
            .create_product(input)
            .await
            .map_err(|e| e.extend())
    }

    async fn update_product(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateProduct,
    ) -> Result<Option<Product>> {
        service(ctx)?
            .update_product(&id, input)
            .await
            .map_err(|e| e.extend())
    }

    async fn delete_product(&self, ctx: &Context<'_>, id: ID) -> Result<DeleteResponse> {
        Ok(service(ctx)?.delete_product(&id).await)
    }
}

#[ComplexObject]
impl Profile {
    /// Posts written by this user
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        Ok(service(ctx)?.posts_by_author(&self.id).await)
    }
}

#[ComplexObject]
impl Post {
    /// The author, or `null` if the user was deleted
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<Profile>> {
        Ok(service(ctx)?.get_user(&self.author_id).await)
    }
}
