//! Post model of the entity catalog

use async_graphql::{InputObject, SimpleObject, ID};
use validator::Validate;

/// A post references its author by id; the author may be deleted independently.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(complex)]
pub struct Post {
    pub id: ID,
    pub title: String,
    pub content: String,
    pub author_id: ID,
    pub published: bool,
}

impl Post {
    pub fn new(id: ID, input: CreatePost) -> Self {
        Self {
            id,
            title: input.title,
            content: input.content,
            author_id: input.author_id,
            published: input.published.unwrap_or(false),
        }
    }

    pub fn apply(&mut self, update: UpdatePost) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(published) = update.published {
            self.published = published;
        }
    }
}

#[derive(Debug, Clone, Validate, InputObject)]
#[graphql(name = "CreatePostInput")]
pub struct CreatePost {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    pub content: String,
    pub author_id: ID,
    pub published: Option<bool>,
}

#[derive(Debug, Clone, Default, Validate, InputObject)]
#[graphql(name = "UpdatePostInput")]
pub struct UpdatePost {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
}
