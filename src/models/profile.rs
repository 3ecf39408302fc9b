//! User model of the entity catalog
//!
//! Exposed as `User` in the entities schema; named `Profile` here to keep it
//! apart from the library member type.

use async_graphql::{InputObject, MaybeUndefined, SimpleObject, ID};
use validator::Validate;

use super::merge_nullable;

#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(name = "User", complex)]
pub struct Profile {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
}

impl Profile {
    pub fn new(id: ID, input: CreateProfile) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            age: input.age,
        }
    }

    pub fn apply(&mut self, update: UpdateProfile) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        merge_nullable(&mut self.age, update.age);
    }
}

#[derive(Debug, Clone, Validate, InputObject)]
#[graphql(name = "CreateUserInput")]
pub struct CreateProfile {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "Email must not be empty"))]
    pub email: String,
    pub age: Option<i32>,
}

#[derive(Debug, Clone, Default, Validate, InputObject)]
#[graphql(name = "UpdateUserInput")]
pub struct UpdateProfile {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Email must not be empty"))]
    pub email: Option<String>,
    pub age: MaybeUndefined<i32>,
}
