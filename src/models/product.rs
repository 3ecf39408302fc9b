//! Product model of the entity catalog

use async_graphql::{InputObject, MaybeUndefined, SimpleObject, ID};
use validator::Validate;

use super::merge_nullable;

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct Product {
    pub id: ID,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub category: Option<String>,
}

impl Product {
    pub fn new(id: ID, input: CreateProduct) -> Self {
        Self {
            id,
            name: input.name,
            price: input.price,
            stock: input.stock,
            category: input.category,
        }
    }

    pub fn apply(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        merge_nullable(&mut self.category, update.category);
    }
}

#[derive(Debug, Clone, Validate, InputObject)]
#[graphql(name = "CreateProductInput")]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: i32,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Validate, InputObject)]
#[graphql(name = "UpdateProductInput")]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,
    #[validate(range(min = 0, message = "Stock must not be negative"))]
    pub stock: Option<i32>,
    pub category: MaybeUndefined<String>,
}
