//! Demo data loaded at startup

use async_graphql::ID;
use indexmap::IndexSet;

use crate::models::{Book, Post, Product, Profile, User};

fn book(id: &str, title: &str, author: &str, year: i32, available: bool, category: &str) -> Book {
    Book {
        id: ID::from(id),
        title: title.to_string(),
        author: author.to_string(),
        year: Some(year),
        available,
        category: Some(category.to_string()),
    }
}

pub fn books() -> Vec<Book> {
    vec![
        book("1", "The Great Gatsby", "F. Scott Fitzgerald", 1925, true, "Classic"),
        book("2", "To Kill a Mockingbird", "Harper Lee", 1960, false, "Fiction"),
        book("3", "1984", "George Orwell", 1949, true, "Dystopian"),
    ]
}

/// Library members; John Doe holds book 2
pub fn library_users() -> Vec<User> {
    vec![
        User {
            id: ID::from("1"),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            age: Some(30),
            borrowed_books: IndexSet::from(["2".to_string()]),
        },
        User {
            id: ID::from("2"),
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            age: Some(25),
            borrowed_books: IndexSet::new(),
        },
    ]
}

pub fn profiles() -> Vec<Profile> {
    vec![
        Profile {
            id: ID::from("1"),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            age: Some(30),
        },
        Profile {
            id: ID::from("2"),
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            age: Some(25),
        },
    ]
}

fn post(id: &str, title: &str, content: &str, author_id: &str, published: bool) -> Post {
    Post {
        id: ID::from(id),
        title: title.to_string(),
        content: content.to_string(),
        author_id: ID::from(author_id),
        published,
    }
}

pub fn posts() -> Vec<Post> {
    vec![
        post("1", "First Post", "This is the first post", "1", true),
        post("2", "Second Post", "A draft that is not published yet", "1", false),
        post("3", "Hello from Jane", "Jane's first published post", "2", true),
    ]
}

fn product(id: &str, name: &str, price: f64, stock: i32) -> Product {
    Product {
        id: ID::from(id),
        name: name.to_string(),
        price,
        stock,
        category: Some("Electronics".to_string()),
    }
}

pub fn products() -> Vec<Product> {
    vec![
        product("1", "Laptop", 999.99, 10),
        product("2", "Wireless Mouse", 29.99, 50),
        product("3", "Mechanical Keyboard", 79.99, 30),
    ]
}
