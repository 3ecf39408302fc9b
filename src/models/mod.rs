//! Data models for the library and entity catalogs

pub mod book;
pub mod delete_response;
pub mod post;
pub mod product;
pub mod profile;
pub mod user;

use async_graphql::MaybeUndefined;

// Re-export commonly used types
pub use book::{Book, CreateBook, UpdateBook};
pub use delete_response::DeleteResponse;
pub use post::{CreatePost, Post, UpdatePost};
pub use product::{CreateProduct, Product, UpdateProduct};
pub use profile::{CreateProfile, Profile, UpdateProfile};
pub use user::{CreateUser, UpdateUser, User};

/// Apply a nullable patch field: undefined keeps, `null` clears, a value replaces.
pub(crate) fn merge_nullable<T>(target: &mut Option<T>, value: MaybeUndefined<T>) {
    match value {
        MaybeUndefined::Undefined => {}
        MaybeUndefined::Null => *target = None,
        MaybeUndefined::Value(v) => *target = Some(v),
    }
}

/// Case-insensitive equality used by the category filters
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive substring match used by the search queries
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_nullable() {
        let mut year = Some(1925);
        merge_nullable(&mut year, MaybeUndefined::Undefined);
        assert_eq!(year, Some(1925));
        merge_nullable(&mut year, MaybeUndefined::Value(0));
        assert_eq!(year, Some(0));
        merge_nullable(&mut year, MaybeUndefined::Null);
        assert_eq!(year, None);
    }

    #[test]
    fn test_ignore_case_helpers() {
        assert!(eq_ignore_case("Classic", "cLASSIC"));
        assert!(!eq_ignore_case("Classic", "Classics"));
        assert!(contains_ignore_case("The Great Gatsby", "gatsby"));
        assert!(!contains_ignore_case("The Great Gatsby", "zzz"));
    }
}
