//! Structured delete result used by the entity catalog

use async_graphql::SimpleObject;

#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    /// Shape a store's delete outcome for entity `kind` with identifier `id`
    pub fn for_outcome(kind: &str, id: &str, deleted: bool) -> Self {
        let message = if deleted {
            format!("{} with ID {} deleted successfully", kind, id)
        } else {
            format!("{} with ID {} not found", kind, id)
        };

        Self {
            success: deleted,
            message,
        }
    }
}
