use std::sync::Arc;

use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("invalid {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("failed to create {entity}: {source}")]
    Creation {
        entity: &'static str,
        source: sqlx::Error,
    },

    #[error("failed to update {entity}: {source}")]
    Update {
        entity: &'static str,
        source: sqlx::Error,
    },

    #[error("failed to delete {entity}: {source}")]
    Deletion {
        entity: &'static str,
        source: sqlx::Error,
    },

    #[error("failed to {action}: {source}")]
    Association {
        action: &'static str,
        source: sqlx::Error,
    },

    // Shared with the batch loaders, whose errors must be cloneable.
    #[error("failed to get {what}: {source}")]
    Fetch {
        what: &'static str,
        source: Arc<sqlx::Error>,
    },

    #[error("database unavailable: {0}")]
    Database(#[source] sqlx::Error),
}

impl ResolverError {
    pub fn code(&self) -> &'static str {
        match self {
            ResolverError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            ResolverError::NotFound { .. } => "NOT_FOUND",
            ResolverError::Creation { .. } => "CREATION_ERROR",
            ResolverError::Update { .. } => "UPDATE_ERROR",
            ResolverError::Deletion { .. } => "DELETION_ERROR",
            ResolverError::Association { .. } => "ASSOCIATION_ERROR",
            ResolverError::Fetch { .. } => "FETCH_ERROR",
            ResolverError::Database(_) => "DATABASE_ERROR",
        }
    }

    pub fn fetch(what: &'static str, source: sqlx::Error) -> Self {
        ResolverError::Fetch {
            what,
            source: Arc::new(source),
        }
    }
}

impl ErrorExtensions for ResolverError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, extensions| extensions.set("code", self.code()))
    }
}
