//! Collaborator contracts for the workspaces a migration talks to.
//!
//! The orchestrator only ever makes one fetch call and one publish call per
//! run; retry and timeout policy, if any, belongs behind these traits.

use async_trait::async_trait;
use thiserror::Error;

use crate::Space;

/// Errors surfaced by a workspace collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested space does not exist.
    #[error("space not found: {space_id}")]
    NotFound { space_id: String },

    /// Authentication or authorization failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Transport-level failure (connection, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote service returned something unusable.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Source workspace: fetches a space and its serialized definition.
#[async_trait]
pub trait SpaceReader: Send + Sync {
    async fn fetch_space(&self, space_id: &str) -> Result<Space, StoreError>;
}

/// Target workspace: publishes a space, either as a new object or in place.
#[async_trait]
pub trait SpaceWriter: Send + Sync {
    /// Create a new space; returns the id the target workspace allocated.
    async fn create_space(&self, space: &Space) -> Result<String, StoreError>;

    /// Overwrite an existing space in place.
    async fn update_space(&self, space_id: &str, space: &Space) -> Result<(), StoreError>;
}
