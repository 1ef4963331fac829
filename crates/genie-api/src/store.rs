//! Collaborator trait implementations for [`GenieClient`].

use async_trait::async_trait;

use genie_core::{Space, SpaceReader, SpaceWriter, StoreError};

use crate::{ApiError, GenieClient};

impl From<ApiError> for StoreError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound { space_id } => StoreError::NotFound { space_id },
            ApiError::Auth(message) => StoreError::Auth(message),
            ApiError::Http(e) => StoreError::Transport(e.to_string()),
            other => StoreError::InvalidResponse(other.to_string()),
        }
    }
}

#[async_trait]
impl SpaceReader for GenieClient {
    async fn fetch_space(&self, space_id: &str) -> Result<Space, StoreError> {
        Ok(self.get_space(space_id).await?)
    }
}

#[async_trait]
impl SpaceWriter for GenieClient {
    async fn create_space(&self, space: &Space) -> Result<String, StoreError> {
        Ok(GenieClient::create_space(self, space).await?)
    }

    async fn update_space(&self, space_id: &str, space: &Space) -> Result<(), StoreError> {
        Ok(GenieClient::update_space(self, space_id, space).await?)
    }
}
