//! Genie REST API client implementation.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use genie_core::Space;

use crate::ApiError;

/// Client for the Genie space endpoints of one Databricks workspace.
///
/// Holds a bearer token for that workspace; a migration between two
/// workspaces uses two clients. No retries are performed here: every
/// request maps to exactly one HTTP call.
pub struct GenieClient {
    http: Client,
    host: String,
    token: String,
}

impl GenieClient {
    /// Create a new client for the given workspace URL and access token.
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            host: host.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Get the workspace URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Fetch a space including its serialized definition.
    pub async fn get_space(&self, space_id: &str) -> Result<Space, ApiError> {
        let url = format!("{}/api/2.0/genie/spaces/{}", self.host, space_id);

        debug!(space_id = %space_id, "fetching space");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("include_serialized_space", "true")])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                space_id: space_id.to_string(),
            });
        }

        let space: Space = self.handle_response(response).await?;
        if space.has_empty_definition() {
            warn!(space_id = %space_id, "serialized space is empty or was not included");
        }
        debug!(title = %space.display_title(), "fetched space");
        Ok(space)
    }

    /// Create a new space. Returns the id the workspace allocated.
    ///
    /// The space must carry a warehouse id and a serialized definition;
    /// title and description are sent when present.
    pub async fn create_space(&self, space: &Space) -> Result<String, ApiError> {
        #[derive(Serialize)]
        struct CreateRequest<'a> {
            warehouse_id: &'a str,
            serialized_space: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            title: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<&'a str>,
        }

        #[derive(Deserialize)]
        struct CreateResponse {
            space_id: String,
        }

        let warehouse_id = space
            .warehouse_id
            .as_deref()
            .ok_or(ApiError::MissingField("warehouse_id"))?;
        let serialized_space = space
            .serialized_space
            .as_deref()
            .ok_or(ApiError::MissingField("serialized_space"))?;

        let url = format!("{}/api/2.0/genie/spaces", self.host);

        debug!(warehouse_id = %warehouse_id, "creating space");
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&CreateRequest {
                warehouse_id,
                serialized_space,
                title: space.title_or_display_name(),
                description: space.description.as_deref(),
            })
            .send()
            .await?;

        let created: CreateResponse = self.handle_response(response).await?;
        debug!(space_id = %created.space_id, "created space");
        Ok(created.space_id)
    }

    /// Update an existing space in place.
    ///
    /// Only the serialized definition is patched; the target space keeps
    /// its own title and description.
    pub async fn update_space(&self, space_id: &str, space: &Space) -> Result<(), ApiError> {
        #[derive(Serialize)]
        struct UpdateRequest<'a> {
            serialized_space: &'a str,
        }

        let serialized_space = space
            .serialized_space
            .as_deref()
            .ok_or(ApiError::MissingField("serialized_space"))?;

        let url = format!("{}/api/2.0/genie/spaces/{}", self.host, space_id);

        debug!(space_id = %space_id, "updating space");
        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.token)
            .json(&UpdateRequest { serialized_space })
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                space_id: space_id.to_string(),
            });
        }

        self.check_status(response).await?;
        debug!(space_id = %space_id, "updated space");
        Ok(())
    }

    /// Handle an HTTP response and parse the JSON body.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = self.check_status(response).await?;
        let body = response.json().await?;
        Ok(body)
    }

    /// Map non-success statuses to errors, passing success through.
    async fn check_status(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.map_err(|e| {
            ApiError::InvalidResponse(format!(
                "request failed ({}): failed to read response: {}",
                status, e
            ))
        })?;

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ApiError::Auth(format!(
                "request rejected ({}): {}",
                status, text
            )));
        }

        // Databricks error bodies carry error_code and message.
        if let Ok(api_error) = serde_json::from_str::<DatabricksError>(&text) {
            return Err(ApiError::Api {
                error_code: api_error.error_code,
                message: api_error.message,
            });
        }

        Err(ApiError::InvalidResponse(format!(
            "request failed ({}): {}",
            status, text
        )))
    }
}

/// Databricks API error response format.
#[derive(Debug, Deserialize)]
struct DatabricksError {
    error_code: String,
    message: String,
}
