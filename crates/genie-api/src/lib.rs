//! HTTP client for the Databricks Genie REST API.
//!
//! The Genie space endpoints are still in beta and not covered by the
//! official SDKs, so this crate talks to the REST API directly:
//!
//! - `GET /api/2.0/genie/spaces/{space_id}?include_serialized_space=true`
//! - `POST /api/2.0/genie/spaces`
//! - `PATCH /api/2.0/genie/spaces/{space_id}`
//!
//! [`GenieClient`] implements the `genie-core` collaborator traits, so one
//! client per workspace plugs straight into the migration orchestrator.

mod client;
mod error;
mod store;

pub use client::GenieClient;
pub use error::ApiError;
