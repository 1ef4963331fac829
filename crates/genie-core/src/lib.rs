//! Core migration pipeline for Genie spaces.
//!
//! This crate implements the transform-and-migrate pipeline:
//! - **Rules**: ordered search/replace rule sets loaded from JSON
//! - **Transform**: literal string substitution over a serialized space,
//!   with per-rule occurrence counting
//! - **Migrate**: the fetch → transform → publish orchestration, generic
//!   over the workspace collaborators that do the actual network I/O

mod error;
mod migrate;
mod rules;
mod space;
mod store;
mod transform;

pub use error::MigrateError;
pub use migrate::{MigrationOutcome, Migrator, PhaseStatus, PublishMode, publish_space};
pub use rules::{Rule, RuleSet};
pub use space::Space;
pub use store::{SpaceReader, SpaceWriter, StoreError};
pub use transform::{RuleOutcome, SubstitutionReport, apply};
