//! The `migrate` subcommand: full fetch → transform → publish in one run.

use std::path::Path;

use miette::Result;
use tracing::info;

use genie_api::GenieClient;
use genie_core::{Migrator, PublishMode};

use crate::{files, render};

pub async fn run(
    source_host: &str,
    source_token: &str,
    space_id: &str,
    target_host: &str,
    target_token: &str,
    transformations: Option<&Path>,
    update: bool,
    update_space_id: Option<String>,
    warehouse_id: Option<String>,
) -> Result<()> {
    // Rule parsing and mode validation come first: a local configuration
    // problem must fail before any workspace is contacted.
    let rules = files::load_rules(transformations)?;
    let mode = if update {
        PublishMode::update(update_space_id)
    } else {
        PublishMode::create(warehouse_id)
    }
    .map_err(|e| miette::miette!("{}", e))?;

    info!(source = %source_host, target = %target_host, "starting migration");
    let source = GenieClient::new(source_host, source_token);
    let target = GenieClient::new(target_host, target_token);

    let outcome = Migrator::new(source, target)
        .run(space_id, &rules, &mode)
        .await;

    render::print_outcome(&outcome);

    match outcome.error {
        None => Ok(()),
        Some(err) => Err(miette::miette!("{}", err)),
    }
}
