//! The `import` subcommand: publish a space file to the target workspace.

use std::path::Path;

use miette::Result;
use tracing::info;

use genie_api::GenieClient;
use genie_core::{PublishMode, publish_space};

use crate::{files, render};

pub async fn run(
    host: &str,
    token: &str,
    input: &Path,
    transformations: Option<&Path>,
    update: bool,
    space_id: Option<String>,
    warehouse_id: Option<String>,
) -> Result<()> {
    // Everything local happens before the first network call, so a bad
    // file fails without touching the workspace.
    let space = files::load_space(input)?;
    let rules = files::load_rules(transformations)?;
    let mode = if update {
        PublishMode::update(space_id)
    } else {
        PublishMode::create(warehouse_id)
    }
    .map_err(|e| miette::miette!("{}", e))?;

    let serialized = space.serialized_space.clone().unwrap_or_default();
    let (transformed, report) =
        genie_core::apply(&serialized, &rules).map_err(|e| miette::miette!("{}", e))?;
    render::print_report(&report);

    let mut publish = space;
    publish.serialized_space = Some(transformed);

    info!(host = %host, "importing into target workspace");
    let client = GenieClient::new(host, token);
    let destination = publish_space(&client, &mode, publish)
        .await
        .map_err(|e| miette::miette!("{}", e))?;

    println!("Import complete: destination space {}", destination);
    Ok(())
}
