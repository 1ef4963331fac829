//! The `export` subcommand: fetch a space and write it to a file.

use std::path::Path;

use miette::Result;
use tracing::info;

use genie_api::GenieClient;

use crate::files;

pub async fn run(host: &str, token: &str, space_id: &str, output: &Path) -> Result<()> {
    info!(host = %host, space_id = %space_id, "exporting from source workspace");

    let client = GenieClient::new(host, token);
    let space = client
        .get_space(space_id)
        .await
        .map_err(|e| miette::miette!("{}", e))?;

    files::save_space(output, &space)?;
    println!(
        "Exported space '{}' to {}",
        space.display_title(),
        output.display()
    );
    Ok(())
}
