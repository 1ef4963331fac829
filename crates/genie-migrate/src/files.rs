//! JSON file I/O for space exports and rule files.

use std::path::Path;

use miette::Result;
use tracing::info;

use genie_core::{RuleSet, Space};

/// Write a space to a pretty-printed JSON file.
pub fn save_space(path: &Path, space: &Space) -> Result<()> {
    let json = serde_json::to_string_pretty(space).map_err(|e| miette::miette!("{}", e))?;
    std::fs::write(path, json)
        .map_err(|e| miette::miette!("failed to write {}: {}", path.display(), e))?;
    info!(path = %path.display(), "wrote space file");
    Ok(())
}

/// Read a space from a JSON file.
pub fn load_space(path: &Path) -> Result<Space> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| miette::miette!("failed to read {}: {}", path.display(), e))?;
    let space: Space = serde_json::from_str(&text)
        .map_err(|e| miette::miette!("invalid space file {}: {}", path.display(), e))?;
    info!(path = %path.display(), title = %space.display_title(), "loaded space file");
    Ok(space)
}

/// Read a rule set from a transformations file; no path means no rules.
pub fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    let Some(path) = path else {
        return Ok(RuleSet::default());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|e| miette::miette!("failed to read {}: {}", path.display(), e))?;
    let rules = RuleSet::from_json_str(&text)
        .map_err(|e| miette::miette!("invalid transformations file {}: {}", path.display(), e))?;
    info!(path = %path.display(), rules = rules.len(), "loaded transformation rules");
    Ok(rules)
}
