//! `about` command: the image's build metadata.

use anyhow::Context as _;

use super::{CommandOutcome, Context};
use crate::environment::properties_to_string;

/// Render the environment snapshot as text, or as JSON when `json` is set.
pub fn execute(ctx: &Context<'_>, json: bool) -> CommandOutcome {
    let text = if json {
        serde_json::to_string_pretty(ctx.environments)
            .context("Failed to serialize environment metadata")?
    } else {
        properties_to_string(&ctx.environments.properties(), Some("About"))?
    };
    Ok(Some(text))
}
