//! Clear command - delete every cache generation

use crate::cli::commands::build_controller;
use crate::config::Config;
use crate::error::GencacheResult;
use console::{style, Emoji};
use serde_json::json;

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "[OK] ");

/// Execute the clear command
///
/// Goes through the message channel so it exercises exactly the path the
/// hosting page uses.
pub async fn execute(config: &Config) -> GencacheResult<()> {
    let mut controller = build_controller(config);
    controller
        .handle_message(&json!({"type": "CLEAR_CACHE"}))
        .await?;

    println!("{} All cache generations {}", CHECK, style("cleared").bold());
    Ok(())
}
