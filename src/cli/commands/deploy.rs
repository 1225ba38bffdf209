//! Deploy command - install and activate a cache generation

use crate::cli::commands::build_controller;
use crate::config::Config;
use crate::error::GencacheResult;
use console::{style, Emoji};

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "[OK] ");
static WARN: Emoji<'_, '_> = Emoji("⚠ ", "[WARN] ");

/// Execute the deploy command
pub async fn execute(config: &Config) -> GencacheResult<()> {
    let mut controller = build_controller(config);
    let generation = controller.generation().to_string();

    println!(
        "{} {}",
        style("Installing generation").bold().cyan(),
        style(&generation).bold()
    );

    let report = controller.prepare().await?;
    println!("  {} {} assets cached", CHECK, report.cached);
    for url in &report.failed {
        println!("  {} could not cache {}", WARN, url);
    }

    let activation = controller.commit(report).await?;
    for name in &activation.removed {
        println!("  {} removed old generation {}", CHECK, name);
    }

    println!(
        "{} Generation {} is active ({} clients claimed)",
        CHECK,
        style(&generation).bold(),
        activation.claimed
    );
    Ok(())
}
