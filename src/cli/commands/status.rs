//! Status command - show cache generations and configuration summary

use crate::cli::commands::build_store;
use crate::config::{Config, ConfigManager};
use crate::error::GencacheResult;
use crate::store::CacheStore;
use console::{style, Emoji};

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "[OK] ");
static DOT: Emoji<'_, '_> = Emoji("· ", "- ");

/// Execute the status command
pub async fn execute(config: &Config) -> GencacheResult<()> {
    println!("{}", style("gencache status").bold().cyan());
    println!();

    let current = config.generation_name();
    println!("{}", style("Configuration:").bold());
    println!("  {} site origin: {}", DOT, config.network.site_origin);
    println!(
        "  {} external origins: {}",
        DOT,
        config.network.external_origins.len()
    );
    println!("  {} manifest assets: {}", DOT, config.manifest.assets.len());
    println!(
        "  {} cache root: {}",
        DOT,
        ConfigManager::cache_root(config).display()
    );
    println!();

    let store = build_store(config);
    let names = store.names().await?;

    println!("{}", style("Generations:").bold());
    if names.is_empty() {
        println!("  No cache generations found. Run: gencache deploy");
        return Ok(());
    }

    for name in names {
        let entries = store.entries(&name).await?.len();
        if name == current {
            println!(
                "  {} {} ({} entries) {}",
                CHECK,
                style(&name).bold(),
                entries,
                style("current").green()
            );
        } else {
            println!("  {} {} ({} entries)", DOT, name, entries);
        }
    }

    Ok(())
}
