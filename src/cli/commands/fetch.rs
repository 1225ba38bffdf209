//! Fetch command - run one request through the policy engine

use crate::cli::args::FetchArgs;
use crate::cli::commands::{build_classifier, build_store, build_transport};
use crate::config::Config;
use crate::error::{GencacheError, GencacheResult};
use crate::policy::PolicyEngine;
use console::style;
use tokio::fs;
use tracing::debug;

/// Execute the fetch command
pub async fn execute(args: FetchArgs, config: &Config) -> GencacheResult<()> {
    let classifier = build_classifier(config);
    debug!(
        "Request {} classified as {}",
        args.url,
        classifier.classify(&args.url)
    );

    let engine = PolicyEngine::new(
        build_store(config),
        build_transport(config),
        classifier,
        config.generation_name(),
    );

    let response = engine.handle(&args.url).await?;

    let status_display = if response.status < 400 {
        style(response.status.to_string()).green()
    } else {
        style(response.status.to_string()).red()
    };
    println!(
        "{} {} ({}, {} bytes)",
        status_display,
        args.url,
        response.content_type.as_deref().unwrap_or("unknown"),
        response.body.len()
    );

    if let Some(path) = args.output {
        fs::write(&path, &response.body)
            .await
            .map_err(|e| GencacheError::io(format!("writing body to {}", path.display()), e))?;
        println!("Body written to {}", path.display());
    }

    Ok(())
}
