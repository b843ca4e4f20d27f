//! `ignition validate <manifest>`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use ignition_platform::manifest;

/// Parse and validate a startup manifest.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the startup manifest (YAML).
    pub manifest: PathBuf,
}

impl ValidateArgs {
    pub fn run(self) -> Result<()> {
        let manifest = manifest::load_manifest(&self.manifest)
            .with_context(|| format!("invalid manifest '{}'", self.manifest.display()))?;

        println!(
            "{} Manifest ok: {} ({})",
            "✓".green(),
            manifest.app_name,
            manifest.app_id
        );
        println!(
            "  {} notification channel(s), {} deep-link route(s)",
            manifest.channels.len(),
            manifest.deep_links.len()
        );
        for channel in &manifest.channels {
            println!("  channel {} ({})", channel.id, channel.importance);
        }
        for route in &manifest.deep_links {
            println!("  route {} -> {}", route.pattern, route.target);
        }
        Ok(())
    }
}
