//! Sync CLI command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::commands::{load_snapshot, open_control};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

#[derive(Args, Debug)]
pub struct SyncArgs {}

#[derive(Debug, Serialize)]
pub struct SyncOutput {
    pub changed: bool,
    pub characters: usize,
    pub retainers: usize,
}

impl CommandOutput for SyncOutput {
    fn to_human(&self) -> String {
        let status = if self.changed { "updated" } else { "already up to date" };
        format!(
            "Configuration {status}: {} character(s), {} retainer(s)",
            self.characters, self.retainers
        )
    }
}

pub async fn execute(_args: SyncArgs, config: &Config, json_mode: bool) -> Result<()> {
    let source = load_snapshot(config).await?;
    let control = open_control(config, false).await?;

    let changed = control.sync(&source).await?;
    let configuration = control.configuration().await;

    let out = SyncOutput {
        changed,
        characters: configuration.characters.len(),
        retainers: configuration
            .characters
            .iter()
            .map(|c| c.retainers.len())
            .sum(),
    };
    output(&out, json_mode);
    Ok(())
}
