//! Config CLI commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::commands::open_control;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, ConfigUiOptions, MiscConfiguration};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Change planner preferences stored with the configuration model
    Set {
        /// Venture currency to keep in reserve (0..=65000)
        #[arg(long)]
        ventures_to_keep: Option<u32>,
        /// Announce every assignment
        #[arg(long)]
        show_assignment_messages: Option<bool>,
        /// Default the locked-items report to missing items only
        #[arg(long)]
        only_show_missing: Option<bool>,
    },
}

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub app: Config,
    pub misc: MiscConfiguration,
    pub ui: ConfigUiOptions,
}

impl CommandOutput for ConfigOutput {
    fn to_human(&self) -> String {
        let app = &self.app;
        let mut lines = vec![
            "Logging:".to_string(),
            format!("  level:     {}", app.logging.level),
            format!("  format:    {}", app.logging.format),
            format!("  rotation:  {}", app.logging.rotation),
        ];
        if let Some(dir) = &app.logging.log_dir {
            lines.push(format!("  log_dir:   {}", dir.display()));
        }
        lines.push("Storage:".to_string());
        lines.push(format!("  state:     {}", app.storage.state_path.display()));
        lines.push("Sources:".to_string());
        lines.push(format!("  snapshot:  {}", app.sources.snapshot_path.display()));
        lines.push(format!("  catalog:   {}", app.sources.catalog_path.display()));
        lines.push("Planner:".to_string());
        lines.push(format!("  filler venture:     {}", app.planner.filler_venture_id));
        lines.push(format!("  ventures to keep:   {}", self.misc.ventures_to_keep));
        lines.push(format!(
            "  assignment messages: {}",
            self.ui.show_assignment_chat_messages
        ));
        lines.push(format!(
            "  only show missing:   {}",
            self.ui.only_show_missing_gathered_items
        ));
        lines.join("\n")
    }
}

pub async fn execute(args: ConfigArgs, config: &Config, json_mode: bool) -> Result<()> {
    let control = open_control(config, false).await?;

    if let ConfigCommands::Set {
        ventures_to_keep,
        show_assignment_messages,
        only_show_missing,
    } = args.command
    {
        control
            .edit(|c| {
                if let Some(ventures) = ventures_to_keep {
                    c.set_ventures_to_keep(ventures);
                }
                if let Some(show) = show_assignment_messages {
                    c.config_ui_options.show_assignment_chat_messages = show;
                }
                if let Some(only_missing) = only_show_missing {
                    c.config_ui_options.only_show_missing_gathered_items = only_missing;
                }
                Ok(())
            })
            .await?;
    }

    let configuration = control.configuration().await;
    let out = ConfigOutput {
        app: config.clone(),
        misc: configuration.misc,
        ui: configuration.config_ui_options,
    };
    output(&out, json_mode);
    Ok(())
}
