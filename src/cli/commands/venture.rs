//! Next-venture CLI command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::commands::{load_snapshot, open_control};
use crate::cli::id_resolver::resolve_character;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::CollectingNotifier;
use crate::services::PlannerContext;

#[derive(Args, Debug)]
pub struct NextVentureArgs {
    /// Character name or content id
    pub character: String,
    /// Retainer name (defaults to the first retainer)
    #[arg(short, long)]
    pub retainer: Option<String>,
    /// Show what would be chosen without recording anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
pub struct NextVentureOutput {
    pub character: String,
    pub retainer: String,
    pub venture_id: Option<u32>,
    pub venture_name: Option<String>,
    pub dry_run: bool,
    pub messages: Vec<String>,
}

impl CommandOutput for NextVentureOutput {
    fn to_human(&self) -> String {
        let mut lines: Vec<String> = self.messages.clone();
        let venture = match (&self.venture_name, self.venture_id) {
            (Some(name), Some(id)) => format!("{name} (#{id})"),
            (None, Some(id)) => format!("#{id}"),
            _ => "nothing to do".to_string(),
        };
        let prefix = if self.dry_run { "[dry run] " } else { "" };
        lines.push(format!(
            "{prefix}{} / {}: {venture}",
            self.character, self.retainer
        ));
        lines.join("\n")
    }
}

pub async fn execute(args: NextVentureArgs, config: &Config, json_mode: bool) -> Result<()> {
    let source = load_snapshot(config).await?;
    let control = open_control(config, true).await?;
    let notifier = CollectingNotifier::new();
    let ctx = PlannerContext {
        source: &source,
        inventory: &source,
        execution: &source,
        notifier: &notifier,
    };

    let character_id = resolve_character(&control.configuration().await, &args.character)?
        .local_content_id;

    // The preview also picks the default retainer
    let preview = control
        .next_venture(&ctx, character_id, args.retainer.as_deref())
        .await?;

    let out = if args.dry_run {
        NextVentureOutput {
            character: preview.character,
            retainer: preview.retainer,
            venture_id: preview.venture_id,
            venture_name: preview.venture_name,
            dry_run: true,
            messages: notifier.take(),
        }
    } else {
        // Drop the preview's messages; the real run notifies again
        let _ = notifier.take();
        let outcome = control
            .send_retainer_to_venture(&ctx, character_id, &preview.retainer)
            .await?;
        NextVentureOutput {
            character: preview.character,
            retainer: preview.retainer,
            venture_id: outcome.venture_id,
            venture_name: outcome.venture_id.map(|id| control.venture_label(id)),
            dry_run: false,
            messages: notifier.take(),
        }
    };
    output(&out, json_mode);
    Ok(())
}
