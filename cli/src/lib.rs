//! `hcd` command-line tools
//!
//! ## Commands
//!
//! - `hcd classify <PDF>` - classify one report and show its verdicts
//! - `hcd weekly <[WEEK=]PDF>...` - classify a series of weekly reports
//! - `hcd label next|submit` - human annotation of unlabeled activities
//! - `hcd conflicts` - review disagreement between annotators
//! - `hcd taxonomy` - print the Space -> Subspace scheme

pub mod annotator_store;
pub mod classify_cmd;
pub mod config;
pub mod conflicts_cmd;
pub mod label_cmd;
pub mod render;
pub mod weekly_cmd;

use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use hcd_backend_client::BackendClient;
use hcd_labels::Space;
use hcd_labels::Subspace;
use serde::Serialize;

use crate::annotator_store::AnnotatorStore;
use crate::classify_cmd::ClassifyArgs;
use crate::config::HcdConfig;
use crate::conflicts_cmd::ConflictsArgs;
use crate::label_cmd::LabelCli;
use crate::render::Palette;
use crate::weekly_cmd::WeeklyArgs;

/// Classify HCD activity reports and review human labels
#[derive(Debug, Parser)]
#[command(name = "hcd", version)]
pub struct Cli {
    /// Backend base URL (overrides config and HCD_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Output as JSON for automation
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: HcdSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum HcdSubcommand {
    /// Classify a single PDF report
    Classify(ClassifyArgs),

    /// Classify several weekly reports and compare them week by week
    Weekly(WeeklyArgs),

    /// Label activities by hand
    Label(LabelCli),

    /// Check annotations from different annotators for disagreement
    Conflicts(ConflictsArgs),

    /// Print the Space -> Subspace taxonomy
    Taxonomy,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        if matches!(self.command, HcdSubcommand::Taxonomy) {
            return taxonomy(self.json);
        }

        let config = HcdConfig::load()
            .context("Failed to load configuration")?
            .with_api_url(self.api_url)
            .context("Invalid --api-url")?;
        let ctx = CommandContext {
            config,
            json: self.json,
            palette: Palette::detect(),
        };

        match self.command {
            HcdSubcommand::Classify(args) => classify_cmd::run(&ctx, args).await,
            HcdSubcommand::Weekly(args) => weekly_cmd::run(&ctx, args).await,
            HcdSubcommand::Label(cli) => cli.run(&ctx).await,
            HcdSubcommand::Conflicts(args) => conflicts_cmd::run(&ctx, args).await,
            HcdSubcommand::Taxonomy => taxonomy(ctx.json),
        }
    }
}

/// State shared by every backend-facing command
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: HcdConfig,
    pub json: bool,
    pub palette: Palette,
}

impl CommandContext {
    pub fn client(&self) -> anyhow::Result<BackendClient> {
        BackendClient::new(&self.config.api_url, self.config.request_timeout())
            .with_context(|| format!("Failed to create client for {}", self.config.api_url))
    }

    pub fn annotator_store(&self) -> AnnotatorStore {
        AnnotatorStore::with_path(self.config.resolved_annotator_file())
    }

    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{text}");
        Ok(())
    }
}

#[derive(Serialize)]
struct TaxonomyEntry {
    space: Space,
    subspaces: &'static [Subspace],
}

fn taxonomy(json: bool) -> anyhow::Result<()> {
    if json {
        let entries: Vec<TaxonomyEntry> = Space::ALL
            .iter()
            .map(|space| TaxonomyEntry {
                space: *space,
                subspaces: space.subspaces(),
            })
            .collect();
        let text = serde_json::to_string_pretty(&entries).context("Failed to serialize output")?;
        println!("{text}");
    } else {
        print!("{}", render::taxonomy_table());
    }
    Ok(())
}
