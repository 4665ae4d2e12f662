//! `hcd label` - human annotation of unlabeled activities
//!
//! ## Commands
//!
//! - `hcd label next` - show the next activity waiting for a label
//! - `hcd label submit` - record a Space/Subspace label for an activity

use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use hcd_backend_client::LabelSubmission;
use hcd_labels::LabelChoice;
use hcd_labels::validate_label;

use crate::CommandContext;
use crate::annotator_store::AnnotatorStore;

#[derive(Debug, Parser)]
pub struct LabelCli {
    #[command(subcommand)]
    pub command: LabelSubcommand,
}

impl LabelCli {
    pub async fn run(self, ctx: &CommandContext) -> anyhow::Result<()> {
        match self.command {
            LabelSubcommand::Next => run_next(ctx).await,
            LabelSubcommand::Submit(args) => run_submit(ctx, args).await,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum LabelSubcommand {
    /// Show the next unlabeled activity
    Next,

    /// Submit a label for an activity
    Submit(SubmitArgs),
}

#[derive(Debug, Parser)]
pub struct SubmitArgs {
    /// Row id from `hcd label next`
    #[arg(long)]
    pub rowid: i64,

    /// HCD Space, e.g. IDEATE
    #[arg(long)]
    pub space: String,

    /// Subspace as offered under that Space, e.g. Brainstorm or Develop
    #[arg(long)]
    pub subspace: String,

    /// Why the activity fits this label
    #[arg(long, default_value = "")]
    pub reason: String,

    /// Annotator name (defaults to the remembered one)
    #[arg(long)]
    pub annotator: Option<String>,

    /// Do not remember the annotator name, and forget any remembered one
    #[arg(long)]
    pub no_remember: bool,
}

async fn run_next(ctx: &CommandContext) -> anyhow::Result<()> {
    let next = ctx
        .client()?
        .fetch_unlabeled()
        .await
        .context("Failed to fetch the next unlabeled activity")?;

    if ctx.json {
        return ctx.print_json(&next);
    }
    match next {
        Some(activity) => {
            println!("Row {}", activity.rowid);
            println!("{}", activity.activity);
        }
        None => println!("No more unlabeled activities."),
    }
    Ok(())
}

/// Prefer the flag, then the remembered name; blank names are refused.
fn resolve_annotator(flag: Option<String>, store: &AnnotatorStore) -> anyhow::Result<String> {
    let name = match flag {
        Some(name) => name,
        None => store
            .load()
            .context("Failed to read remembered annotator name")?
            .unwrap_or_default(),
    };
    let name = name.trim().to_string();
    if name.is_empty() {
        anyhow::bail!("An annotator name is required: pass --annotator <NAME>");
    }
    Ok(name)
}

/// Wire form of a validated label, using the labeling form's spelling.
fn submission_for(
    rowid: i64,
    choice: LabelChoice,
    reason: String,
    annotator: String,
) -> LabelSubmission {
    LabelSubmission {
        rowid,
        space: choice.space.as_str().to_string(),
        subspace: choice.subspace.to_string(),
        reason,
        annotator,
    }
}

async fn run_submit(ctx: &CommandContext, args: SubmitArgs) -> anyhow::Result<()> {
    // Bad labels never reach the backend.
    let choice = validate_label(&args.space, &args.subspace)?;
    let store = ctx.annotator_store();
    let annotator = resolve_annotator(args.annotator, &store)?;

    let submission = submission_for(args.rowid, choice, args.reason, annotator);
    let ack = ctx
        .client()?
        .label_activity(&submission)
        .await
        .with_context(|| format!("Failed to label row {}", submission.rowid))?;

    // Only a successful submission touches the remembered name.
    if args.no_remember {
        store.forget()?;
    } else {
        store.remember(&submission.annotator)?;
    }

    if ctx.json {
        return ctx.print_json(&ack);
    }
    println!(
        "Labeled row {} as {} / {} ({})",
        submission.rowid, submission.space, submission.subspace, submission.annotator
    );
    Ok(())
}
