//! `hcd classify` - one report, one summary

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use hcd_backend_client::PdfUpload;
use hcd_labels::summarize;

use crate::CommandContext;
use crate::render;

#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// PDF report to classify
    #[arg(value_name = "PDF")]
    pub file: PathBuf,
}

pub async fn run(ctx: &CommandContext, args: ClassifyArgs) -> anyhow::Result<()> {
    let upload = PdfUpload::from_path(&args.file)
        .with_context(|| format!("Cannot upload {}", args.file.display()))?;
    let client = ctx.client()?;
    let payload = client
        .classify(upload)
        .await
        .with_context(|| format!("Classification failed for {}", args.file.display()))?;

    let summary = summarize(&payload);
    tracing::info!(
        activities = summary.activities.len(),
        subspaces = summary.subspaces.len(),
        "classified report"
    );

    if ctx.json {
        return ctx.print_json(&summary);
    }

    print!("{}", render::summary_table(&summary, ctx.palette));
    print!("{}", render::verdict_legend(ctx.palette));
    if !summary.activities.is_empty() {
        println!();
        println!("Detailed Activity Labels");
        print!("{}", render::activity_details(&summary, ctx.palette));
    }
    Ok(())
}
