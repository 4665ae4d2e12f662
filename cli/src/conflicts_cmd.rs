//! `hcd conflicts` - agreement review across annotators

use anyhow::Context;
use clap::Parser;
use hcd_labels::ConflictReport;
use hcd_labels::detect_conflicts;

use crate::CommandContext;
use crate::render;

#[derive(Debug, Parser)]
pub struct ConflictsArgs {
    /// Show only activities whose annotations disagree
    #[arg(long)]
    pub only_conflicts: bool,
}

pub async fn run(ctx: &CommandContext, args: ConflictsArgs) -> anyhow::Result<()> {
    let annotations = ctx
        .client()?
        .activity_annotations()
        .await
        .context("Failed to fetch activity annotations")?;
    tracing::debug!(
        total_activities = annotations.total_activities,
        groups = annotations.groups.len(),
        "fetched annotations"
    );

    let report = detect_conflicts(annotations.groups).context("Malformed annotation data")?;

    if ctx.json {
        return ctx.print_json(&filtered(report, args.only_conflicts));
    }
    print!(
        "{}",
        render::conflict_report(&report, args.only_conflicts, ctx.palette)
    );
    Ok(())
}

/// Totals always describe every group; only the listed groups are filtered.
fn filtered(mut report: ConflictReport, only_conflicts: bool) -> ConflictReport {
    if only_conflicts {
        report.groups.retain(|group| group.has_conflict);
    }
    report
}
