//! `hcd weekly` - a series of reports, one column per week

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use hcd_backend_client::BackendClient;
use hcd_backend_client::PdfUpload;
use hcd_labels::ClassificationPayload;
use hcd_labels::WeekResult;
use hcd_labels::aggregate_weeks;

use crate::CommandContext;
use crate::render;

#[derive(Debug, Parser)]
pub struct WeeklyArgs {
    /// Reports as `WEEK=PATH` or `PATH`; a bare path takes the week after
    /// the highest one given before it
    #[arg(value_name = "[WEEK=]PDF", required = true)]
    pub reports: Vec<WeeklyReport>,
}

/// One command-line report with its optional explicit week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyReport {
    pub week: Option<u32>,
    pub path: PathBuf,
}

impl FromStr for WeeklyReport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((prefix, rest)) = s.split_once('=')
            && let Ok(week) = prefix.trim().parse::<u32>()
        {
            if week == 0 {
                return Err(format!("week numbers start at 1: {s}"));
            }
            if rest.is_empty() {
                return Err(format!("missing file after week {week}"));
            }
            return Ok(Self {
                week: Some(week),
                path: PathBuf::from(rest),
            });
        }
        Ok(Self {
            week: None,
            path: PathBuf::from(s),
        })
    }
}

/// Fill in missing weeks and order the reports for upload.
///
/// A report without a week gets one more than the highest week seen so far
/// (1 for the first). The sort is stable, so equal weeks keep input order.
pub fn schedule(reports: Vec<WeeklyReport>) -> anyhow::Result<Vec<(u32, PathBuf)>> {
    let mut highest: u32 = 0;
    let mut scheduled = Vec::with_capacity(reports.len());
    for report in reports {
        let week = match report.week {
            Some(week) => week,
            None => highest.checked_add(1).with_context(|| {
                format!(
                    "No week number left for {} after week {highest}",
                    report.path.display()
                )
            })?,
        };
        highest = highest.max(week);
        scheduled.push((week, report.path));
    }
    scheduled.sort_by_key(|(week, _)| *week);
    Ok(scheduled)
}

pub async fn run(ctx: &CommandContext, args: WeeklyArgs) -> anyhow::Result<()> {
    let scheduled = schedule(args.reports)?;
    let client = ctx.client()?;
    let mut results = Vec::with_capacity(scheduled.len());

    // Strictly one at a time; the first failure aborts the batch.
    for (week, path) in scheduled {
        let result = classify_week(&client, &path)
            .await
            .with_context(|| format!("Classification failed for week {week}"))?;
        tracing::info!(week, path = %path.display(), "week classified");
        results.push(WeekResult { week, result });
    }

    let weeks = aggregate_weeks(&results);
    if ctx.json {
        return ctx.print_json(&weeks);
    }
    print!("{}", render::weekly_grid(&weeks, ctx.palette));
    print!("{}", render::verdict_legend(ctx.palette));
    Ok(())
}

async fn classify_week(
    client: &BackendClient,
    path: &std::path::Path,
) -> anyhow::Result<ClassificationPayload> {
    let upload = PdfUpload::from_path(path)?;
    Ok(client.classify(upload).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(s: &str) -> WeeklyReport {
        s.parse().unwrap()
    }

    #[test]
    fn parses_explicit_and_bare_reports() {
        assert_eq!(
            parse("3=reports/w3.pdf"),
            WeeklyReport {
                week: Some(3),
                path: PathBuf::from("reports/w3.pdf"),
            }
        );
        assert_eq!(parse("w1.pdf").week, None);
        // Not a number before '=', so the whole thing is a path.
        assert_eq!(parse("draft=final.pdf").path, PathBuf::from("draft=final.pdf"));
        assert!("0=w.pdf".parse::<WeeklyReport>().is_err());
        assert!("2=".parse::<WeeklyReport>().is_err());
    }

    #[test]
    fn bare_reports_follow_highest_week() {
        let scheduled = schedule(vec![
            parse("a.pdf"),
            parse("4=d.pdf"),
            parse("e.pdf"),
            parse("2=b.pdf"),
            parse("f.pdf"),
        ])
        .unwrap();
        let weeks: Vec<(u32, &str)> = scheduled
            .iter()
            .map(|(week, path)| (*week, path.to_str().unwrap()))
            .collect();
        assert_eq!(
            weeks,
            vec![(1, "a.pdf"), (2, "b.pdf"), (4, "d.pdf"), (5, "e.pdf"), (6, "f.pdf")]
        );
    }

    #[test]
    fn equal_weeks_keep_input_order() {
        let scheduled =
            schedule(vec![parse("2=x.pdf"), parse("1=y.pdf"), parse("2=z.pdf")]).unwrap();
        let paths: Vec<&str> = scheduled.iter().map(|(_, p)| p.to_str().unwrap()).collect();
        assert_eq!(paths, vec!["y.pdf", "x.pdf", "z.pdf"]);
    }

    #[test]
    fn no_week_after_the_last_one() {
        let last = format!("{}=a.pdf", u32::MAX);
        let err = schedule(vec![parse(&last), parse("b.pdf")]).unwrap_err();
        assert!(err.to_string().contains("No week number left for b.pdf"), "{err}");

        let scheduled = schedule(vec![parse("b.pdf"), parse(&last)]).unwrap();
        assert_eq!(scheduled[1].0, u32::MAX);
    }
}
