//! Terminal rendering of aggregated verdicts and conflict reviews
//!
//! Every function returns the text to print so output can be asserted on.
//! Colours follow the result tables: green = 1, yellow = 0, red = -1.

use std::fmt::Write as _;

use hcd_labels::ClassificationSummary;
use hcd_labels::ConflictReport;
use hcd_labels::ReviewedGroup;
use hcd_labels::Space;
use hcd_labels::Subspace;
use hcd_labels::Verdict;
use hcd_labels::WeekVerdicts;
use owo_colors::OwoColorize;

const SUBSPACE_HEADER: &str = "HCD Subspace";

/// Whether to emit ANSI colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        Self { color: true }
    }

    /// Colour only when stdout is a colour-capable terminal.
    pub fn detect() -> Self {
        Self {
            color: supports_color::on(supports_color::Stream::Stdout).is_some(),
        }
    }

    /// Pad first so escape codes never skew column widths.
    fn verdict(self, verdict: Option<Verdict>, width: usize) -> String {
        let Some(verdict) = verdict else {
            return " ".repeat(width);
        };
        let text = format!("{:>width$}", verdict.value());
        if !self.color {
            return text;
        }
        match verdict {
            Verdict::Satisfied => text.green().to_string(),
            Verdict::Partial => text.yellow().to_string(),
            Verdict::NotSatisfied => text.red().to_string(),
        }
    }

    fn disagreement(self, value: &str, conflicting: bool) -> String {
        match (conflicting, self.color) {
            (false, _) => value.to_string(),
            (true, true) => value.red().bold().to_string(),
            (true, false) => format!("*{value}*"),
        }
    }
}

fn subspace_column_width() -> usize {
    Subspace::ALL
        .iter()
        .map(|s| s.as_str().len())
        .chain(std::iter::once(SUBSPACE_HEADER.len()))
        .max()
        .unwrap_or(SUBSPACE_HEADER.len())
}

/// One row per subspace with the worst verdict of a single payload.
pub fn summary_table(summary: &ClassificationSummary<'_>, palette: Palette) -> String {
    let name_width = subspace_column_width();
    let mut out = String::new();
    let _ = writeln!(out, "{SUBSPACE_HEADER:<name_width$}  Result");
    for subspace in Subspace::ALL {
        let cell = palette.verdict(summary.subspaces.get(&subspace).copied(), "Result".len());
        let _ = writeln!(out, "{:<name_width$}  {}", subspace.as_str(), cell.trim_end());
    }
    out
}

/// One-line key for the verdict colours, best first.
pub fn verdict_legend(palette: Palette) -> String {
    let entries: Vec<String> = [Verdict::Satisfied, Verdict::Partial, Verdict::NotSatisfied]
        .into_iter()
        .map(|v| format!("{} = {}", palette.verdict(Some(v), 1).trim_start(), v.describe()))
        .collect();
    format!("Legend: {}\n", entries.join(", "))
}

/// Per-activity details with each record's own, unreduced verdicts.
pub fn activity_details(summary: &ClassificationSummary<'_>, palette: Palette) -> String {
    let mut out = String::new();
    for activity in &summary.activities {
        let record = activity.record;
        let badge = palette.verdict(activity.worst(), 1);
        let _ = writeln!(out, "- {} [{}]", record.activity, badge.trim_start());
        let _ = writeln!(out, "    Spaces: {}", record.spaces.join(", "));
        let tagged: Vec<String> = record
            .subspaces
            .iter()
            .zip(&activity.verdicts)
            .map(|(tag, verdict)| match verdict {
                Some(v) => format!("{tag} ({})", palette.verdict(Some(*v), 1).trim_start()),
                None => format!("{tag} (?)"),
            })
            .collect();
        let _ = writeln!(out, "    Subspaces: {}", tagged.join(", "));
        let _ = writeln!(out, "    Reason: {}", record.reason);
    }
    out
}

/// Subspace x week grid. Empty cells mean no activity touched the subspace.
pub fn weekly_grid(weeks: &[WeekVerdicts], palette: Palette) -> String {
    let name_width = subspace_column_width();
    let headers: Vec<String> = weeks.iter().map(|w| format!("Week {}", w.week)).collect();

    let mut out = String::new();
    let _ = write!(out, "{SUBSPACE_HEADER:<name_width$}");
    for header in &headers {
        let _ = write!(out, "  {header}");
    }
    out.push('\n');

    for subspace in Subspace::ALL {
        let mut line = format!("{:<name_width$}", subspace.as_str());
        for (week, header) in weeks.iter().zip(&headers) {
            let _ = write!(line, "  {}", palette.verdict(week.get(subspace), header.len()));
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

/// Totals followed by each group's annotations side by side.
pub fn conflict_report(report: &ConflictReport, only_conflicts: bool, palette: Palette) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Activity groups: {} total, {} conflicting, {} consistent",
        report.total_groups, report.conflicting_groups, report.consistent_groups
    );
    for reviewed in report
        .groups
        .iter()
        .filter(|g| g.has_conflict || !only_conflicts)
    {
        out.push('\n');
        render_group(&mut out, reviewed, palette);
    }
    out
}

fn render_group(out: &mut String, reviewed: &ReviewedGroup, palette: Palette) {
    let status = match (reviewed.space_conflict, reviewed.subspace_conflict) {
        (false, false) => "consistent".to_string(),
        (true, false) => "CONFLICT: space".to_string(),
        (false, true) => "CONFLICT: subspace".to_string(),
        (true, true) => "CONFLICT: space, subspace".to_string(),
    };
    let _ = writeln!(
        out,
        "[{status}] {} ({} annotations)",
        reviewed.group.activity, reviewed.group.count
    );
    for (idx, annotation) in reviewed.group.annotations.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {}: {} / {}  Reason: {}",
            idx + 1,
            annotation.annotator,
            palette.disagreement(&annotation.space, reviewed.space_conflict),
            palette.disagreement(&annotation.subspace, reviewed.subspace_conflict),
            annotation.reason
        );
    }
}

/// The fixed Space -> Subspace scheme.
pub fn taxonomy_table() -> String {
    let mut out = String::new();
    for space in Space::ALL {
        let names: Vec<&str> = space.subspaces().iter().map(Subspace::as_str).collect();
        let _ = writeln!(out, "{:<10}  {}", space.as_str(), names.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hcd_labels::ActivityGroup;
    use hcd_labels::Annotation;
    use hcd_labels::ClassificationPayload;
    use hcd_labels::detect_conflicts;
    use hcd_labels::summarize;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn payload() -> ClassificationPayload {
        serde_json::from_value(serde_json::json!({
            "student_labels": {"tables": []},
            "llm_labels": [],
            "final_labels": {"labels": [
                {
                    "activity": "Interviewed users",
                    "student_labeled_spaces": ["UNDERSTAND"],
                    "student_labeled_subspaces": ["Empathize", "Wander"],
                    "result": 0,
                    "Reason": "Some contact"
                }
            ]}
        }))
        .unwrap()
    }

    fn line_for<'a>(text: &'a str, prefix: &str) -> &'a str {
        text.lines()
            .find(|line| line.starts_with(prefix))
            .unwrap_or_else(|| panic!("no line starting with {prefix:?} in\n{text}"))
    }

    #[test]
    fn summary_lists_every_subspace_and_leaves_untouched_blank() {
        let payload = payload();
        let text = summary_table(&summarize(&payload), Palette::plain());
        assert_eq!(text.lines().count(), 21);
        assert!(line_for(&text, "Empathize").ends_with(" 0"));
        assert_eq!(line_for(&text, "Explore").trim_end(), "Explore");
    }

    #[test]
    fn legend_explains_each_verdict() {
        assert_eq!(
            verdict_legend(Palette::plain()),
            "Legend: 1 = fully satisfied, 0 = partially satisfied, -1 = not satisfied\n"
        );
    }

    #[test]
    fn details_show_own_verdicts() {
        let payload = payload();
        let text = activity_details(&summarize(&payload), Palette::plain());
        assert!(text.contains("- Interviewed users [0]"), "{text}");
        assert!(text.contains("Subspaces: Empathize (0), Wander (0)"), "{text}");
        assert!(text.contains("Reason: Some contact"));
    }

    #[test]
    fn grid_distinguishes_absent_from_zero() {
        let weeks = vec![
            WeekVerdicts {
                week: 1,
                subspaces: BTreeMap::from([
                    (Subspace::Explore, Verdict::Satisfied),
                    (Subspace::Observe, Verdict::NotSatisfied),
                ]),
            },
            WeekVerdicts {
                week: 2,
                subspaces: BTreeMap::from([(Subspace::Explore, Verdict::Partial)]),
            },
        ];
        let text = weekly_grid(&weeks, Palette::plain());
        let header = text.lines().next().unwrap();
        assert!(header.ends_with("Week 1  Week 2"), "{header}");

        let explore: Vec<&str> = line_for(&text, "Explore").split_whitespace().collect();
        assert_eq!(explore, vec!["Explore", "1", "0"]);
        let observe: Vec<&str> = line_for(&text, "Observe").split_whitespace().collect();
        assert_eq!(observe, vec!["Observe", "-1"]);
        assert_eq!(line_for(&text, "Plan"), "Plan");
    }

    #[test]
    fn colored_cells_carry_escape_codes() {
        let cell = Palette::colored().verdict(Some(Verdict::NotSatisfied), 2);
        assert!(cell.contains("\u{1b}["));
        assert!(cell.contains("-1"));
        assert_eq!(Palette::plain().verdict(None, 3), "   ");
    }

    fn annotation(space: &str, subspace: &str, annotator: &str) -> Annotation {
        Annotation {
            activity: String::new(),
            space: space.to_string(),
            subspace: subspace.to_string(),
            reason: "because".to_string(),
            annotator: annotator.to_string(),
        }
    }

    #[test]
    fn conflicts_mark_only_disagreeing_dimension() {
        let report = detect_conflicts(vec![
            ActivityGroup::new(
                "Ran a workshop",
                vec![
                    annotation("IDEATE", "Brainstorm", "ana"),
                    annotation("IDEATE", "Plan", "ben"),
                ],
            ),
            ActivityGroup::new("Visited a clinic", vec![annotation("UNDERSTAND", "Observe", "ana")]),
        ])
        .unwrap();

        let text = conflict_report(&report, false, Palette::plain());
        assert!(text.starts_with("Activity groups: 2 total, 1 conflicting, 1 consistent"));
        assert!(text.contains("[CONFLICT: subspace] Ran a workshop (2 annotations)"));
        assert!(text.contains("  1. ana: IDEATE / *Brainstorm*  Reason: because"));
        assert!(text.contains("  2. ben: IDEATE / *Plan*  Reason: because"));
        assert!(text.contains("[consistent] Visited a clinic (1 annotations)"));

        let only = conflict_report(&report, true, Palette::plain());
        assert!(!only.contains("Visited a clinic"));
    }

    #[test]
    fn taxonomy_has_one_line_per_space() {
        let text = taxonomy_table();
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("IDEATE      Brainstorm, Propose, Plan, Narrow Concepts"));
    }
}
