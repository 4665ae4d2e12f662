//! Worst-case verdict aggregation
//!
//! Collapses per-activity verdicts into one verdict per subspace. The
//! reduction is `min`, so it is order-independent and idempotent; only
//! subspaces that some activity actually touched get an entry.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::records::ActivityLabelRecord;
use crate::records::ClassificationPayload;
use crate::records::WeekResult;
use crate::taxonomy::Subspace;
use crate::verdict::Verdict;

/// Worst verdict per subspace. Iterates in taxonomy display order.
pub type SubspaceVerdictMap = BTreeMap<Subspace, Verdict>;

/// Aggregated verdicts for one week
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekVerdicts {
    pub week: u32,
    pub subspaces: SubspaceVerdictMap,
}

impl WeekVerdicts {
    /// `None` means no activity touched the subspace that week.
    pub fn get(&self, subspace: Subspace) -> Option<Verdict> {
        self.subspaces.get(&subspace).copied()
    }
}

/// Reduce a flat list of records to the worst verdict per subspace.
pub fn aggregate_labels(labels: &[ActivityLabelRecord]) -> SubspaceVerdictMap {
    let mut worst = SubspaceVerdictMap::new();
    for record in labels {
        fold_record(&mut worst, record);
    }
    worst
}

/// Aggregate each week independently, keeping the caller's week order.
pub fn aggregate_weeks(weeks: &[WeekResult]) -> Vec<WeekVerdicts> {
    weeks
        .iter()
        .map(|week| {
            let subspaces = aggregate_labels(&week.result.final_labels.labels);
            tracing::debug!(
                week = week.week,
                activities = week.result.final_labels.labels.len(),
                subspaces = subspaces.len(),
                "aggregated week"
            );
            WeekVerdicts {
                week: week.week,
                subspaces,
            }
        })
        .collect()
}

fn fold_record(worst: &mut SubspaceVerdictMap, record: &ActivityLabelRecord) {
    for (tag, verdict) in record.tagged_verdicts() {
        let Some(subspace) = Subspace::resolve(tag) else {
            tracing::debug!(tag, activity = %record.activity, "dropping tag outside the taxonomy");
            continue;
        };
        let Some(verdict) = verdict else {
            tracing::debug!(
                subspace = %subspace,
                activity = %record.activity,
                "skipping malformed verdict"
            );
            continue;
        };
        worst
            .entry(subspace)
            .and_modify(|stored| *stored = (*stored).min(verdict))
            .or_insert(verdict);
    }
}

/// Single-payload view: the global reduction plus every record's own
/// verdicts, which the reduction never touches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationSummary<'a> {
    pub subspaces: SubspaceVerdictMap,
    pub activities: Vec<ActivitySummary<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitySummary<'a> {
    pub record: &'a ActivityLabelRecord,
    /// One slot per tagged subspace, `None` where the verdict was malformed
    pub verdicts: Vec<Option<Verdict>>,
}

impl ActivitySummary<'_> {
    /// Worst of this activity's own verdicts
    pub fn worst(&self) -> Option<Verdict> {
        self.verdicts.iter().flatten().min().copied()
    }
}

/// Summarise one classification payload.
pub fn summarize(payload: &ClassificationPayload) -> ClassificationSummary<'_> {
    let labels = &payload.final_labels.labels;
    let activities = labels
        .iter()
        .map(|record| ActivitySummary {
            record,
            verdicts: record.result.aligned(record.subspaces.len()),
        })
        .collect();
    ClassificationSummary {
        subspaces: aggregate_labels(labels),
        activities,
    }
}
