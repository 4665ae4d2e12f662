//! Annotation conflict detection
//!
//! Independent human annotations of the same activity text form a group. A
//! group conflicts when its annotators chose more than one distinct space or
//! more than one distinct subspace. Annotation order inside a group is
//! submission order and is never changed.

use std::collections::HashMap;
use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::LabelError;
use crate::errors::Result;

/// One person's label for one activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Activity text; optional on the wire when the enclosing group carries it
    #[serde(rename = "Activity", default, skip_serializing_if = "String::is_empty")]
    pub activity: String,
    #[serde(rename = "HCD_Space")]
    pub space: String,
    #[serde(rename = "HCD_Subspace")]
    pub subspace: String,
    #[serde(rename = "Reason", default)]
    pub reason: String,
    #[serde(rename = "Annotator", default)]
    pub annotator: String,
}

/// All annotations sharing one activity text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityGroup {
    pub activity: String,
    pub count: usize,
    pub annotations: Vec<Annotation>,
}

impl ActivityGroup {
    pub fn new(activity: impl Into<String>, annotations: Vec<Annotation>) -> Self {
        Self {
            activity: activity.into(),
            count: annotations.len(),
            annotations,
        }
    }

    pub fn space_conflict(&self) -> bool {
        distinct(self.annotations.iter().map(|a| a.space.as_str())) > 1
    }

    pub fn subspace_conflict(&self) -> bool {
        distinct(self.annotations.iter().map(|a| a.subspace.as_str())) > 1
    }

    fn validate(&self) -> Result<()> {
        if self.annotations.is_empty() {
            return Err(LabelError::EmptyGroup {
                activity: self.activity.clone(),
            });
        }
        if self.count != self.annotations.len() {
            return Err(LabelError::GroupCountMismatch {
                activity: self.activity.clone(),
                declared: self.count,
                actual: self.annotations.len(),
            });
        }
        Ok(())
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.collect::<HashSet<_>>().len()
}

/// A group together with its precomputed conflict flags, enough for a
/// renderer to highlight only the disagreeing dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewedGroup {
    #[serde(flatten)]
    pub group: ActivityGroup,
    pub space_conflict: bool,
    pub subspace_conflict: bool,
    pub has_conflict: bool,
}

impl ReviewedGroup {
    fn review(group: ActivityGroup) -> Self {
        let space_conflict = group.space_conflict();
        let subspace_conflict = group.subspace_conflict();
        Self {
            group,
            space_conflict,
            subspace_conflict,
            has_conflict: space_conflict || subspace_conflict,
        }
    }
}

/// Outcome of a conflict review over many groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConflictReport {
    pub total_groups: usize,
    pub conflicting_groups: usize,
    pub consistent_groups: usize,
    pub groups: Vec<ReviewedGroup>,
}

impl ConflictReport {
    /// Groups whose annotators disagree
    pub fn conflicts(&self) -> impl Iterator<Item = &ReviewedGroup> {
        self.groups.iter().filter(|g| g.has_conflict)
    }
}

/// Review every group for disagreement.
///
/// Fails on the first group with no annotations or with a `count` that does
/// not match its annotation list. No groups is a valid, all-zero report.
pub fn detect_conflicts(groups: Vec<ActivityGroup>) -> Result<ConflictReport> {
    let mut reviewed = Vec::with_capacity(groups.len());
    for group in groups {
        group.validate()?;
        reviewed.push(ReviewedGroup::review(group));
    }

    let total_groups = reviewed.len();
    let conflicting_groups = reviewed.iter().filter(|g| g.has_conflict).count();
    tracing::debug!(total_groups, conflicting_groups, "reviewed annotation groups");

    Ok(ConflictReport {
        total_groups,
        conflicting_groups,
        consistent_groups: total_groups - conflicting_groups,
        groups: reviewed,
    })
}

/// Group flat annotations by identical activity text.
///
/// Groups appear in order of first occurrence; annotations keep their
/// submission order within a group.
pub fn group_annotations(annotations: Vec<Annotation>) -> Vec<ActivityGroup> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut grouped: Vec<(String, Vec<Annotation>)> = Vec::new();
    for annotation in annotations {
        let slot = slots.get(&annotation.activity).copied();
        match slot {
            Some(slot) => grouped[slot].1.push(annotation),
            None => {
                slots.insert(annotation.activity.clone(), grouped.len());
                grouped.push((annotation.activity.clone(), vec![annotation]));
            }
        }
    }
    grouped
        .into_iter()
        .map(|(activity, annotations)| ActivityGroup::new(activity, annotations))
        .collect()
}
