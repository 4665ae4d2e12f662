//! Classification payload records
//!
//! Mirrors the JSON document returned by the classifier's `/classify`
//! endpoint. Field names on the wire are kept as the backend sends them.

use serde::Deserialize;
use serde::Serialize;

use crate::verdict::Verdict;
use crate::verdict::VerdictShape;

/// Full response of one classification run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationPayload {
    /// Activity tables as the student labeled them in the report
    pub student_labels: StudentLabels,
    /// Independently generated LLM labels for the same activities
    pub llm_labels: Vec<ActivityTable>,
    /// Reconciled labels with verdicts; input to the aggregator
    pub final_labels: FinalLabels,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentLabels {
    pub tables: Vec<ActivityTable>,
}

/// One activity row with its tagged spaces and subspaces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityTable {
    pub activity: String,
    #[serde(rename = "HCD_Spaces", default)]
    pub spaces: Vec<String>,
    #[serde(rename = "HCD_Subspaces", default)]
    pub subspaces: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalLabels {
    pub labels: Vec<ActivityLabelRecord>,
}

/// One classified activity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityLabelRecord {
    pub activity: String,
    #[serde(rename = "student_labeled_spaces", default)]
    pub spaces: Vec<String>,
    /// Subspace tags, index-aligned with `result`
    #[serde(rename = "student_labeled_subspaces", default)]
    pub subspaces: Vec<String>,
    #[serde(default)]
    pub result: VerdictShape,
    #[serde(rename = "Reason", default)]
    pub reason: String,
}

impl ActivityLabelRecord {
    /// Tag/verdict pairs after normalising the result shape.
    ///
    /// Tags are returned raw; resolution against the taxonomy happens in the
    /// aggregator.
    pub fn tagged_verdicts(&self) -> impl Iterator<Item = (&str, Option<Verdict>)> {
        self.subspaces
            .iter()
            .map(String::as_str)
            .zip(self.result.aligned(self.subspaces.len()))
    }
}

/// One week's classification payload, as assigned by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekResult {
    pub week: u32,
    pub result: ClassificationPayload,
}
