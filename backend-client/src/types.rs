//! Request and response bodies exchanged with the backend

use hcd_labels::ActivityGroup;
use serde::Deserialize;
use serde::Serialize;

/// An activity still waiting for a human label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlabeledActivity {
    pub rowid: i64,
    #[serde(rename = "Activity")]
    pub activity: String,
}

/// Raw `/fetch-unlabeled` body. `{"rowid": null, "Activity": null}` means
/// there is no more work.
#[derive(Debug, Deserialize)]
pub(crate) struct UnlabeledBody {
    #[serde(default)]
    pub rowid: Option<i64>,
    #[serde(rename = "Activity", default)]
    pub activity: Option<String>,
}

impl UnlabeledBody {
    /// A missing rowid is treated as exhaustion, the same as an explicit
    /// null pair.
    pub(crate) fn into_activity(self) -> Option<UnlabeledActivity> {
        match (self.rowid, self.activity) {
            (Some(rowid), Some(activity)) => Some(UnlabeledActivity { rowid, activity }),
            (None, None) => None,
            (rowid, activity) => {
                tracing::warn!(
                    ?rowid,
                    has_activity = activity.is_some(),
                    "incomplete unlabeled activity, treating as no more work"
                );
                None
            }
        }
    }
}

/// Body of `/label-activity`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSubmission {
    pub rowid: i64,
    #[serde(rename = "HCD_Space")]
    pub space: String,
    #[serde(rename = "HCD_Subspace")]
    pub subspace: String,
    #[serde(rename = "Reason")]
    pub reason: String,
    #[serde(rename = "Annotator")]
    pub annotator: String,
}

/// Body of `/activity-annotations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityAnnotations {
    pub total_activities: usize,
    pub groups: Vec<ActivityGroup>,
}

/// Error document returned alongside non-success statuses
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        let details = self.details.filter(|details| !details.trim().is_empty());
        match (self.message.or(self.error), details) {
            (Some(headline), Some(details)) => Some(format!("{headline} ({details})")),
            (Some(headline), None) => Some(headline),
            (None, details) => details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(body: &str) -> Option<UnlabeledActivity> {
        serde_json::from_str::<UnlabeledBody>(body)
            .unwrap()
            .into_activity()
    }

    #[test]
    fn null_pair_means_no_more_work() {
        assert_eq!(parse(r#"{"rowid": null, "Activity": null}"#), None);
        assert_eq!(parse("{}"), None);
        assert_eq!(parse(r#"{"Activity": "orphan"}"#), None);
    }

    #[test]
    fn populated_body_is_an_activity() {
        assert_eq!(
            parse(r#"{"rowid": 42, "Activity": "Mapped the journey"}"#),
            Some(UnlabeledActivity {
                rowid: 42,
                activity: "Mapped the journey".to_string(),
            })
        );
    }

    #[test]
    fn submission_uses_wire_names() {
        let submission = LabelSubmission {
            rowid: 7,
            space: "IDEATE".to_string(),
            subspace: "Plan".to_string(),
            reason: "Timeline drafted".to_string(),
            annotator: "ana".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&submission).unwrap(),
            serde_json::json!({
                "rowid": 7,
                "HCD_Space": "IDEATE",
                "HCD_Subspace": "Plan",
                "Reason": "Timeline drafted",
                "Annotator": "ana"
            })
        );
    }

    #[test]
    fn error_body_prefers_message_then_error() {
        let body: ErrorBody = serde_json::from_str(r#"{"message": "rowid taken"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("rowid taken"));

        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "Internal server error", "details": "boom"}"#)
                .unwrap();
        assert_eq!(
            body.into_message().as_deref(),
            Some("Internal server error (boom)")
        );

        let body: ErrorBody = serde_json::from_str(r#"{"details": "model timeout"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("model timeout"));

        assert_eq!(ErrorBody::default().into_message(), None);
    }
}
