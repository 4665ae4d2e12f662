//! HCD activity labels
//!
//! Pure transforms over already-classified activity data:
//!
//! - [`taxonomy`]: the fixed Space -> Subspace scheme and tag resolution
//! - [`aggregate`]: worst-case verdict per subspace, per week or per payload
//! - [`conflicts`]: agreement check across independent human annotations
//!
//! Nothing here performs I/O or keeps state between calls.

pub mod aggregate;
pub mod conflicts;
pub mod errors;
pub mod records;
pub mod taxonomy;
pub mod verdict;

pub use aggregate::ActivitySummary;
pub use aggregate::ClassificationSummary;
pub use aggregate::SubspaceVerdictMap;
pub use aggregate::WeekVerdicts;
pub use aggregate::aggregate_labels;
pub use aggregate::aggregate_weeks;
pub use aggregate::summarize;
pub use conflicts::ActivityGroup;
pub use conflicts::Annotation;
pub use conflicts::ConflictReport;
pub use conflicts::ReviewedGroup;
pub use conflicts::detect_conflicts;
pub use conflicts::group_annotations;
pub use errors::LabelError;
pub use errors::Result;
pub use records::ActivityLabelRecord;
pub use records::ActivityTable;
pub use records::ClassificationPayload;
pub use records::FinalLabels;
pub use records::StudentLabels;
pub use records::WeekResult;
pub use taxonomy::LabelChoice;
pub use taxonomy::Space;
pub use taxonomy::Subspace;
pub use taxonomy::validate_label;
pub use verdict::Verdict;
pub use verdict::VerdictShape;
