//! HTTP client for the HCD classification backend.
//!
//! Covers the four endpoints the labeling tools use: report classification,
//! the unlabeled-activity queue, label submission and the grouped
//! annotation export. Payloads are decoded into `hcd-labels` records.

mod client;
mod error;
mod types;
mod upload;

pub use client::BackendClient;
pub use error::BackendError;
pub use error::Result;
pub use types::ActivityAnnotations;
pub use types::LabelSubmission;
pub use types::UnlabeledActivity;
pub use upload::PdfUpload;
