use std::time::Duration;

use hcd_labels::ClassificationPayload;
use serde::de::DeserializeOwned;

use crate::error::BackendError;
use crate::error::Result;
use crate::types::ActivityAnnotations;
use crate::types::ErrorBody;
use crate::types::LabelSubmission;
use crate::types::UnlabeledActivity;
use crate::types::UnlabeledBody;
use crate::upload::PdfUpload;

const CLASSIFY_ENDPOINT: &str = "/classify";
const FETCH_UNLABELED_ENDPOINT: &str = "/fetch-unlabeled";
const LABEL_ACTIVITY_ENDPOINT: &str = "/label-activity";
const ACTIVITY_ANNOTATIONS_ENDPOINT: &str = "/activity-annotations";

/// Client for the HCD classification backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Build a client with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| BackendError::Network {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload one report and return its classification.
    pub async fn classify(&self, upload: PdfUpload) -> Result<ClassificationPayload> {
        let url = self.endpoint_url(CLASSIFY_ENDPOINT);
        tracing::info!(
            url = %url,
            file_name = upload.file_name(),
            size = upload.len(),
            "forwarding report to classifier"
        );
        let form = reqwest::multipart::Form::new().part("file", upload.into_part()?);
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|source| BackendError::Network {
                url: url.clone(),
                source,
            })?;
        let payload: ClassificationPayload = decode(&url, response).await?;
        tracing::debug!(
            activities = payload.final_labels.labels.len(),
            "classification received"
        );
        Ok(payload)
    }

    /// Next activity awaiting a label, or `None` once the queue is empty.
    pub async fn fetch_unlabeled(&self) -> Result<Option<UnlabeledActivity>> {
        let url = self.endpoint_url(FETCH_UNLABELED_ENDPOINT);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| BackendError::Network {
                url: url.clone(),
                source,
            })?;
        let body: UnlabeledBody = decode(&url, response).await?;
        Ok(body.into_activity())
    }

    /// Submit a human label. Returns the backend's acknowledgement.
    ///
    /// On error the label must not be assumed stored.
    pub async fn label_activity(&self, submission: &LabelSubmission) -> Result<serde_json::Value> {
        let url = self.endpoint_url(LABEL_ACTIVITY_ENDPOINT);
        tracing::info!(
            url = %url,
            rowid = submission.rowid,
            space = %submission.space,
            subspace = %submission.subspace,
            "submitting label"
        );
        let response = self
            .http
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(|source| BackendError::Network {
                url: url.clone(),
                source,
            })?;
        let response = check_status(&url, response).await?;
        let body = response
            .text()
            .await
            .map_err(|source| BackendError::Network {
                url: url.clone(),
                source,
            })?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| BackendError::Decode {
            url,
            message: e.to_string(),
        })
    }

    /// All human annotations, grouped by activity text.
    pub async fn activity_annotations(&self) -> Result<ActivityAnnotations> {
        let url = self.endpoint_url(ACTIVITY_ANNOTATIONS_ENDPOINT);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| BackendError::Network {
                url: url.clone(),
                source,
            })?;
        decode(&url, response).await
    }
}

/// Turn a non-success response into a single descriptive error.
async fn check_status(url: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    tracing::debug!(url, %status, "backend responded");
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status.canonical_reason().unwrap_or("no details").to_string()
            } else {
                trimmed.to_string()
            }
        });
    tracing::warn!(url, %status, message = %message, "backend returned an error");
    Err(BackendError::Status { status, message })
}

async fn decode<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T> {
    let response = check_status(url, response).await?;
    let body = response
        .text()
        .await
        .map_err(|source| BackendError::Network {
            url: url.to_string(),
            source,
        })?;
    serde_json::from_str(&body).map_err(|e| BackendError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}
