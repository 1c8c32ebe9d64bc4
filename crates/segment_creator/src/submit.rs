//! Posting a segment to the webhook and turning the outcome into a message.

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{error, info};

use crate::segment::{SegmentEditor, SegmentPayload};

pub const DEFAULT_ENDPOINT: &str = "https://webhook.site/d2ace6fc-7199-4116-aad4-bf6ecb0f32e7";

pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Why a submission failed. `Display` is the text shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The endpoint could not be reached at all.
    #[error("{}", transport_message(.0))]
    Transport(String),

    #[error("Failed to save segment. Access forbidden. Please check your authentication.")]
    Forbidden,

    #[error("Failed to save segment. Endpoint not found. Please verify the webhook URL.")]
    NotFound,

    #[error("Failed to save segment. Server responded with status: {0}")]
    Status(u16),
}

fn transport_message(message: &str) -> &str {
    if message.trim().is_empty() {
        FALLBACK_MESSAGE
    } else {
        message
    }
}

impl SubmitError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        SubmitError::Transport(err.to_string())
    }
}

/// Any 2xx is a success; the body is never read.
pub fn check_status(status: StatusCode) -> Result<(), SubmitError> {
    if status.is_success() {
        return Ok(());
    }
    Err(match status {
        StatusCode::FORBIDDEN => SubmitError::Forbidden,
        StatusCode::NOT_FOUND => SubmitError::NotFound,
        other => SubmitError::Status(other.as_u16()),
    })
}

/// Thin wrapper over a shared `reqwest::Client` bound to one endpoint.
///
/// No timeout and no retries: a request resolves whenever the transport
/// says it does.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: Client,
    endpoint: String,
}

impl WebhookClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn submit(&self, payload: &SegmentPayload) -> Result<(), SubmitError> {
        let result = self.send(payload).await;
        match &result {
            Ok(()) => info!(
                endpoint = %self.endpoint,
                segment = %payload.segment_name,
                rows = payload.schema.len(),
                "segment sent to webhook"
            ),
            Err(err) => error!(endpoint = %self.endpoint, "error sending segment to webhook: {err:?}"),
        }
        result
    }

    /// Run one full Saving cycle for `editor`. `None` when the editor refused
    /// to start (closed, or already saving).
    pub async fn save(&self, editor: &mut SegmentEditor) -> Option<Result<(), SubmitError>> {
        let payload = editor.begin_submit()?;
        let result = self.submit(&payload).await;
        editor.finish_submit(result.clone());
        Some(result)
    }

    async fn send(&self, payload: &SegmentPayload) -> Result<(), SubmitError> {
        let response = self.http.post(&self.endpoint).json(payload).send().await?;
        check_status(response.status())
    }
}

impl Default for WebhookClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}
