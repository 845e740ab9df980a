use std::time::Duration;

use reqwest::{header, Client, StatusCode, Url};

use crate::domain::SubmissionPayload;

#[derive(Debug)]
pub struct ContactClient {
    http_client: Client,
    endpoint: Url,
}

/// What the endpoint answered. The body is shown to the user verbatim, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactReply {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Invalid contact endpoint: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Failed to build contact client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Failed to send contact request: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Failed to read contact response: {0}")]
    Body(#[source] reqwest::Error),
}

impl ContactClient {
    pub fn new(
        base_url: &str,
        endpoint_path: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, SubmissionError> {
        let endpoint = Url::parse(base_url)?.join(endpoint_path)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().map_err(SubmissionError::Client)?;
        Ok(ContactClient {
            http_client,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    #[tracing::instrument(
        name = "Sending contact form",
        skip(self, payload),
        fields(endpoint = %self.endpoint)
    )]
    pub async fn send(&self, payload: &SubmissionPayload) -> Result<ContactReply, SubmissionError> {
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(SubmissionError::Request)?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "Contact endpoint answered with a non-success status");
        }
        let body = response.text().await.map_err(SubmissionError::Body)?;
        Ok(ContactReply { status, body })
    }
}
