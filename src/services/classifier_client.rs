use crate::config::ClassifierConfig;
use crate::models::classify_types::{ClassificationResult, ErrorBody};
use crate::models::image_types::SelectedImage;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Multipart field the service reads the upload from.
pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("invalid client configuration: {0}")]
    Config(String),
    #[error("could not attach the image to the request: {0}")]
    Request(String),
    #[error("{message}")]
    Status { status: StatusCode, message: String },
    #[error("could not reach the classification service")]
    Network(#[source] reqwest::Error),
    #[error("the classification service returned an unexpected response: {0}")]
    InvalidResponse(String),
}

#[derive(Clone, Debug)]
pub struct ClassifierClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl ClassifierClient {
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassifyError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| ClassifyError::Config(format!("endpoint {}: {}", config.endpoint, e)))?;

        // No timeout: the request waits on the network stack's own limits.
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ClassifyError::Config(e.to_string()))?;

        Ok(ClassifierClient { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one image and interpret the response.
    pub async fn classify(&self, image: &SelectedImage) -> Result<ClassificationResult, ClassifyError> {
        let part = Part::stream_with_length(Body::from(image.bytes.clone()), image.size() as u64)
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| ClassifyError::Request(e.to_string()))?;
        let form = Form::new().part(IMAGE_FIELD, part);

        info!(
            endpoint = %self.endpoint,
            file = %image.file_name,
            bytes = image.size(),
            "submitting image for classification"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "classification request failed");
                ClassifyError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            // A body that can't be read is treated like one without a detail.
            let body = response.bytes().await.unwrap_or_default();
            let message = error_message(status, &body);
            warn!(status = status.as_u16(), %message, "classification service returned an error");
            return Err(ClassifyError::Status { status, message });
        }

        let body = response.bytes().await.map_err(ClassifyError::Network)?;
        let result: ClassificationResult = serde_json::from_slice(&body)
            .map_err(|e| ClassifyError::InvalidResponse(e.to_string()))?;

        debug!(
            class = %result.predicted_class,
            confidence = result.confidence,
            "classification succeeded"
        );
        Ok(result)
    }
}

/// User-facing message for a non-2xx response: the body's `detail` string
/// when present, otherwise the status line.
pub fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_detail)
        .unwrap_or_else(|| status_message(status))
}

fn status_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("HTTP error: {} {}", status.as_u16(), reason),
        None => format!("HTTP error: {}", status.as_u16()),
    }
}
