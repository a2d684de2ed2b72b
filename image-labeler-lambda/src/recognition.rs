use crate::{
    labels::{DetectRequest, Label},
    BoxError,
};
use async_trait::async_trait;
use aws_sdk_rekognition::types::{Image, S3Object};
use std::sync::Arc;

/// Label detection for images already stored in a bucket.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Returns labels in the order the service ranked them.
    async fn detect_labels(&self, request: &DetectRequest) -> Result<Vec<Label>, BoxError>;
}

#[async_trait]
impl<T: Recognizer + ?Sized> Recognizer for Arc<T> {
    async fn detect_labels(&self, request: &DetectRequest) -> Result<Vec<Label>, BoxError> {
        self.as_ref().detect_labels(request).await
    }
}

#[derive(Debug, Clone)]
pub struct Rekognition {
    client: aws_sdk_rekognition::Client,
}

impl Rekognition {
    pub fn new(client: aws_sdk_rekognition::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Recognizer for Rekognition {
    #[tracing::instrument(skip(self), fields(location = %request.location))]
    async fn detect_labels(&self, request: &DetectRequest) -> Result<Vec<Label>, BoxError> {
        let image = Image::builder()
            .s3_object(
                S3Object::builder()
                    .bucket(&request.location.bucket)
                    .name(&request.location.key)
                    .build(),
            )
            .build();

        let output = self
            .client
            .detect_labels()
            .image(image)
            .max_labels(i32::try_from(request.max_labels)?)
            .min_confidence(request.min_confidence)
            .send()
            .await?;

        let labels = output
            .labels()
            .iter()
            .filter_map(|label| {
                label
                    .name()
                    .map(|name| Label::new(name, label.confidence().unwrap_or_default()))
            })
            .collect::<Vec<_>>();

        tracing::debug!(count = labels.len(), "labels detected");
        Ok(labels)
    }
}
