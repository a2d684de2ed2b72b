use crate::Error;
use aws_lambda_events::event::s3::{S3Event, S3EventRecord};
use std::fmt;

/// Bucket and decoded key of one uploaded object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadLocation {
    pub bucket: String,
    pub key: String,
}

impl fmt::Display for UploadLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

impl TryFrom<&S3EventRecord> for UploadLocation {
    type Error = Error;

    fn try_from(record: &S3EventRecord) -> Result<Self, Self::Error> {
        let bucket = record
            .s3
            .bucket
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::Input("record is missing s3.bucket.name".to_string()))?;
        let key = record
            .s3
            .object
            .key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Input("record is missing s3.object.key".to_string()))?;

        Ok(Self {
            bucket: bucket.to_string(),
            key: decode_key(key)?,
        })
    }
}

/// Extracts every upload location in notification order.
///
/// Fails if the notification has no records or any record lacks a bucket or key.
pub fn locations(event: &S3Event) -> Result<Vec<UploadLocation>, Error> {
    if event.records.is_empty() {
        return Err(Error::Input("notification contains no records".to_string()));
    }
    event.records.iter().map(UploadLocation::try_from).collect()
}

// Keys in S3 notifications are form encoded: spaces arrive as '+'.
fn decode_key(key: &str) -> Result<String, Error> {
    urlencoding::decode(&key.replace('+', " "))
        .map(|decoded| decoded.into_owned())
        .map_err(|e| Error::Input(format!("unable to decode key {key}: {e}")))
}
