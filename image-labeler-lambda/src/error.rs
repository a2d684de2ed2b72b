/// Error returned by the recognition and record store collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid upload notification: {0}")]
    Input(String),
    #[error("label detection failed for s3://{bucket}/{key}")]
    Recognition {
        bucket: String,
        key: String,
        #[source]
        source: BoxError,
    },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("{operation} failed for image {key} in table {table}")]
    Store {
        operation: &'static str,
        table: String,
        key: String,
        #[source]
        source: BoxError,
    },
}
