use crate::{
    labels::{self, DetectRequest},
    notification::{self, UploadLocation},
    recognition::{Recognizer, Rekognition},
    settings::Settings,
    store::{DynamoStore, RecordStore},
    Error,
};
use aws_config::{BehaviorVersion, Region};
use aws_lambda_events::event::s3::S3Event;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub struct Handler<R, S> {
    recognizer: R,
    store: S,
    settings: Settings,
}

/// Which records of a notification get processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Every record, in notification order.
    #[default]
    EveryRecord,
    /// Only the last record; the others are still validated.
    LastRecord,
}

impl<S: RecordStore> Handler<Rekognition, S> {
    /// Builds the recognition client from `settings`. Called once per process.
    pub async fn with_store(settings: Settings, store: S) -> Self {
        let sdk_config = load_sdk_config(&settings).await;
        let recognizer = Rekognition::new(aws_sdk_rekognition::Client::new(&sdk_config));
        Self::new(recognizer, store, settings)
    }
}

impl Handler<Rekognition, DynamoStore> {
    /// Builds both AWS clients from `settings`. Called once per process.
    pub async fn from_settings(settings: Settings) -> Self {
        let sdk_config = load_sdk_config(&settings).await;
        let recognizer = Rekognition::new(aws_sdk_rekognition::Client::new(&sdk_config));
        let store = DynamoStore::new(aws_sdk_dynamodb::Client::new(&sdk_config));
        Self::new(recognizer, store, settings)
    }
}

impl<R: Recognizer, S: RecordStore> Handler<R, S> {
    pub fn new(recognizer: R, store: S, settings: Settings) -> Self {
        Self {
            recognizer,
            store,
            settings,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub async fn handle(&self, event: &S3Event) -> Result<(), Error> {
        let locations = notification::locations(event)?;
        tracing::debug!(
            records = locations.len(),
            mode = ?self.settings.mode,
            "handling notification"
        );

        match self.settings.mode {
            Mode::EveryRecord => {
                for location in &locations {
                    self.process(location).await?;
                }
                Ok(())
            }
            Mode::LastRecord => match locations.last() {
                Some(location) => self.process(location).await,
                None => Ok(()),
            },
        }
    }

    pub async fn process(&self, location: &UploadLocation) -> Result<(), Error> {
        tracing::info!(
            bucket = %location.bucket,
            key = %location.key,
            "detected image in s3"
        );

        let request = DetectRequest::new(location.clone());
        let labels = self
            .recognizer
            .detect_labels(&request)
            .await
            .map_err(|source| Error::Recognition {
                bucket: location.bucket.clone(),
                key: location.key.clone(),
                source,
            })?;

        let table = self.settings.table()?;
        let store_error = |operation: &'static str| {
            move |source| Error::Store {
                operation,
                table: table.to_string(),
                key: location.key.clone(),
                source,
            }
        };

        self.store
            .put_image(table, &location.key)
            .await
            .map_err(store_error("put_item"))?;

        for (attribute, name) in labels::assignments(&labels) {
            let updated = self
                .store
                .set_attribute(table, &location.key, &attribute, name)
                .await
                .map_err(store_error("update_item"))?;
            tracing::debug!(key = %location.key, ?updated, "image record updated");
        }

        Ok(())
    }
}

async fn load_sdk_config(settings: &Settings) -> aws_config::SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).retry_config(settings.retry_config());

    if let Some(region) = &settings.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &settings.endpoint {
        loader = loader.endpoint_url(endpoint);
    }
    loader.load().await
}
