use crate::{
    labels::{ImageRecord, IMAGE_ATTRIBUTE},
    BoxError,
};
use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex, MutexGuard},
};

/// Table of image records keyed by the `Image` attribute.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Creates or replaces the item for `image`, carrying only its key.
    async fn put_image(&self, table: &str, image: &str) -> Result<(), BoxError>;

    /// Sets one string attribute on the item for `image` and returns the
    /// attributes the update changed.
    async fn set_attribute(
        &self,
        table: &str,
        image: &str,
        name: &str,
        value: &str,
    ) -> Result<ImageRecord, BoxError>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    async fn put_image(&self, table: &str, image: &str) -> Result<(), BoxError> {
        self.as_ref().put_image(table, image).await
    }

    async fn set_attribute(
        &self,
        table: &str,
        image: &str,
        name: &str,
        value: &str,
    ) -> Result<ImageRecord, BoxError> {
        self.as_ref().set_attribute(table, image, name, value).await
    }
}

#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: aws_sdk_dynamodb::Client,
}

impl DynamoStore {
    pub fn new(client: aws_sdk_dynamodb::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordStore for DynamoStore {
    async fn put_image(&self, table: &str, image: &str) -> Result<(), BoxError> {
        self.client
            .put_item()
            .table_name(table)
            .item(IMAGE_ATTRIBUTE, AttributeValue::S(image.to_string()))
            .send()
            .await?;
        Ok(())
    }

    async fn set_attribute(
        &self,
        table: &str,
        image: &str,
        name: &str,
        value: &str,
    ) -> Result<ImageRecord, BoxError> {
        let output = self
            .client
            .update_item()
            .table_name(table)
            .key(IMAGE_ATTRIBUTE, AttributeValue::S(image.to_string()))
            .update_expression("SET #attr = :r")
            .expression_attribute_names("#attr", name)
            .expression_attribute_values(":r", AttributeValue::S(value.to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await?;

        Ok(output
            .attributes()
            .map(string_attributes)
            .unwrap_or_default())
    }
}

fn string_attributes(item: &HashMap<String, AttributeValue>) -> ImageRecord {
    item.iter()
        .filter_map(|(name, value)| {
            value
                .as_s()
                .ok()
                .map(|value| (name.as_str(), value.as_str()))
        })
        .collect()
}

type Tables = BTreeMap<String, BTreeMap<String, ImageRecord>>;

/// Record store held in process memory, keyed by table then image.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, table: &str, image: &str) -> Option<ImageRecord> {
        self.lock()
            .get(table)
            .and_then(|records| records.get(image))
            .cloned()
    }

    pub fn records(&self, table: &str) -> BTreeMap<String, ImageRecord> {
        self.lock().get(table).cloned().unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // every mutation is a single insert
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn put_image(&self, table: &str, image: &str) -> Result<(), BoxError> {
        self.lock()
            .entry(table.to_string())
            .or_default()
            .insert(image.to_string(), ImageRecord::new(image));
        Ok(())
    }

    async fn set_attribute(
        &self,
        table: &str,
        image: &str,
        name: &str,
        value: &str,
    ) -> Result<ImageRecord, BoxError> {
        let mut tables = self.lock();
        let record = tables
            .entry(table.to_string())
            .or_default()
            .entry(image.to_string())
            .or_insert_with(|| ImageRecord::new(image));
        record.set(name, value);

        Ok(ImageRecord::from_iter([(name, value)]))
    }
}
