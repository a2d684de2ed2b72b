use crate::notification::UploadLocation;
use serde::Serialize;
use std::collections::BTreeMap;

/// Most labels requested from recognition, and most attributes written per image.
pub const MAX_LABELS: usize = 10;
/// Minimum confidence, in percent, for a label to be returned.
pub const MIN_CONFIDENCE: f32 = 60.0;
/// Partition key attribute of the image table.
pub const IMAGE_ATTRIBUTE: &str = "Image";

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub name: String,
    pub confidence: f32,
}

impl Label {
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// A label detection request for one stored object.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectRequest {
    pub location: UploadLocation,
    pub max_labels: usize,
    pub min_confidence: f32,
}

impl DetectRequest {
    pub fn new(location: UploadLocation) -> Self {
        Self {
            location,
            max_labels: MAX_LABELS,
            min_confidence: MIN_CONFIDENCE,
        }
    }
}

/// Attribute holding the label at 1-indexed `position`.
pub fn attribute_name(position: usize) -> String {
    format!("object{position}")
}

/// Attribute assignments for `labels`, in recognition order.
pub fn assignments<'a>(labels: &'a [Label]) -> impl Iterator<Item = (String, &'a str)> + 'a {
    labels
        .iter()
        .take(MAX_LABELS)
        .enumerate()
        .map(|(index, label)| (attribute_name(index + 1), label.name.as_str()))
}

/// Flat string attributes of one image item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImageRecord(BTreeMap<String, String>);

impl ImageRecord {
    pub fn new(image: &str) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(IMAGE_ATTRIBUTE.to_string(), image.to_string());
        Self(attributes)
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ImageRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}
