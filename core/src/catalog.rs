use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhotoId(String);

impl PhotoId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PhotoId {
    fn from(value: &str) -> Self {
        Self::new(value.trim())
    }
}

impl<'de> Deserialize<'de> for PhotoId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        let id = match RawId::deserialize(deserializer)? {
            RawId::Text(text) => text.trim().to_string(),
            RawId::Number(number) => number.to_string(),
        };
        Ok(Self(id))
    }
}

/// A single photo as supplied by the page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: PhotoId,
    #[serde(alias = "displayUrl")]
    pub display_url: String,
    #[serde(default, alias = "previewUrl")]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub caption: String,
    #[serde(default, alias = "attributionName")]
    pub attribution_name: Option<String>,
    #[serde(default, alias = "displayTimestamp")]
    pub display_timestamp: Option<String>,
}

impl PhotoRecord {
    pub fn new(id: impl Into<String>, display_url: impl Into<String>) -> Self {
        Self {
            id: PhotoId::new(id),
            display_url: display_url.into(),
            preview_url: None,
            caption: String::new(),
            attribution_name: None,
            display_timestamp: None,
        }
    }

    pub fn with_preview(mut self, preview_url: impl Into<String>) -> Self {
        self.preview_url = Some(preview_url.into());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn with_attribution(mut self, name: impl Into<String>) -> Self {
        self.attribution_name = Some(name.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.display_timestamp = Some(timestamp.into());
        self
    }

    /// Thumbnail rendition, or the full image when no preview exists.
    pub fn preview_src(&self) -> &str {
        match self.preview_url.as_deref() {
            Some(preview) if !preview.trim().is_empty() => preview,
            _ => &self.display_url,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("photo data is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("duplicate photo id {0}")]
    DuplicateId(PhotoId),
}

/// Read-only, ordered set of photos available to the lightbox.
///
/// Insertion order is display order. Records are never added or removed
/// after construction; a reload is required to pick up new uploads.
#[derive(Clone, Debug, Default)]
pub struct PhotoCatalog {
    records: Vec<PhotoRecord>,
    index: HashMap<PhotoId, usize>,
}

impl PhotoCatalog {
    pub fn new(records: Vec<PhotoRecord>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records, index })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses the embedded page payload. Blank input is an empty catalog.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::empty());
        }
        let records: Option<Vec<PhotoRecord>> = serde_json::from_str(raw)?;
        Self::new(records.unwrap_or_default())
    }

    pub fn size(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn index_of(&self, id: &PhotoId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Panics when `index >= size()`; bounds are the caller's job.
    pub fn at(&self, index: usize) -> &PhotoRecord {
        &self.records[index]
    }

    pub fn get(&self, index: usize) -> Option<&PhotoRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhotoRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_are_normalized_to_text() {
        let catalog = PhotoCatalog::from_json(r#"[{"id": 7, "display_url": "a.jpg"}]"#)
            .expect("catalog");
        assert_eq!(catalog.index_of(&PhotoId::new("7")), Some(0));
    }

    #[test]
    fn camel_case_keys_are_accepted() {
        let catalog = PhotoCatalog::from_json(
            r#"[{"id": "p1", "displayUrl": "full.jpg", "previewUrl": "thumb.jpg",
                 "attributionName": "Ana", "displayTimestamp": "May 4, 18:02"}]"#,
        )
        .expect("catalog");
        let record = catalog.at(0);
        assert_eq!(record.preview_src(), "thumb.jpg");
        assert_eq!(record.attribution_name.as_deref(), Some("Ana"));
        assert_eq!(record.display_timestamp.as_deref(), Some("May 4, 18:02"));
        assert_eq!(record.caption, "");
    }

    #[test]
    fn blank_preview_falls_back_to_display_url() {
        let record = PhotoRecord::new("p1", "full.jpg").with_preview("  ");
        assert_eq!(record.preview_src(), "full.jpg");
    }

    #[test]
    fn null_payload_is_empty() {
        let catalog = PhotoCatalog::from_json("null").expect("catalog");
        assert!(catalog.is_empty());
    }
}
