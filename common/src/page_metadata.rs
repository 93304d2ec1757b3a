//! Page ordering and descriptive metadata extracted from a volume's hOCR document.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ManifestInput {
    /// Keys with the namespace prefix stripped, in document order.
    pub metadata: Vec<MetadataField>,
    pub pages: Vec<PageEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    pub id: String,
    /// 1-based position of the page in the volume.
    pub ordinal: u32,
}

impl ManifestInput {
    /// A repeated key keeps its first position and takes the latest value.
    pub fn insert_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.metadata.iter_mut().find(|field| field.key == key) {
            Some(field) => field.value = value,
            None => self.metadata.push(MetadataField { key, value }),
        }
    }

    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|field| field.key == key)
            .map(|field| field.value.as_str())
    }

    pub fn title(&self) -> Option<&str> {
        self.get_metadata("title")
    }
}

impl PageEntry {
    pub fn new(id: impl Into<String>, ordinal: u32) -> Self {
        Self { id: id.into(), ordinal }
    }

    /// Zero-based index used by the image server's file naming.
    pub fn image_index(&self) -> u32 {
        self.ordinal.saturating_sub(1)
    }
}
