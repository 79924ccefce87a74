use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::repository::ImageLookup;

/// In-memory catalog of exoplanet image URLs, loaded once at startup from a
/// JSON manifest.
#[derive(Debug, Default)]
pub struct ImageCatalog {
    images: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ImageMapping {
    name: String,
    image: String,
}

impl ImageCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a manifest file: a JSON list of `{ "name", "image" }` objects.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let mappings: Vec<ImageMapping> = serde_json::from_str(raw)?;
        let images = mappings.into_iter().map(|m| (m.name, m.image)).collect();
        Ok(Self { images })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Exact lookup first, case-insensitive fallback second — archive names
    /// vary in casing across releases.
    pub fn url_for(&self, name: &str) -> Option<String> {
        if let Some(url) = self.images.get(name) {
            return Some(url.clone());
        }
        self.images
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, url)| url.clone())
    }
}

impl ImageLookup for Arc<ImageCatalog> {
    fn url_for(&self, name: &str) -> Option<String> {
        ImageCatalog::url_for(self, name)
    }
}
