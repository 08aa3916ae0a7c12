//! Persistence port for serialized scenes.
//!
//! The engine never picks a storage medium. Hosts hand a [`SceneStore`] to
//! [`Render::save_to`](crate::engine::Render::save_to) and
//! [`Render::load_from`](crate::engine::Render::load_from); the browser
//! binding ships a `localStorage` store and [`MemoryStore`] serves headless
//! hosts and tests.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use serde_json::Value;

use crate::error::StorageError;
use crate::raw::ShapeRecord;

pub trait SceneStore {
    /// Stored records, untyped so each one can fail on its own. An empty
    /// store yields an empty list.
    fn load(&self) -> Result<Vec<Value>, StorageError>;
    fn save(&mut self, records: &[ShapeRecord]) -> Result<(), StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// Keeps the last saved scene as a JSON string.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    data: Option<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with raw JSON, as a host would find it in storage.
    #[must_use]
    pub fn with_json(json: impl Into<String>) -> Self {
        Self { data: Some(json.into()) }
    }

    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

impl SceneStore for MemoryStore {
    fn load(&self) -> Result<Vec<Value>, StorageError> {
        match &self.data {
            Some(json) => decode_scene(json),
            None => Ok(Vec::new()),
        }
    }

    fn save(&mut self, records: &[ShapeRecord]) -> Result<(), StorageError> {
        self.data = Some(encode_scene(records)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.data = None;
        Ok(())
    }
}

/// Serialize a scene to the stored JSON array.
pub fn encode_scene(records: &[ShapeRecord]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(records)?)
}

/// Parse a stored JSON array into untyped records.
pub fn decode_scene(json: &str) -> Result<Vec<Value>, StorageError> {
    Ok(serde_json::from_str(json)?)
}
