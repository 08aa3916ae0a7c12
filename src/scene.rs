//! Child registry: every live shape owned by a render.
//!
//! Shapes are keyed by id. Each insertion stamps a monotonically increasing
//! sequence number so draw order can break `z_index` ties by insertion order,
//! which a hash map alone can't provide. Only the render mutates the registry
//! (through its manager); shapes never touch it themselves.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::HashMap;

use uuid::Uuid;

use crate::shape::Shape;

/// Unique identifier for a shape, stable for its whole life.
pub type ShapeId = Uuid;

#[derive(Debug, Default)]
pub struct Scene {
    children: HashMap<ShapeId, Shape>,
    next_seq: u64,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shape. A shape already registered under the same id is
    /// replaced and returned; the newcomer takes a fresh insertion slot.
    pub fn insert(&mut self, mut shape: Shape) -> Option<Shape> {
        shape.seq = self.next_seq;
        self.next_seq += 1;
        self.children.insert(shape.id, shape)
    }

    pub fn remove(&mut self, id: &ShapeId) -> Option<Shape> {
        self.children.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.children.get(id)
    }

    pub fn get_mut(&mut self, id: &ShapeId) -> Option<&mut Shape> {
        self.children.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &ShapeId) -> bool {
        self.children.contains_key(id)
    }

    /// Ids in draw order: ascending `z_index`, insertion order on ties.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<ShapeId> {
        self.sorted().into_iter().map(|s| s.id).collect()
    }

    /// Shapes in draw order: ascending `z_index`, insertion order on ties.
    #[must_use]
    pub fn sorted(&self) -> Vec<&Shape> {
        let mut shapes: Vec<&Shape> = self.children.values().collect();
        shapes.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.seq.cmp(&b.seq)));
        shapes
    }

    /// Shapes in insertion order, ignoring `z_index`.
    #[must_use]
    pub fn insertion_order(&self) -> Vec<&Shape> {
        let mut shapes: Vec<&Shape> = self.children.values().collect();
        shapes.sort_by_key(|s| s.seq);
        shapes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.children.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Shape> {
        self.children.values_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
