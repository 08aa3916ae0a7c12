//! Raw data: the flat, JSON-shaped record of a shape.
//!
//! Records are internally tagged by `type` and carry the shape id plus the
//! same camelCase fields the `*Props` constructors accept, so a record is
//! also a valid creation payload. A sprite embeds its bound controller.
//!
//! ```json
//! {"type":"rect","id":"…","position":{"x":10,"y":20},"zIndex":0,"rotation":0,
//!  "dragging":true,"visible":true,"mask":false,"width":100,"height":50,
//!  "color":"white","borderWidth":0,"borderColor":"transparent"}
//! ```

#[cfg(test)]
#[path = "raw_test.rs"]
mod raw_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::controller::ControllerRecord;
use crate::error::EngineError;
use crate::scene::ShapeId;
use crate::shape::{
    Arrow, ArrowProps, Circle, CircleProps, Pointer, PointerProps, Rect, RectProps, Shape, ShapeKind, ShapeProps,
    Sprite, SpriteProps,
};

const KNOWN_TYPES: [&str; 5] = ["rect", "circle", "sprite", "arrow", "pointer"];

/// Id plus kind-specific props.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<P> {
    #[serde(default = "Uuid::new_v4")]
    pub id: ShapeId,
    #[serde(flatten)]
    pub props: P,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: ShapeId,
    #[serde(flatten)]
    pub props: SpriteProps,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<ControllerRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeRecord {
    Rect(Record<RectProps>),
    Circle(Record<CircleProps>),
    Sprite(SpriteRecord),
    Arrow(Record<ArrowProps>),
    Pointer(Record<PointerProps>),
}

impl ShapeRecord {
    /// Record for `shape`, embedding `controller` when it is a sprite.
    #[must_use]
    pub fn from_shape(shape: &Shape, controller: Option<ControllerRecord>) -> Self {
        let mut common = shape.props();
        // Selection is not persisted, so neither is the drag lock it implies.
        common.dragging = shape.dragging || shape.is_selected();
        let id = shape.id();
        match &shape.kind {
            ShapeKind::Rect(r) => Self::Rect(Record { id, props: r.props(common) }),
            ShapeKind::Circle(c) => Self::Circle(Record { id, props: c.props(common) }),
            ShapeKind::Sprite(s) => Self::Sprite(SpriteRecord { id, props: s.props(common), controller }),
            ShapeKind::Arrow(a) => Self::Arrow(Record { id, props: a.props(common) }),
            ShapeKind::Pointer(p) => Self::Pointer(Record { id, props: p.props(common) }),
        }
    }

    /// Decode one untyped record, telling an unknown `type` apart from a
    /// known type with bad fields.
    pub fn from_value(value: Value) -> Result<Self, EngineError> {
        let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();
        if !KNOWN_TYPES.contains(&kind) {
            return Err(EngineError::UnknownShapeType(kind.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    #[must_use]
    pub fn id(&self) -> ShapeId {
        match self {
            Self::Rect(r) => r.id,
            Self::Circle(r) => r.id,
            Self::Sprite(r) => r.id,
            Self::Arrow(r) => r.id,
            Self::Pointer(r) => r.id,
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Rect(_) => "rect",
            Self::Circle(_) => "circle",
            Self::Sprite(_) => "sprite",
            Self::Arrow(_) => "arrow",
            Self::Pointer(_) => "pointer",
        }
    }

    /// Embedded controller of a sprite record.
    #[must_use]
    pub fn controller(&self) -> Option<&ControllerRecord> {
        match self {
            Self::Sprite(r) => r.controller.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn shape_props(&self) -> &ShapeProps {
        match self {
            Self::Rect(r) => &r.props.shape,
            Self::Circle(r) => &r.props.shape,
            Self::Sprite(r) => &r.props.shape,
            Self::Arrow(r) => &r.props.shape,
            Self::Pointer(r) => &r.props.shape,
        }
    }

    /// Rebuild an unregistered shape keeping the recorded id.
    #[must_use]
    pub fn into_shape(self) -> Shape {
        let common = self.shape_props().clone();
        let id = self.id();
        let kind = match self {
            Self::Rect(r) => ShapeKind::Rect(Rect::new(&r.props)),
            Self::Circle(r) => ShapeKind::Circle(Circle::new(&r.props)),
            Self::Sprite(r) => ShapeKind::Sprite(Box::new(Sprite::new(&r.props))),
            Self::Arrow(r) => ShapeKind::Arrow(Arrow::new(&r.props)),
            Self::Pointer(r) => ShapeKind::Pointer(Pointer::new(&r.props)),
        };
        Shape::new(common, kind).with_id(id)
    }
}

impl Shape {
    /// Raw data without a controller; the render embeds one when bound.
    #[must_use]
    pub fn raw_data(&self) -> ShapeRecord {
        ShapeRecord::from_shape(self, None)
    }

    #[must_use]
    pub fn from_raw(record: ShapeRecord) -> Shape {
        record.into_shape()
    }
}
