//! Shape factory bound to a render.
//!
//! Every constructor registers the new shape, fires `create` before
//! returning, and hands back the shape's id.

#[cfg(test)]
#[path = "creator_test.rs"]
mod creator_test;

use crate::engine::Render;
use crate::scene::ShapeId;
use crate::shape::{
    Arrow, ArrowProps, Circle, CircleProps, Pointer, PointerProps, Rect, RectProps, Shape, ShapeKind, Sprite,
    SpriteProps,
};
use crate::transformer::Transformer;
use crate::vector::Vector;

pub struct Creator<'a> {
    render: &'a mut Render,
}

impl<'a> Creator<'a> {
    pub(crate) fn new(render: &'a mut Render) -> Self {
        Self { render }
    }

    pub fn rect(&mut self, props: RectProps) -> ShapeId {
        let kind = ShapeKind::Rect(Rect::new(&props));
        self.render.register(Shape::new(props.shape, kind))
    }

    pub fn circle(&mut self, props: CircleProps) -> ShapeId {
        let kind = ShapeKind::Circle(Circle::new(&props));
        self.render.register(Shape::new(props.shape, kind))
    }

    /// The sprite's image is queued for the host to load.
    pub fn sprite(&mut self, props: SpriteProps) -> ShapeId {
        let kind = ShapeKind::Sprite(Box::new(Sprite::new(&props)));
        self.render.register(Shape::new(props.shape, kind))
    }

    pub fn arrow(&mut self, props: ArrowProps) -> ShapeId {
        let kind = ShapeKind::Arrow(Arrow::new(&props));
        self.render.register(Shape::new(props.shape, kind))
    }

    /// Collaborator cursors are never persisted.
    pub fn pointer(&mut self, props: PointerProps) -> ShapeId {
        let kind = ShapeKind::Pointer(Pointer::new(&props));
        self.render.register(Shape::new(props.shape, kind))
    }

    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn vector(&self, x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    /// A transformer tuned by the render's config. Activate it with
    /// [`RenderManager::set_transformer`](crate::manager::RenderManager::set_transformer).
    #[must_use]
    pub fn transformer(&self) -> Transformer {
        Transformer::new(self.render.config.transformer_settings())
    }

    /// Register a copy of `id` at the same place with a fresh id. Velocity,
    /// controller and selection are not copied.
    pub fn duplicate(&mut self, id: ShapeId) -> Option<ShapeId> {
        let copy = self.render.scene.get(&id)?.duplicate();
        Some(self.render.register(copy))
    }
}
