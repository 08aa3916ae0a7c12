//! Managers: the only paths that mutate the render's registries.
//!
//! [`RenderManager`] owns child and transformer membership. [`ShapeManager`]
//! attaches and detaches the components a single shape owns (body velocity
//! and controller). Both borrow the render for the duration of one call chain.

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;

use crate::controller::{Controller, ControllerId, ControllerProps};
use crate::engine::Render;
use crate::input::InputState;
use crate::scene::ShapeId;
use crate::shape::Shape;
use crate::transformer::Transformer;
use crate::vector::Vector;
use crate::velocity::BodyVelocity;

pub struct RenderManager<'a> {
    render: &'a mut Render,
}

impl<'a> RenderManager<'a> {
    pub(crate) fn new(render: &'a mut Render) -> Self {
        Self { render }
    }

    /// Insert into the child registry without announcing it. A shape already
    /// registered under the same id is replaced and returned.
    pub fn add_child(&mut self, shape: Shape) -> Option<Shape> {
        self.render.scene.insert(shape)
    }

    /// Take a shape out of the registry. Use [`Render::destroy_shape`] to
    /// also drop selection, drag and controller references.
    pub fn remove_child(&mut self, id: ShapeId) -> Option<Shape> {
        self.render.scene.remove(&id)
    }

    /// Make `transformer` the active one, releasing the previous selection.
    /// Nodes the new transformer already holds are selected in the scene.
    pub fn set_transformer(&mut self, mut transformer: Transformer) -> Option<Transformer> {
        let previous = self.clear_transformer();
        let nodes = transformer.nodes().to_vec();
        transformer.set_nodes(&mut self.render.scene, &nodes);
        self.render.transformer = Some(transformer);
        previous
    }

    /// Remove the active transformer, deselecting everything it held.
    pub fn clear_transformer(&mut self) -> Option<Transformer> {
        let mut previous = self.render.transformer.take()?;
        previous.clear(&mut self.render.scene);
        if self.render.input == InputState::Transforming {
            self.render.input = InputState::Idle;
        }
        Some(previous)
    }
}

/// Component attachment for one shape. Every operation is a no-op returning
/// `false`/`None` when the shape is gone.
pub struct ShapeManager<'a> {
    render: &'a mut Render,
    id: ShapeId,
}

impl<'a> ShapeManager<'a> {
    pub(crate) fn new(render: &'a mut Render, id: ShapeId) -> Self {
        Self { render, id }
    }

    #[must_use]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    fn shape(&mut self) -> Option<&mut Shape> {
        self.render.scene.get_mut(&self.id)
    }

    /// Constant per-tick motion. Does nothing if the shape already has a velocity.
    pub fn body_velocity(&mut self, direction: Vector, speed: f64) -> bool {
        self.attach_velocity(BodyVelocity::new(direction, speed))
    }

    /// A velocity that chases the pointer on every move.
    pub fn hover_velocity(&mut self) -> bool {
        self.attach_velocity(BodyVelocity::hovering())
    }

    fn attach_velocity(&mut self, velocity: BodyVelocity) -> bool {
        let Some(shape) = self.shape() else {
            return false;
        };
        if shape.body_velocity.is_some() {
            return false;
        }
        shape.body_velocity = Some(velocity);
        true
    }

    pub fn remove_body_velocity(&mut self) -> bool {
        self.shape().is_some_and(|s| s.body_velocity.take().is_some())
    }

    /// Build a controller and bind it. Only sprites take one; an existing
    /// controller is replaced.
    pub fn controller(&mut self, props: ControllerProps) -> Option<ControllerId> {
        let controller = Controller::new(props, self.render.config.physics());
        let id = controller.id();
        self.attach(controller).then_some(id)
    }

    pub(crate) fn attach(&mut self, mut controller: Controller) -> bool {
        let Some(sprite) = self.render.scene.get_mut(&self.id).and_then(Shape::as_sprite_mut) else {
            return false;
        };
        let previous = sprite.controller.replace(controller.id());
        if let Some(mut replaced) = previous.and_then(|old| self.render.controllers.remove(&old)) {
            replaced.unbind();
        }
        controller.bind(self.id);
        tracing::debug!(shape_id = %self.id, controller_id = %controller.id(), "controller attached");
        self.render.controllers.insert(controller.id(), controller);
        true
    }

    /// Unbind and drop the shape's controller, putting the sprite back on
    /// its own pattern.
    pub fn remove_controller(&mut self) -> bool {
        let Some(shape) = self.render.scene.get_mut(&self.id) else {
            return false;
        };
        let Some(controller_id) = shape.as_sprite_mut().and_then(|s| s.controller.take()) else {
            return false;
        };
        shape.restore_pattern();
        if let Some(mut controller) = self.render.controllers.remove(&controller_id) {
            controller.unbind();
        }
        tracing::debug!(shape_id = %self.id, %controller_id, "controller removed");
        true
    }
}
