//! Collaboration boundary: outbound local pointer moves, inbound remote cursors.
//!
//! The transport and its wire protocol belong to the host. The render keeps
//! one [`Collab`] that forwards local pointer positions to an attached
//! [`CollabTransport`] and tracks which `Pointer` shape stands for which
//! remote user (keyed by email).

#[cfg(test)]
#[path = "collab_test.rs"]
mod collab_test;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CollabError;
use crate::events::PointerPosition;
use crate::scene::ShapeId;
use crate::shape::{PointerProps, ShapeProps};

/// An already-connected real-time channel supplied by the host.
pub trait CollabTransport {
    fn send_pointer(&mut self, message: &PointerMessage) -> Result<(), CollabError>;
}

/// One pointer position, sent out for the local user and received for remote ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerMessage {
    pub pointer: PointerPosition,
    pub email: String,
}

/// A remote user known to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: String,
    pub name: String,
    pub color: String,
    pub email: String,
}

#[derive(Default)]
pub struct Collab {
    transport: Option<Box<dyn CollabTransport>>,
    local_email: Option<String>,
    collaborators: HashMap<String, Collaborator>,
    pointers: HashMap<String, ShapeId>,
}

impl fmt::Debug for Collab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collab")
            .field("attached", &self.transport.is_some())
            .field("local_email", &self.local_email)
            .field("collaborators", &self.collaborators.len())
            .field("pointers", &self.pointers.len())
            .finish()
    }
}

impl Collab {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, transport: Box<dyn CollabTransport>) {
        self.transport = Some(transport);
    }

    pub fn detach(&mut self) -> Option<Box<dyn CollabTransport>> {
        self.transport.take()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.transport.is_some()
    }

    pub fn set_local_user(&mut self, email: Option<String>) {
        self.local_email = email;
    }

    #[must_use]
    pub fn local_user(&self) -> Option<&str> {
        self.local_email.as_deref()
    }

    /// Forward a local pointer move. Needs both a transport and a local user;
    /// send failures are logged and dropped.
    pub fn broadcast(&mut self, pointer: PointerPosition) -> bool {
        let (Some(transport), Some(email)) = (self.transport.as_mut(), self.local_email.as_ref()) else {
            return false;
        };
        let message = PointerMessage { pointer, email: email.clone() };
        match transport.send_pointer(&message) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, email = %message.email, "pointer broadcast failed");
                false
            }
        }
    }

    pub fn add_collaborator(&mut self, collaborator: Collaborator) {
        self.collaborators.insert(collaborator.email.clone(), collaborator);
    }

    #[must_use]
    pub fn collaborator(&self, email: &str) -> Option<&Collaborator> {
        self.collaborators.get(email)
    }

    pub fn collaborators(&self) -> impl Iterator<Item = &Collaborator> {
        self.collaborators.values()
    }

    /// Forget a collaborator; returns its pointer shape so the caller can destroy it.
    pub fn remove_collaborator(&mut self, email: &str) -> Option<ShapeId> {
        self.collaborators.remove(email);
        self.pointers.remove(email)
    }

    /// Whether `message` came from the local user echoing back.
    #[must_use]
    pub fn is_local(&self, message: &PointerMessage) -> bool {
        self.local_email.as_deref() == Some(message.email.as_str())
    }

    #[must_use]
    pub fn pointer_for(&self, email: &str) -> Option<ShapeId> {
        self.pointers.get(email).copied()
    }

    pub fn track_pointer(&mut self, email: &str, id: ShapeId) {
        self.pointers.insert(email.to_string(), id);
    }

    /// Drop the mapping for a pointer shape that left the scene.
    pub fn forget_pointer(&mut self, id: ShapeId) {
        self.pointers.retain(|_, pointer| *pointer != id);
    }

    /// Props for a new remote cursor, named and colored from the registry.
    #[must_use]
    pub fn pointer_props(&self, message: &PointerMessage) -> PointerProps {
        let known = self.collaborators.get(&message.email);
        let defaults = PointerProps::default();
        PointerProps {
            shape: ShapeProps { dragging: false, ..ShapeProps::at(message.pointer.relative.x, message.pointer.relative.y) },
            color: known.map_or(defaults.color, |c| c.color.clone()),
            name: known.map(|c| c.name.clone()),
            email: Some(message.email.clone()),
            ..PointerProps::default()
        }
    }
}
