use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;

use super::*;
use crate::vector::Vector;

/// Transport that records every message, optionally failing.
struct Recorder {
    sent: Rc<RefCell<Vec<PointerMessage>>>,
    fail: bool,
}

impl CollabTransport for Recorder {
    fn send_pointer(&mut self, message: &PointerMessage) -> Result<(), CollabError> {
        if self.fail {
            return Err(CollabError::Closed);
        }
        self.sent.borrow_mut().push(message.clone());
        Ok(())
    }
}

fn recorder(fail: bool) -> (Box<Recorder>, Rc<RefCell<Vec<PointerMessage>>>) {
    let sent = Rc::new(RefCell::new(Vec::new()));
    (Box::new(Recorder { sent: Rc::clone(&sent), fail }), sent)
}

fn at(x: f64, y: f64) -> PointerPosition {
    PointerPosition { absolute: Vector::new(x + 8.0, y + 8.0), relative: Vector::new(x, y) }
}

fn ada() -> Collaborator {
    Collaborator { id: "u1".into(), name: "Ada".into(), color: "tomato".into(), email: "ada@example.com".into() }
}

// =============================================================
// Broadcast
// =============================================================

#[test]
fn broadcast_needs_transport_and_user() {
    let mut collab = Collab::new();
    assert!(!collab.broadcast(at(1.0, 2.0)));

    let (transport, sent) = recorder(false);
    collab.attach(transport);
    assert!(!collab.broadcast(at(1.0, 2.0)));

    collab.set_local_user(Some("me@example.com".into()));
    assert!(collab.broadcast(at(1.0, 2.0)));
    let sent = sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].email, "me@example.com");
    assert_eq!(sent[0].pointer, at(1.0, 2.0));
}

#[test]
fn send_failure_is_swallowed() {
    let mut collab = Collab::new();
    let (transport, sent) = recorder(true);
    collab.attach(transport);
    collab.set_local_user(Some("me@example.com".into()));
    assert!(!collab.broadcast(at(0.0, 0.0)));
    assert!(sent.borrow().is_empty());
}

#[test]
fn detach_stops_broadcast() {
    let mut collab = Collab::new();
    let (transport, _) = recorder(false);
    collab.attach(transport);
    assert!(collab.is_attached());
    assert!(collab.detach().is_some());
    assert!(!collab.is_attached());
    collab.set_local_user(Some("me@example.com".into()));
    assert!(!collab.broadcast(at(0.0, 0.0)));
}

// =============================================================
// Remote pointers
// =============================================================

#[test]
fn pointer_props_use_registry() {
    let mut collab = Collab::new();
    collab.add_collaborator(ada());
    let msg = PointerMessage { pointer: at(30.0, 40.0), email: "ada@example.com".into() };
    let props = collab.pointer_props(&msg);
    assert_eq!(props.shape.position, Vector::new(30.0, 40.0));
    assert_eq!(props.color, "tomato");
    assert_eq!(props.name.as_deref(), Some("Ada"));
    assert_eq!(props.email.as_deref(), Some("ada@example.com"));
    assert!(!props.shape.dragging);
}

#[test]
fn unknown_sender_gets_default_look() {
    let collab = Collab::new();
    let msg = PointerMessage { pointer: at(0.0, 0.0), email: "who@example.com".into() };
    let props = collab.pointer_props(&msg);
    assert_eq!(props.color, "white");
    assert_eq!(props.name, None);
}

#[test]
fn local_echo_is_detected() {
    let mut collab = Collab::new();
    collab.set_local_user(Some("me@example.com".into()));
    assert!(collab.is_local(&PointerMessage { pointer: at(0.0, 0.0), email: "me@example.com".into() }));
    assert!(!collab.is_local(&PointerMessage { pointer: at(0.0, 0.0), email: "ada@example.com".into() }));
}

#[test]
fn remove_collaborator_returns_pointer() {
    let mut collab = Collab::new();
    collab.add_collaborator(ada());
    let id = Uuid::new_v4();
    collab.track_pointer("ada@example.com", id);
    assert_eq!(collab.pointer_for("ada@example.com"), Some(id));
    assert_eq!(collab.remove_collaborator("ada@example.com"), Some(id));
    assert!(collab.collaborator("ada@example.com").is_none());
    assert_eq!(collab.pointer_for("ada@example.com"), None);
}

#[test]
fn forget_pointer_drops_mapping() {
    let mut collab = Collab::new();
    let id = Uuid::new_v4();
    collab.track_pointer("ada@example.com", id);
    collab.forget_pointer(id);
    assert_eq!(collab.pointer_for("ada@example.com"), None);
}

#[test]
fn message_wire_shape() {
    let msg = PointerMessage { pointer: at(1.0, 2.0), email: "a@b.c".into() };
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["email"], "a@b.c");
    assert_eq!(json["pointer"]["relative"]["x"], 1.0);
    assert_eq!(json["pointer"]["absolute"]["y"], 10.0);
}
