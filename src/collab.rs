//! Collaboration events for relaying annotation changes to other viewers.
//!
//! The transport (e.g. a WebSocket relay) lives outside this crate; it
//! receives events through an [`EventSink`] handed to the input state.

use crate::draw::Annotation;
use log::{debug, warn};
use serde::Serialize;
use std::sync::mpsc::{self, Receiver, Sender};

/// A change other viewers need to mirror.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "annotation")]
pub enum CollabEvent {
    /// A stroke was completed
    #[serde(rename = "annotation-created")]
    Created(Annotation),
    /// A stroke was removed by undo
    #[serde(rename = "annotation-deleted")]
    Deleted(Annotation),
    /// Every stroke was removed
    #[serde(rename = "annotations-cleared")]
    Cleared,
}

impl CollabEvent {
    /// Event name as seen by the relay.
    pub fn name(&self) -> &'static str {
        match self {
            CollabEvent::Created(_) => "annotation-created",
            CollabEvent::Deleted(_) => "annotation-deleted",
            CollabEvent::Cleared => "annotations-cleared",
        }
    }

    /// JSON payload `{ "type": name, "annotation": ... }`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|err| {
            warn!("Failed to serialise {} event: {}", self.name(), err);
            serde_json::json!({ "type": self.name() })
        })
    }
}

/// Receiver of collaboration events.
pub trait EventSink {
    fn emit(&mut self, event: CollabEvent);
}

/// Sink that drops every event (single-viewer sessions).
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, event: CollabEvent) {
        debug!("Dropping {} event (no relay attached)", event.name());
    }
}

/// Sink forwarding events over a channel to a relay thread.
#[derive(Debug)]
pub struct ChannelSink {
    tx: Sender<CollabEvent>,
    disconnected: bool,
}

impl ChannelSink {
    /// Creates a sink and the receiving end for the relay.
    pub fn channel() -> (Self, Receiver<CollabEvent>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                tx,
                disconnected: false,
            },
            rx,
        )
    }
}

impl EventSink for ChannelSink {
    fn emit(&mut self, event: CollabEvent) {
        if self.disconnected {
            return;
        }
        if self.tx.send(event).is_err() {
            warn!("Collaboration relay disconnected; further events are dropped");
            self.disconnected = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Point, StrokeStyle};
    use crate::input::Tool;

    fn sample() -> Annotation {
        Annotation::begin(
            "a".into(),
            Tool::Pen,
            Point::new(1.0, 2.0),
            &StrokeStyle::default(),
            "host",
            5,
        )
    }

    #[test]
    fn payload_carries_name_and_annotation() {
        let payload = CollabEvent::Created(sample()).to_json();
        assert_eq!(payload["type"], "annotation-created");
        assert_eq!(payload["annotation"]["id"], "a");

        let cleared = CollabEvent::Cleared.to_json();
        assert_eq!(cleared["type"], "annotations-cleared");
        assert!(cleared.get("annotation").is_none());
    }

    #[test]
    fn channel_sink_forwards_until_receiver_drops() {
        let (mut sink, rx) = ChannelSink::channel();
        sink.emit(CollabEvent::Deleted(sample()));
        assert_eq!(rx.try_recv().unwrap().name(), "annotation-deleted");

        drop(rx);
        sink.emit(CollabEvent::Cleared);
        assert!(sink.disconnected);
    }
}
