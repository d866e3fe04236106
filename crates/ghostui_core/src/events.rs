//! Global event listeners
//!
//! Models the host's document-level listener registry: pointer events and
//! storage-change notifications are delivered here, and services attach
//! callbacks for the duration of their mount.

use crate::error::{HostError, Result};
use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::sync::{Arc, RwLock};

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const RESIZE: EventType = 40;
    /// Durable storage changed in another context of the same origin
    pub const STORAGE: EventType = 90;
}

/// A global event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    /// Milliseconds on the host's monotonic clock
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer {
        x: f32,
        y: f32,
        button: u8,
    },
    Storage {
        key: String,
        old_value: Option<String>,
        new_value: Option<String>,
    },
    Resize {
        width: f32,
        height: f32,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData, timestamp: u64) -> Self {
        Self {
            event_type,
            data,
            timestamp,
        }
    }

    pub fn pointer_move(x: f32, y: f32, timestamp: u64) -> Self {
        Self::new(
            event_types::POINTER_MOVE,
            EventData::Pointer { x, y, button: 0 },
            timestamp,
        )
    }

    pub fn pointer_down(x: f32, y: f32, timestamp: u64) -> Self {
        Self::new(
            event_types::POINTER_DOWN,
            EventData::Pointer { x, y, button: 0 },
            timestamp,
        )
    }

    pub fn pointer_up(x: f32, y: f32, timestamp: u64) -> Self {
        Self::new(
            event_types::POINTER_UP,
            EventData::Pointer { x, y, button: 0 },
            timestamp,
        )
    }

    pub fn storage(key: impl Into<String>, old_value: Option<String>, new_value: Option<String>) -> Self {
        Self::new(
            event_types::STORAGE,
            EventData::Storage {
                key: key.into(),
                old_value,
                new_value,
            },
            0,
        )
    }

    pub fn resize(width: f32, height: f32, timestamp: u64) -> Self {
        Self::new(
            event_types::RESIZE,
            EventData::Resize { width, height },
            timestamp,
        )
    }
}

new_key_type! {
    /// Handle returned when attaching a global listener
    pub struct ListenerId;
}

/// Listener callback type
pub type Listener = Arc<dyn Fn(&Event) + Send + Sync>;

/// Document-level listener registry for one browsing context
pub struct GlobalListeners {
    handlers: RwLock<SlotMap<ListenerId, (EventType, Listener)>>,
    unsupported: FxHashSet<EventType>,
}

impl GlobalListeners {
    pub fn new() -> Self {
        Self::with_unsupported(std::iter::empty())
    }

    /// Create a registry for a host that cannot deliver the given event types
    pub fn with_unsupported(unsupported: impl IntoIterator<Item = EventType>) -> Self {
        Self {
            handlers: RwLock::new(SlotMap::with_key()),
            unsupported: unsupported.into_iter().collect(),
        }
    }

    /// Whether the host can deliver this event type
    pub fn supports(&self, event_type: EventType) -> bool {
        !self.unsupported.contains(&event_type)
    }

    /// Attach a listener for an event type
    pub fn add_listener<F>(&self, event_type: EventType, listener: F) -> Result<ListenerId>
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        if !self.supports(event_type) {
            return Err(HostError::Unsupported(event_type));
        }
        let id = self
            .handlers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert((event_type, Arc::new(listener)));
        tracing::trace!("attached listener {:?} for event type {}", id, event_type);
        Ok(id)
    }

    /// Detach a listener. Unknown ids are ignored.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let removed = self
            .handlers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id)
            .is_some();
        if removed {
            tracing::trace!("detached listener {:?}", id);
        }
        removed
    }

    /// Deliver an event to every listener attached for its type.
    ///
    /// Handlers run against a snapshot, so they may attach or detach listeners
    /// (including themselves) while the event is delivered. Returns the number
    /// of handlers invoked.
    pub fn dispatch(&self, event: &Event) -> usize {
        let snapshot: SmallVec<[Listener; 4]> = self
            .handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|(event_type, _)| *event_type == event.event_type)
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in &snapshot {
            listener(event);
        }
        snapshot.len()
    }

    /// Total number of attached listeners
    pub fn listener_count(&self) -> usize {
        self.handlers.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Number of listeners attached for one event type
    pub fn listener_count_for(&self, event_type: EventType) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|(t, _)| *t == event_type)
            .count()
    }
}

impl Default for GlobalListeners {
    fn default() -> Self {
        Self::new()
    }
}
