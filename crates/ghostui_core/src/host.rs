//! Host environment handle
//!
//! A [`HostContext`] bundles everything a service may touch in one browsing
//! context: the global listener registry, durable storage (if any), the
//! document style scope and the input capabilities detected at startup.
//! Cloning is cheap; clones share the same underlying context.

use crate::events::{event_types, Event, EventType, GlobalListeners};
use crate::storage::{MemoryStorage, Storage};
use crate::style::StyleScope;
use std::sync::Arc;

/// Input modality of the primary pointing device
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputCapabilities {
    /// Primary pointer is imprecise (finger)
    pub coarse_pointer: bool,
    /// Primary pointer can hover
    pub hover: bool,
}

impl InputCapabilities {
    pub const MOUSE: InputCapabilities = InputCapabilities {
        coarse_pointer: false,
        hover: true,
    };

    pub const TOUCH: InputCapabilities = InputCapabilities {
        coarse_pointer: true,
        hover: false,
    };

    /// Coarse pointer without hover capability
    pub fn is_touch_primary(&self) -> bool {
        self.coarse_pointer && !self.hover
    }
}

impl Default for InputCapabilities {
    fn default() -> Self {
        Self::MOUSE
    }
}

/// One browsing context
#[derive(Clone)]
pub struct HostContext {
    listeners: Arc<GlobalListeners>,
    storage: Option<Arc<dyn Storage>>,
    style: Arc<StyleScope>,
    input: InputCapabilities,
}

impl HostContext {
    pub fn builder() -> HostContextBuilder {
        HostContextBuilder::default()
    }

    /// A context with no storage and no event delivery (non-browser evaluation)
    pub fn detached() -> Self {
        Self::builder()
            .unsupported_events([
                event_types::POINTER_DOWN,
                event_types::POINTER_UP,
                event_types::POINTER_MOVE,
                event_types::STORAGE,
                event_types::RESIZE,
            ])
            .build()
    }

    pub fn listeners(&self) -> &Arc<GlobalListeners> {
        &self.listeners
    }

    pub fn storage(&self) -> Option<&Arc<dyn Storage>> {
        self.storage.as_ref()
    }

    pub fn style(&self) -> &Arc<StyleScope> {
        &self.style
    }

    pub fn input(&self) -> InputCapabilities {
        self.input
    }

    /// Deliver an event as the host would
    pub fn dispatch(&self, event: &Event) -> usize {
        self.listeners.dispatch(event)
    }
}

/// Builder for [`HostContext`]
#[derive(Default)]
pub struct HostContextBuilder {
    storage: Option<Arc<dyn Storage>>,
    memory_origin: Option<Arc<MemoryStorage>>,
    style: Option<Arc<StyleScope>>,
    input: InputCapabilities,
    unsupported: Vec<EventType>,
}

impl HostContextBuilder {
    /// Use a custom storage backend
    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self.memory_origin = None;
        self
    }

    /// Join a shared in-memory origin; this context receives change
    /// notifications for writes made by other contexts
    pub fn memory_storage(mut self, origin: &Arc<MemoryStorage>) -> Self {
        self.memory_origin = Some(Arc::clone(origin));
        self.storage = None;
        self
    }

    pub fn style(mut self, style: Arc<StyleScope>) -> Self {
        self.style = Some(style);
        self
    }

    pub fn input(mut self, input: InputCapabilities) -> Self {
        self.input = input;
        self
    }

    /// Event types this host cannot deliver
    pub fn unsupported_events(mut self, events: impl IntoIterator<Item = EventType>) -> Self {
        self.unsupported.extend(events);
        self
    }

    pub fn build(self) -> HostContext {
        let listeners = Arc::new(GlobalListeners::with_unsupported(self.unsupported));
        let storage = match self.memory_origin {
            Some(origin) => Some(origin.attach(&listeners) as Arc<dyn Storage>),
            None => self.storage,
        };
        HostContext {
            listeners,
            storage,
            style: self.style.unwrap_or_default(),
            input: self.input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_detection() {
        assert!(InputCapabilities::TOUCH.is_touch_primary());
        assert!(!InputCapabilities::MOUSE.is_touch_primary());
        // Stylus-style coarse pointer that can still hover
        let hybrid = InputCapabilities {
            coarse_pointer: true,
            hover: true,
        };
        assert!(!hybrid.is_touch_primary());
    }

    #[test]
    fn test_detached_context_has_no_storage_or_events() {
        let host = HostContext::detached();
        assert!(host.storage().is_none());
        assert!(!host.listeners().supports(event_types::POINTER_MOVE));
        assert!(!host.listeners().supports(event_types::STORAGE));
    }
}
