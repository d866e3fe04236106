//! Tooltip trigger wrapping
//!
//! A tooltip never owns or mutates its trigger. [`Tooltip::wrap`] takes the
//! trigger's existing handlers and returns a new set where each callback runs
//! the trigger's own handler first and then updates tooltip visibility.
//!
//! Visibility is time driven: an enter (or focus) arms the tooltip, and the
//! frame loop's [`Tooltip::tick`] opens it once `open_delay_ms` has elapsed.
//! Leave and blur close it immediately.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Trigger callback, receives the event timestamp in milliseconds
pub type Handler = Arc<dyn Fn(u64) + Send + Sync>;

/// Optional interaction callbacks of a trigger element
#[derive(Clone, Default)]
pub struct EventHandlers {
    pub on_pointer_enter: Option<Handler>,
    pub on_pointer_leave: Option<Handler>,
    pub on_focus: Option<Handler>,
    pub on_blur: Option<Handler>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_pointer_enter<F: Fn(u64) + Send + Sync + 'static>(mut self, f: F) -> Self {
        self.on_pointer_enter = Some(Arc::new(f));
        self
    }

    pub fn on_pointer_leave<F: Fn(u64) + Send + Sync + 'static>(mut self, f: F) -> Self {
        self.on_pointer_leave = Some(Arc::new(f));
        self
    }

    pub fn on_focus<F: Fn(u64) + Send + Sync + 'static>(mut self, f: F) -> Self {
        self.on_focus = Some(Arc::new(f));
        self
    }

    pub fn on_blur<F: Fn(u64) + Send + Sync + 'static>(mut self, f: F) -> Self {
        self.on_blur = Some(Arc::new(f));
        self
    }

    pub fn pointer_enter(&self, now: u64) {
        if let Some(handler) = &self.on_pointer_enter {
            handler(now);
        }
    }

    pub fn pointer_leave(&self, now: u64) {
        if let Some(handler) = &self.on_pointer_leave {
            handler(now);
        }
    }

    pub fn focus(&self, now: u64) {
        if let Some(handler) = &self.on_focus {
            handler(now);
        }
    }

    pub fn blur(&self, now: u64) {
        if let Some(handler) = &self.on_blur {
            handler(now);
        }
    }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlers")
            .field("on_pointer_enter", &self.on_pointer_enter.is_some())
            .field("on_pointer_leave", &self.on_pointer_leave.is_some())
            .field("on_focus", &self.on_focus.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .finish()
    }
}

/// Side where the tooltip appears relative to the trigger
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TooltipSide {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Default)]
struct Visibility {
    armed_at: Option<u64>,
    visible: bool,
}

/// Tooltip attached to a trigger element
#[derive(Clone)]
pub struct Tooltip {
    text: String,
    side: TooltipSide,
    open_delay_ms: u64,
    visibility: Arc<Mutex<Visibility>>,
}

impl Tooltip {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            side: TooltipSide::Top,
            open_delay_ms: 400,
            visibility: Arc::new(Mutex::new(Visibility::default())),
        }
    }

    pub fn side(mut self, side: TooltipSide) -> Self {
        self.side = side;
        self
    }

    pub fn open_delay_ms(mut self, delay: u64) -> Self {
        self.open_delay_ms = delay;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn placement(&self) -> TooltipSide {
        self.side
    }

    pub fn is_visible(&self) -> bool {
        self.lock().visible
    }

    /// Chain tooltip behaviour after the trigger's own handlers
    pub fn wrap(&self, child: EventHandlers) -> EventHandlers {
        let arm = {
            let tooltip = self.clone();
            move |now| tooltip.arm(now)
        };
        let close = {
            let tooltip = self.clone();
            move |_| tooltip.close()
        };

        EventHandlers {
            on_pointer_enter: Some(chain(child.on_pointer_enter, arm.clone())),
            on_pointer_leave: Some(chain(child.on_pointer_leave, close.clone())),
            on_focus: Some(chain(child.on_focus, arm)),
            on_blur: Some(chain(child.on_blur, close)),
        }
    }

    /// Advance time; returns whether the tooltip is visible
    pub fn tick(&self, now: u64) -> bool {
        let mut vis = self.lock();
        if let Some(armed_at) = vis.armed_at {
            if now.saturating_sub(armed_at) >= self.open_delay_ms {
                vis.armed_at = None;
                vis.visible = true;
                tracing::trace!("Tooltip - opened \"{}\"", self.text);
            }
        }
        vis.visible
    }

    fn arm(&self, now: u64) {
        let mut vis = self.lock();
        if !vis.visible && vis.armed_at.is_none() {
            vis.armed_at = Some(now);
        }
    }

    fn close(&self) {
        let mut vis = self.lock();
        vis.armed_at = None;
        vis.visible = false;
    }

    fn lock(&self) -> MutexGuard<'_, Visibility> {
        self.visibility.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl fmt::Debug for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tooltip")
            .field("text", &self.text)
            .field("side", &self.side)
            .field("open_delay_ms", &self.open_delay_ms)
            .finish()
    }
}

fn chain<F>(child: Option<Handler>, then: F) -> Handler
where
    F: Fn(u64) + Send + Sync + 'static,
{
    Arc::new(move |now| {
        if let Some(handler) = &child {
            handler(now);
        }
        then(now);
    })
}
