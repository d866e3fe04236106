//! Cursor effect provider
//!
//! One provider per mounted tree. It owns the pointer-tracking state and the
//! directory of registered elements:
//!
//! - pointer moves are coalesced by a [`Throttle`] and applied at most once per
//!   window, always with the latest sample
//! - each applied sample updates velocity, the zone theme and every element's
//!   proximity/hover flags
//! - presses open a short click window and spawn capped click waves
//! - [`CursorEffectProvider::tick`] is driven by the frame loop to flush due
//!   samples and expire transient state
//!
//! On touch-primary hosts (when configured) or hosts without pointer events
//! the provider is inert: registration still works, nothing is tracked.

use crate::compose::{compose_effect, ElementEffect};
use crate::config::{CursorEffectConfig, ResolvedCursorConfig};
use crate::element::{ElementId, ElementNode, ElementOptions, RegisteredElement};
use crate::state::CursorState;
use crate::theme::{CursorTheme, CursorThemeMode};
use crate::throttle::Throttle;
use crate::velocity::VelocityTracker;
use crate::waves::{WaveQueue, WaveRecord};
use ghostui_core::{
    event_types, Event, EventData, EventType, GlobalListeners, HostContext, ListenerId, Point, Size,
};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, Weak};

new_key_type! {
    /// Handle for a cursor state subscription
    pub struct CursorSubscriptionId;
}

/// Cursor state callback, invoked after every applied update
pub type CursorListener = Arc<dyn Fn(&CursorState) + Send + Sync>;

/// Pointer events the provider needs; all or nothing
const POINTER_EVENTS: [EventType; 3] = [
    event_types::POINTER_MOVE,
    event_types::POINTER_DOWN,
    event_types::POINTER_UP,
];

struct Tracking {
    state: CursorState,
    /// Pending samples keep the time they arrived
    throttle: Throttle<(Point, u64)>,
    velocity: VelocityTracker,
    waves: WaveQueue,
    trail: VecDeque<Point>,
    viewport: Size,
    /// A sample has been applied at least once
    has_pointer: bool,
    click_until: Option<u64>,
    last_applied_at: Option<u64>,
}

/// Cursor effect provider
pub struct CursorEffectProvider {
    config: ResolvedCursorConfig,
    tracking: Mutex<Tracking>,
    listeners: Arc<GlobalListeners>,
    attached: Mutex<SmallVec<[ListenerId; 4]>>,
    inert: AtomicBool,
    subscribers: RwLock<SlotMap<CursorSubscriptionId, CursorListener>>,
}

impl CursorEffectProvider {
    /// Mount a provider on a host context
    pub fn mount(host: &HostContext, config: &CursorEffectConfig, viewport: Size) -> Arc<Self> {
        let config = config.resolve();
        let initial_theme = match config.theme {
            CursorThemeMode::Fixed(theme) => theme,
            CursorThemeMode::Auto => CursorTheme::default(),
        };

        let provider = Arc::new(Self {
            tracking: Mutex::new(Tracking {
                state: CursorState {
                    current_theme: initial_theme,
                    ..CursorState::default()
                },
                throttle: Throttle::new(config.throttle_ms),
                velocity: VelocityTracker::new(),
                waves: WaveQueue::new(config.max_waves),
                trail: VecDeque::with_capacity(config.trail_length),
                viewport,
                has_pointer: false,
                click_until: None,
                last_applied_at: None,
            }),
            config,
            listeners: Arc::clone(host.listeners()),
            attached: Mutex::new(SmallVec::new()),
            inert: AtomicBool::new(false),
            subscribers: RwLock::new(SlotMap::with_key()),
        });

        if provider.config.disable_on_mobile && host.input().is_touch_primary() {
            tracing::debug!("CursorEffectProvider::mount - touch-primary host, effects disabled");
            provider.inert.store(true, Ordering::SeqCst);
            return provider;
        }

        if let Err(err) = provider.attach_listeners() {
            tracing::warn!("CursorEffectProvider::mount - pointer events unavailable: {}", err);
            provider.detach_listeners();
            provider.inert.store(true, Ordering::SeqCst);
        }

        provider
    }

    fn attach_listeners(self: &Arc<Self>) -> ghostui_core::error::Result<()> {
        for event_type in POINTER_EVENTS {
            let weak = Arc::downgrade(self);
            let id = self.listeners.add_listener(event_type, move |event| {
                if let Some(provider) = weak.upgrade() {
                    provider.handle_event(event);
                }
            })?;
            self.attached_ids().push(id);
        }

        // Resize only keeps zones and bounds fresh; optional
        let weak: Weak<Self> = Arc::downgrade(self);
        match self.listeners.add_listener(event_types::RESIZE, move |event| {
            if let Some(provider) = weak.upgrade() {
                provider.handle_event(event);
            }
        }) {
            Ok(id) => self.attached_ids().push(id),
            Err(err) => tracing::debug!("CursorEffectProvider - no resize tracking: {}", err),
        }
        Ok(())
    }

    fn detach_listeners(&self) {
        let ids: SmallVec<[ListenerId; 4]> = std::mem::take(&mut *self.attached_ids());
        for id in ids {
            self.listeners.remove_listener(id);
        }
    }

    /// Detach every listener. Safe to call more than once.
    pub fn unmount(&self) {
        self.detach_listeners();
        tracing::debug!("CursorEffectProvider::unmount");
    }

    /// Whether the provider ignores pointer input
    pub fn is_inert(&self) -> bool {
        self.inert.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &ResolvedCursorConfig {
        &self.config
    }

    // ========== Element Registry ==========

    /// Register (or replace) an element.
    ///
    /// Bounds are measured now; flags reflect the last known pointer position.
    pub fn register_element<N>(&self, id: impl Into<ElementId>, node: &Arc<N>, options: ElementOptions)
    where
        N: ElementNode + 'static,
    {
        let weak: Weak<dyn ElementNode> = Arc::downgrade(node) as Weak<dyn ElementNode>;
        self.register_weak(id, weak, options);
    }

    /// Register from an existing weak node reference
    pub fn register_weak(&self, id: impl Into<ElementId>, node: Weak<dyn ElementNode>, options: ElementOptions) {
        let id = id.into();
        let mut element = RegisteredElement::new(id.clone(), node, options, self.config.proximity_radius);

        let mut tracking = self.lock_tracking();
        let pointer = tracking.has_pointer.then_some(tracking.state.position);
        element.update(pointer);
        if tracking.state.elements.insert(id.clone(), element).is_some() {
            tracing::debug!("CursorEffectProvider - replaced element {}", id);
        } else {
            tracing::trace!("CursorEffectProvider - registered element {}", id);
        }
    }

    /// Remove an element. Unknown ids are ignored.
    pub fn unregister_element(&self, id: &ElementId) -> bool {
        let removed = self.lock_tracking().state.elements.remove(id).is_some();
        if removed {
            tracing::trace!("CursorEffectProvider - unregistered element {}", id);
        }
        removed
    }

    /// Re-measure one element's bounds after a layout change
    pub fn refresh_bounds(&self, id: &ElementId) -> bool {
        let mut tracking = self.lock_tracking();
        let pointer = tracking.has_pointer.then_some(tracking.state.position);
        match tracking.state.elements.get_mut(id) {
            Some(element) => {
                let measured = element.measure();
                element.update(pointer);
                measured
            }
            None => false,
        }
    }

    /// Re-measure every element's bounds
    pub fn refresh_all_bounds(&self) {
        let mut tracking = self.lock_tracking();
        let pointer = tracking.has_pointer.then_some(tracking.state.position);
        for element in tracking.state.elements.values_mut() {
            element.measure();
            element.update(pointer);
        }
    }

    pub fn element(&self, id: &ElementId) -> Option<RegisteredElement> {
        self.lock_tracking().state.elements.get(id).cloned()
    }

    pub fn element_count(&self) -> usize {
        self.lock_tracking().state.elements.len()
    }

    // ========== Pointer Input ==========

    /// Route a host event
    pub fn handle_event(&self, event: &Event) {
        match (event.event_type, &event.data) {
            (event_types::POINTER_MOVE, EventData::Pointer { x, y, .. }) => {
                self.pointer_move(Point::new(*x, *y), event.timestamp);
            }
            (event_types::POINTER_DOWN, EventData::Pointer { x, y, .. }) => {
                self.pointer_down(Point::new(*x, *y), event.timestamp);
            }
            (event_types::POINTER_UP, EventData::Pointer { x, y, .. }) => {
                tracing::trace!("CursorEffectProvider - pointer up at ({}, {})", x, y);
            }
            (event_types::RESIZE, EventData::Resize { width, height }) => {
                self.set_viewport(Size::new(*width, *height));
                self.refresh_all_bounds();
            }
            _ => {}
        }
    }

    /// Feed a pointer-move sample through the throttle
    pub fn pointer_move(&self, position: Point, timestamp: u64) {
        if self.is_inert() {
            return;
        }
        let snapshot = {
            let mut tracking = self.lock_tracking();
            match tracking.throttle.push((position, timestamp), timestamp) {
                Some((sample, at)) => {
                    self.apply_sample(&mut tracking, sample, at, timestamp);
                    Some(tracking.state.clone())
                }
                None => None,
            }
        };
        if let Some(state) = snapshot {
            self.notify(&state);
        }
    }

    /// Register a press: opens the click window and spawns a wave
    pub fn pointer_down(&self, position: Point, timestamp: u64) {
        if self.is_inert() {
            return;
        }
        let snapshot = {
            let mut tracking = self.lock_tracking();
            tracking.state.is_clicking = true;
            tracking.click_until = Some(timestamp.saturating_add(self.config.click_window_ms));

            if self.config.effects.waves {
                let theme = self.theme_at(position, tracking.viewport);
                let evicted = tracking.waves.admit(
                    position,
                    timestamp,
                    self.config.wave_lifetime_ms,
                    self.config.wave_max_radius,
                    theme,
                );
                if let Some(wave) = evicted {
                    tracing::trace!("CursorEffectProvider - evicted wave {}", wave.id);
                }
            }
            tracing::debug!("CursorEffectProvider - press at ({}, {})", position.x, position.y);
            tracking.state.clone()
        };
        self.notify(&snapshot);
    }

    /// Advance time: flush a due sample, close the click window, expire waves
    /// and settle a pointer that stopped moving.
    ///
    /// Returns true while there is transient state that needs more frames.
    pub fn tick(&self, now: u64) -> bool {
        if self.is_inert() {
            return false;
        }
        let (animating, snapshot) = {
            let mut tracking = self.lock_tracking();
            let mut changed = false;

            if let Some((sample, at)) = tracking.throttle.poll(now) {
                self.apply_sample(&mut tracking, sample, at, now);
                changed = true;
            }

            if tracking.click_until.is_some_and(|until| now >= until) {
                tracking.click_until = None;
                tracking.state.is_clicking = false;
                changed = true;
            }

            if tracking.waves.prune(now) > 0 {
                changed = true;
            }

            let idle = tracking
                .last_applied_at
                .is_some_and(|at| now.saturating_sub(at) >= self.config.idle_after_ms);
            if idle && tracking.state.is_moving {
                tracking.velocity.settle();
                tracking.state.velocity = tracking.velocity.velocity();
                tracking.state.is_moving = false;
                changed = true;
            }

            let animating = !tracking.waves.is_empty()
                || tracking.throttle.has_pending()
                || tracking.state.is_clicking
                || tracking.state.is_moving;
            (animating, changed.then(|| tracking.state.clone()))
        };

        if let Some(state) = snapshot {
            self.notify(&state);
        }
        animating
    }

    /// Viewport size used to normalise zone positions
    pub fn set_viewport(&self, viewport: Size) {
        self.lock_tracking().viewport = viewport;
    }

    // ========== Queries ==========

    /// Snapshot of the current state
    pub fn state(&self) -> CursorState {
        self.lock_tracking().state.clone()
    }

    /// Active waves, oldest first
    pub fn waves(&self) -> Vec<WaveRecord> {
        self.lock_tracking().waves.iter().cloned().collect()
    }

    /// Recent applied positions, oldest first (empty when trails are off)
    pub fn trail(&self) -> Vec<Point> {
        self.lock_tracking().trail.iter().copied().collect()
    }

    /// Composed effect for every registered element, sorted by id
    pub fn effects(&self) -> Vec<(ElementId, ElementEffect)> {
        let tracking = self.lock_tracking();
        let mut effects: Vec<(ElementId, ElementEffect)> = tracking
            .state
            .elements
            .values()
            .map(|el| (el.id.clone(), compose_effect(el, &tracking.state, &self.config)))
            .collect();
        effects.sort_by(|a, b| a.0.cmp(&b.0));
        effects
    }

    // ========== Subscriptions ==========

    pub fn subscribe<F>(&self, listener: F) -> CursorSubscriptionId
    where
        F: Fn(&CursorState) + Send + Sync + 'static,
    {
        self.subscribers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(Arc::new(listener))
    }

    pub fn unsubscribe(&self, id: CursorSubscriptionId) -> bool {
        self.subscribers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id)
            .is_some()
    }

    // ========== Internals ==========

    fn lock_tracking(&self) -> MutexGuard<'_, Tracking> {
        self.tracking.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn attached_ids(&self) -> MutexGuard<'_, SmallVec<[ListenerId; 4]>> {
        self.attached.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn theme_at(&self, position: Point, viewport: Size) -> CursorTheme {
        match self.config.theme {
            CursorThemeMode::Fixed(theme) => theme,
            CursorThemeMode::Auto => self.config.zones.resolve(position, viewport),
        }
    }

    /// `sampled_at` is when the host reported the position, `applied_at` when
    /// the throttle released it
    fn apply_sample(&self, tracking: &mut Tracking, position: Point, sampled_at: u64, applied_at: u64) {
        let velocity = tracking.velocity.sample(position, sampled_at);
        let theme = self.theme_at(position, tracking.viewport);

        let state = &mut tracking.state;
        state.position = position;
        state.velocity = velocity;
        state.is_moving = velocity.magnitude > self.config.movement_epsilon;
        if state.current_theme != theme {
            tracing::debug!(
                "CursorEffectProvider - cursor theme {} -> {}",
                state.current_theme,
                theme
            );
            state.current_theme = theme;
        }

        tracking.has_pointer = true;
        tracking.last_applied_at = Some(applied_at);

        if self.config.effects.trail && self.config.trail_length > 0 {
            if tracking.trail.len() >= self.config.trail_length {
                tracking.trail.pop_front();
            }
            tracking.trail.push_back(position);
        }

        // Stable id snapshot; entries that vanish mid-pass are skipped
        let ids: SmallVec<[ElementId; 8]> = tracking.state.elements.keys().cloned().collect();
        for id in &ids {
            if let Some(element) = tracking.state.elements.get_mut(id) {
                element.update(Some(position));
            }
        }

        tracing::trace!(
            "CursorEffectProvider - applied ({}, {}) v={:.2} elements={}",
            position.x,
            position.y,
            velocity.magnitude,
            ids.len()
        );
    }

    fn notify(&self, state: &CursorState) {
        let subscribers: Vec<CursorListener> = self
            .subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect();
        for subscriber in subscribers {
            subscriber(state);
        }
    }
}

impl Drop for CursorEffectProvider {
    fn drop(&mut self) {
        self.detach_listeners();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::LayoutBox;
    use ghostui_core::{InputCapabilities, Rect};
    use std::sync::atomic::AtomicUsize;

    const VIEWPORT: Size = Size::new(1000.0, 900.0);

    fn mount(config: CursorEffectConfig) -> (HostContext, Arc<CursorEffectProvider>) {
        let host = HostContext::builder().build();
        let provider = CursorEffectProvider::mount(&host, &config, VIEWPORT);
        (host, provider)
    }

    #[test]
    fn test_attaches_each_pointer_listener_once() {
        let (host, provider) = mount(CursorEffectConfig::new());
        assert!(!provider.is_inert());
        for event_type in POINTER_EVENTS {
            assert_eq!(host.listeners().listener_count_for(event_type), 1);
        }
        assert_eq!(host.listeners().listener_count_for(event_types::RESIZE), 1);
    }

    #[test]
    fn test_touch_host_is_inert() {
        let host = HostContext::builder().input(InputCapabilities::TOUCH).build();
        let provider = CursorEffectProvider::mount(&host, &CursorEffectConfig::new(), VIEWPORT);
        assert!(provider.is_inert());
        assert_eq!(host.listeners().listener_count(), 0);

        provider.pointer_move(Point::new(5.0, 5.0), 0);
        provider.pointer_down(Point::new(5.0, 5.0), 0);
        assert!(!provider.tick(100));
        assert!(provider.waves().is_empty());
        assert_eq!(provider.state().position, Point::ZERO);
    }

    #[test]
    fn test_touch_host_tracks_when_not_disabled() {
        let host = HostContext::builder().input(InputCapabilities::TOUCH).build();
        let config = CursorEffectConfig::new().disable_on_mobile(false);
        let provider = CursorEffectProvider::mount(&host, &config, VIEWPORT);
        assert!(!provider.is_inert());
    }

    #[test]
    fn test_partial_attachment_is_rolled_back() {
        let host = HostContext::builder()
            .unsupported_events([event_types::POINTER_UP])
            .build();
        let provider = CursorEffectProvider::mount(&host, &CursorEffectConfig::new(), VIEWPORT);
        assert!(provider.is_inert());
        assert_eq!(host.listeners().listener_count(), 0);
    }

    #[test]
    fn test_missing_resize_support_is_tolerated() {
        let host = HostContext::builder()
            .unsupported_events([event_types::RESIZE])
            .build();
        let provider = CursorEffectProvider::mount(&host, &CursorEffectConfig::new(), VIEWPORT);
        assert!(!provider.is_inert());
        assert_eq!(host.listeners().listener_count(), 3);
    }

    #[test]
    fn test_click_window_closes_on_tick() {
        let (_host, provider) = mount(CursorEffectConfig::new());
        provider.pointer_down(Point::new(10.0, 10.0), 1000);
        assert!(provider.state().is_clicking);
        provider.tick(1100);
        assert!(provider.state().is_clicking);
        provider.tick(1150);
        assert!(!provider.state().is_clicking);
    }

    #[test]
    fn test_waves_disabled() {
        let config = CursorEffectConfig::new().effects(crate::config::EffectOverrides {
            waves: Some(false),
            ..Default::default()
        });
        let (_host, provider) = mount(config);
        provider.pointer_down(Point::new(10.0, 10.0), 0);
        assert!(provider.waves().is_empty());
        assert!(provider.state().is_clicking);
    }

    #[test]
    fn test_is_moving_settles_when_idle() {
        let (_host, provider) = mount(CursorEffectConfig::new().throttle_ms(0));
        provider.pointer_move(Point::new(0.0, 0.0), 0);
        provider.pointer_move(Point::new(40.0, 0.0), 16);
        assert!(provider.state().is_moving);

        provider.tick(50);
        assert!(provider.state().is_moving);
        provider.tick(116);
        let state = provider.state();
        assert!(!state.is_moving);
        assert_eq!(state.velocity.magnitude, 0.0);
    }

    #[test]
    fn test_jitter_below_epsilon_is_stationary() {
        let (_host, provider) = mount(CursorEffectConfig::new().throttle_ms(0));
        provider.pointer_move(Point::new(100.0, 100.0), 0);
        provider.pointer_move(Point::new(100.1, 100.0), 16);
        assert!(!provider.state().is_moving);
    }

    #[test]
    fn test_zone_theme_follows_pointer() {
        let (_host, provider) = mount(CursorEffectConfig::new().throttle_ms(0));
        provider.pointer_move(Point::new(10.0, 10.0), 0);
        assert_eq!(provider.state().current_theme, CursorTheme::Spectral);
        provider.pointer_move(Point::new(10.0, 890.0), 16);
        assert_eq!(provider.state().current_theme, CursorTheme::Blood);
    }

    #[test]
    fn test_fixed_theme_ignores_zones() {
        let config = CursorEffectConfig::new()
            .throttle_ms(0)
            .theme(CursorThemeMode::Fixed(CursorTheme::Void));
        let (_host, provider) = mount(config);
        assert_eq!(provider.state().current_theme, CursorTheme::Void);
        provider.pointer_move(Point::new(10.0, 890.0), 0);
        assert_eq!(provider.state().current_theme, CursorTheme::Void);
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut config = CursorEffectConfig::new().throttle_ms(0);
        config.trail_length = Some(3);
        let (_host, provider) = mount(config);
        for i in 0..5u64 {
            provider.pointer_move(Point::new(i as f32, 0.0), i * 16);
        }
        assert_eq!(
            provider.trail(),
            vec![Point::new(2.0, 0.0), Point::new(3.0, 0.0), Point::new(4.0, 0.0)]
        );
    }

    #[test]
    fn test_resize_refreshes_bounds() {
        let (host, provider) = mount(CursorEffectConfig::new());
        let node = LayoutBox::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        provider.register_element("card", &node, ElementOptions::default());

        node.set_rect(Rect::new(50.0, 50.0, 10.0, 10.0));
        assert_eq!(provider.element(&"card".into()).unwrap().bounds.x(), 0.0);

        host.dispatch(&Event::resize(800.0, 600.0, 0));
        assert_eq!(provider.element(&"card".into()).unwrap().bounds.x(), 50.0);
    }

    #[test]
    fn test_subscribers_see_applied_updates() {
        let (_host, provider) = mount(CursorEffectConfig::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let id = provider.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        provider.pointer_move(Point::new(1.0, 1.0), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        provider.tick(16);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(provider.unsubscribe(id));
        provider.pointer_down(Point::new(1.0, 1.0), 20);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_late_flush_keeps_sample_time() {
        let (_host, provider) = mount(CursorEffectConfig::new());
        provider.pointer_move(Point::new(0.0, 0.0), 0);
        provider.tick(16);

        provider.pointer_move(Point::new(100.0, 0.0), 100);
        // Frame loop flushes long after the sample arrived
        provider.tick(200);

        let state = provider.state();
        let expected = 100.0 * crate::velocity::FRAME_MS / 100.0;
        assert!((state.velocity.x - expected).abs() < 1e-3, "vx = {}", state.velocity.x);
        assert!(state.is_moving);
    }

    #[test]
    fn test_steady_stream_is_applied_at_full_rate() {
        let (_host, provider) = mount(CursorEffectConfig::new());
        let applied = Arc::new(AtomicUsize::new(0));
        let counter = applied.clone();
        provider.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        for i in 0..64u64 {
            provider.pointer_move(Point::new(i as f32, 0.0), i * 16);
        }

        // Only the burst-opening sample is coalesced away
        assert_eq!(applied.load(Ordering::SeqCst), 63);
        assert_eq!(provider.state().position, Point::new(63.0, 0.0));
    }

    #[test]
    fn test_huge_click_window_saturates() {
        let mut config = CursorEffectConfig::new();
        config.click_window_ms = Some(u64::MAX);
        let (_host, provider) = mount(config);

        provider.pointer_down(Point::new(1.0, 1.0), 1000);
        provider.tick(u64::MAX - 1);
        assert!(provider.state().is_clicking);
    }
}
