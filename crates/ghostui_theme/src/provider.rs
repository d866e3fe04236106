//! Theme provider service
//!
//! `ThemeProvider` owns the single source of truth for the active [`Theme`].
//! It is mounted against a [`HostContext`] and:
//!
//! - restores the persisted theme from durable storage (falling back to the
//!   configured default on absence, invalid values or storage failure)
//! - persists every explicit change, best effort
//! - mirrors the active palette onto the document style scope
//! - follows changes made by other contexts of the same storage origin
//!
//! Storage is never authoritative for the running session: a failed read or
//! write is logged and the in-memory value carries on.

use crate::config::ThemeConfig;
use crate::error::Result;
use crate::theme::Theme;
use crate::tokens::Palette;
use ghostui_core::{event_types, Event, EventData, GlobalListeners, HostContext, ListenerId, Storage, StyleScope};
use slotmap::{new_key_type, SlotMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

new_key_type! {
    /// Handle for a theme change subscription
    pub struct SubscriptionId;
}

/// Theme change callback
pub type ThemeListener = Arc<dyn Fn(Theme) + Send + Sync>;

/// Theme provider - one per mounted tree
pub struct ThemeProvider {
    /// Active theme
    theme: RwLock<Theme>,

    /// Durable storage key
    storage_key: String,

    /// Durable storage, absent outside a browser-like context
    storage: Option<Arc<dyn Storage>>,

    /// Document style scope the palette is mirrored onto
    style: Arc<StyleScope>,

    /// Host listener registry the storage listener lives in
    listeners: Arc<GlobalListeners>,

    /// Storage-change listener, `None` once unmounted or if the host refused it
    storage_listener: Mutex<Option<ListenerId>>,

    /// Consumers to notify on change
    subscribers: RwLock<SlotMap<SubscriptionId, ThemeListener>>,

    /// Flag indicating consumers need to repaint
    needs_repaint: AtomicBool,
}

impl ThemeProvider {
    /// Mount a provider on a host context
    pub fn mount(host: &HostContext, config: ThemeConfig) -> Arc<ThemeProvider> {
        let storage = host.storage().cloned();
        let initial = read_persisted(storage.as_deref(), &config.storage_key)
            .unwrap_or(config.default_theme);

        tracing::debug!(
            "ThemeProvider::mount - key={:?} default={} initial={}",
            config.storage_key,
            config.default_theme,
            initial
        );

        let provider = Arc::new(ThemeProvider {
            theme: RwLock::new(initial),
            storage_key: config.storage_key,
            storage,
            style: Arc::clone(host.style()),
            listeners: Arc::clone(host.listeners()),
            storage_listener: Mutex::new(None),
            subscribers: RwLock::new(SlotMap::with_key()),
            needs_repaint: AtomicBool::new(false),
        });

        provider.mirror_palette(initial);

        let weak = Arc::downgrade(&provider);
        let attached = host.listeners().add_listener(event_types::STORAGE, move |event| {
            if let Some(provider) = weak.upgrade() {
                provider.handle_storage_event(event);
            }
        });
        match attached {
            Ok(id) => {
                *provider
                    .storage_listener
                    .lock()
                    .unwrap_or_else(|e| e.into_inner()) = Some(id);
            }
            Err(err) => {
                tracing::debug!("ThemeProvider::mount - no cross-context sync: {}", err);
            }
        }

        provider
    }

    /// Current theme
    pub fn theme(&self) -> Theme {
        *self.theme.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Palette of the current theme
    pub fn palette(&self) -> Palette {
        self.theme().palette()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Set and persist the theme
    pub fn set_theme(&self, theme: Theme) {
        self.persist(theme);
        self.apply(theme);
    }

    /// Untyped entry point; anything but a theme id is rejected and ignored
    pub fn set_theme_str(&self, value: &str) -> Result<Theme> {
        let theme = value.parse::<Theme>().map_err(|err| {
            tracing::warn!("ThemeProvider::set_theme_str - rejected {:?}", value);
            err
        })?;
        self.set_theme(theme);
        Ok(theme)
    }

    /// Flip to the other theme, returning the new value
    pub fn toggle_theme(&self) -> Theme {
        let next = self.theme().toggle();
        self.set_theme(next);
        next
    }

    /// Observe theme changes
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(Theme) + Send + Sync + 'static,
    {
        self.subscribers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(Arc::new(listener))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id)
            .is_some()
    }

    /// Whether the storage-change listener is still attached
    pub fn is_syncing(&self) -> bool {
        self.storage_listener
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Detach from the host. Safe to call more than once.
    pub fn unmount(&self) {
        let listener = self
            .storage_listener
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(id) = listener {
            self.listeners.remove_listener(id);
            tracing::debug!("ThemeProvider::unmount - storage listener removed");
        }
    }

    // ========== Dirty Flags ==========

    /// Check if a theme change requires repaint
    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint.load(Ordering::SeqCst)
    }

    /// Clear the repaint flag
    pub fn clear_repaint(&self) {
        self.needs_repaint.store(false, Ordering::SeqCst);
    }

    // ========== Internals ==========

    /// Apply a storage-change notification from another context
    fn handle_storage_event(&self, event: &Event) {
        let EventData::Storage { key, new_value, .. } = &event.data else {
            return;
        };
        if key != &self.storage_key {
            return;
        }
        match new_value.as_deref().and_then(Theme::from_id) {
            Some(theme) => {
                tracing::debug!("ThemeProvider - synced {} from another context", theme);
                // Not persisted again: the writer already did
                self.apply(theme);
            }
            None => {
                tracing::trace!("ThemeProvider - ignoring storage value {:?}", new_value);
            }
        }
    }

    fn apply(&self, theme: Theme) {
        let changed = {
            let mut current = self.theme.write().unwrap_or_else(|e| e.into_inner());
            if *current != theme {
                tracing::debug!(
                    "ThemeProvider::apply - switching from {} to {}",
                    *current,
                    theme
                );
                *current = theme;
                true
            } else {
                false
            }
        };

        self.mirror_palette(theme);

        if changed {
            self.needs_repaint.store(true, Ordering::SeqCst);
            self.notify(theme);
        }
    }

    fn notify(&self, theme: Theme) {
        let subscribers: Vec<ThemeListener> = self
            .subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect();
        for subscriber in subscribers {
            subscriber(theme);
        }
    }

    fn persist(&self, theme: Theme) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(err) = storage.set_item(&self.storage_key, theme.id()) {
            tracing::warn!(
                "ThemeProvider - could not persist {} under {:?}: {}",
                theme,
                self.storage_key,
                err
            );
        }
    }

    fn mirror_palette(&self, theme: Theme) {
        for (name, value) in theme.palette().style_variables() {
            self.style.set_property(name, value);
        }
    }
}

impl Drop for ThemeProvider {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Read the persisted theme; absence, invalid values and errors all yield `None`
fn read_persisted(storage: Option<&dyn Storage>, key: &str) -> Option<Theme> {
    let storage = storage?;
    match storage.get_item(key) {
        Ok(Some(value)) => {
            let theme = Theme::from_id(&value);
            if theme.is_none() {
                tracing::debug!("ThemeProvider - ignoring persisted value {:?}", value);
            }
            theme
        }
        Ok(None) => None,
        Err(err) => {
            tracing::warn!("ThemeProvider - could not read {:?}: {}", key, err);
            None
        }
    }
}
