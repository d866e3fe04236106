//! Integration tests for the application root
//!
//! These tests verify that:
//! - Both providers mount from one configuration on a shared host
//! - Theme changes in one tab reach the other tab's root
//! - Components can consume both contexts together
//! - Unmounting leaves the host without listeners

use ghostui::prelude::*;
use ghostui_core::event_types;
use ghostui_widgets::resolve_palette;

fn tab(origin: &std::sync::Arc<MemoryStorage>) -> HostContext {
    HostContext::builder().memory_storage(origin).build()
}

const VIEWPORT: Size = Size::new(1200.0, 900.0);

#[test]
fn test_mount_attaches_both_providers() {
    let origin = MemoryStorage::new();
    let host = tab(&origin);
    let root = GhostRoot::mount(&host, &GhostConfig::default(), VIEWPORT);

    assert_eq!(host.listeners().listener_count_for(event_types::STORAGE), 1);
    assert_eq!(host.listeners().listener_count_for(event_types::POINTER_MOVE), 1);
    assert!(root.theme().is_syncing());
    assert!(!root.cursor().is_inert());
}

#[test]
fn test_theme_follows_other_tab() {
    let origin = MemoryStorage::new();
    let host_a = tab(&origin);
    let host_b = tab(&origin);
    let a = GhostRoot::mount(&host_a, &GhostConfig::default(), VIEWPORT);
    let b = GhostRoot::mount(&host_b, &GhostConfig::default(), VIEWPORT);

    a.theme_context().use_theme().unwrap().toggle_theme();

    assert_eq!(b.theme().theme(), Theme::Blood);
    assert_eq!(resolve_palette(&b.theme_context()), Palette::blood());
    assert!(b.tick(0));
    assert!(!b.tick(1));
}

#[test]
fn test_component_uses_both_contexts() {
    let origin = MemoryStorage::new();
    let host = tab(&origin);
    let mut config = GhostConfig::default();
    config.cursor = CursorEffectConfig::new().throttle_ms(0);
    let root = GhostRoot::mount(&host, &config, VIEWPORT);

    let theme = root.theme_context().use_theme().unwrap();
    let cursor = root.cursor_context().use_cursor().unwrap();

    let button = LayoutBox::new(Rect::new(10.0, 10.0, 80.0, 30.0));
    cursor.register_element("cta", &button, ElementOptions::new(EffectKind::Attract));
    host.dispatch(&Event::pointer_move(20.0, 20.0, 0));

    assert!(cursor.state().element(&"cta".into()).unwrap().is_hovered);
    assert_eq!(theme.theme(), Theme::Spectral);
}

#[test]
fn test_touch_host_keeps_theme_but_not_cursor() {
    let origin = MemoryStorage::new();
    let host = HostContext::builder()
        .memory_storage(&origin)
        .input(InputCapabilities::TOUCH)
        .build();
    let root = GhostRoot::mount(&host, &GhostConfig::default(), VIEWPORT);

    assert!(root.cursor().is_inert());
    assert_eq!(host.listeners().listener_count(), 1);
    root.theme().set_theme(Theme::Blood);
    assert_eq!(host.style().get_property("--ghost-accent").as_deref(), Some("#dc2626"));
}

#[test]
fn test_unmount_clears_listeners() {
    let origin = MemoryStorage::new();
    let host = tab(&origin);
    let root = GhostRoot::mount(&host, &GhostConfig::default(), VIEWPORT);

    root.unmount();
    assert_eq!(host.listeners().listener_count(), 0);
    root.unmount();
    assert_eq!(host.listeners().listener_count(), 0);
}
