//! Haunted Hallway Demo
//!
//! Mounts GhostUI on an in-memory host, walks a simulated pointer down the
//! viewport past two cards and prints what a renderer would draw.
//!
//! Run with: RUST_LOG=ghostui_cursor=debug cargo run -p ghostui --example haunted_hallway

use ghostui::prelude::*;
use ghostui::ghostui_widgets::resolve_palette;

fn main() -> anyhow::Result<()> {
    ghostui::logging::init();

    let config = GhostConfig::from_toml_str(
        r#"
        [theme]
        default_theme = "spectral"

        [cursor]
        intensity = 1.5
        "#,
    )?;

    let origin = MemoryStorage::new();
    let host = HostContext::builder().memory_storage(&origin).build();
    let root = GhostRoot::mount(&host, &config, Size::new(800.0, 900.0));

    let portrait = LayoutBox::new(Rect::new(100.0, 120.0, 200.0, 260.0));
    let door = LayoutBox::new(Rect::new(450.0, 600.0, 180.0, 280.0));
    let cursor = root.cursor();
    cursor.register_element("portrait", &portrait, ElementOptions::new(EffectKind::Glow));
    cursor.register_element("door", &door, ElementOptions::new(EffectKind::Attract));

    const STEPS: u64 = 30;
    for step in 0..=STEPS {
        let now = step * 30;
        let y = step as f32 * 30.0;
        host.dispatch(&Event::pointer_move(200.0 + y * 0.3, y, now));
        root.tick(now);

        if step % 5 == 0 {
            let state = cursor.state();
            println!(
                "t={:>4}ms pos=({:>5.1}, {:>5.1}) theme={:<9} moving={}",
                now, state.position.x, state.position.y, state.current_theme, state.is_moving
            );
            for (id, effect) in cursor.effects() {
                if !effect.is_idle() {
                    println!(
                        "    {id}: glow {:.2} offset ({:.1}, {:.1})",
                        effect.glow, effect.offset.x, effect.offset.y
                    );
                }
            }
        }
    }

    let mut now = STEPS * 30;
    host.dispatch(&Event::pointer_down(540.0, 740.0, now));
    println!("waves after click: {}", cursor.waves().len());
    while root.tick(now) {
        now += 100;
    }
    println!("waves settled by t={}ms", now);

    root.theme_context().use_theme()?.toggle_theme();
    let palette = resolve_palette(&root.theme_context());
    println!("theme now {} (accent {})", root.theme().theme(), palette.accent.to_css());

    root.unmount();
    Ok(())
}
