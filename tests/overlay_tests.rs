// Host-side tests for the debug overlay text.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod overlay {
    include!("../src/overlay.rs");
}

use card_core::{ConnectorKind, FrameStats};
use glam::Vec3;

fn stats(dragging: bool) -> FrameStats {
    FrameStats {
        frame_index: 42,
        dragging,
        card_position: Vec3::new(0.5, 1.25, -0.004),
        line_points: 12,
        connector: ConnectorKind::Rope,
    }
}

#[test]
fn stats_text_lists_frame_connector_and_position() {
    let text = overlay::format_stats(&stats(false), 16.67);
    assert!(text.contains("frame 42"), "{text}");
    assert!(text.contains("16.7 ms"), "{text}");
    assert!(text.contains("Rope"), "{text}");
    assert!(text.contains("points 12"), "{text}");
    assert!(text.contains("(0.50, 1.25, -0.00)"), "{text}");
    assert!(!text.contains("dragging"));
}

#[test]
fn dragging_is_flagged() {
    let text = overlay::format_stats(&stats(true), 16.0);
    assert!(text.ends_with("[dragging]"), "{text}");
}
