// Host-side tests for the web front-end constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use card_core::constants as core;
use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn smoothing_and_clamps_are_in_range() {
    assert!(FRAME_MS_SMOOTHING > 0.0 && FRAME_MS_SMOOTHING <= 1.0);
    assert!(FRAME_MS_MAX > 1000.0 / 60.0);
    assert!(STATS_LOG_INTERVAL > 0);
}

#[test]
fn dom_ids_are_distinct_and_selector_safe() {
    assert_ne!(MOUNT_ID, OVERLAY_ID);
    for id in [MOUNT_ID, OVERLAY_ID] {
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    }
}

#[test]
fn overlay_style_can_be_hidden_by_suffix() {
    // overlay::hide appends `display:none` to this style
    assert!(OVERLAY_STYLE.ends_with(';'));
    assert!(!OVERLAY_STYLE.contains("display:none"));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn core_scene_fits_in_view() {
    // the card hangs between the anchor and the ground
    let drop = core::ROPE_SEGMENTS as f32 * core::ROPE_SEGMENT_DISTANCE
        + 2.0 * core::CARD_HALF_EXTENTS[1];
    assert!(core::ANCHOR_POSITION[1] - drop > core::GROUND_Y);
    assert!(core::SPRING_REST_LENGTH + 2.0 * core::CARD_HALF_EXTENTS[1] < core::ANCHOR_POSITION[1] - core::GROUND_Y);
    assert!(core::CAMERA_ZNEAR > 0.0 && core::CAMERA_ZFAR > core::CAMERA_ZNEAR);
}
