use crate::constants::OVERLAY_STYLE;
use card_core::FrameStats;
use web_sys as web;

/// Text shown in the debug panel.
pub fn format_stats(stats: &FrameStats, frame_ms: f32) -> String {
    let p = stats.card_position;
    format!(
        "frame {}  {:.1} ms\nconnector {:?}  points {}\ncard ({:.2}, {:.2}, {:.2}){}",
        stats.frame_index,
        frame_ms,
        stats.connector,
        stats.line_points,
        p.x,
        p.y,
        p.z,
        if stats.dragging { "  [dragging]" } else { "" }
    )
}

#[inline]
pub fn show(el: &web::Element) {
    _ = el.set_attribute("style", OVERLAY_STYLE);
}

#[inline]
pub fn hide(el: &web::Element) {
    _ = el.set_attribute("style", &format!("{OVERLAY_STYLE}display:none"));
}

#[inline]
pub fn is_hidden(el: &web::Element) -> bool {
    el.get_attribute("style")
        .map(|s| s.contains("display:none"))
        .unwrap_or(false)
}

pub fn update(el: &web::Element, stats: &FrameStats, frame_ms: f32) {
    el.set_text_content(Some(&format_stats(stats, frame_ms)));
}
