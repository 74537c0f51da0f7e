use glam::Vec2;
use web_sys as web;

/// Map a CSS-pixel client position to the canvas backing store.
///
/// `rect_origin`/`rect_size` are the canvas bounding rect in CSS pixels and
/// `backing` is its `width`/`height` in device pixels. A zero-sized rect
/// (canvas not laid out yet) passes the offset through unscaled.
#[inline]
pub fn css_to_backing_px(client: Vec2, rect_origin: Vec2, rect_size: Vec2, backing: Vec2) -> Vec2 {
    let local = client - rect_origin;
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return local;
    }
    local / rect_size * backing
}

#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    css_to_backing_px(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
        Vec2::new(canvas.width() as f32, canvas.height() as f32),
    )
}

/// Device-pixel size for a CSS size at the given pixel ratio, never zero.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let w = (css_width * dpr).round().max(1.0) as u32;
    let h = (css_height * dpr).round().max(1.0) as u32;
    (w, h)
}
