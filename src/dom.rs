use crate::constants::{CANVAS_STYLE, OVERLAY_ID, OVERLAY_STYLE};
use crate::input;
use card_core::lifecycle::SurfaceMount;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Raw `location.search`, or empty when unavailable.
pub fn location_search() -> String {
    web::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Keep the canvas backing store at CSS size * devicePixelRatio.
/// Returns the new backing size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    let (w_px, h_px) = input::backing_size(rect.width(), rect.height(), dpr);
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    (w_px, h_px)
}

/// Create a canvas filling `container` and append it.
pub fn create_canvas(
    document: &web::Document,
    container: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    _ = canvas.set_attribute("style", CANVAS_STYLE);
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;
    Ok(canvas)
}

/// Create the debug text panel inside `container`, hidden until shown.
pub fn create_overlay(document: &web::Document, container: &web::Element) -> Option<web::Element> {
    let el = document.create_element("div").ok()?;
    el.set_id(OVERLAY_ID);
    _ = el.set_attribute("style", &format!("{OVERLAY_STYLE}display:none"));
    container.append_child(&el).ok()?;
    Some(el)
}

/// Everything the view added to the page; removed again on teardown.
pub struct CanvasMount {
    pub canvas: web::HtmlCanvasElement,
    pub overlay: Option<web::Element>,
}

impl SurfaceMount for CanvasMount {
    fn detach(&self) {
        self.canvas.remove();
        if let Some(el) = &self.overlay {
            el.remove();
        }
    }
}
