#![cfg(target_arch = "wasm32")]
use card_core::{CardScene, SceneConfig};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;

use events::WebView;

/// A card scene mounted in a page element. Dropping it (or calling
/// [`CardView::unmount`]) stops the loop and removes everything it added.
#[wasm_bindgen]
pub struct CardView {
    view: Option<WebView>,
    frame_loop: Option<frame::FrameLoop>,
    state: Option<Rc<RefCell<frame::ViewState>>>,
}

#[wasm_bindgen]
impl CardView {
    /// Stop rendering, remove all listeners and the canvas. Idempotent.
    pub fn unmount(&mut self) {
        if let Some(l) = self.frame_loop.take() {
            l.stop();
        }
        if let Some(mut view) = self.view.take() {
            view.teardown();
        }
        // drops the renderer and physics world
        self.state.take();
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.view.as_ref().is_some_and(|v| v.is_mounted())
    }
}

impl Drop for CardView {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("card-web starting");

    let has_root = dom::window_document()
        .and_then(|d| d.get_element_by_id(constants::MOUNT_ID))
        .is_some();
    if !has_root {
        log::info!(
            "no #{} element; waiting for an explicit mount()",
            constants::MOUNT_ID
        );
        return Ok(());
    }
    spawn_local(async move {
        if let Some(view) = mount(constants::MOUNT_ID.to_string()).await {
            // the auto-mounted view lives as long as the page
            std::mem::forget(view);
        }
    });
    Ok(())
}

/// Mount a new view into the element with id `container_id`.
/// Resolves to `undefined` when the element does not exist.
#[wasm_bindgen]
pub async fn mount(container_id: String) -> Option<CardView> {
    match mount_view(&container_id).await {
        Ok(view) => view,
        Err(e) => {
            log::error!("mount error: {:?}", e);
            None
        }
    }
}

async fn mount_view(container_id: &str) -> anyhow::Result<Option<CardView>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let Some(container) = document.get_element_by_id(container_id) else {
        log::warn!("[view] mount target #{} not found", container_id);
        return Ok(None);
    };

    let (config, errors) = SceneConfig::from_query(&dom::location_search());
    for e in &errors {
        log::warn!("[config] {}; keeping default", e);
    }

    let canvas = dom::create_canvas(&document, &container)?;
    let overlay = dom::create_overlay(&document, &container);
    let (width, height) = dom::sync_canvas_backing_size(&canvas);
    let mut view = WebView::new(dom::CanvasMount {
        canvas: canvas.clone(),
        overlay: overlay.clone(),
    });

    let renderer = frame::init_gpu(&canvas).await;
    let scene = CardScene::new(config, width, height);
    log::info!(
        "[view] mounted in #{}: {:?} connector, {}x{}",
        container_id,
        scene.config.connector.kind(),
        width,
        height
    );

    let state = Rc::new(RefCell::new(frame::ViewState {
        scene,
        renderer,
        canvas: canvas.clone(),
        overlay,
        last_instant: Instant::now(),
        frame_ms: 0.0,
    }));
    events::wire_listeners(&mut view, &state, &window, &canvas);
    let frame_loop = frame::start_loop(state.clone(), view.running_flag());

    Ok(Some(CardView {
        view: Some(view),
        frame_loop: Some(frame_loop),
        state: Some(state),
    }))
}
