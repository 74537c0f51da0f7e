use crate::constants::{FRAME_MS_MAX, FRAME_MS_SMOOTHING, STATS_LOG_INTERVAL};
use crate::dom;
use crate::overlay;
use card_core::CardScene;
use card_render::Renderer;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Per-view state shared by the frame loop and the event listeners.
pub struct ViewState {
    pub scene: CardScene,
    pub renderer: Option<Renderer<'static>>,
    pub canvas: web::HtmlCanvasElement,
    pub overlay: Option<web::Element>,
    pub last_instant: Instant,
    pub frame_ms: f32,
}

impl ViewState {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_ms = (now - self.last_instant).as_secs_f32() * 1000.0;
        self.last_instant = now;
        self.frame_ms += (dt_ms.min(FRAME_MS_MAX) - self.frame_ms) * FRAME_MS_SMOOTHING;

        let stats = self.scene.frame();
        if stats.frame_index % STATS_LOG_INTERVAL == 0 {
            log::debug!(
                "[frame] {} card=({:.2},{:.2},{:.2}) points={}",
                stats.frame_index,
                stats.card_position.x,
                stats.card_position.y,
                stats.card_position.z,
                stats.line_points
            );
        }

        if let Some(el) = &self.overlay {
            if self.scene.scene.show_debug {
                if overlay::is_hidden(el) {
                    overlay::show(el);
                }
                overlay::update(el, &stats, self.frame_ms);
            } else if !overlay::is_hidden(el) {
                overlay::hide(el);
            }
        }

        if let Some(gpu) = self.renderer.as_mut() {
            match gpu.render(&self.scene.scene, &self.scene.camera) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
            }
        }
    }

    /// Follow the canvas' CSS size after a window resize.
    pub fn sync_size(&mut self) {
        let (w, h) = dom::sync_canvas_backing_size(&self.canvas);
        self.scene.resize(w, h);
        if let Some(gpu) = self.renderer.as_mut() {
            gpu.resize_if_needed(w, h);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<Renderer<'static>> {
    let target = wgpu::SurfaceTarget::Canvas(canvas.clone());
    match Renderer::new(target, canvas.width(), canvas.height()).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a running `requestAnimationFrame` loop.
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: TickClosure,
}

fn request_frame(tick: &TickClosure, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        raf_id.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

/// Run `state.frame()` once per display refresh while `running` is set.
pub fn start_loop(state: Rc<RefCell<ViewState>>, running: Rc<Cell<bool>>) -> FrameLoop {
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let raf_id = Rc::new(Cell::new(None));

    let tick_clone = tick.clone();
    let raf_id_tick = raf_id.clone();
    let running_tick = running.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_id_tick.set(None);
        if !running_tick.get() {
            return;
        }
        state.borrow_mut().frame();
        request_frame(&tick_clone, &raf_id_tick);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &raf_id);

    FrameLoop {
        running,
        raf_id,
        tick,
    }
}

impl FrameLoop {
    /// Cancel the pending frame and release the tick closure.
    pub fn stop(&self) {
        self.running.set(false);
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // breaks the closure's reference cycle back to `tick`
        self.tick.borrow_mut().take();
    }
}
