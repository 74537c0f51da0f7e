//! DOM listeners for one mounted view: pointer down on the canvas, pointer
//! move/up and resize on the window. All four are registered through the
//! view's listener registry so teardown can remove them again.

mod pointer;

use crate::dom::CanvasMount;
use crate::frame::ViewState;
use card_core::lifecycle::{ListenerTarget, MountedView};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type DomCallback = Closure<dyn FnMut(web::Event)>;

/// An `EventTarget` (window or canvas) the view attaches listeners to.
#[derive(Clone)]
pub struct DomTarget(pub web::EventTarget);

impl ListenerTarget for DomTarget {
    type Callback = DomCallback;

    fn add_listener(&self, event: &str, callback: &DomCallback) {
        _ = self
            .0
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
    }

    fn remove_listener(&self, event: &str, callback: &DomCallback) {
        _ = self
            .0
            .remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
    }
}

pub type WebView = MountedView<DomTarget, CanvasMount>;

pub fn wire_listeners(
    view: &mut WebView,
    state: &Rc<RefCell<ViewState>>,
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
) {
    let window_target = DomTarget(window.clone().into());
    let canvas_target = DomTarget(canvas.clone().into());

    view.listeners.register(
        canvas_target,
        "pointerdown",
        pointer::on_pointer_down(state.clone()),
    );
    view.listeners.register(
        window_target.clone(),
        "pointermove",
        pointer::on_pointer_move(state.clone()),
    );
    view.listeners.register(
        window_target.clone(),
        "pointerup",
        pointer::on_pointer_up(state.clone()),
    );

    let state_resize = state.clone();
    let on_resize = Closure::wrap(Box::new(move |_ev: web::Event| {
        state_resize.borrow_mut().sync_size();
    }) as Box<dyn FnMut(_)>);
    view.listeners.register(window_target, "resize", on_resize);

    log::info!(
        "[view] listeners: {}",
        view.listeners.events().collect::<Vec<_>>().join(", ")
    );
}
