use super::DomCallback;
use crate::frame::ViewState;
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn on_pointer_down(state: Rc<RefCell<ViewState>>) -> DomCallback {
    Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        let mut st = state.borrow_mut();
        let pos = input::pointer_canvas_px(ev, &st.canvas);
        if st.scene.pointer_down(pos) {
            ev.prevent_default();
        }
        // keep receiving moves for both drags and orbits that leave the canvas
        _ = st.canvas.set_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>)
}

pub fn on_pointer_move(state: Rc<RefCell<ViewState>>) -> DomCallback {
    Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        let mut st = state.borrow_mut();
        let pos = input::pointer_canvas_px(ev, &st.canvas);
        st.scene.pointer_move(pos);
    }) as Box<dyn FnMut(_)>)
}

pub fn on_pointer_up(state: Rc<RefCell<ViewState>>) -> DomCallback {
    Closure::wrap(Box::new(move |ev: web::Event| {
        let mut st = state.borrow_mut();
        if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
            if st.canvas.has_pointer_capture(ev.pointer_id()) {
                _ = st.canvas.release_pointer_capture(ev.pointer_id());
            }
        }
        st.scene.pointer_up();
    }) as Box<dyn FnMut(_)>)
}
