use card_core::lifecycle::{ListenerTarget, MountedView, SurfaceMount};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Counts {
    attached: Vec<(&'static str, u32)>,
    detached_surfaces: usize,
}

#[derive(Clone)]
struct FakeTarget(Rc<RefCell<Counts>>);

impl ListenerTarget for FakeTarget {
    type Callback = u32;

    fn add_listener(&self, event: &str, callback: &u32) {
        let event = match event {
            "pointerdown" => "pointerdown",
            "pointermove" => "pointermove",
            "pointerup" => "pointerup",
            "resize" => "resize",
            _ => "other",
        };
        self.0.borrow_mut().attached.push((event, *callback));
    }

    fn remove_listener(&self, event: &str, callback: &u32) {
        let mut c = self.0.borrow_mut();
        let pos = c
            .attached
            .iter()
            .position(|(e, id)| *e == event && id == callback)
            .expect("removing a listener that was never added");
        c.attached.remove(pos);
    }
}

struct FakeSurface(Rc<RefCell<Counts>>);

impl SurfaceMount for FakeSurface {
    fn detach(&self) {
        self.0.borrow_mut().detached_surfaces += 1;
    }
}

fn mounted(counts: &Rc<RefCell<Counts>>) -> MountedView<FakeTarget, FakeSurface> {
    let mut view = MountedView::new(FakeSurface(counts.clone()));
    let canvas = FakeTarget(counts.clone());
    let window = FakeTarget(counts.clone());
    view.listeners.register(canvas.clone(), "pointerdown", 1);
    view.listeners.register(window.clone(), "pointermove", 2);
    view.listeners.register(window.clone(), "pointerup", 3);
    view.listeners.register(window, "resize", 4);
    view
}

#[test]
fn teardown_removes_every_listener_and_the_surface() {
    let counts = Rc::new(RefCell::new(Counts::default()));
    let mut view = mounted(&counts);
    assert_eq!(counts.borrow().attached.len(), 4);
    assert_eq!(view.listeners.len(), 4);
    let running = view.running_flag();
    assert!(running.get());

    view.teardown();
    assert!(counts.borrow().attached.is_empty());
    assert_eq!(counts.borrow().detached_surfaces, 1);
    assert!(!running.get());
    assert!(!view.is_mounted());

    // a second teardown is a no-op
    view.teardown();
    assert_eq!(counts.borrow().detached_surfaces, 1);
}

#[test]
fn dropping_the_view_tears_it_down() {
    let counts = Rc::new(RefCell::new(Counts::default()));
    let running = {
        let view = mounted(&counts);
        let flag = view.running_flag();
        flag
    };
    assert!(counts.borrow().attached.is_empty());
    assert_eq!(counts.borrow().detached_surfaces, 1);
    assert!(!running.get());
}

#[test]
fn registry_records_event_names_in_order() {
    let counts = Rc::new(RefCell::new(Counts::default()));
    let view = mounted(&counts);
    let events: Vec<_> = view.listeners.events().collect();
    assert_eq!(events, ["pointerdown", "pointermove", "pointerup", "resize"]);
}
