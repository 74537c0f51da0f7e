//! Listener bookkeeping and view teardown, independent of the DOM.
//!
//! The web frontend implements [`ListenerTarget`] for `web_sys::EventTarget`
//! and [`SurfaceMount`] for its canvas. Tests use counting fakes.

use std::cell::Cell;
use std::rc::Rc;

/// Something that event callbacks can be attached to and removed from.
pub trait ListenerTarget {
    type Callback;
    fn add_listener(&self, event: &str, callback: &Self::Callback);
    fn remove_listener(&self, event: &str, callback: &Self::Callback);
}

/// A render surface placed inside a host container.
pub trait SurfaceMount {
    fn detach(&self);
}

/// One attached listener. Dropping it detaches the callback.
pub struct Registration<T: ListenerTarget> {
    target: T,
    event: &'static str,
    callback: T::Callback,
}

impl<T: ListenerTarget> Drop for Registration<T> {
    fn drop(&mut self) {
        self.target.remove_listener(self.event, &self.callback);
    }
}

pub struct ListenerRegistry<T: ListenerTarget> {
    entries: Vec<Registration<T>>,
}

impl<T: ListenerTarget> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: ListenerTarget> ListenerRegistry<T> {
    pub fn register(&mut self, target: T, event: &'static str, callback: T::Callback) {
        target.add_listener(event, &callback);
        self.entries.push(Registration {
            target,
            event,
            callback,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn events(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|r| r.event)
    }

    /// Detach every listener.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Everything that must be undone when the view goes away.
pub struct MountedView<T: ListenerTarget, S: SurfaceMount> {
    pub listeners: ListenerRegistry<T>,
    surface: Option<S>,
    running: Rc<Cell<bool>>,
}

impl<T: ListenerTarget, S: SurfaceMount> MountedView<T, S> {
    pub fn new(surface: S) -> Self {
        Self {
            listeners: ListenerRegistry::default(),
            surface: Some(surface),
            running: Rc::new(Cell::new(true)),
        }
    }

    /// Shared flag the frame loop polls; cleared on teardown.
    pub fn running_flag(&self) -> Rc<Cell<bool>> {
        self.running.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Stop the frame loop, detach all listeners and remove the surface.
    /// Safe to call more than once.
    pub fn teardown(&mut self) {
        self.running.set(false);
        let n = self.listeners.len();
        self.listeners.clear();
        if let Some(surface) = self.surface.take() {
            surface.detach();
            log::info!("[view] torn down: removed {} listeners and surface", n);
        }
    }
}

impl<T: ListenerTarget, S: SurfaceMount> Drop for MountedView<T, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
