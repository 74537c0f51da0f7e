//! Pointer-driven drag of the card.
//!
//! Pressing on the card takes it out of the simulation (kinematic) and moves
//! it along a plane through its own position: camera-facing for a free card,
//! so it keeps its distance from the camera, or its own XY plane for a card
//! locked there. Pressing anywhere else orbits the camera instead.

use crate::camera::{Camera, OrbitControls};
use crate::geometry::{Plane, Ray};
use crate::physics::{BodyId, BodyMode, PhysicsWorld};
use crate::scene::MeshNode;
use glam::{Vec2, Vec3};

/// Drag state of the card. An orbit gesture is not a drag: the state stays
/// `Idle` and [`DragController::is_orbiting`] reports it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// Card is held; `plane` is the one used for the most recent move.
    Dragging { plane: Plane },
}

/// Borrowed view of everything a pointer event may touch.
pub struct DragTarget<'a> {
    pub world: &'a mut PhysicsWorld,
    pub card_body: BodyId,
    pub card_mesh: &'a MeshNode,
    pub camera: &'a Camera,
    pub orbit: &'a mut OrbitControls,
}

#[derive(Clone, Debug, Default)]
pub struct DragController {
    state: DragState,
    /// Last pointer position of an orbit gesture started by a missed press.
    orbit_from: Option<Vec2>,
    /// Orbit was switched off by the current drag and is ours to restore.
    orbit_suspended: bool,
}

/// Plane the card moves in while held.
///
/// A card locked to the XY plane moves in its own `z = const` plane so the
/// rope joint stays closed; any other card uses the camera-facing plane
/// through its position.
fn drag_plane(t: &DragTarget<'_>, position: Vec3) -> Plane {
    if t.world.is_plane_locked(t.card_body) {
        Plane::from_normal_and_point(Vec3::Z, position)
    } else {
        Plane::from_normal_and_point(t.camera.forward(), position)
    }
}

impl DragController {
    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn is_orbiting(&self) -> bool {
        self.orbit_from.is_some()
    }

    /// Returns `true` when the press landed on the card and a drag began.
    pub fn pointer_down(&mut self, ray: &Ray, px: Vec2, t: DragTarget<'_>) -> bool {
        if self.is_dragging() {
            return false;
        }
        if t.card_mesh.ray_hit(ray).is_none() {
            if t.orbit.enabled && t.orbit.enable_rotate {
                self.orbit_from = Some(px);
            }
            return false;
        }
        self.orbit_from = None;
        t.world.set_mode(t.card_body, BodyMode::Kinematic);
        if t.orbit.enabled {
            t.orbit.enabled = false;
            self.orbit_suspended = true;
        }
        let position = t.world.position(t.card_body).unwrap_or(t.card_mesh.position);
        self.state = DragState::Dragging {
            plane: drag_plane(&t, position),
        };
        log::info!(
            "[drag] begin at ({:.2},{:.2},{:.2})",
            position.x,
            position.y,
            position.z
        );
        true
    }

    pub fn pointer_move(&mut self, ray: &Ray, px: Vec2, t: DragTarget<'_>) {
        if let Some(last_px) = self.orbit_from {
            t.orbit.rotate(px - last_px);
            self.orbit_from = Some(px);
            return;
        }
        if !self.is_dragging() {
            return;
        }
        let Some(position) = t.world.position(t.card_body) else {
            return;
        };
        let plane = drag_plane(&t, position);
        self.state = DragState::Dragging { plane };
        if let Some(mut hit) = plane.intersect_ray(ray) {
            if t.world.is_plane_locked(t.card_body) {
                hit.z = position.z;
            }
            t.world.set_translation(t.card_body, hit);
        }
    }

    pub fn pointer_up(&mut self, t: DragTarget<'_>) {
        if self.is_dragging() {
            log::info!("[drag] end");
        }
        // always hand the card back to the solver, however the drag went
        t.world.set_mode(t.card_body, BodyMode::Dynamic);
        if std::mem::take(&mut self.orbit_suspended) {
            t.orbit.enabled = true;
        }
        self.orbit_from = None;
        self.state = DragState::Idle;
    }
}
