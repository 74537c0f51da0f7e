use crate::camera::{Camera, OrbitControls};
use crate::config::{ConnectorKind, SceneConfig};
use crate::geometry::Ray;
use crate::interaction::{DragController, DragState, DragTarget};
use crate::rig::CardRig;
use crate::scene::Scene;
use glam::{Vec2, Vec3};

/// Per-frame summary for logging and the debug overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    pub frame_index: u64,
    pub dragging: bool,
    pub card_position: Vec3,
    pub line_points: usize,
    pub connector: ConnectorKind,
}

/// Owns the whole simulation and its visual mirror for one view.
///
/// Physics state (`rig`) and render state (`scene`) are separate models;
/// [`CardScene::frame`] copies from one to the other.
pub struct CardScene {
    pub config: SceneConfig,
    pub rig: CardRig,
    pub scene: Scene,
    pub camera: Camera,
    pub orbit: OrbitControls,
    drag: DragController,
    viewport: Vec2,
    frame_index: u64,
}

impl CardScene {
    pub fn new(config: SceneConfig, width: u32, height: u32) -> Self {
        let rig = CardRig::build(&config);
        let scene = Scene::new(&config, &rig);
        let mut camera = Camera::default();
        camera.set_viewport(width as f32, height as f32);
        let orbit = OrbitControls::from_camera(&camera);
        Self {
            config,
            rig,
            scene,
            camera,
            orbit,
            drag: DragController::default(),
            viewport: Vec2::new(width.max(1) as f32, height.max(1) as f32),
            frame_index: 0,
        }
    }

    /// One iteration of the frame loop, minus the render call.
    ///
    /// The step is always `config.timestep`, not the wall-clock delta, so the
    /// simulation runs faster on high-refresh displays.
    pub fn frame(&mut self) -> FrameStats {
        self.rig.step(self.config.timestep);
        self.rig.apply_connector_forces();
        self.scene.sync_from(&self.rig);
        self.frame_index += 1;
        self.stats()
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            frame_index: self.frame_index,
            dragging: self.drag.is_dragging(),
            card_position: self.scene.card.position,
            line_points: self.scene.rope.points.len(),
            connector: self.config.connector.kind(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = Vec2::new(width as f32, height as f32);
        self.camera.set_viewport(self.viewport.x, self.viewport.y);
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn is_orbiting(&self) -> bool {
        self.drag.is_orbiting()
    }

    pub fn pointer_ray(&self, px: Vec2) -> Ray {
        self.camera.screen_ray(px, self.viewport)
    }

    /// `px` is in surface pixels. Returns `true` when a card drag began.
    pub fn pointer_down(&mut self, px: Vec2) -> bool {
        let ray = self.pointer_ray(px);
        let target = DragTarget {
            world: &mut self.rig.world,
            card_body: self.rig.card,
            card_mesh: &self.scene.card,
            camera: &self.camera,
            orbit: &mut self.orbit,
        };
        self.drag.pointer_down(&ray, px, target)
    }

    pub fn pointer_move(&mut self, px: Vec2) {
        let ray = self.pointer_ray(px);
        let target = DragTarget {
            world: &mut self.rig.world,
            card_body: self.rig.card,
            card_mesh: &self.scene.card,
            camera: &self.camera,
            orbit: &mut self.orbit,
        };
        self.drag.pointer_move(&ray, px, target);
        if self.drag.is_orbiting() {
            self.orbit.apply(&mut self.camera);
        }
    }

    pub fn pointer_up(&mut self) {
        let target = DragTarget {
            world: &mut self.rig.world,
            card_body: self.rig.card,
            card_mesh: &self.scene.card,
            camera: &self.camera,
            orbit: &mut self.orbit,
        };
        self.drag.pointer_up(target);
    }

    /// Mouse-wheel zoom; positive steps move closer.
    pub fn zoom(&mut self, steps: f32) {
        self.orbit.zoom(steps);
        self.orbit.apply(&mut self.camera);
    }

    pub fn set_debug(&mut self, on: bool) {
        self.scene.show_debug = on;
        self.scene.sync_from(&self.rig);
    }

    pub fn toggle_debug(&mut self) {
        self.set_debug(!self.scene.show_debug);
    }
}
