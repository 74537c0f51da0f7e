//! Render-side scene model.
//!
//! Independent of the physics world: [`Scene::sync_from`] is the one place
//! where body poses are copied into visual transforms each frame.

use crate::config::SceneConfig;
use crate::constants::*;
use crate::geometry::{ray_obb, Ray};
use crate::physics::Pose;
use crate::rig::CardRig;
use glam::{Mat4, Quat, Vec3};

/// A unit-cube mesh instance: `scale` is the full size along each axis.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshNode {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub color: [f32; 3],
    pub casts_shadow: bool,
}

impl MeshNode {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    pub fn set_pose(&mut self, pose: &Pose) {
        self.position = pose.position;
        self.rotation = pose.rotation;
    }

    /// Distance along `ray` to this mesh's box, if hit.
    pub fn ray_hit(&self, ray: &Ray) -> Option<f32> {
        ray_obb(ray, self.position, self.rotation, self.scale * 0.5)
    }
}

/// Polyline through physics points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Line {
    pub points: Vec<Vec3>,
    pub color: [f32; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels (from the light toward the scene).
    pub direction: Vec3,
    pub intensity: f32,
    pub cast_shadows: bool,
}

pub struct Scene {
    pub card: MeshNode,
    pub anchor: MeshNode,
    /// Flat box whose top face sits at the ground height.
    pub ground: MeshNode,
    pub rope: Line,
    pub light: DirectionalLight,
    pub ambient: f32,
    pub clear_color: [f32; 3],
    pub show_debug: bool,
    pub debug_lines: Vec<[Vec3; 2]>,
}

const GROUND_THICKNESS: f32 = 0.1;

impl Scene {
    pub fn new(config: &SceneConfig, rig: &CardRig) -> Self {
        let mut scene = Self {
            card: MeshNode {
                position: config.card_start_position(),
                rotation: Quat::IDENTITY,
                scale: config.card_half_extents * 2.0,
                color: CARD_COLOR,
                casts_shadow: true,
            },
            anchor: MeshNode {
                position: config.anchor,
                rotation: Quat::IDENTITY,
                scale: Vec3::splat(ANCHOR_VISUAL_SIZE),
                color: ANCHOR_COLOR,
                casts_shadow: true,
            },
            ground: MeshNode {
                position: Vec3::new(0.0, config.ground_y - GROUND_THICKNESS * 0.5, 0.0),
                rotation: Quat::IDENTITY,
                scale: Vec3::new(GROUND_HALF_SIZE * 2.0, GROUND_THICKNESS, GROUND_HALF_SIZE * 2.0),
                color: GROUND_COLOR,
                casts_shadow: false,
            },
            rope: Line {
                points: Vec::with_capacity(rig.tracked_point_count()),
                color: ROPE_COLOR,
            },
            light: DirectionalLight {
                direction: Vec3::from(LIGHT_DIRECTION).normalize(),
                intensity: LIGHT_INTENSITY,
                cast_shadows: true,
            },
            ambient: AMBIENT_INTENSITY,
            clear_color: CLEAR_COLOR,
            show_debug: config.debug,
            debug_lines: Vec::new(),
        };
        scene.sync_from(rig);
        scene
    }

    /// Copy physics results into the visual model: card transform, rope
    /// points, and debug wireframes when enabled.
    pub fn sync_from(&mut self, rig: &CardRig) {
        self.card.set_pose(&rig.card_pose());
        rig.tracked_points(&mut self.rope.points);
        if self.show_debug {
            rig.wireframe(&mut self.debug_lines);
        } else {
            self.debug_lines.clear();
        }
    }
}
