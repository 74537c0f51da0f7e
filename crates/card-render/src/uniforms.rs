use card_core::constants::SHADOW_EXTENT;
use card_core::scene::{MeshNode, Scene};
use card_core::Camera;
use glam::{Mat4, Vec3};

/// Per-frame values shared by all passes. Layout matches `Globals` in the shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    pub light_view_proj: [[f32; 4]; 4],
    /// xyz: direction the light travels, w: intensity
    pub light_dir: [f32; 4],
    /// xyz: camera eye, w: ambient
    pub eye_ambient: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl ObjectUniforms {
    pub fn from_node(node: &MeshNode) -> Self {
        let model = node.model_matrix();
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            color: [node.color[0], node.color[1], node.color[2], 1.0],
        }
    }
}

/// Orthographic view-projection for a directional light looking at `focus`.
///
/// The frustum is `2 * SHADOW_EXTENT` wide and deep enough to contain a
/// sphere of that radius around `focus`.
pub fn light_view_proj(direction: Vec3, focus: Vec3) -> Mat4 {
    let dir = direction.normalize_or_zero();
    let dir = if dir == Vec3::ZERO { -Vec3::Y } else { dir };
    let up = if dir.cross(Vec3::Y).length_squared() < 1e-6 {
        Vec3::Z
    } else {
        Vec3::Y
    };
    let eye = focus - dir * (SHADOW_EXTENT * 2.0);
    let view = Mat4::look_at_rh(eye, focus, up);
    let e = SHADOW_EXTENT;
    let proj = Mat4::orthographic_rh(-e, e, -e, e, 0.1, SHADOW_EXTENT * 4.0);
    proj * view
}

/// Point the shadow frustum is centered on: halfway between anchor and floor.
pub fn shadow_focus(scene: &Scene) -> Vec3 {
    let top = scene.anchor.position;
    let floor = scene.ground.position;
    Vec3::new(0.0, (top.y + floor.y) * 0.5, 0.0)
}

pub fn globals(scene: &Scene, camera: &Camera) -> Globals {
    let light = &scene.light;
    Globals {
        view_proj: camera.view_proj().to_cols_array_2d(),
        light_view_proj: light_view_proj(light.direction, shadow_focus(scene))
            .to_cols_array_2d(),
        light_dir: light.direction.normalize_or_zero().extend(light.intensity).to_array(),
        eye_ambient: camera.eye.extend(scene.ambient).to_array(),
    }
}
