//! Perspective camera and orbit-style controls.
//!
//! These types avoid platform APIs so both frontends share them. Screen
//! coordinates are pixels in the render surface's backing store, origin at
//! the top-left.

use crate::constants::*;
use crate::geometry::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::from(CAMERA_EYE),
            target: Vec3::from(CAMERA_TARGET),
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// World-space ray from the eye through screen pixel `px` of a
    /// `viewport`-sized surface.
    pub fn screen_ray(&self, px: Vec2, viewport: Vec2) -> Ray {
        let ndc_x = (2.0 * px.x / viewport.x.max(1.0)) - 1.0;
        let ndc_y = 1.0 - (2.0 * px.y / viewport.y.max(1.0));
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let far: Vec3 = p_far.truncate() / p_far.w;
        Ray::new(self.eye, far - self.eye)
    }

    /// Pixel position of a world point, or `None` when it is behind the camera.
    pub fn project(&self, world: Vec3, viewport: Vec2) -> Option<Vec2> {
        let clip = self.view_proj() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        ))
    }
}

/// Orbit controller: the eye sits on a sphere around `target`.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub enabled: bool,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub target: Vec3,
    radius: f32,
    yaw: f32,
    pitch: f32,
}

impl OrbitControls {
    pub fn from_camera(camera: &Camera) -> Self {
        let offset = camera.eye - camera.target;
        let radius = offset.length().max(ORBIT_MIN_RADIUS);
        Self {
            enabled: true,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: false,
            target: camera.target,
            radius,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / radius).clamp(-1.0, 1.0).asin(),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Rotate by a pointer delta in pixels. Dragging right orbits the eye to
    /// the left around the target, as if turning the scene.
    pub fn rotate(&mut self, delta_px: Vec2) {
        if !self.enabled || !self.enable_rotate {
            return;
        }
        self.yaw -= delta_px.x * ORBIT_ROTATE_SPEED;
        self.pitch =
            (self.pitch + delta_px.y * ORBIT_ROTATE_SPEED).clamp(-ORBIT_MAX_PITCH, ORBIT_MAX_PITCH);
    }

    /// Positive `steps` zoom in.
    pub fn zoom(&mut self, steps: f32) {
        if !self.enabled || !self.enable_zoom {
            return;
        }
        self.radius =
            (self.radius * ORBIT_ZOOM_STEP.powf(steps)).clamp(ORBIT_MIN_RADIUS, ORBIT_MAX_RADIUS);
    }

    /// Move the target (and eye) in the camera plane by a pixel delta.
    pub fn pan(&mut self, delta_px: Vec2, camera: &Camera) {
        if !self.enabled || !self.enable_pan {
            return;
        }
        let forward = camera.forward();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward);
        let scale = ORBIT_PAN_SPEED * self.radius;
        self.target += (-right * delta_px.x + up * delta_px.y) * scale;
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.radius
    }

    pub fn apply(&self, camera: &mut Camera) {
        camera.target = self.target;
        camera.eye = self.eye();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cam() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 0.0, 6.0),
            target: Vec3::ZERO,
            aspect: 1.0,
            ..Camera::default()
        }
    }

    #[test]
    fn center_pixel_ray_points_at_target() {
        let c = cam();
        let ray = c.screen_ray(Vec2::new(50.0, 50.0), Vec2::new(100.0, 100.0));
        assert!((ray.dir - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-4, "{:?}", ray.dir);
        assert_eq!(ray.origin, c.eye);
    }

    #[test]
    fn project_inverts_screen_ray() {
        let c = cam();
        let vp = Vec2::new(800.0, 600.0);
        let px = Vec2::new(610.0, 220.0);
        let ray = c.screen_ray(px, vp);
        let back = c.project(ray.at(4.0), vp).unwrap();
        assert!((back - px).length() < 0.05, "{back:?}");
    }

    #[test]
    fn orbit_round_trips_initial_eye() {
        let c = Camera::default();
        let orbit = OrbitControls::from_camera(&c);
        assert!((orbit.eye() - c.eye).length() < 1e-4);
    }

    #[test]
    fn orbit_pitch_is_clamped_and_disabled_controls_ignore_input() {
        let mut orbit = OrbitControls::from_camera(&Camera::default());
        orbit.rotate(Vec2::new(0.0, 1.0e6));
        assert!(orbit.pitch() <= ORBIT_MAX_PITCH + 1e-6);

        let before = orbit.eye();
        orbit.enabled = false;
        orbit.rotate(Vec2::new(300.0, 0.0));
        orbit.zoom(5.0);
        assert_eq!(orbit.eye(), before);
    }

    #[test]
    fn zoom_stays_within_limits() {
        let mut orbit = OrbitControls::from_camera(&Camera::default());
        orbit.zoom(100.0);
        assert!((orbit.radius() - ORBIT_MIN_RADIUS).abs() < 1e-5);
        orbit.zoom(-100.0);
        assert!((orbit.radius() - ORBIT_MAX_RADIUS).abs() < 1e-3);
    }
}
