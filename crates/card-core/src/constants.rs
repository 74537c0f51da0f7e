use glam::Vec3;

// Shared simulation/visual tuning constants used by both web and native frontends.

// Timing
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0; // seconds of simulation advanced per frame
pub const GRAVITY: [f32; 3] = [0.0, -9.82, 0.0];

// Anchor and card
pub const ANCHOR_POSITION: [f32; 3] = [0.0, 4.0, 0.0];
pub const CARD_HALF_EXTENTS: [f32; 3] = [0.5, 0.75, 0.02];
pub const CARD_MASS: f32 = 1.0;
pub const CARD_LINEAR_DAMPING: f32 = 0.3;
pub const CARD_ANGULAR_DAMPING: f32 = 0.6;

// Rope (variant A): chain of small bodies held at a fixed spacing
pub const ROPE_SEGMENTS: usize = 10;
pub const ROPE_SEGMENT_DISTANCE: f32 = 0.15;
pub const ROPE_SEGMENT_MASS: f32 = 0.05;
pub const ROPE_SEGMENT_RADIUS: f32 = 0.03;
pub const ROPE_LINEAR_DAMPING: f32 = 0.5;
pub const MAX_ROPE_SEGMENTS: usize = 64;

// Spring (variant B)
pub const SPRING_REST_LENGTH: f32 = 1.5;
pub const SPRING_STIFFNESS: f32 = 50.0;
pub const SPRING_DAMPING: f32 = 1.0;

// Ground
pub const GROUND_Y: f32 = -1.0;
pub const GROUND_HALF_SIZE: f32 = 12.0;

// Camera
pub const CAMERA_FOVY: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;
pub const CAMERA_EYE: [f32; 3] = [0.0, 2.5, 8.0];
pub const CAMERA_TARGET: [f32; 3] = [0.0, 2.0, 0.0];

// Orbit controls
pub const ORBIT_ROTATE_SPEED: f32 = 0.005; // radians per pixel
pub const ORBIT_PAN_SPEED: f32 = 0.002; // world units per pixel per unit radius
pub const ORBIT_ZOOM_STEP: f32 = 0.9; // radius multiplier per wheel notch
pub const ORBIT_MIN_RADIUS: f32 = 2.0;
pub const ORBIT_MAX_RADIUS: f32 = 30.0;
pub const ORBIT_MAX_PITCH: f32 = 1.45; // just short of straight up/down

// Lighting
pub const LIGHT_DIRECTION: [f32; 3] = [-0.4, -1.0, -0.5];
pub const LIGHT_INTENSITY: f32 = 1.0;
pub const AMBIENT_INTENSITY: f32 = 0.3;
pub const SHADOW_EXTENT: f32 = 8.0; // half-size of the orthographic shadow frustum

// Palette
pub const CARD_COLOR: [f32; 3] = [0.95, 0.82, 0.35];
pub const ANCHOR_COLOR: [f32; 3] = [0.35, 0.35, 0.4];
pub const GROUND_COLOR: [f32; 3] = [0.55, 0.58, 0.62];
pub const ROPE_COLOR: [f32; 3] = [0.85, 0.85, 0.9];
pub const DEBUG_COLOR: [f32; 3] = [0.2, 1.0, 0.3];
pub const CLEAR_COLOR: [f32; 3] = [0.07, 0.08, 0.11];

// Visual sizing
pub const ANCHOR_VISUAL_SIZE: f32 = 0.12;
pub const DEBUG_CROSS_SIZE: f32 = 0.05;

#[inline]
pub fn anchor_vec3() -> Vec3 {
    Vec3::from(ANCHOR_POSITION)
}

#[inline]
pub fn card_half_extents_vec3() -> Vec3 {
    Vec3::from(CARD_HALF_EXTENTS)
}
