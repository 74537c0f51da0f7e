use crate::physics::{BodyId, PhysicsWorld};
use glam::Vec3;

/// Damped spring between two bodies, applied as an explicit force each frame.
///
/// rapier keeps user forces until they are reset, so [`Spring::apply_force`]
/// resets both bodies before adding the new force.
#[derive(Clone, Debug)]
pub struct Spring {
    pub body_a: BodyId,
    pub body_b: BodyId,
    pub local_anchor_a: Vec3,
    pub local_anchor_b: Vec3,
    pub rest_length: f32,
    pub stiffness: f32,
    pub damping: f32,
}

impl Spring {
    /// World-space endpoints `(a, b)`.
    pub fn world_anchors(&self, world: &PhysicsWorld) -> Option<(Vec3, Vec3)> {
        let a = world.pose(self.body_a)?.transform_point(self.local_anchor_a);
        let b = world.pose(self.body_b)?.transform_point(self.local_anchor_b);
        Some((a, b))
    }

    pub fn apply_force(&self, world: &mut PhysicsWorld) {
        let Some((pa, pb)) = self.world_anchors(world) else {
            return;
        };
        let va = world.velocity_at_point(self.body_a, pa).unwrap_or(Vec3::ZERO);
        let vb = world.velocity_at_point(self.body_b, pb).unwrap_or(Vec3::ZERO);
        let f = spring_force(
            pa,
            pb,
            va,
            vb,
            self.rest_length,
            self.stiffness,
            self.damping,
        );
        world.reset_forces(self.body_a);
        world.reset_forces(self.body_b);
        world.add_force_at_point(self.body_a, -f, pa);
        world.add_force_at_point(self.body_b, f, pb);
    }
}

/// Force on the `b` end of a spring from `a` to `b` (the `a` end gets the negation).
///
/// Hooke's law along the spring axis plus damping on the relative velocity
/// projected onto that axis. Coincident endpoints give zero force.
pub fn spring_force(
    a: Vec3,
    b: Vec3,
    vel_a: Vec3,
    vel_b: Vec3,
    rest_length: f32,
    stiffness: f32,
    damping: f32,
) -> Vec3 {
    let r = b - a;
    let len = r.length();
    if len <= f32::EPSILON {
        return Vec3::ZERO;
    }
    let dir = r / len;
    let rel_vel = (vel_b - vel_a).dot(dir);
    -(stiffness * (len - rest_length) + damping * rel_vel) * dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stretched_spring_pulls_b_toward_a() {
        let f = spring_force(
            Vec3::ZERO,
            Vec3::new(0.0, -3.0, 0.0),
            Vec3::ZERO,
            Vec3::ZERO,
            2.0,
            10.0,
            0.0,
        );
        assert!((f - Vec3::new(0.0, 10.0, 0.0)).length() < 1e-5, "{f:?}");
    }

    #[test]
    fn compressed_spring_pushes_b_away() {
        let f = spring_force(
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::ZERO,
            2.0,
            5.0,
            0.0,
        );
        assert!(f.x > 0.0 && f.y.abs() < 1e-6);
    }

    #[test]
    fn damping_opposes_separation_speed() {
        let f = spring_force(
            Vec3::ZERO,
            Vec3::new(0.0, -2.0, 0.0),
            Vec3::ZERO,
            Vec3::new(0.0, -1.0, 0.0),
            2.0,
            10.0,
            3.0,
        );
        // at rest length, only damping acts: moving away along -y → pulled back along +y
        assert!((f - Vec3::new(0.0, 3.0, 0.0)).length() < 1e-5, "{f:?}");
    }

    #[test]
    fn coincident_endpoints_give_no_force() {
        let p = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(
            spring_force(p, p, Vec3::X, Vec3::Y, 1.0, 10.0, 1.0),
            Vec3::ZERO
        );
    }
}
