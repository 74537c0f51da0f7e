//! Thin wrapper over a `rapier3d` world.
//!
//! Owns the rapier pipeline and body/collider/joint sets and exposes the small
//! surface the scene needs: add bodies, add constraints, step, read poses and
//! flip bodies between dynamic and kinematic. All conversion between `glam`
//! and rapier's `nalgebra` types happens here.

use glam::{Quat, Vec3};
use rapier3d::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(RigidBodyHandle);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JointId(ImpulseJointHandle);

/// World-space position and orientation of a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    #[inline]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyMode {
    /// Moved by the solver.
    Dynamic,
    /// Positioned directly from outside; pushes dynamic bodies but ignores forces.
    Kinematic,
    /// Never moves.
    Fixed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BodyShape {
    Cuboid { half_extents: Vec3 },
    Ball { radius: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct BodyDesc {
    pub mode: BodyMode,
    pub position: Vec3,
    pub mass: f32,
    /// Collision shape. Bodies without one only take part through constraints;
    /// their inertia is derived from `inertia_radius`.
    pub shape: Option<BodyShape>,
    pub inertia_radius: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Keep the body in the XY plane, rotating only about Z.
    pub plane_locked: bool,
}

impl BodyDesc {
    pub fn fixed(position: Vec3) -> Self {
        Self {
            mode: BodyMode::Fixed,
            position,
            mass: 0.0,
            shape: None,
            inertia_radius: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            plane_locked: false,
        }
    }

    pub fn dynamic(position: Vec3, mass: f32) -> Self {
        Self {
            mode: BodyMode::Dynamic,
            mass,
            ..Self::fixed(position)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Constraint {
    /// Keep the centers of `a` and `b` exactly `distance` apart.
    Distance { a: BodyId, b: BodyId, distance: f32 },
    /// Pin a point on `a` to a point on `b` (both in body-local coordinates).
    PointToPoint {
        a: BodyId,
        local_a: Vec3,
        b: BodyId,
        local_b: Vec3,
    },
}

// Inertia floor for collider-less bodies; tiny values make the joint solver jittery.
const MIN_PRINCIPAL_INERTIA: f32 = 1e-4;

pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity: to_vector(gravity),
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    pub fn add_body(&mut self, desc: &BodyDesc) -> BodyId {
        let body_type = match desc.mode {
            BodyMode::Dynamic => RigidBodyType::Dynamic,
            BodyMode::Kinematic => RigidBodyType::KinematicPositionBased,
            BodyMode::Fixed => RigidBodyType::Fixed,
        };
        let mut builder = RigidBodyBuilder::new(body_type)
            .translation(to_vector(desc.position))
            .linear_damping(desc.linear_damping)
            .angular_damping(desc.angular_damping)
            .can_sleep(false);
        if desc.plane_locked {
            builder = builder.locked_axes(
                LockedAxes::TRANSLATION_LOCKED_Z
                    | LockedAxes::ROTATION_LOCKED_X
                    | LockedAxes::ROTATION_LOCKED_Y,
            );
        }
        if desc.shape.is_none() && desc.mode == BodyMode::Dynamic {
            let r = desc.inertia_radius;
            let inertia = (0.4 * desc.mass * r * r).max(MIN_PRINCIPAL_INERTIA);
            builder = builder.additional_mass_properties(MassProperties::new(
                Point::origin(),
                desc.mass,
                Vector::repeat(inertia),
            ));
        }
        let handle = self.bodies.insert(builder.build());

        if let Some(shape) = desc.shape {
            let collider = match shape {
                BodyShape::Cuboid { half_extents } => {
                    ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
                }
                BodyShape::Ball { radius } => ColliderBuilder::ball(radius),
            };
            let collider = collider.mass(desc.mass).friction(0.6).restitution(0.1).build();
            self.colliders
                .insert_with_parent(collider, handle, &mut self.bodies);
        }
        BodyId(handle)
    }

    /// Add an infinite floor at height `y`, facing up.
    pub fn add_ground(&mut self, y: f32) -> BodyId {
        let handle = self.bodies.insert(
            RigidBodyBuilder::fixed()
                .translation(vector![0.0, y, 0.0])
                .build(),
        );
        let collider = ColliderBuilder::halfspace(Vector::y_axis())
            .friction(0.8)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        BodyId(handle)
    }

    pub fn add_constraint(&mut self, constraint: Constraint) -> JointId {
        let (a, b, joint) = match constraint {
            // A ball joint whose anchor on `b` sits `distance` away from its
            // center: rotation never changes that length, so the centers stay
            // exactly `distance` apart while both bodies swing freely.
            Constraint::Distance { a, b, distance } => (
                a,
                b,
                SphericalJointBuilder::new()
                    .local_anchor1(Point::origin())
                    .local_anchor2(point![0.0, distance, 0.0])
                    .build(),
            ),
            Constraint::PointToPoint {
                a,
                local_a,
                b,
                local_b,
            } => (
                a,
                b,
                SphericalJointBuilder::new()
                    .local_anchor1(to_point(local_a))
                    .local_anchor2(to_point(local_b))
                    .build(),
            ),
        };
        JointId(self.impulse_joints.insert(a.0, b.0, joint, true))
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    pub fn pose(&self, id: BodyId) -> Option<Pose> {
        self.bodies.get(id.0).map(|b| Pose {
            position: from_vector(b.translation()),
            rotation: from_rotation(b.rotation()),
        })
    }

    pub fn position(&self, id: BodyId) -> Option<Vec3> {
        self.bodies.get(id.0).map(|b| from_vector(b.translation()))
    }

    pub fn linear_velocity(&self, id: BodyId) -> Option<Vec3> {
        self.bodies.get(id.0).map(|b| from_vector(b.linvel()))
    }

    pub fn velocity_at_point(&self, id: BodyId, world_point: Vec3) -> Option<Vec3> {
        self.bodies
            .get(id.0)
            .map(|b| from_vector(&b.velocity_at_point(&to_point(world_point))))
    }

    pub fn mode(&self, id: BodyId) -> Option<BodyMode> {
        self.bodies.get(id.0).map(|b| match b.body_type() {
            RigidBodyType::Dynamic => BodyMode::Dynamic,
            RigidBodyType::Fixed => BodyMode::Fixed,
            RigidBodyType::KinematicPositionBased | RigidBodyType::KinematicVelocityBased => {
                BodyMode::Kinematic
            }
        })
    }

    /// Whether the body was created with `plane_locked`.
    pub fn is_plane_locked(&self, id: BodyId) -> bool {
        self.bodies
            .get(id.0)
            .is_some_and(|b| b.locked_axes().contains(LockedAxes::TRANSLATION_LOCKED_Z))
    }

    /// Switch a body between solver-driven and externally positioned.
    pub fn set_mode(&mut self, id: BodyId, mode: BodyMode) {
        let Some(body) = self.bodies.get_mut(id.0) else {
            return;
        };
        match mode {
            BodyMode::Dynamic => {
                body.set_body_type(RigidBodyType::Dynamic, true);
                body.wake_up(true);
            }
            BodyMode::Kinematic => {
                body.set_body_type(RigidBodyType::KinematicPositionBased, true);
                body.set_linvel(Vector::zeros(), true);
                body.set_angvel(Vector::zeros(), true);
            }
            BodyMode::Fixed => body.set_body_type(RigidBodyType::Fixed, true),
        }
    }

    /// Teleport a body. Kinematic bodies also get the same next position so the
    /// following step does not move them further.
    pub fn set_translation(&mut self, id: BodyId, position: Vec3) {
        let Some(body) = self.bodies.get_mut(id.0) else {
            return;
        };
        let v = to_vector(position);
        body.set_translation(v, true);
        if body.is_kinematic() {
            body.set_next_kinematic_translation(v);
        }
    }

    pub fn reset_forces(&mut self, id: BodyId) {
        if let Some(body) = self.bodies.get_mut(id.0) {
            body.reset_forces(true);
        }
    }

    /// Apply a force at a world-space point. It stays applied until
    /// [`Self::reset_forces`].
    pub fn add_force_at_point(&mut self, id: BodyId, force: Vec3, world_point: Vec3) {
        if let Some(body) = self.bodies.get_mut(id.0) {
            if body.is_dynamic() {
                body.add_force_at_point(to_vector(force), to_point(world_point), true);
            }
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn joint_count(&self) -> usize {
        self.impulse_joints.len()
    }

    /// Collect debug wireframe segments for every collider (box edges, ball
    /// crosses) and a small cross for every collider-less dynamic body.
    pub fn wireframe(&self, cross_size: f32, out: &mut Vec<[Vec3; 2]>) {
        for (_, collider) in self.colliders.iter() {
            let iso = collider.position();
            let pose = Pose {
                position: from_vector(&iso.translation.vector),
                rotation: from_rotation(&iso.rotation),
            };
            let shape = collider.shape();
            if let Some(cuboid) = shape.as_cuboid() {
                push_box_edges(&pose, from_vector(&cuboid.half_extents), out);
            } else if let Some(ball) = shape.as_ball() {
                push_cross(pose.position, ball.radius, out);
            }
        }
        for (_, body) in self.bodies.iter() {
            if body.colliders().is_empty() && body.is_dynamic() {
                push_cross(from_vector(body.translation()), cross_size, out);
            }
        }
    }
}

pub(crate) fn push_cross(center: Vec3, size: f32, out: &mut Vec<[Vec3; 2]>) {
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        out.push([center - axis * size, center + axis * size]);
    }
}

pub(crate) fn push_box_edges(pose: &Pose, half: Vec3, out: &mut Vec<[Vec3; 2]>) {
    let corner = |i: usize| {
        let sx = if i & 1 == 0 { -1.0 } else { 1.0 };
        let sy = if i & 2 == 0 { -1.0 } else { 1.0 };
        let sz = if i & 4 == 0 { -1.0 } else { 1.0 };
        pose.transform_point(Vec3::new(sx * half.x, sy * half.y, sz * half.z))
    };
    // corners differing in exactly one bit share an edge
    for i in 0..8 {
        for bit in [1, 2, 4] {
            let j = i | bit;
            if j != i {
                out.push([corner(i), corner(j)]);
            }
        }
    }
}

#[inline]
fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

#[inline]
fn to_point(v: Vec3) -> Point<Real> {
    point![v.x, v.y, v.z]
}

#[inline]
fn from_vector(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
fn from_rotation(r: &Rotation<Real>) -> Quat {
    let c = r.quaternion().coords;
    Quat::from_xyzw(c.x, c.y, c.z, c.w)
}
