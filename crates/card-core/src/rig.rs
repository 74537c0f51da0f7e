//! Builds the physics side of the scene: anchor, card and the connector
//! between them, chosen by [`Connector`].

use crate::config::{Connector, SceneConfig};
use crate::constants::DEBUG_CROSS_SIZE;
use crate::physics::{BodyDesc, BodyId, BodyShape, Constraint, PhysicsWorld, Pose};
use crate::spring::Spring;
use glam::{Quat, Vec3};

/// Physics objects backing the connector.
#[derive(Clone, Debug)]
pub enum ConnectorRig {
    /// Segment bodies from the anchor end to the card end.
    Chain { segments: Vec<BodyId> },
    Spring(Spring),
}

pub struct CardRig {
    pub world: PhysicsWorld,
    pub anchor: BodyId,
    pub card: BodyId,
    pub ground: BodyId,
    pub connector: ConnectorRig,
    card_attach_local: Vec3,
}

impl CardRig {
    pub fn build(config: &SceneConfig) -> Self {
        let mut world = PhysicsWorld::new(config.gravity);
        let ground = world.add_ground(config.ground_y);
        let anchor = world.add_body(&BodyDesc::fixed(config.anchor));
        let card_attach_local = config.card_attach_local();

        let plane_locked = matches!(config.connector, Connector::Chain { .. });
        let card = world.add_body(&BodyDesc {
            shape: Some(BodyShape::Cuboid {
                half_extents: config.card_half_extents,
            }),
            linear_damping: config.card_linear_damping,
            angular_damping: config.card_angular_damping,
            plane_locked,
            ..BodyDesc::dynamic(config.card_start_position(), config.card_mass)
        });

        let connector = match config.connector {
            Connector::Chain {
                segments,
                segment_distance,
                segment_mass,
                segment_radius,
            } => {
                let mut ids = Vec::with_capacity(segments);
                let mut prev = anchor;
                for i in 0..segments {
                    let pos = config.anchor - Vec3::Y * (segment_distance * (i + 1) as f32);
                    let seg = world.add_body(&BodyDesc {
                        inertia_radius: segment_radius,
                        linear_damping: config.rope_linear_damping,
                        plane_locked,
                        ..BodyDesc::dynamic(pos, segment_mass)
                    });
                    world.add_constraint(Constraint::Distance {
                        a: prev,
                        b: seg,
                        distance: segment_distance,
                    });
                    ids.push(seg);
                    prev = seg;
                }
                world.add_constraint(Constraint::PointToPoint {
                    a: prev,
                    local_a: Vec3::ZERO,
                    b: card,
                    local_b: card_attach_local,
                });
                ConnectorRig::Chain { segments: ids }
            }
            Connector::Spring {
                rest_length,
                stiffness,
                damping,
            } => ConnectorRig::Spring(Spring {
                body_a: anchor,
                body_b: card,
                local_anchor_a: Vec3::ZERO,
                local_anchor_b: card_attach_local,
                rest_length,
                stiffness,
                damping,
            }),
        };

        log::info!(
            "[rig] built {} connector: bodies={} joints={}",
            match connector {
                ConnectorRig::Chain { .. } => "chain",
                ConnectorRig::Spring(_) => "spring",
            },
            world.body_count(),
            world.joint_count()
        );

        Self {
            world,
            anchor,
            card,
            ground,
            connector,
            card_attach_local,
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.world.step(dt);
    }

    /// Apply any forces the connector needs by hand. Only the spring has any;
    /// the chain is held entirely by its constraints.
    pub fn apply_connector_forces(&mut self) {
        if let ConnectorRig::Spring(spring) = &self.connector {
            spring.apply_force(&mut self.world);
        }
    }

    pub fn card_pose(&self) -> Pose {
        self.world
            .pose(self.card)
            .unwrap_or(Pose::new(Vec3::ZERO, Quat::IDENTITY))
    }

    pub fn card_attach_point(&self) -> Vec3 {
        self.card_pose().transform_point(self.card_attach_local)
    }

    pub fn tracked_point_count(&self) -> usize {
        match &self.connector {
            ConnectorRig::Chain { segments } => segments.len() + 2,
            ConnectorRig::Spring(_) => 2,
        }
    }

    /// Fill `out` with the points the rope line follows: anchor, each
    /// segment (chain only), then the card's attach point.
    pub fn tracked_points(&self, out: &mut Vec<Vec3>) {
        out.clear();
        out.push(self.world.position(self.anchor).unwrap_or(Vec3::ZERO));
        if let ConnectorRig::Chain { segments } = &self.connector {
            out.extend(
                segments
                    .iter()
                    .map(|s| self.world.position(*s).unwrap_or(Vec3::ZERO)),
            );
        }
        out.push(self.card_attach_point());
    }

    pub fn wireframe(&self, out: &mut Vec<[Vec3; 2]>) {
        out.clear();
        self.world.wireframe(DEBUG_CROSS_SIZE, out);
        if let Some(anchor) = self.world.position(self.anchor) {
            crate::physics::push_cross(anchor, DEBUG_CROSS_SIZE * 2.0, out);
        }
        if let ConnectorRig::Spring(spring) = &self.connector {
            if let Some((a, b)) = spring.world_anchors(&self.world) {
                out.push([a, b]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectorKind;

    #[test]
    fn chain_rig_has_expected_bodies_and_joints() {
        let cfg = SceneConfig::default().with_segments(5).unwrap();
        let rig = CardRig::build(&cfg);
        // ground + anchor + card + 5 segments
        assert_eq!(rig.world.body_count(), 8);
        // 5 distance constraints + 1 point-to-point to the card
        assert_eq!(rig.world.joint_count(), 6);
        assert_eq!(rig.tracked_point_count(), 7);
    }

    #[test]
    fn spring_rig_tracks_two_points_and_no_joints() {
        let cfg = SceneConfig::default().with_connector_kind(ConnectorKind::Spring);
        let rig = CardRig::build(&cfg);
        assert_eq!(rig.world.joint_count(), 0);
        let mut pts = Vec::new();
        rig.tracked_points(&mut pts);
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[0], cfg.anchor);
    }
}
