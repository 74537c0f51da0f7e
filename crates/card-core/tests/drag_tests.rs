use card_core::config::ConnectorKind;
use card_core::geometry::Plane;
use card_core::{BodyMode, CardScene, ConnectorRig, DragState, SceneConfig};
use glam::{Vec2, Vec3};

const W: u32 = 800;
const H: u32 = 600;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn settled(config: SceneConfig) -> CardScene {
    init_logging();
    let mut s = CardScene::new(config, W, H);
    for _ in 0..30 {
        s.frame();
    }
    s
}

fn settled_scene() -> CardScene {
    settled(SceneConfig::default())
}

fn spring_scene() -> CardScene {
    settled(SceneConfig::default().with_connector_kind(ConnectorKind::Spring))
}

fn card_px(s: &CardScene) -> Vec2 {
    s.camera
        .project(s.scene.card.position, s.viewport())
        .expect("card in front of camera")
}

fn card_mode(s: &CardScene) -> Option<BodyMode> {
    s.rig.world.mode(s.rig.card)
}

fn card_pos(s: &CardScene) -> Vec3 {
    s.rig.world.position(s.rig.card).expect("card body")
}

fn depth(p: Vec3, s: &CardScene) -> f32 {
    (p - s.camera.eye).dot(s.camera.forward())
}

/// Distance between the last rope segment and the card's attach point.
fn joint_gap(s: &CardScene) -> f32 {
    let ConnectorRig::Chain { segments } = &s.rig.connector else {
        panic!("chain scene expected");
    };
    let last = s.rig.world.position(*segments.last().expect("segments")).expect("segment");
    (last - s.rig.card_attach_point()).length()
}

#[test]
fn press_on_card_makes_it_kinematic() {
    let mut s = settled_scene();
    let px = card_px(&s);
    assert!(s.pointer_down(px));
    assert_eq!(card_mode(&s), Some(BodyMode::Kinematic));
    assert!(matches!(s.drag_state(), DragState::Dragging { .. }));
    assert!(!s.orbit.enabled);
    assert!(s.stats().dragging);
}

#[test]
fn press_on_empty_space_changes_no_drag_state() {
    let mut s = settled_scene();
    let before = s.rig.card_pose().position;
    assert!(!s.pointer_down(Vec2::new(5.0, 5.0)));
    assert_eq!(card_mode(&s), Some(BodyMode::Dynamic));
    assert_eq!(s.drag_state(), DragState::Idle);
    assert!(s.is_orbiting());
    assert!(s.orbit.enabled);
    assert_eq!(s.rig.card_pose().position, before);
    s.pointer_up();
    assert!(!s.is_orbiting());
    assert_eq!(s.drag_state(), DragState::Idle);
}

#[test]
fn release_leaves_disabled_orbit_disabled() {
    let mut s = settled_scene();
    s.orbit.enabled = false;
    assert!(s.pointer_down(card_px(&s)));
    s.pointer_up();
    assert_eq!(card_mode(&s), Some(BodyMode::Dynamic));
    assert!(!s.orbit.enabled);

    s.pointer_down(Vec2::new(5.0, 5.0));
    s.pointer_up();
    assert!(!s.orbit.enabled);
}

#[test]
fn chain_card_is_dragged_in_its_own_plane() {
    let mut s = settled_scene();
    let start_px = card_px(&s);
    assert!(s.pointer_down(start_px));
    let start = card_pos(&s);

    let DragState::Dragging { plane } = s.drag_state() else {
        panic!("expected dragging");
    };
    assert!((plane.normal - Vec3::Z).length() < 1e-6);

    let mut last_x = start.x;
    for i in 1..=10 {
        let px = start_px + Vec2::new(10.0 * i as f32, 8.0 * i as f32);
        s.pointer_move(px);

        let pos = card_pos(&s);
        assert!(pos.x > last_x, "step {i}: x {} <= {}", pos.x, last_x);
        last_x = pos.x;
        assert_eq!(pos.z, start.z, "step {i}");

        let expected = plane.intersect_ray(&s.pointer_ray(px)).unwrap();
        assert!((pos - expected).length() < 1e-3, "{pos:?} vs {expected:?}");

        let stats = s.frame();
        assert!(stats.dragging);
        assert!((stats.card_position - pos).length() < 1e-3);
    }
    assert!(last_x > start.x + 0.1);

    s.pointer_up();
    assert_eq!(card_mode(&s), Some(BodyMode::Dynamic));
    assert!(s.orbit.enabled);
    assert!(!s.stats().dragging);
}

#[test]
fn chain_card_keeps_z_and_joint_after_orbit_and_drag() {
    let mut s = settled_scene();
    for _ in 0..300 {
        s.frame();
    }
    let z0 = card_pos(&s).z;
    let gap0 = joint_gap(&s);

    // orbit about a radian before grabbing the card
    assert!(!s.pointer_down(Vec2::new(5.0, 5.0)));
    s.pointer_move(Vec2::new(205.0, 5.0));
    s.pointer_up();
    assert!(s.camera.eye.x.abs() > 1.0, "camera should have orbited");

    let start_px = card_px(&s);
    assert!(s.pointer_down(start_px));
    for i in 1..=5 {
        s.pointer_move(start_px + Vec2::new(8.0 * i as f32, -12.0 * i as f32));
        assert_eq!(card_pos(&s).z, z0, "step {i}");
        s.frame();
    }
    s.pointer_up();

    for _ in 0..600 {
        s.frame();
    }
    assert!((card_pos(&s).z - z0).abs() < 1e-4, "card left its plane");
    let gap = joint_gap(&s);
    assert!(gap < gap0 + 0.05, "rope joint open: {gap} (was {gap0})");
}

#[test]
fn spring_card_drags_at_constant_depth() {
    let mut s = spring_scene();
    let start_px = card_px(&s);
    assert!(s.pointer_down(start_px));
    assert_eq!(card_mode(&s), Some(BodyMode::Kinematic));
    let start = card_pos(&s);
    let start_depth = depth(start, &s);

    let mut last_x = start.x;
    for i in 1..=10 {
        let px = start_px + Vec2::new(10.0 * i as f32, 0.0);
        s.pointer_move(px);

        let pos = card_pos(&s);
        assert!(pos.x > last_x, "step {i}: x {} <= {}", pos.x, last_x);
        last_x = pos.x;
        assert!((depth(pos, &s) - start_depth).abs() < 1e-3);

        let DragState::Dragging { plane } = s.drag_state() else {
            panic!("expected dragging");
        };
        let expected = plane.intersect_ray(&s.pointer_ray(px)).unwrap();
        assert!((pos - expected).length() < 1e-4, "{pos:?} vs {expected:?}");

        // the spring does not pull on a held card
        let stats = s.frame();
        assert!(stats.dragging);
        assert!((stats.card_position - pos).length() < 1e-3);
    }
    assert!(last_x > start.x + 0.1);
}

#[test]
fn spring_pulls_released_card_back() {
    let mut s = spring_scene();
    let card_core::Connector::Spring {
        rest_length,
        stiffness,
        ..
    } = s.config.connector
    else {
        panic!("spring config");
    };
    let sag = s.config.card_mass * s.config.gravity.length() / stiffness;

    let start_px = card_px(&s);
    assert!(s.pointer_down(start_px));
    for i in 1..=10 {
        s.pointer_move(start_px + Vec2::new(12.0 * i as f32, 0.0));
        s.frame();
    }
    s.pointer_up();
    assert_eq!(card_mode(&s), Some(BodyMode::Dynamic));
    assert!(s.orbit.enabled);

    let anchor_x = s.config.anchor.x;
    let released_offset = (s.rig.card_attach_point().x - anchor_x).abs();
    assert!(released_offset > 0.3, "drag moved the card {released_offset}");

    for _ in 0..900 {
        s.frame();
    }
    let offset = (s.rig.card_attach_point().x - anchor_x).abs();
    assert!(
        offset < released_offset * 0.5,
        "card still {offset} off center (released at {released_offset})"
    );
    let pts = &s.scene.rope.points;
    let len = (pts[1] - pts[0]).length();
    assert!(
        (len - (rest_length + sag)).abs() < 0.15,
        "spring length {len}, expected about {}",
        rest_length + sag
    );
}

#[test]
fn drag_plane_faces_camera_for_free_card() {
    let mut s = spring_scene();
    assert!(s.pointer_down(card_px(&s)));
    let DragState::Dragging { plane } = s.drag_state() else {
        panic!("expected dragging");
    };
    let pos = card_pos(&s);
    assert!(plane.distance_to(pos).abs() < 1e-4);
    let reference = Plane::from_normal_and_point(s.camera.forward(), pos);
    assert!((plane.normal - reference.normal).length() < 1e-5);
}

#[test]
fn orbiting_moves_the_camera_but_not_the_card() {
    let mut s = settled_scene();
    let eye = s.camera.eye;
    s.pointer_down(Vec2::new(20.0, 300.0));
    s.pointer_move(Vec2::new(120.0, 300.0));
    assert!((s.camera.eye - eye).length() > 1e-3);
    assert_eq!(card_mode(&s), Some(BodyMode::Dynamic));
    s.pointer_up();
}

#[test]
fn release_without_press_is_harmless() {
    let mut s = settled_scene();
    s.pointer_up();
    s.pointer_move(Vec2::new(400.0, 300.0));
    assert_eq!(card_mode(&s), Some(BodyMode::Dynamic));
    assert_eq!(s.drag_state(), DragState::Idle);
    assert!(s.orbit.enabled);
}
