use card_core::config::ConnectorKind;
use card_core::{CardScene, ConnectorRig, SceneConfig};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn run(s: &mut CardScene, frames: usize) {
    init_logging();
    for _ in 0..frames {
        let stats = s.frame();
        assert_eq!(
            stats.line_points,
            s.config.connector.tracked_point_count(),
            "frame {}",
            stats.frame_index
        );
    }
}

#[test]
fn rope_line_tracks_anchor_segments_and_card_every_frame() {
    let cfg = SceneConfig::default().with_segments(6).unwrap();
    let mut s = CardScene::new(cfg, 640, 480);
    assert_eq!(s.scene.rope.points.len(), 8);
    run(&mut s, 120);

    let pts = &s.scene.rope.points;
    assert_eq!(pts[0], s.config.anchor);
    let attach = s.rig.card_attach_point();
    assert!((pts[pts.len() - 1] - attach).length() < 1e-5);
}

#[test]
fn chain_links_hold_their_spacing_and_stay_in_plane() {
    let cfg = SceneConfig::default();
    let card_z = cfg.card_start_position().z;
    let mut s = CardScene::new(cfg, 640, 480);
    run(&mut s, 240);

    let ConnectorRig::Chain { segments } = &s.rig.connector else {
        panic!("default connector is a chain");
    };
    let mut prev = s.config.anchor;
    for seg in segments {
        let p = s.rig.world.position(*seg).unwrap();
        let d = (p - prev).length();
        assert!((d - 0.15).abs() < 0.15 * 0.25, "link length {d}");
        assert!(p.z.abs() < 1e-4, "segment left the plane: {p:?}");
        prev = p;
    }
    let card = s.rig.card_pose();
    assert!((card.position.z - card_z).abs() < 1e-4);
    // rotation stays about z only
    let (axis, angle) = card.rotation.to_axis_angle();
    assert!(angle.abs() < 1e-4 || axis.z.abs() > 0.999, "{axis:?} {angle}");
}

#[test]
fn spring_settles_near_rest_length_plus_sag() {
    let cfg = SceneConfig::default().with_connector_kind(ConnectorKind::Spring);
    let card_core::Connector::Spring {
        rest_length,
        stiffness,
        ..
    } = cfg.connector
    else {
        panic!("spring config");
    };
    let sag = cfg.card_mass * cfg.gravity.length() / stiffness;
    let mut s = CardScene::new(cfg, 640, 480);
    run(&mut s, 900);

    let pts = &s.scene.rope.points;
    assert_eq!(pts.len(), 2);
    let len = (pts[1] - pts[0]).length();
    assert!(
        (len - (rest_length + sag)).abs() < 0.05,
        "spring length {len}, expected about {}",
        rest_length + sag
    );
    let v = s.rig.world.linear_velocity(s.rig.card).unwrap();
    assert!(v.length() < 0.05, "still moving: {v:?}");
}

#[test]
fn card_never_sinks_through_ground() {
    let mut cfg = SceneConfig::default().with_connector_kind(ConnectorKind::Spring);
    // soft spring so the card would hang below the floor
    cfg.connector = card_core::Connector::Spring {
        rest_length: 4.0,
        stiffness: 5.0,
        damping: 1.0,
    };
    let ground_y = cfg.ground_y;
    let mut s = CardScene::new(cfg, 640, 480);
    run(&mut s, 600);
    let p = s.rig.card_pose().position;
    assert!(p.y > ground_y - 0.05, "card at {p:?}");
}

#[test]
fn debug_toggle_fills_and_clears_wireframe() {
    let mut s = CardScene::new(SceneConfig::default(), 640, 480);
    assert!(s.scene.debug_lines.is_empty());
    s.toggle_debug();
    s.frame();
    assert!(s.scene.show_debug);
    // card box alone is 12 edges
    assert!(s.scene.debug_lines.len() >= 12);
    s.toggle_debug();
    assert!(s.scene.debug_lines.is_empty());
}
