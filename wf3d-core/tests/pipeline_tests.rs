use wf3d_core::projection::{clip_segment, project_point, unproject};
use wf3d_core::{
    Camera, CameraSettings, Color, Cube, DemoScene, DrawCommand, DrawList, Engine, FrameContext,
    FrameRotation, InputSnapshot, Key, Point, ScreenPoint, Vec3, Viewport,
};

const EPS: f64 = 1e-9;

fn viewport() -> Viewport {
    Viewport::new(600, 400).unwrap()
}

fn camera_at_origin() -> Camera {
    Camera::new(CameraSettings {
        position: Vec3::zeros(),
        fov: 240.0,
        near_clip: 1.0,
        ..CameraSettings::default()
    })
    .unwrap()
}

#[test]
fn point_on_view_axis_projects_to_center() {
    let mut engine = Engine::new(camera_at_origin(), viewport()).with_crosshair(None);
    engine.add(Point::new(Vec3::new(0.0, 0.0, 10.0), Color::WHITE, 2));

    let mut canvas = DrawList::new();
    engine.render(&mut canvas);

    let circles: Vec<_> = canvas.circles().collect();
    assert_eq!(circles, vec![(ScreenPoint::new(300.0, 200.0), 2, Color::WHITE)]);
}

#[test]
fn edge_crossing_near_plane_is_clipped_then_projected() {
    let (near, far) = clip_segment(Vec3::new(4.0, -2.0, 0.5), Vec3::new(4.0, -2.0, 5.0), 1.0);
    assert_eq!(near.z, 1.0);
    assert_eq!(far.z, 5.0);

    let frame = FrameContext::new(&camera_at_origin(), viewport());
    let (near_screen, far_screen) = frame
        .project_segment(&Vec3::new(4.0, -2.0, 0.5), &Vec3::new(4.0, -2.0, 5.0))
        .unwrap();
    assert!(near_screen.x.is_finite() && near_screen.y.is_finite());
    assert!((near_screen.x - (240.0 * 4.0 + 300.0)).abs() < EPS);
    assert!((near_screen.y - (240.0 * -2.0 + 200.0)).abs() < EPS);
    assert!((far_screen.x - (240.0 * 4.0 / 5.0 + 300.0)).abs() < EPS);
    assert!((far_screen.y - (240.0 * -2.0 / 5.0 + 200.0)).abs() < EPS);

    // the far endpoint needs no clipping and agrees with the point projection
    assert_eq!(project_point(&far, 240.0, 1.0, viewport()), Some(far_screen));
}

#[test]
fn clipped_segments_stay_in_front_of_near_plane() {
    let segments = [
        (Vec3::new(0.0, 0.0, -10.0), Vec3::new(1.0, 1.0, 10.0)),
        (Vec3::new(5.0, -3.0, 20.0), Vec3::new(-5.0, 3.0, 0.25)),
        (Vec3::new(-1.0, 2.0, 1.5), Vec3::new(3.0, 2.0, 1.0)),
        (Vec3::new(0.0, 0.0, 1.0 + 1e-12), Vec3::new(0.0, 0.0, -1e9)),
    ];
    for (a, b) in segments {
        let (ca, cb) = clip_segment(a, b, 1.0);
        assert!(ca.z >= 1.0 && cb.z >= 1.0, "{:?} {:?}", ca, cb);

        let again = clip_segment(ca, cb, 1.0);
        assert_eq!(again, (ca, cb));
    }
}

#[test]
fn projection_round_trips_through_unproject() {
    let rotation = FrameRotation::from_degrees(17.0, -62.0);
    let world = Vec3::new(12.0, -7.0, 40.0);
    let camera_point = rotation.apply(&world);
    assert!(camera_point.z > 1.0);

    let screen = project_point(&camera_point, 240.0, 1.0, viewport()).unwrap();
    let recovered = unproject(&screen, camera_point.z, 240.0, viewport());
    assert!((recovered - camera_point).norm() < 1e-9);
}

#[test]
fn zero_rotation_is_identity() {
    let rotation = FrameRotation::from_degrees(0.0, 0.0);
    for v in [Vec3::new(1.0, 2.0, 3.0), Vec3::new(-9.5, 0.0, 1e6)] {
        assert_eq!(rotation.apply(&v), v);
    }
}

#[test]
fn forward_step_moves_only_along_z() {
    let mut camera = camera_at_origin();
    let speed = camera.move_speed();
    for tick in 1..=3 {
        camera.update(&InputSnapshot::with_keys(&[Key::Forward]));
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, speed * tick as f64));
    }
}

#[test]
fn rotate_to_world_follows_yaw() {
    let mut camera = camera_at_origin();
    assert!((camera.rotate_to_world(4.0, 0.0) - Vec3::new(4.0, 0.0, 0.0)).norm() < EPS);
    camera.yaw = 90.0;
    assert!((camera.rotate_to_world(4.0, 0.0) - Vec3::new(0.0, 0.0, 4.0)).norm() < EPS);
}

#[test]
fn cube_always_accounts_for_twelve_edges() {
    let cube = Cube::new(Vec3::zeros(), Color::WHITE, 30.0);
    let mut camera = camera_at_origin();

    // sweep the camera through, around and behind the cube
    for step in 0..40 {
        camera.position = Vec3::new(
            (step as f64 * 7.0) - 140.0,
            (step as f64 * 3.0) - 60.0,
            (step as f64 * 11.0) - 220.0,
        );
        camera.rotate(step as f64 * 13.0, step as f64 * -5.0);

        let frame = FrameContext::new(&camera, viewport());
        let mut canvas = DrawList::new();
        let stats = cube.draw(&frame, &mut canvas);
        assert_eq!(stats.total(), 12);
        assert_eq!(canvas.lines().count(), stats.drawn);
        for (from, to, _) in canvas.lines() {
            assert!(from.x.is_finite() && from.y.is_finite());
            assert!(to.x.is_finite() && to.y.is_finite());
        }
    }
}

#[test]
fn demo_scene_frame_is_consistent() {
    let mut engine =
        Engine::demo_scene(CameraSettings::default(), viewport(), DemoScene::default()).unwrap();
    let mut canvas = DrawList::new();

    let mut input = InputSnapshot::with_mouse(12.0, -3.0);
    input.press(Key::Forward);
    input.press(Key::Right);
    let stats = engine.tick(&input, &mut canvas);

    assert_eq!(stats.entities, 126);
    // one point plus twelve edges per cube
    assert_eq!(stats.primitives.total(), 1 + 125 * 12);
    assert_eq!(canvas.commands()[0], DrawCommand::Clear(Color::BLACK));

    // crosshair lines come after every entity
    let crosshair = &canvas.commands()[canvas.len() - 2..];
    for command in crosshair {
        match command {
            DrawCommand::Line { color, .. } => assert_eq!(*color, Color::GREEN),
            other => panic!("expected crosshair line, got {:?}", other),
        }
    }
    assert_eq!(canvas.len(), 1 + stats.primitives.drawn + 2);
}

#[test]
fn invalid_near_clip_is_rejected_up_front() {
    let result = Camera::new(CameraSettings {
        near_clip: -0.5,
        ..CameraSettings::default()
    });
    assert!(result.is_err());
    assert_eq!(
        result.unwrap_err().to_string(),
        "near clip distance must be finite and greater than zero, got -0.5"
    );
}
