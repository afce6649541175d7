// End-to-end tests driving a whole session through queued input and ticks.

use globe_core::{
    CameraMode, CursorStyle, FrameSink, FrameSnapshot, GlobeConfig, GlobeEvent, GlobeSession,
    GlobeTuning, InputEvent, MarkerSpec,
};
use glam::{Vec2, Vec3};

#[derive(Default)]
struct CountingSink {
    frames: usize,
    markers: usize,
    last_eye: Vec3,
    last_mode: Option<CameraMode>,
    lines: usize,
}

impl FrameSink for CountingSink {
    fn render(&mut self, frame: &FrameSnapshot<'_>) {
        self.frames += 1;
        self.markers = frame.markers.len();
        self.last_eye = frame.camera.eye;
        self.last_mode = Some(frame.mode);
        self.lines = frame.grid.lines().count();
        assert!((frame.atmosphere_radius - frame.globe_radius * 1.05).abs() < 1e-5);
    }
}

/// One marker straight in front of the default camera, plus one on the far side.
fn session() -> GlobeSession {
    let markers = vec![
        MarkerSpec::new("front", "Front Project", 0.0, -90.0, 0x33ff33, 0.25),
        MarkerSpec::new("back", "Back Project", 0.0, 90.0, 0x3333ff, 0.25),
    ];
    // markers seen from the default camera are ~4.75 away
    let tuning = GlobeTuning {
        pick_max_distance: 6.0,
        ..GlobeTuning::default()
    };
    GlobeSession::new(GlobeConfig::default(), tuning, &markers).unwrap()
}

#[test]
fn every_tick_renders_one_frame() {
    let mut s = session();
    let mut sink = CountingSink::default();
    let mut events = Vec::new();
    for i in 0..10 {
        s.tick(i as f64 / 60.0, &mut sink, &mut events);
    }
    assert_eq!(sink.frames, 10);
    assert_eq!(sink.markers, 2);
    assert_eq!(sink.lines, 22 + 36);
    assert_eq!(sink.last_mode, Some(CameraMode::Orbiting));
    assert!(events.is_empty());
}

#[test]
fn globe_spins_only_while_orbiting() {
    let mut s = session();
    let mut sink = CountingSink::default();
    let mut events = Vec::new();
    s.tick(0.0, &mut sink, &mut events);
    s.tick(1.0, &mut sink, &mut events);
    let spun = s.globe_rotation();
    assert!((spun * Vec3::Z - Vec3::Z).length() > 0.01);

    // the front marker drifted off-centre; click where it is drawn now
    let front = s.registry().index_of("front").unwrap();
    let world = s.registry().get(front).unwrap().world_position(spun);
    let ndc = s
        .camera()
        .state()
        .camera
        .view_proj()
        .project_point3(world)
        .truncate();
    assert!(ndc.x.abs() > 0.01);
    s.enqueue(InputEvent::PointerClick { ndc });
    s.tick(1.0, &mut sink, &mut events);
    assert_eq!(s.camera().mode(), CameraMode::AnimatingIn);
    s.tick(1.5, &mut sink, &mut events);
    assert_eq!(s.globe_rotation(), spun);
}

#[test]
fn click_focus_reset_cycle() {
    let mut s = session();
    let mut sink = CountingSink::default();
    let mut events = Vec::new();

    let hit = s.pick_at(Vec2::ZERO).expect("front marker under the centre");
    assert_eq!(hit.id, "front");
    assert!(hit.distance > 4.0 && hit.distance < 5.0);

    s.enqueue(InputEvent::PointerClick { ndc: Vec2::ZERO });
    s.tick(0.0, &mut sink, &mut events);
    assert_eq!(s.camera().mode(), CameraMode::AnimatingIn);
    let front = s.registry().index_of("front").unwrap();
    assert_eq!(s.registry().get(front).unwrap().scale, 1.5);

    s.tick(0.5, &mut sink, &mut events);
    assert!(sink.last_eye.z < 10.0 && sink.last_eye.z > 7.5);
    assert_eq!(s.registry().get(front).unwrap().scale, 1.0);

    s.tick(1.6, &mut sink, &mut events);
    assert_eq!(s.camera().mode(), CameraMode::Focused);
    assert!((sink.last_eye - Vec3::new(0.0, 0.0, 7.5)).length() < 1e-3);
    match events.as_slice() {
        [GlobeEvent::MarkerFocused(info)] => assert_eq!(info.title, "Front Project"),
        other => panic!("unexpected events {other:?}"),
    }
    events.clear();

    // clicks while focused do nothing
    s.enqueue(InputEvent::PointerClick { ndc: Vec2::ZERO });
    s.tick(1.7, &mut sink, &mut events);
    assert_eq!(s.camera().mode(), CameraMode::Focused);

    s.enqueue(InputEvent::Key("r".into()));
    s.tick(2.0, &mut sink, &mut events);
    assert_eq!(s.camera().mode(), CameraMode::AnimatingOut);
    s.tick(3.5, &mut sink, &mut events);
    assert_eq!(s.camera().mode(), CameraMode::Orbiting);
    assert_eq!(events, vec![GlobeEvent::ReturnedToDefault]);
    assert!((sink.last_eye - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-3);
}

#[test]
fn confirming_the_prompt_resets() {
    let mut s = session();
    let mut sink = CountingSink::default();
    let mut events = Vec::new();
    s.enqueue(InputEvent::PointerClick { ndc: Vec2::ZERO });
    s.tick(0.0, &mut sink, &mut events);
    s.tick(1.5, &mut sink, &mut events);
    assert_eq!(s.camera().mode(), CameraMode::Focused);
    s.enqueue(InputEvent::PromptAnswer { reset: true });
    s.tick(1.6, &mut sink, &mut events);
    assert_eq!(s.camera().mode(), CameraMode::AnimatingOut);
}

#[test]
fn declining_holds_the_view_then_guards_input() {
    let mut s = session();
    let mut sink = CountingSink::default();
    let mut events = Vec::new();
    s.enqueue(InputEvent::PointerClick { ndc: Vec2::ZERO });
    s.tick(0.0, &mut sink, &mut events);
    s.tick(1.6, &mut sink, &mut events);
    assert_eq!(s.camera().mode(), CameraMode::Focused);

    s.enqueue(InputEvent::PromptAnswer { reset: false });
    s.tick(2.0, &mut sink, &mut events);
    assert_eq!(s.camera().mode(), CameraMode::Orbiting);
    let held = sink.last_eye;
    assert!((held - Vec3::new(0.0, 0.0, 7.5)).length() < 1e-3);

    // inside the guard window: drags and clicks are dropped
    s.enqueue(InputEvent::OrbitDrag { dx: 0.3, dy: 0.0 });
    s.enqueue(InputEvent::PointerClick { ndc: Vec2::ZERO });
    s.tick(2.2, &mut sink, &mut events);
    assert_eq!(s.camera().mode(), CameraMode::Orbiting);
    assert_eq!(sink.last_eye, held);

    // after it, a click focuses again
    s.enqueue(InputEvent::PointerClick { ndc: Vec2::ZERO });
    s.tick(2.6, &mut sink, &mut events);
    assert_eq!(s.camera().mode(), CameraMode::AnimatingIn);
}

#[test]
fn hover_changes_cursor_only_on_edges() {
    let mut s = session();
    let mut sink = CountingSink::default();
    let mut events = Vec::new();
    s.enqueue(InputEvent::PointerMove { ndc: Vec2::ZERO });
    s.enqueue(InputEvent::PointerMove { ndc: Vec2::new(0.001, 0.0) });
    s.tick(0.0, &mut sink, &mut events);
    assert_eq!(events, vec![GlobeEvent::CursorChanged(CursorStyle::Pointer)]);
    assert_eq!(s.cursor(), CursorStyle::Pointer);

    events.clear();
    s.enqueue(InputEvent::PointerMove { ndc: Vec2::new(0.9, 0.9) });
    s.tick(0.016, &mut sink, &mut events);
    assert_eq!(events, vec![GlobeEvent::CursorChanged(CursorStyle::Default)]);
}

#[test]
fn far_side_marker_is_never_picked_through_the_globe() {
    let s = session();
    let back = s.registry().index_of("back").unwrap();
    let m = s.registry().get(back).unwrap();
    assert!(m.position.z < 0.0);
    // nothing in the picking path ever reports the back marker from the front
    for x in -10..=10 {
        for y in -10..=10 {
            let ndc = Vec2::new(x as f32 / 10.0, y as f32 / 10.0);
            if let Some(hit) = s.pick_at(ndc) {
                assert_eq!(hit.id, "front");
            }
        }
    }
}

#[test]
fn drag_orbits_the_camera() {
    let mut s = session();
    let mut sink = CountingSink::default();
    let mut events = Vec::new();
    s.tick(0.0, &mut sink, &mut events);
    s.enqueue(InputEvent::OrbitDrag { dx: 0.1, dy: 0.0 });
    for i in 1..30 {
        s.tick(i as f64 / 60.0, &mut sink, &mut events);
    }
    assert!(sink.last_eye.x.abs() > 0.1);
    assert!((sink.last_eye.length() - 10.0).abs() < 1e-2);
}

#[test]
fn resize_updates_the_aspect_ratio() {
    let mut s = session();
    let mut sink = CountingSink::default();
    let mut events = Vec::new();
    s.enqueue(InputEvent::Resize {
        width: 1000,
        height: 500,
    });
    s.tick(0.0, &mut sink, &mut events);
    assert_eq!(s.camera().state().camera.aspect, 2.0);
}

#[test]
fn bad_markers_fail_session_creation() {
    let markers = vec![
        MarkerSpec::new("a", "A", 0.0, 0.0, 0xffffff, 0.2),
        MarkerSpec::new("a", "A again", 10.0, 0.0, 0xffffff, 0.2),
    ];
    assert!(GlobeSession::new(GlobeConfig::default(), GlobeTuning::default(), &markers).is_err());
}
