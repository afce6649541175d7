use globe_core::input::{key_command, ndc_from_pixels, KeyCommand};
use globe_core::{InputEvent, MouseState};
use glam::Vec2;

#[test]
fn keys_map_to_commands() {
    for k in ["r", "R", "Escape"] {
        assert_eq!(key_command(k), Some(KeyCommand::Reset));
    }
    assert_eq!(key_command("Enter"), Some(KeyCommand::Confirm));
    for k in [" ", "n", "N"] {
        assert_eq!(key_command(k), Some(KeyCommand::Decline));
    }
    assert_eq!(key_command("x"), None);
    assert_eq!(key_command(""), None);
}

#[test]
fn pixel_corners_map_to_ndc_corners() {
    assert_eq!(ndc_from_pixels(0.0, 0.0, 800, 600), Vec2::new(-1.0, 1.0));
    assert_eq!(ndc_from_pixels(800.0, 600.0, 800, 600), Vec2::new(1.0, -1.0));
    assert_eq!(ndc_from_pixels(400.0, 300.0, 800, 600), Vec2::ZERO);
    // zero-sized windows do not divide by zero
    assert!(ndc_from_pixels(5.0, 5.0, 0, 0).is_finite());
}

#[test]
fn press_release_in_place_is_a_click() {
    let mut mouse = MouseState::default();
    assert_eq!(mouse.moved(400.0, 300.0, 800, 600), None);
    mouse.press();
    assert!(mouse.moved(402.0, 301.0, 800, 600).is_some());
    let click = mouse.release(800, 600);
    match click {
        Some(InputEvent::PointerClick { ndc }) => {
            assert!((ndc - ndc_from_pixels(402.0, 301.0, 800, 600)).length() < 1e-6)
        }
        other => panic!("expected click, got {other:?}"),
    }
}

#[test]
fn drag_is_not_a_click() {
    let mut mouse = MouseState::default();
    mouse.moved(100.0, 100.0, 800, 600);
    mouse.press();
    let drag = mouse.moved(180.0, 100.0, 800, 600);
    assert_eq!(drag, Some(InputEvent::OrbitDrag { dx: 0.1, dy: 0.0 }));
    mouse.moved(100.0, 100.0, 800, 600);
    assert_eq!(mouse.release(800, 600), None);
    assert!(!mouse.down);
}

#[test]
fn release_without_press_is_ignored() {
    let mut mouse = MouseState::default();
    assert_eq!(mouse.release(800, 600), None);
}
