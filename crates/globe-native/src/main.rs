use globe_core::{
    default_markers, CursorStyle, FocusInfo, GlobeConfig, GlobeEvent, GlobeSession, GlobeTuning,
    InputEvent, MouseState, SessionClock,
};
use winit::event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::{CursorIcon, Window, WindowBuilder};

mod render;

const WINDOW_TITLE: &str = "Project Globe";

/// Key identity as the core expects it (`"r"`, `"Escape"`, `"Enter"`, `" "`).
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Character(s) => Some(s.to_string()),
        Key::Named(NamedKey::Escape) => Some("Escape".to_string()),
        Key::Named(NamedKey::Enter) => Some("Enter".to_string()),
        Key::Named(NamedKey::Space) => Some(" ".to_string()),
        _ => None,
    }
}

fn present_focus(window: &Window, info: &FocusInfo) {
    log::info!(
        "[focus] {} ({}) at {:.1}°, {:.1}° colour #{}",
        info.title,
        info.id,
        info.lat,
        info.lng,
        info.color_hex()
    );
    log::info!("[focus] Enter: back to the default view, Space: stay here (R / Escape also reset)");
    window.set_title(&format!("{WINDOW_TITLE} - {}", info.title));
}

fn present_events(window: &Window, events: &[GlobeEvent]) {
    for ev in events {
        match ev {
            GlobeEvent::MarkerFocused(info) => present_focus(window, info),
            GlobeEvent::ReturnedToDefault => {
                log::info!("[focus] back to the default view");
                window.set_title(WINDOW_TITLE);
            }
            GlobeEvent::CursorChanged(style) => window.set_cursor_icon(match style {
                CursorStyle::Pointer => CursorIcon::Pointer,
                CursorStyle::Default => CursorIcon::Default,
            }),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = GlobeConfig::default();
    // markers are ~4.75 units from the resting camera, past the library default
    let tuning = GlobeTuning {
        pick_max_distance: 6.0,
        ..GlobeTuning::default()
    };
    let mut session = GlobeSession::new(config, tuning, &default_markers())?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 800.0))
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(render::GpuState::new(&window, config.radius()))?;
    let mut size = window.inner_size();
    session.enqueue(InputEvent::Resize {
        width: size.width,
        height: size.height,
    });

    let clock = SessionClock::start();
    let mut mouse = MouseState::default();
    let mut events = Vec::new();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(new_size) => {
                size = new_size;
                gpu.resize(new_size);
                session.enqueue(InputEvent::Resize {
                    width: new_size.width,
                    height: new_size.height,
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                if let Some(drag) = mouse.moved(x, y, size.width, size.height) {
                    session.enqueue(drag);
                }
                session.enqueue(InputEvent::PointerMove {
                    ndc: mouse.ndc(size.width, size.height),
                });
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => mouse.press(),
                ElementState::Released => {
                    if let Some(click) = mouse.release(size.width, size.height) {
                        session.enqueue(click);
                    }
                }
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => (p.y / 40.0) as f32,
                };
                session.enqueue(InputEvent::Zoom { steps });
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if let Some(name) = key_name(&event.logical_key) {
                    session.enqueue(InputEvent::Key(name));
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            events.clear();
            session.tick(clock.elapsed_sec(), &mut gpu, &mut events);
            present_events(gpu.window, &events);
            match gpu.last_error.take() {
                None => gpu.window.request_redraw(),
                Some(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.resize(size),
                Some(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[gpu] out of memory");
                    elwt.exit();
                }
                Some(e) => log::warn!("[gpu] {e:?}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}
