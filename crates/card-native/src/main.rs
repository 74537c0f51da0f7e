use std::time::{Duration, Instant};

use anyhow::Context;
use card_core::{CardScene, ConfigError, ConnectorKind, SceneConfig};
use card_render::Renderer;
use clap::Parser;
use glam::Vec2;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

#[derive(Parser, Debug)]
#[command(
    name = "card-native",
    version,
    about = "A card hanging from a rope or spring; drag it with the mouse"
)]
struct Args {
    /// What the card hangs from
    #[arg(long, default_value = "rope", value_parser = parse_connector)]
    connector: ConnectorKind,

    /// Number of rope segments (rope only)
    #[arg(long)]
    segments: Option<usize>,

    /// Start with physics wireframes visible (toggle with D)
    #[arg(long)]
    debug: bool,
}

fn parse_connector(s: &str) -> Result<ConnectorKind, ConfigError> {
    s.parse()
}

impl Args {
    /// Bad values are logged and left at their defaults.
    fn scene_config(&self) -> SceneConfig {
        let mut config = SceneConfig::default().with_connector_kind(self.connector);
        if let Some(n) = self.segments {
            match config.clone().with_segments(n) {
                Ok(c) => config = c,
                Err(e) => log::warn!("[config] {}; keeping default", e),
            }
        }
        config.debug = self.debug;
        config
    }
}

struct App<'w> {
    window: &'w winit::window::Window,
    renderer: Renderer<'w>,
    scene: CardScene,
    cursor: Vec2,
    fps_window_start: Instant,
    fps_frames: u32,
}

impl<'w> App<'w> {
    async fn new(window: &'w winit::window::Window, config: SceneConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let renderer = Renderer::new(window, size.width, size.height).await?;
        let scene = CardScene::new(config, size.width, size.height);
        Ok(Self {
            window,
            renderer,
            scene,
            cursor: Vec2::ZERO,
            fps_window_start: Instant::now(),
            fps_frames: 0,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.scene.resize(new_size.width, new_size.height);
        self.renderer
            .resize_if_needed(new_size.width, new_size.height);
    }

    fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let stats = self.scene.frame();
        self.fps_frames += 1;
        let elapsed = self.fps_window_start.elapsed();
        if elapsed >= Duration::from_secs(1) {
            let fps = self.fps_frames as f32 / elapsed.as_secs_f32();
            self.window.set_title(&format!(
                "Hanging card ({:?}) - {:.0} fps{}",
                stats.connector,
                fps,
                if self.scene.scene.show_debug { " - debug" } else { "" }
            ));
            log::debug!(
                "[frame] {} card=({:.2},{:.2},{:.2}) points={}",
                stats.frame_index,
                stats.card_position.x,
                stats.card_position.y,
                stats.card_position.z,
                stats.line_points
            );
            self.fps_window_start = Instant::now();
            self.fps_frames = 0;
        }
        self.renderer.render(&self.scene.scene, &self.scene.camera)
    }

    fn mouse_input(&mut self, state: ElementState, button: MouseButton) {
        if button != MouseButton::Left {
            return;
        }
        match state {
            ElementState::Pressed => {
                self.scene.pointer_down(self.cursor);
            }
            ElementState::Released => self.scene.pointer_up(),
        }
    }

    fn wheel(&mut self, delta: MouseScrollDelta) {
        let steps = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(p) => p.y as f32 / 50.0,
        };
        self.scene.zoom(steps);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    let args = Args::parse();
    let config = args.scene_config();
    log::info!(
        "card-native starting: {:?} connector, debug={}",
        config.connector.kind(),
        config.debug
    );

    let event_loop = EventLoop::new().context("event loop")?;
    let window = WindowBuilder::new()
        .with_title("Hanging card")
        .with_inner_size(winit::dpi::LogicalSize::new(1024.0, 768.0))
        .build(&event_loop)
        .context("window")?;

    let mut app = pollster::block_on(App::new(&window, config)).context("gpu")?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => app.resize(size),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                app.cursor = Vec2::new(position.x as f32, position.y as f32);
                app.scene.pointer_move(app.cursor);
            }
            WindowEvent::MouseInput { state, button, .. } => app.mouse_input(state, button),
            WindowEvent::MouseWheel { delta, .. } => app.wheel(delta),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match logical_key {
                Key::Named(NamedKey::Escape) => elwt.exit(),
                Key::Character(c) if c.eq_ignore_ascii_case("d") => {
                    app.scene.toggle_debug();
                    log::info!("[debug] wireframes {}", app.scene.scene.show_debug);
                }
                _ => {}
            },
            _ => {}
        },
        Event::AboutToWait => match app.frame() {
            Ok(_) => app.window.request_redraw(),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                app.renderer.reconfigure()
            }
            Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
            Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
        },
        _ => {}
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_rope_without_debug() {
        let args = Args::try_parse_from(["card-native"]).unwrap();
        let cfg = args.scene_config();
        assert_eq!(cfg.connector.kind(), ConnectorKind::Rope);
        assert!(!cfg.debug);
    }

    #[test]
    fn spring_with_debug() {
        let args = Args::try_parse_from(["card-native", "--connector", "spring", "--debug"]).unwrap();
        let cfg = args.scene_config();
        assert_eq!(cfg.connector.kind(), ConnectorKind::Spring);
        assert!(cfg.debug);
        assert_eq!(cfg.connector.tracked_point_count(), 2);
    }

    #[test]
    fn out_of_range_segments_fall_back_to_default() {
        let args = Args::try_parse_from(["card-native", "--segments", "0"]).unwrap();
        assert_eq!(args.scene_config(), SceneConfig::default());

        let args = Args::try_parse_from(["card-native", "--segments", "3"]).unwrap();
        assert_eq!(args.scene_config().connector.tracked_point_count(), 5);
    }

    #[test]
    fn unknown_connector_is_rejected() {
        assert!(Args::try_parse_from(["card-native", "--connector", "bungee"]).is_err());
    }
}
