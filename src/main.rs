use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use scroll_showcase::cli::Cli;
use scroll_showcase::config::Config;
use scroll_showcase::controls::OrbitControls;
use scroll_showcase::core::{InputAction, Viewport, WinitController};
use scroll_showcase::frame::{FpsCounter, FrameClock};
use scroll_showcase::renderer::Renderer;
use scroll_showcase::AppState;

// === Application ===

struct App {
    config: Config,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    state: Option<AppState>,
    input: WinitController,
    clock: FrameClock,
    fps: FpsCounter,
    title: String,
}

impl App {
    fn new(config: Config) -> Self {
        let input = WinitController::new(config.input.line_height_px, config.input.page_fraction);
        Self {
            config,
            window: None,
            renderer: None,
            state: None,
            input,
            clock: FrameClock::new(),
            fps: FpsCounter::new(),
            title: String::new(),
        }
    }

    /// Window, scene, bindings and GPU setup; runs once
    fn bootstrap(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_config = &self.config.window;
        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title(window_config.title.as_str())
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        window_config.width,
                        window_config.height,
                    )),
            )
            .context("failed to create window")?;
        let window = Arc::new(window);

        let size = window.inner_size();
        let viewport = Viewport::from_physical(size.width, size.height, window.scale_factor());

        let controls = OrbitControls::new()
            .with_speeds(self.config.input.rotate_speed, self.config.input.zoom_speed);
        let state = AppState::bootstrap(viewport, self.config.page.layout())
            .context("failed to register scroll bindings")?
            .with_controls(controls);

        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            state.scene(),
            viewport,
            window_config.antialias,
        ))
        .context("failed to initialize renderer")?;

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.state = Some(state);
        self.update_title();
        Ok(())
    }

    fn resize(&mut self) {
        let (Some(window), Some(state), Some(renderer)) =
            (&self.window, &mut self.state, &mut self.renderer)
        else {
            return;
        };
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return;
        }
        let viewport = Viewport::from_physical(size.width, size.height, window.scale_factor());
        state.resize(viewport);
        renderer.resize(size, viewport.drawing_buffer_size());
        self.update_title();
    }

    /// Section under the viewport center and scroll percentage
    fn update_title(&mut self) {
        let (Some(window), Some(state)) = (&self.window, &self.state) else {
            return;
        };
        let title = format!(
            "{} - {} ({:.0}%)",
            self.config.window.title,
            state.section_at_center().unwrap_or("-"),
            state.scroll.fraction() * 100.0
        );
        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frame = self.clock.tick();
        if let Some(fps) = self.fps.record(frame.delta) {
            log::debug!("FPS: {:.1}", fps);
        }

        let (Some(state), Some(renderer)) = (&mut self.state, &mut self.renderer) else {
            return;
        };
        state.tick(&frame);

        match renderer.render(state) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated, reconfiguring");
                renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("render error: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.bootstrap(event_loop) {
            log::error!("{:#}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => self.resize(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            event => {
                let viewport = match &self.state {
                    Some(state) => state.viewport,
                    None => Viewport::new(0.0, 0.0, 1.0),
                };
                match self.input.process_event(&event, &viewport) {
                    Some(InputAction::Quit) => event_loop.exit(),
                    Some(action) => {
                        if let Some(state) = &mut self.state {
                            state.apply(action);
                        }
                        self.update_title();
                    }
                    None => {}
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let config = cli.resolve_config().context("failed to load configuration")?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config);

    log::info!("Scroll Showcase - wheel/keys scroll, drag to orbit, ctrl+wheel to zoom, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
