//! Orrery - real-time 3D solar system viewer
//!
//! Draws a sun, its planets and their moons moving on their orbits, with an
//! overview camera, a free camera and a camera that follows a chosen planet.

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use orrery::config::AppConfig;
use orrery::input::{InputAction, InputMapper};
use orrery::scene::load_system;
use orrery::systems::{
    overview_camera, CameraMode, RenderError, RenderSystem, SimulationSystem, WindowSystem,
};
use orrery_core::{RenderLayers, SimulationClock, SolarSystem};
use orrery_input::CameraController;
use orrery_render::camera::Camera3D;

/// Main application state
struct App {
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    system: SolarSystem,
    camera: Camera3D,
    controller: CameraController,
    simulation: SimulationSystem,
    /// Last overlay text, kept to refresh the title on cursor changes
    overlay: Vec<String>,
}

impl App {
    fn new(config: AppConfig, mut system: SolarSystem) -> Self {
        let mut camera = overview_camera(&system, config.camera.fov);

        let input = &config.input;
        let mut controller = CameraController::new()
            .with_move_speed(input.move_speed)
            .with_mouse_sensitivity(input.mouse_sensitivity)
            .with_orbit_sensitivity(input.orbit_sensitivity)
            .with_orbit_key_step(input.orbit_key_step)
            .with_scene_sensitivity(input.scene_sensitivity)
            .with_zoom_sensitivity(input.zoom_sensitivity)
            .with_zoom_unit(system.view_hints().zoom_unit)
            .with_smoothing_half_life(input.smoothing_half_life)
            .with_smoothing(input.smoothing_enabled);

        let mut clock = SimulationClock::new(config.simulation.time_scale);
        if config.simulation.start_paused {
            clock.toggle_pause();
        }
        let mut simulation = SimulationSystem::new(clock);

        if config.camera.start_tracking > 0 {
            simulation.set_mode(
                CameraMode::Tracking(config.camera.start_tracking),
                &mut system,
                &mut camera,
                &mut controller,
            );
        }

        Self {
            config,
            window: None,
            render: None,
            system,
            camera,
            controller,
            simulation,
            overlay: Vec::new(),
        }
    }

    fn refresh_title(&self) {
        if let Some(window) = &self.window {
            if self.config.debug.show_overlay {
                window.update_title(&self.overlay);
            } else {
                window.update_title(&[]);
            }
        }
    }

    fn release_cursor(&mut self) {
        if let Some(window) = &mut self.window {
            window.release_cursor();
        }
    }

    fn set_mode(&mut self, mode: CameraMode) {
        self.simulation
            .set_mode(mode, &mut self.system, &mut self.camera, &mut self.controller);
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::ToggleCursor => {
                if let Some(window) = &mut self.window {
                    if window.is_cursor_captured() {
                        window.release_cursor();
                    } else {
                        window.capture_cursor();
                    }
                }
            }
            InputAction::Exit => event_loop.exit(),
            InputAction::ResetCamera => {
                self.release_cursor();
                self.simulation
                    .reset_camera(&mut self.system, &mut self.camera, &mut self.controller);
                log::info!("Camera reset to overview");
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::FreeCamera => {
                self.set_mode(CameraMode::Free);
                if let Some(window) = &mut self.window {
                    window.capture_cursor();
                }
            }
            InputAction::OverviewCamera => {
                self.release_cursor();
                self.set_mode(CameraMode::Overview);
            }
            InputAction::TrackBody(n) => {
                self.release_cursor();
                self.set_mode(CameraMode::Tracking(n));
            }
            InputAction::ToggleSkybox => {
                if let Some(render) = &mut self.render {
                    let palette = render.toggle_palette();
                    log::info!("Sky: {:?}", palette);
                }
            }
            InputAction::TogglePause => {
                let paused = self.simulation.clock_mut().toggle_pause();
                log::info!("Clock {}", if paused { "paused" } else { "running" });
            }
            InputAction::SpeedUp => {
                self.simulation.clock_mut().speed_up();
                log::info!("Time scale: x{}", self.simulation.clock().time_scale());
            }
            InputAction::SlowDown => {
                self.simulation.clock_mut().slow_down();
                log::info!("Time scale: x{}", self.simulation.clock().time_scale());
            }
            InputAction::ToggleOrbits => {
                if let Some(render) = &mut self.render {
                    let shown = render.toggle_layer(RenderLayers::ORBITS);
                    log::info!("Orbits: {}", if shown { "ON" } else { "OFF" });
                }
            }
            InputAction::ToggleSmoothing => {
                let enabled = self.controller.toggle_smoothing();
                log::info!("Input smoothing: {}", if enabled { "ON" } else { "OFF" });
            }
        }
        self.refresh_title();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let captured = self
            .window
            .as_ref()
            .is_some_and(WindowSystem::is_cursor_captured);

        let result = self.simulation.update(
            &mut self.system,
            &mut self.camera,
            &mut self.controller,
            captured,
        );
        if let Some(overlay) = result.overlay {
            self.overlay = overlay;
            self.refresh_title();
        }

        if let Some(render) = &mut self.render {
            let elapsed = self.simulation.clock().elapsed() as f32;
            match render.render_frame(&self.camera, &self.system, elapsed) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => render.recover_surface(),
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        match RenderSystem::new(
            window.window().clone(),
            self.config.rendering.clone(),
            self.config.window.vsync,
        ) {
            Ok(render) => self.render = Some(render),
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(render) = &mut self.render {
                    render.resize(size.width, size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    let captured = self
                        .window
                        .as_ref()
                        .is_some_and(WindowSystem::is_cursor_captured);
                    if let Some(action) = InputMapper::map_keyboard(key, event.state, captured) {
                        self.handle_action(action, event_loop);
                    }
                    self.controller.process_keyboard(key, event.state);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let captured = self
                    .window
                    .as_ref()
                    .is_some_and(WindowSystem::is_cursor_captured);
                let free = self.simulation.mode() == CameraMode::Free;
                if let Some(action) = InputMapper::map_mouse_button(button, state, captured, free) {
                    self.handle_action(action, event_loop);
                }
                self.controller.process_mouse_button(button, state);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.controller.process_scroll(notches);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.controller.process_mouse_motion(delta.0, delta.1);
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Logging reads its default level from the config, so load that first
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting Orrery");
    if let Some(e) = config_error {
        log::warn!("{}. Using defaults.", e);
    }

    let system = load_system(&config.simulation)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, system);
    event_loop.run_app(&mut app)?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("orrery: {}", e);
        std::process::exit(1);
    }
}
