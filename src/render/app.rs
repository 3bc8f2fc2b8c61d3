//! App entrypoint for the rendering layer.
//!
//! This module owns:
//! - the winit application lifecycle + event loop
//! - creating the window
//! - delegating to an injected async state builder
//! - forwarding key presses (`Escape` exits; everything else goes to the state)
//!
//! The runner is generic over a state type `S: AppState`; `run_with_config` plugs in the
//! cross product `Viewer`.

use std::{future::Future, pin::Pin, sync::Arc};

use anyhow::Context as _;
use log::{error, info};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::GeometryConfig;
use crate::render::viewer::Viewer;

/// App-facing configuration for running the winit event loop.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Window title.
    pub title: String,
    /// ControlFlow for the event loop. Default is `Poll` (continuous redraw).
    pub control_flow: ControlFlow,
    /// Camera orbit speed around the parallelogram, radians per second. 0 disables it.
    pub orbit_speed: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "crossview".to_string(),
            control_flow: ControlFlow::Poll,
            orbit_speed: 0.35,
        }
    }
}

/// Minimal trait a state must implement to be driven by the app runner.
pub trait AppState: 'static {
    /// Handle window resize.
    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>);

    /// Render one frame.
    fn render(&mut self) -> anyhow::Result<()>;

    /// Request a redraw on the underlying window (used for continuous animation).
    fn request_redraw(&self);

    /// A key went down (repeats excluded). `Escape` is handled by the runner.
    fn key_pressed(&mut self, _key: KeyCode) {}
}

/// Run the cross product viewer with explicit window and geometry configuration.
pub fn run_with_config(config: AppConfig, geometry: GeometryConfig) -> anyhow::Result<()> {
    geometry
        .validate()
        .context("invalid geometry configuration")?;

    let orbit_speed = config.orbit_speed;
    run_with_builder(config, move |window| async move {
        Viewer::new(window, geometry, orbit_speed).await
    })
}

/// Run the viewer using the default window configuration.
pub fn run(geometry: GeometryConfig) -> anyhow::Result<()> {
    run_with_config(AppConfig::default(), geometry)
}

/// Run the winit event loop with an injected async state builder.
///
/// Notes:
/// - The builder is called once when the app is resumed (after the window is created).
/// - The builder runs on the current thread using `pollster::block_on`.
/// - A builder (or window creation) failure stops the loop and is returned from here.
pub fn run_with_builder<S, B, Fut>(config: AppConfig, builder: B) -> anyhow::Result<()>
where
    S: AppState,
    B: FnOnce(Arc<Window>) -> Fut + 'static,
    Fut: Future<Output = anyhow::Result<S>> + 'static,
{
    let event_loop = EventLoop::new().context("winit: failed to create EventLoop")?;
    event_loop.set_control_flow(config.control_flow);

    let mut app = App::<S>::new_with_builder(config, builder);
    event_loop
        .run_app(&mut app)
        .context("winit: run_app failed")?;

    match app.init_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Type-erased async builder for creating a state `S` from a created window.
///
/// The future is pinned and boxed so `pollster::block_on(...)` can drive it.
type BoxedStateBuilder<S> = Box<
    dyn FnOnce(Arc<Window>) -> Pin<Box<dyn Future<Output = anyhow::Result<S>> + 'static>> + 'static,
>;

/// Application state used by winit.
struct App<S: AppState> {
    config: AppConfig,
    builder: Option<BoxedStateBuilder<S>>,
    state: Option<S>,
    init_error: Option<anyhow::Error>,
    exiting: bool,
}

impl<S: AppState> App<S> {
    fn new_with_builder<B, Fut>(config: AppConfig, builder: B) -> Self
    where
        B: FnOnce(Arc<Window>) -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<S>> + 'static,
    {
        Self {
            config,
            builder: Some(Box::new(|window| Box::pin(builder(window)))),
            state: None,
            init_error: None,
            exiting: false,
        }
    }

    fn init_state(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<S> {
        let window = Arc::new(
            event_loop
                .create_window(WindowAttributes::default().with_title(self.config.title.as_str()))
                .context("winit: failed to create window")?,
        );

        let builder = self
            .builder
            .take()
            .context("app state builder can only be consumed once")?;
        pollster::block_on(builder(window)).context("failed to initialize renderer")
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exiting = true;
        self.state = None;
        event_loop.exit();
    }
}

impl<S: AppState> ApplicationHandler for App<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Resumed can fire more than once on some platforms; build only once.
        if self.state.is_some() || self.builder.is_none() {
            return;
        }

        match self.init_state(event_loop) {
            Ok(state) => {
                state.request_redraw();
                self.state = Some(state);
            }
            Err(err) => {
                error!("{:#}", err);
                self.init_error = Some(err);
                self.exit(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.exiting {
            return;
        }
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested; exiting");
                self.exit(event_loop);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                if code == KeyCode::Escape {
                    info!("Escape pressed; exiting");
                    self.exit(event_loop);
                    return;
                }
                state.key_pressed(code);
                state.request_redraw();
            }
            WindowEvent::Resized(size) => {
                state.resize(size);
                state.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = state.render() {
                    info!("render error: {:#}", err);
                }
            }
            _ => {}
        }
    }
}
