//! The cross product viewer: window state that shows one `GeometrySnapshot`.
//!
//! Lifecycle:
//! - `Viewer::new` generates the first snapshot from the config and uploads its quad.
//! - Every frame the host calls `render_snapshot(&snapshot)`, which rebuilds the debug
//!   rays from the snapshot and draws quad + rays.
//! - `R` / `Space` replaces the snapshot with a fresh one from the same RNG stream.
//!
//! The snapshot itself is never mutated; regenerating swaps in a new value.

use std::sync::Arc;

use anyhow::Context as _;
use glam::Vec3;
use rand_chacha::ChaCha8Rng;
use winit::{keyboard::KeyCode, window::Window};

use crate::config::GeometryConfig;
use crate::geometry::{GeometryError, GeometrySnapshot};
use crate::render::app::AppState;
use crate::render::gpu::Gpu;
use crate::render::line_renderer::LineRenderer;
use crate::render::quad_renderer::QuadRenderer;
use crate::render::util::FrameClock;
use crate::scene::{Camera3D, Rgba, SnapshotScene, debug_rays};

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.05,
    g: 0.06,
    b: 0.08,
    a: 1.0,
};

const QUAD_FILL: Rgba = Rgba {
    r: 0.55,
    g: 0.58,
    b: 0.62,
    a: 0.85,
};

pub struct Viewer {
    window: Arc<Window>,
    gpu: Gpu,

    config: GeometryConfig,
    rng: ChaCha8Rng,
    snapshot: GeometrySnapshot,
    scene: SnapshotScene,

    camera: Camera3D,
    clock: FrameClock,
    orbit_speed: f32,

    quad: QuadRenderer,
    lines: LineRenderer,
}

impl Viewer {
    /// Object origin the parallelogram is anchored at.
    pub const ORIGIN: Vec3 = Vec3::ZERO;

    pub async fn new(
        window: Arc<Window>,
        config: GeometryConfig,
        orbit_speed: f32,
    ) -> anyhow::Result<Self> {
        let mut rng = config.rng();
        let snapshot = config
            .generate(&mut rng)
            .context("geometry: failed to generate initial snapshot")?;

        let gpu = Gpu::new(window.clone()).await?;
        let quad = QuadRenderer::new(&gpu).context("failed to create quad renderer")?;
        let lines = LineRenderer::new(&gpu).context("failed to create line renderer")?;

        let mut camera = Camera3D::default();
        camera.set_viewport_px(gpu.size.width, gpu.size.height);

        let mut viewer = Self {
            window,
            gpu,
            config,
            rng,
            snapshot,
            scene: SnapshotScene::new(&snapshot, Self::ORIGIN),
            camera,
            clock: FrameClock::new(),
            orbit_speed,
            quad,
            lines,
        };
        viewer.install(snapshot);
        Ok(viewer)
    }

    /// Replace the snapshot with a freshly generated one.
    ///
    /// On error the current snapshot stays on screen.
    pub fn regenerate(&mut self) -> Result<(), GeometryError> {
        let snapshot = self.config.generate(&mut self.rng)?;
        self.install(snapshot);
        Ok(())
    }

    fn install(&mut self, snapshot: GeometrySnapshot) {
        self.snapshot = snapshot;
        self.scene = SnapshotScene::new(&snapshot, Self::ORIGIN).with_fill(QUAD_FILL);
        self.quad.set_mesh(&self.gpu, &self.scene.quad);
        self.camera.frame_bounds(self.scene.bounds(), 0.5, 0.8);

        log::info!(
            "snapshot: a={:?} b={:?} cross={:?} |cross|={:.3} angle={:.1}deg",
            snapshot.vector_a(),
            snapshot.vector_b(),
            snapshot.cross(),
            snapshot.area(),
            snapshot.angle().to_degrees()
        );
    }

    /// Draw one frame for `snapshot`: the cached quad plus its five debug rays.
    pub fn render_snapshot(&mut self, snapshot: &GeometrySnapshot) -> anyhow::Result<()> {
        if self.gpu.is_minimized() {
            return Ok(());
        }

        // Acquire frame (handle recoverable surface errors).
        let (surface_texture, view) = match self.gpu.acquire_frame() {
            Ok(v) => v,
            Err(wgpu::SurfaceError::Outdated)
            | Err(wgpu::SurfaceError::Lost)
            | Err(wgpu::SurfaceError::Other) => {
                self.gpu.resize(self.gpu.size);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                return Err(anyhow::anyhow!("wgpu SurfaceError::OutOfMemory"));
            }
        };

        let rays = debug_rays(snapshot, self.scene.origin);

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Viewer Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Viewer Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            self.quad
                .draw(&self.gpu, &mut pass, &self.camera, self.scene.quad_fill);
            self.lines
                .draw_rays(&self.gpu, &mut pass, &self.camera, &rays);
        }

        self.gpu.queue.submit(Some(encoder.finish()));
        self.window.pre_present_notify();
        surface_texture.present();

        Ok(())
    }
}

impl AppState for Viewer {
    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.gpu.resize(new_size);
        self.camera
            .set_viewport_px(new_size.width, new_size.height);
        self.camera.frame_bounds(self.scene.bounds(), 0.5, 0.8);
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let dt = self.clock.tick();
        self.camera.orbit(dt * self.orbit_speed, 0.0);

        let snapshot = self.snapshot;
        let result = self.render_snapshot(&snapshot);
        self.request_redraw();
        result
    }

    fn request_redraw(&self) {
        self.window.request_redraw();
    }

    fn key_pressed(&mut self, key: KeyCode) {
        match key {
            KeyCode::KeyR | KeyCode::Space => {
                if let Err(err) = self.regenerate() {
                    log::warn!("regenerate failed, keeping previous snapshot: {err}");
                }
            }
            _ => {}
        }
    }
}
