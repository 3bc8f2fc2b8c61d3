//! Debug ray renderer (`LineList`, one segment per ray, per-vertex color).
//!
//! Rays are re-uploaded every frame, so the host can hand in whatever the current
//! snapshot produces without caching.

use std::mem;

use crate::render::gpu::Gpu;
use crate::render::pipeline::{UniformPipeline, UniformPipelineDesc};
use crate::render::primitives::{LineUniforms, LineVertex, StreamBuffer, ray_vertices};
use crate::scene::{Camera3D, DebugRay};

pub struct LineRenderer {
    pipeline: UniformPipeline,
    vertex_buffer: StreamBuffer,
}

impl LineRenderer {
    pub fn new(gpu: &Gpu) -> anyhow::Result<Self> {
        let pipeline = UniformPipeline::new(
            gpu,
            UniformPipelineDesc {
                label: "LineRenderer",
                shader_source: include_str!("shaders/line.wgsl"),
                vertex_layout: LineVertex::layout(),
                topology: wgpu::PrimitiveTopology::LineList,
                uniform_size: mem::size_of::<LineUniforms>() as u64,
            },
        )?;

        Ok(Self {
            pipeline,
            vertex_buffer: StreamBuffer::new(
                gpu,
                "LineRenderer Vertex Buffer",
                wgpu::BufferUsages::VERTEX,
            ),
        })
    }

    pub fn draw_rays(
        &mut self,
        gpu: &Gpu,
        pass: &mut wgpu::RenderPass<'_>,
        camera: &Camera3D,
        rays: &[DebugRay],
    ) {
        let vertices = ray_vertices(rays);
        if vertices.is_empty() {
            return;
        }
        let bytes = self.vertex_buffer.write(gpu, bytemuck::cast_slice(&vertices));

        self.pipeline
            .bind(gpu, pass, &LineUniforms::new(camera.clip_from_world()));
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(bytes));
        pass.draw(0..vertices.len() as u32, 0..1);
    }
}
