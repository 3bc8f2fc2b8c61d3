//! Lit parallelogram renderer.
//!
//! Draws the `Mesh3D` built from a snapshot with a two-sided Lambert shader. The mesh
//! is uploaded once per snapshot (`set_mesh`); each frame only rewrites the uniforms.
//!
//! Notes:
//! - Uses u16 indices (matches `scene::Mesh3D`).
//! - No depth buffer; the viewer draws the quad first and the debug rays on top.

use std::mem;

use crate::render::gpu::Gpu;
use crate::render::pipeline::{UniformPipeline, UniformPipelineDesc};
use crate::render::primitives::{MeshVertex, QuadUniforms, StreamBuffer, mesh_vertices};
use crate::scene::{Camera3D, Mesh3D, Rgba};

pub struct QuadRenderer {
    pipeline: UniformPipeline,

    vertex_buffer: StreamBuffer,
    vertex_bytes: u64,

    index_buffer: StreamBuffer,
    index_bytes: u64,
    index_count: u32,

    /// World-space direction towards the light.
    pub light_dir: glam::Vec3,
}

impl QuadRenderer {
    pub fn new(gpu: &Gpu) -> anyhow::Result<Self> {
        let pipeline = UniformPipeline::new(
            gpu,
            UniformPipelineDesc {
                label: "QuadRenderer",
                shader_source: include_str!("shaders/quad.wgsl"),
                vertex_layout: MeshVertex::layout(),
                topology: wgpu::PrimitiveTopology::TriangleList,
                uniform_size: mem::size_of::<QuadUniforms>() as u64,
            },
        )?;

        Ok(Self {
            pipeline,
            vertex_buffer: StreamBuffer::new(
                gpu,
                "QuadRenderer Vertex Buffer",
                wgpu::BufferUsages::VERTEX,
            ),
            vertex_bytes: 0,
            index_buffer: StreamBuffer::new(
                gpu,
                "QuadRenderer Index Buffer",
                wgpu::BufferUsages::INDEX,
            ),
            index_bytes: 0,
            index_count: 0,
            light_dir: glam::Vec3::new(0.4, 1.0, 0.6),
        })
    }

    /// Upload a new mesh, replacing the previous one.
    pub fn set_mesh(&mut self, gpu: &Gpu, mesh: &Mesh3D) {
        if mesh.is_empty() {
            self.index_count = 0;
            return;
        }
        let vertices = mesh_vertices(mesh);
        self.vertex_bytes = self.vertex_buffer.write(gpu, bytemuck::cast_slice(&vertices));
        self.index_bytes = self.index_buffer.write(gpu, bytemuck::cast_slice(&mesh.indices));
        self.index_count = mesh.indices.len() as u32;
    }

    /// Draw the current mesh into `pass` with the given fill color.
    pub fn draw(&self, gpu: &Gpu, pass: &mut wgpu::RenderPass<'_>, camera: &Camera3D, fill: Rgba) {
        if self.index_count == 0 {
            return;
        }

        let uniforms = QuadUniforms::new(camera.clip_from_world(), fill, self.light_dir);
        self.pipeline.bind(gpu, pass, &uniforms);

        pass.set_vertex_buffer(0, self.vertex_buffer.slice(self.vertex_bytes));
        pass.set_index_buffer(
            self.index_buffer.slice(self.index_bytes),
            wgpu::IndexFormat::Uint16,
        );
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
