//! GPU-side vertex/uniform types and a growable upload buffer.
//!
//! CPU geometry lives in `crate::scene` (`Mesh3D`, `DebugRay`); the helpers here convert
//! it into tightly packed `bytemuck::Pod` arrays for `Queue::write_buffer`.

use std::mem;

use crate::render::gpu::Gpu;
use crate::scene::{DebugRay, Mesh3D, Rgba};

/// Vertex for the lit quad pipeline.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub const ATTRS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    #[inline]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Vertex for the debug line pipeline (per-vertex color).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    pub const ATTRS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    #[inline]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Uniforms for the quad pipeline.
///
/// - `clip_from_world`: column-major, matches WGSL `mat4x4<f32>`
/// - `light_dir.xyz`: world-space direction towards the light (w unused)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadUniforms {
    pub clip_from_world: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub light_dir: [f32; 4],
}

impl QuadUniforms {
    #[inline]
    pub fn new(clip_from_world: glam::Mat4, color: Rgba, light_dir: glam::Vec3) -> Self {
        Self {
            clip_from_world: clip_from_world.to_cols_array_2d(),
            color: color.to_array(),
            light_dir: light_dir.extend(0.0).to_array(),
        }
    }
}

/// Uniforms for the line pipeline: a single MVP matrix.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineUniforms {
    pub clip_from_world: [[f32; 4]; 4],
}

impl LineUniforms {
    #[inline]
    pub fn new(clip_from_world: glam::Mat4) -> Self {
        Self {
            clip_from_world: clip_from_world.to_cols_array_2d(),
        }
    }
}

/// Interleave a scene mesh into GPU vertices. Indices are used as-is.
pub fn mesh_vertices(mesh: &Mesh3D) -> Vec<MeshVertex> {
    mesh.positions
        .iter()
        .zip(&mesh.normals)
        .zip(&mesh.uvs)
        .map(|((&position, &normal), &uv)| MeshVertex {
            position,
            normal,
            uv,
        })
        .collect()
}

/// Two vertices (start, end) per ray, for `PrimitiveTopology::LineList`.
pub fn ray_vertices(rays: &[DebugRay]) -> Vec<LineVertex> {
    rays.iter()
        .flat_map(|ray| {
            let color = ray.color.to_array();
            [
                LineVertex {
                    position: ray.start.to_array(),
                    color,
                },
                LineVertex {
                    position: ray.end().to_array(),
                    color,
                },
            ]
        })
        .collect()
}

fn round_up_to(v: u64, align: u64) -> u64 {
    debug_assert!(align.is_power_of_two());
    (v + (align - 1)) & !(align - 1)
}

/// A reusable GPU buffer that grows on demand.
///
/// `Queue::write_buffer` requires sizes aligned to `COPY_BUFFER_ALIGNMENT`; uploads are
/// padded and the caller slices only the real byte length when drawing.
pub struct StreamBuffer {
    label: &'static str,
    usage: wgpu::BufferUsages,
    buffer: wgpu::Buffer,
    capacity_bytes: u64,
}

impl StreamBuffer {
    const INITIAL_BYTES: u64 = 1024;

    pub fn new(gpu: &Gpu, label: &'static str, usage: wgpu::BufferUsages) -> Self {
        let usage = usage | wgpu::BufferUsages::COPY_DST;
        let buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: Self::INITIAL_BYTES,
            usage,
            mapped_at_creation: false,
        });
        Self {
            label,
            usage,
            buffer,
            capacity_bytes: Self::INITIAL_BYTES,
        }
    }

    /// Upload `bytes` at offset 0 and return the unpadded length.
    pub fn write(&mut self, gpu: &Gpu, bytes: &[u8]) -> u64 {
        let len = bytes.len() as u64;
        if len == 0 {
            return 0;
        }
        let upload = round_up_to(len, wgpu::COPY_BUFFER_ALIGNMENT);

        if upload > self.capacity_bytes {
            let new_size = upload.next_power_of_two().max(Self::INITIAL_BYTES);
            log::debug!("{}: growing to {} bytes", self.label, new_size);
            self.buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: new_size,
                usage: self.usage,
                mapped_at_creation: false,
            });
            self.capacity_bytes = new_size;
        }

        if upload == len {
            gpu.queue.write_buffer(&self.buffer, 0, bytes);
        } else {
            let mut padded = Vec::<u8>::with_capacity(upload as usize);
            padded.extend_from_slice(bytes);
            padded.resize(upload as usize, 0);
            gpu.queue.write_buffer(&self.buffer, 0, &padded);
        }
        len
    }

    #[inline]
    pub fn slice(&self, len: u64) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometrySnapshot;
    use crate::scene::debug_rays;
    use glam::Vec3;

    #[test]
    fn vertex_strides_are_tightly_packed() {
        assert_eq!(mem::size_of::<MeshVertex>(), 32);
        assert_eq!(mem::size_of::<LineVertex>(), 28);
        assert_eq!(mem::size_of::<QuadUniforms>(), 96);
        assert_eq!(mem::size_of::<LineUniforms>(), 64);
    }

    #[test]
    fn mesh_vertices_interleave_attributes() {
        let s = GeometrySnapshot::from_vectors(Vec3::X, Vec3::Y);
        let verts = mesh_vertices(&Mesh3D::parallelogram(&s, Vec3::ZERO));
        assert_eq!(verts.len(), 4);
        assert_eq!(
            verts[3],
            MeshVertex {
                position: [1.0, 1.0, 0.0],
                normal: [0.0, 0.0, 1.0],
                uv: [1.0, 1.0],
            }
        );
    }

    #[test]
    fn ray_vertices_emit_segment_pairs() {
        let s = GeometrySnapshot::from_vectors(Vec3::X, Vec3::Y);
        let verts = ray_vertices(&debug_rays(&s, Vec3::ZERO));
        assert_eq!(verts.len(), 10);
        // Cross ray: origin -> +z, green.
        assert_eq!(verts[4].position, [0.0, 0.0, 0.0]);
        assert_eq!(verts[5].position, [0.0, 0.0, 1.0]);
        assert_eq!(verts[5].color, Rgba::GREEN.to_array());
    }

    #[test]
    fn round_up_respects_alignment() {
        assert_eq!(round_up_to(0, 4), 0);
        assert_eq!(round_up_to(12, 4), 12);
        assert_eq!(round_up_to(13, 4), 16);
    }
}
