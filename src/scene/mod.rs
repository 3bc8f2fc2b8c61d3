//! Renderer-agnostic scene data derived from a `GeometrySnapshot`.
//!
//! The render host never looks at vectors directly; it consumes what this module builds:
//! - a parallelogram mesh (`Mesh3D`) with the cross product as its normal
//! - five colored debug rays (`DebugRay`)
//! - bounds (`Aabb3`) and a perspective orbit camera (`Camera3D`) to frame them
//!
//! Coordinate convention:
//! - World units are whatever `scale` produces; the object origin is `SnapshotScene::origin`.
//! - Right-handed, y-up (matches `glam::Mat4::look_at_rh`).
//!
//! Notes:
//! - This file intentionally does not depend on wgpu; GPU vertex types live in
//!   `render::primitives` and are filled from these CPU structures.

use glam::{Mat4, Vec3, Vec4};

use crate::geometry::GeometrySnapshot;

/// RGBA color in linear space. The viewer renders into an sRGB view
/// (`Gpu::target_format`), so these values are encoded to sRGB on write.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const CYAN: Self = Self::rgb(0.0, 1.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 0.92, 0.016);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb3 {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb3 {
    #[inline]
    pub fn empty() -> Self {
        Self {
            min: Vec3::INFINITY,
            max: Vec3::NEG_INFINITY,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    #[inline]
    pub fn include_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// An owned CPU mesh with the attributes the quad pipeline needs.
///
/// Same shape as an engine mesh: parallel attribute arrays plus a u16 triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh3D {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u16>,
}

impl Mesh3D {
    /// Triangle list for the parallelogram: `origin, a, b` then `b, a, sum`.
    pub const PARALLELOGRAM_INDICES: [u16; 6] = [0, 1, 2, 2, 1, 3];

    /// Fixed UVs for `origin, a, b, sum`.
    pub const PARALLELOGRAM_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

    /// Build the parallelogram spanned by the snapshot's base vectors.
    ///
    /// Vertices are `origin, origin + a, origin + b, origin + sum`; every vertex carries the
    /// (unnormalized) cross product as its normal.
    pub fn parallelogram(snapshot: &GeometrySnapshot, origin: Vec3) -> Self {
        let corners = [
            origin,
            origin + snapshot.vector_a(),
            origin + snapshot.vector_b(),
            origin + snapshot.sum(),
        ];
        let normal = snapshot.cross().to_array();

        Self {
            positions: corners.iter().map(|p| p.to_array()).collect(),
            normals: vec![normal; corners.len()],
            uvs: Self::PARALLELOGRAM_UVS.to_vec(),
            indices: Self::PARALLELOGRAM_INDICES.to_vec(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }

    pub fn bounds(&self) -> Aabb3 {
        let mut b = Aabb3::empty();
        for &p in &self.positions {
            b.include_point(Vec3::from_array(p));
        }
        b
    }
}

/// Which snapshot vector a debug ray shows.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RayKind {
    VectorA,
    VectorB,
    Cross,
    SumToA,
    SumToB,
}

/// A directed segment `start -> start + direction` drawn as a line.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DebugRay {
    pub kind: RayKind,
    pub start: Vec3,
    pub direction: Vec3,
    pub color: Rgba,
}

impl DebugRay {
    #[inline]
    pub fn end(&self) -> Vec3 {
        self.start + self.direction
    }
}

/// The five debug rays for a snapshot, in draw order.
///
/// A, B and the cross product start at `origin`; the two closing edges start at the
/// `sum` corner.
pub fn debug_rays(snapshot: &GeometrySnapshot, origin: Vec3) -> [DebugRay; 5] {
    let corner = origin + snapshot.sum();
    let ray = |kind, start, direction, color| DebugRay {
        kind,
        start,
        direction,
        color,
    };
    [
        ray(RayKind::VectorA, origin, snapshot.vector_a(), Rgba::CYAN),
        ray(RayKind::VectorB, origin, snapshot.vector_b(), Rgba::YELLOW),
        ray(RayKind::Cross, origin, snapshot.cross(), Rgba::GREEN),
        ray(RayKind::SumToA, corner, snapshot.sum_to_a(), Rgba::BLUE),
        ray(RayKind::SumToB, corner, snapshot.sum_to_b(), Rgba::RED),
    ]
}

/// Everything the host draws for one snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotScene {
    pub origin: Vec3,
    pub quad: Mesh3D,
    pub quad_fill: Rgba,
    pub rays: [DebugRay; 5],
}

impl SnapshotScene {
    pub fn new(snapshot: &GeometrySnapshot, origin: Vec3) -> Self {
        Self {
            origin,
            quad: Mesh3D::parallelogram(snapshot, origin),
            quad_fill: Rgba::WHITE,
            rays: debug_rays(snapshot, origin),
        }
    }

    #[inline]
    pub fn with_fill(mut self, fill: Rgba) -> Self {
        self.quad_fill = fill;
        self
    }

    /// Bounds of the quad and of every ray endpoint.
    pub fn bounds(&self) -> Aabb3 {
        let mut b = self.quad.bounds();
        for ray in &self.rays {
            b.include_point(ray.start);
            b.include_point(ray.end());
        }
        b
    }
}

/// A perspective orbit camera.
///
/// The eye sits on a sphere of radius `distance` around `target`:
/// - `yaw`: rotation about +y, radians (0 looks down -z)
/// - `pitch`: elevation, radians, clamped short of the poles
///
/// Projection uses wgpu's 0..1 depth range (`Mat4::perspective_rh`).
#[derive(Debug, Copy, Clone)]
pub struct Camera3D {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fovy: f32,
    pub viewport_aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera3D {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 10.0,
            yaw: 0.6,
            pitch: 0.4,
            fovy: 45f32.to_radians(),
            viewport_aspect: 1.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl Camera3D {
    const MAX_PITCH: f32 = 1.5;

    /// Set the viewport size in pixels to update aspect ratio.
    #[inline]
    pub fn set_viewport_px(&mut self, width: u32, height: u32) {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        self.viewport_aspect = w / h;
    }

    /// Rotate around the target.
    #[inline]
    pub fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw = (self.yaw + d_yaw) % std::f32::consts::TAU;
        self.pitch = (self.pitch + d_pitch).clamp(-Self::MAX_PITCH, Self::MAX_PITCH);
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(cp * sy, sp, cp * cy)
    }

    pub fn clip_from_world(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye(), self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fovy, self.viewport_aspect, self.znear, self.zfar);
        proj * view
    }

    /// Project a world point to normalized device coordinates.
    pub fn project(&self, p: Vec3) -> Vec3 {
        let clip = self.clip_from_world() * Vec4::new(p.x, p.y, p.z, 1.0);
        clip.truncate() / clip.w
    }

    /// Frame the given bounds so the sphere around them fits the view with padding.
    ///
    /// - `padding`: extra margin around the bounds in world units.
    /// - `fill_ratio`: fraction of the narrower field of view to occupy (e.g. 0.8).
    ///
    /// Updates `target`, `distance`, `znear` and `zfar`; yaw/pitch are kept so orbiting
    /// continues smoothly after a re-frame.
    pub fn frame_bounds(&mut self, bounds: Aabb3, padding: f32, fill_ratio: f32) {
        if bounds.is_empty() {
            return;
        }

        let radius = (bounds.size().length() * 0.5 + padding.max(0.0)).max(1e-3);
        let fill = fill_ratio.clamp(0.05, 0.98);

        // Narrower of the vertical and horizontal half-angles.
        let half_v = self.fovy * 0.5;
        let half_h = (half_v.tan() * self.viewport_aspect).atan();
        let half = half_v.min(half_h);

        self.target = bounds.center();
        self.distance = radius / (half.sin() * fill);
        self.znear = ((self.distance - radius) * 0.5).max(1e-3);
        self.zfar = self.distance + radius * 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> GeometrySnapshot {
        GeometrySnapshot::from_vectors(Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0))
    }

    fn corners(b: &Aabb3) -> [Vec3; 8] {
        let (lo, hi) = (b.min, b.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    #[test]
    fn parallelogram_matches_engine_layout() {
        let mesh = Mesh3D::parallelogram(&snapshot(), Vec3::ZERO);
        assert_eq!(
            mesh.positions,
            vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [2.0, 3.0, 0.0]]
        );
        assert_eq!(mesh.indices, vec![0, 1, 2, 2, 1, 3]);
        assert_eq!(mesh.normals, vec![[0.0, 0.0, 6.0]; 4]);
        assert_eq!(mesh.uvs, vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
    }

    #[test]
    fn parallelogram_follows_origin() {
        let origin = Vec3::new(1.0, -1.0, 4.0);
        let mesh = Mesh3D::parallelogram(&snapshot(), origin);
        assert_eq!(mesh.positions[0], origin.to_array());
        assert_eq!(mesh.positions[3], [3.0, 2.0, 4.0]);
        // Normals are directions, not positions.
        assert_eq!(mesh.normals[0], [0.0, 0.0, 6.0]);
    }

    #[test]
    fn rays_have_expected_order_starts_and_colors() {
        let s = snapshot();
        let rays = debug_rays(&s, Vec3::ZERO);
        let kinds: Vec<_> = rays.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RayKind::VectorA,
                RayKind::VectorB,
                RayKind::Cross,
                RayKind::SumToA,
                RayKind::SumToB
            ]
        );
        let colors: Vec<_> = rays.iter().map(|r| r.color).collect();
        assert_eq!(
            colors,
            vec![Rgba::CYAN, Rgba::YELLOW, Rgba::GREEN, Rgba::BLUE, Rgba::RED]
        );

        assert_eq!(rays[0].end(), s.vector_a());
        assert_eq!(rays[1].end(), s.vector_b());
        assert_eq!(rays[2].end(), s.cross());
        assert_eq!(rays[3].start, s.sum());
        assert_eq!(rays[3].end(), s.vector_a());
        assert_eq!(rays[4].end(), s.vector_b());
    }

    #[test]
    fn scene_bounds_cover_every_ray_endpoint() {
        let scene = SnapshotScene::new(&snapshot(), Vec3::new(0.5, 0.5, 0.5));
        let b = scene.bounds();
        for ray in &scene.rays {
            assert!(b.contains(ray.start));
            assert!(b.contains(ray.end()));
        }
        assert_eq!(b.max.z, 6.5);
    }

    #[test]
    fn aabb_grows_from_empty() {
        let mut b = Aabb3::default();
        assert!(b.is_empty());
        b.include_point(Vec3::ONE);
        b.include_point(Vec3::ZERO);
        assert!(!b.is_empty());
        assert_eq!(b.center(), Vec3::splat(0.5));
        assert_eq!(b.size(), Vec3::ONE);
    }

    #[test]
    fn framed_bounds_land_inside_the_frustum() {
        let bounds = SnapshotScene::new(&snapshot(), Vec3::ZERO).bounds();
        for (w, h) in [(1280, 720), (600, 900), (1, 1)] {
            let mut cam = Camera3D::default();
            cam.set_viewport_px(w, h);
            cam.frame_bounds(bounds, 0.5, 0.85);
            for corner in corners(&bounds) {
                let ndc = cam.project(corner);
                assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0, "{w}x{h}: {ndc:?}");
                assert!((0.0..=1.0).contains(&ndc.z), "{w}x{h}: depth {}", ndc.z);
            }
        }
    }

    #[test]
    fn orbit_clamps_pitch() {
        let mut cam = Camera3D::default();
        cam.orbit(0.1, 10.0);
        assert!(cam.pitch <= 1.5);
        let d = (cam.eye() - cam.target).length();
        assert!((d - cam.distance).abs() < 1e-4);
    }
}
