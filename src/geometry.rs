// CPU-side mesh generation for the instance base shapes.
//
// Kept free of GPU types; the presentation layer owns buffer creation and
// vertex layouts. All shapes are sized so the default options read the
// same at a glance: capsule r=0.1 l=0.4, sphere r=0.2, box 0.3, tetra 0.3.

use crate::config::ParticleShape;
use bytemuck::{Pod, Zeroable};
use std::f32::consts::PI;

#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

pub fn build(shape: ParticleShape) -> MeshData {
    match shape {
        ParticleShape::Capsule => capsule(0.1, 0.4, 4, 8),
        ParticleShape::Sphere => sphere(0.2, 16, 16),
        ParticleShape::Box => cuboid(0.3, 0.3, 0.3),
        ParticleShape::Tetrahedron => tetrahedron(0.3),
    }
}

/// Latitude/longitude sphere. Rings share vertices around the seam since
/// there are no texture coordinates to split on.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for iy in 0..=height_segments {
        let theta = iy as f32 / height_segments as f32 * PI;
        for ix in 0..width_segments {
            let phi = ix as f32 / width_segments as f32 * 2.0 * PI;
            let n = [
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            ];
            vertices.push(Vertex {
                position: [n[0] * radius, n[1] * radius, n[2] * radius],
                normal: n,
            });
        }
    }
    ring_grid_indices(&mut indices, height_segments, width_segments);

    MeshData { vertices, indices }
}

/// Capsule with its long axis on +Y: two hemispheres around a straight
/// side. Built as one stack of latitude rings with the cap rings offset by
/// the half length, so the equator pair forms the cylindrical side.
pub fn capsule(radius: f32, length: f32, cap_segments: u32, radial_segments: u32) -> MeshData {
    let cap_segments = cap_segments.max(1);
    let radial_segments = radial_segments.max(3);
    let half = length / 2.0;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let mut push_cap = |theta_from: f32, theta_to: f32, y_offset: f32, vertices: &mut Vec<Vertex>| {
        for iy in 0..=cap_segments {
            let theta = theta_from + (theta_to - theta_from) * iy as f32 / cap_segments as f32;
            for ix in 0..radial_segments {
                let phi = ix as f32 / radial_segments as f32 * 2.0 * PI;
                let n = [
                    theta.sin() * phi.cos(),
                    theta.cos(),
                    theta.sin() * phi.sin(),
                ];
                vertices.push(Vertex {
                    position: [n[0] * radius, n[1] * radius + y_offset, n[2] * radius],
                    normal: n,
                });
            }
        }
    };
    push_cap(0.0, PI / 2.0, half, &mut vertices);
    push_cap(PI / 2.0, PI, -half, &mut vertices);

    // 2 * (cap_segments + 1) rings in total; connecting every consecutive
    // pair also closes the side between the two equator rings.
    let rows = cap_segments * 2 + 1;
    ring_grid_indices(&mut indices, rows, radial_segments);

    MeshData { vertices, indices }
}

/// Axis-aligned box with flat per-face normals (24 vertices, 6 faces).
pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // (normal, two in-plane tangents)
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [0.0, 0.0, -1.0], [1.0, 0.0, 0.0]),
        ([0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]),
        ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ];
    let half = [hw, hh, hd];
    for (normal, u, v) in faces {
        let base = vertices.len() as u32;
        for (su, sv) in [(-1.0f32, -1.0f32), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = [
                (normal[0] + u[0] * su + v[0] * sv) * half[0],
                (normal[1] + u[1] * su + v[1] * sv) * half[1],
                (normal[2] + u[2] * su + v[2] * sv) * half[2],
            ];
            vertices.push(Vertex { position, normal });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// Regular tetrahedron circumscribed by `radius`, flat-shaded (each face
/// carries its own three vertices).
pub fn tetrahedron(radius: f32) -> MeshData {
    let s = radius / 3.0f32.sqrt();
    let corners = [
        [s, s, s],
        [-s, -s, s],
        [-s, s, -s],
        [s, -s, -s],
    ];
    let faces = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];

    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    for face in faces {
        let [a, b, c] = [corners[face[0]], corners[face[1]], corners[face[2]]];
        let normal = face_normal(a, b, c);
        let base = vertices.len() as u32;
        for position in [a, b, c] {
            vertices.push(Vertex { position, normal });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    MeshData { vertices, indices }
}

/// Triangle indices for `rows + 1` rings of `segments` wrapped vertices.
fn ring_grid_indices(indices: &mut Vec<u32>, rows: u32, segments: u32) {
    for iy in 0..rows {
        for ix in 0..segments {
            let next = (ix + 1) % segments;
            let a = iy * segments + ix;
            let b = iy * segments + next;
            let c = (iy + 1) * segments + ix;
            let d = (iy + 1) * segments + next;
            indices.extend_from_slice(&[a, b, c, b, d, c]);
        }
    }
}

fn face_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f32; 3] {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt().max(1e-12);
    [n[0] / len, n[1] / len, n[2] / len]
}
