//! Procedural geometry: UV spheres and subdivided planes.
//!
//! Both generators emit counter-clockwise front faces and unit normals.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Parametric description of a mesh's shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// UV sphere centred at the origin.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    /// Rectangle in the XY plane facing +Z, centred at the origin.
    Plane {
        width: f32,
        height: f32,
        width_segments: u32,
        height_segments: u32,
    },
}

/// Triangle list ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl Geometry {
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self::Sphere {
            radius,
            width_segments,
            height_segments,
        }
    }

    pub fn plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> Self {
        Self::Plane {
            width,
            height,
            width_segments,
            height_segments,
        }
    }

    pub fn build(&self) -> MeshData {
        match *self {
            Geometry::Sphere {
                radius,
                width_segments,
                height_segments,
            } => sphere_mesh(radius, width_segments.max(3), height_segments.max(2)),
            Geometry::Plane {
                width,
                height,
                width_segments,
                height_segments,
            } => plane_mesh(width, height, width_segments.max(1), height_segments.max(1)),
        }
    }
}

fn sphere_mesh(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let mut rows: Vec<Vec<u32>> = Vec::with_capacity(height_segments as usize + 1);

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let theta = v * PI;
        let mut row = Vec::with_capacity(width_segments as usize + 1);
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = u * 2.0 * PI;
            let normal = [
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            ];
            mesh.positions
                .push([normal[0] * radius, normal[1] * radius, normal[2] * radius]);
            mesh.normals.push(normal);
            row.push(mesh.positions.len() as u32 - 1);
        }
        rows.push(row);
    }

    for iy in 0..height_segments as usize {
        for ix in 0..width_segments as usize {
            let a = rows[iy][ix + 1];
            let b = rows[iy][ix];
            let c = rows[iy + 1][ix];
            let d = rows[iy + 1][ix + 1];
            // Pole rows collapse to a point; skip the degenerate half.
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments as usize - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    mesh
}

fn plane_mesh(width: f32, height: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let grid_x1 = width_segments + 1;
    let segment_w = width / width_segments as f32;
    let segment_h = height / height_segments as f32;

    for iy in 0..=height_segments {
        let y = height / 2.0 - iy as f32 * segment_h;
        for ix in 0..=width_segments {
            let x = ix as f32 * segment_w - width / 2.0;
            mesh.positions.push([x, y, 0.0]);
            mesh.normals.push([0.0, 0.0, 1.0]);
        }
    }

    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = ix + grid_x1 * iy;
            let b = ix + grid_x1 * (iy + 1);
            let c = (ix + 1) + grid_x1 * (iy + 1);
            let d = (ix + 1) + grid_x1 * iy;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn face_normal(mesh: &MeshData, tri: usize) -> Vec3 {
        let idx = &mesh.indices[tri * 3..tri * 3 + 3];
        let p = |i: u32| Vec3::from(mesh.positions[i as usize]);
        (p(idx[1]) - p(idx[0])).cross(p(idx[2]) - p(idx[0]))
    }

    #[test]
    fn sphere_counts() {
        let mesh = Geometry::sphere(1.0, 32, 32).build();
        assert_eq!(mesh.vertex_count(), 33 * 33);
        // Two triangles per quad minus one per quad on each pole row.
        assert_eq!(mesh.triangle_count(), 2 * 32 * 32 - 2 * 32);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn sphere_vertices_on_radius() {
        let mesh = Geometry::sphere(2.5, 16, 8).build();
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert!((Vec3::from(*p).length() - 2.5).abs() < 1e-4);
            assert!((Vec3::from(*n).length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn sphere_faces_point_outward() {
        let mesh = Geometry::sphere(1.0, 32, 32).build();
        for tri in 0..mesh.triangle_count() {
            let idx = &mesh.indices[tri * 3..tri * 3 + 3];
            let centroid = idx
                .iter()
                .map(|&i| Vec3::from(mesh.positions[i as usize]))
                .sum::<Vec3>()
                / 3.0;
            assert!(face_normal(&mesh, tri).dot(centroid) > 0.0, "triangle {tri} faces inward");
        }
    }

    #[test]
    fn plane_counts_and_extent() {
        let mesh = Geometry::plane(20.0, 20.0, 32, 32).build();
        assert_eq!(mesh.vertex_count(), 33 * 33);
        assert_eq!(mesh.triangle_count(), 2 * 32 * 32);
        let xs: Vec<f32> = mesh.positions.iter().map(|p| p[0]).collect();
        let min = xs.iter().cloned().fold(f32::MAX, f32::min);
        let max = xs.iter().cloned().fold(f32::MIN, f32::max);
        assert!((min + 10.0).abs() < 1e-5);
        assert!((max - 10.0).abs() < 1e-5);
        assert!(mesh.positions.iter().all(|p| p[2] == 0.0));
    }

    #[test]
    fn plane_faces_point_along_positive_z() {
        let mesh = Geometry::plane(4.0, 2.0, 3, 2).build();
        for tri in 0..mesh.triangle_count() {
            assert!(face_normal(&mesh, tri).z > 0.0);
        }
    }

    #[test]
    fn degenerate_segment_counts_are_clamped() {
        let mesh = Geometry::plane(1.0, 1.0, 0, 0).build();
        assert_eq!(mesh.triangle_count(), 2);
        let sphere = Geometry::sphere(1.0, 0, 0).build();
        assert!(sphere.triangle_count() > 0);
    }
}
