//! Base primitives, laid out the way the common real-time library generators
//! lay them out (vertex rows, seam duplication and triangle winding), so a
//! displacement pass produces the same surface for the same density.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::geometry::mesh::TriangleMesh;

/// UV sphere centred at the origin with `width_segments` around Y and
/// `height_segments` from pole to pole.
///
/// The seam column and each pole row are duplicated; the zero-area triangles
/// touching the poles are skipped.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> TriangleMesh {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let row = w + 1;
    let mut mesh = TriangleMesh::with_capacity(((w + 1) * (h + 1)) as usize, (w * h * 2) as usize);

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let dir = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.push_vertex(dir * radius, dir.normalize_or_zero());
        }
    }

    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            if iy != 0 {
                mesh.push_triangle(a, b, d);
            }
            if iy != h - 1 {
                mesh.push_triangle(b, c, d);
            }
        }
    }

    mesh
}

/// Torus in the XY plane around the Z axis.
///
/// `radial_segments` walk around the tube, `tubular_segments` around the ring.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> TriangleMesh {
    let radial = radial_segments.max(2);
    let tubular = tubular_segments.max(3);
    let row = tubular + 1;
    let mut mesh = TriangleMesh::with_capacity(
        ((radial + 1) * (tubular + 1)) as usize,
        (radial * tubular * 2) as usize,
    );

    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let position = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let centre = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.push_vertex(position, (position - centre).normalize_or_zero());
        }
    }

    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;

            mesh.push_triangle(a, b, d);
            mesh.push_triangle(b, c, d);
        }
    }

    mesh
}

/// Flat grid in the XY plane facing +Z, rows running from +Y to -Y.
pub fn plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> TriangleMesh {
    let grid_x = width_segments.max(1);
    let grid_y = height_segments.max(1);
    let row = grid_x + 1;
    let segment_w = width / grid_x as f32;
    let segment_h = height / grid_y as f32;
    let mut mesh = TriangleMesh::with_capacity(
        ((grid_x + 1) * (grid_y + 1)) as usize,
        (grid_x * grid_y * 2) as usize,
    );

    for iy in 0..=grid_y {
        let y = iy as f32 * segment_h - height / 2.0;
        for ix in 0..=grid_x {
            let x = ix as f32 * segment_w - width / 2.0;
            mesh.push_vertex(Vec3::new(x, -y, 0.0), Vec3::Z);
        }
    }

    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = ix + row * iy;
            let b = ix + row * (iy + 1);
            let c = ix + 1 + row * (iy + 1);
            let d = ix + 1 + row * iy;

            mesh.push_triangle(a, b, d);
            mesh.push_triangle(b, c, d);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_indices_in_range(mesh: &TriangleMesh) {
        let n = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn test_sphere_counts() {
        let mesh = sphere(3.0, 8, 8);
        assert_eq!(mesh.vertex_count(), 9 * 9);
        // Two rows of pole quads contribute one triangle each.
        assert_eq!(mesh.triangle_count(), 8 * 8 * 2 - 2 * 8);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn test_sphere_on_radius() {
        let mesh = sphere(3.0, 16, 12);
        for i in 0..mesh.vertex_count() {
            assert!((mesh.position(i).length() - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_winding_outward() {
        let mesh = sphere(3.0, 16, 16);
        for t in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle_positions(t);
            let centroid = (a + b + c) / 3.0;
            assert!(mesh.face_normal(t).dot(centroid) > 0.0, "triangle {t} faces inward");
        }
    }

    #[test]
    fn test_torus_counts() {
        let mesh = torus(2.0, 0.7, 8, 16);
        assert_eq!(mesh.vertex_count(), 9 * 17);
        assert_eq!(mesh.triangle_count(), 8 * 16 * 2);
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn test_torus_tube_distance() {
        let mesh = torus(2.0, 0.7, 12, 24);
        for i in 0..mesh.vertex_count() {
            let p = mesh.position(i);
            let ring = Vec3::new(p.x, p.y, 0.0).normalize() * 2.0;
            assert!(((p - ring).length() - 0.7).abs() < 1e-4);
        }
    }

    #[test]
    fn test_plane_counts_and_extent() {
        let mesh = plane(6.0, 6.0, 4, 4);
        assert_eq!(mesh.vertex_count(), 25);
        assert_eq!(mesh.triangle_count(), 32);
        assert_eq!(mesh.position(0), Vec3::new(-3.0, 3.0, 0.0));
        assert_eq!(mesh.position(24), Vec3::new(3.0, -3.0, 0.0));
        assert_indices_in_range(&mesh);
    }

    #[test]
    fn test_plane_faces_positive_z() {
        let mesh = plane(6.0, 6.0, 3, 5);
        for t in 0..mesh.triangle_count() {
            assert!((mesh.face_normal(t) - Vec3::Z).length() < 1e-5);
        }
    }
}
