use glam::{Mat4, Vec3};

/// Indexed triangle mesh with flat xyz attribute buffers.
#[derive(Clone, Debug, Default)]
pub struct TriangleMesh {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

/// De-indexed triangle soup carrying one normal per face, repeated on its three
/// corners. This is what the solid pipeline draws.
#[derive(Clone, Debug, Default)]
pub struct FlatMesh {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
}

impl TriangleMesh {
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(triangle_count * 3),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3) {
        self.vertices.extend_from_slice(&position.to_array());
        self.normals.extend_from_slice(&normal.to_array());
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.vertices[i * 3..i * 3 + 3])
    }

    #[inline]
    pub fn normal(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.normals[i * 3..i * 3 + 3])
    }

    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        [
            self.indices[t * 3],
            self.indices[t * 3 + 1],
            self.indices[t * 3 + 2],
        ]
    }

    pub fn triangle_positions(&self, t: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangle(t);
        [
            self.position(a as usize),
            self.position(b as usize),
            self.position(c as usize),
        ]
    }

    /// Unit normal of triangle `t`, zero for a degenerate face.
    pub fn face_normal(&self, t: usize) -> Vec3 {
        let [a, b, c] = self.triangle_positions(t);
        (b - a).cross(c - a).normalize_or_zero()
    }

    /// Recomputes smooth per-vertex normals from the current positions.
    ///
    /// Face normals are accumulated unnormalized, so larger triangles weigh more.
    pub fn compute_vertex_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.vertex_count()];

        for t in 0..self.triangle_count() {
            let [ia, ib, ic] = self.triangle(t);
            let [a, b, c] = self.triangle_positions(t);
            let n = (b - a).cross(c - a);
            acc[ia as usize] += n;
            acc[ib as usize] += n;
            acc[ic as usize] += n;
        }

        self.normals.clear();
        for n in acc {
            self.normals
                .extend_from_slice(&n.normalize_or_zero().to_array());
        }
    }

    /// Expands into one vertex per triangle corner with the face normal on each.
    pub fn flat_shaded(&self) -> FlatMesh {
        let tris = self.triangle_count();
        let mut vertices = Vec::with_capacity(tris * 9);
        let mut normals = Vec::with_capacity(tris * 9);

        for t in 0..tris {
            let n = self.face_normal(t).to_array();
            for p in self.triangle_positions(t) {
                vertices.extend_from_slice(&p.to_array());
                normals.extend_from_slice(&n);
            }
        }

        FlatMesh { vertices, normals }
    }

    /// Returns a copy with positions and normals moved by `transform`.
    pub fn transformed(&self, transform: Mat4) -> TriangleMesh {
        let normal_matrix = transform.inverse().transpose();
        let mut out = TriangleMesh::with_capacity(self.vertex_count(), self.triangle_count());
        for i in 0..self.vertex_count() {
            let p = transform.transform_point3(self.position(i));
            let n = if self.normals.len() == self.vertices.len() {
                normal_matrix
                    .transform_vector3(self.normal(i))
                    .normalize_or_zero()
            } else {
                Vec3::ZERO
            };
            out.push_vertex(p, n);
        }
        out.indices = self.indices.clone();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> TriangleMesh {
        let mut mesh = TriangleMesh::with_capacity(3, 1);
        mesh.push_vertex(Vec3::new(0.0, 0.0, 0.0), Vec3::ZERO);
        mesh.push_vertex(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO);
        mesh.push_vertex(Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO);
        mesh.push_triangle(0, 1, 2);
        mesh
    }

    #[test]
    fn test_counts() {
        let mesh = single_triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangle(0), [0, 1, 2]);
    }

    #[test]
    fn test_vertex_normals_ccw_faces_up() {
        let mut mesh = single_triangle();
        mesh.compute_vertex_normals();
        for i in 0..3 {
            assert!((mesh.normal(i) - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_flat_shaded_expands_corners() {
        let mut mesh = single_triangle();
        mesh.push_vertex(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO);
        mesh.push_triangle(0, 3, 1);
        let flat = mesh.flat_shaded();
        assert_eq!(flat.vertices.len(), 2 * 9);
        assert_eq!(&flat.normals[0..3], &[0.0, 0.0, 1.0]);
        let second = Vec3::from_slice(&flat.normals[9..12]);
        assert!((second - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_degenerate_face_normal_is_zero() {
        let mut mesh = TriangleMesh::default();
        mesh.push_vertex(Vec3::ZERO, Vec3::ZERO);
        mesh.push_vertex(Vec3::X, Vec3::ZERO);
        mesh.push_vertex(Vec3::X * 2.0, Vec3::ZERO);
        mesh.push_triangle(0, 1, 2);
        assert_eq!(mesh.face_normal(0), Vec3::ZERO);
    }

    #[test]
    fn test_transformed_rotates_normals() {
        let mut mesh = single_triangle();
        mesh.compute_vertex_normals();
        let rot = Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2);
        let moved = mesh.transformed(Mat4::from_translation(Vec3::new(0.0, -7.0, 0.0)) * rot);
        assert!((moved.normal(0) - Vec3::Y).length() < 1e-5);
        assert!((moved.position(2) - Vec3::new(0.0, -7.0, -1.0)).length() < 1e-5);
    }
}
