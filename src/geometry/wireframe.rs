use std::collections::HashSet;

use crate::geometry::mesh::TriangleMesh;

/// Line-list positions for every unique undirected edge of `mesh`.
///
/// Edges are emitted in first-seen order so the output is deterministic.
pub fn wireframe_edges(mesh: &TriangleMesh) -> Vec<f32> {
    let mut seen = HashSet::with_capacity(mesh.indices.len());
    let mut lines = Vec::with_capacity(mesh.indices.len() * 2);

    for t in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle(t);
        for (from, to) in [(a, b), (b, c), (c, a)] {
            let key = (from.min(to), from.max(to));
            if seen.insert(key) {
                lines.extend_from_slice(&mesh.position(from as usize).to_array());
                lines.extend_from_slice(&mesh.position(to as usize).to_array());
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives;

    #[test]
    fn test_plane_edge_count() {
        let (w, h) = (4usize, 3usize);
        let mesh = primitives::plane(6.0, 6.0, w as u32, h as u32);
        let edges = wireframe_edges(&mesh).len() / 6;
        assert_eq!(edges, w * (h + 1) + h * (w + 1) + w * h);
    }

    #[test]
    fn test_shared_edge_emitted_once() {
        let mut mesh = TriangleMesh::default();
        for p in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]] {
            mesh.push_vertex(glam::Vec3::from_array(p), glam::Vec3::Z);
        }
        mesh.push_triangle(0, 1, 2);
        mesh.push_triangle(0, 2, 3);
        assert_eq!(wireframe_edges(&mesh).len() / 6, 5);
    }

    #[test]
    fn test_edges_follow_displaced_positions() {
        let mut mesh = primitives::plane(6.0, 6.0, 2, 2);
        for z in mesh.vertices.iter_mut().skip(2).step_by(3) {
            *z = 1.5;
        }
        let lines = wireframe_edges(&mesh);
        assert!(lines.iter().skip(2).step_by(3).all(|&z| z == 1.5));
    }
}
