use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::scene::{DisplayObject, SceneSet};

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SolidVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// World-space vertex data for one scene set, ready for upload.
///
/// Solids are flat shaded. Single sided objects come first so the two solid
/// pipelines can draw disjoint ranges of one buffer.
#[derive(Default)]
pub struct PackedScene {
    pub solids: Vec<SolidVertex>,
    pub single_sided: usize,
    pub lines: Vec<LineVertex>,
}

impl PackedScene {
    pub fn from_objects(objects: &[DisplayObject]) -> Self {
        let mut packed = Self::default();

        for object in objects.iter().filter(|o| !o.double_sided()) {
            packed.push_solid(object);
        }
        packed.single_sided = packed.solids.len();
        for object in objects.iter().filter(|o| o.double_sided()) {
            packed.push_solid(object);
        }

        for object in objects {
            let transform = object.transform();
            packed.lines.extend(object.edges.chunks_exact(3).map(|p| LineVertex {
                position: transform
                    .transform_point3(glam::Vec3::from_slice(p))
                    .to_array(),
            }));
        }

        packed
    }

    fn push_solid(&mut self, object: &DisplayObject) {
        let flat = object.surface.transformed(object.transform()).flat_shaded();
        let color = object.color.map(srgb_to_linear);
        self.solids.extend(
            flat.vertices
                .chunks_exact(3)
                .zip(flat.normals.chunks_exact(3))
                .map(|(p, n)| SolidVertex {
                    position: [p[0], p[1], p[2]],
                    normal: [n[0], n[1], n[2]],
                    color,
                }),
        );
    }

    pub fn double_sided(&self) -> usize {
        self.solids.len() - self.single_sided
    }
}

/// GPU copies of the current scene set. Recreated whole on every accepted set.
#[derive(Default)]
pub struct SceneBuffers {
    solid_buffer: Option<wgpu::Buffer>,
    line_buffer: Option<wgpu::Buffer>,
    single_sided_count: u32,
    double_sided_count: u32,
    line_vertex_count: u32,
}

impl SceneBuffers {
    pub fn upload(&mut self, device: &wgpu::Device, set: &SceneSet) {
        let packed = PackedScene::from_objects(&set.objects);

        self.solid_buffer = (!packed.solids.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Solid Vertex Buffer"),
                contents: bytemuck::cast_slice(&packed.solids),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        self.line_buffer = (!packed.lines.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Wireframe Vertex Buffer"),
                contents: bytemuck::cast_slice(&packed.lines),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        self.single_sided_count = packed.single_sided as u32;
        self.double_sided_count = packed.double_sided() as u32;
        self.line_vertex_count = packed.lines.len() as u32;
    }

    pub fn solid_buffer(&self) -> Option<&wgpu::Buffer> {
        self.solid_buffer.as_ref()
    }

    pub fn line_buffer(&self) -> Option<&wgpu::Buffer> {
        self.line_buffer.as_ref()
    }

    pub fn single_sided_range(&self) -> std::ops::Range<u32> {
        0..self.single_sided_count
    }

    pub fn double_sided_range(&self) -> std::ops::Range<u32> {
        self.single_sided_count..self.single_sided_count + self.double_sided_count
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.line_vertex_count
    }
}

pub fn solid_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3];
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SolidVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

pub fn line_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Density;
    use crate::geometry::ShapeFamily;
    use crate::scene::objects::build_scene;

    #[test]
    fn test_vertex_sizes() {
        assert_eq!(std::mem::size_of::<SolidVertex>(), 36);
        assert_eq!(std::mem::size_of::<LineVertex>(), 12);
    }

    #[test]
    fn test_srgb_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!(srgb_to_linear(0.5) < 0.5);
    }

    #[test]
    fn test_packed_counts_match_scene() {
        let set = build_scene(0, Density::new(8).unwrap());
        let packed = PackedScene::from_objects(&set.objects);

        assert_eq!(packed.solids.len(), set.triangle_count() * 3);
        let edge_floats: usize = set.objects.iter().map(|o| o.edges.len()).sum();
        assert_eq!(packed.lines.len() * 3, edge_floats);

        let terrain_tris: usize = set
            .objects
            .iter()
            .filter(|o| o.family == ShapeFamily::PlanarPatch)
            .map(|o| o.surface.triangle_count())
            .sum();
        assert_eq!(packed.double_sided(), terrain_tris * 3);
    }

    #[test]
    fn test_terrain_lies_flat_in_world() {
        let set = build_scene(0, Density::new(8).unwrap());
        let packed = PackedScene::from_objects(&set.objects);
        // Smooth terrain: every corner sits on the y = -7 plane.
        let smooth_terrain = set
            .objects
            .iter()
            .find(|o| o.family == ShapeFamily::PlanarPatch)
            .unwrap();
        let count = smooth_terrain.surface.triangle_count() * 3;
        let start = packed.single_sided;
        for v in &packed.solids[start..start + count] {
            assert!((v.position[1] + 7.0).abs() < 1e-4);
            assert!((v.normal[1].abs() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_empty_scene_packs_nothing() {
        let packed = PackedScene::from_objects(&[]);
        assert!(packed.solids.is_empty());
        assert!(packed.lines.is_empty());
        assert_eq!(packed.double_sided(), 0);
    }
}
