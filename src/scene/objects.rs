use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};

use crate::config::Density;
use crate::geometry::{Relief, ShapeFamily, TriangleMesh, displace, primitives, wireframe_edges};

pub const PLANET_RADIUS: f32 = 3.0;
pub const DONUT_RADIUS: f32 = 2.0;
pub const DONUT_TUBE: f32 = 0.7;
pub const TERRAIN_SIZE: f32 = 6.0;

const COLUMN_SPACING: f32 = 7.0;
const ROW_SPACING: f32 = 7.0;

pub const WIRE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.5];

/// A solid surface and its edge overlay, placed by one shared transform.
pub struct DisplayObject {
    pub family: ShapeFamily,
    pub relief: Relief,
    pub position: Vec3,
    pub rotation_x: f32,
    /// Local-space displaced surface with recomputed normals.
    pub surface: TriangleMesh,
    /// Local-space line list derived from `surface`.
    pub edges: Vec<f32>,
    pub color: [f32; 3],
}

impl DisplayObject {
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_rotation_x(self.rotation_x)
    }

    pub fn double_sided(&self) -> bool {
        self.family == ShapeFamily::PlanarPatch
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.family.name(), self.relief.name())
    }
}

/// Every object of one build, tagged with the rebuild that produced it.
pub struct SceneSet {
    pub generation: u64,
    pub density: Density,
    pub objects: Vec<DisplayObject>,
}

impl SceneSet {
    pub fn vertex_count(&self) -> usize {
        self.objects.iter().map(|o| o.surface.vertex_count()).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.surface.triangle_count()).sum()
    }
}

pub fn relief_color(relief: Relief) -> [f32; 3] {
    match relief {
        Relief::Small => hex_rgb(0xff6699),
        Relief::Big => hex_rgb(0x44cc88),
        Relief::Smooth => hex_rgb(0x995fd3),
    }
}

fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// World position of a family/relief slot: one row per family, one column per relief.
pub fn slot_position(family: ShapeFamily, relief: Relief) -> Vec3 {
    let y = match family {
        ShapeFamily::Spheroid => ROW_SPACING,
        ShapeFamily::Toroid => 0.0,
        ShapeFamily::PlanarPatch => -ROW_SPACING,
    };
    let x = match relief {
        Relief::Smooth => -COLUMN_SPACING,
        Relief::Big => 0.0,
        Relief::Small => COLUMN_SPACING,
    };
    Vec3::new(x, y, 0.0)
}

pub fn base_primitive(family: ShapeFamily, density: Density) -> TriangleMesh {
    let d = density.get();
    match family {
        ShapeFamily::Spheroid => primitives::sphere(PLANET_RADIUS, d, d),
        ShapeFamily::Toroid => primitives::torus(DONUT_RADIUS, DONUT_TUBE, d, d * 2),
        ShapeFamily::PlanarPatch => primitives::plane(TERRAIN_SIZE, TERRAIN_SIZE, d, d),
    }
}

pub fn build_object(family: ShapeFamily, relief: Relief, density: Density) -> DisplayObject {
    let mut surface = base_primitive(family, density);
    displace(&mut surface.vertices, family, relief);
    surface.compute_vertex_normals();
    let edges = wireframe_edges(&surface);

    let rotation_x = match family {
        ShapeFamily::PlanarPatch => -FRAC_PI_2,
        _ => 0.0,
    };

    DisplayObject {
        family,
        relief,
        position: slot_position(family, relief),
        rotation_x,
        surface,
        edges,
        color: relief_color(relief),
    }
}

/// Builds the full nine-object set for `density`. Pure: same input, same output.
pub fn build_scene(generation: u64, density: Density) -> SceneSet {
    let objects = ShapeFamily::ALL
        .iter()
        .flat_map(|&family| {
            Relief::ALL
                .iter()
                .map(move |&relief| build_object(family, relief, density))
        })
        .collect();

    SceneSet {
        generation,
        density,
        objects,
    }
}
