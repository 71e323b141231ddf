use glam::{Mat4, Vec2, Vec3};

use crate::scene::objects::DisplayObject;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Ray through normalized device coordinates (`x`, `y` in -1..1, y up).
    pub fn from_ndc(ndc: Vec2, view_proj: Mat4) -> Self {
        let inv = view_proj.inverse();
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Self {
            origin: near,
            direction: (far - near).normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Converts a cursor position in physical pixels to NDC.
pub fn cursor_to_ndc(cursor: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        (cursor.x / width.max(1.0)) * 2.0 - 1.0,
        -(cursor.y / height.max(1.0)) * 2.0 + 1.0,
    )
}

/// Möller–Trumbore, two-sided. Returns the ray parameter of the hit.
pub fn intersect_triangle(origin: Vec3, direction: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let e1 = b - a;
    let e2 = c - a;
    let p = direction.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(e1);
    let v = direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(q) * inv_det;
    (t > EPSILON).then_some(t)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub distance: f32,
    pub point: Vec3,
}

/// Nearest object hit by `ray`, testing each surface in its own local space.
pub fn pick(objects: &[DisplayObject], ray: &Ray) -> Option<Hit> {
    let mut best: Option<Hit> = None;

    for (index, object) in objects.iter().enumerate() {
        let inv = object.transform().inverse();
        // Rigid transform: the ray parameter is the same in both spaces.
        let origin = inv.transform_point3(ray.origin);
        let direction = inv.transform_vector3(ray.direction);
        let mesh = &object.surface;

        for t in 0..mesh.triangle_count() {
            let [a, b, c] = mesh.triangle_positions(t);
            let Some(distance) = intersect_triangle(origin, direction, a, b, c) else {
                continue;
            };
            if best.is_none_or(|h| distance < h.distance) {
                best = Some(Hit {
                    index,
                    distance,
                    point: ray.at(distance),
                });
            }
        }
    }

    best
}
