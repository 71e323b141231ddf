use crate::geometry::noise;

/// Scale applied to the noise value before it stretches a vertex radially.
pub const RADIAL_SCALE: f32 = 0.15;

/// Fixed third noise coordinate for planar patches. Only a phase offset; any
/// non-multiple of `π / frequency` would do.
pub const PLANAR_NOISE_PHASE: f32 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeFamily {
    Spheroid,
    Toroid,
    PlanarPatch,
}

impl ShapeFamily {
    pub const ALL: [ShapeFamily; 3] = [
        ShapeFamily::Spheroid,
        ShapeFamily::Toroid,
        ShapeFamily::PlanarPatch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeFamily::Spheroid => "Planet",
            ShapeFamily::Toroid => "Donut",
            ShapeFamily::PlanarPatch => "Terrain",
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            ShapeFamily::Spheroid | ShapeFamily::Toroid => Axis::RadialScale,
            ShapeFamily::PlanarPatch => Axis::AxisReplace,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relief {
    Smooth,
    Big,
    Small,
}

impl Relief {
    pub const ALL: [Relief; 3] = [Relief::Smooth, Relief::Big, Relief::Small];

    pub fn name(self) -> &'static str {
        match self {
            Relief::Smooth => "smooth",
            Relief::Big => "big",
            Relief::Small => "small",
        }
    }

    /// Noise parameters for this relief on the given family, `None` for smooth.
    pub fn params(self, family: ShapeFamily) -> Option<NoiseParams> {
        let planar = family == ShapeFamily::PlanarPatch;
        match self {
            Relief::Smooth => None,
            Relief::Big if planar => Some(NoiseParams::new(1.2, 1.2)),
            Relief::Big => Some(NoiseParams::new(1.5, 0.7)),
            Relief::Small if planar => Some(NoiseParams::new(6.0, 0.5)),
            Relief::Small => Some(NoiseParams::new(8.0, 0.3)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseParams {
    pub frequency: f32,
    pub amplitude: f32,
}

impl NoiseParams {
    pub const fn new(frequency: f32, amplitude: f32) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }
}

/// How a noise sample moves a vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// `p += p · d · RADIAL_SCALE`, sampling noise at `p`.
    RadialScale,
    /// `z = d`, sampling noise at `(x, y, PLANAR_NOISE_PHASE)`.
    AxisReplace,
}

impl Axis {
    #[inline]
    fn apply(self, p: &mut [f32], params: NoiseParams) {
        let NoiseParams {
            frequency,
            amplitude,
        } = params;
        match self {
            Axis::RadialScale => {
                let d = noise::evaluate(p[0], p[1], p[2], frequency, amplitude);
                let k = d * RADIAL_SCALE;
                p[0] += p[0] * k;
                p[1] += p[1] * k;
                p[2] += p[2] * k;
            }
            Axis::AxisReplace => {
                p[2] = noise::evaluate(p[0], p[1], PLANAR_NOISE_PHASE, frequency, amplitude);
            }
        }
    }
}

/// Displaces a flat xyz vertex buffer in place.
///
/// Normals are stale afterwards; callers recompute them before shading.
pub fn displace(vertices: &mut [f32], family: ShapeFamily, relief: Relief) {
    let Some(params) = relief.params(family) else {
        return;
    };
    let axis = family.axis();
    for p in vertices.chunks_exact_mut(3) {
        axis.apply(p, params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn assert_close(a: &[f32], b: &[f32]) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).abs() < EPS, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_smooth_is_identity() {
        let base = vec![3.0, 0.5, -1.25, 0.1, 2.9, 0.7, -2.0, -2.0, 1.0];
        for family in ShapeFamily::ALL {
            let mut v = base.clone();
            displace(&mut v, family, Relief::Smooth);
            assert_eq!(v, base);
        }
    }

    #[test]
    fn test_planar_big_single_vertex() {
        let mut v = vec![1.0, 1.0, 0.0];
        displace(&mut v, ShapeFamily::PlanarPatch, Relief::Big);
        let d = 1.2f32.sin() * 1.2f32.sin() * (6.0f32 * 1.2).sin() * 1.2;
        assert_close(&v, &[1.0, 1.0, d]);
    }

    #[test]
    fn test_planar_overwrites_existing_z() {
        let mut v = vec![0.0, 2.0, 5.0];
        displace(&mut v, ShapeFamily::PlanarPatch, Relief::Small);
        assert_eq!(v, vec![0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_spheroid_on_axis_vertex_is_fixed() {
        for relief in [Relief::Big, Relief::Small] {
            let mut v = vec![3.0, 0.0, 0.0];
            displace(&mut v, ShapeFamily::Spheroid, relief);
            assert_eq!(v, vec![3.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_radial_scale_formula() {
        let (x, y, z) = (1.1f32, -0.8f32, 2.3f32);
        let mut v = vec![x, y, z];
        displace(&mut v, ShapeFamily::Toroid, Relief::Big);
        let d = noise::evaluate(x, y, z, 1.5, 0.7);
        assert_close(
            &v,
            &[
                x + x * d * RADIAL_SCALE,
                y + y * d * RADIAL_SCALE,
                z + z * d * RADIAL_SCALE,
            ],
        );
    }

    #[test]
    fn test_radial_keeps_direction() {
        let mut v = vec![1.7, 1.3, -2.1];
        let before = glam::Vec3::new(v[0], v[1], v[2]).normalize();
        displace(&mut v, ShapeFamily::Spheroid, Relief::Small);
        let after = glam::Vec3::new(v[0], v[1], v[2]).normalize();
        assert!(before.dot(after) > 1.0 - 1e-5);
    }

    #[test]
    fn test_big_and_small_diverge() {
        let sample = [1.3, 0.9, 2.2];
        for family in ShapeFamily::ALL {
            let mut big = sample.to_vec();
            let mut small = sample.to_vec();
            displace(&mut big, family, Relief::Big);
            displace(&mut small, family, Relief::Small);
            let diff: f32 = big.iter().zip(&small).map(|(a, b)| (a - b).abs()).sum();
            assert!(diff > 1e-3, "{family:?} big and small coincide");
        }
    }

    #[test]
    fn test_parameter_table() {
        use ShapeFamily::*;
        assert_eq!(Relief::Smooth.params(Spheroid), None);
        assert_eq!(Relief::Smooth.params(PlanarPatch), None);
        assert_eq!(Relief::Big.params(PlanarPatch), Some(NoiseParams::new(1.2, 1.2)));
        assert_eq!(Relief::Big.params(Spheroid), Some(NoiseParams::new(1.5, 0.7)));
        assert_eq!(Relief::Big.params(Toroid), Some(NoiseParams::new(1.5, 0.7)));
        assert_eq!(Relief::Small.params(PlanarPatch), Some(NoiseParams::new(6.0, 0.5)));
        assert_eq!(Relief::Small.params(Spheroid), Some(NoiseParams::new(8.0, 0.3)));
        assert_eq!(Relief::Small.params(Toroid), Some(NoiseParams::new(8.0, 0.3)));
    }

    #[test]
    fn test_trailing_partial_vertex_untouched() {
        let mut v = vec![1.0, 1.0, 1.0, 9.0];
        displace(&mut v, ShapeFamily::Spheroid, Relief::Big);
        assert_eq!(v[3], 9.0);
    }
}
