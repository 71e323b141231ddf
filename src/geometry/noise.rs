/// Separable trigonometric pseudo-noise.
///
/// Not gradient noise: the field is `sin(x·f)·sin(y·f)·sin(z·f)·a`, bounded by
/// `|amplitude|`. It vanishes wherever one coordinate is a multiple of
/// `π / frequency`.
#[inline]
pub fn evaluate(x: f32, y: f32, z: f32, frequency: f32, amplitude: f32) -> f32 {
    (x * frequency).sin() * (y * frequency).sin() * (z * frequency).sin() * amplitude
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [f32; 9] = [-7.3, -3.0, -1.1, -0.2, 0.4, 1.0, 2.5, 6.0, 11.9];

    #[test]
    fn test_bounded_by_amplitude() {
        for &x in &SAMPLES {
            for &y in &SAMPLES {
                for &z in &SAMPLES {
                    for (f, a) in [(1.5, 0.7), (8.0, 0.3), (1.2, -1.2), (6.0, 0.5)] {
                        let d = evaluate(x, y, z, f, a);
                        assert!(d.abs() <= a.abs() + 1e-6, "{d} exceeds {a}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_zero_amplitude_is_zero() {
        for &x in &SAMPLES {
            assert_eq!(evaluate(x, x + 1.0, x - 2.0, 3.0, 0.0), 0.0);
        }
    }

    #[test]
    fn test_zero_frequency_is_zero() {
        assert_eq!(evaluate(1.0, 2.0, 3.0, 0.0, 5.0), 0.0);
    }

    #[test]
    fn test_zero_coordinate_is_zero() {
        for &v in &SAMPLES {
            assert_eq!(evaluate(0.0, v, 1.3, 1.5, 0.7), 0.0);
            assert_eq!(evaluate(v, 0.0, 1.3, 1.5, 0.7), 0.0);
            assert_eq!(evaluate(v, 1.3, 0.0, 1.5, 0.7), 0.0);
        }
    }

    #[test]
    fn test_matches_closed_form() {
        let expected = 1.2f32.sin() * 1.2f32.sin() * 7.2f32.sin() * 1.2;
        assert!((evaluate(1.0, 1.0, 6.0, 1.2, 1.2) - expected).abs() < 1e-6);
    }
}
