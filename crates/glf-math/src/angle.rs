//! Angle conversion.
//!
//! The factors are the truncated literals `0.01745329` and `57.2957795`
//! rather than `PI / 180` and `180 / PI`, so results match shaders and
//! tools that hard-code the same digits.

/// Degrees to radians factor.
pub const RADIANS_PER_DEGREE: f32 = 0.01745329;

/// Radians to degrees factor.
pub const DEGREES_PER_RADIAN: f32 = 57.2957795;

/// Converts an angle in degrees to radians.
#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * RADIANS_PER_DEGREE
}

/// Converts an angle in radians to degrees.
#[inline]
pub fn to_degrees(radians: f32) -> f32 {
    radians * DEGREES_PER_RADIAN
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_literal_factors() {
        assert_eq!(to_radians(1.0), 0.01745329);
        assert_eq!(to_degrees(1.0), 57.2957795);
        assert_eq!(to_radians(0.0), 0.0);
    }

    #[test]
    fn test_roundtrip_is_close() {
        for d in [-180.0f32, -90.0, 0.0, 45.0, 60.0, 360.0] {
            assert_relative_eq!(to_degrees(to_radians(d)), d, epsilon = 1e-4);
        }
        assert_relative_eq!(to_radians(180.0), std::f32::consts::PI, epsilon = 1e-5);
    }
}
