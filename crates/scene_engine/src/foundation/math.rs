//! Math utilities and types
//!
//! Provides the 2D vector and homogeneous matrix types used by the scene graph.
//! Points and offsets are both [`Vec2`]; transforms are 3x3 homogeneous matrices.

pub use nalgebra::{Matrix3, Vector2};

/// 2D vector type, also used as the point type throughout the engine
pub type Vec2 = Vector2<f32>;

/// 3x3 homogeneous matrix type for 2D affine transforms
pub type Mat3 = Matrix3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::*;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Euclidean distance between two points
    pub fn distance(a: Vec2, b: Vec2) -> f32 {
        (b - a).norm()
    }
}

/// Homogeneous translation matrix
pub fn translation(offset: Vec2) -> Mat3 {
    Mat3::new_translation(&offset)
}

/// Homogeneous scaling matrix
pub fn scaling(sx: f32, sy: f32) -> Mat3 {
    Mat3::new_nonuniform_scaling(&Vec2::new(sx, sy))
}

/// Rotation by `degrees` around `centre`
///
/// Positive angles rotate clockwise on screen, since window space has y pointing down.
pub fn rotation_about(centre: Vec2, degrees: f32) -> Mat3 {
    translation(centre) * Mat3::new_rotation(utils::deg_to_rad(degrees)) * translation(-centre)
}

/// Apply a homogeneous transform to a point
pub fn transform_point(matrix: &Mat3, point: Vec2) -> Vec2 {
    matrix.transform_point(&nalgebra::Point2::from(point)).coords
}

/// Orthographic projection from window space (origin top-left, y down) to clip space
pub fn orthographic(width: f32, height: f32) -> Mat3 {
    let sx = if width != 0.0 { 2.0 / width } else { 0.0 };
    let sy = if height != 0.0 { -2.0 / height } else { 0.0 };
    Mat3::new(
        sx,  0.0, -1.0,
        0.0, sy,   1.0,
        0.0, 0.0,  1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_about_keeps_centre_fixed() {
        let centre = Vec2::new(5.0, 5.0);
        let m = rotation_about(centre, 90.0);

        let moved = transform_point(&m, centre);
        assert_relative_eq!(moved, centre, epsilon = 1e-5);

        // (10, 5) sits to the right of the centre and swings to below it
        let swung = transform_point(&m, Vec2::new(10.0, 5.0));
        assert_relative_eq!(swung, Vec2::new(5.0, 10.0), epsilon = 1e-5);
    }

    #[test]
    fn test_orthographic_maps_window_corners_to_clip_space() {
        let projection = orthographic(800.0, 600.0);

        assert_relative_eq!(transform_point(&projection, Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
        assert_relative_eq!(transform_point(&projection, Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
        assert_relative_eq!(transform_point(&projection, Vec2::new(400.0, 300.0)), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_distance() {
        assert_relative_eq!(utils::distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
        assert_relative_eq!(utils::distance(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)), 0.0);
    }
}
