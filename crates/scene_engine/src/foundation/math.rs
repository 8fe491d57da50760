//! Math utilities and types
//!
//! Provides the 2D math types used by the scene graph. Transforms are
//! expressed as homogeneous 3x3 matrices so parent and child transforms
//! compose with a single multiplication.

pub use nalgebra::{Matrix3, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Homogeneous 3x3 matrix for 2D affine transforms
pub type Mat3 = Matrix3<f32>;

/// Local transform of a scene node: position, rotation and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Position relative to the parent
    pub position: Vec2,

    /// Rotation in radians (counter-clockwise)
    pub rotation: f32,

    /// Scale factors
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Move by an offset
    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }

    /// Convert to a transformation matrix (translation * rotation * scale)
    pub fn to_matrix(&self) -> Mat3 {
        Mat3::new_translation(&self.position)
            * Mat3::new_rotation(self.rotation)
            * Mat3::new_nonuniform_scaling(&self.scale)
    }

    /// Combine this transform (as parent) with a child transform
    ///
    /// Only exact for uniform scale; non-uniform parents should compose
    /// matrices through [`Transform2D::to_matrix`] instead.
    pub fn combine(&self, child: &Self) -> Self {
        let rotated = Mat3::new_rotation(self.rotation)
            .transform_vector(&self.scale.component_mul(&child.position));
        Self {
            position: self.position + rotated,
            rotation: self.rotation + child.rotation,
            scale: self.scale.component_mul(&child.scale),
        }
    }
}

/// Extract the translation part of a homogeneous 2D matrix
pub fn matrix_position(matrix: &Mat3) -> Vec2 {
    matrix.transform_point(&Point2::origin()).coords
}

/// Axis-aligned rectangle in world or local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Width (non-negative)
    pub width: f32,
    /// Height (non-negative)
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0, "rect with negative size");
        Self { left, top, width, height }
    }

    /// Create a rectangle of the given size centered on a point
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x * 0.5, center.y - size.y * 0.5, size.x, size.y)
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    /// Size as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Check if this rectangle contains a point (edges inclusive)
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right() &&
        point.y >= self.top && point.y <= self.bottom()
    }

    /// Check if `other` lies entirely inside this rectangle
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.left >= self.left && other.right() <= self.right() &&
        other.top >= self.top && other.bottom() <= self.bottom()
    }

    /// Check if this rectangle overlaps another (touching edges count)
    pub fn intersects(&self, other: &Self) -> bool {
        self.left <= other.right() && self.right() >= other.left &&
        self.top <= other.bottom() && self.bottom() >= other.top
    }

    /// Grow the rectangle by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Self {
        Self::new(
            self.left - margin,
            self.top - margin,
            (self.width + 2.0 * margin).max(0.0),
            (self.height + 2.0 * margin).max(0.0),
        )
    }

    /// Axis-aligned bounds of this rectangle after applying a transform
    pub fn transformed(&self, matrix: &Mat3) -> Self {
        let corners = [
            Point2::new(self.left, self.top),
            Point2::new(self.right(), self.top),
            Point2::new(self.left, self.bottom()),
            Point2::new(self.right(), self.bottom()),
        ];

        let mut min = Vec2::new(f32::INFINITY, f32::INFINITY);
        let mut max = Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for corner in &corners {
            let p = matrix.transform_point(corner);
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Clamp a point into this rectangle
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.left, self.right()),
            point.y.clamp(self.top, self.bottom()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_transform_identity_matrix() {
        assert_relative_eq!(Transform2D::identity().to_matrix(), Mat3::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_matrix_composition_matches_combine() {
        let parent = Transform2D {
            position: Vec2::new(10.0, 5.0),
            rotation: FRAC_PI_2,
            scale: Vec2::new(2.0, 2.0),
        };
        let child = Transform2D::from_position(Vec2::new(3.0, 0.0));

        let via_matrix = matrix_position(&(parent.to_matrix() * child.to_matrix()));
        let via_combine = parent.combine(&child).position;

        // Rotating (6, 0) by 90 degrees gives (0, 6)
        assert_relative_eq!(via_matrix, Vec2::new(10.0, 11.0), epsilon = EPSILON);
        assert_relative_eq!(via_combine, via_matrix, epsilon = EPSILON);
    }

    #[test]
    fn test_rect_intersection_and_containment() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(10.0, 10.0, 20.0, 20.0);
        let straddling = Rect::new(90.0, 90.0, 20.0, 20.0);
        let outside = Rect::new(150.0, 0.0, 10.0, 10.0);

        assert!(outer.contains_rect(&inner));
        assert!(outer.intersects(&straddling));
        assert!(!outer.contains_rect(&straddling));
        assert!(!outer.intersects(&outside));
    }

    #[test]
    fn test_rect_transformed_by_rotation() {
        let local = Rect::from_center_size(Vec2::zeros(), Vec2::new(4.0, 2.0));
        let rotated = local.transformed(&Mat3::new_rotation(FRAC_PI_2));

        assert_relative_eq!(rotated.width, 2.0, epsilon = EPSILON);
        assert_relative_eq!(rotated.height, 4.0, epsilon = EPSILON);
    }

    #[test]
    fn test_clamp_point_snaps_to_edge() {
        let bounds = Rect::new(0.0, 0.0, 640.0, 480.0);
        let clamped = bounds.clamp_point(Vec2::new(650.0, -3.0));

        assert_eq!(clamped.x, 640.0);
        assert_eq!(clamped.y, 0.0);
    }
}
