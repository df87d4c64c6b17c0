//! 2D transform component.
//!
//! [`Transform2D`] is the render-facing spatial state of an entity: where it
//! is, which way it faces, and how large it is drawn.

use engine_component::Component;
use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

/// A 2D transform representing position, rotation, and non-uniform scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform2D {
    /// World-space position.
    pub translation: Vec2,
    /// Counter-clockwise rotation in radians.
    pub rotation: f32,
    /// Per-axis scale factor.
    pub scale: Vec2,
}

impl Transform2D {
    /// The identity transform: origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
    };

    /// Create a new transform at `translation` with default rotation/scale.
    #[must_use]
    pub fn from_translation(translation: Vec2) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Compute the affine matrix mapping local space to world space.
    #[must_use]
    pub fn to_affine(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(self.scale, self.rotation, self.translation)
    }

    /// Map a local-space point into world space.
    #[must_use]
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        self.to_affine().transform_point2(point)
    }

    /// Translate the transform by the given offset.
    #[must_use]
    pub fn translated(mut self, offset: Vec2) -> Self {
        self.translation += offset;
        self
    }

    /// Rotate the transform by `angle` radians.
    #[must_use]
    pub fn rotated(mut self, angle: f32) -> Self {
        self.rotation += angle;
        self
    }

    /// Apply a uniform scale factor.
    #[must_use]
    pub fn scaled(mut self, factor: f32) -> Self {
        self.scale *= factor;
        self
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Component for Transform2D {
    fn type_name() -> &'static str {
        "Transform2D"
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn test_identity_transform() {
        let t = Transform2D::default();
        assert_eq!(t, Transform2D::IDENTITY);
        assert_eq!(t.to_affine(), Affine2::IDENTITY);
    }

    #[test]
    fn test_translated() {
        let t = Transform2D::IDENTITY.translated(Vec2::new(5.0, 0.0));
        assert_eq!(t.translation, Vec2::new(5.0, 0.0));
        assert_eq!(t.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(6.0, 1.0));
    }

    #[test]
    fn test_rotation_and_scale_apply_before_translation() {
        let t = Transform2D::from_translation(Vec2::new(10.0, 0.0))
            .rotated(FRAC_PI_2)
            .scaled(2.0);
        let p = t.transform_point(Vec2::new(1.0, 0.0));
        assert!((p - Vec2::new(10.0, 2.0)).length() < 1e-5, "got {p}");
    }

    #[test]
    fn test_json_shape() {
        let t = Transform2D::from_translation(Vec2::new(1.0, 2.0));
        let json = serde_json::to_value(t).unwrap();
        assert_eq!(json["translation"], serde_json::json!([1.0, 2.0]));
        let restored: Transform2D = serde_json::from_value(json).unwrap();
        assert_eq!(t, restored);
    }

    #[test]
    fn test_component_name() {
        assert_eq!(Transform2D::type_name(), "Transform2D");
    }
}
