use crate::GeometryError;
use nalgebra::{Point2, Rotation2, Vector2};
use serde::{Deserialize, Serialize};

/// 2D similarity transform `p' = scale * R(rotation) * p + translation`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityTransform {
    pub scale: f64,
    /// Counter-clockwise rotation in degrees, in `(-180, 180]`.
    pub rotation_deg: f64,
    pub translation: Vector2<f64>,
}

impl Default for SimilarityTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::fmt::Display for SimilarityTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Similarity(dx={:.2}, dy={:.2}, rot={:.3}°, scale={:.4})",
            self.translation.x, self.translation.y, self.rotation_deg, self.scale
        )
    }
}

impl SimilarityTransform {
    pub const IDENTITY: SimilarityTransform = SimilarityTransform {
        scale: 1.0,
        rotation_deg: 0.0,
        translation: Vector2::new(0.0, 0.0),
    };

    pub fn new(scale: f64, rotation_deg: f64, translation: Vector2<f64>) -> Self {
        Self {
            scale,
            rotation_deg: wrap_degrees(rotation_deg),
            translation,
        }
    }

    #[inline]
    pub fn rotation_rad(&self) -> f64 {
        self.rotation_deg.to_radians()
    }

    /// Transform that carries segment `a_start → a_end` onto `b_start → b_end`.
    ///
    /// Scale is the length ratio, rotation the signed angle from the first
    /// direction to the second, and the translation pins `a_start` onto
    /// `b_start`.
    pub fn from_segment_pair(
        a_start: Point2<f64>,
        a_end: Point2<f64>,
        b_start: Point2<f64>,
        b_end: Point2<f64>,
    ) -> Result<Self, GeometryError> {
        let va = a_end - a_start;
        let vb = b_end - b_start;
        let len_a = va.norm();
        let len_b = vb.norm();
        if !(len_a > 0.0 && len_a.is_finite() && len_b.is_finite()) {
            return Err(GeometryError::DegenerateSegment);
        }

        let scale = len_b / len_a;
        let cross = va.x * vb.y - va.y * vb.x;
        let dot = va.dot(&vb);
        let rotation = cross.atan2(dot);

        let mapped = Rotation2::new(rotation) * a_start.coords * scale;
        let translation = b_start.coords - mapped;

        Ok(Self::new(scale, rotation.to_degrees(), translation))
    }

    #[inline]
    pub fn apply(&self, p: Point2<f64>) -> Point2<f64> {
        let rotated = Rotation2::new(self.rotation_rad()) * p.coords;
        Point2::from(rotated * self.scale + self.translation)
    }

    /// Inverse transform; `None` for a zero or non-finite scale.
    pub fn inverse(&self) -> Option<Self> {
        if self.scale == 0.0 || !self.scale.is_finite() {
            return None;
        }
        let scale = 1.0 / self.scale;
        let rotation = -self.rotation_rad();
        let translation = -(Rotation2::new(rotation) * self.translation) * scale;
        Some(Self::new(scale, rotation.to_degrees(), translation))
    }
}

/// Wrap an angle in degrees into `(-180, 180]`.
fn wrap_degrees(deg: f64) -> f64 {
    let mut wrapped = deg.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped -= 360.0;
    }
    wrapped
}
