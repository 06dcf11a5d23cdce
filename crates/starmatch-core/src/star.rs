use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A detected star: sub-pixel centroid, mean brightness and blob radius.
///
/// Equality compares all four fields by value. Two detections sharing a
/// position but differing in brightness are distinct stars.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub position: Point2<f64>,
    pub brightness: f64,
    pub radius: f64,
}

impl Star {
    pub fn new(x: f64, y: f64, brightness: f64, radius: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            brightness,
            radius,
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Euclidean distance between the two centroids.
    #[inline]
    pub fn distance_to(&self, other: &Star) -> f64 {
        nalgebra::distance(&self.position, &other.position)
    }

    pub fn is_finite(&self) -> bool {
        self.position.x.is_finite() && self.position.y.is_finite()
    }
}

/// Build stars from bare positions, with unit brightness and radius.
///
/// Handy when positions come from an external detector that reports
/// nothing else.
pub fn stars_from_points(points: &[(f64, f64)]) -> Vec<Star> {
    points
        .iter()
        .map(|&(x, y)| Star::new(x, y, 1.0, 1.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_uses_every_field() {
        let a = Star::new(1.0, 2.0, 200.0, 1.5);
        assert_eq!(a, Star::new(1.0, 2.0, 200.0, 1.5));
        assert_ne!(a, Star::new(1.0, 2.0, 201.0, 1.5));
        assert_ne!(a, Star::new(1.0, 2.0, 200.0, 1.0));
    }

    #[test]
    fn nan_coordinate_is_not_finite() {
        assert!(!Star::new(f64::NAN, 0.0, 1.0, 1.0).is_finite());
        assert!(Star::new(3.0, 4.0, 1.0, 1.0).is_finite());
        assert_eq!(
            5.0,
            Star::new(0.0, 0.0, 1.0, 1.0).distance_to(&Star::new(3.0, 4.0, 1.0, 1.0))
        );
    }
}
