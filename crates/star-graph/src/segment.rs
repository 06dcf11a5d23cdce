use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Index of a segment inside its owning [`crate::SegmentGraph`].
pub type SegmentId = usize;

/// One of the two endpoints of a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    First,
    Second,
}

impl Endpoint {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Endpoint::First => 0,
            Endpoint::Second => 1,
        }
    }

    #[inline]
    pub fn other(self) -> Endpoint {
        match self {
            Endpoint::First => Endpoint::Second,
            Endpoint::Second => Endpoint::First,
        }
    }
}

/// Link from a segment to a neighbor sharing exactly one star with it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChildLink {
    pub segment: SegmentId,
    /// Inner angle at the shared star, degrees in `[0, 180]`.
    pub angle_deg: f64,
    /// Endpoint of the *owning* segment that the neighbor hangs off.
    pub via: Endpoint,
}

/// Line between two stars of one graph.
///
/// `stars` holds indices into the graph's star list, smallest first.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Segment {
    pub stars: [usize; 2],
    pub length: f64,
    pub children: Vec<ChildLink>,
}

impl PartialEq for Segment {
    /// Segments are equal when they join the same unordered star pair.
    fn eq(&self, other: &Self) -> bool {
        self.connects(other.stars[0], other.stars[1])
    }
}

impl Segment {
    pub(crate) fn new(a: usize, b: usize, length: f64) -> Self {
        Self {
            stars: [a.min(b), a.max(b)],
            length,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn star(&self, endpoint: Endpoint) -> usize {
        self.stars[endpoint.index()]
    }

    /// Which endpoint `star` is, if it belongs to this segment.
    pub fn endpoint_of(&self, star: usize) -> Option<Endpoint> {
        if self.stars[0] == star {
            Some(Endpoint::First)
        } else if self.stars[1] == star {
            Some(Endpoint::Second)
        } else {
            None
        }
    }

    /// Whether this segment joins `a` and `b`, in either order.
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.stars[0] == a && self.stars[1] == b) || (self.stars[0] == b && self.stars[1] == a)
    }

    /// The star shared with `other`, when exactly one is shared.
    pub fn common_star(&self, other: &Segment) -> Option<usize> {
        if self == other {
            return None;
        }
        self.stars
            .iter()
            .copied()
            .find(|&s| other.endpoint_of(s).is_some())
    }

    /// Children hanging off one endpoint.
    pub fn children_at(&self, endpoint: Endpoint) -> impl Iterator<Item = &ChildLink> + '_ {
        self.children.iter().filter(move |c| c.via == endpoint)
    }

    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// Non-reflex angle in degrees between the rays `apex → a` and `apex → b`.
///
/// The result lies in `[0, 180]` and does not depend on argument order.
pub fn inner_angle(apex: Point2<f64>, a: Point2<f64>, b: Point2<f64>) -> f64 {
    let va = a - apex;
    let vb = b - apex;
    let cross = va.x * vb.y - va.y * vb.x;
    cross.abs().atan2(va.dot(&vb)).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn inner_angle_is_non_reflex_and_symmetric() {
        let apex = Point2::new(1.0, 1.0);
        let a = Point2::new(3.0, 1.0);
        let b = Point2::new(1.0, -4.0);
        assert_relative_eq!(inner_angle(apex, a, b), 90.0);
        assert_eq!(inner_angle(apex, a, b), inner_angle(apex, b, a));

        let c = Point2::new(-1.0, 1.0 - 1e-9);
        let angle = inner_angle(apex, a, c);
        assert!(angle <= 180.0 && angle > 179.0);
        assert_relative_eq!(inner_angle(apex, a, Point2::new(5.0, 5.0)), 45.0);
    }

    #[test]
    fn segment_equality_ignores_direction() {
        let s = Segment::new(4, 2, 1.0);
        assert_eq!([2, 4], s.stars);
        assert_eq!(s, Segment::new(2, 4, 7.0));
        assert_ne!(s, Segment::new(2, 5, 1.0));
    }

    #[test]
    fn common_star_requires_exactly_one_shared_endpoint() {
        let a = Segment::new(0, 1, 1.0);
        assert_eq!(Some(1), a.common_star(&Segment::new(1, 2, 1.0)));
        assert_eq!(Some(0), a.common_star(&Segment::new(3, 0, 1.0)));
        assert_eq!(None, a.common_star(&Segment::new(2, 3, 1.0)));
        assert_eq!(None, a.common_star(&Segment::new(1, 0, 1.0)));
    }
}
