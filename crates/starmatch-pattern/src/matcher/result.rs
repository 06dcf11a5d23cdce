use serde::{Deserialize, Serialize};
use star_graph::{Endpoint, SegmentId};

/// One child of segment A paired with one child of segment B.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChildPairing {
    pub child_a: SegmentId,
    pub child_b: SegmentId,
    /// Endpoint of segment A the child hangs off.
    pub via_a: Endpoint,
    /// Endpoint of segment B the child hangs off.
    pub via_b: Endpoint,
    /// Absolute inner-angle difference, degrees.
    pub angle_diff_deg: f64,
}

impl ChildPairing {
    /// Whether both children hang off the same-numbered endpoint.
    #[inline]
    pub fn same_side(&self) -> bool {
        self.via_a == self.via_b
    }
}

/// A corresponding segment pair and its angle-matched children.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub segment_a: SegmentId,
    pub segment_b: SegmentId,
    pub pairings: Vec<ChildPairing>,
    /// Reference length ratio `len(A) / len(B)` the pairings agree on.
    /// NaN until the hypothesis is verified.
    pub zoom: f64,
}

impl Hypothesis {
    #[inline]
    pub fn num_pairings(&self) -> usize {
        self.pairings.len()
    }
}
