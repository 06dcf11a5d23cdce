use serde::{Deserialize, Serialize};

/// Tolerances of the segment pattern search.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchParams {
    /// Minimum number of paired children for a segment pair to become a
    /// candidate.
    pub min_matches: usize,
    /// Two inner angles pair up when they differ by less than this, in degrees.
    pub angle_tolerance_deg: f64,
    /// Allowed fractional deviation of a child length ratio from the
    /// reference zoom.
    pub dist_tolerance: f64,
    /// Segments with fewer children are skipped on both sides.
    pub min_children: usize,
    /// Stop at the first verified candidate with at least this many pairings.
    /// Only honored by the sequential search.
    #[serde(default)]
    pub stop_at_pairings: Option<usize>,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            min_matches: 5,
            angle_tolerance_deg: 3.6,
            dist_tolerance: 0.05,
            min_children: 2,
            stop_at_pairings: None,
        }
    }
}
