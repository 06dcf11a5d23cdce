use super::Hypothesis;
use star_graph::SegmentGraph;

/// Check that every length ratio of a candidate agrees on one zoom.
///
/// Each pairing contributes `len(child_a) / len(child_b)`. Any pairing may
/// serve as the reference; the first one that keeps every ratio within
/// `dist_tolerance` wins and is stored in `candidate.zoom`.
///
/// The main segment pair is held to the same zoom. This is stricter than
/// checking the children alone: a candidate whose children agree with each
/// other but whose main segments do not is rejected.
pub(super) fn verify_zoom(
    graph_a: &SegmentGraph,
    graph_b: &SegmentGraph,
    candidate: &mut Hypothesis,
    dist_tolerance: f64,
) -> bool {
    let ratio = |a: usize, b: usize| graph_a.segment(a).length / graph_b.segment(b).length;

    let main = ratio(candidate.segment_a, candidate.segment_b);
    let children: Vec<f64> = candidate
        .pairings
        .iter()
        .map(|p| ratio(p.child_a, p.child_b))
        .collect();

    let consistent = |zoom: f64, r: f64| ((r / zoom) - 1.0).abs() <= dist_tolerance;

    for &zoom in &children {
        if consistent(zoom, main) && children.iter().all(|&r| consistent(zoom, r)) {
            candidate.zoom = zoom;
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::search::pair_children;
    use star_graph::GraphParams;
    use starmatch_core::stars_from_points;

    /// Four spokes at right angles around (0, 0), no rim segments.
    fn cross(arm: [f64; 4]) -> SegmentGraph {
        let stars = stars_from_points(&[
            (0.0, 0.0),
            (arm[0], 0.0),
            (0.0, arm[1]),
            (-arm[2], 0.0),
            (0.0, -arm[3]),
        ]);
        let params = GraphParams {
            max_dist: Some(arm.iter().copied().fold(0.0, f64::max)),
        };
        SegmentGraph::build(&stars, &params).expect("graph")
    }

    #[test]
    fn uniform_scale_verifies() {
        let a = cross([5.0, 5.5, 6.0, 6.5]);
        let b = cross([2.5, 2.75, 3.0, 3.25]);
        let pairings = pair_children(&a, 0, &b, 0, 1.0);
        assert_eq!(3, pairings.len());

        let mut candidate = Hypothesis {
            segment_a: 0,
            segment_b: 0,
            pairings,
            zoom: f64::NAN,
        };
        assert!(verify_zoom(&a, &b, &mut candidate, 0.01));
        assert!((candidate.zoom - 2.0).abs() < 1e-12);
    }

    #[test]
    fn inconsistent_lengths_are_rejected() {
        let a = cross([5.0, 5.5, 6.0, 6.5]);
        let b = cross([2.5, 2.75, 3.0, 3.5]);
        let pairings = pair_children(&a, 0, &b, 0, 1.0);
        let mut candidate = Hypothesis {
            segment_a: 0,
            segment_b: 0,
            pairings,
            zoom: f64::NAN,
        };
        assert!(!verify_zoom(&a, &b, &mut candidate, 0.05));
        assert!(candidate.zoom.is_nan());
    }

    #[test]
    fn main_segment_ratio_must_agree_with_children() {
        // Children scale by 2 on every arm, the main segment only by 1.25.
        let a = cross([5.0, 5.5, 6.0, 6.5]);
        let b = cross([4.0, 2.75, 3.0, 3.25]);
        let pairings = pair_children(&a, 0, &b, 0, 1.0);
        assert_eq!(3, pairings.len());
        let mut candidate = Hypothesis {
            segment_a: 0,
            segment_b: 0,
            pairings,
            zoom: f64::NAN,
        };
        assert!(!verify_zoom(&a, &b, &mut candidate, 0.05));
        assert!(candidate.zoom.is_nan());
    }
}
