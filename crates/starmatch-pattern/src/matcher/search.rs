use super::{ChildPairing, Hypothesis, MatchParams};
use star_graph::{SegmentGraph, SegmentId};

/// Segment ids with at least `min_children` children, most children first.
///
/// The sort is stable, so equally connected segments keep graph order.
pub(super) fn ranked_segments(graph: &SegmentGraph, min_children: usize) -> Vec<SegmentId> {
    let mut order: Vec<SegmentId> = (0..graph.segments().len())
        .filter(|&id| graph.segment(id).child_count() >= min_children)
        .collect();
    order.sort_by_key(|&id| std::cmp::Reverse(graph.segment(id).child_count()));
    order
}

/// Greedy first-fit pairing of the children of `a` and `b` by inner angle.
///
/// Children of `a` are visited in order; each takes the first unused child
/// of `b` whose angle differs by less than `angle_tolerance_deg`.
pub(crate) fn pair_children(
    graph_a: &SegmentGraph,
    a: SegmentId,
    graph_b: &SegmentGraph,
    b: SegmentId,
    angle_tolerance_deg: f64,
) -> Vec<ChildPairing> {
    let children_b = &graph_b.segment(b).children;
    let mut used = vec![false; children_b.len()];
    let mut pairings = Vec::new();

    for ca in &graph_a.segment(a).children {
        let hit = children_b.iter().enumerate().find(|(k, cb)| {
            !used[*k] && (ca.angle_deg - cb.angle_deg).abs() < angle_tolerance_deg
        });
        if let Some((k, cb)) = hit {
            used[k] = true;
            pairings.push(ChildPairing {
                child_a: ca.segment,
                child_b: cb.segment,
                via_a: ca.via,
                via_b: cb.via,
                angle_diff_deg: (ca.angle_deg - cb.angle_deg).abs(),
            });
        }
    }
    pairings
}

/// Every candidate with segment `a` on the A side, in `order_b` order.
pub(super) fn candidates_for(
    graph_a: &SegmentGraph,
    a: SegmentId,
    graph_b: &SegmentGraph,
    order_b: &[SegmentId],
    params: &MatchParams,
) -> Vec<Hypothesis> {
    order_b
        .iter()
        .filter_map(|&b| {
            let pairings = pair_children(graph_a, a, graph_b, b, params.angle_tolerance_deg);
            (pairings.len() >= params.min_matches && !pairings.is_empty()).then(|| Hypothesis {
                segment_a: a,
                segment_b: b,
                pairings,
                zoom: f64::NAN,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use star_graph::GraphParams;
    use starmatch_core::stars_from_points;

    /// Hub at the origin with one spoke of length 10 per direction, in order.
    ///
    /// Rims only form between spokes closer than 60 degrees, and never touch
    /// the hub, so the children of a spoke are the other spokes.
    fn spokes(directions_deg: &[f64]) -> SegmentGraph {
        let mut points = vec![(0.0, 0.0)];
        points.extend(directions_deg.iter().map(|d| {
            let r = d.to_radians();
            (10.0 * r.cos(), 10.0 * r.sin())
        }));
        let params = GraphParams {
            max_dist: Some(10.0 + 1e-6),
        };
        SegmentGraph::build(&stars_from_points(&points), &params).expect("graph")
    }

    fn fan() -> SegmentGraph {
        spokes(&[0.0, 70.0, 150.0, 230.0])
    }

    #[test]
    fn ranking_puts_busiest_segments_first() {
        let graph = fan();
        let order = ranked_segments(&graph, 0);
        let counts: Vec<usize> = order
            .iter()
            .map(|&id| graph.segment(id).child_count())
            .collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(graph.segments().len(), order.len());
        assert!(ranked_segments(&graph, 100).is_empty());
    }

    #[test]
    fn each_child_is_used_at_most_once() {
        let graph = fan();
        let spoke = graph.incident(0)[0];
        let pairings = pair_children(&graph, spoke, &graph, spoke, 1.0);
        assert_eq!(graph.segment(spoke).child_count(), pairings.len());
        for p in &pairings {
            assert_eq!(p.child_a, p.child_b);
            assert!(p.same_side());
        }

        // A tolerance wider than every angle gap still pairs one to one.
        let loose = pair_children(&graph, spoke, &graph, spoke, 360.0);
        let mut used: Vec<SegmentId> = loose.iter().map(|p| p.child_b).collect();
        used.sort_unstable();
        used.dedup();
        assert_eq!(loose.len(), used.len());
    }

    /// Pairing is best-effort, not exhaustive: the first fitting child wins
    /// even when a later one fits better and a full assignment would pair
    /// more children.
    #[test]
    fn pairing_is_first_fit_not_optimal() {
        // A's children sit at 100 and 105 degrees from the reference spoke,
        // B's at 103 and then 100.5.
        let a = spokes(&[0.0, 100.0, 105.0]);
        let b = spokes(&[0.0, 103.0, 100.5]);
        let reference_a = a.incident(0)[0];
        let reference_b = b.incident(0)[0];
        let [a0, a1] = [a.incident(0)[1], a.incident(0)[2]];
        let [b0, b1] = [b.incident(0)[1], b.incident(0)[2]];
        let child_ids = |g: &SegmentGraph, id: SegmentId| -> Vec<SegmentId> {
            g.segment(id).children.iter().map(|c| c.segment).collect()
        };
        assert_eq!(vec![a0, a1], child_ids(&a, reference_a));
        assert_eq!(vec![b0, b1], child_ids(&b, reference_b));

        let pairings = pair_children(&a, reference_a, &b, reference_b, 3.6);

        // A0 fits B0 (3 degrees) and B1 (0.5 degrees) and takes B0. A1 only
        // fits B0, which is gone, so it stays unpaired.
        assert_eq!(1, pairings.len());
        assert_eq!((a0, b0), (pairings[0].child_a, pairings[0].child_b));
        assert!((pairings[0].angle_diff_deg - 3.0).abs() < 1e-9);
        assert!(pairings.iter().all(|p| p.child_a != a1 && p.child_b != b1));
    }
}
