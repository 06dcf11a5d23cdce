//! Segment pattern search between two star graphs.
//!
//! Every segment of graph A is compared with every segment of graph B by
//! greedily pairing their children on inner angle. Pairs with enough matched
//! children become candidates, are ranked by pairing count and checked for a
//! consistent length ratio. The best verified candidate wins.

mod observer;
mod params;
mod result;
pub(crate) mod search;
mod verify;

pub use observer::{NoopObserver, SearchObserver};
pub use params::MatchParams;
pub use result::{ChildPairing, Hypothesis};

use search::{candidates_for, ranked_segments};
use star_graph::{SegmentGraph, SegmentId};
use verify::verify_zoom;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Finds a corresponding segment pair between two graphs.
///
/// Graphs are only read. Results are deterministic for a given input order.
#[derive(Clone, Debug, Default)]
pub struct PatternMatcher {
    params: MatchParams,
}

#[cfg_attr(feature = "parallel", allow(dead_code))]
enum Scan {
    /// Early termination on a verified candidate.
    Stopped(Hypothesis),
    /// Every unverified candidate in generation order.
    Finished(Vec<Hypothesis>),
}

impl PatternMatcher {
    pub fn new(params: MatchParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &MatchParams {
        &self.params
    }

    /// Best verified hypothesis, or `None` when nothing clears `min_matches`.
    pub fn find(&self, graph_a: &SegmentGraph, graph_b: &SegmentGraph) -> Option<Hypothesis> {
        self.find_with_observer(graph_a, graph_b, &mut NoopObserver)
    }

    /// Same as [`PatternMatcher::find`], reporting progress to `observer`.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, graph_a, graph_b, observer),
            fields(segments_a = graph_a.segments().len(), segments_b = graph_b.segments().len())
        )
    )]
    pub fn find_with_observer(
        &self,
        graph_a: &SegmentGraph,
        graph_b: &SegmentGraph,
        observer: &mut dyn SearchObserver,
    ) -> Option<Hypothesis> {
        let order_a = ranked_segments(graph_a, self.params.min_children);
        let order_b = ranked_segments(graph_b, self.params.min_children);
        if order_a.is_empty() || order_b.is_empty() {
            log::debug!("pattern search skipped: no segment has enough children");
            return None;
        }

        let mut candidates = match self.scan(graph_a, graph_b, &order_a, &order_b, observer) {
            Scan::Stopped(hypothesis) => {
                log::debug!(
                    "pattern search stopped early with {} pairings",
                    hypothesis.num_pairings()
                );
                return Some(hypothesis);
            }
            Scan::Finished(candidates) => candidates,
        };

        log::debug!(
            "pattern search: {} x {} segments, {} candidates",
            order_a.len(),
            order_b.len(),
            candidates.len()
        );

        candidates.sort_by_key(|c| std::cmp::Reverse(c.num_pairings()));
        let winner = candidates.into_iter().find_map(|mut c| {
            verify_zoom(graph_a, graph_b, &mut c, self.params.dist_tolerance).then_some(c)
        });

        match &winner {
            Some(h) => log::info!(
                "matched segment {} to {} with {} pairings (zoom {:.4})",
                h.segment_a,
                h.segment_b,
                h.num_pairings(),
                h.zoom
            ),
            None => log::info!("no consistent segment pattern found"),
        }
        winner
    }

    #[cfg(not(feature = "parallel"))]
    fn scan(
        &self,
        graph_a: &SegmentGraph,
        graph_b: &SegmentGraph,
        order_a: &[SegmentId],
        order_b: &[SegmentId],
        observer: &mut dyn SearchObserver,
    ) -> Scan {
        let total = order_a.len();
        let mut candidates = Vec::new();
        for (done, &a) in order_a.iter().enumerate() {
            for mut candidate in candidates_for(graph_a, a, graph_b, order_b, &self.params) {
                observer.on_candidate(&candidate);
                if let Some(stop) = self.params.stop_at_pairings {
                    if candidate.num_pairings() >= stop
                        && verify_zoom(graph_a, graph_b, &mut candidate, self.params.dist_tolerance)
                    {
                        observer.on_progress(done + 1, total);
                        return Scan::Stopped(candidate);
                    }
                }
                candidates.push(candidate);
            }
            observer.on_progress(done + 1, total);
        }
        Scan::Finished(candidates)
    }

    /// Workers only read the graphs; the ordered collect keeps candidates in
    /// the sequential generation order, so ranking is unchanged.
    #[cfg(feature = "parallel")]
    fn scan(
        &self,
        graph_a: &SegmentGraph,
        graph_b: &SegmentGraph,
        order_a: &[SegmentId],
        order_b: &[SegmentId],
        observer: &mut dyn SearchObserver,
    ) -> Scan {
        use rayon::prelude::*;

        let per_segment: Vec<Vec<Hypothesis>> = order_a
            .par_iter()
            .map(|&a| candidates_for(graph_a, a, graph_b, order_b, &self.params))
            .collect();

        let total = order_a.len();
        let mut candidates = Vec::new();
        for (done, batch) in per_segment.into_iter().enumerate() {
            for candidate in batch {
                observer.on_candidate(&candidate);
                candidates.push(candidate);
            }
            observer.on_progress(done + 1, total);
        }
        Scan::Finished(candidates)
    }
}
