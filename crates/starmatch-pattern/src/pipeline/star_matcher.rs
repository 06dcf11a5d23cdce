use super::{MatchError, StarMatchParams, StarMatchResult};
use crate::estimator::{auto_match_offset, check_match_offset, correspond, estimate_transform};
use crate::matcher::{NoopObserver, PatternMatcher, SearchObserver};
use star_graph::SegmentGraph;
use starmatch_core::{extract_stars, Raster, Star};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Matches the stars of two images related by a similarity transform.
#[derive(Clone, Debug, Default)]
pub struct StarMatcher {
    params: StarMatchParams,
}

impl StarMatcher {
    pub fn new(params: StarMatchParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &StarMatchParams {
        &self.params
    }

    /// Extract stars from a raster with the configured thresholds.
    pub fn detect_stars<R: Raster + ?Sized>(&self, raster: &R) -> Result<Vec<Star>, MatchError> {
        Ok(extract_stars(raster, &self.params.extraction)?)
    }

    pub fn build_graph(&self, stars: &[Star]) -> Result<SegmentGraph, MatchError> {
        Ok(SegmentGraph::build(stars, &self.params.graph)?)
    }

    /// Match two star lists. Correspondence indices refer to these slices.
    pub fn match_stars(
        &self,
        stars_a: &[Star],
        stars_b: &[Star],
    ) -> Result<StarMatchResult, MatchError> {
        self.match_stars_with_observer(stars_a, stars_b, &mut NoopObserver)
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, stars_a, stars_b, observer),
            fields(a = stars_a.len(), b = stars_b.len())
        )
    )]
    pub fn match_stars_with_observer(
        &self,
        stars_a: &[Star],
        stars_b: &[Star],
        observer: &mut dyn SearchObserver,
    ) -> Result<StarMatchResult, MatchError> {
        if let Some(offset) = self.params.correspondence.match_offset {
            check_match_offset(offset)?;
        }
        let graph_a = self.build_graph(stars_a)?;
        let graph_b = self.build_graph(stars_b)?;

        let mut result = StarMatchResult {
            num_stars: [stars_a.len(), stars_b.len()],
            num_segments: [graph_a.segments().len(), graph_b.segments().len()],
            ..StarMatchResult::default()
        };

        let matcher = PatternMatcher::new(self.params.matching);
        let Some(hypothesis) = matcher.find_with_observer(&graph_a, &graph_b, observer) else {
            return Ok(result);
        };

        let transform = estimate_transform(&graph_a, &graph_b, &hypothesis)?;
        let offset = self
            .params
            .correspondence
            .match_offset
            .unwrap_or_else(|| auto_match_offset(stars_b));

        result.correspondences = correspond(stars_a, stars_b, &transform, offset)?;
        result.transform = Some(transform);
        result.hypothesis = Some(hypothesis);
        result.match_offset = Some(offset);

        log::info!(
            "{} correspondences between {} and {} stars",
            result.correspondences.len(),
            stars_a.len(),
            stars_b.len()
        );
        Ok(result)
    }

    /// Detect stars in both rasters and match them.
    pub fn match_rasters<A, B>(
        &self,
        raster_a: &A,
        raster_b: &B,
    ) -> Result<StarMatchResult, MatchError>
    where
        A: Raster + ?Sized,
        B: Raster + ?Sized,
    {
        let stars_a = self.detect_stars(raster_a)?;
        let stars_b = self.detect_stars(raster_b)?;
        self.match_stars(&stars_a, &stars_b)
    }
}
