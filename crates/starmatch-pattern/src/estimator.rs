//! Similarity transform from a winning hypothesis, and the resulting star
//! correspondences.

use crate::matcher::Hypothesis;
use kiddo::{KdTree, SquaredEuclidean};
use serde::{Deserialize, Serialize};
use star_graph::{Endpoint, SegmentGraph};
use starmatch_core::{GeometryError, SimilarityTransform, Star};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// One star of image A matched to one star of image B.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Correspondence {
    /// Index into the image-A star list.
    pub index_a: usize,
    /// Index into the image-B star list.
    pub index_b: usize,
    pub star_a: Star,
    pub star_b: Star,
    /// Distance between the transformed A star and its B match, in B pixels.
    pub residual: f64,
}

/// Whether segment B runs in the same direction as segment A.
///
/// Each pairing votes: children hanging off the same-numbered endpoint on
/// both sides vote to keep B's direction, crossed ones vote to flip it.
/// Ties keep the direction.
pub fn keeps_direction(hypothesis: &Hypothesis) -> bool {
    let same = hypothesis
        .pairings
        .iter()
        .filter(|p| p.same_side())
        .count();
    same * 2 >= hypothesis.pairings.len()
}

/// Similarity transform carrying image-A coordinates onto image B.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(graph_a, graph_b, hypothesis),
        fields(pairings = hypothesis.pairings.len())
    )
)]
pub fn estimate_transform(
    graph_a: &SegmentGraph,
    graph_b: &SegmentGraph,
    hypothesis: &Hypothesis,
) -> Result<SimilarityTransform, GeometryError> {
    let (b_start, b_end) = if keeps_direction(hypothesis) {
        (Endpoint::First, Endpoint::Second)
    } else {
        (Endpoint::Second, Endpoint::First)
    };

    let a = hypothesis.segment_a;
    let b = hypothesis.segment_b;
    let transform = SimilarityTransform::from_segment_pair(
        graph_a.star_at(a, Endpoint::First).position,
        graph_a.star_at(a, Endpoint::Second).position,
        graph_b.star_at(b, b_start).position,
        graph_b.star_at(b, b_end).position,
    )?;
    log::info!("estimated {transform}");
    Ok(transform)
}

/// Half the smallest non-zero distance between any two stars.
///
/// Coincident stars are ignored. Returns infinity for fewer than two
/// distinct positions.
pub fn auto_match_offset(stars: &[Star]) -> f64 {
    if stars.len() < 2 {
        return f64::INFINITY;
    }
    let coords: Vec<[f64; 2]> = stars.iter().map(|s| [s.x(), s.y()]).collect();
    let tree: KdTree<f64, 2> = (&coords).into();

    let mut min_sq = f64::INFINITY;
    for (i, q) in coords.iter().enumerate() {
        for nn in tree.nearest_n::<SquaredEuclidean>(q, 2) {
            if nn.item as usize != i && nn.distance > 0.0 {
                min_sq = min_sq.min(nn.distance);
            }
        }
    }
    0.5 * min_sq.sqrt()
}

/// Reject a NaN or negative correspondence radius. Infinity is allowed.
pub fn check_match_offset(match_offset: f64) -> Result<(), GeometryError> {
    if match_offset.is_nan() || match_offset < 0.0 {
        return Err(GeometryError::InvalidMatchOffset {
            offset: match_offset,
        });
    }
    Ok(())
}

/// Map every A star through `transform` and pair it with its nearest B star.
///
/// A pair is accepted when the nearest star lies strictly closer than
/// `match_offset`. Proposals are accepted closest first, so every star on
/// either side appears at most once. The result is sorted by `index_a`.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(stars_a, stars_b, transform),
        fields(a = stars_a.len(), b = stars_b.len())
    )
)]
pub fn correspond(
    stars_a: &[Star],
    stars_b: &[Star],
    transform: &SimilarityTransform,
    match_offset: f64,
) -> Result<Vec<Correspondence>, GeometryError> {
    check_match_offset(match_offset)?;
    if stars_a.is_empty() || stars_b.is_empty() {
        return Ok(Vec::new());
    }

    let coords: Vec<[f64; 2]> = stars_b.iter().map(|s| [s.x(), s.y()]).collect();
    let tree: KdTree<f64, 2> = (&coords).into();
    let max_sq = match_offset * match_offset;

    let mut proposals: Vec<(f64, usize, usize)> = stars_a
        .iter()
        .enumerate()
        .filter_map(|(i, star)| {
            let p = transform.apply(star.position);
            if !(p.x.is_finite() && p.y.is_finite()) {
                return None;
            }
            let nn = tree.nearest_one::<SquaredEuclidean>(&[p.x, p.y]);
            (nn.distance < max_sq).then_some((nn.distance, i, nn.item as usize))
        })
        .collect();
    proposals.sort_by(|x, y| x.0.total_cmp(&y.0).then(x.1.cmp(&y.1)));

    let mut taken = vec![false; stars_b.len()];
    let mut out = Vec::with_capacity(proposals.len());
    for (dist_sq, i, j) in proposals {
        if taken[j] {
            continue;
        }
        taken[j] = true;
        out.push(Correspondence {
            index_a: i,
            index_b: j,
            star_a: stars_a[i],
            star_b: stars_b[j],
            residual: dist_sq.sqrt(),
        });
    }
    out.sort_by_key(|c| c.index_a);

    log::debug!(
        "{} of {} stars matched within {:.3} px",
        out.len(),
        stars_a.len(),
        match_offset
    );
    Ok(out)
}
