use crate::estimator::Correspondence;
use crate::matcher::Hypothesis;
use serde::{Deserialize, Serialize};
use starmatch_core::SimilarityTransform;

/// Output of a matching run.
///
/// When no consistent pattern is found `transform` and `hypothesis` are
/// `None` and `correspondences` is empty.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StarMatchResult {
    pub transform: Option<SimilarityTransform>,
    pub hypothesis: Option<Hypothesis>,
    /// Sorted by image-A star index.
    pub correspondences: Vec<Correspondence>,
    /// Star counts of image A and image B.
    pub num_stars: [usize; 2],
    /// Segment counts of graph A and graph B.
    pub num_segments: [usize; 2],
    /// Offset the correspondences were accepted under.
    pub match_offset: Option<f64>,
}

impl StarMatchResult {
    pub fn is_match(&self) -> bool {
        self.transform.is_some()
    }

    /// Root mean square of the correspondence residuals.
    pub fn rms_residual(&self) -> Option<f64> {
        if self.correspondences.is_empty() {
            return None;
        }
        let sum_sq: f64 = self
            .correspondences
            .iter()
            .map(|c| c.residual * c.residual)
            .sum();
        Some((sum_sq / self.correspondences.len() as f64).sqrt())
    }
}
