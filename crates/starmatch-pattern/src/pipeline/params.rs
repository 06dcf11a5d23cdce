use crate::matcher::MatchParams;
use serde::{Deserialize, Serialize};
use star_graph::GraphParams;
use starmatch_core::ExtractionParams;

/// How transformed stars are paired with their counterparts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrespondenceParams {
    /// Maximum distance between a transformed image-A star and its image-B
    /// match. `None` uses half the smallest gap between image-B stars.
    pub match_offset: Option<f64>,
}

/// Parameters of the full matching pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarMatchParams {
    pub extraction: ExtractionParams,
    pub graph: GraphParams,
    pub matching: MatchParams,
    pub correspondence: CorrespondenceParams,
}
