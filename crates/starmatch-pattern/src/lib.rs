//! Star pattern matching between two images related by a similarity
//! transform.
//!
//! The pipeline:
//! - extract stars from each raster (`starmatch-core`),
//! - build an angle-annotated segment graph per star set (`star-graph`),
//! - search both graphs for a corresponding segment pair ([`PatternMatcher`]),
//! - estimate the similarity transform and pair up the stars ([`estimator`]).
//!
//! [`StarMatcher`] runs all of it:
//!
//! ```
//! use nalgebra::Vector2;
//! use starmatch_core::{stars_from_points, SimilarityTransform};
//! use starmatch_pattern::{MatchParams, StarMatchParams, StarMatcher};
//!
//! let a = stars_from_points(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
//! let truth = SimilarityTransform::new(2.0, 30.0, Vector2::new(5.0, 5.0));
//! let b: Vec<_> = a
//!     .iter()
//!     .map(|s| starmatch_core::Star { position: truth.apply(s.position), ..*s })
//!     .collect();
//!
//! let params = StarMatchParams {
//!     matching: MatchParams { min_matches: 2, ..MatchParams::default() },
//!     ..StarMatchParams::default()
//! };
//! let result = StarMatcher::new(params).match_stars(&a, &b).unwrap();
//! assert!(result.is_match());
//! assert_eq!(4, result.correspondences.len());
//! ```

pub mod estimator;
mod io;
mod matcher;
mod pipeline;

pub use estimator::Correspondence;
pub use io::{IoError, StarMatchConfig, StarMatchReport};
pub use matcher::{
    ChildPairing, Hypothesis, MatchParams, NoopObserver, PatternMatcher, SearchObserver,
};
pub use pipeline::{CorrespondenceParams, MatchError, StarMatchParams, StarMatchResult, StarMatcher};
