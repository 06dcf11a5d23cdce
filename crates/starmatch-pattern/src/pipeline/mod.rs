//! End-to-end star matching: extraction, graphs, pattern search, transform
//! and correspondences.

mod error;
mod params;
mod result;
mod star_matcher;

pub use error::MatchError;
pub use params::{CorrespondenceParams, StarMatchParams};
pub use result::StarMatchResult;
pub use star_matcher::StarMatcher;
