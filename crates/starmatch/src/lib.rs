//! Star field correspondence between two images related by a similarity
//! transform (rotation, uniform scale, translation).
//!
//! This crate provides:
//! - re-exports of the underlying crates,
//! - (feature `image`) helpers that decode image files and run the whole
//!   pipeline on them.
//!
//! ## Quickstart
//!
//! ```no_run
//! use starmatch::detect;
//! use starmatch::StarMatchParams;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let result = detect::match_files("night1.png", "night2.png", StarMatchParams::default())?;
//! if let Some(t) = result.transform {
//!     println!("{t}: {} stars matched", result.correspondences.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `starmatch::core`: stars, raster views, extraction, similarity transform.
//! - `starmatch::graph`: spanning distance and segment graphs.
//! - `starmatch::pattern`: pattern search, transform estimation, pipeline, JSON IO.
//! - `starmatch::detect` (feature `image`): end-to-end helpers from image files.

pub use star_graph as graph;
pub use starmatch_core as core;
pub use starmatch_pattern as pattern;

pub use starmatch_core::{
    extract_stars, ExtractionParams, GeometryError, InputError, SimilarityTransform, Star,
};
pub use starmatch_pattern::{
    Correspondence, MatchError, MatchParams, StarMatchParams, StarMatchResult, StarMatcher,
};

#[cfg(feature = "image")]
pub mod detect;
