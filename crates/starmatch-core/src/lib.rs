//! Core types and utilities for star field correspondence.
//!
//! This crate is intentionally small: star detections, raster views, the
//! threshold extractor and the similarity transform. Graph construction and
//! pattern matching live in `star-graph` and `starmatch-pattern`.

mod error;
mod extract;
mod image;
mod logger;
mod similarity;
mod star;

pub use error::{GeometryError, InputError};
pub use extract::{extract_stars, ExtractionParams};
pub use image::{GrayImage, GrayImageView, LumaImageView, Raster};
pub use similarity::SimilarityTransform;
pub use star::{stars_from_points, Star};

#[cfg(feature = "tracing")]
pub use logger::{init_tracing, TracingFormat};

pub use logger::init_with_level;
