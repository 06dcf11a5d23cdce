/// A raster that cannot be turned into star detections.
///
/// Retrying never helps: the same input fails the same way.
#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("invalid raster buffer length (expected {expected} values, got {got})")]
    BufferSize { expected: usize, got: usize },

    #[error("invalid raster dimensions (width={width}, height={height})")]
    Dimensions { width: usize, height: usize },

    #[error("failed to load raster from {path}: {reason}")]
    Load { path: String, reason: String },
}

/// Degenerate geometry met while building graphs or estimating transforms.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("star {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("graph radius must be a non-negative number (got {radius})")]
    InvalidRadius { radius: f64 },

    #[error("match offset must be a non-negative number (got {offset})")]
    InvalidMatchOffset { offset: f64 },

    #[error("reference segment has zero length")]
    DegenerateSegment,
}
