//! Angle-annotated segment graphs over 2D star sets.
//!
//! A [`SegmentGraph`] joins every pair of stars closer than a connection
//! radius and records, for each pair of segments meeting at a star, the inner
//! angle between them. Angles are invariant under rotation, uniform scale and
//! translation, which makes the graph a shape signature for matching.
//!
//! The default radius is the longest edge of the Euclidean minimum spanning
//! tree ([`spanning_distance`]), the smallest radius that keeps the whole set
//! connected.
//!
//! ```
//! use star_graph::{GraphParams, SegmentGraph};
//! use starmatch_core::stars_from_points;
//!
//! let stars = stars_from_points(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]);
//! let graph = SegmentGraph::build(&stars, &GraphParams::default()).unwrap();
//! assert_eq!(2, graph.segments().len());
//! ```

mod graph;
mod segment;
mod spanning;

pub use graph::{GraphParams, SegmentGraph};
pub use segment::{inner_angle, ChildLink, Endpoint, Segment, SegmentId};
pub use spanning::spanning_distance;
