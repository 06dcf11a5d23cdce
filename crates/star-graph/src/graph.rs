use crate::segment::{inner_angle, ChildLink, Endpoint, Segment, SegmentId};
use crate::spanning::spanning_distance;
use serde::{Deserialize, Serialize};
use starmatch_core::{GeometryError, Star};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Relative slack on the connection radius. Keeps the spanning tree's own
/// longest edge when rounding nudges its length a hair above the radius.
const RADIUS_REL_EPS: f64 = 1e-9;

/// Parameters for [`SegmentGraph::build`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphParams {
    /// Maximum segment length. `None` derives it from the star set as the
    /// longest minimum-spanning-tree edge.
    pub max_dist: Option<f64>,
}

impl Default for GraphParams {
    fn default() -> Self {
        Self { max_dist: None }
    }
}

/// Every segment of one star set within the connection radius, with the
/// inner angles between segments that share a star.
///
/// Segments live in one arena and refer to each other by [`SegmentId`].
/// `incident[i]` lists the segments touching star `i`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SegmentGraph {
    stars: Vec<Star>,
    segments: Vec<Segment>,
    incident: Vec<Vec<SegmentId>>,
    radius: f64,
}

impl SegmentGraph {
    /// Build the graph over `stars`.
    ///
    /// Stars equal by value are collapsed first, so indices in the graph
    /// refer to [`SegmentGraph::stars`], not to the input slice.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(stars, params), fields(stars = stars.len()))
    )]
    pub fn build(stars: &[Star], params: &GraphParams) -> Result<Self, GeometryError> {
        if let Some(index) = stars.iter().position(|s| !s.is_finite()) {
            return Err(GeometryError::NonFiniteCoordinate { index });
        }

        let mut unique: Vec<Star> = Vec::with_capacity(stars.len());
        for star in stars {
            if !unique.contains(star) {
                unique.push(*star);
            }
        }

        let radius = match params.max_dist {
            Some(r) if r.is_nan() || r < 0.0 => {
                return Err(GeometryError::InvalidRadius { radius: r })
            }
            Some(r) => r,
            None => spanning_distance(&unique),
        };
        let bound = radius * (1.0 + RADIUS_REL_EPS);

        let n = unique.len();
        let mut segments = Vec::new();
        let mut incident = vec![Vec::new(); n];
        for i in 0..n {
            for j in (i + 1)..n {
                let length = unique[i].distance_to(&unique[j]);
                if length == 0.0 || length > bound {
                    continue;
                }
                let id = segments.len();
                segments.push(Segment::new(i, j, length));
                incident[i].push(id);
                incident[j].push(id);
            }
        }

        link_children(&unique, &mut segments, &incident);

        log::debug!(
            "segment graph: {} stars ({} duplicates dropped), {} segments, radius {:.3}",
            n,
            stars.len() - n,
            segments.len(),
            radius
        );

        Ok(Self {
            stars: unique,
            segments,
            incident,
            radius,
        })
    }

    #[inline]
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id]
    }

    /// Segments touching star `star`.
    #[inline]
    pub fn incident(&self, star: usize) -> &[SegmentId] {
        &self.incident[star]
    }

    /// Connection radius the graph was built with.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Star index at one end of a segment.
    #[inline]
    pub fn star_at(&self, id: SegmentId, endpoint: Endpoint) -> &Star {
        &self.stars[self.segments[id].star(endpoint)]
    }

    /// Stars of two adjacent segments as `[outer_a, shared, outer_b]`.
    pub fn connection_order(&self, a: SegmentId, b: SegmentId) -> Option<[usize; 3]> {
        let (sa, sb) = (&self.segments[a], &self.segments[b]);
        let shared = sa.common_star(sb)?;
        let outer_a = sa.star(sa.endpoint_of(shared)?.other());
        let outer_b = sb.star(sb.endpoint_of(shared)?.other());
        Some([outer_a, shared, outer_b])
    }

    /// Inner angle between two adjacent segments; `None` if they share no star.
    pub fn inner_angle(&self, a: SegmentId, b: SegmentId) -> Option<f64> {
        let [outer_a, shared, outer_b] = self.connection_order(a, b)?;
        Some(inner_angle(
            self.stars[shared].position,
            self.stars[outer_a].position,
            self.stars[outer_b].position,
        ))
    }
}

/// Register every pair of segments meeting at a star as mutual children.
///
/// Two distinct segments share at most one star, so each pair is visited
/// once and no child appears twice.
fn link_children(stars: &[Star], segments: &mut [Segment], incident: &[Vec<SegmentId>]) {
    for (star, ids) in incident.iter().enumerate() {
        let apex = stars[star].position;
        for (k, &a) in ids.iter().enumerate() {
            for &b in &ids[k + 1..] {
                let (Some(via_a), Some(via_b)) =
                    (segments[a].endpoint_of(star), segments[b].endpoint_of(star))
                else {
                    continue;
                };
                let outer_a = stars[segments[a].star(via_a.other())].position;
                let outer_b = stars[segments[b].star(via_b.other())].position;
                let angle_deg = inner_angle(apex, outer_a, outer_b);

                segments[a].children.push(ChildLink {
                    segment: b,
                    angle_deg,
                    via: via_a,
                });
                segments[b].children.push(ChildLink {
                    segment: a,
                    angle_deg,
                    via: via_b,
                });
            }
        }
    }
}
