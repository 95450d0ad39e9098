use std::f64::consts::PI;

use geo::coordinate_position::{CoordPos, CoordinatePosition};
use geo::{Coord, LineString, Point, Polygon};

use crate::settings::{Center, MAX_SEGMENTS};

/// Circular region around the configured center, approximated by a polygon.
///
/// The radius is taken in raw coordinate units; no geodesic conversion is done.
#[derive(Debug, Clone)]
pub struct AreaOfInterest {
    center: Point<f64>,
    boundary: Polygon<f64>,
}

impl AreaOfInterest {
    pub fn from_center(center: &Center) -> Self {
        Self::circle(
            Point::new(center.longitude, center.latitude),
            center.buffer,
            center.segments,
        )
    }

    /// Builds a polygon with `4 * quarter_segments` vertices on the circle, with
    /// `quarter_segments` capped at [`MAX_SEGMENTS`].
    pub fn circle(center: Point<f64>, radius: f64, quarter_segments: usize) -> Self {
        let vertex_count = 4 * quarter_segments.clamp(1, MAX_SEGMENTS);
        let step = 2.0 * PI / vertex_count as f64;

        let ring: Vec<Coord<f64>> = (0..vertex_count)
            .map(|i| {
                let angle = step * i as f64;
                Coord {
                    x: center.x() + radius * angle.cos(),
                    y: center.y() + radius * angle.sin(),
                }
            })
            .collect();

        // Polygon::new closes the ring.
        Self {
            center,
            boundary: Polygon::new(LineString::new(ring), vec![]),
        }
    }

    pub fn center(&self) -> Point<f64> {
        self.center
    }

    pub fn boundary(&self) -> &Polygon<f64> {
        &self.boundary
    }

    /// Point-in-polygon test; points on the boundary count as inside.
    pub fn contains_point(&self, point: &Point<f64>) -> bool {
        self.boundary.coordinate_position(&point.0) != CoordPos::Outside
    }
}
