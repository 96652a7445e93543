//! Polyline paths and length-based measurement.

use super::Point;

/// A polyline, optionally closed back to its first point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    points: Vec<Point>,
    closed: bool,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new path at `point`, discarding anything before it.
    pub fn move_to(&mut self, point: Point) {
        self.points.clear();
        self.points.push(point);
        self.closed = false;
    }

    /// Append a vertex. Repeated points are dropped so every segment has a
    /// non-zero length.
    pub fn line_to(&mut self, point: Point) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    pub fn close(&mut self) {
        self.closed = self.points.len() > 1;
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_empty(&self) -> bool {
        self.points.len() < 2
    }

    /// Vertices in drawing order, repeating the first one at the end for
    /// closed paths.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        let closing = if self.closed {
            self.points.first().copied()
        } else {
            None
        };
        self.points.iter().copied().chain(closing)
    }

    pub fn length(&self) -> f32 {
        let mut total = 0.0;
        let mut prev: Option<Point> = None;
        for p in self.vertices() {
            if let Some(prev) = prev {
                total += prev.distance(&p);
            }
            prev = Some(p);
        }
        total
    }
}

/// Length-parameterised view of a path.
///
/// Maps a distance along the path to a point and unit tangent, and extracts
/// sub-paths by distance. Queries never mutate the measure; use a
/// [`PathCursor`] for cheap sequential lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMeasure {
    vertices: Vec<Point>,
    /// `cumulative[i]` is the path length up to `vertices[i]`
    cumulative: Vec<f32>,
}

impl PathMeasure {
    pub fn new(path: &Path) -> Self {
        let mut vertices: Vec<Point> = Vec::with_capacity(path.points.len() + 1);
        let mut cumulative = Vec::with_capacity(path.points.len() + 1);
        let mut total = 0.0;
        for p in path.vertices() {
            if let Some(prev) = vertices.last() {
                let step = prev.distance(&p);
                // Zero-length segments have no tangent
                if step <= 0.0 {
                    continue;
                }
                total += step;
            }
            vertices.push(p);
            cumulative.push(total);
        }
        Self {
            vertices,
            cumulative,
        }
    }

    pub fn length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn segment_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Point and unit tangent at `distance`, clamped to the path.
    pub fn pos_tan(&self, distance: f32) -> Option<(Point, Point)> {
        let index = self.segment_at(distance)?;
        Some(self.interpolate(index, distance))
    }

    /// Sub-path between two distances, clamped to `[0, length]`.
    ///
    /// Returns an empty path when `start >= stop`.
    pub fn segment(&self, start: f32, stop: f32) -> Path {
        let mut out = Path::new();
        let length = self.length();
        let start = start.clamp(0.0, length);
        let stop = stop.clamp(0.0, length);
        if self.segment_count() == 0 || !(start < stop) {
            return out;
        }

        let mut cursor = self.cursor();
        let Some((first, _)) = cursor.pos_tan(start) else {
            return out;
        };
        out.move_to(first);
        let first_vertex = cursor.index + 1;
        for i in first_vertex..self.vertices.len() {
            if self.cumulative[i] >= stop {
                break;
            }
            out.line_to(self.vertices[i]);
        }
        if let Some((last, _)) = cursor.pos_tan(stop) {
            out.line_to(last);
        }
        out
    }

    pub fn cursor(&self) -> PathCursor<'_> {
        PathCursor {
            measure: self,
            index: 0,
        }
    }

    fn segment_at(&self, distance: f32) -> Option<usize> {
        let segments = self.segment_count();
        if segments == 0 {
            return None;
        }
        let distance = distance.clamp(0.0, self.length());
        // First vertex whose cumulative length is past `distance`
        let after = self.cumulative.partition_point(|&d| d <= distance);
        Some(after.saturating_sub(1).min(segments - 1))
    }

    fn interpolate(&self, index: usize, distance: f32) -> (Point, Point) {
        let a = self.vertices[index];
        let b = self.vertices[index + 1];
        let seg_len = self.cumulative[index + 1] - self.cumulative[index];
        let tangent = Point::new((b.x - a.x) / seg_len, (b.y - a.y) / seg_len);
        let local = (distance - self.cumulative[index]).clamp(0.0, seg_len);
        if local >= seg_len {
            return (b, tangent);
        }
        let t = local / seg_len;
        (
            Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t),
            tangent,
        )
    }
}

/// Sequential reader over a [`PathMeasure`].
///
/// Remembers the last segment it visited, so walking nearby distances costs
/// O(1) amortized instead of a search per query.
pub struct PathCursor<'a> {
    measure: &'a PathMeasure,
    index: usize,
}

impl PathCursor<'_> {
    pub fn pos_tan(&mut self, distance: f32) -> Option<(Point, Point)> {
        let m = self.measure;
        let segments = m.segment_count();
        if segments == 0 {
            return None;
        }
        let distance = distance.clamp(0.0, m.length());
        while self.index + 1 < segments && m.cumulative[self.index + 1] <= distance {
            self.index += 1;
        }
        while self.index > 0 && m.cumulative[self.index] > distance {
            self.index -= 1;
        }
        Some(m.interpolate(self.index, distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Path {
        let mut path = Path::new();
        path.move_to(Point::new(100.0, 50.0));
        path.line_to(Point::new(100.0, 100.0));
        path.line_to(Point::new(0.0, 100.0));
        path.line_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(100.0, 0.0));
        path.close();
        path
    }

    #[test]
    fn test_measure_length() {
        let measure = PathMeasure::new(&square());
        assert_eq!(measure.length(), 400.0);
        assert_eq!(measure.segment_count(), 5);
    }

    #[test]
    fn test_pos_tan() {
        let measure = PathMeasure::new(&square());
        let (p, t) = measure.pos_tan(100.0).expect("point");
        assert_eq!(p, Point::new(50.0, 100.0));
        assert_eq!(t, Point::new(-1.0, 0.0));

        // Clamped at both ends
        assert_eq!(measure.pos_tan(-10.0).map(|(p, _)| p), Some(Point::new(100.0, 50.0)));
        assert_eq!(measure.pos_tan(1e6).map(|(p, _)| p), Some(Point::new(100.0, 50.0)));
    }

    #[test]
    fn test_segment_follows_corners() {
        let measure = PathMeasure::new(&square());
        let sub = measure.segment(0.0, 100.0);
        assert_eq!(
            sub.points(),
            &[
                Point::new(100.0, 50.0),
                Point::new(100.0, 100.0),
                Point::new(50.0, 100.0)
            ]
        );
        assert!(!sub.is_closed());
        assert_eq!(sub.length(), 100.0);
    }

    #[test]
    fn test_segment_is_repeatable() {
        let measure = PathMeasure::new(&square());
        let first = measure.segment(0.0, 237.5);
        let second = measure.segment(0.0, 237.5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_segments() {
        let measure = PathMeasure::new(&square());
        assert!(measure.segment(50.0, 50.0).is_empty());
        assert!(measure.segment(80.0, 20.0).is_empty());
        assert!(PathMeasure::new(&Path::new()).segment(0.0, 1.0).is_empty());
    }

    #[test]
    fn test_cursor_matches_measure() {
        let measure = PathMeasure::new(&square());
        let mut cursor = measure.cursor();
        for d in [0.0, 10.0, 55.0, 150.0, 260.0, 399.0, 120.0, 5.0] {
            assert_eq!(cursor.pos_tan(d), measure.pos_tan(d), "distance {}", d);
        }
    }
}
