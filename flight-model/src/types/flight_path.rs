const SAMPLES_PER_SEGMENT: usize = 64;

/// A point in the path's view box. `y` grows downward, like screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// A cubic Bézier segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl CubicSegment {
    /// Point at curve parameter `t` in `[0, 1]`.
    pub fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point::new(
            a * self.from.x + b * self.ctrl1.x + c * self.ctrl2.x + d * self.to.x,
            a * self.from.y + b * self.ctrl1.y + c * self.ctrl2.y + d * self.to.y,
        )
    }

    /// `samples + 1` evenly spaced points along the curve, ends included.
    pub fn flatten(&self, samples: usize) -> Vec<Point> {
        let samples = samples.max(1);
        (0..=samples)
            .map(|step| self.eval(step as f64 / samples as f64))
            .collect()
    }
}

/// Where and how the plane marker sits on the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPose {
    pub position: Point,
    /// Heading in degrees, measured like `atan2(dy, dx)` in view-box coordinates.
    pub angle_degrees: f64,
}

/// The fixed route drawn between origin and destination, flattened into a polyline
/// so positions can be looked up by arc length.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightPath {
    width: f64,
    height: f64,
    points: Vec<Point>,
    lengths: Vec<f64>,
}

impl Default for FlightPath {
    /// A single arc across an 800x200 view box.
    fn default() -> Self {
        Self::from_segments(
            800.0,
            200.0,
            &[CubicSegment {
                from: Point::new(40.0, 160.0),
                ctrl1: Point::new(220.0, 20.0),
                ctrl2: Point::new(580.0, 20.0),
                to: Point::new(760.0, 160.0),
            }],
        )
    }
}

impl FlightPath {
    /// Builds a path from consecutive segments inside a `width` x `height` view box.
    pub fn from_segments(width: f64, height: f64, segments: &[CubicSegment]) -> Self {
        let mut points = Vec::with_capacity(segments.len() * SAMPLES_PER_SEGMENT + 1);
        for (i, segment) in segments.iter().enumerate() {
            let first_sample = if i == 0 { 0 } else { 1 };
            for step in first_sample..=SAMPLES_PER_SEGMENT {
                points.push(segment.eval(step as f64 / SAMPLES_PER_SEGMENT as f64));
            }
        }

        let mut lengths = Vec::with_capacity(points.len());
        let mut accumulated = 0.0;
        for (i, point) in points.iter().enumerate() {
            if i > 0 {
                accumulated += points[i - 1].distance(point);
            }
            lengths.push(accumulated);
        }

        Self {
            width,
            height,
            points,
            lengths,
        }
    }

    pub fn view_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// The flattened polyline, for drawing.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn total_length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at arc length `length`, clamped to the ends of the path.
    pub fn point_at_length(&self, length: f64) -> Point {
        let Some(first) = self.points.first() else {
            return Point::default();
        };
        let total = self.total_length();
        if length >= total {
            return self.points[self.points.len() - 1];
        }
        let length = length.max(0.0);

        let index = self.lengths.partition_point(|&l| l < length);
        if index == 0 {
            return *first;
        }

        let start = self.lengths[index - 1];
        let span = self.lengths[index] - start;
        if span <= 0.0 {
            return self.points[index];
        }
        self.points[index - 1].lerp(&self.points[index], (length - start) / span)
    }

    /// The part of the polyline covered at a progress fraction, ending exactly at
    /// the marker position.
    pub fn flown_points(&self, progress: f64) -> Vec<Point> {
        let total = self.total_length();
        let length = (progress * total).clamp(0.0, total);
        let covered = self.lengths.partition_point(|&l| l < length);

        let mut points: Vec<Point> = self.points[..covered].to_vec();
        if !self.points.is_empty() {
            points.push(self.point_at_length(length));
        }
        points
    }

    /// Marker position and heading at a progress fraction.
    pub fn pose_at(&self, progress: f64) -> MarkerPose {
        let total = self.total_length();
        let length = (progress * total).clamp(0.0, total);

        let position = self.point_at_length(length);
        let ahead = self.point_at_length((length + 1.0).min(total));

        // At the very end there is nothing ahead; look back instead.
        let (from, to) = if ahead == position {
            (self.point_at_length((length - 1.0).max(0.0)), position)
        } else {
            (position, ahead)
        };

        MarkerPose {
            position,
            angle_degrees: (to.y - from.y).atan2(to.x - from.x).to_degrees(),
        }
    }
}
