use std::f64::consts::{PI, TAU};

use rand::Rng;

use super::flight_path::{CubicSegment, Point};

/// Number of particles launched by one celebration.
pub const BATCH_SIZE: usize = 150;

/// Colors particles are drawn in, as RGB.
pub const PALETTE: [[u8; 3]; 7] = [
    [255, 94, 126],
    [255, 179, 71],
    [255, 233, 94],
    [126, 217, 87],
    [72, 196, 255],
    [152, 128, 255],
    [255, 255, 255],
];

const MAX_TILT_DEGREES: f64 = 15.0;
const SWAY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleShape {
    Circle,
    Heart,
    Star,
}

impl ParticleShape {
    const ALL: [ParticleShape; 3] = [
        ParticleShape::Circle,
        ParticleShape::Heart,
        ParticleShape::Star,
    ];
}

/// One piece of confetti.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: [u8; 3],
    pub shape: ParticleShape,
    pub tilt: f64,
    pub tilt_angle: f64,
    pub tilt_angle_increment: f64,
    pub velocity_x: f64,
    pub velocity_y: f64,
}

impl Particle {
    /// A particle somewhere above a `width` x `height` viewport, falling into it.
    pub fn random<R: Rng>(rng: &mut R, width: f64, height: f64) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);

        Self {
            x: rng.gen_range(0.0..width),
            y: rng.gen_range(-height..0.0),
            radius: rng.gen_range(4.0..10.0),
            color: PALETTE[rng.gen_range(0..PALETTE.len())],
            shape: ParticleShape::ALL[rng.gen_range(0..ParticleShape::ALL.len())],
            tilt: rng.gen_range(-10.0..0.0),
            tilt_angle: rng.gen_range(0.0..TAU),
            tilt_angle_increment: rng.gen_range(0.05..0.12),
            velocity_x: rng.gen_range(-1.0..1.0),
            velocity_y: rng.gen_range(2.0..5.0),
        }
    }

    /// Advances the particle by one frame.
    pub fn step(&mut self) {
        self.tilt_angle += self.tilt_angle_increment;
        self.x += self.velocity_x + self.tilt_angle.sin() * SWAY;
        self.y += self.velocity_y;
        self.tilt = self.tilt_angle.sin() * MAX_TILT_DEGREES;
    }
}

/// The arrival celebration: a falling batch of particles that ends once every
/// particle has left the bottom of the viewport.
#[derive(Debug, Clone)]
pub struct Confetti {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
}

impl Confetti {
    /// Launches a full batch using the given random source.
    pub fn launch<R: Rng>(rng: &mut R, width: f64, height: f64) -> Self {
        let particles = (0..BATCH_SIZE)
            .map(|_| Particle::random(rng, width, height))
            .collect();
        Self::from_particles(particles, width, height)
    }

    pub fn from_particles(particles: Vec<Particle>, width: f64, height: f64) -> Self {
        Self {
            particles,
            width,
            height,
        }
    }

    /// Follows the viewport when the window is resized.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Advances every particle one frame and drops those below the viewport.
    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.step();
        }
        let height = self.height;
        self.particles.retain(|particle| particle.y <= height);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// True once every particle has fallen out of view.
    pub fn is_finished(&self) -> bool {
        self.is_empty()
    }
}

/// Outline of a heart of height `size` centred on `center`, as four cubic curves.
/// The first two trace the left half from the top notch down to the tip, the last
/// two the right half back up to the notch.
pub fn heart_outline(center: Point, size: f64) -> [CubicSegment; 4] {
    let x = center.x;
    let top = center.y - size / 2.0;
    let half = size / 2.0;
    let notch = Point::new(x, top + size / 4.0);
    let tip = Point::new(x, top + size);

    [
        CubicSegment {
            from: notch,
            ctrl1: Point::new(x, top),
            ctrl2: Point::new(x - half, top),
            to: Point::new(x - half, top + size / 4.0),
        },
        CubicSegment {
            from: Point::new(x - half, top + size / 4.0),
            ctrl1: Point::new(x - half, top + size / 2.0),
            ctrl2: Point::new(x, top + size * 3.0 / 4.0),
            to: tip,
        },
        CubicSegment {
            from: tip,
            ctrl1: Point::new(x, top + size * 3.0 / 4.0),
            ctrl2: Point::new(x + half, top + size / 2.0),
            to: Point::new(x + half, top + size / 4.0),
        },
        CubicSegment {
            from: Point::new(x + half, top + size / 4.0),
            ctrl1: Point::new(x + half, top),
            ctrl2: Point::new(x, top),
            to: notch,
        },
    ]
}

/// Vertices of a five-point star, alternating outer and inner radius.
/// Outer points are 72° apart, the first one straight up when `rotation` is 0.
pub fn star_points(
    center: Point,
    outer_radius: f64,
    inner_radius: f64,
    rotation: f64,
) -> Vec<Point> {
    let step = PI / 5.0;
    (0..10)
        .map(|i| {
            let angle = rotation - PI / 2.0 + i as f64 * step;
            let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn falling(y: f64) -> Particle {
        Particle {
            x: 10.0,
            y,
            radius: 5.0,
            color: PALETTE[0],
            shape: ParticleShape::Circle,
            tilt: 0.0,
            tilt_angle: 0.0,
            tilt_angle_increment: 0.1,
            velocity_x: 0.0,
            velocity_y: 1.0,
        }
    }

    #[test]
    fn test_launch_creates_full_batch_above_viewport() {
        let mut rng = StdRng::seed_from_u64(7);
        let confetti = Confetti::launch(&mut rng, 800.0, 600.0);

        assert_eq!(confetti.len(), BATCH_SIZE);
        for particle in confetti.particles() {
            assert!((0.0..800.0).contains(&particle.x));
            assert!((-600.0..0.0).contains(&particle.y));
            assert!((4.0..10.0).contains(&particle.radius));
            assert!(particle.velocity_y >= 2.0);
            assert!(PALETTE.contains(&particle.color));
        }
    }

    #[test]
    fn test_seeded_launch_is_reproducible() {
        let a = Confetti::launch(&mut StdRng::seed_from_u64(42), 300.0, 200.0);
        let b = Confetti::launch(&mut StdRng::seed_from_u64(42), 300.0, 200.0);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_step_moves_and_tilts() {
        let mut particle = falling(0.0);
        particle.step();
        assert_eq!(particle.y, 1.0);
        assert!((particle.tilt_angle - 0.1).abs() < 1e-12);
        assert!((particle.tilt - 0.1f64.sin() * 15.0).abs() < 1e-12);
        assert!((particle.x - (10.0 + 0.1f64.sin() * SWAY)).abs() < 1e-12);
    }

    #[test]
    fn test_batch_strictly_shrinks_until_empty() {
        let height = 50.0;
        let particles = (0..5).map(|k| falling(height - k as f64)).collect();
        let mut confetti = Confetti::from_particles(particles, 100.0, height);

        let mut last = confetti.len();
        while !confetti.is_finished() {
            confetti.step();
            assert!(confetti.len() < last);
            last = confetti.len();
        }
        assert_eq!(last, 0);
    }

    #[test]
    fn test_random_batch_finishes_in_bounded_frames() {
        let mut confetti = Confetti::launch(&mut StdRng::seed_from_u64(3), 640.0, 480.0);
        // Slowest particle starts at most one viewport above and falls at least 2px a frame.
        let bound = (2.0 * 480.0 / 2.0) as usize + 2;

        let mut last = confetti.len();
        for _ in 0..bound {
            confetti.step();
            assert!(confetti.len() <= last);
            last = confetti.len();
        }
        assert!(confetti.is_finished());
    }

    #[test]
    fn test_star_geometry() {
        let center = Point::new(0.0, 0.0);
        let points = star_points(center, 10.0, 4.0, 0.0);
        assert_eq!(points.len(), 10);

        assert!(points[0].x.abs() < 1e-9);
        assert!((points[0].y + 10.0).abs() < 1e-9);

        for (i, point) in points.iter().enumerate() {
            let radius = point.x.hypot(point.y);
            let expected = if i % 2 == 0 { 10.0 } else { 4.0 };
            assert!((radius - expected).abs() < 1e-9);
        }

        let a0 = points[0].y.atan2(points[0].x);
        let a1 = points[2].y.atan2(points[2].x);
        assert!(((a1 - a0).to_degrees() - 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_heart_outline_is_closed_and_symmetric() {
        let curves = heart_outline(Point::new(50.0, 50.0), 20.0);
        assert_eq!(curves[0].from, curves[3].to);
        for i in 0..3 {
            assert_eq!(curves[i].to, curves[i + 1].from);
        }
        assert_eq!(curves[1].to, Point::new(50.0, 60.0));
        assert_eq!(curves[0].to.x, 40.0);
        assert_eq!(curves[2].to.x, 60.0);
    }
}
