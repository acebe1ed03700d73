use egui::{Color32, Id, LayerId, Order, Painter, Pos2, Rect, Shape, Stroke, Vec2};
use flight_model::{heart_outline, star_points, Confetti, Particle, ParticleShape, Point};
use rand::Rng;

const CURVE_SAMPLES: usize = 8;

/// Full-window layer the arrival celebration is painted on.
/// It exists only while particles are still falling.
#[derive(Default)]
pub struct ConfettiOverlay {
    confetti: Option<Confetti>,
}

impl ConfettiOverlay {
    pub fn launch<R: Rng>(&mut self, rng: &mut R, viewport: Rect) {
        self.confetti = Some(Confetti::launch(
            rng,
            viewport.width() as f64,
            viewport.height() as f64,
        ));
    }

    pub fn is_active(&self) -> bool {
        self.confetti.is_some()
    }

    /// Paints the current frame and advances the particles by one step.
    pub fn show(&mut self, ctx: &egui::Context) {
        let Some(confetti) = &mut self.confetti else {
            return;
        };

        let screen = ctx.screen_rect();
        confetti.resize(screen.width() as f64, screen.height() as f64);

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("confetti")));
        for particle in confetti.particles() {
            paint_particle(&painter, screen.min, particle);
        }

        confetti.step();
        if confetti.is_finished() {
            self.confetti = None;
        }
    }
}

fn to_pos(origin: Pos2, point: &Point) -> Pos2 {
    origin + Vec2::new(point.x as f32, point.y as f32)
}

/// Rotates `point` around `center` by `degrees`.
fn tilted(point: Point, center: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
}

fn paint_particle(painter: &Painter, origin: Pos2, particle: &Particle) {
    let [r, g, b] = particle.color;
    let color = Color32::from_rgb(r, g, b);
    let center = Point::new(particle.x, particle.y);

    match particle.shape {
        ParticleShape::Circle => {
            painter.circle_filled(to_pos(origin, &center), particle.radius as f32, color);
        }
        ParticleShape::Heart => {
            let curves = heart_outline(center, particle.radius * 2.0);
            // Each half of the heart is convex on its own.
            for half in [&curves[..2], &curves[2..]] {
                let outline: Vec<Pos2> = half
                    .iter()
                    .enumerate()
                    .flat_map(|(i, curve)| {
                        let skip = usize::from(i > 0);
                        curve.flatten(CURVE_SAMPLES).into_iter().skip(skip)
                    })
                    .map(|p| to_pos(origin, &tilted(p, center, particle.tilt)))
                    .collect();
                painter.add(Shape::convex_polygon(outline, color, Stroke::NONE));
            }
        }
        ParticleShape::Star => {
            let points: Vec<Pos2> = star_points(
                center,
                particle.radius,
                particle.radius * 0.45,
                particle.tilt.to_radians(),
            )
            .iter()
            .map(|p| to_pos(origin, p))
            .collect();

            // Five tips plus the inner pentagon, all convex.
            for tip in 0..5 {
                let outer = points[tip * 2];
                let before = points[(tip * 2 + 9) % 10];
                let after = points[tip * 2 + 1];
                painter.add(Shape::convex_polygon(
                    vec![before, outer, after],
                    color,
                    Stroke::NONE,
                ));
            }
            let inner: Vec<Pos2> = points.iter().skip(1).step_by(2).copied().collect();
            painter.add(Shape::convex_polygon(inner, color, Stroke::NONE));
        }
    }
}
