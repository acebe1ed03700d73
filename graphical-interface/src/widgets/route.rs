use egui::{include_image, Color32, Image, Pos2, Rect, Sense, Stroke, Vec2};
use flight_model::{FlightPath, MarkerPose, Point};

const ROUTE_COLOR: Color32 = Color32::from_gray(110);
const FLOWN_COLOR: Color32 = Color32::from_rgb(0, 150, 255);
const PLANE_SIZE: Vec2 = Vec2::new(34.0, 34.0);

/// Maps the path's view box onto a screen rectangle, keeping its aspect ratio.
struct ViewBox {
    origin: Pos2,
    scale: f32,
}

impl ViewBox {
    fn fit(path: &FlightPath, rect: Rect) -> Self {
        let (width, height) = path.view_size();
        let (width, height) = (width.max(1.0) as f32, height.max(1.0) as f32);
        let scale = (rect.width() / width).min(rect.height() / height);
        let used = Vec2::new(width * scale, height * scale);
        Self {
            origin: rect.center() - used / 2.0,
            scale,
        }
    }

    fn project(&self, point: &Point) -> Pos2 {
        self.origin + Vec2::new(point.x as f32, point.y as f32) * self.scale
    }
}

/// Draws the route, the part already flown and the plane marker.
pub struct WidgetRoute;

impl WidgetRoute {
    pub fn show(
        ui: &mut egui::Ui,
        path: &FlightPath,
        progress: f64,
        marker: Option<MarkerPose>,
        arrived: bool,
    ) {
        let (width, height) = path.view_size();
        let aspect = (height / width.max(1.0)) as f32;
        let desired = Vec2::new(ui.available_width(), ui.available_width() * aspect);
        let (rect, _response) = ui.allocate_exact_size(desired, Sense::hover());
        let view = ViewBox::fit(path, rect);
        let painter = ui.painter_at(rect);

        let route: Vec<Pos2> = path.points().iter().map(|p| view.project(p)).collect();
        if let (Some(start), Some(end)) = (route.first(), route.last()) {
            painter.circle_filled(*start, 5.0, ROUTE_COLOR);
            painter.circle_filled(*end, 5.0, ROUTE_COLOR);
        }
        painter.add(egui::Shape::line(route, Stroke::new(2.0, ROUTE_COLOR)));

        let flown: Vec<Pos2> = path
            .flown_points(progress)
            .iter()
            .map(|p| view.project(p))
            .collect();
        if flown.len() > 1 {
            painter.add(egui::Shape::line(flown, Stroke::new(3.0, FLOWN_COLOR)));
        }

        if let Some(pose) = marker {
            let image = if arrived {
                Image::new(include_image!(r"../../plane-solid-arrived.svg"))
            } else {
                Image::new(include_image!(r"../../plane-solid.svg"))
            };
            let image = image
                .fit_to_exact_size(PLANE_SIZE)
                .rotate((pose.angle_degrees as f32).to_radians(), Vec2::splat(0.5));

            let center = view.project(&pose.position);
            ui.put(Rect::from_center_size(center, PLANE_SIZE), image);
        }
    }
}
