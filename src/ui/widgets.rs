//! egui rendering glue for the viewer.
//!
//! Painting and input only; every state change goes through the
//! coordinator's operations. The map panel paints placeholder geography (a
//! graticule plus the attached marker glyphs) from a [`HeadlessMap`] and
//! feeds drag gestures into its pan pipeline, which in turn emits the move
//! events the coordinator drains on `poll`.

use crate::core::coordinator::MapCoordinator;
use crate::core::geo::{LatLng, Point};
use crate::core::store::MapStateStore;
use crate::notify::Notifications;
use crate::ui::coordinates::CoordinateInput;
use crate::widget::headless::HeadlessMap;
use crate::widget::MapWidget;
use egui::{Align2, Color32, FontId, Pos2, Response, Sense, Stroke, Ui, Vec2};

const GRATICULE_SPACINGS: [f64; 12] = [
    45.0, 10.0, 5.0, 1.0, 0.5, 0.1, 0.05, 0.01, 0.005, 0.001, 0.0005, 0.0001,
];

/// Graticule spacing in degrees that yields a handful of lines across
/// `span_deg`
fn graticule_spacing(span_deg: f64) -> f64 {
    for spacing in GRATICULE_SPACINGS {
        if span_deg / spacing >= 4.0 {
            return spacing;
        }
    }
    GRATICULE_SPACINGS[GRATICULE_SPACINGS.len() - 1]
}

/// Interactive map surface painted from a [`HeadlessMap`].
///
/// Dragging pans the map; the resulting move events reach the store on the
/// next [`MapCoordinator::poll`].
pub fn map_panel(ui: &mut Ui, store: &mut MapStateStore) -> Response {
    let desired = ui.available_size().max(Vec2::new(100.0, 100.0));
    let (rect, response) = ui.allocate_exact_size(desired, Sense::click_and_drag());

    let Some(map) = store
        .map_mut()
        .and_then(|widget| widget.as_any_mut().downcast_mut::<HeadlessMap>())
    else {
        ui.painter()
            .rect_filled(rect, 0.0, Color32::from_gray(40));
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            "map not initialized",
            FontId::proportional(14.0),
            Color32::GRAY,
        );
        return response;
    };

    if response.dragged() {
        let delta = response.drag_delta();
        if delta.length_sq() > 0.5 {
            // Dragging the map right moves the view center left
            map.pan_by(Point::new(-delta.x as f64, -delta.y as f64));
        }
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, Color32::from_rgb(225, 233, 240));

    let center = map.center();
    let zoom = map.zoom();
    let origin = center.project(zoom);
    let to_screen = |point: LatLng| -> Pos2 {
        let projected = point.project(zoom).subtract(&origin);
        rect.center() + Vec2::new(projected.x as f32, projected.y as f32)
    };
    let at_pixel = |pos: Pos2| -> LatLng {
        let offset = pos - rect.center();
        LatLng::unproject(
            origin.add(&Point::new(offset.x as f64, offset.y as f64)),
            zoom,
        )
    };

    // Graticule sized to the visible longitude span
    let top_left = at_pixel(rect.left_top());
    let bottom_right = at_pixel(rect.right_bottom());
    let spacing = graticule_spacing(bottom_right.lng - top_left.lng);
    let stroke = Stroke::new(1.0, Color32::from_rgb(180, 195, 210));
    let label_font = FontId::monospace(9.0);

    let mut lng = (top_left.lng / spacing).floor() * spacing;
    while lng <= bottom_right.lng + spacing {
        let x = to_screen(LatLng::new(center.lat, lng)).x;
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            stroke,
        );
        painter.text(
            Pos2::new(x + 2.0, rect.top() + 2.0),
            Align2::LEFT_TOP,
            format!("{:.4}", lng),
            label_font.clone(),
            Color32::from_gray(120),
        );
        lng += spacing;
    }
    let mut lat = (bottom_right.lat / spacing).floor() * spacing;
    while lat <= top_left.lat + spacing {
        let y = to_screen(LatLng::new(lat, center.lng)).y;
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            stroke,
        );
        painter.text(
            Pos2::new(rect.left() + 2.0, y + 2.0),
            Align2::LEFT_TOP,
            format!("{:.4}", lat),
            label_font.clone(),
            Color32::from_gray(120),
        );
        lat += spacing;
    }

    // Marker glyphs: ringed dot for the current location, cross for the rest
    for (options, position) in map.attached_markers() {
        let pos = to_screen(position);
        if !rect.contains(pos) {
            continue;
        }
        if options.icon.asset.contains("my_location") {
            painter.circle_filled(pos, 5.0, Color32::RED);
            painter.circle_stroke(pos, 9.0, Stroke::new(1.5, Color32::RED));
        } else {
            let arm = Vec2::new(6.0, 6.0);
            let cross = Stroke::new(2.0, Color32::RED);
            painter.line_segment([pos - arm, pos + arm], cross);
            painter.line_segment(
                [pos + Vec2::new(-arm.x, arm.y), pos + Vec2::new(arm.x, -arm.y)],
                cross,
            );
        }
        if let Some(popup) = options.popup.as_deref() {
            painter.text(
                pos + Vec2::new(0.0, 12.0),
                Align2::CENTER_TOP,
                popup,
                FontId::proportional(10.0),
                Color32::from_gray(90),
            );
        }
    }

    // Attribution lines of the visible layers, bottom-right like Leaflet
    let attributions = map.attributions().join(" | ");
    if !attributions.is_empty() {
        painter.text(
            rect.right_bottom() - Vec2::new(4.0, 4.0),
            Align2::RIGHT_BOTTOM,
            attributions,
            FontId::proportional(10.0),
            Color32::from_gray(110),
        );
    }

    response
}

/// Coordinate text field plus a Show button; Enter or the button submits
pub fn coordinate_row(
    ui: &mut Ui,
    input: &mut CoordinateInput,
    coordinator: &mut MapCoordinator,
    store: &mut MapStateStore,
) {
    ui.horizontal(|ui| {
        ui.label("Coordinates:");
        let field = ui.add(
            egui::TextEdit::singleline(input.text_mut())
                .hint_text("lat, lng")
                .desired_width(180.0),
        );
        let submitted =
            field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Show").clicked() || submitted {
            input.submit(coordinator, store);
        }
    });
}

/// Button requesting a fresh geolocation fix; failures land in the queue
pub fn gps_button(
    ui: &mut Ui,
    coordinator: &mut MapCoordinator,
    store: &mut MapStateStore,
    notifications: &Notifications,
) {
    if ui.button("📡 GPS").clicked() {
        let queue = notifications.clone();
        coordinator.center_on_current_position(
            store,
            Box::new(move |message| {
                queue.push_error(message);
            }),
        );
    }
}

/// Dismissible list of pending notifications, insertion order
pub fn alert_list(ui: &mut Ui, notifications: &Notifications) {
    for notification in notifications.snapshot() {
        ui.horizontal(|ui| {
            let color = match notification.severity {
                crate::notify::Severity::Error => Color32::from_rgb(200, 60, 60),
                crate::notify::Severity::Warning => Color32::from_rgb(200, 150, 40),
                crate::notify::Severity::Info => Color32::from_rgb(70, 130, 200),
                crate::notify::Severity::Success => Color32::from_rgb(70, 170, 90),
            };
            ui.colored_label(color, format!("[{}]", notification.severity));
            ui.label(&notification.message);
            if ui.small_button("✕").clicked() {
                notifications.dismiss(notification.id);
            }
        });
    }
}
