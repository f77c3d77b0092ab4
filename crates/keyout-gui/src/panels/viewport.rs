use keyout_core::controller::{Pane, ViewerEvent};
use keyout_core::viewport::{Point, ViewportTransform, ZoomDirection};

use crate::app::KeyoutApp;

const PANE_GAP: f32 = 4.0;
const CHECKER_SIZE: f32 = 12.0;

pub fn show(ctx: &egui::Context, app: &mut KeyoutApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let full = ui.available_rect_before_wrap();
        let half = (full.width() - PANE_GAP) / 2.0;
        let input_rect = egui::Rect::from_min_size(full.min, egui::vec2(half, full.height()));
        let output_rect = egui::Rect::from_min_size(
            egui::pos2(input_rect.max.x + PANE_GAP, full.min.y),
            egui::vec2(half, full.height()),
        );
        app.ui_state.pane_size = Some(to_point(input_rect.size()));

        let mut events = Vec::new();
        for (pane, rect) in [(Pane::Input, input_rect), (Pane::Output, output_rect)] {
            show_pane(ui, app, pane, rect, &mut events);
        }
        for event in events {
            app.dispatch(event);
        }
    });
}

fn show_pane(
    ui: &mut egui::Ui,
    app: &KeyoutApp,
    pane: Pane,
    rect: egui::Rect,
    events: &mut Vec<ViewerEvent>,
) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(30));

    let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

    let Some(texture) = app.textures.get(pane).texture.as_ref() else {
        if pane == Pane::Input {
            show_placeholder(&painter, rect);
        }
        return;
    };

    collect_input(ui, &response, pane, rect, events);

    let view = app.viewer.view(pane);
    let img_rect = compute_img_rect(rect, texture.size_vec2(), view);
    if pane == Pane::Output {
        paint_checkerboard(&painter, img_rect.intersect(rect));
    }
    painter.image(
        texture.id(),
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
    draw_pane_label(&painter, rect, &pane.to_string());
}

/// Translate pointer activity over one pane into controller events, in
/// pane-relative screen coordinates.
fn collect_input(
    ui: &egui::Ui,
    response: &egui::Response,
    pane: Pane,
    rect: egui::Rect,
    events: &mut Vec<ViewerEvent>,
) {
    let relative = |pos: egui::Pos2| to_point(pos - rect.min);

    if response.hovered() {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if let (Some(direction), Some(pos)) = (
            ZoomDirection::from_wheel(scroll as f64),
            ui.input(|i| i.pointer.hover_pos()),
        ) {
            events.push(ViewerEvent::Wheel {
                pane,
                point: relative(pos),
                direction,
            });
        }
    }

    if response.dragged_by(egui::PointerButton::Middle)
        || (response.dragged_by(egui::PointerButton::Primary) && ui.input(|i| i.modifiers.command))
    {
        let delta = response.drag_delta();
        if delta != egui::Vec2::ZERO {
            events.push(ViewerEvent::Drag {
                pane,
                delta: to_point(delta),
            });
        }
    }

    if response.double_clicked() {
        events.push(ViewerEvent::FitView {
            pane,
            view_size: to_point(rect.size()),
        });
    } else if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            events.push(ViewerEvent::Click {
                pane,
                point: relative(pos),
            });
        }
    }
}

fn to_point(v: egui::Vec2) -> Point {
    Point::new(v.x as f64, v.y as f64)
}

fn compute_img_rect(
    rect: egui::Rect,
    image_size: egui::Vec2,
    view: &ViewportTransform,
) -> egui::Rect {
    let offset = view.offset();
    let min = rect.min + egui::vec2(offset.x as f32, offset.y as f32);
    egui::Rect::from_min_size(min, image_size * view.scale() as f32)
}

/// Gray checkerboard behind the output so transparent pixels are visible.
fn paint_checkerboard(painter: &egui::Painter, area: egui::Rect) {
    if !area.is_positive() {
        return;
    }
    let light = egui::Color32::from_gray(90);
    let dark = egui::Color32::from_gray(60);
    painter.rect_filled(area, 0.0, dark);

    let cols = (area.width() / CHECKER_SIZE).ceil() as usize;
    let rows = (area.height() / CHECKER_SIZE).ceil() as usize;
    for row in 0..rows {
        for col in (row % 2..cols).step_by(2) {
            let min = area.min + egui::vec2(col as f32 * CHECKER_SIZE, row as f32 * CHECKER_SIZE);
            let cell = egui::Rect::from_min_size(min, egui::vec2(CHECKER_SIZE, CHECKER_SIZE));
            painter.rect_filled(cell.intersect(area), 0.0, light);
        }
    }
}

fn draw_pane_label(painter: &egui::Painter, rect: egui::Rect, label: &str) {
    painter.text(
        rect.left_top() + egui::vec2(8.0, 8.0),
        egui::Align2::LEFT_TOP,
        label,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn show_placeholder(painter: &egui::Painter, rect: egui::Rect) {
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "Open an image to begin",
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(100),
    );
}
