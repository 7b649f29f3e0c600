use eframe::egui::epaint::{Mesh, TextShape};
use eframe::egui::{
    self, Color32, CursorIcon, FontId, Id, LayerId, Order, Painter, Rect, Sense, Shape, Stroke, Ui,
    vec2,
};

use super::scene::{GridScene, SceneShape};
use crate::state::AppState;

const TOOLTIP_PADDING: f32 = 6.0;

// ---------------------------------------------------------------------------
// Correlation heatmap (central panel)
// ---------------------------------------------------------------------------

/// Render the heatmap, update hover/click state.
pub fn correlation_grid(ui: &mut Ui, state: &mut AppState) {
    if state.is_loading() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.spinner();
        });
        return;
    }

    if state.current_view().is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            let msg = if state.analysis.is_some() {
                "Not enough numeric features to correlate."
            } else {
                "Open a dataset to explore correlations  (File → Open…)"
            };
            ui.heading(msg);
        });
        return;
    }

    let (region, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
    let now = ui.input(|i| i.time);
    let fill = state.legend.progress(now);

    let Some(scene) = state
        .current_view()
        .and_then(|view| GridScene::build(&view, region, fill))
    else {
        return;
    };

    let painter = ui.painter_at(region);
    paint_scene(&painter, &scene);

    if state.legend.is_animating() {
        ui.ctx().request_repaint();
    }

    let hovered = response
        .hover_pos()
        .and_then(|pos| scene.layout.cell_at(pos).map(|cell| (cell, pos)));

    match hovered {
        Some(((row, col), pos)) => {
            ui.output_mut(|o| o.cursor_icon = CursorIcon::PointingHand);
            highlight_cell(&painter, scene.layout.cell_rect(row, col));
            state.hover_cell(row, col, pos);
        }
        None => state.clear_hover(),
    }

    if response.clicked() {
        if let Some(((row, col), _)) = hovered {
            state.select_cell(row, col);
        }
    }

    if let Some(tip) = &state.tooltip {
        let layer = ui
            .ctx()
            .layer_painter(LayerId::new(Order::Tooltip, Id::new("corr_tooltip")));
        paint_tooltip(&layer, &tip.text, region, |size| tip.placement(size, region));
    }
}

fn highlight_cell(painter: &Painter, rect: Rect) {
    painter.add(Shape::closed_line(
        vec![rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()],
        Stroke::new(1.5, Color32::from_rgb(0x11, 0x11, 0x11)),
    ));
}

// ---------------------------------------------------------------------------
// Scene → egui shapes
// ---------------------------------------------------------------------------

pub fn paint_scene(painter: &Painter, scene: &GridScene) {
    for shape in &scene.shapes {
        match shape {
            SceneShape::Cell { rect, fill, .. } => {
                painter.rect_filled(*rect, 0.0, *fill);
            }
            SceneShape::Text {
                pos,
                align,
                text,
                size,
                color,
            } => {
                painter.text(*pos, *align, text, FontId::proportional(*size), *color);
            }
            SceneShape::RotatedText {
                pos,
                angle,
                text,
                size,
                color,
            } => {
                let galley = painter.layout_no_wrap(text.clone(), FontId::proportional(*size), *color);
                // Shift so the rotation pivot is the left-middle of the text.
                let half_h = galley.size().y / 2.0;
                let offset = vec2(angle.sin() * half_h, -angle.cos() * half_h);
                painter.add(TextShape::new(*pos + offset, galley, *color).with_angle(*angle));
            }
            SceneShape::Gradient { rect, top, bottom } => {
                let mut mesh = Mesh::default();
                mesh.colored_vertex(rect.left_top(), *top);
                mesh.colored_vertex(rect.right_top(), *top);
                mesh.colored_vertex(rect.right_bottom(), *bottom);
                mesh.colored_vertex(rect.left_bottom(), *bottom);
                mesh.add_triangle(0, 1, 2);
                mesh.add_triangle(0, 2, 3);
                painter.add(Shape::mesh(mesh));
            }
            SceneShape::Outline { rect, color } => {
                painter.add(Shape::closed_line(
                    vec![rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()],
                    Stroke::new(0.5, *color),
                ));
            }
            SceneShape::Line { from, to, color } => {
                painter.line_segment([*from, *to], Stroke::new(1.0, *color));
            }
        }
    }
}

fn paint_tooltip(
    painter: &Painter,
    text: &str,
    bounds: Rect,
    place: impl FnOnce(egui::Vec2) -> egui::Pos2,
) {
    let galley = painter.layout_no_wrap(
        text.to_string(),
        FontId::proportional(12.0),
        Color32::WHITE,
    );
    let size = galley.size() + vec2(2.0 * TOOLTIP_PADDING, 2.0 * TOOLTIP_PADDING);
    let min = place(size);
    let rect = Rect::from_min_size(min, size).intersect(bounds);

    painter.rect_filled(rect, 6.0, Color32::from_black_alpha(204));
    painter.galley(
        min + vec2(TOOLTIP_PADDING, TOOLTIP_PADDING),
        galley,
        Color32::WHITE,
    );
}
