use eframe::egui::{Align2, Color32, Pos2, Rect, Vec2, pos2, vec2};

use crate::analysis::ranking::SelectionView;
use crate::color::{correlation_color, legend_stops};

// Margins around the grid inside the drawing region.
const LEFT_MARGIN: f32 = 120.0;
const TOP_MARGIN: f32 = 100.0;
const BOTTOM_MARGIN: f32 = 40.0;
const LEGEND_GAP: f32 = 10.0;
const LEGEND_WIDTH: f32 = 12.0;
const LEGEND_LABEL_SPACE: f32 = 40.0;
const CELL_GAP: f32 = 2.0;

/// Column label rotation, radians (−55°).
pub const COLUMN_LABEL_ANGLE: f32 = -55.0 * std::f32::consts::PI / 180.0;
const ROW_LABEL_SIZE: f32 = 11.0;
const COLUMN_LABEL_SIZE: f32 = 10.0;
const TICK_LABEL_SIZE: f32 = 10.0;
const LABEL_COLOR: Color32 = Color32::from_rgb(0x11, 0x11, 0x11);
const LEGEND_STEPS: usize = 20;

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Square grid geometry for `n` features inside a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub region: Rect,
    pub origin: Pos2,
    pub cell: f32,
    pub n: usize,
}

impl GridLayout {
    /// `None` when there is nothing to draw or no room to draw it.
    pub fn new(region: Rect, n: usize) -> Option<Self> {
        if n == 0 {
            return None;
        }
        let usable_w =
            region.width() - LEFT_MARGIN - LEGEND_GAP - LEGEND_WIDTH - LEGEND_LABEL_SPACE;
        let usable_h = region.height() - TOP_MARGIN - BOTTOM_MARGIN;
        let cell = (usable_w / n as f32).min(usable_h / n as f32);
        if !(cell > CELL_GAP) {
            return None;
        }
        Some(Self {
            region,
            origin: region.min + vec2(LEFT_MARGIN, TOP_MARGIN),
            cell,
            n,
        })
    }

    pub fn side(&self) -> f32 {
        self.cell * self.n as f32
    }

    pub fn grid_rect(&self) -> Rect {
        Rect::from_min_size(self.origin, Vec2::splat(self.side()))
    }

    /// Drawn cell rectangle, inset by the gap.
    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let min = self.origin + vec2(col as f32 * self.cell, row as f32 * self.cell);
        Rect::from_min_size(min, Vec2::splat(self.cell - CELL_GAP))
    }

    /// `(row, col)` under `pos`, if any.
    pub fn cell_at(&self, pos: Pos2) -> Option<(usize, usize)> {
        let local = pos - self.origin;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let col = (local.x / self.cell) as usize;
        let row = (local.y / self.cell) as usize;
        (row < self.n && col < self.n).then_some((row, col))
    }

    pub fn legend_rect(&self) -> Rect {
        let grid = self.grid_rect();
        Rect::from_min_size(
            pos2(grid.right() + LEGEND_GAP, grid.top()),
            vec2(LEGEND_WIDTH, grid.height()),
        )
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum SceneShape {
    Cell {
        rect: Rect,
        fill: Color32,
        row: usize,
        col: usize,
    },
    Text {
        pos: Pos2,
        align: Align2,
        text: String,
        size: f32,
        color: Color32,
    },
    /// Text whose left-middle sits at `pos`, rotated by `angle` around it.
    RotatedText {
        pos: Pos2,
        angle: f32,
        text: String,
        size: f32,
        color: Color32,
    },
    /// Vertical colour band, linear from `top` to `bottom`.
    Gradient {
        rect: Rect,
        top: Color32,
        bottom: Color32,
    },
    Outline {
        rect: Rect,
        color: Color32,
    },
    Line {
        from: Pos2,
        to: Pos2,
        color: Color32,
    },
}

/// Everything the heatmap draws, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct GridScene {
    pub layout: GridLayout,
    pub shapes: Vec<SceneShape>,
}

impl GridScene {
    /// Build the scene for `view` inside `region`. `legend_fill` in [0, 1] is
    /// the visible share of the legend bar, rising from the bottom.
    pub fn build(view: &SelectionView<'_>, region: Rect, legend_fill: f32) -> Option<Self> {
        let layout = GridLayout::new(region, view.len())?;
        let n = layout.n;
        let mut shapes = Vec::with_capacity(n * n + 2 * n + LEGEND_STEPS + 8);

        for row in 0..n {
            for col in 0..n {
                shapes.push(SceneShape::Cell {
                    rect: layout.cell_rect(row, col),
                    fill: correlation_color(view.value(row, col)),
                    row,
                    col,
                });
            }
        }

        for (i, label) in view.labels().iter().enumerate() {
            let center = layout.origin.y + (i as f32 + 0.5) * layout.cell;
            shapes.push(SceneShape::Text {
                pos: pos2(layout.origin.x - 18.0, center),
                align: Align2::RIGHT_CENTER,
                text: label.clone(),
                size: ROW_LABEL_SIZE,
                color: LABEL_COLOR,
            });
            shapes.push(SceneShape::RotatedText {
                pos: pos2(
                    layout.origin.x + (i as f32 + 0.5) * layout.cell,
                    layout.origin.y - 14.0,
                ),
                angle: COLUMN_LABEL_ANGLE,
                text: label.clone(),
                size: COLUMN_LABEL_SIZE,
                color: LABEL_COLOR,
            });
        }

        push_legend(&mut shapes, layout.legend_rect(), legend_fill);

        Some(Self { layout, shapes })
    }
}

fn push_legend(shapes: &mut Vec<SceneShape>, bar: Rect, fill: f32) {
    let fill = fill.clamp(0.0, 1.0);
    let visible_top = bar.top() + bar.height() * (1.0 - fill);

    let stops = legend_stops(LEGEND_STEPS);
    for pair in stops.windows(2) {
        let (t0, _, c0) = pair[0];
        let (t1, _, c1) = pair[1];
        let y0 = bar.top() + t0 * bar.height();
        let y1 = bar.top() + t1 * bar.height();
        if y1 <= visible_top {
            continue;
        }
        // Partially revealed band keeps its colour at the cut line.
        let (top_y, top_color) = if y0 < visible_top {
            let f = (visible_top - y0) / (y1 - y0);
            (visible_top, lerp_color(c0, c1, f))
        } else {
            (y0, c0)
        };
        shapes.push(SceneShape::Gradient {
            rect: Rect::from_min_max(pos2(bar.left(), top_y), pos2(bar.right(), y1)),
            top: top_color,
            bottom: c1,
        });
    }

    if fill > 0.0 {
        shapes.push(SceneShape::Outline {
            rect: Rect::from_min_max(pos2(bar.left(), visible_top), bar.max),
            color: Color32::from_rgb(0x33, 0x33, 0x33),
        });
    }

    for value in [1.0_f32, 0.0, -1.0] {
        let y = bar.top() + (1.0 - value) / 2.0 * bar.height();
        shapes.push(SceneShape::Line {
            from: pos2(bar.right(), y),
            to: pos2(bar.right() + 4.0, y),
            color: LABEL_COLOR,
        });
        shapes.push(SceneShape::Text {
            pos: pos2(bar.right() + 6.0, y),
            align: Align2::LEFT_CENTER,
            text: format!("{value}"),
            size: TICK_LABEL_SIZE,
            color: LABEL_COLOR,
        });
    }
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}
