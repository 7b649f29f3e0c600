use eframe::egui::{Pos2, Rect, Vec2, pos2};

use crate::analysis::detail::CorrelationDetail;

/// Gap between cursor and tooltip.
pub const TOOLTIP_OFFSET: f32 = 12.0;
/// Minimum distance kept from the bounds edge.
pub const TOOLTIP_INSET: f32 = 4.0;

/// Duration of the one-time legend fill, seconds.
pub const LEGEND_FILL_SECS: f64 = 1.8;

// ---------------------------------------------------------------------------
// Hover tooltip
// ---------------------------------------------------------------------------

/// What the tooltip shows and where the cursor was. Drawing is left to the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipState {
    pub text: String,
    pub anchor: Pos2,
}

impl TooltipState {
    pub fn for_cell(row: &str, col: &str, value: f64, anchor: Pos2) -> Self {
        Self {
            text: tooltip_text(row, col, value),
            anchor,
        }
    }

    /// Top-left corner of a tooltip of `size`, kept inside `bounds`.
    pub fn placement(&self, size: Vec2, bounds: Rect) -> Pos2 {
        place_tooltip(self.anchor, size, bounds)
    }
}

pub fn tooltip_text(row: &str, col: &str, value: f64) -> String {
    format!("{row} × {col}: {value:.3}")
}

/// Right/below the cursor by default; flips to the other side of the cursor
/// on overflow, then clamps into `bounds`.
pub fn place_tooltip(cursor: Pos2, size: Vec2, bounds: Rect) -> Pos2 {
    pos2(
        place_axis(cursor.x, size.x, bounds.left(), bounds.right()),
        place_axis(cursor.y, size.y, bounds.top(), bounds.bottom()),
    )
}

fn place_axis(cursor: f32, extent: f32, min: f32, max: f32) -> f32 {
    let mut start = cursor + TOOLTIP_OFFSET;
    if start + extent > max {
        start = cursor - extent - TOOLTIP_OFFSET;
    }
    let hi = max - extent - TOOLTIP_INSET;
    let lo = min + TOOLTIP_INSET;
    // When the tooltip is wider than the bounds, pin it to the leading edge.
    start.min(hi).max(lo)
}

// ---------------------------------------------------------------------------
// Clicked cell
// ---------------------------------------------------------------------------

/// The last clicked cell. Cleared when the detail view closes.
#[derive(Debug, Clone, PartialEq)]
pub struct CellSelection {
    pub row: String,
    pub col: String,
    pub value: f64,
}

impl CellSelection {
    pub fn detail(&self) -> CorrelationDetail {
        CorrelationDetail::classify(&self.row, &self.col, self.value)
    }
}

// ---------------------------------------------------------------------------
// Legend entrance animation
// ---------------------------------------------------------------------------

/// One-time legend fill. Owned by the app instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegendFill {
    started_at: Option<f64>,
    settled: bool,
}

impl LegendFill {
    /// Fill fraction in [0, 1] at time `now` (seconds). The first call starts
    /// the animation.
    pub fn progress(&mut self, now: f64) -> f32 {
        if self.settled {
            return 1.0;
        }
        let start = *self.started_at.get_or_insert(now);
        let t = ((now - start) / LEGEND_FILL_SECS).max(0.0);
        if t >= 1.0 {
            self.settled = true;
            return 1.0;
        }
        ease_cubic_out(t) as f32
    }

    /// Jump to the final state; later renders never animate.
    pub fn settle(&mut self) {
        self.settled = true;
    }

    pub fn is_animating(&self) -> bool {
        self.started_at.is_some() && !self.settled
    }
}

fn ease_cubic_out(t: f64) -> f64 {
    let u = 1.0 - t;
    1.0 - u * u * u
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(400.0, 300.0))
    }

    fn inside(p: Pos2, size: Vec2, b: Rect) -> bool {
        p.x >= b.left() && p.y >= b.top() && p.x + size.x <= b.right() && p.y + size.y <= b.bottom()
    }

    #[test]
    fn text_format() {
        assert_eq!(tooltip_text("AUX", "VERB", 0.82345), "AUX × VERB: 0.823");
        assert_eq!(tooltip_text("A", "B", -1.0), "A × B: -1.000");
    }

    #[test]
    fn default_is_right_and_below_cursor() {
        let p = place_tooltip(pos2(50.0, 60.0), Vec2::new(100.0, 20.0), bounds());
        assert_eq!(p, pos2(62.0, 72.0));
    }

    #[test]
    fn flips_near_right_and_bottom_edges() {
        let size = Vec2::new(100.0, 20.0);
        let p = place_tooltip(pos2(380.0, 295.0), size, bounds());
        assert_eq!(p, pos2(380.0 - 100.0 - 12.0, 295.0 - 20.0 - 12.0));
        assert!(inside(p, size, bounds()));
    }

    #[test]
    fn always_inside_bounds() {
        let b = bounds();
        let size = Vec2::new(150.0, 28.0);
        for x in [0.0, 5.0, 100.0, 200.0, 390.0, 400.0] {
            for y in [0.0, 10.0, 150.0, 290.0, 300.0] {
                let p = place_tooltip(pos2(x, y), size, b);
                assert!(inside(p, size, b), "cursor ({x},{y}) placed at {p:?}");
            }
        }
    }

    #[test]
    fn oversized_tooltip_pins_to_leading_edge() {
        let p = place_tooltip(pos2(10.0, 10.0), Vec2::new(500.0, 20.0), bounds());
        assert_eq!(p.x, TOOLTIP_INSET);
    }

    #[test]
    fn legend_fills_once() {
        let mut fill = LegendFill::default();
        assert_eq!(fill.progress(10.0), 0.0);
        assert!(fill.is_animating());
        let mid = fill.progress(10.9);
        assert!(mid > 0.5 && mid < 1.0);
        assert_eq!(fill.progress(12.0), 1.0);
        assert!(!fill.is_animating());
        // Never restarts.
        assert_eq!(fill.progress(100.0), 1.0);
    }

    #[test]
    fn settle_skips_remaining_animation() {
        let mut fill = LegendFill::default();
        fill.progress(0.0);
        fill.settle();
        assert_eq!(fill.progress(0.1), 1.0);
        assert!(!fill.is_animating());
    }

    #[test]
    fn selection_detail_uses_labels_and_value() {
        let sel = CellSelection {
            row: "AUX".into(),
            col: "VERB".into(),
            value: 0.82,
        };
        assert_eq!(sel.detail().headline(), "High Positive Correlation");
    }
}
