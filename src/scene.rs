//! Chart model: turns a series, the surface's hover state and the canvas size
//! into plain geometry. Nothing here touches a renderer, so every number the
//! chart paints can be checked in tests.

use iced::{Point, Rectangle, Size};

use crate::hover::HoverState;
use crate::series::Series;

pub const MARGIN_LEFT: f32 = 40.0;
pub const MARGIN_RIGHT: f32 = 20.0;
pub const MARGIN_Y: f32 = 20.0;
/// The y axis never scales below this, so a quiet series doesn't look like
/// full-scale noise.
pub const MIN_SCALE: u32 = 100;
pub const GRID_DIVISIONS: u32 = 4;
/// Hover snaps to a sample only within `step_x / SNAP_DIVISOR`.
pub const SNAP_DIVISOR: f32 = 1.5;

pub const AXIS_FONT_SIZE: f32 = 10.0;
pub const VALUE_FONT_SIZE: f32 = 24.0;
pub const TOOLTIP_FONT_SIZE: f32 = 10.0;
pub const TOOLTIP_PADDING: f32 = 5.0;
pub const TOOLTIP_OFFSET: f32 = 10.0;
pub const MARKER_RADIUS: f32 = 5.0;

/// Monospace advance estimate, as a fraction of the font size.
const CHAR_ADVANCE: f32 = 0.6;

/// Estimated extent of a single line of text.
pub fn text_extent(text: &str, size: f32) -> Size {
    Size::new(text.chars().count() as f32 * size * CHAR_ADVANCE, size)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub y: f32,
    pub value: u32,
}

/// The big "current value" label of live charts. `anchor` is its top-right
/// corner.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueLabel {
    pub text: String,
    pub anchor: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub bounds: Rectangle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoverOverlay {
    pub index: usize,
    pub value: u32,
    pub marker: Point,
    pub tooltip: Tooltip,
}

/// Nearest sample to the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub index: usize,
    pub distance: f32,
}

/// Everything a chart paints, in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScene {
    pub size: Size,
    pub plot: Rectangle,
    pub max_val: u32,
    pub step_x: f32,
    pub grid: Vec<GridLine>,
    pub points: Vec<Point>,
    pub value_label: Option<ValueLabel>,
    pub hover: Option<HoverOverlay>,
}

impl ChartScene {
    /// Lay out `series` on a canvas of `size`.
    ///
    /// Returns `None` when there is nothing to draw: an empty series or a
    /// canvas too small to hold the plot.
    pub fn build(series: &Series, hover: HoverState, size: Size) -> Option<Self> {
        if series.is_empty() {
            return None;
        }
        let plot = plot_area(size)?;
        let max_val = scale_max(series);
        let n = series.len();

        // A lone sample has no segment to space; park it mid-plot and let the
        // whole plot width count as its snap step.
        let step_x = if n > 1 {
            plot.width / (n - 1) as f32
        } else {
            plot.width
        };
        let to_y = |v: u32| plot.y + plot.height - v as f32 / max_val as f32 * plot.height;
        let points: Vec<Point> = if n > 1 {
            series
                .samples()
                .enumerate()
                .map(|(i, v)| Point::new(plot.x + i as f32 * step_x, to_y(v)))
                .collect()
        } else {
            series
                .samples()
                .map(|v| Point::new(plot.x + plot.width / 2.0, to_y(v)))
                .collect()
        };

        let grid = (0..=GRID_DIVISIONS)
            .map(|i| GridLine {
                y: plot.y + plot.height - i as f32 * plot.height / GRID_DIVISIONS as f32,
                value: (u64::from(max_val) * u64::from(i) / u64::from(GRID_DIVISIONS)) as u32,
            })
            .collect();

        let kind = series.kind();
        let value_label = if kind.is_live() {
            series.latest().map(|v| ValueLabel {
                text: kind.format(v),
                anchor: Point::new(size.width - MARGIN_LEFT, MARGIN_Y),
            })
        } else {
            None
        };

        let hover = hover.position().and_then(|pointer| {
            let index = hit_test(&points, step_x, pointer.x)?;
            let value = series.get(index)?;
            let marker = points[index];
            let text = kind.format(value);
            let bounds = place_tooltip(marker, text_extent(&text, TOOLTIP_FONT_SIZE), size);
            Some(HoverOverlay {
                index,
                value,
                marker,
                tooltip: Tooltip { text, bounds },
            })
        });

        Some(Self {
            size,
            plot,
            max_val,
            step_x,
            grid,
            points,
            value_label,
            hover,
        })
    }

    /// A polyline (and its fill) needs at least two points.
    pub fn has_line(&self) -> bool {
        self.points.len() >= 2
    }
}

/// Plot rectangle inside the margins, if the canvas is large enough.
pub fn plot_area(size: Size) -> Option<Rectangle> {
    let width = size.width - MARGIN_LEFT - MARGIN_RIGHT;
    let height = size.height - 2.0 * MARGIN_Y;
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(Rectangle::new(
        Point::new(MARGIN_LEFT, MARGIN_Y),
        Size::new(width, height),
    ))
}

/// Largest sample, floored at `MIN_SCALE`.
pub fn scale_max(series: &Series) -> u32 {
    series.max().unwrap_or(0).max(MIN_SCALE)
}

/// Linear scan for the x position closest to `pointer_x`. Ties go to the
/// smallest index.
pub fn nearest(xs: impl IntoIterator<Item = f32>, pointer_x: f32) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    for (index, x) in xs.into_iter().enumerate() {
        let distance = (x - pointer_x).abs();
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(Hit { index, distance });
        }
    }
    best
}

/// Index of the hovered sample, or `None` when the pointer is not within
/// snapping distance of any sample.
pub fn hit_test(points: &[Point], step_x: f32, pointer_x: f32) -> Option<usize> {
    let hit = nearest(points.iter().map(|p| p.x), pointer_x)?;
    (hit.distance < step_x / SNAP_DIVISOR).then_some(hit.index)
}

/// Tooltip box for a marker at `marker`: upper right by default, flipped to
/// the left near the right edge and below the marker near the top.
pub fn place_tooltip(marker: Point, text: Size, canvas: Size) -> Rectangle {
    let w = text.width + 2.0 * TOOLTIP_PADDING;
    let h = text.height + 2.0 * TOOLTIP_PADDING;
    let mut x = marker.x + TOOLTIP_OFFSET;
    let mut y = marker.y - TOOLTIP_OFFSET - h;
    if x + w > canvas.width - MARGIN_RIGHT {
        x = marker.x - TOOLTIP_OFFSET - w;
    }
    if y < MARGIN_Y {
        y = marker.y + TOOLTIP_OFFSET;
    }
    Rectangle::new(Point::new(x, y), Size::new(w, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{DisplayKind, MetricKind, RateUnit};

    const CANVAS: Size = Size {
        width: 500.0,
        height: 240.0,
    };

    fn mock(samples: &[u32]) -> Series {
        Series::from_samples("test", DisplayKind::MockIndex, samples.iter().copied())
    }

    #[test]
    fn test_empty_series_builds_nothing() {
        assert!(ChartScene::build(&mock(&[]), HoverState::Idle, CANVAS).is_none());
    }

    #[test]
    fn test_tiny_canvas_builds_nothing() {
        let s = mock(&[1, 2, 3]);
        assert!(ChartScene::build(&s, HoverState::Idle, Size::new(60.0, 200.0)).is_none());
        assert!(ChartScene::build(&s, HoverState::Idle, Size::new(300.0, 40.0)).is_none());
    }

    #[test]
    fn test_scale_floor_for_zero_series() {
        let live = Series::live(MetricKind::Cpu, RateUnit::Mbps);
        assert_eq!(scale_max(&live), MIN_SCALE);
        let scene = ChartScene::build(&live, HoverState::Idle, CANVAS).unwrap();
        assert_eq!(scene.max_val, 100);
        // All-zero samples sit on the plot's bottom edge.
        let bottom = scene.plot.y + scene.plot.height;
        assert!(scene.points.iter().all(|p| (p.y - bottom).abs() < 1e-4));
    }

    #[test]
    fn test_scale_follows_max_above_floor() {
        assert_eq!(scale_max(&mock(&[10, 350, 20])), 350);
    }

    #[test]
    fn test_grid_lines() {
        let scene = ChartScene::build(&mock(&[0, 350]), HoverState::Idle, CANVAS).unwrap();
        let values: Vec<u32> = scene.grid.iter().map(|g| g.value).collect();
        assert_eq!(values, vec![0, 87, 175, 262, 350]);
        assert_eq!(scene.grid[0].y, scene.plot.y + scene.plot.height);
        assert_eq!(scene.grid[4].y, scene.plot.y);
    }

    #[test]
    fn test_points_span_the_plot() {
        let scene = ChartScene::build(&mock(&[0, 50, 100]), HoverState::Idle, CANVAS).unwrap();
        assert_eq!(scene.plot, Rectangle::new(Point::new(40.0, 20.0), Size::new(440.0, 200.0)));
        assert_eq!(scene.step_x, 220.0);
        assert_eq!(scene.points[0], Point::new(40.0, 220.0));
        assert_eq!(scene.points[1], Point::new(260.0, 120.0));
        assert_eq!(scene.points[2], Point::new(480.0, 20.0));
        assert!(scene.has_line());
    }

    #[test]
    fn test_single_sample_is_a_centered_point() {
        let scene = ChartScene::build(&mock(&[50]), HoverState::Idle, CANVAS).unwrap();
        assert_eq!(scene.points, vec![Point::new(260.0, 120.0)]);
        assert!(!scene.has_line());
        assert_eq!(scene.step_x, 440.0);
        let hovered = ChartScene::build(
            &mock(&[50]),
            HoverState::Hovering(Point::new(100.0, 50.0)),
            CANVAS,
        )
        .unwrap();
        assert_eq!(hovered.hover.map(|h| h.index), Some(0));
    }

    #[test]
    fn test_value_label_only_on_live() {
        let mut live = Series::live(MetricKind::Network, RateUnit::Megabytes);
        live.push(12);
        let scene = ChartScene::build(&live, HoverState::Idle, CANVAS).unwrap();
        let label = scene.value_label.unwrap();
        assert_eq!(label.text, "12 MB/s");
        assert_eq!(label.anchor, Point::new(460.0, 20.0));

        let scene = ChartScene::build(&mock(&[1, 2]), HoverState::Idle, CANVAS).unwrap();
        assert!(scene.value_label.is_none());
    }

    #[test]
    fn test_hit_exact_sample() {
        let points: Vec<Point> = (0..24).map(|i| Point::new(40.0 + i as f32 * 10.0, 0.0)).collect();
        for k in [0, 7, 23] {
            let hit = nearest(points.iter().map(|p| p.x), points[k].x).unwrap();
            assert_eq!(hit.index, k);
            assert_eq!(hit.distance, 0.0);
            assert_eq!(hit_test(&points, 10.0, points[k].x), Some(k));
        }
    }

    #[test]
    fn test_hit_tie_goes_to_smaller_index() {
        let hit = nearest([0.0, 10.0, 20.0], 5.0).unwrap();
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn test_hit_outside_tolerance() {
        let points = [Point::new(40.0, 0.0), Point::new(50.0, 0.0)];
        // tolerance is 10 / 1.5 ≈ 6.67
        assert_eq!(hit_test(&points, 10.0, 56.0), Some(1));
        assert_eq!(hit_test(&points, 10.0, 57.0), None);
        assert_eq!(hit_test(&points, 10.0, 0.0), None);
        assert_eq!(hit_test(&[], 10.0, 0.0), None);
    }

    #[test]
    fn test_hover_overlay_in_scene() {
        let s = mock(&[0, 50, 100]);
        let scene = ChartScene::build(&s, HoverState::Hovering(Point::new(250.0, 10.0)), CANVAS).unwrap();
        let overlay = scene.hover.unwrap();
        assert_eq!(overlay.index, 1);
        assert_eq!(overlay.value, 50);
        assert_eq!(overlay.marker, Point::new(260.0, 120.0));
        assert_eq!(overlay.tooltip.text, "50");

        // 150px left of the first sample, beyond the 220 / 1.5 tolerance.
        let far = ChartScene::build(&s, HoverState::Hovering(Point::new(-110.0, 10.0)), CANVAS).unwrap();
        assert!(far.hover.is_none());
    }

    #[test]
    fn test_tooltip_default_upper_right() {
        let text = Size::new(12.0, 10.0);
        let r = place_tooltip(Point::new(100.0, 150.0), text, CANVAS);
        assert_eq!(r, Rectangle::new(Point::new(110.0, 120.0), Size::new(22.0, 20.0)));
    }

    #[test]
    fn test_tooltip_flips_near_edges() {
        let text = Size::new(30.0, 10.0);
        // Near the right edge: flips left.
        let r = place_tooltip(Point::new(470.0, 150.0), text, CANVAS);
        assert_eq!(r.x, 470.0 - 10.0 - 40.0);
        // Near the top: drops below the marker.
        let r = place_tooltip(Point::new(100.0, 25.0), text, CANVAS);
        assert_eq!(r.y, 35.0);
    }

    #[test]
    fn test_tooltip_stays_inside_right_and_top() {
        let text = text_extent("100 Mbps", TOOLTIP_FONT_SIZE);
        let plot = plot_area(CANVAS).unwrap();
        let mut x = plot.x;
        while x <= plot.x + plot.width {
            let mut y = plot.y;
            while y <= plot.y + plot.height {
                let r = place_tooltip(Point::new(x, y), text, CANVAS);
                assert!(r.x + r.width <= CANVAS.width - MARGIN_RIGHT + 1e-3, "right overflow at {x},{y}");
                assert!(r.y >= 0.0, "top overflow at {x},{y}");
                y += 7.0;
            }
            x += 11.0;
        }
    }
}
