use iced::alignment::{Horizontal, Vertical};
use iced::mouse;
use iced::widget::canvas::{self, Event, Frame, Geometry, LineDash, Path, Stroke, Text};
use iced::{Color, Point, Rectangle, Renderer, Theme};

use crate::hover::PointerEvent;
use crate::scene::{self, ChartScene, HoverOverlay};
use crate::series::Series;
use crate::surface::{ChartSurface, SurfaceId};
use crate::theme::{with_alpha, Palette};
use crate::ui::Message;
use crate::{UI_FONT_BOLD, UI_FONT_MONO};

/// Colors the chart needs from the active palette.
#[derive(Debug, Clone, Copy)]
pub struct ChartColors {
    pub bg: Color,
    pub grid: Color,
    pub label: Color,
    pub line: Color,
    pub value: Color,
    pub guide: Color,
    pub marker: Color,
    pub tooltip_bg: Color,
    pub tooltip_text: Color,
}

impl From<&Palette> for ChartColors {
    fn from(p: &Palette) -> Self {
        Self {
            bg: p.chart_bg,
            grid: p.grid,
            label: p.axis_label,
            line: p.line,
            value: p.value_label,
            guide: p.guide,
            marker: p.marker_fill,
            tooltip_bg: p.tooltip_bg,
            tooltip_text: p.tooltip_text,
        }
    }
}

/// A single-series line chart drawn via iced Canvas. Hover state lives on the
/// surface; pointer input is forwarded as `Message::Pointer`.
pub struct LineChart<'a> {
    pub id: SurfaceId,
    pub series: Option<&'a Series>,
    pub surface: &'a ChartSurface,
    pub colors: ChartColors,
}

impl canvas::Program<Message> for LineChart<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        let hovering = self.surface.hover.is_hovering();
        let pointer = match event {
            Event::Mouse(mouse::Event::CursorMoved { .. }) => match cursor.position_in(bounds) {
                Some(pos) => Some(PointerEvent::Moved(pos)),
                None if hovering => Some(PointerEvent::Left),
                None => None,
            },
            Event::Mouse(mouse::Event::CursorLeft) if hovering => Some(PointerEvent::Left),
            _ => None,
        };
        (
            canvas::event::Status::Ignored,
            pointer.map(|e| Message::Pointer(self.id, e, bounds.size())),
        )
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let Some(series) = self.series else {
            return Vec::new();
        };
        let Some(scene) = ChartScene::build(series, self.surface.hover, bounds.size()) else {
            return Vec::new();
        };
        let geometry = self
            .surface
            .cache
            .draw(renderer, bounds.size(), |frame| paint(frame, &scene, &self.colors));
        vec![geometry]
    }
}

/// Paint a laid-out scene. Reads the scene only.
pub fn paint(frame: &mut Frame, scene: &ChartScene, c: &ChartColors) {
    let plot = scene.plot;
    let bottom = plot.y + plot.height;

    frame.fill(&Path::rectangle(Point::ORIGIN, scene.size), c.bg);

    // Grid + y labels
    for line in &scene.grid {
        let grid = Path::line(Point::new(plot.x, line.y), Point::new(plot.x + plot.width, line.y));
        frame.stroke(&grid, Stroke::default().with_color(c.grid).with_width(1.0));

        let mut label = Text::from(line.value.to_string());
        label.position = Point::new(plot.x - 5.0, line.y);
        label.color = c.label;
        label.size = scene::AXIS_FONT_SIZE.into();
        label.font = UI_FONT_MONO;
        label.horizontal_alignment = Horizontal::Right;
        label.vertical_alignment = Vertical::Center;
        frame.fill_text(label);
    }

    if scene.has_line() {
        // Area under the line, fading out towards the bottom
        let mut builder = canvas::path::Builder::new();
        builder.move_to(Point::new(plot.x, bottom));
        for p in &scene.points {
            builder.line_to(*p);
        }
        builder.line_to(Point::new(plot.x + plot.width, bottom));
        builder.close();
        let gradient = canvas::gradient::Linear::new(Point::new(0.0, plot.y), Point::new(0.0, bottom))
            .add_stop(0.0, with_alpha(c.line, 0.4))
            .add_stop(1.0, with_alpha(c.line, 0.0));
        frame.fill(
            &builder.build(),
            canvas::Fill {
                style: canvas::Style::Gradient(gradient.into()),
                ..canvas::Fill::default()
            },
        );

        let mut builder = canvas::path::Builder::new();
        for (i, p) in scene.points.iter().enumerate() {
            if i == 0 {
                builder.move_to(*p);
            } else {
                builder.line_to(*p);
            }
        }
        frame.stroke(&builder.build(), Stroke::default().with_color(c.line).with_width(3.0));
    } else if let Some(p) = scene.points.first() {
        frame.fill(&Path::circle(*p, 3.0), c.line);
    }

    if let Some(value) = &scene.value_label {
        let mut text = Text::from(value.text.clone());
        text.position = value.anchor;
        text.color = c.value;
        text.size = scene::VALUE_FONT_SIZE.into();
        text.font = UI_FONT_BOLD;
        text.horizontal_alignment = Horizontal::Right;
        text.vertical_alignment = Vertical::Top;
        frame.fill_text(text);
    }

    if let Some(hover) = &scene.hover {
        paint_hover(frame, scene, hover, c);
    }
}

fn paint_hover(frame: &mut Frame, scene: &ChartScene, hover: &HoverOverlay, c: &ChartColors) {
    let plot = scene.plot;
    let x = hover.marker.x;

    let guide = Path::line(Point::new(x, plot.y), Point::new(x, plot.y + plot.height));
    frame.stroke(
        &guide,
        Stroke {
            line_dash: LineDash {
                segments: &[4.0, 4.0],
                offset: 0,
            },
            ..Stroke::default().with_color(c.guide).with_width(1.0)
        },
    );

    let marker = Path::circle(hover.marker, scene::MARKER_RADIUS);
    frame.fill(&marker, c.marker);
    frame.stroke(&marker, Stroke::default().with_color(c.line).with_width(2.0));

    let bounds = hover.tooltip.bounds;
    frame.fill(&Path::rectangle(bounds.position(), bounds.size()), c.tooltip_bg);

    let mut text = Text::from(hover.tooltip.text.clone());
    text.position = Point::new(
        bounds.x + scene::TOOLTIP_PADDING,
        bounds.y + scene::TOOLTIP_PADDING,
    );
    text.color = c.tooltip_text;
    text.size = scene::TOOLTIP_FONT_SIZE.into();
    text.font = UI_FONT_MONO;
    frame.fill_text(text);
}
