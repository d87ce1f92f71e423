use iced::widget::canvas::Cache;
use iced::Size;
use std::collections::HashMap;

use crate::hover::{HoverState, PointerEvent};
use crate::series::MetricKind;

/// Identifies one chart canvas in the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    /// The chart of the city picked in the selector.
    Current,
    /// The n-th pinned city chart.
    Pinned(usize),
    Live(MetricKind),
}

/// What a surface plots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartSource {
    MockSelection,
    FixedCity(String),
    LiveMetric(MetricKind),
}

/// Per-surface view state: hover, last canvas size and the cached geometry.
pub struct ChartSurface {
    pub source: ChartSource,
    pub hover: HoverState,
    pub size: Option<Size>,
    pub cache: Cache,
    repaints: u64,
}

impl ChartSurface {
    pub fn new(source: ChartSource) -> Self {
        Self {
            source,
            hover: HoverState::Idle,
            size: None,
            cache: Cache::new(),
            repaints: 0,
        }
    }

    /// Drop the cached geometry so the next frame repaints. Several requests
    /// before a frame collapse into one redraw.
    pub fn request_repaint(&mut self) {
        self.cache.clear();
        self.repaints += 1;
    }

    pub fn repaint_count(&self) -> u64 {
        self.repaints
    }

    pub fn pointer(&mut self, event: PointerEvent, size: Size) {
        self.size = Some(size);
        self.hover = self.hover.on_event(event);
        self.request_repaint();
    }
}

/// All chart surfaces of the window, keyed by id.
#[derive(Default)]
pub struct Surfaces {
    map: HashMap<SurfaceId, ChartSurface>,
}

impl Surfaces {
    pub fn register(&mut self, id: SurfaceId, source: ChartSource) {
        self.map.insert(id, ChartSurface::new(source));
    }

    pub fn get(&self, id: SurfaceId) -> Option<&ChartSurface> {
        self.map.get(&id)
    }

    /// Route a pointer event; unknown surfaces are logged and skipped.
    pub fn pointer(&mut self, id: SurfaceId, event: PointerEvent, size: Size) {
        match self.map.get_mut(&id) {
            Some(surface) => surface.pointer(event, size),
            None => tracing::warn!(?id, "pointer event for unknown chart surface"),
        }
    }

    /// Returns whether the surface exists.
    pub fn request_repaint(&mut self, id: SurfaceId) -> bool {
        match self.map.get_mut(&id) {
            Some(surface) => {
                surface.request_repaint();
                true
            }
            None => {
                tracing::warn!(?id, "repaint requested for unknown chart surface");
                false
            }
        }
    }

    pub fn repaint_count(&self, id: SurfaceId) -> u64 {
        self.map.get(&id).map_or(0, ChartSurface::repaint_count)
    }

    pub fn total_repaints(&self) -> u64 {
        self.map.values().map(ChartSurface::repaint_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Point;

    const SIZE: Size = Size {
        width: 300.0,
        height: 200.0,
    };

    #[test]
    fn test_pointer_transitions_repaint_only_that_surface() {
        let mut s = Surfaces::default();
        s.register(SurfaceId::Current, ChartSource::MockSelection);
        s.register(SurfaceId::Live(MetricKind::Cpu), ChartSource::LiveMetric(MetricKind::Cpu));

        s.pointer(SurfaceId::Current, PointerEvent::Moved(Point::new(50.0, 60.0)), SIZE);
        s.pointer(SurfaceId::Current, PointerEvent::Moved(Point::new(55.0, 60.0)), SIZE);
        s.pointer(SurfaceId::Current, PointerEvent::Left, SIZE);

        assert_eq!(s.repaint_count(SurfaceId::Current), 3);
        assert_eq!(s.repaint_count(SurfaceId::Live(MetricKind::Cpu)), 0);
        let current = s.get(SurfaceId::Current).unwrap();
        assert_eq!(current.hover, HoverState::Idle);
        assert_eq!(current.size, Some(SIZE));
    }

    #[test]
    fn test_hover_state_is_per_surface() {
        let mut s = Surfaces::default();
        s.register(SurfaceId::Pinned(0), ChartSource::FixedCity("Mumbai".into()));
        s.register(SurfaceId::Pinned(1), ChartSource::FixedCity("New Delhi".into()));
        s.pointer(SurfaceId::Pinned(0), PointerEvent::Moved(Point::new(1.0, 2.0)), SIZE);
        assert!(s.get(SurfaceId::Pinned(0)).unwrap().hover.is_hovering());
        assert!(!s.get(SurfaceId::Pinned(1)).unwrap().hover.is_hovering());
    }

    #[test]
    fn test_unknown_surface_is_skipped() {
        let mut s = Surfaces::default();
        s.pointer(SurfaceId::Pinned(9), PointerEvent::Left, SIZE);
        assert!(!s.request_repaint(SurfaceId::Pinned(9)));
        assert_eq!(s.total_repaints(), 0);
    }
}
