use iced::Point;

/// Pointer presence over one chart surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    /// Last known pointer position, canvas-relative.
    Hovering(Point),
}

impl HoverState {
    pub fn position(&self) -> Option<Point> {
        match self {
            HoverState::Idle => None,
            HoverState::Hovering(p) => Some(*p),
        }
    }

    pub fn is_hovering(&self) -> bool {
        matches!(self, HoverState::Hovering(_))
    }

    /// Next state after `event`. Every move lands in `Hovering`, there is no
    /// debouncing.
    pub fn on_event(self, event: PointerEvent) -> Self {
        match event {
            PointerEvent::Moved(p) => HoverState::Hovering(p),
            PointerEvent::Left => HoverState::Idle,
        }
    }
}

/// Pointer input forwarded from a chart canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Moved(Point),
    Left,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_enters_hovering() {
        let s = HoverState::Idle.on_event(PointerEvent::Moved(Point::new(3.0, 4.0)));
        assert_eq!(s, HoverState::Hovering(Point::new(3.0, 4.0)));
        assert_eq!(s.position(), Some(Point::new(3.0, 4.0)));
    }

    #[test]
    fn test_every_move_updates_position() {
        let s = HoverState::Hovering(Point::new(1.0, 1.0))
            .on_event(PointerEvent::Moved(Point::new(2.0, 1.0)))
            .on_event(PointerEvent::Moved(Point::new(9.0, 5.0)));
        assert_eq!(s.position(), Some(Point::new(9.0, 5.0)));
    }

    #[test]
    fn test_leave_returns_to_idle() {
        let s = HoverState::Hovering(Point::ORIGIN).on_event(PointerEvent::Left);
        assert_eq!(s, HoverState::Idle);
        assert!(!s.is_hovering());
        assert_eq!(HoverState::Idle.on_event(PointerEvent::Left), HoverState::Idle);
    }
}
