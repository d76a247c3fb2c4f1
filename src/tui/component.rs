use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the page that draws itself.
///
/// Components are built each frame from props (borrowed core state plus the
/// palette) and may hold `&mut` persistent state for caches and selection.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Persistent component state that reacts to terminal events.
pub trait EventHandler {
    /// The high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
