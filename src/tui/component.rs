use ratatui::layout::Rect;

/// A window drawn into its own screen region.
///
/// Components follow a props pattern:
/// - They receive the data to show via `refresh` props, never by reaching
///   into global state.
/// - They may hold presentation state (cursor rows, scroll starts).
/// - They own a `Region` and draw only inside it.
///
/// `refresh` erases the region, writes the content and flushes, in that
/// order.
pub trait Component {
    /// What the component needs to draw itself.
    type Props<'a>;

    /// Move the component to `area`. A zero-sized area hides it.
    fn resize(&mut self, area: Rect);

    fn refresh(&mut self, props: Self::Props<'_>);
}

/// A component that handles terminal events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
