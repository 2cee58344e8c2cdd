pub mod help_bar;
pub mod weather_display;

use ratatui::{layout::Rect, Frame};

pub use help_bar::{HelpBar, HelpBarProps};
pub use weather_display::{WeatherDisplay, WeatherDisplayProps};

/// A pure UI element that renders from props
///
/// Input never reaches components; keys are mapped by the core
/// `InputDispatcher`. `render` must not touch anything outside the frame.
pub trait Component {
    /// Data required to render the component (read-only)
    type Props<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
