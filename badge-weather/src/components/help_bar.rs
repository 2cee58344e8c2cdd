use badge_weather_core::STATUS_HINT;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::Component;

pub struct HelpBar;

pub struct HelpBarProps;

impl Component for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, _props: Self::Props<'_>) {
        let help = Line::styled(STATUS_HINT, Style::default().fg(Color::DarkGray)).centered();
        frame.render_widget(Paragraph::new(help), area);
    }
}
