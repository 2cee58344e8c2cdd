//! Weather display component
//!
//! Layout, top to bottom inside a bordered block titled "Weather":
//! - the display text, wrapped and centered both ways
//! - the status hint on the last row

use badge_weather_core::TITLE;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Text,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{Component, HelpBar, HelpBarProps};

/// Props for WeatherDisplay - the text to show
pub struct WeatherDisplayProps<'a> {
    pub text: &'a str,
}

#[derive(Default)]
pub struct WeatherDisplay;

impl Component for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let outer_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" {TITLE} "))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);

        let inner = outer_block.inner(area);
        frame.render_widget(outer_block, area);

        let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

        let body = Paragraph::new(Text::raw(props.text))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        let area = chunks[0];
        let pad = area.height.saturating_sub(wrapped_height(props.text, area.width)) / 2;
        let text_area = Rect {
            y: area.y + pad,
            height: area.height - pad,
            ..area
        };
        frame.render_widget(body, text_area);

        let mut help = HelpBar;
        help.render(frame, chunks[1], HelpBarProps);
    }
}

/// Rows the text needs at this width, counting wrapped lines
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = text
        .lines()
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(width: u16, height: u16, text: &str) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal
            .draw(|frame| {
                WeatherDisplay.render(frame, frame.area(), WeatherDisplayProps { text });
            })
            .expect("draw");

        let buffer = terminal.backend().buffer();
        let mut output = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                output.push_str(buffer[(x, y)].symbol());
            }
            output.push('\n');
        }
        output
    }

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height("Boston\n\nSunny", 20), 3);
        assert_eq!(wrapped_height("abcdefghij", 4), 3);
        assert_eq!(wrapped_height("", 10), 0);
    }

    #[test]
    fn test_render_title_and_hint() {
        let output = render(40, 12, "Fetching weather...");

        assert!(output.contains(" Weather "));
        assert!(output.contains("Fetching weather..."));
        assert!(output.contains("R: Refresh | ESC: Exit"));
    }

    #[test]
    fn test_render_multiline_text() {
        let output = render(40, 12, "Boston\n\nSunny +20°C");

        let boston = output.lines().position(|line| line.contains("Boston"));
        let sunny = output.lines().position(|line| line.contains("Sunny +20°C"));
        assert_eq!(sunny.zip(boston).map(|(s, b)| s - b), Some(2));
    }

    #[test]
    fn test_render_wraps_long_text() {
        let output = render(20, 12, "Failed to fetch weather for Boston");

        assert!(output.contains("Failed to fetch"));
        assert!(output.contains("Boston"));
    }
}
