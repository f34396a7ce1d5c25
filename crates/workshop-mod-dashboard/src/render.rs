//! Hero-pane rendering for the dashboard.
//!
//! Draws the heading, the clock section, the joke section, and the
//! "Get New Joke" control. Sections collapse to single lines when the
//! terminal is short.
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::joke::JokeState;

pub const HEADING: &str = "🚀 Build Tools Workshop";
pub const WELCOME: &str = "Welcome to learning about build tools!";
pub const TIME_TITLE: &str = "Current Time";
pub const JOKE_TITLE: &str = "Programming Joke of the Moment";
pub const BUTTON_LABEL: &str = "[ Get New Joke ]";

/// What the hero pane needs to draw one frame.
pub struct HeroContent<'a> {
    pub clock: &'a str,
    pub joke: &'a JokeState,
    pub fetching: bool,
}

fn joke_style(joke: &JokeState) -> Style {
    match joke {
        JokeState::Loading => Style::default().fg(Color::DarkGray),
        JokeState::Loaded(_) => Style::default(),
        JokeState::Failed(_) => Style::default().fg(Color::Red),
    }
}

/// Render the dashboard hero pane into the given area.
pub fn render_hero_content(f: &mut Frame, area: Rect, content: &HeroContent<'_>) {
    let block = Block::default().borders(Borders::ALL).title("DASHBOARD");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if inner.height < 10 {
        render_compact(f, inner, content);
    } else {
        render_full(f, inner, content);
    }
}

/// One line per item, no section borders.
fn render_compact(f: &mut Frame, area: Rect, content: &HeroContent<'_>) {
    let lines = vec![
        Line::from(Span::styled(
            HEADING,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{TIME_TITLE}: {}", content.clock)),
        Line::from(Span::styled(
            content.joke.text().to_string(),
            joke_style(content.joke),
        )),
        button_line(content.fetching),
    ];
    let p = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn render_full(f: &mut Frame, area: Rect, content: &HeroContent<'_>) {
    let rows = Layout::vertical([
        Constraint::Length(3), // heading + welcome
        Constraint::Length(3), // time
        Constraint::Min(3),    // joke
        Constraint::Length(1), // button
    ])
    .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            HEADING,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(WELCOME),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, rows[0]);

    let time = Paragraph::new(Line::from(content.clock))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(TIME_TITLE));
    f.render_widget(time, rows[1]);

    let joke = Paragraph::new(Line::from(Span::styled(
        content.joke.text().to_string(),
        joke_style(content.joke),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title(JOKE_TITLE));
    f.render_widget(joke, rows[2]);

    f.render_widget(
        Paragraph::new(button_line(content.fetching)).alignment(Alignment::Center),
        rows[3],
    );
}

fn button_line(fetching: bool) -> Line<'static> {
    let mut spans = vec![Span::styled(
        BUTTON_LABEL,
        Style::default().fg(Color::Black).bg(Color::Cyan),
    )];
    if fetching {
        spans.push(Span::raw(" fetching..."));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn buffer_text(buffer: &Buffer) -> String {
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(width: u16, height: u16, content: &HeroContent<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| render_hero_content(f, f.area(), content))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn full_layout_shows_every_section() {
        let joke = JokeState::Loaded("Why did X - Because Y".into());
        let text = draw(
            80,
            20,
            &HeroContent {
                clock: "October 16th 2026, 3:04:05 pm",
                joke: &joke,
                fetching: false,
            },
        );
        assert!(text.contains(WELCOME));
        assert!(text.contains(TIME_TITLE));
        assert!(text.contains("October 16th 2026, 3:04:05 pm"));
        assert!(text.contains(JOKE_TITLE));
        assert!(text.contains("Why did X - Because Y"));
        assert!(text.contains(BUTTON_LABEL));
        assert!(!text.contains("fetching..."));
    }

    #[test]
    fn compact_layout_keeps_clock_and_joke() {
        let joke = JokeState::Loading;
        let text = draw(
            80,
            7,
            &HeroContent {
                clock: "12:00:00",
                joke: &joke,
                fetching: true,
            },
        );
        assert!(text.contains("Current Time: 12:00:00"));
        assert!(text.contains("Loading..."));
        assert!(text.contains("fetching..."));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let joke = JokeState::Failed("nope".into());
        draw(
            2,
            2,
            &HeroContent {
                clock: "",
                joke: &joke,
                fetching: false,
            },
        );
    }
}
