use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::layout::ScreenRects;

pub struct ShellView<'a> {
    pub module_title: &'a str,
    pub status_line: &'a str,
    pub hud_left: Vec<String>,
    pub hud_log: Vec<String>,
    pub hud_right: Vec<String>,
}

pub fn render_shell(
    f: &mut Frame,
    rects: ScreenRects,
    view: ShellView<'_>,
    hero: impl FnOnce(&mut Frame, Rect),
) {
    let top = Paragraph::new(Line::from(format!(
        "WORKSHOP | {} | {}",
        view.module_title, view.status_line
    )))
    .style(Style::default())
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(top, rects.top);

    hero(f, rects.hero);

    let left_text = Text::from(view.hud_left.into_iter().map(Line::from).collect::<Vec<_>>());
    let left = Paragraph::new(left_text).block(Block::default().borders(Borders::ALL).title("KEYS"));
    f.render_widget(left, rects.hud_left);

    // Show the newest lines that fit inside the border.
    let visible = rects.hud_log.height.saturating_sub(2) as usize;
    let skip = view.hud_log.len().saturating_sub(visible);
    let log_text = Text::from(
        view.hud_log
            .into_iter()
            .skip(skip)
            .map(Line::from)
            .collect::<Vec<_>>(),
    );
    let log = Paragraph::new(log_text)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("LOG"));
    f.render_widget(log, rects.hud_log);

    let right_text = Text::from(view.hud_right.into_iter().map(Line::from).collect::<Vec<_>>());
    let right =
        Paragraph::new(right_text).block(Block::default().borders(Borders::ALL).title("STATUS"));
    f.render_widget(right, rects.hud_right);
}
