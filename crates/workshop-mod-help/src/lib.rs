use std::any::Any;

use ratatui::{
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use workshop_config::WorkshopConfig;
use workshop_core::module::{HudContribution, Module};
use workshop_ui::renderer::HeroRenderer;

/// Keybindings and active settings.
///
/// Switching here hides the dashboard, which stops its clock until the
/// dashboard is shown again.
pub struct HelpModule {
    endpoint: String,
    clock_interval_ms: u64,
    timeout: String,
}

impl HelpModule {
    pub fn new(config: &WorkshopConfig) -> Self {
        Self {
            endpoint: config.joke.endpoint.clone(),
            clock_interval_ms: config.clock.interval_ms,
            timeout: match config.joke.timeout_secs {
                Some(secs) => format!("{secs}s"),
                None => "none".to_string(),
            },
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        vec![
            Line::from("Keys"),
            Line::from("  j / Enter / Space   fetch a new joke (dashboard)"),
            Line::from("  Tab / Shift-Tab     switch view"),
            Line::from("  q                   quit"),
            Line::from(""),
            Line::from("Settings"),
            Line::from(format!("  joke endpoint       {}", self.endpoint)),
            Line::from(format!("  request timeout     {}", self.timeout)),
            Line::from(format!("  clock interval      {}ms", self.clock_interval_ms)),
        ]
    }
}

impl Module for HelpModule {
    fn id(&self) -> &'static str {
        "help"
    }

    fn title(&self) -> &'static str {
        "Help"
    }

    fn hud(&self) -> HudContribution {
        HudContribution {
            left_lines: vec!["Tab: next view".into(), "q: quit".into()],
            right_lines: vec!["CLOCK: paused".into()],
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl HeroRenderer for HelpModule {
    fn render_hero(&self, f: &mut Frame, area: Rect) {
        let p = Paragraph::new(self.lines())
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("HELP"));

        f.render_widget(p, area);
    }
}
