//! The workshop dashboard: a live clock and an on-demand programming joke.
//!
//! [`DashboardModule`] is the registry-facing shell. The live state lives in
//! a [`view::DashboardView`] that exists only between the module's
//! activation and deactivation events.

pub mod clock;
pub mod fetcher;
pub mod joke;
pub mod render;
#[cfg(test)]
mod test_support;
pub mod view;

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};

use workshop_config::WorkshopConfig;
use workshop_core::{
    event::Event,
    module::{HudContribution, Module},
};
use workshop_ui::renderer::HeroRenderer;

use crate::clock::TimeSource;
use crate::joke::JokeSource;
use crate::render::{render_hero_content, HeroContent};
use crate::view::DashboardView;

pub const MODULE_ID: &str = "dashboard";

pub struct DashboardModule {
    config: WorkshopConfig,
    source: Arc<dyn JokeSource>,
    time: Arc<dyn TimeSource>,
    view: Option<DashboardView>,
}

impl DashboardModule {
    pub fn new(
        config: WorkshopConfig,
        source: Arc<dyn JokeSource>,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            config,
            source,
            time,
            view: None,
        }
    }

    /// The live view, if the dashboard is currently shown.
    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    fn activate(&mut self, now: Instant) {
        if self.view.is_some() {
            return;
        }
        tracing::info!(endpoint = %self.config.joke.endpoint, "dashboard activated");
        self.view = Some(DashboardView::activate(
            &self.config,
            Arc::clone(&self.source),
            Arc::clone(&self.time),
            now,
        ));
    }

    fn deactivate(&mut self) {
        if self.view.take().is_some() {
            tracing::info!("dashboard deactivated");
        }
    }
}

impl Module for DashboardModule {
    fn id(&self) -> &'static str {
        MODULE_ID
    }

    fn title(&self) -> &'static str {
        "Dashboard"
    }

    fn handle_event(&mut self, ev: &Event) {
        match ev {
            Event::ModuleActivated { id } if id == MODULE_ID => self.activate(Instant::now()),
            Event::ModuleDeactivated { id } if id == MODULE_ID => self.deactivate(),
            Event::Tick { now } => {
                if let Some(view) = self.view.as_mut() {
                    view.tick(*now);
                }
            }
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                let Some(view) = self.view.as_mut() else {
                    return;
                };
                if matches!(
                    key.code,
                    KeyCode::Char('j') | KeyCode::Char(' ') | KeyCode::Enter
                ) {
                    let ticket = view.request_joke();
                    tracing::info!(ticket, "new joke requested");
                }
            }
            _ => {}
        }
    }

    fn hud(&self) -> HudContribution {
        let right_lines = match &self.view {
            Some(view) => vec![
                format!(
                    "CLOCK: {}",
                    if view.clock_running() { "running" } else { "stopped" }
                ),
                format!("JOKE: {}", view.joke().label()),
                format!("IN FLIGHT: {}", view.pending_fetches()),
                format!("RESOLVED: {}", view.fetches_resolved()),
            ],
            None => vec!["CLOCK: stopped".into()],
        };
        HudContribution {
            left_lines: vec![
                "j/Enter: new joke".into(),
                "Tab: next view".into(),
                "q: quit".into(),
            ],
            right_lines,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl HeroRenderer for DashboardModule {
    fn render_hero(&self, f: &mut Frame, area: Rect) {
        match &self.view {
            Some(view) => render_hero_content(
                f,
                area,
                &HeroContent {
                    clock: view.clock_text(),
                    joke: view.joke(),
                    fetching: view.pending_fetches() > 0,
                },
            ),
            None => f.render_widget(Paragraph::new("Dashboard inactive"), area),
        }
    }
}
