use std::any::Any;
use std::collections::HashMap;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};

use workshop_config::WorkshopConfig;
use workshop_core::{
    bus::EventBus,
    event::Event,
    logging::{self, LogBuffer, LogEntry},
    module::Module,
    registry::ModuleRegistry,
    state::AppState,
};
use workshop_ui::{
    layout::screen_layout,
    renderer::HeroRenderer,
    shell::{render_shell, ShellView},
};

use workshop_mod_dashboard::{clock::SystemTime, joke::HttpJokeSource, DashboardModule};
use workshop_mod_help::HelpModule;

/// A type-erased render function that downcasts a module via `Any` and draws
/// its hero area.
type RenderFn = Box<dyn Fn(&dyn Any, &mut Frame, Rect)>;

const HUD_HEIGHT: u16 = 7;

struct App {
    state: AppState,
    registry: ModuleRegistry,
    bus: EventBus,
    log_buffer: LogBuffer,
    render_map: HashMap<String, RenderFn>,
}

/// Register a module that also implements `HeroRenderer`.
///
/// Inserts the module into the registry and captures a type-aware render
/// closure in `render_map` so the app can call `render_hero` without
/// knowing the concrete module type.
fn register_module<M: Module + HeroRenderer + 'static>(
    registry: &mut ModuleRegistry,
    render_map: &mut HashMap<String, RenderFn>,
    module: M,
) -> Result<()> {
    let id = module.id().to_string();
    render_map.insert(
        id,
        Box::new(|any, f, area| {
            if let Some(m) = any.downcast_ref::<M>() {
                m.render_hero(f, area);
            }
        }),
    );
    registry.register(Box::new(module))
}

impl App {
    fn new(config: &WorkshopConfig, log_buffer: LogBuffer) -> Result<Self> {
        let source = HttpJokeSource::new(config.joke.endpoint.clone(), config.joke.timeout())
            .context("failed to build HTTP client for the joke endpoint")?;

        let mut registry = ModuleRegistry::new();
        let mut render_map: HashMap<String, RenderFn> = HashMap::new();
        register_module(
            &mut registry,
            &mut render_map,
            DashboardModule::new(config.clone(), Arc::new(source), Arc::new(SystemTime)),
        )?;
        register_module(&mut registry, &mut render_map, HelpModule::new(config))?;

        let mut app = Self {
            state: AppState::new(),
            registry,
            bus: EventBus::new(),
            log_buffer,
            render_map,
        };
        let lifecycle = app.registry.start();
        app.bus.publish_all(lifecycle);
        Ok(app)
    }

    fn switch_view(&mut self, lifecycle: Vec<Event>) {
        self.bus.publish_all(lifecycle);
        if let Some(m) = self.registry.active() {
            self.state.status_line = format!("VIEW: {}", m.title());
            tracing::info!(view = m.id(), "switched view");
        }
    }

    /// Deactivate the visible view so it releases its timer.
    fn shutdown(&mut self) {
        self.registry.shutdown();
        tracing::info!(
            uptime_secs = self.state.uptime().as_secs(),
            "workshop shutting down"
        );
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<()> {
    let config = WorkshopConfig::load().context("failed to load workshop configuration")?;
    let log_buffer = logging::init(&config.log.level);
    tracing::info!("workshop starting up");

    let mut app = App::new(&config, log_buffer)?;
    let mut terminal = setup_terminal()?;
    let res = run(&mut terminal, &mut app);
    app.shutdown();
    restore_terminal(terminal)?;
    if let Err(err) = &res {
        tracing::error!(error = %err, "workshop exited with error");
    }
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let tick_interval = Duration::from_millis(100);
    let poll_timeout = Duration::from_millis(16);
    let mut last_tick = Instant::now();

    loop {
        // ── Render ──
        terminal.draw(|f| {
            let rects = screen_layout(f.area(), HUD_HEIGHT);

            if let Some(m) = app.registry.active() {
                let hud = m.hud();
                let view = ShellView {
                    module_title: m.title(),
                    status_line: &app.state.status_line,
                    hud_left: hud.left_lines,
                    hud_log: app
                        .log_buffer
                        .recent()
                        .iter()
                        .map(LogEntry::hud_line)
                        .collect(),
                    hud_right: hud.right_lines,
                };

                let render_map = &app.render_map;
                render_shell(f, rects, view, |f, hero_area| {
                    if let Some(render_fn) = render_map.get(m.id()) {
                        render_fn(m.as_any(), f, hero_area);
                    }
                });
            }
        })?;

        // ── Poll → Publish ──
        if event::poll(poll_timeout)? {
            match event::read()? {
                CEvent::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                    KeyCode::Char('q') => app.bus.publish(Event::Quit),
                    KeyCode::Tab => {
                        let lifecycle = app.registry.cycle_next();
                        app.switch_view(lifecycle);
                    }
                    KeyCode::BackTab => {
                        let lifecycle = app.registry.cycle_prev();
                        app.switch_view(lifecycle);
                    }
                    _ => app.bus.publish(Event::Key(key)),
                },
                CEvent::Resize(cols, rows) => {
                    app.bus.publish(Event::Resize { cols, rows });
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_interval {
            last_tick = Instant::now();
            app.bus.publish(Event::Tick { now: last_tick });
        }

        // ── Drain → Broadcast ──
        let events = app.bus.drain();
        for ev in &events {
            if matches!(ev, Event::Quit) {
                return Ok(());
            }
            app.registry.broadcast(ev);
        }
    }
}
