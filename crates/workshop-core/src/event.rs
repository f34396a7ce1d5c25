use std::time::Instant;

/// Events flowing through the [`crate::bus::EventBus`].
#[derive(Debug, Clone)]
pub enum Event {
    /// App heartbeat, published every loop tick interval.
    Tick { now: Instant },
    Key(crossterm::event::KeyEvent),
    Resize { cols: u16, rows: u16 },
    /// The module with this id became the visible view.
    ModuleActivated { id: String },
    /// The module with this id stopped being the visible view.
    ModuleDeactivated { id: String },
    Quit,
}
