use std::collections::HashMap;

use anyhow::{bail, Result};

use crate::event::Event;
use crate::module::Module;

/// Owns every registered view and tracks which one is visible.
///
/// Switching views returns the lifecycle events (`ModuleDeactivated` for the
/// old view, `ModuleActivated` for the new one) instead of delivering them
/// directly; the caller publishes them on the bus so modules see them in
/// order with everything else.
pub struct ModuleRegistry {
    modules: Vec<Box<dyn Module>>,
    active_idx: Option<usize>,
    index: HashMap<String, usize>,
    started: bool,
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
            active_idx: None,
            index: HashMap::new(),
            started: false,
        }
    }

    pub fn register(&mut self, module: Box<dyn Module>) -> Result<()> {
        let id = module.id().to_string();
        if self.index.contains_key(&id) {
            bail!("duplicate module id: {}", id);
        }
        let idx = self.modules.len();
        self.index.insert(id, idx);
        self.modules.push(module);
        if self.active_idx.is_none() {
            self.active_idx = Some(0);
        }
        Ok(())
    }

    /// Emit the activation event for the initially selected module.
    ///
    /// Returns nothing if the registry is empty or already started.
    pub fn start(&mut self) -> Vec<Event> {
        if self.started {
            return Vec::new();
        }
        match self.active_idx {
            Some(i) => {
                self.started = true;
                vec![Event::ModuleActivated {
                    id: self.modules[i].id().to_string(),
                }]
            }
            None => Vec::new(),
        }
    }

    /// Activate a module by ID. Returns lifecycle events (deactivated old, activated new).
    ///
    /// Activating the module that is already visible is a no-op.
    pub fn activate(&mut self, id: &str) -> Result<Vec<Event>> {
        let Some(to) = self.index.get(id).copied() else {
            bail!("unknown module id: {}", id);
        };
        match self.active_idx {
            Some(from) if self.started => Ok(self.switch_to(from, to)),
            _ => {
                self.active_idx = Some(to);
                self.started = true;
                Ok(vec![Event::ModuleActivated { id: id.to_string() }])
            }
        }
    }

    pub fn active(&self) -> Option<&dyn Module> {
        self.active_idx.map(|i| &*self.modules[i])
    }

    pub fn active_mut(&mut self) -> Option<&mut (dyn Module + 'static)> {
        self.active_idx.map(|i| &mut *self.modules[i])
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_idx.map(|i| self.modules[i].id())
    }

    pub fn cycle_next(&mut self) -> Vec<Event> {
        if self.modules.is_empty() {
            return Vec::new();
        }
        let cur = self.active_idx.unwrap_or(0);
        let next = (cur + 1) % self.modules.len();
        self.switch_to(cur, next)
    }

    pub fn cycle_prev(&mut self) -> Vec<Event> {
        if self.modules.is_empty() {
            return Vec::new();
        }
        let cur = self.active_idx.unwrap_or(0);
        let next = if cur == 0 {
            self.modules.len() - 1
        } else {
            cur - 1
        };
        self.switch_to(cur, next)
    }

    fn switch_to(&mut self, from: usize, to: usize) -> Vec<Event> {
        self.active_idx = Some(to);
        if from == to && self.started {
            return Vec::new();
        }
        let mut events = Vec::new();
        if from != to && self.started {
            events.push(Event::ModuleDeactivated {
                id: self.modules[from].id().to_string(),
            });
        }
        self.started = true;
        events.push(Event::ModuleActivated {
            id: self.modules[to].id().to_string(),
        });
        events
    }

    /// Deactivate the visible module and deliver the event immediately.
    ///
    /// Called on every exit path of the app loop so views release their
    /// resources before the process tears down the terminal.
    pub fn shutdown(&mut self) {
        if !self.started {
            return;
        }
        self.started = false;
        if let Some(id) = self.active_id().map(str::to_string) {
            self.broadcast(&Event::ModuleDeactivated { id });
        }
    }

    pub fn list(&self) -> Vec<(&str, &str)> {
        self.modules.iter().map(|m| (m.id(), m.title())).collect()
    }

    pub fn get(&self, id: &str) -> Option<&dyn Module> {
        self.index.get(id).map(|&i| &*self.modules[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut (dyn Module + 'static)> {
        self.index.get(id).copied().map(|i| &mut *self.modules[i])
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Broadcast an event to modules.
    /// Tick and Resize go to all modules; Key goes to active only.
    /// Lifecycle events go to the relevant module.
    pub fn broadcast(&mut self, event: &Event) {
        match event {
            Event::Key(_) => {
                if let Some(m) = self.active_mut() {
                    m.handle_event(event);
                }
            }
            Event::ModuleActivated { id } | Event::ModuleDeactivated { id } => {
                if let Some(m) = self.get_mut(id) {
                    m.handle_event(event);
                }
            }
            Event::Tick { .. } | Event::Resize { .. } | Event::Quit => {
                for m in &mut self.modules {
                    m.handle_event(event);
                }
            }
        }
    }
}
