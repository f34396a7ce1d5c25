use std::any::Any;

use crate::event::Event;

/// Lines contributed by a module to the HUD panel.
#[derive(Debug, Default)]
pub struct HudContribution {
    /// Lines rendered in the left HUD column (keybindings).
    pub left_lines: Vec<String>,
    /// Lines rendered in the right HUD column (view status).
    pub right_lines: Vec<String>,
}

/// A view hosted by the workshop shell.
///
/// Each module provides a unique [`id`](Module::id) and a human-readable
/// [`title`](Module::title). Modules learn that they became visible or hidden
/// through [`Event::ModuleActivated`] and [`Event::ModuleDeactivated`]; any
/// resources that should only live while the view is shown are acquired and
/// released there.
///
/// Rendering is handled separately via `workshop_ui::renderer::HeroRenderer`.
pub trait Module {
    /// Unique identifier for this module (e.g. `"dashboard"`, `"help"`).
    fn id(&self) -> &'static str;

    /// Display name shown in the top bar.
    fn title(&self) -> &'static str;

    /// Handle an incoming event. Called by the registry during broadcast.
    fn handle_event(&mut self, _ev: &Event) {}

    /// Return lines to display in the HUD panel while this module is active.
    fn hud(&self) -> HudContribution {
        HudContribution::default()
    }

    /// Return `self` as `&dyn Any` so the app can downcast for rendering.
    fn as_any(&self) -> &dyn Any;
}
