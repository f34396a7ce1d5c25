use ratatui::{layout::Rect, Frame};

/// Trait for modules that render content in the hero (main) area.
///
/// Implement this alongside [`workshop_core::module::Module`]. The app wires
/// renderers to modules at registration time via [`std::any::Any`]
/// downcasting, so no rendering types leak into workshop-core.
pub trait HeroRenderer {
    /// Render the hero area of the screen. Called each frame while active.
    fn render_hero(&self, f: &mut Frame, area: Rect);
}
