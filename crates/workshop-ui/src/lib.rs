//! TUI rendering layer for the workshop dashboard.
//!
//! Provides the screen layout, shell chrome, and the hero renderer trait.
//! All rendering uses [`ratatui`]; this crate owns the visual presentation
//! while [`workshop_core`] owns the state.

pub mod layout;
pub mod renderer;
pub mod shell;
