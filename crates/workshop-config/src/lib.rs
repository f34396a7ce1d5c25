//! Configuration types and loaders for the workshop dashboard.
//!
//! This crate owns the on-disk settings schema so the app and its views
//! share a single source of truth.

pub mod settings;

pub use settings::{
    config_path, ClockSettings, JokeSettings, LogSettings, WorkshopConfig,
    DEFAULT_FAILURE_MESSAGE, DEFAULT_JOKE_ENDPOINT,
};
