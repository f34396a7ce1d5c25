//! Core infrastructure for the workshop dashboard.
//!
//! This crate provides the building blocks shared by the application shell
//! and all views: an event bus, the module trait and registry, app state, and
//! the logging subsystem.

pub mod bus;
pub mod event;
pub mod logging;
pub mod module;
pub mod registry;
pub mod state;
