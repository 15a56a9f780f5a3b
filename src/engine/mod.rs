//! Core engine modules for pipeline visualization.

pub mod error;
pub mod fetch;
pub mod menu;
pub mod nav;
pub mod snapshot;
pub mod state;
pub mod steps;
pub mod types;
pub mod view;
