//! Derived display status for pipeline runs, tasks and steps.
//!
//! The entry points are [`engine::state::resolve`] (what a task shows
//! inside its pipeline run) and [`engine::steps::aggregate`] (what each of
//! its steps shows). [`engine::view::TaskNodeView`] combines both for a
//! renderer.

pub mod engine;
