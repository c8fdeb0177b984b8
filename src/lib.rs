//! Change tracking for form controls.
//!
//! A [`ChangeTracker`](tracker::tracker::ChangeTracker) captures the original
//! value of each control under a container the first time it gains focus,
//! records the value it commits, reports which controls differ and can write
//! the originals back. The [`dom`] module provides the in-memory document the
//! tracker runs against; [`script`] replays recorded interactions for testing
//! forms from the command line.

pub mod cli;
pub mod dom;
pub mod report;
pub mod script;
pub mod trace;
pub mod tracker;

pub use dom::{document::Document, event::DomEvent};
pub use tracker::{
    changed::{ChangedElement, ChangedElementCollection},
    error::TrackerError,
    tracker::ChangeTracker,
    value::ControlValue,
};
