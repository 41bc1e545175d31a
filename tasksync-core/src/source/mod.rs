//! Task source adapters.
//!
//! Each adapter produces source-agnostic `Task` records; the reconciler does
//! not care which one supplied them. Adapter failures are fatal for the run:
//! a partial task list must never reach reconciliation.

pub mod orgmode;
pub mod taskwarrior;
