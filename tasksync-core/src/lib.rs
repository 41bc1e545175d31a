//! Core types and reconciliation logic for tasksync.
//!
//! This crate is provider-agnostic. It defines:
//! - the `Task` model and the adapters that produce it (`source`)
//! - the provider-neutral `CalendarEvent` and the task→event conversion
//!   (`convert`), including the identity token embedded in event descriptions
//! - the per-task reconciliation decisions and apply path (`reconcile`)
//! - the `RemoteCalendar` trait that calendar backends implement (`remote`)

pub mod convert;
pub mod date_range;
pub mod error;
pub mod event;
pub mod reconcile;
pub mod remote;
pub mod source;
pub mod task;

pub use error::{SyncError, SyncResult};
pub use event::{CalendarEvent, EventStatus};
pub use task::{Source, Task, TaskStatus};
