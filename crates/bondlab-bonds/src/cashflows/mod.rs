//! Cash-flow schedules.
//!
//! - [`CashFlowScheduler`]: expands bond terms into dated payments
//! - [`validate_schedule`]: invariant checks for generated and persisted
//!   schedules alike
//! - [`PersistedScheduleSource`]: collaborator supplying schedules captured
//!   from authoritative documents

mod persisted;
mod scheduler;

pub use persisted::{validate_schedule, InMemoryScheduleSource, PersistedScheduleSource};
pub use scheduler::{generate, CashFlowScheduler};
