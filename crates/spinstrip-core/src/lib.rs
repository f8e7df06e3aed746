//! Single-threaded deferred-task runtime for spinstrip.
//!
//! Everything in spinstrip runs on the thread that delivers pointer events;
//! this crate supplies the task queue that decouples user callbacks and
//! animation ticks from the call stack that scheduled them.

mod runtime;

pub use runtime::{Runtime, RuntimeHandle, TaskId, TaskRegistration};
