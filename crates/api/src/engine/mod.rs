//! Background job execution.
//!
//! - [`queue`]: sequential in-memory task queue.
//! - [`processor`]: turns a queued job id into generated variations.

pub mod processor;
pub mod queue;
