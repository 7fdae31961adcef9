//! Load orchestration core for Shooter
//!
//! The coordinating loop lives here: it walks the configured key space,
//! spawns every engine call as an independent task, paces dispatches when
//! configured, counts completed calls, and produces the final run summary.

pub mod counter;
pub mod keys;
pub mod orchestrator;
pub mod pacer;
pub mod runner;

// Re-export main types for convenience
pub use counter::CallCounter;
pub use orchestrator::PhaseOrchestrator;
pub use pacer::Pacer;
pub use runner::{Runner, RunSummary};
