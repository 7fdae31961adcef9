//! Workflow engine HTTP client for Shooter
//!
//! This crate wraps the two engine endpoints the load generator talks to:
//! `POST /processes` (start a process instance) and `POST /messages`
//! (publish a correlation message).

pub mod client;
pub mod errors;
pub mod types;

// Re-export main types for convenience
pub use client::{EngineClient, HttpEngineClient, MESSAGES_PATH, PROCESSES_PATH};
pub use errors::ClientError;
pub use types::{
    Branch, CreateInstanceRequest, ProcessVars, SendMessageRequest, Vars, MAIN_PROCESS_ID,
    MSG_COMPLETE_MAIN_PROCESS, MSG_CREATE_SUBPROCESS, MSG_SIMPLE_PROCESS_EVENT,
};
