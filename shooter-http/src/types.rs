//! Wire types for the engine's REST API
//!
//! Field names follow the engine's JSON contract (camelCase).

use serde::{Deserialize, Serialize};
use std::fmt;

/// BPMN process id of the main demo process
pub const MAIN_PROCESS_ID: &str = "main-process";

/// ISO-8601 timeout passed to every created process instance
pub const PROCESS_TIMEOUT: &str = "PT1H";

/// Message that spawns a subprocess under a running main process
pub const MSG_CREATE_SUBPROCESS: &str = "MsgCreateNewSimpleProcess";

/// Message that completes a main process
pub const MSG_COMPLETE_MAIN_PROCESS: &str = "MsgCompleteMainProcess";

/// Message that advances a LONG subprocess to completion
pub const MSG_SIMPLE_PROCESS_EVENT: &str = "MsgSimpleProcessEvent";

/// Free-form message variables
pub type Vars = serde_json::Map<String, serde_json::Value>;

/// Subprocess branch selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Branch {
    #[default]
    Short,
    Long,
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::Short => write!(f, "SHORT"),
            Branch::Long => write!(f, "LONG"),
        }
    }
}

/// Body of `POST /processes`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstanceRequest {
    pub bpmn_process_id: String,
    pub vars: ProcessVars,
}

/// Start variables of a main process instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessVars {
    pub key: String,
    pub start_branch: Branch,
    pub timeout: String,
}

/// Body of `POST /messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub msg_name: String,
    pub correlation_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default)]
    pub vars: Vars,
}
