//! Engine client implementation

use crate::errors::ClientError;
use crate::types::{
    Branch, CreateInstanceRequest, ProcessVars, SendMessageRequest, Vars, MAIN_PROCESS_ID,
    MSG_CREATE_SUBPROCESS, PROCESS_TIMEOUT,
};
use reqwest::Client;
use serde::Serialize;
use serde_json::json;
use shooter_config::HttpConfig;
use tracing::{debug, warn};

/// Path of the process-start resource
pub const PROCESSES_PATH: &str = "/processes";

/// Path of the message-publish resource
pub const MESSAGES_PATH: &str = "/messages";

/// Client trait for the two engine endpoints the shooter drives
#[async_trait::async_trait]
pub trait EngineClient: Send + Sync {
    /// Start a main process instance correlated on `key`
    async fn create_process(&self, key: &str, branch: Branch) -> Result<String, ClientError>;

    /// Publish a correlation message
    async fn send_message(
        &self,
        msg_name: &str,
        correlation_key: &str,
        message_id: Option<&str>,
        vars: Vars,
    ) -> Result<String, ClientError>;

    /// Ask a running main process to spawn a subprocess
    async fn send_subprocess_create(
        &self,
        key: &str,
        subprocess_key: &str,
        branch: Branch,
    ) -> Result<String, ClientError> {
        let mut vars = Vars::new();
        vars.insert("subprocessKey".to_string(), json!(subprocess_key));
        vars.insert("branch".to_string(), json!(branch));
        self.send_message(MSG_CREATE_SUBPROCESS, key, None, vars)
            .await
    }
}

/// reqwest-backed engine client
#[derive(Debug, Clone)]
pub struct HttpEngineClient {
    client: Client,
    base_url: String,
}

impl HttpEngineClient {
    /// Create a client from HTTP configuration
    pub fn new(config: &HttpConfig) -> Result<Self, ClientError> {
        debug!(
            "Creating engine client for {} with {}s timeout",
            config.base_url,
            config.timeout.as_secs()
        );
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .redirect(reqwest::redirect::Policy::limited(
                config.max_redirects as usize,
            ))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post<T: Serialize>(&self, path: &str, request: &T) -> Result<String, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }

        // The engine acknowledges with a non-empty body; a blank body is
        // worth a warning but is not a transport failure.
        if body.trim().is_empty() {
            warn!(
                "POST {}: got empty response for request: {}",
                path,
                serde_json::to_string(request).unwrap_or_default()
            );
        }

        Ok(body)
    }
}

#[async_trait::async_trait]
impl EngineClient for HttpEngineClient {
    async fn create_process(&self, key: &str, branch: Branch) -> Result<String, ClientError> {
        let request = CreateInstanceRequest {
            bpmn_process_id: MAIN_PROCESS_ID.to_string(),
            vars: ProcessVars {
                key: key.to_string(),
                start_branch: branch,
                timeout: PROCESS_TIMEOUT.to_string(),
            },
        };

        self.post(PROCESSES_PATH, &request).await
    }

    async fn send_message(
        &self,
        msg_name: &str,
        correlation_key: &str,
        message_id: Option<&str>,
        vars: Vars,
    ) -> Result<String, ClientError> {
        let request = SendMessageRequest {
            msg_name: msg_name.to_string(),
            correlation_key: correlation_key.to_string(),
            message_id: message_id.map(str::to_string),
            vars,
        };

        self.post(MESSAGES_PATH, &request).await
    }
}
