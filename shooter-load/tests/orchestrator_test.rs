//! End-to-end tests for phase orchestration against a fake engine client

use shooter_config::{KeyRange, LoadConfig, NamingScheme, PacingConfig};
use shooter_http::{
    Branch, ClientError, EngineClient, Vars, MSG_COMPLETE_MAIN_PROCESS, MSG_CREATE_SUBPROCESS,
    MSG_SIMPLE_PROCESS_EVENT,
};
use shooter_load::Runner;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct RecordedMessage {
    msg_name: String,
    correlation_key: String,
    message_id: Option<String>,
    vars: Vars,
}

/// Fake engine client that records every call and answers with a non-empty
/// body, except for keys it was told to fail.
#[derive(Default)]
struct RecordingClient {
    creates: Mutex<Vec<String>>,
    messages: Mutex<Vec<RecordedMessage>>,
    fail_creates_for: Vec<String>,
}

impl RecordingClient {
    fn failing_creates(keys: &[&str]) -> Self {
        Self {
            fail_creates_for: keys.iter().map(|k| k.to_string()).collect(),
            ..Self::default()
        }
    }

    fn creates(&self) -> Vec<String> {
        self.creates.lock().unwrap().clone()
    }

    fn messages(&self) -> Vec<RecordedMessage> {
        self.messages.lock().unwrap().clone()
    }

    fn messages_named(&self, name: &str) -> Vec<RecordedMessage> {
        self.messages()
            .into_iter()
            .filter(|m| m.msg_name == name)
            .collect()
    }
}

#[async_trait::async_trait]
impl EngineClient for RecordingClient {
    async fn create_process(&self, key: &str, _branch: Branch) -> Result<String, ClientError> {
        // Give the scheduler a chance to interleave completions
        tokio::task::yield_now().await;
        self.creates.lock().unwrap().push(key.to_string());

        if self.fail_creates_for.iter().any(|k| k == key) {
            return Err(ClientError::Http {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok("process-started".to_string())
    }

    async fn send_message(
        &self,
        msg_name: &str,
        correlation_key: &str,
        message_id: Option<&str>,
        vars: Vars,
    ) -> Result<String, ClientError> {
        tokio::task::yield_now().await;
        self.messages.lock().unwrap().push(RecordedMessage {
            msg_name: msg_name.to_string(),
            correlation_key: correlation_key.to_string(),
            message_id: message_id.map(str::to_string),
            vars,
        });
        Ok("ok".to_string())
    }
}

fn load_config(main: KeyRange, short: KeyRange, long: KeyRange) -> LoadConfig {
    LoadConfig {
        main_range: main,
        short_range: short,
        long_range: long,
        naming_scheme: NamingScheme::Split,
        pacing: PacingConfig {
            enabled: false,
            delay_ms: 0,
        },
    }
}

#[tokio::test]
async fn end_to_end_two_mains_one_short_one_long() {
    let client = Arc::new(RecordingClient::default());
    let config = load_config(
        KeyRange::new(1, 2),
        KeyRange::new(1, 1),
        KeyRange::new(1, 1),
    );

    let summary = Runner::new(client.clone(), config).run().await;

    // 2 creates + 2 short + 2 long in the create phase,
    // 2 completes + 2 long events in the complete phase
    assert_eq!(summary.completed_requests, 10);
    assert_eq!(summary.expected_main_processes, 2);
    assert_eq!(summary.expected_total_processes, 6);

    assert_eq!(client.creates(), vec!["M1", "M2"]);
    assert_eq!(client.messages().len(), 8);

    let subprocess_creates = client.messages_named(MSG_CREATE_SUBPROCESS);
    let mut subprocess_keys: Vec<String> = subprocess_creates
        .iter()
        .map(|m| m.vars["subprocessKey"].as_str().unwrap().to_string())
        .collect();
    subprocess_keys.sort();
    assert_eq!(
        subprocess_keys,
        vec!["M1-SPL1", "M1-SPS1", "M2-SPL1", "M2-SPS1"]
    );
    for message in &subprocess_creates {
        assert!(message.message_id.is_none());
        assert!(message.vars.contains_key("branch"));
    }

    let completes = client.messages_named(MSG_COMPLETE_MAIN_PROCESS);
    let mut complete_keys: Vec<&str> = completes
        .iter()
        .map(|m| m.correlation_key.as_str())
        .collect();
    complete_keys.sort();
    assert_eq!(complete_keys, vec!["M1", "M2"]);
    for message in &completes {
        assert_eq!(message.message_id.as_deref(), Some(message.correlation_key.as_str()));
    }

    let events = client.messages_named(MSG_SIMPLE_PROCESS_EVENT);
    let mut event_keys: Vec<&str> = events.iter().map(|m| m.correlation_key.as_str()).collect();
    event_keys.sort();
    assert_eq!(event_keys, vec!["M1-SPL1", "M2-SPL1"]);
}

#[tokio::test]
async fn empty_main_range_dispatches_nothing() {
    let client = Arc::new(RecordingClient::default());
    let config = load_config(
        KeyRange::new(1, 0),
        KeyRange::new(1, 2),
        KeyRange::new(1, 2),
    );

    let summary = Runner::new(client.clone(), config).run().await;

    assert_eq!(summary.completed_requests, 0);
    assert_eq!(summary.expected_main_processes, 0);
    assert_eq!(summary.expected_total_processes, 0);
    assert!(client.creates().is_empty());
    assert!(client.messages().is_empty());
}

#[tokio::test]
async fn failed_request_does_not_abort_siblings() {
    let client = Arc::new(RecordingClient::failing_creates(&["M1"]));
    let config = load_config(
        KeyRange::new(1, 2),
        KeyRange::new(1, 1),
        KeyRange::new(1, 1),
    );

    let summary = Runner::new(client.clone(), config).run().await;

    // The failed create is attempted but not counted; everything else runs
    assert_eq!(client.creates().len(), 2);
    assert_eq!(client.messages().len(), 8);
    assert_eq!(summary.completed_requests, 9);
}

#[tokio::test]
async fn all_concurrent_successes_are_counted() {
    let client = Arc::new(RecordingClient::default());
    let config = load_config(
        KeyRange::new(1, 10),
        KeyRange::new(1, 2),
        KeyRange::new(1, 2),
    );

    let summary = Runner::new(client.clone(), config).run().await;

    // Create phase: 10 * (1 + 2 + 2); complete phase: 10 * (1 + 2)
    assert_eq!(summary.completed_requests, 80);
    assert_eq!(summary.expected_total_processes, 50);
}

#[tokio::test]
async fn pacing_bounds_dispatch_rate_from_below() {
    let client = Arc::new(RecordingClient::default());
    let mut config = load_config(
        KeyRange::new(1, 3),
        KeyRange::new(1, 0),
        KeyRange::new(1, 0),
    );
    config.pacing = PacingConfig {
        enabled: true,
        delay_ms: 20,
    };

    let start = Instant::now();
    let summary = Runner::new(client, config).run().await;
    let elapsed = start.elapsed();

    // 3 paced dispatches per phase, two phases; allow scheduling jitter
    assert_eq!(summary.completed_requests, 6);
    assert!(
        elapsed >= Duration::from_millis(100),
        "elapsed {elapsed:?} below pacing lower bound"
    );
    assert_eq!(summary.delay_ms, 20);
}

#[tokio::test]
async fn unified_naming_scheme_drops_class_suffix() {
    let client = Arc::new(RecordingClient::default());
    let mut config = load_config(
        KeyRange::new(1, 1),
        KeyRange::new(1, 1),
        KeyRange::new(1, 1),
    );
    config.naming_scheme = NamingScheme::Unified;

    Runner::new(client.clone(), config).run().await;

    let subprocess_keys: Vec<String> = client
        .messages_named(MSG_CREATE_SUBPROCESS)
        .iter()
        .map(|m| m.vars["subprocessKey"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(subprocess_keys, vec!["M1-SP1", "M1-SP1"]);

    let events = client.messages_named(MSG_SIMPLE_PROCESS_EVENT);
    assert_eq!(events[0].correlation_key, "M1-SP1");
}
