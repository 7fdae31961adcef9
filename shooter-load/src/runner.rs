//! Run sequencing and summary

use crate::counter::CallCounter;
use crate::orchestrator::PhaseOrchestrator;
use crate::pacer::Pacer;
use shooter_config::LoadConfig;
use shooter_http::EngineClient;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Final statistics of one run
///
/// Process counts are what the configured ranges should have produced on the
/// engine; `completed_requests` is raw HTTP calls that came back successfully.
/// The two are deliberately separate statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub expected_main_processes: u64,
    pub expected_total_processes: u64,
    pub delay_ms: u64,
    pub elapsed: Duration,
    pub completed_requests: u64,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "expected main processes count: {}",
            self.expected_main_processes
        )?;
        writeln!(
            f,
            "expected simple processes count: {}",
            self.expected_total_processes
        )?;
        writeln!(f, "delay between requests: {} ms", self.delay_ms)?;
        writeln!(f, "execution time: {} ms", self.elapsed.as_millis())?;
        write!(f, "requests count: {}", self.completed_requests)
    }
}

/// Sequences the create and complete phases and produces the summary
pub struct Runner {
    client: Arc<dyn EngineClient>,
    load: LoadConfig,
    counter: CallCounter,
}

impl Runner {
    pub fn new(client: Arc<dyn EngineClient>, load: LoadConfig) -> Self {
        Self {
            client,
            load,
            counter: CallCounter::new(),
        }
    }

    /// Run both phases to completion, strictly in order, and return the
    /// summary. Request failures are reported inside the phases and never
    /// bubble up, so the summary is produced unconditionally.
    pub async fn run(&self) -> RunSummary {
        let start = Instant::now();

        let orchestrator = PhaseOrchestrator::new(
            Arc::clone(&self.client),
            self.load.clone(),
            self.counter.clone(),
            Pacer::new(&self.load.pacing),
        );

        orchestrator.create_processes().await;
        orchestrator.complete_processes().await;

        self.summarize(start.elapsed())
    }

    fn summarize(&self, elapsed: Duration) -> RunSummary {
        let main_processes = self.load.main_range.count();
        let short_subprocesses = self.load.short_range.count() * main_processes;
        let long_subprocesses = self.load.long_range.count() * main_processes;

        RunSummary {
            expected_main_processes: main_processes,
            expected_total_processes: main_processes + short_subprocesses + long_subprocesses,
            delay_ms: self
                .load
                .pacing
                .delay()
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0),
            elapsed,
            completed_requests: self.counter.value(),
        }
    }
}
