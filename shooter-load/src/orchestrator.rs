//! Phase orchestration
//!
//! One orchestrator drives both phases of a run. Every engine call is
//! spawned as an independent task; the coordinating loop only pauses for
//! pacing and never waits on an in-flight call. A phase is done when every
//! spawned task has been joined, whatever its outcome.

use crate::counter::CallCounter;
use crate::keys;
use crate::pacer::Pacer;
use shooter_config::LoadConfig;
use shooter_http::{
    Branch, ClientError, EngineClient, Vars, MSG_COMPLETE_MAIN_PROCESS, MSG_SIMPLE_PROCESS_EVENT,
};
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info};

/// Dispatches the full operation set of one phase and waits it out
pub struct PhaseOrchestrator {
    client: Arc<dyn EngineClient>,
    load: LoadConfig,
    counter: CallCounter,
    pacer: Pacer,
}

impl PhaseOrchestrator {
    pub fn new(
        client: Arc<dyn EngineClient>,
        load: LoadConfig,
        counter: CallCounter,
        pacer: Pacer,
    ) -> Self {
        Self {
            client,
            load,
            counter,
            pacer,
        }
    }

    /// Create phase: start every main process and ask each one to spawn its
    /// SHORT and LONG subprocesses.
    pub async fn create_processes(&self) {
        info!("==== start creating processes ====");
        let mut tasks = JoinSet::new();

        for i in self.load.main_range.iter() {
            let key = keys::main_key(i);

            let client = Arc::clone(&self.client);
            let process_key = key.clone();
            self.dispatch(&mut tasks, async move {
                client.create_process(&process_key, Branch::Short).await
            })
            .await;

            for j in self.load.short_range.iter() {
                let subprocess_key =
                    keys::subprocess_key(&key, Branch::Short, j, self.load.naming_scheme);
                let client = Arc::clone(&self.client);
                let process_key = key.clone();
                self.dispatch(&mut tasks, async move {
                    client
                        .send_subprocess_create(&process_key, &subprocess_key, Branch::Short)
                        .await
                })
                .await;
            }

            for k in self.load.long_range.iter() {
                let subprocess_key =
                    keys::subprocess_key(&key, Branch::Long, k, self.load.naming_scheme);
                let client = Arc::clone(&self.client);
                let process_key = key.clone();
                self.dispatch(&mut tasks, async move {
                    client
                        .send_subprocess_create(&process_key, &subprocess_key, Branch::Long)
                        .await
                })
                .await;
            }
        }

        self.join_all(tasks).await;
        info!("==== processes created ====");
    }

    /// Complete phase: message every main process and every LONG subprocess
    /// to run to completion. SHORT subprocesses finish on their own.
    pub async fn complete_processes(&self) {
        info!("==== start completing processes ====");
        let mut tasks = JoinSet::new();

        for i in self.load.main_range.iter() {
            let key = keys::main_key(i);

            let client = Arc::clone(&self.client);
            let correlation_key = key.clone();
            self.dispatch(&mut tasks, async move {
                client
                    .send_message(
                        MSG_COMPLETE_MAIN_PROCESS,
                        &correlation_key,
                        Some(&correlation_key),
                        Vars::new(),
                    )
                    .await
            })
            .await;

            for k in self.load.long_range.iter() {
                let subprocess_key =
                    keys::subprocess_key(&key, Branch::Long, k, self.load.naming_scheme);
                let client = Arc::clone(&self.client);
                self.dispatch(&mut tasks, async move {
                    client
                        .send_message(
                            MSG_SIMPLE_PROCESS_EVENT,
                            &subprocess_key,
                            Some(&subprocess_key),
                            Vars::new(),
                        )
                        .await
                })
                .await;
            }
        }

        self.join_all(tasks).await;
        info!("==== processes completed ====");
    }

    /// Spawn one call as an independent task, then pace the coordinating
    /// loop. A failed call is reported and never aborts its siblings; only
    /// successful calls reach the counter.
    async fn dispatch<F>(&self, tasks: &mut JoinSet<()>, call: F)
    where
        F: Future<Output = Result<String, ClientError>> + Send + 'static,
    {
        let counter = self.counter.clone();
        tasks.spawn(async move {
            match call.await {
                Ok(_) => counter.increment(),
                Err(e) => error!("FAILED REQUEST: {}", e),
            }
        });

        self.pacer.wait_if_enabled().await;
    }

    async fn join_all(&self, mut tasks: JoinSet<()>) {
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!("request task did not complete: {}", e);
            }
        }
    }
}
