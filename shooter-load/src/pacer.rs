//! Inter-request pacing

use shooter_config::PacingConfig;
use std::time::Duration;

/// Fixed-delay gate between successive dispatches
///
/// Suspends only the coordinating loop; in-flight request tasks are never
/// delayed by it.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    delay: Option<Duration>,
}

impl Pacer {
    pub fn new(config: &PacingConfig) -> Self {
        Self {
            delay: config.delay(),
        }
    }

    pub fn disabled() -> Self {
        Self { delay: None }
    }

    /// Suspend the calling task for the configured delay, if any
    pub async fn wait_if_enabled(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    /// Configured delay in milliseconds; zero when pacing is off
    pub fn delay_ms(&self) -> u64 {
        self.delay.map(|d| d.as_millis() as u64).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_enabled_pacer_sleeps() {
        let pacer = Pacer::new(&PacingConfig {
            enabled: true,
            delay_ms: 20,
        });

        let start = Instant::now();
        pacer.wait_if_enabled().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_disabled_pacer_is_a_noop() {
        let pacer = Pacer::disabled();
        assert_eq!(pacer.delay_ms(), 0);

        // Returns immediately; no timer is armed
        pacer.wait_if_enabled().await;
    }

    #[test]
    fn test_zero_delay_disables_pacing() {
        let pacer = Pacer::new(&PacingConfig {
            enabled: true,
            delay_ms: 0,
        });
        assert_eq!(pacer.delay_ms(), 0);
    }
}
