//! Sweeper service for periodic removal of expired verification records

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use otp_shared::config::SweeperConfig;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::repositories::CodeStore;
use crate::services::clock::{Clock, SystemClock};

/// Service that evicts expired records from a [`CodeStore`]
pub struct CodeSweeper<S: CodeStore + 'static> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: SweeperConfig,
}

impl<S: CodeStore> CodeSweeper<S> {
    /// Create a new sweeper using the system clock
    pub fn new(store: Arc<S>, config: SweeperConfig) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the clock used to decide what has expired
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Run a single sweep pass
    ///
    /// A pass never fails and never panics. If the store panics while
    /// sweeping, the panic is caught, logged, and reported in
    /// [`SweepResult::error`].
    pub fn run_sweep(&self) -> SweepResult {
        let now = self.clock.now();

        match panic::catch_unwind(AssertUnwindSafe(|| self.store.sweep_expired(now))) {
            Ok(removed) => SweepResult {
                removed,
                remaining: Some(self.store.len()),
                swept_at: now,
                error: None,
            },
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(
                    event = "sweep_panicked",
                    error = %message,
                    "Sweep pass panicked; will retry on next interval"
                );
                SweepResult {
                    removed: 0,
                    remaining: panic::catch_unwind(AssertUnwindSafe(|| self.store.len())).ok(),
                    swept_at: now,
                    error: Some(message),
                }
            }
        }
    }

    /// Start the sweeper as a background task
    ///
    /// This spawns a tokio task that sweeps at the configured interval,
    /// starting immediately. Returns `None` when the sweeper is disabled.
    ///
    /// Dropping the returned handle detaches the task, which then runs until
    /// the runtime shuts down. Use [`SweeperHandle::shutdown`] to stop it.
    pub fn start_background_task(self: Arc<Self>) -> Option<SweeperHandle> {
        if !self.config.enabled {
            warn!("Verification code sweeper is disabled");
            return None;
        }

        let interval = Duration::from_secs(self.config.interval_seconds.max(1));
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            info!(
                "Verification code sweeper started - will run every {} seconds",
                interval.as_secs()
            );

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut listening = true;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let result = self.run_sweep();
                        if result.is_success() {
                            debug!(
                                event = "sweep_completed",
                                removed = result.removed,
                                remaining = ?result.remaining,
                                "Sweep pass completed"
                            );
                        }
                    }
                    changed = shutdown_rx.changed(), if listening => {
                        if changed.is_err() {
                            // Handle dropped: keep sweeping for the life of the runtime
                            listening = false;
                            continue;
                        }
                        let stop = *shutdown_rx.borrow();
                        if stop {
                            break;
                        }
                    }
                }
            }

            info!("Verification code sweeper stopped");
        });

        Some(SweeperHandle { shutdown_tx, task })
    }
}

/// Handle to a running background sweeper
pub struct SweeperHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the sweeper to stop and wait for the loop to exit
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            error!("Verification code sweeper task ended abnormally: {}", e);
        }
    }

    /// Whether the background loop has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Result of a sweep pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepResult {
    /// Number of expired records removed
    pub removed: usize,
    /// Number of records left in the store after the pass, `None` if the
    /// store could not report it
    pub remaining: Option<usize>,
    /// Instant used as "now" for the pass
    pub swept_at: DateTime<Utc>,
    /// Panic message if the pass faulted
    pub error: Option<String>,
}

impl SweepResult {
    /// Check if the pass completed without a fault
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
