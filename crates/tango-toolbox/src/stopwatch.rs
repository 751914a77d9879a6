use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// `{m}m {s}s`
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}m {}s", secs / 60, secs % 60)
}

/// Start/stop toggle that reports elapsed time once a second while running
#[derive(Default)]
pub struct Stopwatch {
    running: Option<(Instant, CancellationToken)>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Start when stopped. Must be called inside a tokio runtime.
    pub fn start<F>(&mut self, tick: Duration, mut on_tick: F)
    where
        F: FnMut(String) + Send + 'static,
    {
        if self.running.is_some() {
            return;
        }

        let started = Instant::now();
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(started + tick, tick);
            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => break,
                    _ = interval.tick() => on_tick(format_elapsed(started.elapsed())),
                }
            }
            tracing::debug!("Stopwatch ticker stopped");
        });

        self.running = Some((started, cancel));
    }

    /// Stop when running; returns the final elapsed time
    pub fn stop(&mut self) -> Option<Duration> {
        let (started, cancel) = self.running.take()?;
        cancel.cancel();
        Some(started.elapsed())
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        if let Some((_, cancel)) = &self.running {
            cancel.cancel();
        }
    }
}
