use std::{sync::Arc, time::Duration};

use medremind_api::ReminderApi;
use tokio::{
    task::{self, JoinHandle},
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::{StatusObserver, StatusTracker};

/// Shortest polling interval; anything below is raised to it.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Polls the reminder listing on a fixed interval and reports status changes.
///
/// The first poll happens immediately. Dropping the watcher stops it.
pub struct StatusWatcher {
    task: JoinHandle<()>,
    cancellation_token: CancellationToken,
    _stop_on_drop: DropGuard,
}

impl StatusWatcher {
    pub fn spawn(
        api: Arc<dyn ReminderApi>,
        observer: Arc<dyn StatusObserver>,
        interval: Duration,
    ) -> Self {
        let cancellation_token = CancellationToken::new();
        let task_cancellation_token = cancellation_token.child_token();

        if interval < MIN_INTERVAL {
            log::warn!("Watch interval {interval:?} is too short, using {MIN_INTERVAL:?}");
        }
        let interval = interval.max(MIN_INTERVAL);

        log::info!("Watching reminders every {:?}", interval);
        let task = task::spawn(async move {
            run_watcher(api, observer, interval, task_cancellation_token).await;
        });

        Self {
            task,
            _stop_on_drop: cancellation_token.clone().drop_guard(),
            cancellation_token,
        }
    }

    /// Token that stops the watcher when cancelled, e.g. from a Ctrl-C handler.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Runs until the watcher is cancelled through its token.
    pub async fn join(self) {
        let _ = self.task.await;
    }

    pub async fn stop(self, timeout: Duration) {
        self.cancellation_token.cancel();
        let stop_with_timeout = time::timeout(timeout, self.task);
        let _ = stop_with_timeout.await;
    }
}

async fn run_watcher(
    api: Arc<dyn ReminderApi>,
    observer: Arc<dyn StatusObserver>,
    interval: Duration,
    cancellation_token: CancellationToken,
) {
    let mut tracker = StatusTracker::new();
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancellation_token.cancelled() => {
                log::info!("Status watcher shutting down");
                break;
            }
            _ = ticker.tick() => {
                poll_once(api.as_ref(), observer.as_ref(), &mut tracker).await;
            }
        }
    }
}

async fn poll_once(
    api: &dyn ReminderApi,
    observer: &dyn StatusObserver,
    tracker: &mut StatusTracker,
) {
    let reminders = match api.list().await {
        Ok(reminders) => reminders,
        Err(error) => {
            log::warn!("Polling reminders failed, retrying next tick: {error}");
            return;
        }
    };

    for event in tracker.observe(&reminders) {
        log::debug!("[WATCH] {event:?}");
        observer.on_status_event(&event).await;
    }
}
