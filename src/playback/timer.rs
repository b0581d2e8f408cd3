/// Recurring progress timer
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Events delivered to the application loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
}

/// Background task that emits [`AppEvent::Tick`] once per period.
///
/// The task is aborted by [`ProgressTimer::cancel`] or when the timer is
/// dropped, so a stopped player never keeps a repeating timer alive.
#[derive(Debug)]
pub struct ProgressTimer {
    period: Duration,
    abort: Option<AbortHandle>,
}

impl ProgressTimer {
    /// Spawn the timer on the current tokio runtime.
    ///
    /// The first tick arrives one full `period` after starting.
    pub fn start(period: Duration, events: mpsc::UnboundedSender<AppEvent>) -> Self {
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // interval() completes its first tick immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if events.send(AppEvent::Tick).is_err() {
                    tracing::debug!("Tick receiver closed, stopping progress timer");
                    break;
                }
            }
        });
        tracing::debug!("Progress timer started ({:?})", period);

        Self {
            period,
            abort: Some(task.abort_handle()),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.abort.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.abort.take() {
            handle.abort();
            tracing::debug!("Progress timer cancelled");
        }
    }
}

impl Drop for ProgressTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_secs(1);

    fn drain(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> usize {
        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_ticks_every_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = ProgressTimer::start(PERIOD, tx);
        assert!(timer.is_running());
        assert_eq!(timer.period(), PERIOD);

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(drain(&mut rx), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer = ProgressTimer::start(PERIOD, tx);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        timer.cancel();
        assert!(!timer.is_running());
        let before = drain(&mut rx);
        assert_eq!(before, 1);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(drain(&mut rx), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = ProgressTimer::start(PERIOD, tx);
        drop(timer);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(drain(&mut rx), 0);
        // the aborted task released its sender
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_stops_when_receiver_closes() {
        let (tx, rx) = mpsc::unbounded_channel();
        let timer = ProgressTimer::start(PERIOD, tx);
        drop(rx);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        assert!(!timer.is_running());
    }
}
