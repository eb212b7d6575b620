//! Cancellable single-shot timers for keystroke-driven work.
//!
//! Both interactive flows delay reacting to text input: the editor's search
//! filter (200 ms) and the intake's student-number lookup (400 ms). Each
//! restart aborts the previously scheduled firing, so only the most recent
//! input's timer ever runs, and dropping the timer cancels any pending work
//! so an abandoned form cannot fire late.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(200);
pub const LOOKUP_DEBOUNCE: Duration = Duration::from_millis(400);

/// A restartable one-shot timer that runs an async action after a quiet
/// period. Restarting replaces the pending action; dropping cancels it.
#[derive(Debug)]
pub struct RestartableTimer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl RestartableTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedules `action` to run after the quiet period, cancelling any
    /// previously scheduled action that has not fired yet.
    pub fn restart<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl Drop for RestartableTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A debounced input channel: raw values go in on every keystroke, and the
/// settled value only advances once a value's timer fires unchallenged.
#[derive(Debug)]
pub struct DebouncedInput<T> {
    timer: RestartableTimer,
    tx: watch::Sender<T>,
    rx: watch::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> DebouncedInput<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        let (tx, rx) = watch::channel(initial);
        Self {
            timer: RestartableTimer::new(delay),
            tx,
            rx,
        }
    }

    /// Records a new raw value, superseding any value still waiting out its
    /// quiet period.
    pub fn submit(&mut self, value: T) {
        let tx = self.tx.clone();
        self.timer.restart(async move {
            let _ = tx.send(value);
        });
    }

    /// The last value whose timer fired.
    pub fn settled(&self) -> T {
        self.rx.borrow().clone()
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
    }
}
