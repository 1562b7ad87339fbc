//! Fixed-interval polling with stale-data retention.
//!
//! A poller fetches once immediately and then on every tick until its handle is
//! dropped. A failed tick keeps the last good value; `loading` only covers the time
//! before the first fetch finishes, whatever its outcome.

use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub mod fetch;

pub use fetch::{Fetcher, HttpFetcher};

/// Outcome of the most recent tick
#[derive(Debug, Clone, PartialEq)]
pub enum Reading<T> {
    /// Nothing has finished yet
    NoDataYet,
    /// The latest tick succeeded
    Valid(T),
    /// The latest tick failed; `last` is the value still on display, if any
    TickFailed { last: Option<T>, error: String },
}

impl<T> Reading<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Reading::NoDataYet => None,
            Reading::Valid(data) => Some(data),
            Reading::TickFailed { last, .. } => last.as_ref(),
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Reading::TickFailed { last: Some(_), .. })
    }

    fn into_data(self) -> Option<T> {
        match self {
            Reading::NoDataYet => None,
            Reading::Valid(data) => Some(data),
            Reading::TickFailed { last, .. } => last,
        }
    }
}

/// What a poll consumer sees
#[derive(Debug, Clone)]
pub struct PollState<T> {
    reading: Reading<T>,
    loading: bool,
    last_update: Option<OffsetDateTime>,
}

impl<T> Default for PollState<T> {
    fn default() -> Self {
        Self {
            reading: Reading::NoDataYet,
            loading: true,
            last_update: None,
        }
    }
}

impl<T> PollState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reading(&self) -> &Reading<T> {
        &self.reading
    }

    /// Latest good value, stale or not
    pub fn data(&self) -> Option<&T> {
        self.reading.data()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Time of the most recent successful fetch
    pub fn last_update(&self) -> Option<OffsetDateTime> {
        self.last_update
    }

    pub fn record_success(&mut self, data: T, at: OffsetDateTime) {
        self.reading = Reading::Valid(data);
        self.last_update = Some(at);
        self.loading = false;
    }

    pub fn record_failure(&mut self, error: impl ToString) {
        let previous = std::mem::replace(&mut self.reading, Reading::NoDataYet);
        self.reading = Reading::TickFailed {
            last: previous.into_data(),
            error: error.to_string(),
        };
        self.loading = false;
    }
}

pub type SharedState<T> = Arc<RwLock<PollState<T>>>;

/// Run one fetch and fold its outcome into `state`.
pub async fn poll_once<T>(fetcher: &dyn Fetcher<T>, state: &RwLock<PollState<T>>) {
    match fetcher.fetch().await {
        Ok(data) => {
            state.write().await.record_success(data, OffsetDateTime::now_utc());
        }
        Err(e) => {
            tracing::debug!("poll failed: {}", e);
            state.write().await.record_failure(e);
        }
    }
}

/// A running poller. Dropping it stops the timer.
pub struct PollHandle<T> {
    state: SharedState<T>,
    task: JoinHandle<()>,
}

impl<T: Clone> PollHandle<T> {
    /// Copy of the current state
    pub async fn snapshot(&self) -> PollState<T> {
        self.state.read().await.clone()
    }

    pub fn state(&self) -> SharedState<T> {
        self.state.clone()
    }
}

impl<T> Drop for PollHandle<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start polling `fetcher` every `every`, first fetch right away.
pub fn spawn<T, F>(fetcher: F, every: Duration) -> PollHandle<T>
where
    T: Send + Sync + 'static,
    F: Fetcher<T> + 'static,
{
    let state: SharedState<T> = Arc::new(RwLock::new(PollState::new()));
    let task_state = state.clone();
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // a slow fetch pushes the schedule back instead of bursting
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            poll_once(&fetcher, &task_state).await;
        }
    });
    PollHandle { state, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Plays back a fixed sequence of outcomes, then keeps failing
    struct Scripted {
        outcomes: Mutex<VecDeque<Result<u32, String>>>,
        calls: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn new(outcomes: Vec<Result<u32, String>>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let fetcher = Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: calls.clone(),
            };
            (fetcher, calls)
        }
    }

    #[async_trait]
    impl Fetcher<u32> for Scripted {
        async fn fetch(&self) -> crate::Result<u32> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.outcomes.lock().unwrap().pop_front();
            match next {
                Some(Ok(v)) => Ok(v),
                Some(Err(e)) => Err(e.into()),
                None => Err("exhausted".into()),
            }
        }
    }

    #[test]
    fn test_state_keeps_stale_value() {
        let mut state = PollState::new();
        assert!(state.loading());
        assert_eq!(state.reading(), &Reading::NoDataYet);

        let at = OffsetDateTime::UNIX_EPOCH;
        state.record_success(7, at);
        state.record_failure("connection refused");
        assert_eq!(state.data(), Some(&7));
        assert!(state.reading().is_stale());
        assert_eq!(state.last_update(), Some(at));
        assert!(!state.loading());

        state.record_failure("still down");
        assert_eq!(
            state.reading(),
            &Reading::TickFailed { last: Some(7), error: "still down".to_string() }
        );
    }

    #[test]
    fn test_first_failure_ends_loading_without_data() {
        let mut state: PollState<u32> = PollState::new();
        state.record_failure("boom");
        assert!(!state.loading());
        assert!(state.data().is_none());
        assert!(!state.reading().is_stale());
        assert!(state.last_update().is_none());
    }

    #[tokio::test]
    async fn test_poll_once() {
        let (fetcher, calls) = Scripted::new(vec![Ok(1), Err("down".to_string())]);
        let state = RwLock::new(PollState::new());

        poll_once(&fetcher, &state).await;
        let first = state.read().await.last_update();
        assert_eq!(state.read().await.data(), Some(&1));

        poll_once(&fetcher, &state).await;
        let guard = state.read().await;
        assert_eq!(guard.data(), Some(&1));
        assert!(guard.reading().is_stale());
        assert_eq!(guard.last_update(), first);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_flips_once() {
        let (fetcher, _) = Scripted::new(vec![Err("down".to_string()), Ok(5)]);
        let handle = spawn(fetcher, Duration::from_secs(1));
        let mut seen = vec![handle.snapshot().await.loading()];

        for _ in 0..3 {
            tokio::time::sleep(Duration::from_millis(600)).await;
            seen.push(handle.snapshot().await.loading());
        }
        seen.dedup();
        assert_eq!(seen, vec![true, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_interval_and_keeps_last_good() {
        let (fetcher, calls) = Scripted::new(vec![Ok(1), Err("down".to_string()), Ok(3)]);
        let handle = spawn(fetcher, Duration::from_secs(5));

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(handle.snapshot().await.reading(), &Reading::Valid(1));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let state = handle.snapshot().await;
        assert_eq!(state.data(), Some(&1));
        assert!(state.reading().is_stale());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(handle.snapshot().await.reading(), &Reading::Valid(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_polling() {
        let (fetcher, calls) = Scripted::new(vec![Ok(1); 10]);
        let handle = spawn(fetcher, Duration::from_secs(1));
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        drop(handle);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
