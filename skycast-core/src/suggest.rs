//! Debounced type-ahead city suggestions.
//!
//! Every keystroke is stamped with a growing generation number and pushed
//! into a watch channel. A single worker lets the input settle for
//! [`DEBOUNCE`] before it hits the place search, so a fast burst of
//! keystrokes costs one lookup, and a batch computed for an old generation
//! can never override a newer one on the consumer side.

use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::debug;

use crate::model::SearchHit;
use crate::provider::WeatherSource;

/// How long the input has to stay unchanged before a lookup fires.
pub const DEBOUNCE: Duration = Duration::from_millis(200);

/// Suggestions for one settled input, tagged with its generation.
#[derive(Debug, Clone)]
pub struct SuggestionBatch {
    pub generation: u64,
    pub query: String,
    pub hits: Vec<SearchHit>,
}

/// Handle owned by the prompt side. Feed keystrokes in with [`submit`],
/// read settled batches back with [`poll`] or [`wait_for`].
///
/// [`submit`]: TypeAhead::submit
/// [`poll`]: TypeAhead::poll
/// [`wait_for`]: TypeAhead::wait_for
#[derive(Debug)]
pub struct TypeAhead {
    generation: u64,
    queries: watch::Sender<(u64, String)>,
    batches: mpsc::Receiver<SuggestionBatch>,
    newest: Option<SuggestionBatch>,
}

impl TypeAhead {
    /// Start the suggestion worker. Must be called from within a tokio
    /// runtime; the returned handle itself works from any thread.
    pub fn spawn(source: Arc<dyn WeatherSource>) -> Self {
        let (query_tx, query_rx) = watch::channel((0, String::new()));
        let (batch_tx, batch_rx) = mpsc::channel();

        tokio::spawn(worker(query_rx, batch_tx, source));

        Self { generation: 0, queries: query_tx, batches: batch_rx, newest: None }
    }

    /// Record a keystroke and return the generation assigned to it.
    pub fn submit(&mut self, query: &str) -> u64 {
        self.generation += 1;
        let _ = self.queries.send((self.generation, query.to_string()));
        self.generation
    }

    /// Newest settled batch so far, without blocking.
    pub fn poll(&mut self) -> Option<&SuggestionBatch> {
        self.drain();
        self.newest.as_ref()
    }

    /// Wait up to `budget` for a batch at least as new as `generation`,
    /// returning the newest batch seen either way.
    pub fn wait_for(&mut self, generation: u64, budget: Duration) -> Option<&SuggestionBatch> {
        let deadline = Instant::now() + budget;

        loop {
            self.drain();
            if self.newest.as_ref().is_some_and(|batch| batch.generation >= generation) {
                break;
            }

            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                break;
            };
            match self.batches.recv_timeout(remaining) {
                Ok(batch) => self.absorb(batch),
                Err(_) => break,
            }
        }

        self.newest.as_ref()
    }

    fn drain(&mut self) {
        while let Ok(batch) = self.batches.try_recv() {
            self.absorb(batch);
        }
    }

    fn absorb(&mut self, batch: SuggestionBatch) {
        if self.newest.as_ref().is_none_or(|newest| batch.generation > newest.generation) {
            self.newest = Some(batch);
        }
    }
}

async fn worker(
    mut queries: watch::Receiver<(u64, String)>,
    batches: mpsc::Sender<SuggestionBatch>,
    source: Arc<dyn WeatherSource>,
) {
    while queries.changed().await.is_ok() {
        // Trailing-edge debounce: the window restarts on every keystroke.
        loop {
            tokio::select! {
                () = sleep(DEBOUNCE) => break,
                changed = queries.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }

        let (generation, query) = queries.borrow_and_update().clone();

        let hits = if query.trim().is_empty() {
            Vec::new()
        } else {
            match source.search(&query).await {
                Ok(hits) => hits,
                Err(error) => {
                    debug!(%error, query, "suggestion lookup failed");
                    Vec::new()
                }
            }
        };

        if batches.send(SuggestionBatch { generation, query, hits }).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeatherError;
    use crate::model::{Weather, WeatherForecast};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct StubSearch {
        calls: AtomicUsize,
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl WeatherSource for StubSearch {
        async fn current(&self, _query: &str) -> Result<Weather, WeatherError> {
            panic!("current is not used by the suggestion worker")
        }

        async fn forecast(&self, _query: &str, _days: u8) -> Result<WeatherForecast, WeatherError> {
            panic!("forecast is not used by the suggestion worker")
        }

        async fn search(&self, query: &str) -> Result<Vec<SearchHit>, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(query.to_string());
            Ok(vec![hit(query)])
        }
    }

    fn hit(name: &str) -> SearchHit {
        SearchHit {
            id: 1,
            name: name.to_string(),
            region: "Region".to_string(),
            country: "Country".to_string(),
            lat: 0.0,
            lon: 0.0,
            url: String::new(),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn keystroke_burst_collapses_to_one_lookup() {
        let source = Arc::new(StubSearch::default());
        let mut typeahead = TypeAhead::spawn(source.clone());

        typeahead.submit("L");
        sleep(Duration::from_millis(20)).await;
        typeahead.submit("Lo");
        sleep(Duration::from_millis(20)).await;
        let generation = typeahead.submit("Lon");

        let batch = typeahead.wait_for(generation, Duration::from_secs(2)).expect("settled batch");

        assert_eq!(batch.generation, generation);
        assert_eq!(batch.query, "Lon");
        assert_eq!(batch.hits[0].name, "Lon");
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(source.queries.lock().unwrap().as_slice(), ["Lon"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn newest_generation_wins() {
        let source = Arc::new(StubSearch::default());
        let mut typeahead = TypeAhead::spawn(source.clone());

        let first = typeahead.submit("London");
        typeahead.wait_for(first, Duration::from_secs(2));

        let second = typeahead.submit("Paris");
        let batch = typeahead.wait_for(second, Duration::from_secs(2)).expect("settled batch");

        assert!(second > first);
        assert_eq!(batch.generation, second);
        assert_eq!(batch.query, "Paris");
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn blank_input_clears_without_a_lookup() {
        let source = Arc::new(StubSearch::default());
        let mut typeahead = TypeAhead::spawn(source.clone());

        let generation = typeahead.submit("   ");
        let batch = typeahead.wait_for(generation, Duration::from_secs(2)).expect("settled batch");

        assert!(batch.hits.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn poll_returns_without_waiting() {
        let source = Arc::new(StubSearch::default());
        let mut typeahead = TypeAhead::spawn(source);

        assert!(typeahead.poll().is_none());

        let generation = typeahead.submit("Lima");
        sleep(Duration::from_millis(600)).await;

        let polled = typeahead.poll().expect("settled batch").generation;
        assert_eq!(polled, generation);

        // a later poll still serves the cached batch
        assert_eq!(typeahead.poll().expect("cached batch").generation, generation);
    }
}
