use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::joke::{FetchError, Joke, JokeSource};

/// A finished fetch, tagged with the ticket [`JokeFetcher::request`] handed out.
#[derive(Debug)]
pub struct FetchCompletion {
    pub ticket: u64,
    pub result: Result<Joke, FetchError>,
}

/// Runs joke fetches off the UI thread.
///
/// Every [`request`](Self::request) spawns a worker that performs one fetch
/// and sends its completion back over a channel. Requests are neither
/// de-duplicated nor cancelled: overlapping fetches all run, and
/// [`drain`](Self::drain) yields completions in the order they resolved.
/// Dropping the fetcher drops the receiver, so workers that finish later
/// have their results discarded.
pub struct JokeFetcher {
    source: Arc<dyn JokeSource>,
    tx: Sender<FetchCompletion>,
    rx: Receiver<FetchCompletion>,
    next_ticket: u64,
    pending: usize,
}

impl JokeFetcher {
    pub fn new(source: Arc<dyn JokeSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            tx,
            rx,
            next_ticket: 1,
            pending: 0,
        }
    }

    /// Start one fetch and return its ticket.
    pub fn request(&mut self) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.pending += 1;

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = source.fetch();
            // The view may be gone by now; nobody is left to tell.
            let _ = tx.send(FetchCompletion { ticket, result });
        });

        tracing::debug!(ticket, pending = self.pending, "joke fetch started");
        ticket
    }

    /// Collect every completion that has arrived, oldest first.
    pub fn drain(&mut self) -> Vec<FetchCompletion> {
        let done: Vec<_> = self.rx.try_iter().collect();
        self.pending = self.pending.saturating_sub(done.len());
        done
    }

    /// Number of fetches started but not yet drained.
    pub fn pending(&self) -> usize {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedSource;
    use std::time::{Duration, Instant};

    fn drain_until(fetcher: &mut JokeFetcher, count: usize) -> Vec<FetchCompletion> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut done = Vec::new();
        while done.len() < count && Instant::now() < deadline {
            done.extend(fetcher.drain());
            thread::sleep(Duration::from_millis(5));
        }
        done
    }

    #[test]
    fn tickets_increase_per_request() {
        let source = Arc::new(ScriptedSource::always_ok("a", "b"));
        let mut fetcher = JokeFetcher::new(source);
        assert_eq!(fetcher.request(), 1);
        assert_eq!(fetcher.request(), 2);
        assert_eq!(fetcher.pending(), 2);

        let done = drain_until(&mut fetcher, 2);
        assert_eq!(done.len(), 2);
        assert_eq!(fetcher.pending(), 0);
    }

    #[test]
    fn completions_arrive_in_resolution_order() {
        let source = Arc::new(
            ScriptedSource::new()
                .ok_after(Duration::from_millis(200), "slow", "joke")
                .ok_after(Duration::ZERO, "fast", "joke"),
        );
        let mut fetcher = JokeFetcher::new(source);
        fetcher.request();
        fetcher.request();

        let done = drain_until(&mut fetcher, 2);
        let order: Vec<&str> = done
            .iter()
            .map(|c| c.result.as_ref().unwrap().setup.as_str())
            .collect();
        assert_eq!(order, vec!["fast", "slow"]);
    }

    #[test]
    fn errors_are_delivered_not_raised() {
        let source = Arc::new(ScriptedSource::new().fail(Duration::ZERO));
        let mut fetcher = JokeFetcher::new(source);
        fetcher.request();

        let done = drain_until(&mut fetcher, 1);
        assert!(done[0].result.is_err());
    }

    #[test]
    fn drain_with_nothing_pending_is_empty() {
        let source = Arc::new(ScriptedSource::always_ok("a", "b"));
        let mut fetcher = JokeFetcher::new(source);
        assert!(fetcher.drain().is_empty());
        assert_eq!(fetcher.pending(), 0);
    }

    #[test]
    fn dropping_fetcher_discards_late_results() {
        let source = Arc::new(ScriptedSource::new().ok_after(Duration::from_millis(50), "a", "b"));
        let mut fetcher = JokeFetcher::new(source.clone());
        fetcher.request();
        drop(fetcher);

        // The worker's send fails quietly once the receiver is gone.
        thread::sleep(Duration::from_millis(150));
        assert_eq!(source.calls(), 1);
    }
}
