use std::sync::Arc;
use std::time::Instant;

use workshop_config::WorkshopConfig;

use crate::clock::{ClockUpdater, TimeSource};
use crate::fetcher::JokeFetcher;
use crate::joke::{JokeSource, JokeState};

/// Live state of the dashboard while it is the visible view.
///
/// Created on activation and dropped on deactivation. Dropping it releases
/// the clock timer and the fetch channel, so nothing can write to a view
/// that is no longer shown.
pub struct DashboardView {
    clock: ClockUpdater,
    joke: JokeState,
    fetcher: JokeFetcher,
    time: Arc<dyn TimeSource>,
    failure_message: String,
    fetches_resolved: u64,
}

impl DashboardView {
    /// Start the clock and kick off the first joke fetch.
    pub fn activate(
        config: &WorkshopConfig,
        source: Arc<dyn JokeSource>,
        time: Arc<dyn TimeSource>,
        now: Instant,
    ) -> Self {
        let mut clock = ClockUpdater::new(config.clock.interval(), config.clock.format.clone());
        clock.start(now, time.as_ref());

        let mut view = Self {
            clock,
            joke: JokeState::Loading,
            fetcher: JokeFetcher::new(source),
            time,
            failure_message: config.joke.failure_message.clone(),
            fetches_resolved: 0,
        };
        view.request_joke();
        view
    }

    /// Advance the clock and apply any fetches that resolved since the last
    /// tick. Returns `true` if anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let clock_changed = self.clock.poll(now, self.time.as_ref());
        let joke_changed = self.apply_completions();
        clock_changed || joke_changed
    }

    /// Fetch a new joke. The current text stays until the result arrives.
    pub fn request_joke(&mut self) -> u64 {
        self.fetcher.request()
    }

    fn apply_completions(&mut self) -> bool {
        let completions = self.fetcher.drain();
        let changed = !completions.is_empty();
        // Applied in arrival order: the last fetch to resolve wins.
        for completion in completions {
            self.fetches_resolved += 1;
            match &completion.result {
                Ok(_) => tracing::info!(ticket = completion.ticket, "joke fetched"),
                Err(err) => tracing::warn!(
                    ticket = completion.ticket,
                    error = %err,
                    "joke fetch failed"
                ),
            }
            self.joke = JokeState::from_result(&completion.result, &self.failure_message);
        }
        changed
    }

    pub fn clock_text(&self) -> &str {
        self.clock.display()
    }

    pub fn clock_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn joke(&self) -> &JokeState {
        &self.joke
    }

    pub fn pending_fetches(&self) -> usize {
        self.fetcher.pending()
    }

    pub fn fetches_resolved(&self) -> u64 {
        self.fetches_resolved
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.clock.stop();
        if self.fetcher.pending() > 0 {
            tracing::debug!(
                pending = self.fetcher.pending(),
                "dashboard closed with fetches in flight; their results will be dropped"
            );
        }
    }
}
