//! Scripted joke sources for lifecycle tests.
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use crate::joke::{FetchError, Joke, JokeSource};

struct Step {
    delay: Duration,
    outcome: Result<Joke, String>,
}

/// Replays a fixed sequence of outcomes, one per call, each after its own
/// delay. Once the script runs out every call returns the fallback joke.
pub(crate) struct ScriptedSource {
    steps: Mutex<VecDeque<Step>>,
    fallback: Option<Joke>,
    calls: AtomicUsize,
}

fn joke(setup: &str, punchline: &str) -> Joke {
    Joke {
        setup: setup.into(),
        punchline: punchline.into(),
    }
}

impl ScriptedSource {
    pub(crate) fn new() -> Self {
        Self {
            steps: Mutex::new(VecDeque::new()),
            fallback: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn always_ok(setup: &str, punchline: &str) -> Self {
        Self {
            fallback: Some(joke(setup, punchline)),
            ..Self::new()
        }
    }

    pub(crate) fn ok_after(self, delay: Duration, setup: &str, punchline: &str) -> Self {
        self.push(delay, Ok(joke(setup, punchline)))
    }

    pub(crate) fn fail(self, delay: Duration) -> Self {
        self.push(delay, Err("network unreachable".into()))
    }

    fn push(self, delay: Duration, outcome: Result<Joke, String>) -> Self {
        self.steps.lock().unwrap().push_back(Step { delay, outcome });
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl JokeSource for ScriptedSource {
    fn fetch(&self) -> Result<Joke, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(step) => {
                thread::sleep(step.delay);
                step.outcome.map_err(FetchError::Source)
            }
            None => self
                .fallback
                .clone()
                .ok_or_else(|| FetchError::Source("script exhausted".into())),
        }
    }
}
