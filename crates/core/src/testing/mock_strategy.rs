//! Mock thumbnail strategy for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::reel::ReelReference;
use crate::resolver::{StrategyError, ThumbnailStrategy};

#[derive(Debug, Clone)]
enum Behavior {
    Succeed(String),
    Fail,
    Panic,
}

/// Strategy with a fixed outcome and a call counter.
///
/// Clones share the counter, so a clone can be boxed into a resolver while
/// the original is kept for assertions.
#[derive(Debug, Clone)]
pub struct MockStrategy {
    name: &'static str,
    behavior: Behavior,
    calls: Arc<AtomicUsize>,
}

impl MockStrategy {
    fn with_behavior(name: &'static str, behavior: Behavior) -> Self {
        Self {
            name,
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Always returns `url` (which may be empty).
    pub fn succeeding(name: &'static str, url: impl Into<String>) -> Self {
        Self::with_behavior(name, Behavior::Succeed(url.into()))
    }

    /// Always fails with `NoMatch`.
    pub fn failing(name: &'static str) -> Self {
        Self::with_behavior(name, Behavior::Fail)
    }

    /// Panics on every attempt.
    pub fn panicking(name: &'static str) -> Self {
        Self::with_behavior(name, Behavior::Panic)
    }

    /// Number of attempts so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ThumbnailStrategy for MockStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn attempt(&self, reel: &ReelReference) -> Result<String, StrategyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Succeed(url) => Ok(url.clone()),
            Behavior::Fail => Err(StrategyError::NoMatch),
            Behavior::Panic => panic!("mock strategy {} panicked on {}", self.name, reel.id()),
        }
    }
}
