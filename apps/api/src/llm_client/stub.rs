//! Canned `CompletionClient` for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Barrier;

use super::{CompletionClient, CompletionRequest, LlmError, Sampling};
use crate::conversation::models::Turn;

/// What the stub saw on one call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub turns: Vec<Turn>,
    pub sampling: Sampling,
}

/// Replies from a queue, then repeats `fallback` once the queue is drained.
/// A `None` fallback makes every unscripted call fail with an API error.
pub struct StubCompletionClient {
    queue: Mutex<VecDeque<String>>,
    fallback: Option<String>,
    calls: Mutex<Vec<RecordedCall>>,
    barrier: Option<Arc<Barrier>>,
}

impl StubCompletionClient {
    pub fn replying(text: &str) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: Some(text.to_string()),
            calls: Mutex::new(Vec::new()),
            barrier: None,
        }
    }

    pub fn scripted(replies: &[&str], fallback: &str) -> Self {
        Self {
            queue: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            fallback: Some(fallback.to_string()),
            calls: Mutex::new(Vec::new()),
            barrier: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: None,
            calls: Mutex::new(Vec::new()),
            barrier: None,
        }
    }

    /// Holds every reply until `barrier` releases, so concurrent callers are
    /// all mid-flight at the same time.
    pub fn gated(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for StubCompletionClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: request.system.to_string(),
            turns: request.turns.to_vec(),
            sampling: request.sampling,
        });

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        if let Some(reply) = self.queue.lock().unwrap().pop_front() {
            return Ok(reply);
        }
        self.fallback.clone().ok_or_else(|| LlmError::Api {
            status: 529,
            message: "Overloaded".to_string(),
        })
    }
}
