// SPDX-FileCopyrightText: 2026 Adpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock oracle with scripted outcomes for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use adpilot_core::{AdpilotError, Oracle};

/// One scripted oracle outcome.
pub enum MockReply {
    Text(String),
    RateLimited,
    Error(String),
}

/// A mock oracle that pops replies from a FIFO queue and records the
/// prompts it received. When the queue is empty, an empty JSON object is
/// returned.
pub struct MockOracle {
    replies: Mutex<VecDeque<MockReply>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockOracle {
    pub fn new() -> Arc<Self> {
        Self::with_replies(Vec::new())
    }

    pub fn with_replies(replies: Vec<MockReply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::from(replies)),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    /// Number of generate calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// All prompts received, in order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl Oracle for MockOracle {
    async fn generate(&self, prompt: &str) -> Result<String, AdpilotError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().await.push(prompt.to_string());

        match self.replies.lock().await.pop_front() {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::RateLimited) => Err(AdpilotError::RateLimited { models_tried: 1 }),
            Some(MockReply::Error(message)) => Err(AdpilotError::Internal(message)),
            None => Ok("{}".to_string()),
        }
    }
}
