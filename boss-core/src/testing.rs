//! Testing utilities for the boss battle.
//!
//! `MockOracle` stands in for the model so battles can be scripted and
//! replayed without API calls.

use crate::oracle::{Oracle, QuestionRequest};
use crate::question::GenerationError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// A scripted reply from the mock generator.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text.
    Text(String),
    /// Fail as if the service were down.
    Fail(String),
}

/// An oracle that returns scripted replies in order.
///
/// When the question script runs out it keeps returning a fixed, valid
/// question, so long battles never stall.
#[derive(Debug, Default)]
pub struct MockOracle {
    questions: Mutex<VecDeque<MockReply>>,
    boss_name: Option<MockReply>,
    delay: Option<Duration>,
    requests: Mutex<Vec<QuestionRequest>>,
}

/// Reply used once the question script is exhausted. Option 1 is correct.
pub const DEFAULT_MOCK_QUESTION: &str =
    "'What is 1+1?','2:correct','3:wrong','4:wrong','5:wrong'";

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw question reply.
    pub fn with_question_reply(self, text: impl Into<String>) -> Self {
        self.queue(MockReply::Text(text.into()));
        self
    }

    /// Queue a failed question call.
    pub fn with_question_failure(self, message: impl Into<String>) -> Self {
        self.queue(MockReply::Fail(message.into()));
        self
    }

    /// Script the boss name reply.
    pub fn with_boss_name(mut self, name: impl Into<String>) -> Self {
        self.boss_name = Some(MockReply::Text(name.into()));
        self
    }

    /// Make boss naming fail.
    pub fn with_boss_name_failure(mut self) -> Self {
        self.boss_name = Some(MockReply::Fail("naming is down".to_string()));
        self
    }

    /// Sleep this long before every reply.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a reply to the end of the question script.
    pub fn queue(&self, reply: MockReply) {
        lock(&self.questions).push_back(reply);
    }

    /// Every question request received so far.
    pub fn requests(&self) -> Vec<QuestionRequest> {
        lock(&self.requests).clone()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl Oracle for MockOracle {
    async fn generate_question(&self, request: &QuestionRequest) -> Result<String, GenerationError> {
        lock(&self.requests).push(request.clone());
        self.pause().await;

        let reply = lock(&self.questions).pop_front();
        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Fail(message)) => Err(GenerationError::Unavailable(message)),
            None => Ok(DEFAULT_MOCK_QUESTION.to_string()),
        }
    }

    async fn generate_boss_name(&self, topic: &str) -> Result<String, GenerationError> {
        self.pause().await;

        match &self.boss_name {
            Some(MockReply::Text(name)) => Ok(name.clone()),
            Some(MockReply::Fail(message)) => Err(GenerationError::Unavailable(message.clone())),
            None => Ok(format!("Mock Lord of {topic}")),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
