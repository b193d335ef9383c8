//! The boss's voice: question and name generation.
//!
//! The generator is an opaque collaborator that returns free text. The
//! [`Oracle`] trait is the seam between the game and any model backend;
//! [`ClaudeOracle`] is the production implementation.

mod agent;
pub mod prompts;

pub use agent::{ClaudeOracle, OracleConfig};

use crate::question::{parse_question, GenerationError, Question};
use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;

/// What to ask the generator for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRequest {
    pub topic: String,
    /// Questions already asked this battle.
    pub exclude: Vec<String>,
    /// Where the correct answer should go, 1 to 4. A hint the generator is
    /// free to ignore.
    pub desired_position: u8,
}

impl QuestionRequest {
    /// Build a request with a random position hint.
    pub fn new<R: Rng + ?Sized>(topic: impl Into<String>, exclude: Vec<String>, rng: &mut R) -> Self {
        Self {
            topic: topic.into(),
            exclude,
            desired_position: rng.gen_range(1..=4),
        }
    }
}

/// A source of boss dialogue.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Return raw text expected to hold one question and four options.
    async fn generate_question(&self, request: &QuestionRequest) -> Result<String, GenerationError>;

    /// Return a name for the boss of `topic`.
    async fn generate_boss_name(&self, topic: &str) -> Result<String, GenerationError>;
}

#[async_trait]
impl<T: Oracle + ?Sized> Oracle for Arc<T> {
    async fn generate_question(&self, request: &QuestionRequest) -> Result<String, GenerationError> {
        (**self).generate_question(request).await
    }

    async fn generate_boss_name(&self, topic: &str) -> Result<String, GenerationError> {
        (**self).generate_boss_name(topic).await
    }
}

/// Ask the oracle for a question and parse the reply.
pub async fn fetch_question(
    oracle: &dyn Oracle,
    request: &QuestionRequest,
) -> Result<Question, GenerationError> {
    let raw = oracle.generate_question(request).await?;
    tracing::debug!(raw = %raw, "generator reply");
    parse_question(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockOracle;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_position_hint_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let request = QuestionRequest::new("Math", Vec::new(), &mut rng);
            assert!((1..=4).contains(&request.desired_position));
        }
    }

    #[tokio::test]
    async fn test_fetch_question_parses_reply() {
        let oracle = MockOracle::new().with_question_reply(
            "'Largest planet?','Venus:wrong','Mars:wrong','Jupiter:correct','Saturn:wrong'",
        );
        let request = QuestionRequest {
            topic: "Space".to_string(),
            exclude: Vec::new(),
            desired_position: 3,
        };

        let question = fetch_question(&oracle, &request).await.unwrap();
        assert_eq!(question.text, "Largest planet?");
        assert_eq!(question.correct_position(), Some(2));
    }

    #[tokio::test]
    async fn test_fetch_question_surfaces_parse_errors() {
        let oracle = MockOracle::new().with_question_reply("I refuse to play your game.");
        let request = QuestionRequest {
            topic: "Space".to_string(),
            exclude: Vec::new(),
            desired_position: 1,
        };

        let err = fetch_question(&oracle, &request).await.unwrap_err();
        assert!(matches!(err, GenerationError::SegmentCount { found: 1 }));
    }
}
