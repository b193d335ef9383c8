//! Battle - the primary public API for playing.
//!
//! Wraps a [`GameSession`] and an [`Oracle`], feeds events to the turn
//! engine, and carries out the commands it returns. Every generator call is
//! bounded by the configured timeout; a call that overruns is treated like
//! any other generator failure.

use crate::config::BattleSettings;
use crate::engine::{self, Command, EngineError, Event, Outcome, Report};
use crate::oracle::{fetch_question, ClaudeOracle, Oracle, OracleConfig, QuestionRequest};
use crate::question::GenerationError;
use crate::score::{calculate_score, Score};
use crate::session::{GameSession, SessionError};
use crate::view::SessionView;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// What happened in response to one player action.
#[derive(Debug, Clone)]
pub struct BattleUpdate {
    /// Things to tell the player, in order.
    pub reports: Vec<Report>,
    /// State after the action, including any newly loaded question.
    pub view: SessionView,
}

/// A single player's battle against the boss.
pub struct Battle {
    session: GameSession,
    oracle: Box<dyn Oracle>,
    timeout: Duration,
}

impl Battle {
    /// Create a battle on the home screen using the given oracle.
    pub fn new(oracle: impl Oracle + 'static, timeout: Duration) -> Self {
        Self {
            session: GameSession::new(Instant::now()),
            oracle: Box::new(oracle),
            timeout,
        }
    }

    /// Create a battle backed by Claude.
    ///
    /// Requires `ANTHROPIC_API_KEY` environment variable to be set. A missing
    /// key is [`SessionError::NoApiKey`]; any other client setup failure is
    /// [`SessionError::Oracle`].
    pub fn from_env(config: OracleConfig) -> Result<Self, SessionError> {
        let timeout = config.timeout;
        let oracle = ClaudeOracle::from_env(config)?;
        Ok(Self::new(oracle, timeout))
    }

    /// Start a battle on `topic` and name the boss.
    pub async fn start(
        &mut self,
        topic: &str,
        settings: BattleSettings,
    ) -> Result<BattleUpdate, SessionError> {
        let outcome = engine::begin(&mut self.session, topic, settings, Instant::now())?;
        Ok(self.finish(outcome).await)
    }

    /// The player picks the option at `index` (0-based).
    pub async fn select(&mut self, index: usize) -> Result<BattleUpdate, EngineError> {
        self.dispatch(Event::SelectAnswer(index)).await
    }

    /// Re-check the question timer.
    pub async fn tick(&mut self) -> Result<BattleUpdate, EngineError> {
        self.dispatch(Event::Tick).await
    }

    /// Return to the home screen after a battle has ended.
    pub fn return_home(&mut self) -> bool {
        self.session.return_home()
    }

    /// Snapshot of the current state.
    pub fn view(&self) -> SessionView {
        SessionView::capture(&self.session, Instant::now())
    }

    /// Final score, once the battle is over.
    pub fn score(&self) -> Option<Score> {
        calculate_score(&self.session)
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Mutable access for home-screen edits such as the topic.
    ///
    /// Use with caution - direct modifications bypass the turn engine.
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    async fn dispatch(&mut self, event: Event) -> Result<BattleUpdate, EngineError> {
        let outcome = engine::handle_event(&mut self.session, event, Instant::now())?;
        Ok(self.finish(outcome).await)
    }

    async fn finish(&mut self, outcome: Outcome) -> BattleUpdate {
        for command in outcome.commands {
            self.execute(command).await;
        }
        BattleUpdate {
            reports: outcome.reports,
            view: self.view(),
        }
    }

    async fn execute(&mut self, command: Command) {
        match command {
            Command::RequestQuestion { topic, exclude } => {
                let request = {
                    let mut rng = rand::thread_rng();
                    QuestionRequest::new(topic, exclude, &mut rng)
                };
                tracing::debug!(
                    topic = %request.topic,
                    position = request.desired_position,
                    "requesting question"
                );
                let result =
                    bounded(self.timeout, fetch_question(self.oracle.as_ref(), &request)).await;
                engine::deliver_question(&mut self.session, result, Instant::now());
            }
            Command::NameBoss { topic } => {
                let result = bounded(self.timeout, self.oracle.generate_boss_name(&topic)).await;
                engine::apply_boss_name(&mut self.session, result, Instant::now());
            }
        }
    }
}

async fn bounded<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, GenerationError>>,
) -> Result<T, GenerationError> {
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or(Err(GenerationError::Timeout(limit)))
}
