//! GameSession - the per-player state record.
//!
//! Everything the battle needs lives here and nowhere else. The turn engine
//! mutates it in response to events; the frontend only reads it.

use crate::config::{BattleSettings, MAX_HP};
use crate::question::{AnswerOption, GenerationError, Question, OPTION_COUNT};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

const DEFAULT_TOPIC: &str = "Physics";
const OPENING_LINE: &str = "Throughout heaven and earth, I alone am the honoured one.";

/// Errors from GameSession operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Please enter a topic")]
    EmptyTopic,

    #[error("No API key configured - set ANTHROPIC_API_KEY environment variable")]
    NoApiKey,

    #[error("Could not set up the boss: {0}")]
    Oracle(GenerationError),
}

impl From<GenerationError> for SessionError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Api(claude::Error::NoApiKey) => SessionError::NoApiKey,
            other => SessionError::Oracle(other),
        }
    }
}

/// Which screen the player is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Game,
    EndVictory,
    EndFail,
}

impl Page {
    pub fn is_end(self) -> bool {
        matches!(self, Page::EndVictory | Page::EndFail)
    }
}

/// Where the turn engine is within a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    AwaitingAnswer,
    ProcessingAnswer,
    LoadingNextQuestion,
}

/// Who said a line of dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Boss,
}

/// One entry in the battle conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine {
    pub speaker: Speaker,
    pub text: String,
}

impl DialogueLine {
    pub fn boss(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Boss,
            text: text.into(),
        }
    }
}

/// All mutable game state for one player.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) page: Page,
    pub(crate) phase: Phase,
    pub(crate) player_hp: u32,
    pub(crate) boss_hp: u32,
    pub(crate) topic: String,
    pub(crate) boss_name: String,
    pub(crate) question_id: u64,
    pub(crate) conversation: Vec<DialogueLine>,
    pub(crate) options: [AnswerOption; OPTION_COUNT],
    pub(crate) chat_history: Vec<String>,
    pub(crate) selected_answer: Option<usize>,
    pub(crate) question_start_time: Instant,
    pub(crate) settings: BattleSettings,
}

impl GameSession {
    /// Create a session on the home screen with default values.
    pub fn new(now: Instant) -> Self {
        Self {
            page: Page::Home,
            phase: Phase::AwaitingAnswer,
            player_hp: MAX_HP,
            boss_hp: MAX_HP,
            topic: DEFAULT_TOPIC.to_string(),
            boss_name: String::new(),
            question_id: 0,
            conversation: vec![DialogueLine::boss(OPENING_LINE)],
            options: opening_options(),
            chat_history: Vec::new(),
            selected_answer: None,
            question_start_time: now,
            settings: BattleSettings::default(),
        }
    }

    /// Leave the home screen and start a fresh battle.
    ///
    /// Fixes the topic and settings for the battle and resets every battle
    /// field. An empty topic is refused and the session stays on Home.
    pub fn start_battle(
        &mut self,
        topic: &str,
        settings: BattleSettings,
        now: Instant,
    ) -> Result<(), SessionError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(SessionError::EmptyTopic);
        }

        self.topic = topic.to_string();
        self.settings = settings;
        self.page = Page::Game;
        self.phase = Phase::AwaitingAnswer;
        self.player_hp = MAX_HP;
        self.boss_hp = MAX_HP;
        self.boss_name.clear();
        self.question_id = 0;
        self.conversation = vec![DialogueLine::boss(format!(
            "{OPENING_LINE} Do you really think you can beat me at {topic}?"
        ))];
        self.options = opening_options();
        self.chat_history.clear();
        self.selected_answer = None;
        self.question_start_time = now;
        Ok(())
    }

    /// Go back to the home screen after a battle, keeping topic and settings.
    ///
    /// Does nothing unless the battle has ended.
    pub fn return_home(&mut self) -> bool {
        if !self.page.is_end() {
            return false;
        }
        self.page = Page::Home;
        true
    }

    // ========================================================================
    // Mutations used by the turn engine
    // ========================================================================

    pub(crate) fn damage_player(&mut self, amount: u32) {
        self.player_hp = self.player_hp.saturating_sub(amount).min(MAX_HP);
    }

    pub(crate) fn damage_boss(&mut self, amount: u32) {
        self.boss_hp = self.boss_hp.saturating_sub(amount).min(MAX_HP);
    }

    pub(crate) fn present_question(&mut self, question: Question, now: Instant) {
        self.conversation.push(DialogueLine::boss(question.text));
        self.options = question.options;
        self.question_start_time = now;
        self.phase = Phase::AwaitingAnswer;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_hp(&self) -> u32 {
        self.player_hp
    }

    pub fn boss_hp(&self) -> u32 {
        self.boss_hp
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Set the topic shown on the home screen. Ignored once a battle runs.
    pub fn set_topic(&mut self, topic: impl Into<String>) {
        if self.page != Page::Game {
            self.topic = topic.into();
        }
    }

    pub fn boss_name(&self) -> &str {
        &self.boss_name
    }

    pub fn question_id(&self) -> u64 {
        self.question_id
    }

    pub fn conversation(&self) -> &[DialogueLine] {
        &self.conversation
    }

    /// The line currently displayed: the last thing the boss said.
    pub fn boss_text(&self) -> &str {
        self.conversation
            .last()
            .map(|line| line.text.as_str())
            .unwrap_or_default()
    }

    pub fn options(&self) -> &[AnswerOption; OPTION_COUNT] {
        &self.options
    }

    pub fn chat_history(&self) -> &[String] {
        &self.chat_history
    }

    pub fn selected_answer(&self) -> Option<usize> {
        self.selected_answer
    }

    pub fn settings(&self) -> &BattleSettings {
        &self.settings
    }

    pub fn question_start_time(&self) -> Instant {
        self.question_start_time
    }

    /// Time left on the current question, saturating at zero.
    pub fn remaining_time(&self, now: Instant) -> Duration {
        self.settings
            .time_limit
            .saturating_sub(now.saturating_duration_since(self.question_start_time))
    }

    /// Whether the current question's time limit has been reached.
    pub fn is_overdue(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.question_start_time) >= self.settings.time_limit
    }
}

fn opening_options() -> [AnswerOption; OPTION_COUNT] {
    [
        AnswerOption::correct("Fight Back"),
        AnswerOption::wrong("Run Away"),
        AnswerOption::correct("Get Ready"),
        AnswerOption::correct("Lock in"),
    ]
}
