//! Turn engine - the battle state machine.
//!
//! The engine is pure: it mutates a [`GameSession`] in response to an
//! [`Event`] and hands back [`Command`]s for the caller to execute. Nothing
//! here talks to the generator or reads the clock.
//!
//! ```text
//! AwaitingAnswer --select--> ProcessingAnswer --resolve--> LoadingNextQuestion
//!       |                                                      |      ^
//!       +-------------------- timeout ------------------------+      |
//!                                                deliver_question ---+--> AwaitingAnswer
//! ```

use crate::config::BattleSettings;
use crate::question::{GenerationError, Question, OPTION_COUNT};
use crate::session::{GameSession, Page, Phase, SessionError};
use thiserror::Error;
use tokio::time::Instant;

/// Errors from feeding the engine an event it cannot accept.
///
/// These indicate a frontend bug, never a game state; the session is left
/// untouched when one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("No battle is in progress")]
    NotInBattle,

    #[error("Not waiting for an answer")]
    NotAwaitingAnswer,

    #[error("Option {index} is out of range (expected 0..4)")]
    OptionOutOfRange { index: usize },
}

/// An external trigger for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The player committed to the option at this index.
    SelectAnswer(usize),
    /// Re-check the timer.
    Tick,
}

/// Side effects the caller must carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask the generator for the next question, then call [`deliver_question`].
    RequestQuestion { topic: String, exclude: Vec<String> },
    /// Ask the generator for a boss name, then call [`apply_boss_name`].
    NameBoss { topic: String },
}

/// Something the player should be told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// Correct answer; the boss took this much damage.
    Correct { damage: u32 },
    /// Wrong answer; the player took this much damage.
    Wrong { damage: u32 },
    /// Time ran out; the player took this much damage.
    TimedOut { damage: u32 },
    /// The boss fell.
    Victory,
    /// The player fell.
    Defeat,
}

/// Result of applying one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub reports: Vec<Report>,
    pub commands: Vec<Command>,
}

impl Outcome {
    /// Whether the battle ended while applying the event.
    pub fn is_terminal(&self) -> bool {
        self.reports
            .iter()
            .any(|r| matches!(r, Report::Victory | Report::Defeat))
    }
}

/// Start a battle and request the boss's name.
pub fn begin(
    session: &mut GameSession,
    topic: &str,
    settings: BattleSettings,
    now: Instant,
) -> Result<Outcome, SessionError> {
    session.start_battle(topic, settings, now)?;
    tracing::debug!(topic = session.topic(), "battle started");

    Ok(Outcome {
        reports: Vec::new(),
        commands: vec![Command::NameBoss {
            topic: session.topic().to_string(),
        }],
    })
}

/// Apply one event to the session.
pub fn handle_event(
    session: &mut GameSession,
    event: Event,
    now: Instant,
) -> Result<Outcome, EngineError> {
    if session.page != Page::Game {
        return match event {
            Event::Tick => Ok(Outcome::default()),
            Event::SelectAnswer(_) => Err(EngineError::NotInBattle),
        };
    }

    if let Event::SelectAnswer(index) = event {
        if index >= OPTION_COUNT {
            return Err(EngineError::OptionOutOfRange { index });
        }
        if session.phase != Phase::AwaitingAnswer {
            return Err(EngineError::NotAwaitingAnswer);
        }
    }

    let mut outcome = Outcome::default();

    // The timer is checked first, so a selection after the deadline is a
    // timeout and the selection is dropped.
    if session.phase == Phase::AwaitingAnswer && session.is_overdue(now) {
        let damage = session.settings.boss_damage;
        session.damage_player(damage);
        session.phase = Phase::LoadingNextQuestion;
        outcome.reports.push(Report::TimedOut { damage });
        tracing::debug!(question_id = session.question_id, "question timed out");
    } else if let Event::SelectAnswer(index) = event {
        if session.phase == Phase::AwaitingAnswer {
            session.selected_answer = Some(index);
            session.phase = Phase::ProcessingAnswer;
        }
    }

    if session.phase == Phase::ProcessingAnswer {
        outcome.reports.push(resolve_answer(session));
    }

    if let Some(report) = check_terminal(session) {
        outcome.reports.push(report);
        return Ok(outcome);
    }

    // A loading phase that already issued its request is waiting on
    // `deliver_question`; only a fresh transition asks again.
    if session.phase == Phase::LoadingNextQuestion && !outcome.reports.is_empty() {
        outcome.commands.push(request_next_question(session));
    }

    Ok(outcome)
}

/// Install the generator's answer as the current question.
///
/// Any failure is replaced with [`Question::fallback`], so the session always
/// ends up awaiting an answer.
pub fn deliver_question(
    session: &mut GameSession,
    result: Result<Question, GenerationError>,
    now: Instant,
) {
    if session.page != Page::Game || session.phase != Phase::LoadingNextQuestion {
        tracing::debug!("ignoring question delivered outside of loading phase");
        return;
    }

    match result {
        Ok(question) => {
            session.chat_history.push(question.text.clone());
            session.present_question(question, now);
        }
        Err(err) => {
            tracing::warn!(error = %err, "question generation failed, using fallback");
            session.present_question(Question::fallback(), now);
        }
    }
}

/// Store the generated boss name, or the templated fallback on failure.
///
/// The name is kept exactly as generated; only a blank reply falls back.
/// The opening question's timer restarts at `now`, once the boss is on
/// screen.
pub fn apply_boss_name(
    session: &mut GameSession,
    result: Result<String, GenerationError>,
    now: Instant,
) {
    let name = match result {
        Ok(name) if !name.trim().is_empty() => name,
        Ok(_) => fallback_boss_name(&session.topic),
        Err(err) => {
            tracing::warn!(error = %err, "boss name generation failed, using fallback");
            fallback_boss_name(&session.topic)
        }
    };
    session.boss_name = name;
    if session.page == Page::Game && session.phase == Phase::AwaitingAnswer {
        session.question_start_time = now;
    }
}

/// The name used when the generator cannot name the boss.
pub fn fallback_boss_name(topic: &str) -> String {
    format!("The Boss of {topic}")
}

fn resolve_answer(session: &mut GameSession) -> Report {
    let verdict = session
        .selected_answer
        .and_then(|i| session.options.get(i))
        .map(|option| option.verdict);

    let report = match verdict {
        Some(v) if v.is_correct() => {
            let damage = session.settings.player_damage;
            session.damage_boss(damage);
            Report::Correct { damage }
        }
        _ => {
            let damage = session.settings.boss_damage;
            session.damage_player(damage);
            Report::Wrong { damage }
        }
    };

    session.selected_answer = None;
    session.phase = Phase::LoadingNextQuestion;
    report
}

fn check_terminal(session: &mut GameSession) -> Option<Report> {
    // Defeat wins a tie.
    if session.player_hp == 0 {
        session.page = Page::EndFail;
        tracing::debug!("player defeated");
        Some(Report::Defeat)
    } else if session.boss_hp == 0 {
        session.page = Page::EndVictory;
        tracing::debug!("boss defeated");
        Some(Report::Victory)
    } else {
        None
    }
}

fn request_next_question(session: &mut GameSession) -> Command {
    session.question_id += 1;
    Command::RequestQuestion {
        topic: session.topic.clone(),
        exclude: session.chat_history.clone(),
    }
}
