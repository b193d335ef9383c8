//! Quiz boss battle engine with AI-generated boss dialogue.
//!
//! This crate provides:
//! - A per-player session record and a process-local session store
//! - A pure turn engine driven by answer and timer events
//! - Question generation through Claude, with fallback on any failure
//! - Cosmetic distortion for boss dialogue
//!
//! # Quick Start
//!
//! ```ignore
//! use boss_core::{Battle, BattleSettings, OracleConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut battle = Battle::from_env(OracleConfig::from_env())?;
//!
//!     let update = battle.start("Physics", BattleSettings::default()).await?;
//!     println!("{}: {}", update.view.boss_name, update.view.boss_text);
//!
//!     let update = battle.select(0).await?;
//!     println!("{:?}", update.reports);
//!     Ok(())
//! }
//! ```

pub mod battle;
pub mod config;
pub mod distortion;
pub mod engine;
pub mod oracle;
pub mod question;
pub mod score;
pub mod session;
pub mod store;
pub mod testing;
pub mod view;

// Primary public API
pub use battle::{Battle, BattleUpdate};
pub use config::{BattleSettings, MAX_HP};
pub use distortion::distort;
pub use engine::{Command, EngineError, Event, Outcome, Report};
pub use oracle::{ClaudeOracle, Oracle, OracleConfig, QuestionRequest};
pub use question::{AnswerOption, GenerationError, Question, Verdict};
pub use score::{calculate_score, BattleOutcome, Score};
pub use session::{GameSession, Page, Phase, SessionError};
pub use store::{SessionId, SessionStore};
pub use testing::MockOracle;
pub use view::SessionView;
