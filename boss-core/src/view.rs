//! Read-only snapshot handed to the presentation layer.

use crate::config::MAX_HP;
use crate::score::{calculate_score, Score};
use crate::session::{GameSession, Page, Phase};
use serde::Serialize;
use tokio::time::Instant;

/// Everything a frontend needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub page: Page,
    pub phase: Phase,
    pub player_hp: u32,
    pub boss_hp: u32,
    pub max_hp: u32,
    pub remaining_secs: u64,
    pub time_limit_secs: u64,
    pub topic: String,
    pub boss_name: String,
    /// The boss's latest line, undistorted.
    pub boss_text: String,
    pub options: Vec<String>,
    pub question_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
}

impl SessionView {
    pub fn capture(session: &GameSession, now: Instant) -> Self {
        let remaining_secs = match (session.page(), session.phase()) {
            (Page::Game, Phase::AwaitingAnswer) => session.remaining_time(now).as_secs(),
            _ => 0,
        };

        Self {
            page: session.page(),
            phase: session.phase(),
            player_hp: session.player_hp(),
            boss_hp: session.boss_hp(),
            max_hp: MAX_HP,
            remaining_secs,
            time_limit_secs: session.settings().time_limit.as_secs(),
            topic: session.topic().to_string(),
            boss_name: session.boss_name().to_string(),
            boss_text: session.boss_text().to_string(),
            options: session.options().iter().map(|o| o.label.clone()).collect(),
            question_id: session.question_id(),
            score: calculate_score(session),
        }
    }

    /// Whether the player can pick an option right now.
    pub fn accepts_answers(&self) -> bool {
        self.page == Page::Game && self.phase == Phase::AwaitingAnswer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleSettings;
    use std::time::Duration;

    #[test]
    fn test_capture_mid_battle() {
        let now = Instant::now();
        let mut session = GameSession::new(now);
        session
            .start_battle("Poetry", BattleSettings::new().with_time_limit_secs(12), now)
            .unwrap();

        let view = SessionView::capture(&session, now + Duration::from_secs(5));

        assert!(view.accepts_answers());
        assert_eq!(view.remaining_secs, 7);
        assert_eq!(view.time_limit_secs, 12);
        assert_eq!(view.options.len(), 4);
        assert_eq!(view.topic, "Poetry");
        assert!(view.score.is_none());
    }

    #[test]
    fn test_view_serializes_with_snake_case_enums() {
        let now = Instant::now();
        let session = GameSession::new(now);
        let json = serde_json::to_value(SessionView::capture(&session, now)).unwrap();

        assert_eq!(json["page"], "home");
        assert_eq!(json["phase"], "awaiting_answer");
        assert_eq!(json["max_hp"], 100);
        assert!(json.get("score").is_none());
    }
}
