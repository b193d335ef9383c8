//! Final score for a finished battle.

use crate::config::MAX_HP;
use crate::session::{GameSession, Page};
use serde::Serialize;

/// How the battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// The result shown on the end screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    pub outcome: BattleOutcome,
    /// Remaining player HP, 0 to [`MAX_HP`].
    pub value: u32,
    pub max: u32,
}

impl Score {
    /// Closing line for the end screen.
    pub fn epilogue(&self, boss_name: &str, topic: &str) -> String {
        match self.outcome {
            BattleOutcome::Victory => format!(
                "You made {boss_name} kneel in utter failure, crowning you the champion of {topic}."
            ),
            BattleOutcome::Defeat => format!(
                "{boss_name} walks away, knowing they truly are the supreme ruler of {topic}."
            ),
        }
    }
}

/// Score a session. `None` while the battle has not ended.
///
/// The score is the player's remaining HP; nothing else counts.
pub fn calculate_score(session: &GameSession) -> Option<Score> {
    let outcome = match session.page() {
        Page::EndVictory => BattleOutcome::Victory,
        Page::EndFail => BattleOutcome::Defeat,
        Page::Home | Page::Game => return None,
    };

    Some(Score {
        outcome,
        value: session.player_hp(),
        max: MAX_HP,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleSettings;
    use tokio::time::Instant;

    fn ended(page: Page, player_hp: u32) -> GameSession {
        let now = Instant::now();
        let mut session = GameSession::new(now);
        session
            .start_battle("Music", BattleSettings::default(), now)
            .unwrap();
        session.player_hp = player_hp;
        session.page = page;
        session
    }

    #[test]
    fn test_victory_score_is_remaining_hp() {
        let score = calculate_score(&ended(Page::EndVictory, 73)).unwrap();
        assert_eq!(score.outcome, BattleOutcome::Victory);
        assert_eq!(score.value, 73);
        assert_eq!(score.max, 100);
    }

    #[test]
    fn test_defeat_scores_zero() {
        let score = calculate_score(&ended(Page::EndFail, 0)).unwrap();
        assert_eq!(score.outcome, BattleOutcome::Defeat);
        assert_eq!(score.value, 0);
    }

    #[test]
    fn test_no_score_mid_battle() {
        assert!(calculate_score(&ended(Page::Game, 50)).is_none());
        assert!(calculate_score(&GameSession::new(Instant::now())).is_none());
    }

    #[test]
    fn test_epilogue_mentions_boss_and_topic() {
        let score = calculate_score(&ended(Page::EndVictory, 10)).unwrap();
        let line = score.epilogue("Maestro Malus", "Music");
        assert!(line.contains("Maestro Malus"));
        assert!(line.contains("champion of Music"));
    }
}
