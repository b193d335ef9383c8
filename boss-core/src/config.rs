//! Battle settings chosen on the home screen.

use std::ops::RangeInclusive;
use std::time::Duration;

/// Hit points both combatants start a battle with.
pub const MAX_HP: u32 = 100;

/// Allowed seconds per question.
pub const TIME_LIMIT_RANGE: RangeInclusive<u64> = 5..=30;

/// Allowed damage per hit, for either side.
pub const DAMAGE_RANGE: RangeInclusive<u32> = 1..=50;

const DEFAULT_TIME_LIMIT_SECS: u64 = 10;
const DEFAULT_PLAYER_DAMAGE: u32 = 10;
const DEFAULT_BOSS_DAMAGE: u32 = 15;

/// Per-battle tuning, fixed once the battle starts.
///
/// Builder methods clamp their input into the allowed range, the same way a
/// slider would.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleSettings {
    /// Time the player has to answer each question.
    pub time_limit: Duration,
    /// Damage dealt to the boss on a correct answer.
    pub player_damage: u32,
    /// Damage dealt to the player on a wrong answer or timeout.
    pub boss_damage: u32,
}

impl Default for BattleSettings {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(DEFAULT_TIME_LIMIT_SECS),
            player_damage: DEFAULT_PLAYER_DAMAGE,
            boss_damage: DEFAULT_BOSS_DAMAGE,
        }
    }
}

impl BattleSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set seconds per question.
    pub fn with_time_limit_secs(mut self, secs: u64) -> Self {
        let secs = secs.clamp(*TIME_LIMIT_RANGE.start(), *TIME_LIMIT_RANGE.end());
        self.time_limit = Duration::from_secs(secs);
        self
    }

    /// Set the damage a correct answer deals to the boss.
    pub fn with_player_damage(mut self, damage: u32) -> Self {
        self.player_damage = clamp_damage(damage);
        self
    }

    /// Set the damage the boss deals on a miss.
    pub fn with_boss_damage(mut self, damage: u32) -> Self {
        self.boss_damage = clamp_damage(damage);
        self
    }
}

fn clamp_damage(damage: u32) -> u32 {
    damage.clamp(*DAMAGE_RANGE.start(), *DAMAGE_RANGE.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = BattleSettings::default();
        assert_eq!(settings.time_limit, Duration::from_secs(10));
        assert_eq!(settings.player_damage, 10);
        assert_eq!(settings.boss_damage, 15);
    }

    #[test]
    fn test_builder_clamps_to_ranges() {
        let settings = BattleSettings::new()
            .with_time_limit_secs(2)
            .with_player_damage(0)
            .with_boss_damage(500);

        assert_eq!(settings.time_limit, Duration::from_secs(5));
        assert_eq!(settings.player_damage, 1);
        assert_eq!(settings.boss_damage, 50);
    }

    #[test]
    fn test_builder_keeps_in_range_values() {
        let settings = BattleSettings::new()
            .with_time_limit_secs(30)
            .with_player_damage(25)
            .with_boss_damage(1);

        assert_eq!(settings.time_limit, Duration::from_secs(30));
        assert_eq!(settings.player_damage, 25);
        assert_eq!(settings.boss_damage, 1);
    }
}
