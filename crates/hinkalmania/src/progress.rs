//! The durable player record and every mutation allowed on it outside a round.

use core::str::FromStr;
use std::collections::BTreeSet;

use bevy::prelude::Resource;
use serde::{Deserialize, Deserializer, Serialize};

use crate::achievements::Achievement;
use crate::catalog::{FoodKind, SkinId};
use crate::config::{
    EXPERIENCE_PER_LEVEL, EXPERIENCE_SCORE_DIVISOR, STARTING_COINS, STARTING_LIVES,
};

/// Level reached with `experience` points.
pub const fn level_for(experience: u32) -> u32 {
    experience / EXPERIENCE_PER_LEVEL + 1
}

#[expect(
    clippy::partial_pub_fields,
    reason = "level is derived from experience and must not be set on its own"
)]
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Progress {
    pub coins: u32,
    pub score: u32,
    pub high_score: u32,
    #[serde(deserialize_with = "known_ids")]
    pub unlocked_skins: BTreeSet<SkinId>,
    #[serde(deserialize_with = "known_id_or_default")]
    pub current_skin: SkinId,
    #[serde(deserialize_with = "known_ids")]
    pub unlocked_foods: BTreeSet<FoodKind>,
    /// Lives granted at the start of every round
    pub lives: u32,
    level: u32,
    experience: u32,
    #[serde(deserialize_with = "known_ids")]
    pub achievements: BTreeSet<Achievement>,
    pub total_games_played: u32,
    pub total_score: u32,
    pub sound_enabled: bool,
    pub vibration_enabled: bool,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            coins: STARTING_COINS,
            score: 0,
            high_score: 0,
            unlocked_skins: BTreeSet::from([SkinId::Default]),
            current_skin: SkinId::Default,
            unlocked_foods: BTreeSet::from([FoodKind::Hinkali, FoodKind::Harcho]),
            lives: STARTING_LIVES,
            level: 1,
            experience: 0,
            achievements: BTreeSet::new(),
            total_games_played: 0,
            total_score: 0,
            sound_enabled: true,
            vibration_enabled: true,
        }
    }
}

/// Reads a list of ids, dropping the ones this build doesn't know about.
fn known_ids<'de, D, T>(deserializer: D) -> Result<BTreeSet<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Ord,
{
    let ids = Vec::<String>::deserialize(deserializer)?;
    Ok(ids.iter().filter_map(|id| id.parse().ok()).collect())
}

/// Reads a single id, falling back to the default when it is unknown.
fn known_id_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let id = String::deserialize(deserializer)?;
    Ok(id.parse().unwrap_or_default())
}

/// Result of folding a finished round into the record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundRecord {
    pub new_high_score: bool,
    pub experience_gained: u32,
    pub leveled_up: bool,
    pub new_achievements: Vec<Achievement>,
}

impl Progress {
    pub const fn level(&self) -> u32 {
        self.level
    }

    pub const fn experience(&self) -> u32 {
        self.experience
    }

    pub fn add_experience(&mut self, amount: u32) {
        self.experience = self.experience.saturating_add(amount);
        self.level = level_for(self.experience);
    }

    /// Restores the invariants a stored record might have lost.
    pub fn normalize(&mut self) {
        self.level = level_for(self.experience);
        if self.unlocked_foods.is_empty() {
            self.unlocked_foods.insert(FoodKind::default());
        }
        if !self.unlocked_skins.contains(&self.current_skin) {
            self.current_skin = SkinId::default();
        }
        self.unlocked_skins.insert(self.current_skin);
    }

    /// Folds a finished round in: counters, high score, experience, level and
    /// achievements. Achievement rewards can unlock further achievements, so
    /// evaluation repeats until nothing new is satisfied.
    pub fn record_round(&mut self, score: u32, coins: u32, combo_bonus: u32) -> RoundRecord {
        let level_before = self.level;
        let mut record = RoundRecord {
            new_high_score: score > self.high_score,
            ..RoundRecord::default()
        };

        self.score = score;
        self.high_score = self.high_score.max(score);
        self.coins = coins;
        self.total_games_played = self.total_games_played.saturating_add(1);
        self.total_score = self.total_score.saturating_add(score);

        let experience_before = self.experience;
        self.add_experience((score / EXPERIENCE_SCORE_DIVISOR).saturating_add(combo_bonus));

        loop {
            let unlocked = Achievement::newly_satisfied(self);
            if unlocked.is_empty() {
                break;
            }
            for achievement in unlocked {
                self.achievements.insert(achievement);
                self.add_experience(achievement.experience_reward());
                record.new_achievements.push(achievement);
            }
        }

        record.experience_gained = self.experience - experience_before;
        record.leveled_up = self.level > level_before;
        record
    }

    pub const fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    pub const fn toggle_vibration(&mut self) -> bool {
        self.vibration_enabled = !self.vibration_enabled;
        self.vibration_enabled
    }

    /// Starts over from the default record, keeping the player's settings.
    pub fn reset(&mut self) {
        *self = Self {
            sound_enabled: self.sound_enabled,
            vibration_enabled: self.vibration_enabled,
            ..Self::default()
        };
    }
}
