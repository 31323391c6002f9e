use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::catalog::{all_foods, all_skins};
use crate::progress::Progress;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Achievement {
    FirstGame,
    #[serde(rename = "score_100")]
    #[strum(serialize = "score_100")]
    Score100,
    #[serde(rename = "score_500")]
    #[strum(serialize = "score_500")]
    Score500,
    #[serde(rename = "coins_1000")]
    #[strum(serialize = "coins_1000")]
    Coins1000,
    #[serde(rename = "games_10")]
    #[strum(serialize = "games_10")]
    Games10,
    #[serde(rename = "games_50")]
    #[strum(serialize = "games_50")]
    Games50,
    #[serde(rename = "total_score_1000")]
    #[strum(serialize = "total_score_1000")]
    TotalScore1000,
    #[serde(rename = "level_5")]
    #[strum(serialize = "level_5")]
    Level5,
    #[serde(rename = "level_10")]
    #[strum(serialize = "level_10")]
    Level10,
    AllFoods,
    AllSkins,
}

impl Achievement {
    pub fn is_satisfied(self, progress: &Progress) -> bool {
        match self {
            Self::FirstGame => progress.total_games_played >= 1,
            Self::Score100 => progress.high_score >= 100,
            Self::Score500 => progress.high_score >= 500,
            Self::Coins1000 => progress.coins >= 1000,
            Self::Games10 => progress.total_games_played >= 10,
            Self::Games50 => progress.total_games_played >= 50,
            Self::TotalScore1000 => progress.total_score >= 1000,
            Self::Level5 => progress.level() >= 5,
            Self::Level10 => progress.level() >= 10,
            Self::AllFoods => all_foods().all(|food| progress.unlocked_foods.contains(&food)),
            Self::AllSkins => all_skins().all(|skin| progress.unlocked_skins.contains(&skin)),
        }
    }

    pub const fn experience_reward(self) -> u32 {
        match self {
            Self::FirstGame => 50,
            Self::Score100 | Self::Games10 => 100,
            Self::Coins1000 => 150,
            Self::Score500 | Self::TotalScore1000 => 200,
            Self::Level5 => 250,
            Self::Games50 | Self::AllFoods => 300,
            Self::AllSkins => 400,
            Self::Level10 => 500,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::FirstGame => "First game",
            Self::Score100 => "A hundred points",
            Self::Score500 => "Five hundred points",
            Self::Coins1000 => "Rich",
            Self::Games10 => "Seasoned player",
            Self::Games50 => "Veteran",
            Self::TotalScore1000 => "Score master",
            Self::Level5 => "Fifth level",
            Self::Level10 => "Tenth level",
            Self::AllFoods => "Gourmet",
            Self::AllSkins => "Collector",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::FirstGame => "🎮",
            Self::Score100 => "💯",
            Self::Score500 => "🔥",
            Self::Coins1000 => "💰",
            Self::Games10 => "🎯",
            Self::Games50 => "🏆",
            Self::TotalScore1000 => "📊",
            Self::Level5 => "⭐",
            Self::Level10 => "🌟",
            Self::AllFoods => "🍽️",
            Self::AllSkins => "👕",
        }
    }

    /// Achievements satisfied by `progress` that it doesn't own yet.
    pub fn newly_satisfied(progress: &Progress) -> Vec<Self> {
        Self::iter()
            .filter(|achievement| !progress.achievements.contains(achievement))
            .filter(|achievement| achievement.is_satisfied(progress))
            .collect()
    }
}
