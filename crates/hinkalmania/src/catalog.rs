//! Static catalogs: food, trash and skins with their display and economic
//! attributes. Every lookup is an exhaustive match.

use bevy::color::Srgba;
use bevy::color::palettes::css;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Display and economic attributes of a falling item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemConfig {
    pub emoji: &'static str,
    pub points: i32,
    pub coins: i32,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FoodKind {
    #[default]
    Hinkali,
    Harcho,
    Adjarski,
    Megruli,
    Lobio,
    Satsivi,
    Chakapuli,
}

impl FoodKind {
    pub const fn config(self) -> ItemConfig {
        let (emoji, points, coins) = match self {
            Self::Hinkali => ("🥟", 10, 2),
            Self::Harcho => ("🍲", 20, 4),
            Self::Adjarski => ("🥧", 25, 5),
            Self::Megruli => ("🍞", 35, 7),
            Self::Lobio => ("🫘", 40, 8),
            Self::Satsivi => ("🦃", 45, 9),
            Self::Chakapuli => ("🍖", 50, 10),
        };
        ItemConfig {
            emoji,
            points,
            coins,
        }
    }

    pub const fn price(self) -> u32 {
        match self {
            Self::Hinkali => 0,
            Self::Harcho => 100,
            Self::Adjarski => 250,
            Self::Megruli => 400,
            Self::Lobio => 600,
            Self::Satsivi => 800,
            Self::Chakapuli => 1200,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Hinkali => "Hinkali",
            Self::Harcho => "Harcho",
            Self::Adjarski => "Adjarian khachapuri",
            Self::Megruli => "Megrelian khachapuri",
            Self::Lobio => "Lobio",
            Self::Satsivi => "Satsivi",
            Self::Chakapuli => "Chakapuli",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Hinkali => "Classic Georgian dumplings with meat",
            Self::Harcho => "Georgian beef soup",
            Self::Adjarski => "Boat-shaped khachapuri with an egg",
            Self::Megruli => "Khachapuri with a double layer of cheese",
            Self::Lobio => "Georgian bean stew",
            Self::Satsivi => "Turkey in walnut sauce",
            Self::Chakapuli => "Lamb stewed with herbs",
        }
    }
}

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
pub enum TrashKind {
    Pasta,
    Sushi,
    Shawarma,
    Burger,
}

impl TrashKind {
    pub const fn config(self) -> ItemConfig {
        let (emoji, points, coins) = match self {
            Self::Pasta => ("🍝", -15, -2),
            Self::Sushi => ("🍣", -20, -3),
            Self::Shawarma => ("🌯", -10, -1),
            Self::Burger => ("🍔", -25, -4),
        };
        ItemConfig {
            emoji,
            points,
            coins,
        }
    }
}

/// What a falling item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Food(FoodKind),
    Trash(TrashKind),
}

impl ItemKind {
    pub const fn config(self) -> ItemConfig {
        match self {
            Self::Food(food) => food.config(),
            Self::Trash(trash) => trash.config(),
        }
    }

    pub const fn is_trash(self) -> bool {
        matches!(self, Self::Trash(_))
    }

    /// Tint used by the presentation layer behind the emoji.
    pub const fn color(self) -> Srgba {
        match self {
            Self::Food(_) => css::WHITE,
            Self::Trash(_) => css::ORANGE,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SkinId {
    #[default]
    Default,
    Chef,
    Warrior,
    Elder,
    Dancer,
    Hunter,
    Shepherd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkinConfig {
    pub emoji: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: u32,
}

impl SkinId {
    pub const fn config(self) -> SkinConfig {
        let (emoji, name, description, price) = match self {
            Self::Default => (
                "🚶",
                "Classic highlander",
                "Traditional look with a papakha",
                0,
            ),
            Self::Chef => ("👨‍🍳", "Highland chef", "Wears a chef's hat", 200),
            Self::Warrior => ("⚔️", "Highland warrior", "Sabre and dagger", 500),
            Self::Elder => ("👴", "Village elder", "A long white beard", 1000),
            Self::Dancer => ("💃", "Lezginka dancer", "Dressed for the dance", 1500),
            Self::Hunter => ("🏹", "Hunter", "Never misses", 2500),
            Self::Shepherd => ("🐑", "Shepherd", "Walks with a staff", 3500),
        };
        SkinConfig {
            emoji,
            name,
            description,
            price,
        }
    }
}

pub fn all_foods() -> impl Iterator<Item = FoodKind> {
    FoodKind::iter()
}

pub fn all_trash() -> impl Iterator<Item = TrashKind> {
    TrashKind::iter()
}

pub fn all_skins() -> impl Iterator<Item = SkinId> {
    SkinId::iter()
}
