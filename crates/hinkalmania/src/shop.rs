//! Spending coins on skins and dishes.

use core::fmt;

use bevy::log::info;
use thiserror::Error;

use crate::catalog::{FoodKind, SkinId, all_foods, all_skins};
use crate::progress::Progress;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShopError {
    #[error("{item} costs {price} coins, only {coins} available")]
    InsufficientCoins {
        item: ShopItem,
        price: u32,
        coins: u32,
    },
    #[error("{0} is already unlocked")]
    AlreadyUnlocked(ShopItem),
    #[error("skin {0} is not unlocked")]
    SkinLocked(SkinId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopItem {
    Skin(SkinId),
    Food(FoodKind),
}

impl fmt::Display for ShopItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skin(skin) => write!(f, "skin {skin}"),
            Self::Food(food) => write!(f, "dish {food}"),
        }
    }
}

impl ShopItem {
    pub const fn price(self) -> u32 {
        match self {
            Self::Skin(skin) => skin.config().price,
            Self::Food(food) => food.price(),
        }
    }

    pub fn is_unlocked(self, progress: &Progress) -> bool {
        match self {
            Self::Skin(skin) => progress.unlocked_skins.contains(&skin),
            Self::Food(food) => progress.unlocked_foods.contains(&food),
        }
    }
}

/// One line of the shop as the player sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopEntry {
    pub item: ShopItem,
    pub price: u32,
    pub unlocked: bool,
    pub selected: bool,
    pub affordable: bool,
}

/// Every skin, then every dish, with their state for `progress`.
pub fn catalog(progress: &Progress) -> Vec<ShopEntry> {
    all_skins()
        .map(ShopItem::Skin)
        .chain(all_foods().map(ShopItem::Food))
        .map(|item| ShopEntry {
            item,
            price: item.price(),
            unlocked: item.is_unlocked(progress),
            selected: item == ShopItem::Skin(progress.current_skin),
            affordable: progress.coins >= item.price(),
        })
        .collect()
}

/// Buys `item`, deducting its price. A bought skin is selected right away.
/// On error `progress` is left untouched.
pub fn purchase(progress: &mut Progress, item: ShopItem) -> Result<(), ShopError> {
    if item.is_unlocked(progress) {
        return Err(ShopError::AlreadyUnlocked(item));
    }
    let price = item.price();
    if progress.coins < price {
        return Err(ShopError::InsufficientCoins {
            item,
            price,
            coins: progress.coins,
        });
    }

    progress.coins -= price;
    match item {
        ShopItem::Skin(skin) => {
            progress.unlocked_skins.insert(skin);
            progress.current_skin = skin;
        }
        ShopItem::Food(food) => {
            progress.unlocked_foods.insert(food);
        }
    }
    info!("Bought {item} for {price} coins, {} left", progress.coins);
    Ok(())
}

pub fn select_skin(progress: &mut Progress, skin: SkinId) -> Result<(), ShopError> {
    if !progress.unlocked_skins.contains(&skin) {
        return Err(ShopError::SkinLocked(skin));
    }
    progress.current_skin = skin;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buying_a_skin_deducts_and_selects_it() {
        let mut progress = Progress {
            coins: 250,
            ..Progress::default()
        };

        assert_eq!(
            purchase(&mut progress, ShopItem::Skin(SkinId::Chef)),
            Ok(()),
            "affordable skin"
        );
        assert_eq!(progress.coins, 50, "price deducted");
        assert!(progress.unlocked_skins.contains(&SkinId::Chef), "unlocked");
        assert_eq!(progress.current_skin, SkinId::Chef, "selected on purchase");
    }

    #[test]
    fn buying_a_dish_adds_it_to_the_spawn_pool() {
        let mut progress = Progress {
            coins: 300,
            ..Progress::default()
        };

        assert_eq!(
            purchase(&mut progress, ShopItem::Food(FoodKind::Adjarski)),
            Ok(()),
            "affordable dish"
        );
        assert_eq!(progress.coins, 50, "price deducted");
        assert!(
            progress.unlocked_foods.contains(&FoodKind::Adjarski),
            "dish unlocked"
        );
        assert_eq!(progress.current_skin, SkinId::Default, "skin untouched");
    }

    #[test]
    fn insufficient_coins_change_nothing() {
        let mut progress = Progress::default();
        let before = progress.clone();

        assert_eq!(
            purchase(&mut progress, ShopItem::Skin(SkinId::Shepherd)),
            Err(ShopError::InsufficientCoins {
                item: ShopItem::Skin(SkinId::Shepherd),
                price: 3500,
                coins: 150,
            }),
            "too expensive"
        );
        assert_eq!(progress, before, "no state change");
    }

    #[test]
    fn owned_items_cannot_be_bought_twice() {
        let mut progress = Progress::default();
        assert_eq!(
            purchase(&mut progress, ShopItem::Food(FoodKind::Harcho)),
            Err(ShopError::AlreadyUnlocked(ShopItem::Food(FoodKind::Harcho))),
            "harcho is a starting dish"
        );
        assert_eq!(progress.coins, 150, "nothing spent");
    }

    #[test]
    fn locked_skins_cannot_be_selected() {
        let mut progress = Progress::default();
        assert_eq!(
            select_skin(&mut progress, SkinId::Hunter),
            Err(ShopError::SkinLocked(SkinId::Hunter)),
            "hunter is locked"
        );
        assert_eq!(progress.current_skin, SkinId::Default, "selection kept");

        progress.unlocked_skins.insert(SkinId::Hunter);
        assert_eq!(
            select_skin(&mut progress, SkinId::Hunter),
            Ok(()),
            "unlocked now"
        );
        assert_eq!(progress.current_skin, SkinId::Hunter, "selected");
    }

    #[test]
    fn catalog_reflects_the_progress() {
        let entries = catalog(&Progress::default());

        assert_eq!(entries.len(), 14, "seven skins and seven dishes");
        let selected: Vec<&ShopEntry> = entries.iter().filter(|entry| entry.selected).collect();
        assert_eq!(selected.len(), 1, "exactly one selected skin");
        assert!(
            entries
                .iter()
                .any(|entry| entry.item == ShopItem::Food(FoodKind::Harcho) && entry.unlocked),
            "starting dish shown as unlocked"
        );
        assert!(
            entries
                .iter()
                .any(|entry| entry.item == ShopItem::Skin(SkinId::Chef) && !entry.affordable),
            "chef is out of reach with 150 coins"
        );
    }
}
