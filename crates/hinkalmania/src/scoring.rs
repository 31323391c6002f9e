use crate::catalog::ItemKind;
use crate::config::{
    COMBO_COIN_BONUS, COMBO_COIN_BONUS_EVERY, COMBO_DOUBLE_POINTS_EVERY, COMBO_LIFE_EVERY,
};

/// Rewards for consecutive food catches. A period of 0 disables that bonus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboRules {
    pub coin_bonus_every: u32,
    pub coin_bonus: u32,
    pub life_every: u32,
    pub double_points_every: u32,
}

impl Default for ComboRules {
    fn default() -> Self {
        Self {
            coin_bonus_every: COMBO_COIN_BONUS_EVERY,
            coin_bonus: COMBO_COIN_BONUS,
            life_every: COMBO_LIFE_EVERY,
            double_points_every: COMBO_DOUBLE_POINTS_EVERY,
        }
    }
}

const fn hits(combo: u32, every: u32) -> bool {
    every > 0 && combo > 0 && combo % every == 0
}

/// Bonuses triggered by a single catch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComboBonuses {
    pub coins: u32,
    pub life_restored: bool,
    pub double_points: bool,
}

impl ComboBonuses {
    pub const fn any(&self) -> bool {
        self.coins > 0 || self.life_restored || self.double_points
    }
}

/// What a catch did to the round, as applied (after floors and caps).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatchOutcome {
    pub kind: ItemKind,
    pub points: i64,
    pub coins: i64,
    pub combo: u32,
    pub bonuses: ComboBonuses,
    pub life_lost: bool,
    pub lives_exhausted: bool,
}

/// Running totals of the round in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundScore {
    pub score: u32,
    /// Running coin balance, seeded from the persistent balance
    pub coins: u32,
    pub lives: u32,
    pub max_lives: u32,
    pub combo: u32,
    pub best_combo: u32,
    pub catches: u32,
}

impl RoundScore {
    pub fn new(coins: u32, max_lives: u32) -> Self {
        Self {
            coins,
            lives: max_lives,
            max_lives,
            ..Self::default()
        }
    }

    /// Applies a catch of `kind`. Score and coins never go below zero, lives
    /// stay within `0..=max_lives`.
    pub fn apply(&mut self, kind: ItemKind, rules: &ComboRules) -> CatchOutcome {
        let config = kind.config();
        let (score_before, coins_before) = (self.score, self.coins);
        self.catches += 1;

        let mut bonuses = ComboBonuses::default();
        let mut life_lost = false;

        match kind {
            ItemKind::Trash(_) => {
                self.score = self.score.saturating_add_signed(config.points);
                self.coins = self.coins.saturating_add_signed(config.coins);
                life_lost = self.lives > 0;
                self.lives = self.lives.saturating_sub(1);
                self.combo = 0;
            }
            ItemKind::Food(_) => {
                self.combo += 1;
                self.best_combo = self.best_combo.max(self.combo);

                let mut points = config.points.unsigned_abs();
                if hits(self.combo, rules.double_points_every) {
                    bonuses.double_points = true;
                    points = points.saturating_mul(2);
                }
                if hits(self.combo, rules.coin_bonus_every) {
                    bonuses.coins = rules.coin_bonus;
                }
                if hits(self.combo, rules.life_every) && self.lives < self.max_lives {
                    bonuses.life_restored = true;
                    self.lives += 1;
                }

                self.score = self.score.saturating_add(points);
                self.coins = self
                    .coins
                    .saturating_add(config.coins.unsigned_abs())
                    .saturating_add(bonuses.coins);
            }
        }

        CatchOutcome {
            kind,
            points: i64::from(self.score) - i64::from(score_before),
            coins: i64::from(self.coins) - i64::from(coins_before),
            combo: self.combo,
            bonuses,
            life_lost,
            lives_exhausted: self.lives == 0,
        }
    }
}
