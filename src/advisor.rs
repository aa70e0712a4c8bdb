//! Strategy suggestions for AI-assisted rounds.
//!
//! The evaluator behind a suggestion is a collaborator: anything that
//! implements [`StrategyEvaluator`]. [`suggest`] adapts round state to its
//! input and never lets an evaluator failure reach the round.

use crate::card::Card;
use crate::error::AdvisorError;
use crate::round::PlayerAction;

/// How detailed the recommended strategy is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Complexity {
    /// Hit or stand only.
    Simple,
    /// Full basic strategy including doubles and splits.
    #[default]
    Advanced,
}

/// The house rules an evaluator plays against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyRules {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Whether the dealer stands on soft 17.
    pub stand_on_soft_17: bool,
    /// Lowest total that may be doubled.
    pub double_min: u8,
    /// Highest total that may be doubled.
    pub double_max: u8,
    /// Whether doubling is allowed after a split.
    pub double_after_split: bool,
    /// Whether split aces may be split again.
    pub resplit_aces: bool,
    /// Whether insurance is offered.
    pub insurance: bool,
    /// Whether surrender is offered.
    pub surrender: bool,
    /// Strategy complexity.
    pub complexity: Complexity,
}

impl Default for StrategyRules {
    fn default() -> Self {
        Self {
            decks: 6,
            stand_on_soft_17: true,
            double_min: 0,
            double_max: 21,
            double_after_split: true,
            resplit_aces: true,
            insurance: false,
            surrender: false,
            complexity: Complexity::Advanced,
        }
    }
}

/// A basic-strategy evaluator.
///
/// Card values are capped at 10 with an ace passed as 1.
pub trait StrategyEvaluator {
    /// Recommends an action for `player_cards` against `dealer_up`.
    ///
    /// # Errors
    ///
    /// Returns an error if the evaluator is unavailable or has no entry for
    /// the given cards.
    fn recommend(
        &self,
        player_cards: &[u8],
        dealer_up: u8,
        rules: &StrategyRules,
    ) -> Result<PlayerAction, AdvisorError>;
}

/// Asks `evaluator` what to do with `player_cards` against `dealer_up`.
///
/// Returns `None` if the evaluator fails; the failure is logged and otherwise
/// ignored.
pub fn suggest<E: StrategyEvaluator + ?Sized>(
    evaluator: &E,
    rules: &StrategyRules,
    player_cards: &[Card],
    dealer_up: &Card,
) -> Option<PlayerAction> {
    let player: Vec<u8> = player_cards.iter().map(Card::capped_value).collect();
    let dealer = dealer_up.capped_value();

    match evaluator.recommend(&player, dealer, rules) {
        Ok(action) => Some(action),
        Err(err) => {
            tracing::warn!(error = %err, ?player, dealer, "strategy evaluator failed");
            None
        }
    }
}

/// What a strategy table cell says before availability is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Play {
    Hit,
    Stand,
    /// Double if allowed, otherwise hit.
    DoubleOrHit,
    /// Double if allowed, otherwise stand.
    DoubleOrStand,
}

/// Table-driven basic strategy for a multi-deck shoe with doubling after split.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicStrategy;

impl BasicStrategy {
    /// Creates the evaluator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn pair(card: u8, dealer: u8, rules: &StrategyRules) -> bool {
        match card {
            1 => true,
            2 | 3 => match dealer {
                2 | 3 => rules.double_after_split,
                4..=7 => true,
                _ => false,
            },
            4 => rules.double_after_split && matches!(dealer, 5 | 6),
            6 => match dealer {
                2 => rules.double_after_split,
                3..=6 => true,
                _ => false,
            },
            7 => (2..=7).contains(&dealer),
            8 => true,
            9 => matches!(dealer, 2..=6 | 8 | 9),
            _ => false,
        }
    }

    fn soft(total: u8, dealer: u8, rules: &StrategyRules) -> Play {
        match total {
            13 | 14 => match dealer {
                5 | 6 => Play::DoubleOrHit,
                _ => Play::Hit,
            },
            15 | 16 => match dealer {
                4..=6 => Play::DoubleOrHit,
                _ => Play::Hit,
            },
            17 => match dealer {
                3..=6 => Play::DoubleOrHit,
                _ => Play::Hit,
            },
            18 => match dealer {
                2 if !rules.stand_on_soft_17 => Play::DoubleOrStand,
                3..=6 => Play::DoubleOrStand,
                2 | 7 | 8 => Play::Stand,
                _ => Play::Hit,
            },
            19 => match dealer {
                6 if !rules.stand_on_soft_17 => Play::DoubleOrStand,
                _ => Play::Stand,
            },
            20 | 21 => Play::Stand,
            _ => Play::Hit,
        }
    }

    fn hard(total: u8, dealer: u8, rules: &StrategyRules) -> Play {
        match total {
            9 => match dealer {
                3..=6 => Play::DoubleOrHit,
                _ => Play::Hit,
            },
            10 => match dealer {
                2..=9 => Play::DoubleOrHit,
                _ => Play::Hit,
            },
            11 => match dealer {
                1 if rules.stand_on_soft_17 => Play::Hit,
                _ => Play::DoubleOrHit,
            },
            12 => match dealer {
                4..=6 => Play::Stand,
                _ => Play::Hit,
            },
            13..=16 => match dealer {
                2..=6 => Play::Stand,
                _ => Play::Hit,
            },
            17.. => Play::Stand,
            _ => Play::Hit,
        }
    }
}

impl StrategyEvaluator for BasicStrategy {
    fn recommend(
        &self,
        player_cards: &[u8],
        dealer_up: u8,
        rules: &StrategyRules,
    ) -> Result<PlayerAction, AdvisorError> {
        let sum: u8 = player_cards.iter().sum();
        let has_ace = player_cards.contains(&1);
        let soft = has_ace && sum + 10 <= 21;
        let total = if soft { sum + 10 } else { sum };

        if player_cards.is_empty() || !(1..=10).contains(&dealer_up) {
            return Err(AdvisorError::NoRecommendation {
                player_total: total,
                dealer_up,
            });
        }

        let advanced = rules.complexity == Complexity::Advanced;
        let can_double = advanced
            && player_cards.len() == 2
            && (rules.double_min..=rules.double_max).contains(&total);

        let split = matches!(
            player_cards,
            [first, second] if first == second && Self::pair(*first, dealer_up, rules)
        );
        if advanced && split {
            return Ok(PlayerAction::Split);
        }

        let play = if soft {
            Self::soft(total, dealer_up, rules)
        } else {
            Self::hard(total, dealer_up, rules)
        };

        Ok(match play {
            Play::Hit => PlayerAction::Hit,
            Play::Stand => PlayerAction::Stand,
            Play::DoubleOrHit if can_double => PlayerAction::Double,
            Play::DoubleOrHit => PlayerAction::Hit,
            Play::DoubleOrStand if can_double => PlayerAction::Double,
            Play::DoubleOrStand => PlayerAction::Stand,
        })
    }
}
