//! Error types for round operations.

use thiserror::Error;

use crate::records::{HandId, PlayerHandId, RoundId};

/// Errors that can occur while drawing from a shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShoeError {
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    Empty,
}

/// Errors reported by a record store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Why an action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidAction {
    /// The wager is zero or negative.
    #[error("wager must be positive")]
    NonPositiveWager,
    /// The stake or its payout would not fit in the bankroll's integer range.
    #[error("wager too large for the bankroll")]
    WagerTooLarge,
    /// A hand is still in play.
    #[error("a hand is already in play")]
    HandInPlay,
    /// No hand is in play.
    #[error("no hand is in play")]
    NoHandInPlay,
    /// The player hand is not the one eligible for action.
    #[error("player hand is not eligible for action")]
    NotYourTurn,
    /// Double down requires exactly two cards.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Split requires a pair of equal blackjack value.
    #[error("cannot split this hand")]
    CannotSplit,
}

/// Errors that can occur while running a round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    /// Round not found.
    #[error("round {0} not found")]
    RoundNotFound(RoundId),
    /// Hand not found for the round.
    #[error("hand {0} not found")]
    HandNotFound(HandId),
    /// Player hand not found on the active hand.
    #[error("player hand {0} not found")]
    PlayerHandNotFound(PlayerHandId),
    /// The player or dealer cards of a hand are missing.
    #[error("card groups for hand {0} not found")]
    CardGroupsNotFound(HandId),
    /// The action is not valid in the current state.
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    ShoeEmpty,
    /// The record store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RoundError {
    /// Returns whether the error points at inconsistent stored records.
    #[must_use]
    pub const fn is_consistency_violation(&self) -> bool {
        matches!(
            self,
            Self::HandNotFound(_) | Self::PlayerHandNotFound(_) | Self::CardGroupsNotFound(_)
        )
    }
}

impl From<ShoeError> for RoundError {
    fn from(err: ShoeError) -> Self {
        match err {
            ShoeError::Empty => Self::ShoeEmpty,
        }
    }
}

/// Errors reported by a strategy evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvisorError {
    /// The evaluator could not be reached.
    #[error("strategy evaluator unavailable: {0}")]
    Unavailable(String),
    /// The evaluator has no entry for the given cards.
    #[error("no recommendation for player total {player_total} against {dealer_up}")]
    NoRecommendation {
        /// Player hand total.
        player_total: u8,
        /// Dealer up-card value, capped at 10.
        dealer_up: u8,
    },
}
