//! Hand lifecycle and action types.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::records::PlayerHandId;

/// Where a hand is in its lifecycle.
///
/// `AwaitingWager → Dealt → PlayerTurn(id) → DealerTurn → Settled`. Only the
/// `Dealt`, `PlayerTurn` and `DealerTurn` phases count as active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HandPhase {
    /// No hand in play; the round waits for a wager.
    AwaitingWager,
    /// Cards are on the table and nobody has acted yet.
    Dealt,
    /// The given player hand is eligible for action.
    PlayerTurn(PlayerHandId),
    /// All player hands are finished and the dealer plays out.
    DealerTurn,
    /// Every player hand carries an outcome.
    Settled,
}

impl HandPhase {
    /// Returns whether a hand in this phase is still in play.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Dealt | Self::PlayerTurn(_) | Self::DealerTurn)
    }

    /// Returns the player hand eligible for action, if any.
    #[must_use]
    pub const fn eligible(self) -> Option<PlayerHandId> {
        match self {
            Self::PlayerTurn(id) => Some(id),
            _ => None,
        }
    }
}

/// An action the player takes on an eligible hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayerAction {
    /// Draw a card.
    Hit,
    /// Keep the current hand.
    Stand,
    /// Double the wager, draw exactly one card and stand.
    Double,
    /// Split a pair into two hands.
    Split,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hit => "hit",
            Self::Stand => "stand",
            Self::Double => "double",
            Self::Split => "split",
        })
    }
}

/// An action offered to the client next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Start a new hand.
    PlaceWager,
    /// Draw a card.
    Hit,
    /// Keep the current hand.
    Stand,
    /// Double down.
    Double,
    /// Split the pair.
    Split,
}

impl From<PlayerAction> for Action {
    fn from(action: PlayerAction) -> Self {
        match action {
            PlayerAction::Hit => Self::Hit,
            PlayerAction::Stand => Self::Stand,
            PlayerAction::Double => Self::Double,
            PlayerAction::Split => Self::Split,
        }
    }
}
