//! Settlement result types.

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::records::PlayerHandId;

/// Result of a single player hand after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandOutcome {
    /// Player wins (dealer busts or player has higher value).
    Win,
    /// Player loses (player busts or dealer has higher value).
    Lose,
    /// Push (tie).
    Push,
    /// Player has a natural blackjack.
    Blackjack,
}

impl HandOutcome {
    /// Returns whether the outcome paid the player anything beyond the wager.
    #[must_use]
    pub const fn is_player_win(self) -> bool {
        matches!(self, Self::Win | Self::Blackjack)
    }
}

/// A settled player hand as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandResult {
    /// The settled player hand.
    pub player_hand_id: PlayerHandId,
    /// The player's cards.
    pub cards: Vec<Card>,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// The wager riding on the hand, doubled if the player doubled down.
    pub wager: i64,
    /// Net bankroll change.
    pub stack_diff: i64,
    /// The player's hand value.
    pub player_value: u8,
    /// The dealer's hand value.
    pub dealer_value: u8,
}
