//! Round and hand records as kept by a record store.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::round::HandPhase;
use crate::shoe::Shoe;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

record_id!(
    /// Identifies a [`Round`].
    RoundId
);
record_id!(
    /// Identifies a [`Hand`].
    HandId
);
record_id!(
    /// Identifies a [`PlayerHand`](crate::PlayerHand).
    PlayerHandId
);
record_id!(
    /// Identifies a [`DealerHand`](crate::DealerHand).
    DealerHandId
);
record_id!(
    /// Identifies the user playing a round.
    UserId
);

/// A session of consecutive hands played against one shoe and one bankroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// Record id.
    pub id: RoundId,
    /// The user playing the round.
    pub user_id: UserId,
    /// Cards not yet dealt.
    pub shoe: Shoe,
    /// Current bankroll.
    pub stack: i64,
    /// Whether the round shows strategy suggestions.
    pub ai_assisted: bool,
    /// The most recent hand dealt in this round.
    pub current_hand: Option<HandId>,
    /// Number of hands dealt in this round.
    pub hands_dealt: u32,
}

/// One dealing instance within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    /// Record id.
    pub id: HandId,
    /// The round this hand was dealt in.
    pub round_id: RoundId,
    /// Where the hand is in its lifecycle.
    pub phase: HandPhase,
}

impl Hand {
    /// Returns whether the hand is still in play.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.phase.is_active()
    }
}
