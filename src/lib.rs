//! A single-seat blackjack round engine.
//!
//! The crate provides a [`Table`] that runs rounds against a bankroll: it
//! takes wagers, deals from a per-round six-deck shoe, applies hit, stand,
//! double and split, plays the dealer out and settles every hand. Records are
//! read and written through a [`RecordStore`].
//!
//! # Example
//!
//! ```
//! use bjseat::{Action, MemoryStore, PlayerAction, RoundOptions, Table, UserId};
//!
//! let table = Table::new(MemoryStore::new(), RoundOptions::default(), 42);
//! let round = table.start_round(UserId(1), true).unwrap();
//!
//! let mut view = table.place_wager(round.id, 50).unwrap();
//! while let Some(hand) = view.active_player_hand_id {
//!     view = table.act(round.id, hand, PlayerAction::Stand).unwrap();
//! }
//! assert_eq!(view.available_actions, vec![Action::PlaceWager]);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod advisor;
pub mod card;
pub mod error;
pub mod hand;
pub mod options;
pub mod payout;
pub mod records;
pub mod result;
pub mod round;
pub mod shoe;
pub mod stats;
pub mod store;
mod sync;

// Re-export main types
pub use advisor::{BasicStrategy, Complexity, StrategyEvaluator, StrategyRules};
pub use card::{Card, DECK_SIZE, Suit};
pub use error::{AdvisorError, InvalidAction, RoundError, ShoeError, StoreError};
pub use hand::{DealerHand, HandValue, PlayerHand, hand_value};
pub use options::{RoundOptions, RoundingMode};
pub use records::{DealerHandId, Hand, HandId, PlayerHandId, Round, RoundId, UserId};
pub use result::{HandOutcome, HandResult};
pub use round::{
    Action, DealerView, GameStateView, HandPhase, PlayerAction, PlayerHandView, Table,
};
pub use shoe::{SHOE_DECKS, SHOE_SIZE, Shoe};
pub use stats::{GroupStats, RoundStats, RoundSummary};
pub use store::{DealRecords, MemoryStore, RecordStore};
