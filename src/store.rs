//! The persistence gateway.
//!
//! The round engine reads and writes records through [`RecordStore`] and
//! owns no storage logic itself. [`MemoryStore`] keeps everything in process
//! and is what the tests and the demo use.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::StoreError;
use crate::hand::{DealerHand, PlayerHand};
use crate::records::{Hand, HandId, Round, RoundId};
use crate::sync::Mutex;

/// The records of one hand, written back together with their round.
#[derive(Debug, Clone, Copy)]
pub struct DealRecords<'a> {
    /// The hand.
    pub hand: &'a Hand,
    /// Every player hand of the hand, in creation order.
    pub player_hands: &'a [PlayerHand],
    /// The dealer hand.
    pub dealer: &'a DealerHand,
}

/// A key-value record store.
///
/// Lookups return `Ok(None)` for missing records; `Err` is reserved for the
/// store itself failing.
pub trait RecordStore {
    /// Allocates a fresh record id, unique across all record kinds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot allocate an id.
    fn next_id(&self) -> Result<u64, StoreError>;

    /// Loads a round.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn round(&self, id: RoundId) -> Result<Option<Round>, StoreError>;

    /// Loads every round.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn rounds(&self) -> Result<Vec<Round>, StoreError>;

    /// Inserts or replaces a round.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn put_round(&self, round: &Round) -> Result<(), StoreError>;

    /// Loads a hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn hand(&self, id: HandId) -> Result<Option<Hand>, StoreError>;

    /// Loads every hand dealt in a round, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn hands(&self, round: RoundId) -> Result<Vec<Hand>, StoreError>;

    /// Inserts or replaces a hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn put_hand(&self, hand: &Hand) -> Result<(), StoreError>;

    /// Loads the player hands of a hand in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn player_hands(&self, hand: HandId) -> Result<Vec<PlayerHand>, StoreError>;

    /// Inserts or replaces a player hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn put_player_hand(&self, player_hand: &PlayerHand) -> Result<(), StoreError>;

    /// Loads the dealer hand of a hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn dealer_hand(&self, hand: HandId) -> Result<Option<DealerHand>, StoreError>;

    /// Inserts or replaces a dealer hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn put_dealer_hand(&self, dealer_hand: &DealerHand) -> Result<(), StoreError>;

    /// Writes a round and the records of its current hand as one unit.
    ///
    /// Either every record is written or none is. The player hands replace
    /// whatever the hand held before.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails; nothing has been written then.
    fn commit(&self, round: &Round, deal: Option<DealRecords<'_>>) -> Result<(), StoreError>;
}

#[derive(Default)]
struct Tables {
    rounds: BTreeMap<RoundId, Round>,
    hands: BTreeMap<HandId, Hand>,
    player_hands: BTreeMap<HandId, Vec<PlayerHand>>,
    dealer_hands: BTreeMap<HandId, DealerHand>,
}

/// An in-process [`RecordStore`].
#[derive(Default)]
pub struct MemoryStore {
    next_id: AtomicU64,
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn next_id(&self) -> Result<u64, StoreError> {
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn round(&self, id: RoundId) -> Result<Option<Round>, StoreError> {
        Ok(self.tables.lock().rounds.get(&id).cloned())
    }

    fn rounds(&self) -> Result<Vec<Round>, StoreError> {
        Ok(self.tables.lock().rounds.values().cloned().collect())
    }

    fn put_round(&self, round: &Round) -> Result<(), StoreError> {
        self.tables.lock().rounds.insert(round.id, round.clone());
        Ok(())
    }

    fn hand(&self, id: HandId) -> Result<Option<Hand>, StoreError> {
        Ok(self.tables.lock().hands.get(&id).copied())
    }

    fn hands(&self, round: RoundId) -> Result<Vec<Hand>, StoreError> {
        Ok(self
            .tables
            .lock()
            .hands
            .values()
            .filter(|hand| hand.round_id == round)
            .copied()
            .collect())
    }

    fn put_hand(&self, hand: &Hand) -> Result<(), StoreError> {
        self.tables.lock().hands.insert(hand.id, *hand);
        Ok(())
    }

    fn player_hands(&self, hand: HandId) -> Result<Vec<PlayerHand>, StoreError> {
        Ok(self
            .tables
            .lock()
            .player_hands
            .get(&hand)
            .cloned()
            .unwrap_or_default())
    }

    fn put_player_hand(&self, player_hand: &PlayerHand) -> Result<(), StoreError> {
        let mut tables = self.tables.lock();
        let siblings = tables.player_hands.entry(player_hand.hand_id).or_default();

        match siblings.binary_search_by_key(&player_hand.id, |h| h.id) {
            Ok(index) => siblings[index] = player_hand.clone(),
            Err(index) => siblings.insert(index, player_hand.clone()),
        }
        drop(tables);

        Ok(())
    }

    fn dealer_hand(&self, hand: HandId) -> Result<Option<DealerHand>, StoreError> {
        Ok(self.tables.lock().dealer_hands.get(&hand).cloned())
    }

    fn put_dealer_hand(&self, dealer_hand: &DealerHand) -> Result<(), StoreError> {
        self.tables
            .lock()
            .dealer_hands
            .insert(dealer_hand.hand_id, dealer_hand.clone());
        Ok(())
    }

    fn commit(&self, round: &Round, deal: Option<DealRecords<'_>>) -> Result<(), StoreError> {
        let mut tables = self.tables.lock();
        if let Some(deal) = deal {
            let mut player_hands = deal.player_hands.to_vec();
            player_hands.sort_by_key(|h| h.id);

            tables.hands.insert(deal.hand.id, *deal.hand);
            tables.player_hands.insert(deal.hand.id, player_hands);
            tables.dealer_hands.insert(deal.hand.id, deal.dealer.clone());
        }
        tables.rounds.insert(round.id, round.clone());
        drop(tables);

        Ok(())
    }
}
