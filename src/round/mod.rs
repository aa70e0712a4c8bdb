//! The round engine and hand state machine.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::advisor::{BasicStrategy, StrategyEvaluator, StrategyRules};
use crate::error::{RoundError, StoreError};
use crate::options::RoundOptions;
use crate::records::{DealerHandId, HandId, PlayerHandId, Round, RoundId, UserId};
use crate::shoe::Shoe;
use crate::store::RecordStore;
use crate::sync::{KeyedLocks, Mutex};

mod actions;
mod dealer;
pub mod state;
mod transaction;
pub mod view;
mod wager;

pub use state::{Action, HandPhase, PlayerAction};
pub use view::{DealerView, GameStateView, PlayerHandView};

use transaction::Transaction;
use wager::DealIds;

/// A blackjack table that runs single-seat rounds against a record store.
///
/// Every action on a round loads its records, applies the change in memory
/// and writes the records back with one [`RecordStore::commit`]. Actions on
/// the same round are serialized; different rounds proceed independently.
///
/// # Example
///
/// ```
/// use bjseat::{MemoryStore, RoundOptions, Table, UserId};
///
/// let table = Table::new(MemoryStore::new(), RoundOptions::default(), 42);
/// let round = table.start_round(UserId(7), false).unwrap();
/// let view = table.place_wager(round.id, 50).unwrap();
/// assert_eq!(view.player_hands.len(), 1);
/// ```
pub struct Table<S, E = BasicStrategy> {
    store: S,
    evaluator: E,
    options: RoundOptions,
    rules: StrategyRules,
    rng: Mutex<ChaCha8Rng>,
    locks: KeyedLocks<RoundId>,
}

impl<S: RecordStore> Table<S> {
    /// Creates a table that suggests plays with [`BasicStrategy`].
    #[must_use]
    pub fn new(store: S, options: RoundOptions, seed: u64) -> Self {
        Self::with_evaluator(store, BasicStrategy::new(), options, seed)
    }
}

impl<S: RecordStore, E: StrategyEvaluator> Table<S, E> {
    /// Creates a table that asks `evaluator` for strategy suggestions.
    #[must_use]
    pub fn with_evaluator(store: S, evaluator: E, options: RoundOptions, seed: u64) -> Self {
        Self {
            store,
            evaluator,
            options,
            rules: StrategyRules::default(),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            locks: KeyedLocks::new(),
        }
    }

    /// Replaces the ruleset passed to the strategy evaluator.
    #[must_use]
    pub fn with_rules(mut self, rules: StrategyRules) -> Self {
        self.rules = rules;
        self
    }

    /// Returns the record store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the table options.
    pub const fn options(&self) -> &RoundOptions {
        &self.options
    }

    /// Starts a round with a freshly shuffled shoe and the starting stack.
    ///
    /// # Errors
    ///
    /// Returns an error if the record store fails.
    pub fn start_round(&self, user_id: UserId, ai_assisted: bool) -> Result<Round, RoundError> {
        let shoe = Shoe::build(self.options.decks).shuffle(&mut *self.rng.lock());
        let round = Round {
            id: RoundId(self.store.next_id()?),
            user_id,
            shoe,
            stack: self.options.starting_stack,
            ai_assisted,
            current_hand: None,
            hands_dealt: 0,
        };

        self.store.put_round(&round)?;
        tracing::info!(
            round_id = %round.id,
            %user_id,
            ai_assisted,
            stack = round.stack,
            "round started"
        );

        Ok(round)
    }

    /// Takes `wager` from the stack and deals a new hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the round does not exist, its records are
    /// inconsistent, a hand is still in play, the wager is not positive or
    /// too large for the stack, the shoe runs out, or the record store fails.
    /// Nothing is changed on error.
    pub fn place_wager(&self, round_id: RoundId, wager: i64) -> Result<GameStateView, RoundError> {
        self.locks.with(round_id, || {
            let mut tx = Transaction::load(&self.store, round_id)?;
            let ids = || -> Result<DealIds, StoreError> {
                Ok(DealIds {
                    hand: HandId(self.store.next_id()?),
                    player_hand: PlayerHandId(self.store.next_id()?),
                    dealer_hand: DealerHandId(self.store.next_id()?),
                })
            };

            tx.place_wager(wager, ids, &self.options, &mut *self.rng.lock())?;
            self.commit(&tx)
        })
    }

    /// Applies a player action to the eligible player hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the round or player hand does not exist, its
    /// records are inconsistent, the action is not valid for the hand, the
    /// shoe runs out, or the record store fails. Nothing is changed on error.
    pub fn act(
        &self,
        round_id: RoundId,
        player_hand_id: PlayerHandId,
        action: PlayerAction,
    ) -> Result<GameStateView, RoundError> {
        self.locks.with(round_id, || {
            let mut tx = Transaction::load(&self.store, round_id)?;
            let split_id = || self.store.next_id().map(PlayerHandId);

            tx.act(player_hand_id, action, split_id, &self.options)?;
            self.commit(&tx)
        })
    }

    /// Returns the current state of a round without changing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the round does not exist, its records are
    /// inconsistent, or the record store fails.
    pub fn view(&self, round_id: RoundId) -> Result<GameStateView, RoundError> {
        self.locks.with(round_id, || {
            let tx = Transaction::load(&self.store, round_id)?;
            Ok(tx.view(&self.evaluator, &self.rules))
        })
    }

    fn commit(&self, tx: &Transaction) -> Result<GameStateView, RoundError> {
        tx.persist(&self.store).inspect_err(|err| {
            tracing::warn!(round_id = %tx.round.id, error = %err, "failed to persist round");
        })?;
        Ok(tx.view(&self.evaluator, &self.rules))
    }
}
