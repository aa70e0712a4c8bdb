use core::mem;

use crate::card::Card;
use crate::error::{RoundError, ShoeError};
use crate::hand::{DealerHand, PlayerHand};
use crate::records::{Hand, Round, RoundId};
use crate::shoe::Shoe;
use crate::store::{DealRecords, RecordStore};

use super::HandPhase;

/// The records of the most recent hand of a round.
#[derive(Debug, Clone)]
pub(super) struct Deal {
    pub(super) hand: Hand,
    pub(super) player_hands: Vec<PlayerHand>,
    pub(super) dealer: DealerHand,
}

impl Deal {
    /// The first player hand still waiting for a decision, in creation order.
    pub(super) fn next_awaiting(&self) -> Option<&PlayerHand> {
        self.player_hands.iter().find(|h| h.is_awaiting_action())
    }

    pub(super) fn eligible(&self) -> Option<&PlayerHand> {
        let id = self.hand.phase.eligible()?;
        self.player_hands.iter().find(|h| h.id == id)
    }
}

/// One action against one round: loaded, mutated in memory, then written
/// back. Nothing reaches the store unless the whole action succeeds.
#[derive(Debug, Clone)]
pub(super) struct Transaction {
    pub(super) round: Round,
    pub(super) deal: Option<Deal>,
}

/// Takes the front card off `shoe`, leaving the remainder in its place.
pub(super) fn draw_from(shoe: &mut Shoe) -> Result<Card, ShoeError> {
    let (card, rest) = mem::take(shoe).draw()?;
    *shoe = rest;
    Ok(card)
}

impl Transaction {
    pub(super) fn load<S: RecordStore + ?Sized>(
        store: &S,
        round_id: RoundId,
    ) -> Result<Self, RoundError> {
        let round = store
            .round(round_id)?
            .ok_or(RoundError::RoundNotFound(round_id))?;

        let deal = match round.current_hand {
            Some(hand_id) => {
                let hand = store
                    .hand(hand_id)?
                    .ok_or(RoundError::HandNotFound(hand_id))?;
                if hand.round_id != round.id {
                    return Err(RoundError::HandNotFound(hand_id));
                }

                let player_hands = store.player_hands(hand_id)?;
                let dealer = store.dealer_hand(hand_id)?;
                let Some(dealer) = dealer.filter(|_| !player_hands.is_empty()) else {
                    tracing::warn!(%round_id, %hand_id, "hand is missing its cards");
                    return Err(RoundError::CardGroupsNotFound(hand_id));
                };

                Some(Deal {
                    hand,
                    player_hands,
                    dealer,
                })
            }
            None => None,
        };

        Ok(Self { round, deal })
    }

    pub(super) fn persist<S: RecordStore + ?Sized>(&self, store: &S) -> Result<(), RoundError> {
        let records = self.deal.as_ref().map(|deal| DealRecords {
            hand: &deal.hand,
            player_hands: &deal.player_hands,
            dealer: &deal.dealer,
        });
        store.commit(&self.round, records)?;
        Ok(())
    }

    /// The hand in play, if there is one.
    pub(super) fn active_deal_mut(&mut self) -> Option<&mut Deal> {
        self.deal.as_mut().filter(|deal| deal.hand.is_active())
    }

    pub(super) fn phase(&self) -> HandPhase {
        self.deal
            .as_ref()
            .map_or(HandPhase::AwaitingWager, |deal| deal.hand.phase)
    }
}
