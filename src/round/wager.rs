use rand::Rng;

use crate::error::{InvalidAction, RoundError, StoreError};
use crate::hand::{DealerHand, PlayerHand};
use crate::options::RoundOptions;
use crate::payout;
use crate::records::{DealerHandId, Hand, HandId, PlayerHandId};
use crate::shoe::Shoe;

use super::HandPhase;
use super::transaction::{Deal, Transaction, draw_from};

/// Cards needed to deal a hand.
const CARDS_PER_DEAL: usize = 4;

/// Record ids for a newly dealt hand.
pub(super) struct DealIds {
    pub(super) hand: HandId,
    pub(super) player_hand: PlayerHandId,
    pub(super) dealer_hand: DealerHandId,
}

impl Transaction {
    fn reshuffle_if_needed<R: Rng + ?Sized>(&mut self, options: &RoundOptions, rng: &mut R) {
        if !self
            .round
            .shoe
            .is_past_penetration(options.decks, options.penetration)
        {
            return;
        }

        let remaining = self.round.shoe.len();
        self.round.shoe = Shoe::build(options.decks).shuffle(rng);
        tracing::info!(round_id = %self.round.id, remaining, "shoe reshuffled");
    }

    /// Takes the wager and deals a new hand.
    ///
    /// Cards come off the shoe as player, player, dealer, dealer. A natural on
    /// either side settles the player hand on the spot. `ids` runs only once
    /// the wager has been accepted.
    pub(super) fn place_wager<R: Rng + ?Sized>(
        &mut self,
        wager: i64,
        ids: impl FnOnce() -> Result<DealIds, StoreError>,
        options: &RoundOptions,
        rng: &mut R,
    ) -> Result<(), RoundError> {
        if wager <= 0 {
            return Err(InvalidAction::NonPositiveWager.into());
        }
        if self.active_deal_mut().is_some() {
            return Err(InvalidAction::HandInPlay.into());
        }

        self.reshuffle_if_needed(options, rng);
        if self.round.shoe.len() < CARDS_PER_DEAL {
            return Err(RoundError::ShoeEmpty);
        }

        self.round.stack =
            payout::stake(self.round.stack, wager, wager, options.rounding_blackjack)
                .ok_or(InvalidAction::WagerTooLarge)?;

        let shoe = &mut self.round.shoe;
        let player_cards = vec![draw_from(shoe)?, draw_from(shoe)?];
        let dealer_cards = vec![draw_from(shoe)?, draw_from(shoe)?];
        let ids = ids()?;

        let hand = Hand {
            id: ids.hand,
            round_id: self.round.id,
            phase: HandPhase::Dealt,
        };
        let mut player_hand = PlayerHand::new(ids.player_hand, hand.id, player_cards, wager);
        let dealer = DealerHand::new(ids.dealer_hand, hand.id, dealer_cards);

        tracing::info!(
            round_id = %self.round.id,
            hand_id = %hand.id,
            wager,
            stack = self.round.stack,
            "wager placed"
        );

        let natural = payout::classify_natural(player_hand.cards(), dealer.cards());
        let credit = match natural {
            Some(outcome) => payout::settle(&mut player_hand, outcome, options.rounding_blackjack)?,
            None => None,
        };
        if let Some(credit) = credit {
            self.round.stack = self
                .round
                .stack
                .checked_add(credit)
                .ok_or(InvalidAction::WagerTooLarge)?;
            tracing::info!(
                round_id = %self.round.id,
                player_hand_id = %player_hand.id,
                outcome = ?natural,
                stack_diff = player_hand.stack_diff(),
                "natural settled"
            );
        }

        self.round.current_hand = Some(hand.id);
        self.round.hands_dealt += 1;
        self.deal = Some(Deal {
            hand,
            player_hands: vec![player_hand],
            dealer,
        });

        self.advance(options)
    }
}
