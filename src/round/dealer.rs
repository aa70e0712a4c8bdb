use crate::card::Card;
use crate::error::{InvalidAction, RoundError};
use crate::options::RoundOptions;
use crate::payout;

use super::HandPhase;
use super::transaction::{Transaction, draw_from};

impl Transaction {
    /// Moves the hand in play forward until it needs a player decision or is
    /// settled.
    pub(super) fn advance(&mut self, options: &RoundOptions) -> Result<(), RoundError> {
        loop {
            let Some(deal) = self.deal.as_mut() else {
                return Ok(());
            };

            match deal.hand.phase {
                HandPhase::Dealt | HandPhase::PlayerTurn(_) => {
                    if let Some(next) = deal.next_awaiting().map(|h| h.id) {
                        deal.hand.phase = HandPhase::PlayerTurn(next);
                        return Ok(());
                    }
                    deal.hand.phase = HandPhase::DealerTurn;
                }
                HandPhase::DealerTurn => {
                    self.dealer_play(options.dealer_stands_on)?;
                    self.settle(options)?;
                    if let Some(deal) = self.deal.as_mut() {
                        deal.hand.phase = HandPhase::Settled;
                    }
                }
                HandPhase::AwaitingWager | HandPhase::Settled => return Ok(()),
            }
        }
    }

    /// Dealer draws until reaching `stands_on` or more, soft totals included.
    ///
    /// The dealer does not draw when every player hand is already settled.
    /// Returns the cards drawn.
    pub(super) fn dealer_play(&mut self, stands_on: u8) -> Result<Vec<Card>, RoundError> {
        let mut drawn = Vec::new();
        let Some(deal) = self.deal.as_mut() else {
            return Ok(drawn);
        };

        if deal.player_hands.iter().all(|h| h.is_settled()) {
            return Ok(drawn);
        }

        while deal.dealer.value() < stands_on {
            let card = draw_from(&mut self.round.shoe)?;
            deal.dealer.add_card(card);
            drawn.push(card);
            tracing::debug!(
                round_id = %self.round.id,
                %card,
                total = deal.dealer.value(),
                "dealer draws"
            );
        }

        Ok(drawn)
    }

    /// Settles every unsettled player hand against the dealer's total.
    ///
    /// Hands that already carry an outcome are left alone, so calling this
    /// again changes nothing.
    pub(super) fn settle(&mut self, options: &RoundOptions) -> Result<(), RoundError> {
        let Some(deal) = self.deal.as_mut() else {
            return Ok(());
        };
        let dealer_value = deal.dealer.value();

        for player_hand in &mut deal.player_hands {
            let outcome = payout::classify_showdown(player_hand.value(), dealer_value);
            let Some(credit) = payout::settle(player_hand, outcome, options.rounding_blackjack)?
            else {
                continue;
            };

            self.round.stack = self
                .round
                .stack
                .checked_add(credit)
                .ok_or(InvalidAction::WagerTooLarge)?;
            tracing::info!(
                round_id = %self.round.id,
                player_hand_id = %player_hand.id,
                ?outcome,
                player_value = player_hand.value(),
                dealer_value,
                stack_diff = player_hand.stack_diff(),
                "hand settled"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;
    use crate::hand::{DealerHand, PlayerHand};
    use crate::records::{DealerHandId, Hand, HandId, PlayerHandId, Round, RoundId, UserId};
    use crate::result::HandOutcome;
    use crate::round::transaction::Deal;
    use crate::shoe::Shoe;

    fn cards(values: &[u8]) -> Vec<Card> {
        values.iter().map(|&v| Card::new(v, Suit::Spades)).collect()
    }

    fn transaction(player: &[u8], dealer: &[u8], shoe: &[u8]) -> Transaction {
        let hand = Hand {
            id: HandId(2),
            round_id: RoundId(1),
            phase: HandPhase::DealerTurn,
        };
        let mut player_hand = PlayerHand::new(PlayerHandId(3), hand.id, cards(player), 50);
        player_hand.finish();

        Transaction {
            round: Round {
                id: RoundId(1),
                user_id: UserId(1),
                shoe: Shoe::from_cards(cards(shoe)),
                stack: 950,
                ai_assisted: false,
                current_hand: Some(hand.id),
                hands_dealt: 1,
            },
            deal: Some(Deal {
                hand,
                player_hands: vec![player_hand],
                dealer: DealerHand::new(DealerHandId(4), hand.id, cards(dealer)),
            }),
        }
    }

    #[test]
    fn dealer_stands_on_first_seventeen() {
        let mut tx = transaction(&[10, 8], &[10, 2], &[5, 9, 3]);

        let drawn = tx.dealer_play(17).unwrap();
        assert_eq!(drawn, cards(&[5]));
        assert_eq!(tx.round.shoe.len(), 2);
    }

    #[test]
    fn dealer_stands_on_soft_seventeen() {
        let mut tx = transaction(&[10, 8], &[1, 6], &[5]);
        assert!(tx.dealer_play(17).unwrap().is_empty());
    }

    #[test]
    fn dealer_skips_drawing_when_everything_is_settled() {
        let mut tx = transaction(&[10, 8, 5], &[10, 2], &[5]);
        if let Some(deal) = tx.deal.as_mut() {
            payout::settle(
                &mut deal.player_hands[0],
                HandOutcome::Lose,
                crate::RoundingMode::Nearest,
            )
            .unwrap();
        }
        assert!(tx.dealer_play(17).unwrap().is_empty());
        assert_eq!(tx.round.shoe.len(), 1);
    }

    #[test]
    fn empty_shoe_mid_draw_is_reported() {
        let mut tx = transaction(&[10, 8], &[10, 2], &[2]);
        assert_eq!(tx.dealer_play(17).unwrap_err(), RoundError::ShoeEmpty);
    }

    #[test]
    fn advance_settles_and_credits_once() {
        let options = RoundOptions::default();
        let mut tx = transaction(&[10, 9], &[10, 2], &[5, 9]);

        tx.advance(&options).unwrap();
        assert_eq!(tx.phase(), HandPhase::Settled);
        assert_eq!(tx.round.stack, 1050);

        let deal = tx.deal.as_ref().unwrap();
        assert_eq!(deal.player_hands[0].outcome(), Some(HandOutcome::Win));
        assert_eq!(deal.player_hands[0].stack_diff(), 50);

        tx.settle(&options).unwrap();
        assert_eq!(tx.round.stack, 1050);
    }
}
