use crate::card::Card;
use crate::error::{InvalidAction, RoundError, StoreError};
use crate::hand::PlayerHand;
use crate::options::{RoundOptions, RoundingMode};
use crate::payout;
use crate::records::PlayerHandId;
use crate::result::HandOutcome;

use super::PlayerAction;
use super::transaction::{Transaction, draw_from};

impl Transaction {
    /// Applies `action` to the eligible player hand `player_hand_id`.
    ///
    /// `split_id` allocates the id of the sibling hand a split creates. It is
    /// called only for a split that has been accepted and dealt.
    pub(super) fn act(
        &mut self,
        player_hand_id: PlayerHandId,
        action: PlayerAction,
        split_id: impl FnOnce() -> Result<PlayerHandId, StoreError>,
        options: &RoundOptions,
    ) -> Result<Option<Card>, RoundError> {
        let mode = options.rounding_blackjack;
        let round_id = self.round.id;
        let shoe = &mut self.round.shoe;
        let stack = &mut self.round.stack;

        let deal = self
            .deal
            .as_mut()
            .filter(|deal| deal.hand.is_active())
            .ok_or(InvalidAction::NoHandInPlay)?;
        let hand_id = deal.hand.id;
        let index = deal
            .player_hands
            .iter()
            .position(|h| h.id == player_hand_id)
            .ok_or(RoundError::PlayerHandNotFound(player_hand_id))?;
        if deal.hand.phase.eligible() != Some(player_hand_id) {
            return Err(InvalidAction::NotYourTurn.into());
        }

        let hand = &mut deal.player_hands[index];
        let drawn = match action {
            PlayerAction::Hit => {
                let card = draw_from(shoe)?;
                hand.add_card(card);
                settle_if_bust(hand, mode)?;
                Some(card)
            }
            PlayerAction::Stand => {
                hand.finish();
                None
            }
            PlayerAction::Double => {
                if !hand.can_double() {
                    return Err(InvalidAction::CannotDouble.into());
                }
                let wager = hand.wager();
                let doubled = hand.double_wager().ok_or(InvalidAction::WagerTooLarge)?;
                *stack = payout::stake(*stack, wager, doubled, mode)
                    .ok_or(InvalidAction::WagerTooLarge)?;

                let card = draw_from(shoe)?;
                hand.add_card(card);
                hand.finish();
                settle_if_bust(hand, mode)?;
                Some(card)
            }
            PlayerAction::Split => {
                if !hand.can_split() {
                    return Err(InvalidAction::CannotSplit.into());
                }
                let wager = hand.wager();
                *stack =
                    payout::stake(*stack, wager, wager, mode).ok_or(InvalidAction::WagerTooLarge)?;

                let first_draw = draw_from(shoe)?;
                let second_draw = draw_from(shoe)?;
                let moved = hand
                    .replace_second(first_draw)
                    .ok_or(InvalidAction::CannotSplit)?;

                deal.player_hands.push(PlayerHand::new(
                    split_id()?,
                    hand_id,
                    vec![moved, second_draw],
                    wager,
                ));
                None
            }
        };

        tracing::debug!(
            %round_id,
            %player_hand_id,
            %action,
            card = drawn.map(tracing::field::display),
            stack = self.round.stack,
            "player acted"
        );

        self.advance(options)?;
        Ok(drawn)
    }
}

fn settle_if_bust(hand: &mut PlayerHand, mode: RoundingMode) -> Result<(), InvalidAction> {
    if hand.is_bust() {
        payout::settle(hand, HandOutcome::Lose, mode)?;
    }
    Ok(())
}
