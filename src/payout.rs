//! Outcome classification and bankroll adjustment.
//!
//! Wagers leave the stack when they are placed, so a settlement only ever
//! credits the stack: `payout` is what goes back to the player and
//! `stack_diff` is the net effect of the hand on the bankroll.

use crate::card::Card;
use crate::error::InvalidAction;
use crate::hand::{PlayerHand, hand_value};
use crate::options::RoundingMode;
use crate::result::HandOutcome;

/// The money side of a settled hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// Amount credited back to the stack.
    pub payout: i64,
    /// Net bankroll change (`payout - wager`).
    pub stack_diff: i64,
}

/// Classifies a freshly dealt hand.
///
/// Returns `None` when neither two-card hand totals 21 and play continues.
#[must_use]
pub fn classify_natural(player: &[Card], dealer: &[Card]) -> Option<HandOutcome> {
    let player_natural = player.len() == 2 && hand_value(player) == 21;
    let dealer_natural = dealer.len() == 2 && hand_value(dealer) == 21;

    match (player_natural, dealer_natural) {
        (true, true) => Some(HandOutcome::Push),
        (true, false) => Some(HandOutcome::Blackjack),
        (false, true) => Some(HandOutcome::Lose),
        (false, false) => None,
    }
}

/// Classifies a hand against the dealer's final total.
#[must_use]
pub const fn classify_showdown(player_value: u8, dealer_value: u8) -> HandOutcome {
    if player_value > 21 {
        HandOutcome::Lose
    } else if dealer_value > 21 || player_value > dealer_value {
        HandOutcome::Win
    } else if player_value == dealer_value {
        HandOutcome::Push
    } else {
        HandOutcome::Lose
    }
}

/// Half of `wager` rounded according to `mode`.
#[must_use]
pub const fn blackjack_bonus(wager: i64, mode: RoundingMode) -> i64 {
    match mode {
        RoundingMode::Down => wager.div_euclid(2),
        // Halves round away from zero, so nearest and up agree for a halving.
        RoundingMode::Up | RoundingMode::Nearest => wager.div_euclid(2) + wager.rem_euclid(2),
    }
}

/// Computes what a hand of `wager` returns for `outcome`.
///
/// Returns `None` if the payout does not fit in an `i64`.
///
/// # Example
///
/// ```
/// use bjseat::{HandOutcome, RoundingMode, payout::payout};
///
/// let settlement = payout(HandOutcome::Blackjack, 50, RoundingMode::Nearest).unwrap();
/// assert_eq!(settlement.payout, 125);
/// assert_eq!(settlement.stack_diff, 75);
///
/// assert!(payout(HandOutcome::Win, i64::MAX, RoundingMode::Nearest).is_none());
/// ```
#[must_use]
pub const fn payout(outcome: HandOutcome, wager: i64, mode: RoundingMode) -> Option<Settlement> {
    let payout = match outcome {
        HandOutcome::Win => wager.checked_mul(2),
        HandOutcome::Push => Some(wager),
        HandOutcome::Lose => Some(0),
        HandOutcome::Blackjack => match wager.checked_mul(2) {
            Some(even) => even.checked_add(blackjack_bonus(wager, mode)),
            None => None,
        },
    };

    match payout {
        Some(payout) => Some(Settlement {
            outcome,
            payout,
            stack_diff: payout - wager,
        }),
        None => None,
    }
}

/// Takes `amount` off `stack` for a hand whose wager becomes `wager`.
///
/// Returns the remaining stack, or `None` if the deduction or the best
/// possible payout on `wager` would not fit in an `i64`.
#[must_use]
pub fn stake(stack: i64, amount: i64, wager: i64, mode: RoundingMode) -> Option<i64> {
    let remaining = stack.checked_sub(amount)?;
    let best = payout(HandOutcome::Blackjack, wager, mode)?;
    remaining.checked_add(best.payout)?;
    Some(remaining)
}

/// Settles `hand` with `outcome` and returns the amount to credit the stack.
///
/// Returns `Ok(None)` if the hand already carries an outcome; the hand and
/// the stack are then left untouched.
///
/// # Errors
///
/// Returns [`InvalidAction::WagerTooLarge`] if the payout overflows.
pub fn settle(
    hand: &mut PlayerHand,
    outcome: HandOutcome,
    mode: RoundingMode,
) -> Result<Option<i64>, InvalidAction> {
    if hand.is_settled() {
        return Ok(None);
    }

    let settlement = payout(outcome, hand.wager(), mode).ok_or(InvalidAction::WagerTooLarge)?;
    Ok(hand
        .settle(settlement.outcome, settlement.stack_diff)
        .then_some(settlement.payout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;
    use crate::records::{HandId, PlayerHandId};

    fn cards(values: &[u8]) -> Vec<Card> {
        values.iter().map(|&v| Card::new(v, Suit::Diamonds)).collect()
    }

    #[test]
    fn natural_classification() {
        assert_eq!(
            classify_natural(&cards(&[1, 13]), &cards(&[1, 12])),
            Some(HandOutcome::Push)
        );
        assert_eq!(
            classify_natural(&cards(&[1, 13]), &cards(&[9, 9])),
            Some(HandOutcome::Blackjack)
        );
        assert_eq!(
            classify_natural(&cards(&[9, 9]), &cards(&[10, 1])),
            Some(HandOutcome::Lose)
        );
        assert_eq!(classify_natural(&cards(&[9, 9]), &cards(&[10, 9])), None);
        assert_eq!(classify_natural(&cards(&[7, 7, 7]), &cards(&[10, 9])), None);
    }

    #[test]
    fn showdown_classification() {
        assert_eq!(classify_showdown(18, 22), HandOutcome::Win);
        assert_eq!(classify_showdown(19, 18), HandOutcome::Win);
        assert_eq!(classify_showdown(18, 18), HandOutcome::Push);
        assert_eq!(classify_showdown(17, 20), HandOutcome::Lose);
        assert_eq!(classify_showdown(23, 25), HandOutcome::Lose);
    }

    #[test]
    fn payouts_by_outcome() {
        let mode = RoundingMode::Nearest;
        let pay = |outcome| payout(outcome, 40, mode).unwrap();
        assert_eq!(pay(HandOutcome::Win).payout, 80);
        assert_eq!(pay(HandOutcome::Win).stack_diff, 40);
        assert_eq!(pay(HandOutcome::Push).stack_diff, 0);
        assert_eq!(pay(HandOutcome::Lose).payout, 0);
        assert_eq!(pay(HandOutcome::Lose).stack_diff, -40);
        assert_eq!(pay(HandOutcome::Blackjack).stack_diff, 60);
    }

    #[test]
    fn blackjack_bonus_rounding() {
        assert_eq!(blackjack_bonus(5, RoundingMode::Nearest), 3);
        assert_eq!(blackjack_bonus(5, RoundingMode::Up), 3);
        assert_eq!(blackjack_bonus(5, RoundingMode::Down), 2);
        assert_eq!(blackjack_bonus(10, RoundingMode::Down), 5);
        assert_eq!(blackjack_bonus(i64::MAX, RoundingMode::Up), i64::MAX / 2 + 1);
    }

    #[test]
    fn oversized_wagers_do_not_overflow() {
        let mode = RoundingMode::Nearest;
        assert_eq!(payout(HandOutcome::Win, i64::MAX, mode), None);
        assert_eq!(payout(HandOutcome::Blackjack, i64::MAX / 2, mode), None);
        assert_eq!(
            payout(HandOutcome::Lose, i64::MAX, mode).map(|s| s.stack_diff),
            Some(-i64::MAX)
        );

        assert_eq!(stake(1000, 50, 50, mode), Some(950));
        assert_eq!(stake(1000, i64::MAX, i64::MAX, mode), None);
        assert_eq!(stake(i64::MIN, 1, 1, mode), None);
        assert_eq!(stake(i64::MAX - 10, 10, 10, mode), None);

        let mut hand = PlayerHand::new(PlayerHandId(1), HandId(1), cards(&[10, 9]), i64::MAX);
        assert_eq!(
            settle(&mut hand, HandOutcome::Win, mode),
            Err(InvalidAction::WagerTooLarge)
        );
        assert!(!hand.is_settled());
    }

    #[test]
    fn settle_is_idempotent() {
        let mut hand = PlayerHand::new(PlayerHandId(1), HandId(1), cards(&[10, 9]), 25);

        assert_eq!(
            settle(&mut hand, HandOutcome::Win, RoundingMode::Nearest),
            Ok(Some(50))
        );
        assert_eq!(
            settle(&mut hand, HandOutcome::Lose, RoundingMode::Nearest),
            Ok(None)
        );
        assert_eq!(hand.outcome(), Some(HandOutcome::Win));
        assert_eq!(hand.stack_diff(), 25);
    }
}
