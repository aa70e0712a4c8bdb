//! Hand evaluation and the player and dealer hand records.

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::records::{DealerHandId, HandId, PlayerHandId};
use crate::result::HandOutcome;

const fn card_points(value: u8) -> u8 {
    match value {
        1 => 11,
        2..=10 => value,
        11..=13 => 10,
        _ => 0,
    }
}

/// A blackjack total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandValue {
    /// The best total: aces count 11 until that would bust, then 1.
    pub total: u8,
    /// Whether an ace is still counted as 11.
    pub soft: bool,
}

/// Evaluates `cards` as a blackjack hand.
///
/// # Example
///
/// ```
/// use bjseat::{Card, Suit, hand::evaluate};
///
/// let cards = [
///     Card::new(1, Suit::Hearts),
///     Card::new(1, Suit::Spades),
///     Card::new(9, Suit::Clubs),
/// ];
/// let value = evaluate(&cards);
/// assert_eq!(value.total, 21);
/// assert!(value.soft);
/// ```
#[must_use]
pub fn evaluate(cards: &[Card]) -> HandValue {
    let mut total: u16 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total += u16::from(card_points(card.value));
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    HandValue {
        total: total.min(u16::from(u8::MAX)) as u8,
        soft: aces > 0,
    }
}

/// Returns the blackjack total of `cards`.
#[must_use]
pub fn hand_value(cards: &[Card]) -> u8 {
    evaluate(cards).total
}

/// Returns whether `cards` are exactly two cards of equal blackjack value.
#[must_use]
pub fn is_pair(cards: &[Card]) -> bool {
    matches!(cards, [first, second] if first.capped_value() == second.capped_value())
}

/// One wagered hand belonging to the player.
///
/// Splitting appends a sibling with the same `hand_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHand {
    /// Record id; ids grow in creation order.
    pub id: PlayerHandId,
    /// The dealing instance this hand belongs to.
    pub hand_id: HandId,
    cards: Vec<Card>,
    wager: i64,
    outcome: Option<HandOutcome>,
    player_done: bool,
    stack_diff: i64,
}

impl PlayerHand {
    /// Creates an unsettled hand holding `cards` with the given wager.
    #[must_use]
    pub const fn new(id: PlayerHandId, hand_id: HandId, cards: Vec<Card>, wager: i64) -> Self {
        Self {
            id,
            hand_id,
            cards,
            wager,
            outcome: None,
            player_done: false,
            stack_diff: 0,
        }
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Replaces the second card with `card` and returns the card it replaced.
    ///
    /// Returns `None` and leaves the hand alone unless it holds exactly two cards.
    pub fn replace_second(&mut self, card: Card) -> Option<Card> {
        if self.cards.len() != 2 {
            return None;
        }
        let second = self.cards.pop()?;
        self.cards.push(card);
        Some(second)
    }

    /// Returns the current wager.
    #[must_use]
    pub const fn wager(&self) -> i64 {
        self.wager
    }

    /// Doubles the wager and returns the new amount.
    ///
    /// Returns `None` and leaves the wager unchanged if doubling overflows.
    pub const fn double_wager(&mut self) -> Option<i64> {
        match self.wager.checked_mul(2) {
            Some(doubled) => {
                self.wager = doubled;
                Some(doubled)
            }
            None => None,
        }
    }

    /// Returns the settled outcome, or `None` while unsettled.
    #[must_use]
    pub const fn outcome(&self) -> Option<HandOutcome> {
        self.outcome
    }

    /// Returns whether an outcome has been recorded.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.outcome.is_some()
    }

    /// Records the outcome and net bankroll change.
    ///
    /// Returns `false` without changing anything if the hand is already settled.
    pub const fn settle(&mut self, outcome: HandOutcome, stack_diff: i64) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        self.outcome = Some(outcome);
        self.stack_diff = stack_diff;
        true
    }

    /// Returns whether the player has finished acting on the hand.
    #[must_use]
    pub const fn player_done(&self) -> bool {
        self.player_done
    }

    /// Marks the hand as finished by the player.
    pub const fn finish(&mut self) {
        self.player_done = true;
    }

    /// Returns whether the hand still waits for a player decision.
    #[must_use]
    pub const fn is_awaiting_action(&self) -> bool {
        self.outcome.is_none() && !self.player_done
    }

    /// Returns the net bankroll change recorded at settlement.
    #[must_use]
    pub const fn stack_diff(&self) -> i64 {
        self.stack_diff
    }

    /// Calculates the value of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        hand_value(&self.cards)
    }

    /// Returns whether the hand has gone over 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    /// Returns whether the hand can be split.
    #[must_use]
    pub fn can_split(&self) -> bool {
        is_pair(&self.cards)
    }

    /// Returns whether the hand can be doubled.
    #[must_use]
    pub fn can_double(&self) -> bool {
        self.cards.len() == 2
    }
}

/// The dealer's hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerHand {
    /// Record id.
    pub id: DealerHandId,
    /// The dealing instance this hand belongs to.
    pub hand_id: HandId,
    cards: Vec<Card>,
}

impl DealerHand {
    /// Creates a dealer hand holding `cards`.
    #[must_use]
    pub const fn new(id: DealerHandId, hand_id: HandId, cards: Vec<Card>) -> Self {
        Self { id, hand_id, cards }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns all cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the visible card (first card).
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Calculates the value of the up card alone.
    #[must_use]
    pub fn up_card_value(&self) -> u8 {
        self.cards.first().map_or(0, |c| card_points(c.value))
    }

    /// Calculates the full value of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        hand_value(&self.cards)
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn cards(values: &[u8]) -> Vec<Card> {
        values.iter().map(|&v| Card::new(v, Suit::Clubs)).collect()
    }

    #[test]
    fn multi_ace_hands_soften_one_at_a_time() {
        assert_eq!(hand_value(&cards(&[1, 1, 9])), 21);
        assert_eq!(hand_value(&cards(&[1, 1, 1, 8])), 21);
        assert_eq!(hand_value(&cards(&[1, 1])), 12);
        assert_eq!(hand_value(&cards(&[1, 1, 1, 1, 10, 10])), 24);
    }

    #[test]
    fn faces_count_ten() {
        assert_eq!(hand_value(&cards(&[13, 12])), 20);
        assert_eq!(hand_value(&cards(&[1, 13])), 21);
        assert_eq!(hand_value(&cards(&[11, 5, 7])), 22);
    }

    #[test]
    fn soft_flag_tracks_ace_counted_high() {
        assert!(evaluate(&cards(&[1, 6])).soft);
        assert!(!evaluate(&cards(&[1, 6, 10])).soft);
        assert!(!evaluate(&cards(&[10, 7])).soft);
        assert!(!evaluate(&[]).soft);
    }

    #[test]
    fn pairs_compare_capped_values() {
        assert!(is_pair(&cards(&[13, 12])));
        assert!(is_pair(&cards(&[8, 8])));
        assert!(!is_pair(&cards(&[7, 8])));
        assert!(!is_pair(&cards(&[8, 8, 8])));
        assert!(!is_pair(&cards(&[1, 10])));
    }

    #[test]
    fn settle_records_outcome_once() {
        let mut hand = PlayerHand::new(PlayerHandId(3), HandId(2), cards(&[10, 9]), 20);
        assert!(hand.is_awaiting_action());

        assert!(hand.settle(HandOutcome::Win, 20));
        assert!(!hand.settle(HandOutcome::Lose, -20));
        assert_eq!(hand.outcome(), Some(HandOutcome::Win));
        assert_eq!(hand.stack_diff(), 20);
        assert!(!hand.is_awaiting_action());
    }

    #[test]
    fn double_wager_refuses_overflow() {
        let mut hand = PlayerHand::new(PlayerHandId(1), HandId(1), cards(&[5, 6]), 30);
        assert_eq!(hand.double_wager(), Some(60));
        assert_eq!(hand.wager(), 60);

        let mut hand = PlayerHand::new(PlayerHandId(2), HandId(1), cards(&[5, 6]), i64::MAX);
        assert_eq!(hand.double_wager(), None);
        assert_eq!(hand.wager(), i64::MAX);
    }

    #[test]
    fn replace_second_only_on_two_cards() {
        let mut hand = PlayerHand::new(PlayerHandId(1), HandId(1), cards(&[8, 8]), 10);
        let taken = hand.replace_second(Card::new(3, Suit::Hearts));
        assert_eq!(taken, Some(Card::new(8, Suit::Clubs)));
        assert_eq!(hand.cards()[1], Card::new(3, Suit::Hearts));

        hand.add_card(Card::new(2, Suit::Hearts));
        assert_eq!(hand.replace_second(Card::new(4, Suit::Hearts)), None);
        assert_eq!(hand.cards().len(), 3);
    }

    #[test]
    fn dealer_up_card_value() {
        let dealer = DealerHand::new(DealerHandId(1), HandId(1), cards(&[1, 6]));
        assert_eq!(dealer.up_card_value(), 11);
        assert_eq!(dealer.value(), 17);
    }
}
