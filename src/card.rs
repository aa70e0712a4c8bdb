//! Card types.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
    /// Spades.
    Spades,
}

impl Suit {
    /// All four suits in deck order.
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Clubs, Self::Spades];
}

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    /// The face value of the card (1 = Ace, 11 = Jack, 12 = Queen, 13 = King).
    pub value: u8,
    /// The suit of the card.
    pub suit: Suit,
}

impl Card {
    /// Creates a new card.
    ///
    /// Note: This function does not validate the value. Values outside 1..=13
    /// are accepted but count as zero when evaluating a hand.
    #[must_use]
    pub const fn new(value: u8, suit: Suit) -> Self {
        Self { value, suit }
    }

    /// Returns whether the card is an ace.
    #[must_use]
    pub const fn is_ace(&self) -> bool {
        self.value == 1
    }

    /// Returns the value used for pair comparison and strategy lookups.
    ///
    /// Face cards are capped at 10 and an ace stays 1.
    #[must_use]
    pub const fn capped_value(&self) -> u8 {
        if self.value > 10 { 10 } else { self.value }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self.value {
            1 => "A",
            11 => "J",
            12 => "Q",
            13 => "K",
            2 => "2",
            3 => "3",
            4 => "4",
            5 => "5",
            6 => "6",
            7 => "7",
            8 => "8",
            9 => "9",
            10 => "10",
            _ => "?",
        };
        let suit = match self.suit {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        };
        write!(f, "{value}{suit}")
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_cards_cap_at_ten() {
        assert_eq!(Card::new(13, Suit::Spades).capped_value(), 10);
        assert_eq!(Card::new(11, Suit::Hearts).capped_value(), 10);
        assert_eq!(Card::new(1, Suit::Clubs).capped_value(), 1);
        assert_eq!(Card::new(7, Suit::Clubs).capped_value(), 7);
    }

    #[test]
    fn display_uses_short_names() {
        assert_eq!(Card::new(1, Suit::Spades).to_string(), "A♠");
        assert_eq!(Card::new(10, Suit::Hearts).to_string(), "10♥");
    }
}
