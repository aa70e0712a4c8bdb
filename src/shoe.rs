//! The dealing shoe.
//!
//! A [`Shoe`] is an owned value. Shuffling and drawing consume the shoe and
//! hand back the updated one, so every call site that takes a card also
//! decides where the remaining shoe goes.

use std::collections::VecDeque;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::card::{Card, DECK_SIZE, Suit};
use crate::error::ShoeError;

/// Number of decks in a standard shoe.
pub const SHOE_DECKS: u8 = 6;

/// Number of cards in a standard shoe.
pub const SHOE_SIZE: usize = SHOE_DECKS as usize * DECK_SIZE;

/// An ordered pool of cards; the front card is drawn next.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shoe {
    cards: VecDeque<Card>,
}

impl Shoe {
    /// Builds an unshuffled shoe of `decks` full 52-card decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjseat::Shoe;
    ///
    /// let shoe = Shoe::build(6);
    /// assert_eq!(shoe.len(), 312);
    /// ```
    #[must_use]
    pub fn build(decks: u8) -> Self {
        let mut cards = VecDeque::with_capacity(decks as usize * DECK_SIZE);

        for _ in 0..decks {
            for suit in Suit::ALL {
                for value in 1..=13 {
                    cards.push_back(Card::new(value, suit));
                }
            }
        }

        Self { cards }
    }

    /// Builds an unshuffled standard six-deck shoe.
    #[must_use]
    pub fn standard() -> Self {
        Self::build(SHOE_DECKS)
    }

    /// Creates a shoe that deals `cards` front to back.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Returns the shoe uniformly permuted (Fisher-Yates).
    #[must_use]
    pub fn shuffle<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.cards.make_contiguous().shuffle(rng);
        self
    }

    /// Removes the front card and returns it with the remaining shoe.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Empty`] if the shoe has no cards.
    pub fn draw(mut self) -> Result<(Card, Self), ShoeError> {
        let card = self.cards.pop_front().ok_or(ShoeError::Empty)?;
        Ok((card, self))
    }

    /// Returns the number of cards left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the shoe has no cards left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterates over the remaining cards in draw order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Card> {
        self.cards.iter()
    }

    /// Returns whether the share of cards dealt out of a `decks`-deck shoe has
    /// reached `penetration`.
    ///
    /// A penetration of 0 disables reshuffling and always returns `false`.
    #[must_use]
    pub fn is_past_penetration(&self, decks: u8, penetration: f64) -> bool {
        if penetration <= 0.0 {
            return false;
        }

        let total_cards = decks as usize * DECK_SIZE;
        if total_cards == 0 {
            return false;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let used_ratio = 1.0 - (self.len() as f64 / total_cards as f64);

        used_ratio >= penetration
    }
}
