//! Table configuration options.

use crate::shoe::SHOE_DECKS;

/// Rounding mode for the half-wager bonus of a blackjack payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest, halves away from zero.
    #[default]
    Nearest,
}

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjseat::RoundOptions;
///
/// let options = RoundOptions::default()
///     .with_starting_stack(500)
///     .with_penetration(0.75);
/// assert_eq!(options.decks, 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOptions {
    /// Number of decks in each round's shoe.
    pub decks: u8,
    /// Bankroll a new round starts with.
    pub starting_stack: i64,
    /// Dealer stands on this total or more, soft totals included.
    pub dealer_stands_on: u8,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
    /// Fraction of the shoe dealt before it is replaced when a wager is placed.
    /// 0 to disable reshuffling.
    pub penetration: f64,
}

impl Default for RoundOptions {
    fn default() -> Self {
        Self {
            decks: SHOE_DECKS,
            starting_stack: 1000,
            dealer_stands_on: 17,
            rounding_blackjack: RoundingMode::Nearest,
            penetration: 0.0,
        }
    }
}

impl RoundOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjseat::RoundOptions;
    ///
    /// let options = RoundOptions::default().with_decks(2);
    /// assert_eq!(options.decks, 2);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the starting bankroll.
    #[must_use]
    pub const fn with_starting_stack(mut self, stack: i64) -> Self {
        self.starting_stack = stack;
        self
    }

    /// Sets the total the dealer stands on.
    #[must_use]
    pub const fn with_dealer_stands_on(mut self, total: u8) -> Self {
        self.dealer_stands_on = total;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    ///
    /// # Example
    ///
    /// ```
    /// use bjseat::{RoundOptions, RoundingMode};
    ///
    /// let options = RoundOptions::default().with_rounding_blackjack(RoundingMode::Down);
    /// assert_eq!(options.rounding_blackjack, RoundingMode::Down);
    /// ```
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the shoe penetration.
    ///
    /// # Example
    ///
    /// ```
    /// use bjseat::RoundOptions;
    ///
    /// let options = RoundOptions::default().with_penetration(0.80);
    /// assert_eq!(options.penetration, 0.80);
    /// ```
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }
}
