//! Round listings and aggregate statistics.

use serde::{Deserialize, Serialize};

use crate::advisor::StrategyEvaluator;
use crate::error::RoundError;
use crate::records::{Round, RoundId, UserId};
use crate::round::Table;
use crate::store::RecordStore;

/// One line of the round listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    /// The round.
    pub round_id: RoundId,
    /// The user playing it.
    pub user_id: UserId,
    /// Current bankroll.
    pub stack: i64,
    /// Whether the round is AI-assisted.
    pub ai_assisted: bool,
    /// Hands dealt so far.
    pub hands_dealt: u32,
}

impl From<&Round> for RoundSummary {
    fn from(round: &Round) -> Self {
        Self {
            round_id: round.id,
            user_id: round.user_id,
            stack: round.stack,
            ai_assisted: round.ai_assisted,
            hands_dealt: round.hands_dealt,
        }
    }
}

/// Averages for one group of rounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    /// Number of rounds in the group.
    pub rounds: usize,
    /// Average hands dealt per round, `None` for an empty group.
    pub avg_hands: Option<f64>,
    /// Average stack per round, `None` for an empty group.
    pub avg_stack: Option<f64>,
}

impl GroupStats {
    fn collect<'a>(rounds: impl Iterator<Item = &'a RoundSummary>) -> Self {
        let (count, hands, stack) = rounds.fold((0_usize, 0_u64, 0_i64), |(n, h, s), r| {
            (n + 1, h + u64::from(r.hands_dealt), s + r.stack)
        });

        if count == 0 {
            return Self::default();
        }

        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for averages"
        )]
        let (avg_hands, avg_stack) = (
            hands as f64 / count as f64,
            stack as f64 / count as f64,
        );

        Self {
            rounds: count,
            avg_hands: Some(avg_hands),
            avg_stack: Some(avg_stack),
        }
    }
}

/// Averages for AI-assisted and manual rounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundStats {
    /// Rounds played with strategy suggestions.
    pub ai_assisted: GroupStats,
    /// Rounds played without.
    pub manual: GroupStats,
}

impl RoundStats {
    /// Computes the averages over `summaries`.
    #[must_use]
    pub fn from_summaries(summaries: &[RoundSummary]) -> Self {
        Self {
            ai_assisted: GroupStats::collect(summaries.iter().filter(|r| r.ai_assisted)),
            manual: GroupStats::collect(summaries.iter().filter(|r| !r.ai_assisted)),
        }
    }
}

impl<S: RecordStore, E: StrategyEvaluator> Table<S, E> {
    /// Lists every round, highest stack first.
    ///
    /// # Errors
    ///
    /// Returns an error if the record store fails.
    pub fn round_summaries(&self) -> Result<Vec<RoundSummary>, RoundError> {
        let mut summaries: Vec<RoundSummary> =
            self.store().rounds()?.iter().map(RoundSummary::from).collect();
        summaries.sort_by(|a, b| b.stack.cmp(&a.stack).then(a.round_id.cmp(&b.round_id)));
        Ok(summaries)
    }

    /// Computes averages over every round.
    ///
    /// # Errors
    ///
    /// Returns an error if the record store fails.
    pub fn stats(&self) -> Result<RoundStats, RoundError> {
        Ok(RoundStats::from_summaries(&self.round_summaries()?))
    }
}
