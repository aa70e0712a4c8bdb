//! What a client sees after each action.

use serde::{Deserialize, Serialize};

use crate::advisor::{self, StrategyEvaluator, StrategyRules};
use crate::card::Card;
use crate::hand::{DealerHand, PlayerHand};
use crate::records::{PlayerHandId, RoundId};
use crate::result::{HandOutcome, HandResult};

use super::transaction::{Deal, Transaction};
use super::{Action, HandPhase, PlayerAction};

/// A player hand as shown to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerHandView {
    /// Player hand id.
    pub id: PlayerHandId,
    /// Cards in the hand.
    pub cards: Vec<Card>,
    /// Hand value.
    pub value: u8,
    /// Wager riding on the hand.
    pub wager: i64,
    /// Outcome once settled.
    pub outcome: Option<HandOutcome>,
    /// Whether the player has finished with the hand.
    pub player_done: bool,
    /// Net bankroll change once settled.
    pub stack_diff: i64,
}

impl From<&PlayerHand> for PlayerHandView {
    fn from(hand: &PlayerHand) -> Self {
        Self {
            id: hand.id,
            cards: hand.cards().to_vec(),
            value: hand.value(),
            wager: hand.wager(),
            outcome: hand.outcome(),
            player_done: hand.player_done(),
            stack_diff: hand.stack_diff(),
        }
    }
}

/// The dealer's hand as shown to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerView {
    /// Visible cards; the hole card is left out while it is hidden.
    pub cards: Vec<Card>,
    /// Value of the visible cards.
    pub value: u8,
    /// Whether the hole card is hidden.
    pub hole_hidden: bool,
}

impl DealerView {
    fn new(dealer: &DealerHand, hole_hidden: bool) -> Self {
        if hole_hidden {
            Self {
                cards: dealer.up_card().copied().into_iter().collect(),
                value: dealer.up_card_value(),
                hole_hidden,
            }
        } else {
            Self {
                cards: dealer.cards().to_vec(),
                value: dealer.value(),
                hole_hidden,
            }
        }
    }
}

/// The state of a round after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateView {
    /// The round.
    pub round_id: RoundId,
    /// Current bankroll.
    pub stack: i64,
    /// Phase of the most recent hand.
    pub phase: HandPhase,
    /// The player hand eligible for action.
    pub active_player_hand_id: Option<PlayerHandId>,
    /// Player hands of the most recent hand in creation order.
    pub player_hands: Vec<PlayerHandView>,
    /// The dealer's hand of the most recent hand.
    pub dealer_hand: Option<DealerView>,
    /// What the client may do next.
    pub available_actions: Vec<Action>,
    /// Strategy suggestion for the eligible hand in AI-assisted rounds.
    pub ai_suggestion: Option<PlayerAction>,
    /// Settled player hands of the most recent hand.
    pub finished_hands: Vec<HandResult>,
}

/// Actions offered for the eligible hand, or a new wager when none is.
fn available_actions(eligible: Option<&PlayerHand>) -> Vec<Action> {
    let Some(hand) = eligible else {
        return vec![Action::PlaceWager];
    };

    let mut actions = vec![Action::Hit, Action::Stand, Action::Double];
    if hand.can_split() {
        actions.push(Action::Split);
    }
    actions
}

fn finished_hands(deal: &Deal) -> Vec<HandResult> {
    let dealer_value = deal.dealer.value();
    deal.player_hands
        .iter()
        .filter_map(|hand| {
            Some(HandResult {
                player_hand_id: hand.id,
                cards: hand.cards().to_vec(),
                outcome: hand.outcome()?,
                wager: hand.wager(),
                stack_diff: hand.stack_diff(),
                player_value: hand.value(),
                dealer_value,
            })
        })
        .collect()
}

impl Transaction {
    pub(super) fn view<E: StrategyEvaluator + ?Sized>(
        &self,
        evaluator: &E,
        rules: &StrategyRules,
    ) -> GameStateView {
        let deal = self.deal.as_ref();
        let eligible = deal.and_then(Deal::eligible);

        let ai_suggestion = match (self.round.ai_assisted, eligible, deal) {
            (true, Some(hand), Some(deal)) => deal
                .dealer
                .up_card()
                .and_then(|up| advisor::suggest(evaluator, rules, hand.cards(), up)),
            _ => None,
        };

        GameStateView {
            round_id: self.round.id,
            stack: self.round.stack,
            phase: self.phase(),
            active_player_hand_id: eligible.map(|h| h.id),
            player_hands: deal
                .map(|d| d.player_hands.iter().map(PlayerHandView::from).collect())
                .unwrap_or_default(),
            dealer_hand: deal.map(|d| DealerView::new(&d.dealer, eligible.is_some())),
            available_actions: available_actions(eligible),
            ai_suggestion,
            finished_hands: deal.map(finished_hands).unwrap_or_default(),
        }
    }
}
