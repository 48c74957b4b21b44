//! Role catalog.
//!
//! Every role is a variant of the closed [`Card`] enum. Behavior is pure with
//! respect to the [`Game`] snapshot passed in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::reveal::{reveal_evil, RevealEntry};
use super::scoring::good_has_won;
use super::state::{Game, Proposal, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Card {
    Good,
    Evil,
    Merlin,
    Percival,
    Mordred,
    Morgana,
    Oberon,
    Assassin,
}

/// Which mission actions a role may submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermittedActions {
    pub success: bool,
    pub failure: bool,
}

impl Card {
    pub const ALL: [Card; 8] = [
        Card::Good,
        Card::Evil,
        Card::Merlin,
        Card::Percival,
        Card::Mordred,
        Card::Morgana,
        Card::Oberon,
        Card::Assassin,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Card::Good => "Good",
            Card::Evil => "Evil",
            Card::Merlin => "Merlin",
            Card::Percival => "Percival",
            Card::Mordred => "Mordred",
            Card::Morgana => "Morgana",
            Card::Oberon => "Oberon",
            Card::Assassin => "Assassin",
        }
    }

    /// Labels of the whole catalog, in catalog order.
    pub fn all_labels() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|c| c.label())
    }

    /// Look up a role by label.
    pub fn construct(label: &str) -> Result<Card, DomainError> {
        label.parse()
    }

    /// Whether the card fills one of the setup's evil ("spy") slots.
    pub const fn is_evil(self) -> bool {
        matches!(
            self,
            Card::Evil | Card::Mordred | Card::Morgana | Card::Oberon | Card::Assassin
        )
    }

    /// Copies permitted per game; 0 means unlimited filler.
    pub const fn maximum(self) -> usize {
        match self {
            Card::Good | Card::Evil => 0,
            _ => 1,
        }
    }

    /// Tie-break for who performs the assassination; 0 cannot assassinate.
    pub const fn assassin_priority(self) -> u8 {
        match self {
            Card::Assassin => 10,
            Card::Mordred => 2,
            Card::Morgana => 1,
            _ => 0,
        }
    }

    pub fn has_won(self, game: &Game) -> bool {
        let good = good_has_won(game);
        if self.is_evil() {
            !good
        } else {
            good
        }
    }

    pub fn permitted_actions(self, _proposal: &Proposal) -> PermittedActions {
        PermittedActions {
            success: true,
            failure: self.is_evil(),
        }
    }

    /// What the holder of this card learns at game start.
    pub fn reveal(self, game: &Game, _seat: Seat) -> Vec<RevealEntry> {
        match self {
            Card::Good | Card::Oberon => Vec::new(),
            Card::Evil | Card::Merlin | Card::Mordred | Card::Morgana | Card::Assassin => {
                vec![reveal_evil(game, self)]
            }
            Card::Percival => percival_reveal(game),
        }
    }

    /// Whether this card is left out of `viewer`'s evil reveal.
    pub fn hidden_from(self, viewer: Card) -> bool {
        match self {
            Card::Mordred => viewer == Card::Merlin,
            Card::Oberon => true,
            _ => false,
        }
    }
}

fn percival_reveal(game: &Game) -> Vec<RevealEntry> {
    let Some(merlin) = game.seat_holding(Card::Merlin) else {
        return Vec::new();
    };
    match game.seat_holding(Card::Morgana) {
        Some(morgana) => {
            let mut players = vec![merlin, morgana];
            players.sort_unstable();
            vec![RevealEntry::new("This is Merlin and Morgana", players)]
        }
        None => vec![RevealEntry::new("This is Merlin", vec![merlin])],
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Card::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| DomainError::validation(ValidationKind::UnknownCard, format!("Invalid card {s}")))
    }
}
