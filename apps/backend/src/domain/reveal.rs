//! Private knowledge handed to each seat at game start.

use serde::{Deserialize, Serialize};

use super::cards::Card;
use super::state::{Game, Seat};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealEntry {
    pub label: String,
    pub players: Vec<Seat>,
}

impl RevealEntry {
    pub fn new(label: impl Into<String>, players: Vec<Seat>) -> Self {
        Self {
            label: label.into(),
            players,
        }
    }
}

/// Evil seats visible to `viewer`. Evil roles hidden from the viewer are
/// named in the label instead.
pub fn reveal_evil(game: &Game, viewer: Card) -> RevealEntry {
    let mut players = Vec::new();
    let mut hidden = Vec::new();
    for seat in 0..game.seat_count() {
        let card = game.card_at(seat);
        if !card.is_evil() {
            continue;
        }
        if card.hidden_from(viewer) {
            hidden.push(card.label());
        } else {
            players.push(seat);
        }
    }

    let mut label = String::from("These are the evil players");
    if !hidden.is_empty() {
        label.push_str(&format!(" (excluding {})", hidden.join(", ")));
    }
    RevealEntry::new(label, players)
}

/// Everything `seat` is told: its own card first, then the card's reveal.
pub fn game_reveal(game: &Game, seat: Seat) -> Vec<RevealEntry> {
    let card = game.card_at(seat);
    let mut entries = vec![RevealEntry::new(format!("Your card: {card}"), Vec::new())];
    entries.extend(card.reveal(game, seat));
    entries
}
