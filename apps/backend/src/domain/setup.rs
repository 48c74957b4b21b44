//! Player-count rules, game setup validation and the setup catalog.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::cards::Card;
use crate::errors::domain::{DomainError, ValidationKind};

pub const MIN_PLAYERS: usize = 5;
pub const MAX_PLAYERS: usize = 10;
pub const MISSION_COUNT: usize = 5;
/// Attempt index that never goes to a vote.
pub const FINAL_ATTEMPT: usize = 4;
/// Score at which a side wins the mission count.
pub const WINNING_SCORE: u8 = 3;
/// User id prefix marking a bot-controlled seat.
pub const BOT_PREFIX: &str = "ai_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub size: usize,
    pub fails_allowed: usize,
}

const fn m(size: usize, fails_allowed: usize) -> Mission {
    Mission {
        size,
        fails_allowed,
    }
}

/// Rules for one player count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeRules {
    pub spies: usize,
    pub missions: [Mission; MISSION_COUNT],
}

const SIZE_TABLE: [SizeRules; MAX_PLAYERS - MIN_PLAYERS + 1] = [
    // 5
    SizeRules {
        spies: 2,
        missions: [m(2, 0), m(3, 0), m(2, 0), m(3, 0), m(3, 0)],
    },
    // 6
    SizeRules {
        spies: 2,
        missions: [m(2, 0), m(3, 0), m(4, 0), m(3, 0), m(4, 0)],
    },
    // 7
    SizeRules {
        spies: 3,
        missions: [m(2, 0), m(3, 0), m(3, 0), m(4, 1), m(4, 0)],
    },
    // 8
    SizeRules {
        spies: 3,
        missions: [m(3, 0), m(4, 0), m(4, 0), m(5, 1), m(5, 0)],
    },
    // 9
    SizeRules {
        spies: 3,
        missions: [m(3, 0), m(4, 0), m(4, 0), m(5, 1), m(5, 0)],
    },
    // 10
    SizeRules {
        spies: 4,
        missions: [m(3, 0), m(4, 0), m(4, 0), m(5, 1), m(5, 0)],
    },
];

pub fn rules_for(players: usize) -> Option<SizeRules> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
        return None;
    }
    Some(SIZE_TABLE[players - MIN_PLAYERS])
}

fn invalid_player_count() -> DomainError {
    DomainError::validation(ValidationKind::InvalidPlayerCount, "Invalid number of players")
}

/// Mission table and chosen cards. Immutable once a game is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSetup {
    pub spies: usize,
    pub missions: Vec<Mission>,
    pub cards: Vec<Card>,
}

/// Validated seat list and setup for a new game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedStart {
    pub players: Vec<String>,
    pub setup: GameSetup,
}

/// Check a requested game start.
///
/// Each user id may hold one seat only. Fewer than five humans are padded
/// with bot seats `ai_1`, `ai_2`, ..., skipping names already taken.
pub fn validate_game_start(
    mut players: Vec<String>,
    labels: &[String],
) -> Result<ValidatedStart, DomainError> {
    {
        let mut seen = HashSet::with_capacity(players.len());
        if let Some(dup) = players.iter().find(|p| !seen.insert(p.as_str())) {
            return Err(DomainError::validation(
                ValidationKind::InvalidSetup,
                format!("Duplicate player {dup}"),
            ));
        }
    }

    let mut next_bot = 1;
    while players.len() < MIN_PLAYERS {
        let name = format!("{BOT_PREFIX}{next_bot}");
        next_bot += 1;
        if !players.contains(&name) {
            players.push(name);
        }
    }

    let rules = rules_for(players.len()).ok_or_else(invalid_player_count)?;

    if labels.len() != players.len() {
        return Err(DomainError::validation(
            ValidationKind::InvalidSetup,
            "Mismatching number of players and cards",
        ));
    }

    let cards = labels
        .iter()
        .map(|label| Card::construct(label))
        .collect::<Result<Vec<_>, _>>()?;

    let mut copies: HashMap<Card, usize> = HashMap::new();
    for card in &cards {
        let count = copies.entry(*card).or_default();
        *count += 1;
        if card.maximum() > 0 && *count > card.maximum() {
            return Err(DomainError::validation(
                ValidationKind::InvalidSetup,
                format!("Too many copies of {card}"),
            ));
        }
    }

    let evil = cards.iter().filter(|c| c.is_evil()).count();
    if evil != rules.spies {
        return Err(DomainError::validation(
            ValidationKind::InvalidSetup,
            "Wrong number of evil cards for this number of players",
        ));
    }

    let has_merlin = cards.contains(&Card::Merlin);
    let has_assassin = cards.iter().any(|c| c.assassin_priority() > 0);
    if has_merlin && !has_assassin {
        return Err(DomainError::validation(
            ValidationKind::InvalidSetup,
            "Must have an assassin with Merlin in play",
        ));
    }

    Ok(ValidatedStart {
        players,
        setup: GameSetup {
            spies: rules.spies,
            missions: rules.missions.to_vec(),
            cards,
        },
    })
}

/// Pre-game view of the table for a player count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupCatalog {
    pub spies: usize,
    pub setup: Vec<Mission>,
    pub good_cards: Vec<&'static str>,
    pub evil_cards: Vec<&'static str>,
}

pub fn setup_catalog(players: usize) -> Result<SetupCatalog, DomainError> {
    let rules = rules_for(players).ok_or_else(invalid_player_count)?;
    let (evil, good): (Vec<Card>, Vec<Card>) = Card::ALL.into_iter().partition(|c| c.is_evil());
    Ok(SetupCatalog {
        spies: rules.spies,
        setup: rules.missions.to_vec(),
        good_cards: good.into_iter().map(Card::label).collect(),
        evil_cards: evil.into_iter().map(Card::label).collect(),
    })
}
