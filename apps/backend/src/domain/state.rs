//! Game records: immutable setup, mutable progress and the per-round
//! create-once records.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::cards::Card;
use super::setup::{GameSetup, Mission, MISSION_COUNT, WINNING_SCORE};

pub type Seat = usize;

/// Current data layout of [`GameState`].
pub const DATA_VERSION: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatic {
    pub id: String,
    pub hangout: String,
    pub created_at: OffsetDateTime,
    pub setup: GameSetup,
    /// External user id per seat.
    pub players: Vec<String>,
    /// Bot-controlled seats, ascending.
    pub bots: Vec<Seat>,
    /// `roles[seat]` indexes into `setup.cards`.
    pub roles: Vec<usize>,
    pub rng_seed: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub data_version: i32,
    pub game_begun: bool,
    pub have_proposal: bool,
    pub leader: Seat,
    pub this_mission: usize,
    pub this_proposal: usize,
    /// Number of resolved vote rounds so far.
    pub this_vote: usize,
    pub have_actions: bool,
    pub missions_complete: [bool; MISSION_COUNT],
    pub good_score: u8,
    pub evil_score: u8,
    pub assassin_target: Option<Seat>,
    pub game_over: bool,
    pub lock_version: i32,
}

impl GameState {
    pub fn initial() -> Self {
        Self {
            data_version: DATA_VERSION,
            game_begun: false,
            have_proposal: false,
            leader: 0,
            this_mission: 0,
            this_proposal: 0,
            this_vote: 0,
            have_actions: false,
            missions_complete: [false; MISSION_COUNT],
            good_score: 0,
            evil_score: 0,
            assassin_target: None,
            game_over: false,
            lock_version: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Picking,
    Voting,
    Mission,
    Assassination,
    Gameover,
}

impl Phase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Picking => "picking",
            Phase::Voting => "voting",
            Phase::Mission => "mission",
            Phase::Assassination => "assassination",
            Phase::Gameover => "gameover",
        }
    }
}

/// A leader's team for one (mission, attempt). Vote arrays are per seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub leader: Seat,
    pub players: Vec<Seat>,
    pub votes: Vec<bool>,
    pub voted: Vec<bool>,
}

impl Proposal {
    /// `auto_approve` pre-fills every vote as an approval.
    pub fn new(leader: Seat, players: Vec<Seat>, seat_count: usize, auto_approve: bool) -> Self {
        Self {
            leader,
            players,
            votes: vec![auto_approve; seat_count],
            voted: vec![auto_approve; seat_count],
        }
    }

    pub fn contains(&self, seat: Seat) -> bool {
        self.players.contains(&seat)
    }

    pub fn has_voted(&self, seat: Seat) -> bool {
        self.voted.get(seat).copied().unwrap_or(false)
    }

    pub fn all_voted(&self) -> bool {
        self.voted.iter().all(|v| *v)
    }

    /// (approvals, rejections) among recorded votes.
    pub fn tally(&self) -> (usize, usize) {
        self.votes
            .iter()
            .zip(&self.voted)
            .filter(|(_, voted)| **voted)
            .fold((0, 0), |(yes, no), (vote, _)| {
                if *vote {
                    (yes + 1, no)
                } else {
                    (yes, no + 1)
                }
            })
    }

    /// Strict majority; ties reject.
    pub fn approved(&self) -> bool {
        let (yes, no) = self.tally();
        yes > no
    }
}

/// Mission actions, indexed by position within the approved team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actions {
    pub mission: usize,
    pub attempt: usize,
    pub actions: Vec<bool>,
    pub acted: Vec<bool>,
}

impl Actions {
    pub fn new(mission: usize, attempt: usize, team_size: usize) -> Self {
        Self {
            mission,
            attempt,
            actions: vec![false; team_size],
            acted: vec![false; team_size],
        }
    }

    pub fn all_acted(&self) -> bool {
        self.acted.iter().all(|a| *a)
    }

    pub fn fails(&self) -> usize {
        self.actions
            .iter()
            .zip(&self.acted)
            .filter(|(success, acted)| **acted && !**success)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionResult {
    pub mission: usize,
    pub attempt: usize,
    pub leader: Seat,
    pub players: Vec<Seat>,
    pub fails: usize,
    pub fails_allowed: usize,
}

impl MissionResult {
    pub fn evil_won(&self) -> bool {
        self.fails > self.fails_allowed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResult {
    pub index: usize,
    pub mission: usize,
    pub attempt: usize,
    pub leader: Seat,
    pub players: Vec<Seat>,
    pub votes: Vec<bool>,
}

/// Current session-level occupant of a seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerId {
    pub seat: Seat,
    pub participant_id: String,
}

/// Static setup plus current progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub info: GameStatic,
    pub state: GameState,
}

impl Game {
    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub fn seat_count(&self) -> usize {
        self.info.players.len()
    }

    pub fn card_at(&self, seat: Seat) -> Card {
        self.info.setup.cards[self.info.roles[seat]]
    }

    pub fn is_bot(&self, seat: Seat) -> bool {
        self.info.bots.contains(&seat)
    }

    pub fn seat_of(&self, user_id: &str) -> Option<Seat> {
        self.info.players.iter().position(|p| p == user_id)
    }

    /// First seat holding `card`.
    pub fn seat_holding(&self, card: Card) -> Option<Seat> {
        (0..self.seat_count()).find(|s| self.card_at(*s) == card)
    }

    /// Seat that performs the assassination: highest positive priority,
    /// and only while Merlin is in play.
    pub fn assassin_seat(&self) -> Option<Seat> {
        self.seat_holding(Card::Merlin)?;
        let (seat, priority) = (0..self.seat_count())
            .map(|s| (s, self.card_at(s).assassin_priority()))
            .fold((0, 0), |best, cur| if cur.1 > best.1 { cur } else { best });
        (priority > 0).then_some(seat)
    }

    pub fn current_mission(&self) -> Mission {
        self.info.setup.missions[self.state.this_mission]
    }

    pub fn next_leader(&self) -> Seat {
        (self.state.leader + 1) % self.seat_count()
    }

    pub fn phase(&self) -> Phase {
        let state = &self.state;
        if state.game_over {
            Phase::Gameover
        } else if state.good_score >= WINNING_SCORE {
            Phase::Assassination
        } else if state.have_actions {
            Phase::Mission
        } else if state.have_proposal {
            Phase::Voting
        } else {
            Phase::Picking
        }
    }
}
