//! Read-only state document handed to a seated player.

use serde::{Deserialize, Serialize};

use super::cards::PermittedActions;
use super::reveal::{game_reveal, RevealEntry};
use super::scoring::result_text;
use super::setup::GameSetup;
use super::state::{Actions, Game, MissionResult, Phase, Proposal, Seat, VoteResult};

/// Facts every phase shares. Mission and proposal are 1-based.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneralState {
    pub game_id: String,
    pub setup: GameSetup,
    pub players: Vec<String>,
    pub seat: Seat,
    pub leader: Seat,
    pub mission: usize,
    pub proposal: usize,
    pub good_score: u8,
    pub evil_score: u8,
    pub mission_results: Vec<MissionResult>,
    pub votes: Vec<VoteResult>,
}

/// Internally tagged by `state`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PhaseState {
    Picking {
        mission_size: usize,
        mission_fails_allowed: usize,
    },
    Voting {
        team: Vec<Seat>,
        voted: Vec<bool>,
    },
    Mission {
        team: Vec<Seat>,
        acted: Vec<bool>,
        /// `None` when the viewer is not on the team.
        permitted: Option<PermittedActions>,
    },
    Assassination {
        assassin: Seat,
        known_evil: Vec<RevealEntry>,
    },
    Gameover {
        result: String,
        assassin_target: Option<Seat>,
        cards: Vec<String>,
        /// Per seat, whether that seat's card counts the game as won.
        winners: Vec<bool>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateDocument {
    #[serde(flatten)]
    pub general: GeneralState,
    #[serde(flatten)]
    pub phase: PhaseState,
}

/// Records the document is built from, as loaded for display.
#[derive(Debug, Clone, Copy)]
pub struct DocumentInputs<'a> {
    pub game: &'a Game,
    pub viewer: Seat,
    pub proposal: Option<&'a Proposal>,
    pub actions: Option<&'a Actions>,
}

pub fn state_document(
    inputs: DocumentInputs<'_>,
    mission_results: Vec<MissionResult>,
    votes: Vec<VoteResult>,
) -> StateDocument {
    let DocumentInputs {
        game,
        viewer,
        proposal,
        actions,
    } = inputs;
    let state = &game.state;

    let general = GeneralState {
        game_id: game.info.id.clone(),
        setup: game.info.setup.clone(),
        players: game.info.players.clone(),
        seat: viewer,
        leader: state.leader,
        mission: state.this_mission + 1,
        proposal: state.this_proposal + 1,
        good_score: state.good_score,
        evil_score: state.evil_score,
        mission_results,
        votes,
    };

    // A lagging cached proposal or action record reads as the earlier phase.
    let phase = match (game.phase(), proposal, actions) {
        (Phase::Gameover, _, _) => PhaseState::Gameover {
            result: result_text(game).to_string(),
            assassin_target: state.assassin_target,
            cards: (0..game.seat_count())
                .map(|seat| game.card_at(seat).label().to_string())
                .collect(),
            winners: (0..game.seat_count())
                .map(|seat| game.card_at(seat).has_won(game))
                .collect(),
        },
        (Phase::Assassination, _, _) => PhaseState::Assassination {
            assassin: game.assassin_seat().unwrap_or_default(),
            known_evil: game_reveal(game, viewer).into_iter().skip(1).collect(),
        },
        (Phase::Mission, Some(proposal), Some(actions)) => PhaseState::Mission {
            team: proposal.players.clone(),
            acted: actions.acted.clone(),
            permitted: proposal
                .contains(viewer)
                .then(|| game.card_at(viewer).permitted_actions(proposal)),
        },
        (Phase::Mission | Phase::Voting, Some(proposal), _) => PhaseState::Voting {
            team: proposal.players.clone(),
            voted: proposal.voted.clone(),
        },
        _ => {
            let mission = game.current_mission();
            PhaseState::Picking {
                mission_size: mission.size,
                mission_fails_allowed: mission.fails_allowed,
            }
        }
    };

    StateDocument { general, phase }
}
