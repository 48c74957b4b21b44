//! Pending-work derivation for the game state machine.
//!
//! A human action can set off a chain of bot moves and phase resolutions.
//! Instead of recursing, the orchestrator repeatedly asks [`next_step`] for
//! the next piece of work and applies it until nothing is pending.

use super::state::{Actions, Game, Phase, Proposal, Seat};

/// Fresh view of a game plus the records for its current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub game: Game,
    pub proposal: Option<Proposal>,
    pub actions: Option<Actions>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStep {
    /// Pick the first leader.
    BeginGame,
    BotPropose { seat: Seat },
    BotVote { seat: Seat },
    /// Every seat has voted on the current proposal.
    ResolveVotes,
    BotAct { seat: Seat },
    /// Every team member has acted.
    ResolveMission,
    BotAssassinate { seat: Seat },
}

pub fn next_step(snapshot: &GameSnapshot) -> Option<FlowStep> {
    let game = &snapshot.game;
    if !game.state.game_begun {
        return Some(FlowStep::BeginGame);
    }

    match game.phase() {
        Phase::Gameover => None,
        Phase::Assassination => {
            let Some(seat) = game.assassin_seat() else {
                panic!(
                    "game {} entered assassination without an assassin",
                    game.id()
                );
            };
            game.is_bot(seat)
                .then_some(FlowStep::BotAssassinate { seat })
        }
        Phase::Picking => {
            let leader = game.state.leader;
            game.is_bot(leader)
                .then_some(FlowStep::BotPropose { seat: leader })
        }
        Phase::Voting => {
            let proposal = snapshot.proposal.as_ref()?;
            if proposal.all_voted() {
                return Some(FlowStep::ResolveVotes);
            }
            game.info
                .bots
                .iter()
                .find(|seat| !proposal.has_voted(**seat))
                .map(|seat| FlowStep::BotVote { seat: *seat })
        }
        Phase::Mission => {
            let proposal = snapshot.proposal.as_ref()?;
            let actions = snapshot.actions.as_ref()?;
            if actions.all_acted() {
                return Some(FlowStep::ResolveMission);
            }
            proposal
                .players
                .iter()
                .zip(&actions.acted)
                .find(|(seat, acted)| game.is_bot(**seat) && !**acted)
                .map(|(seat, _)| FlowStep::BotAct { seat: *seat })
        }
    }
}
