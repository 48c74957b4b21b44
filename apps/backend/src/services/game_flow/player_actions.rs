use sea_orm::DatabaseTransaction;
use tracing::{debug, info};

use super::{reject, GameFlowService};
use crate::domain::setup::FINAL_ATTEMPT;
use crate::domain::{Actions, Game, GameSnapshot, Phase, Proposal, Seat};
use crate::error::AppError;
use crate::errors::domain::ValidationKind;
use crate::repos::rounds;

fn ensure_not_over(game: &Game) -> Result<(), AppError> {
    if game.state.game_over {
        return Err(reject(ValidationKind::GameOver, "This game is over"));
    }
    Ok(())
}

fn ensure_round(game: &Game, mission: usize, attempt: usize) -> Result<(), AppError> {
    if mission != game.state.this_mission || attempt != game.state.this_proposal {
        return Err(reject(
            ValidationKind::RoundMismatch,
            "Mission and proposal do not match the current round",
        ));
    }
    Ok(())
}

pub(super) fn missing(what: &str, game: &Game) -> AppError {
    AppError::internal(format!(
        "{what} missing for game {} mission {} attempt {}",
        game.id(),
        game.state.this_mission,
        game.state.this_proposal
    ))
}

fn parse_vote(vote: &str) -> Result<bool, AppError> {
    match vote {
        "approve" => Ok(true),
        "reject" => Ok(false),
        _ => Err(reject(ValidationKind::InvalidVote, "Invalid vote")),
    }
}

fn parse_action(action: &str) -> Result<bool, AppError> {
    match action {
        "success" => Ok(true),
        "fail" => Ok(false),
        _ => Err(reject(ValidationKind::InvalidAction, "Invalid action")),
    }
}

impl GameFlowService {
    /// Leader submits a team for the current (mission, attempt).
    ///
    /// On the final attempt the proposal is created fully approved and the
    /// mission starts immediately.
    pub async fn propose(
        &self,
        txn: &DatabaseTransaction,
        snap: &mut GameSnapshot,
        seat: Seat,
        mission: usize,
        attempt: usize,
        players: Vec<Seat>,
    ) -> Result<(), AppError> {
        let game = &snap.game;
        ensure_not_over(game)?;
        ensure_round(game, mission, attempt)?;
        if game.phase() == Phase::Assassination {
            return Err(reject(
                ValidationKind::AssassinationInProgress,
                "Assassination is in progress",
            ));
        }
        if seat != game.state.leader {
            return Err(reject(ValidationKind::NotLeader, "You are not the leader"));
        }
        if game.state.have_proposal {
            return Err(reject(
                ValidationKind::AlreadyProposed,
                "Proposal has already been made",
            ));
        }

        let seats = game.seat_count();
        if players.len() != game.current_mission().size {
            return Err(reject(ValidationKind::InvalidTeam, "Sent wrong number of users"));
        }
        if players.iter().any(|p| *p >= seats) {
            return Err(reject(ValidationKind::InvalidTeam, "Invalid position in proposal"));
        }
        let mut seen = vec![false; seats];
        for p in &players {
            if std::mem::replace(&mut seen[*p], true) {
                return Err(reject(
                    ValidationKind::InvalidTeam,
                    "Duplicate position in proposal",
                ));
            }
        }

        let auto_approve = attempt == FINAL_ATTEMPT;
        let proposal = Proposal::new(seat, players, seats, auto_approve);
        rounds::create_proposal(txn, game.id(), mission, attempt, &proposal).await?;
        info!(
            game_id = %game.id(),
            mission,
            attempt,
            leader = seat,
            team = ?proposal.players,
            auto_approve,
            "Proposal made"
        );

        snap.game.state.have_proposal = true;
        snap.proposal = Some(proposal);

        if auto_approve {
            self.start_mission(txn, snap).await?;
        }
        Ok(())
    }

    /// Seat votes on the current proposal. `vote` is "approve" or "reject".
    pub async fn vote(
        &self,
        txn: &DatabaseTransaction,
        snap: &mut GameSnapshot,
        seat: Seat,
        mission: usize,
        attempt: usize,
        vote: &str,
    ) -> Result<(), AppError> {
        let game = &snap.game;
        ensure_not_over(game)?;
        ensure_round(game, mission, attempt)?;
        if attempt >= FINAL_ATTEMPT {
            return Err(reject(
                ValidationKind::NoVoteOnMission,
                "There is no vote on this mission",
            ));
        }
        if !game.state.have_proposal {
            return Err(reject(ValidationKind::NoProposal, "No proposal has been made"));
        }
        let proposal = snap
            .proposal
            .as_ref()
            .ok_or_else(|| missing("Proposal", game))?;
        if proposal.has_voted(seat) {
            return Err(reject(ValidationKind::AlreadyVoted, "You have already voted"));
        }
        let approve = parse_vote(vote)?;

        self.record_vote(txn, snap, seat, approve).await
    }

    /// Team member submits a mission action. `action` is "success" or "fail".
    pub async fn act(
        &self,
        txn: &DatabaseTransaction,
        snap: &mut GameSnapshot,
        seat: Seat,
        mission: usize,
        attempt: usize,
        action: &str,
    ) -> Result<(), AppError> {
        let game = &snap.game;
        ensure_not_over(game)?;
        ensure_round(game, mission, attempt)?;
        if !game.state.have_actions {
            return Err(reject(ValidationKind::NoMission, "No mission is in progress"));
        }
        let proposal = snap
            .proposal
            .as_ref()
            .ok_or_else(|| missing("Proposal", game))?;
        let actions = snap
            .actions
            .as_ref()
            .ok_or_else(|| missing("Actions", game))?;

        let Some(position) = proposal.players.iter().position(|p| *p == seat) else {
            return Err(reject(ValidationKind::NotOnMission, "You are not on this mission"));
        };
        if actions.acted[position] {
            return Err(reject(
                ValidationKind::AlreadyActed,
                "You have already chosen your action",
            ));
        }
        let success = parse_action(action)?;
        if !success && !game.card_at(seat).permitted_actions(proposal).failure {
            return Err(reject(
                ValidationKind::ActionNotPermitted,
                "Invalid action - must pick success",
            ));
        }

        self.record_action(txn, snap, seat, success).await
    }

    /// The assassin names a target; the game ends either way.
    pub async fn assassinate(
        &self,
        _txn: &DatabaseTransaction,
        snap: &mut GameSnapshot,
        seat: Seat,
        target: Seat,
    ) -> Result<(), AppError> {
        let game = &snap.game;
        ensure_not_over(game)?;
        if game.phase() != Phase::Assassination {
            return Err(reject(
                ValidationKind::NoAssassination,
                "No assassination is in progress",
            ));
        }
        if game.assassin_seat() != Some(seat) {
            return Err(reject(ValidationKind::NotAssassin, "You are not the assassin"));
        }
        if target >= game.seat_count() || target == seat {
            return Err(reject(
                ValidationKind::InvalidTarget,
                "Invalid assassination target",
            ));
        }

        info!(game_id = %game.id(), assassin = seat, target, "Assassination");
        let state = &mut snap.game.state;
        state.assassin_target = Some(target);
        state.game_over = true;
        Ok(())
    }

    pub(super) async fn record_vote(
        &self,
        txn: &DatabaseTransaction,
        snap: &mut GameSnapshot,
        seat: Seat,
        approve: bool,
    ) -> Result<(), AppError> {
        let (mission, attempt) = (snap.game.state.this_mission, snap.game.state.this_proposal);
        let proposal = snap
            .proposal
            .as_mut()
            .ok_or_else(|| missing("Proposal", &snap.game))?;
        proposal.votes[seat] = approve;
        proposal.voted[seat] = true;
        rounds::save_proposal_votes(txn, snap.game.id(), mission, attempt, proposal).await?;
        debug!(game_id = %snap.game.id(), mission, attempt, seat, approve, "Vote recorded");
        Ok(())
    }

    pub(super) async fn record_action(
        &self,
        txn: &DatabaseTransaction,
        snap: &mut GameSnapshot,
        seat: Seat,
        success: bool,
    ) -> Result<(), AppError> {
        let position = snap
            .proposal
            .as_ref()
            .and_then(|p| p.players.iter().position(|s| *s == seat))
            .ok_or_else(|| missing("Team seat", &snap.game))?;
        let actions = snap
            .actions
            .as_mut()
            .ok_or_else(|| missing("Actions", &snap.game))?;
        actions.actions[position] = success;
        actions.acted[position] = true;
        rounds::save_actions(txn, snap.game.id(), actions).await?;
        debug!(game_id = %snap.game.id(), mission = actions.mission, seat, "Action recorded");
        Ok(())
    }

    /// Create the action record for the approved proposal.
    pub(super) async fn start_mission(
        &self,
        txn: &DatabaseTransaction,
        snap: &mut GameSnapshot,
    ) -> Result<(), AppError> {
        let team_size = snap
            .proposal
            .as_ref()
            .map(|p| p.players.len())
            .ok_or_else(|| missing("Proposal", &snap.game))?;
        let state = &snap.game.state;
        let actions = Actions::new(state.this_mission, state.this_proposal, team_size);
        rounds::create_actions(txn, snap.game.id(), &actions).await?;
        info!(
            game_id = %snap.game.id(),
            mission = actions.mission,
            attempt = actions.attempt,
            "Mission started"
        );

        snap.game.state.have_actions = true;
        snap.actions = Some(actions);
        Ok(())
    }
}
