use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sea_orm::DatabaseTransaction;
use tracing::{debug, info};

use super::player_actions::missing;
use super::GameFlowService;
use crate::ai::{bot_for, BotPlayer, BotView};
use crate::domain::scoring::count_score;
use crate::domain::seed_derivation::{derive_leader_seed, Decision};
use crate::domain::setup::{MISSION_COUNT, WINNING_SCORE};
use crate::domain::{next_step, FlowStep, GameSnapshot, MissionResult, Seat, VoteResult};
use crate::error::AppError;
use crate::repos::results;

/// Upper bound on steps drained per call. A whole game is at most
/// 5 missions x 5 attempts x (1 proposal + 10 votes + 1 resolution) plus
/// 5 x 10 actions, well under this.
pub const MAX_ITERATIONS: usize = 1000;

impl GameFlowService {
    /// Apply pending steps until the game waits on a human (or is over).
    ///
    /// Steps come from [`next_step`]; each one mutates the snapshot and
    /// writes its records through `txn`. Exceeding [`MAX_ITERATIONS`] is an
    /// internal error.
    pub async fn process_game_state(
        &self,
        txn: &DatabaseTransaction,
        snap: &mut GameSnapshot,
    ) -> Result<(), AppError> {
        for _ in 0..MAX_ITERATIONS {
            let Some(step) = next_step(snap) else {
                return Ok(());
            };
            debug!(
                game_id = %snap.game.id(),
                mission = snap.game.state.this_mission,
                attempt = snap.game.state.this_proposal,
                ?step,
                "Applying flow step"
            );
            self.apply_step(txn, snap, step).await?;
        }

        Err(AppError::internal(format!(
            "process_game_state exceeded {MAX_ITERATIONS} iterations for game {}",
            snap.game.id()
        )))
    }

    async fn apply_step(
        &self,
        txn: &DatabaseTransaction,
        snap: &mut GameSnapshot,
        step: FlowStep,
    ) -> Result<(), AppError> {
        match step {
            FlowStep::BeginGame => {
                self.begin_game(snap);
                Ok(())
            }
            FlowStep::BotPropose { seat } => {
                let team = {
                    let view = bot_view(snap, seat);
                    bot_for(&snap.game, Decision::Team, seat).choose_team(&view)?
                };
                let (mission, attempt) = position(snap);
                self.propose(txn, snap, seat, mission, attempt, team).await
            }
            FlowStep::BotVote { seat } => {
                let approve = {
                    let view = bot_view(snap, seat);
                    bot_for(&snap.game, Decision::Vote, seat).choose_vote(&view)?
                };
                self.record_vote(txn, snap, seat, approve).await
            }
            FlowStep::ResolveVotes => self.resolve_votes(txn, snap).await,
            FlowStep::BotAct { seat } => {
                let success = {
                    let view = bot_view(snap, seat);
                    bot_for(&snap.game, Decision::Action, seat).choose_action(&view)?
                };
                self.record_action(txn, snap, seat, success).await
            }
            FlowStep::ResolveMission => self.resolve_mission(txn, snap).await,
            FlowStep::BotAssassinate { seat } => {
                let target = {
                    let view = bot_view(snap, seat);
                    bot_for(&snap.game, Decision::Target, seat).choose_target(&view)?
                };
                self.assassinate(txn, snap, seat, target).await
            }
        }
    }

    /// Pick the first leader from the game's seed.
    fn begin_game(&self, snap: &mut GameSnapshot) {
        let seats = snap.game.seat_count();
        let mut rng = StdRng::seed_from_u64(derive_leader_seed(snap.game.info.rng_seed));
        let leader = rng.random_range(0..seats);
        info!(game_id = %snap.game.id(), leader, "Game begun");

        let state = &mut snap.game.state;
        state.leader = leader;
        state.game_begun = true;
    }

    /// Every seat has voted: record the round and either start the
    /// mission or pass leadership on.
    async fn resolve_votes(
        &self,
        txn: &DatabaseTransaction,
        snap: &mut GameSnapshot,
    ) -> Result<(), AppError> {
        let proposal = snap
            .proposal
            .as_ref()
            .ok_or_else(|| missing("Proposal", &snap.game))?;
        let state = &snap.game.state;
        let record = VoteResult {
            index: state.this_vote,
            mission: state.this_mission,
            attempt: state.this_proposal,
            leader: proposal.leader,
            players: proposal.players.clone(),
            votes: proposal.votes.clone(),
        };
        let approved = proposal.approved();
        results::create_vote_result(txn, snap.game.id(), &record).await?;
        info!(
            game_id = %snap.game.id(),
            mission = record.mission,
            attempt = record.attempt,
            vote_index = record.index,
            approved,
            "Votes resolved"
        );

        snap.game.state.this_vote += 1;
        if approved {
            return self.start_mission(txn, snap).await;
        }

        let next_leader = snap.game.next_leader();
        let state = &mut snap.game.state;
        state.this_proposal += 1;
        state.leader = next_leader;
        state.have_proposal = false;
        snap.proposal = None;
        Ok(())
    }

    /// Every team member has acted: record the result, rescore and either
    /// end the game, hand over to the assassin or move to the next mission.
    async fn resolve_mission(
        &self,
        txn: &DatabaseTransaction,
        snap: &mut GameSnapshot,
    ) -> Result<(), AppError> {
        let proposal = snap
            .proposal
            .as_ref()
            .ok_or_else(|| missing("Proposal", &snap.game))?;
        let actions = snap
            .actions
            .as_ref()
            .ok_or_else(|| missing("Actions", &snap.game))?;
        let result = MissionResult {
            mission: snap.game.state.this_mission,
            attempt: actions.attempt,
            leader: proposal.leader,
            players: proposal.players.clone(),
            fails: actions.fails(),
            fails_allowed: snap.game.current_mission().fails_allowed,
        };
        results::create_mission_result(txn, snap.game.id(), &result).await?;

        let all_results = results::list_mission_results(txn, snap.game.id()).await?;
        let (good, evil) = count_score(&all_results);
        info!(
            game_id = %snap.game.id(),
            mission = result.mission,
            fails = result.fails,
            fails_allowed = result.fails_allowed,
            good,
            evil,
            "Mission resolved"
        );

        let has_assassin = snap.game.assassin_seat().is_some();
        let next_leader = snap.game.next_leader();
        let state = &mut snap.game.state;
        state.missions_complete[result.mission] = true;
        state.good_score = good;
        state.evil_score = evil;

        if evil >= WINNING_SCORE {
            state.game_over = true;
            return Ok(());
        }
        if good >= WINNING_SCORE {
            // The assassination phase is derived from the score.
            if !has_assassin {
                state.game_over = true;
            }
            return Ok(());
        }

        if state.this_mission + 1 >= MISSION_COUNT {
            panic!(
                "game {} advanced past the last mission without a winner",
                snap.game.info.id
            );
        }
        state.leader = next_leader;
        state.this_proposal = 0;
        state.this_mission += 1;
        state.have_proposal = false;
        state.have_actions = false;
        snap.proposal = None;
        snap.actions = None;
        Ok(())
    }
}

fn bot_view(snap: &GameSnapshot, seat: Seat) -> BotView<'_> {
    BotView {
        game: &snap.game,
        seat,
        proposal: snap.proposal.as_ref(),
    }
}

fn position(snap: &GameSnapshot) -> (usize, usize) {
    (snap.game.state.this_mission, snap.game.state.this_proposal)
}
