// Four rejected proposals in a row: leadership walks around the table and
// the fifth proposal goes to mission without a vote.

use avalon_backend::domain::{Phase, PhaseState};
use avalon_backend::services::games::state_document_for;
use avalon_backend::{AppError, ErrorCode};

use crate::support::game_setup::{seed_classic, snapshot, HUMANS};
use crate::support::moves::{act, propose, vote, vote_all};
use crate::support::{assert_rejected, build_test_state};

#[tokio::test]
async fn rejected_proposals_rotate_the_leader() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;

    for attempt in 1..=4 {
        let leader = attempt - 1;
        propose(&state, &game_id, HUMANS[leader], 1, attempt, &[0, 1]).await?;
        vote_all(&state, &game_id, &HUMANS, 1, attempt, "reject").await?;

        let snap = snapshot(&state, &game_id).await?;
        assert_eq!(snap.game.state.this_proposal, attempt);
        assert_eq!(snap.game.state.leader, attempt % HUMANS.len());
        assert_eq!(snap.game.state.this_vote, attempt);
        assert_eq!(snap.game.phase(), Phase::Picking);
    }

    let doc = state_document_for(&state, &game_id, "p0").await?;
    assert_eq!(doc.general.proposal, 5);
    assert_eq!(doc.general.votes.len(), 4);
    assert!(doc
        .general
        .votes
        .iter()
        .all(|v| v.votes.iter().all(|approve| !approve)));
    Ok(())
}

#[tokio::test]
async fn split_vote_is_a_rejection() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;
    propose(&state, &game_id, "p0", 1, 1, &[0, 1]).await?;
    vote_all(&state, &game_id, &HUMANS[..2], 1, 1, "approve").await?;
    vote_all(&state, &game_id, &HUMANS[2..], 1, 1, "reject").await?;

    let snap = snapshot(&state, &game_id).await?;
    assert_eq!(snap.game.state.this_proposal, 1);
    assert_eq!(snap.game.state.leader, 1);
    assert!(!snap.game.state.have_actions);
    Ok(())
}

#[tokio::test]
async fn final_proposal_skips_the_vote() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;
    for attempt in 1..=4 {
        propose(&state, &game_id, HUMANS[attempt - 1], 1, attempt, &[0, 1]).await?;
        vote_all(&state, &game_id, &HUMANS, 1, attempt, "reject").await?;
    }

    propose(&state, &game_id, "p4", 1, 5, &[2, 3]).await?;

    let snap = snapshot(&state, &game_id).await?;
    assert_eq!(snap.game.phase(), Phase::Mission);
    let proposal = snap.proposal.expect("final proposal should be loaded");
    assert!(proposal.approved());
    assert!(proposal.all_voted());

    assert_rejected(
        vote(&state, &game_id, "p0", 1, 5, "approve").await,
        ErrorCode::NoVoteOnMission,
        "There is no vote on this mission",
    );

    let doc = state_document_for(&state, &game_id, "p3").await?;
    match doc.phase {
        PhaseState::Mission {
            team,
            acted,
            permitted,
        } => {
            assert_eq!(team, vec![2, 3]);
            assert_eq!(acted, vec![false, false]);
            let permitted = permitted.expect("p3 is on the team");
            assert!(permitted.success && permitted.failure);
        }
        other => panic!("expected mission, got {other:?}"),
    }

    act(&state, &game_id, "p2", 1, 5, "success").await?;
    act(&state, &game_id, "p3", 1, 5, "fail").await?;

    let snap = snapshot(&state, &game_id).await?;
    assert_eq!(snap.game.state.evil_score, 1);
    assert_eq!(snap.game.state.this_mission, 1);
    assert_eq!(snap.game.state.this_proposal, 0);
    // p4 led the final attempt; the next mission starts with p0.
    assert_eq!(snap.game.state.leader, 0);
    // Auto-approved proposals leave no vote record.
    assert_eq!(snap.game.state.this_vote, 4);
    Ok(())
}
