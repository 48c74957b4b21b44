// Full games played by five humans around the classic table:
// seat 0 Merlin, seats 1-2 Good, seat 3 Assassin, seat 4 Evil.

use avalon_backend::domain::{Phase, PhaseState};
use avalon_backend::services::games::state_document_for;
use avalon_backend::{AppError, ErrorCode};

use crate::support::game_setup::{seed_classic, seed_game, snapshot, HUMANS};
use crate::support::moves::{assassinate, propose, run_mission, vote};
use crate::support::{assert_rejected, build_test_state};

fn all_succeed(_: usize) -> &'static str {
    "success"
}

/// Good takes missions 1-3 with leaders 0, 1 and 2.
async fn good_takes_three(state: &avalon_backend::AppState, game_id: &str) -> Result<(), AppError> {
    run_mission(state, game_id, &HUMANS, 0, 1, &[0, 1], all_succeed).await?;
    run_mission(state, game_id, &HUMANS, 1, 2, &[0, 1, 2], all_succeed).await?;
    run_mission(state, game_id, &HUMANS, 2, 3, &[1, 2], all_succeed).await?;
    Ok(())
}

#[tokio::test]
async fn successful_mission_scores_and_passes_leadership() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;

    run_mission(&state, &game_id, &HUMANS, 0, 1, &[0, 1], all_succeed).await?;

    let snap = snapshot(&state, &game_id).await?;
    let game = &snap.game;
    assert_eq!(game.state.good_score, 1);
    assert_eq!(game.state.evil_score, 0);
    assert_eq!(game.state.this_mission, 1);
    assert_eq!(game.state.this_proposal, 0);
    assert_eq!(game.state.leader, 1);
    assert!(game.state.missions_complete[0]);
    assert_eq!(game.phase(), Phase::Picking);
    assert!(snap.proposal.is_none());

    let doc = state_document_for(&state, &game_id, "p2").await?;
    assert_eq!(doc.general.mission, 2);
    assert_eq!(doc.general.proposal, 1);
    assert_eq!(doc.general.mission_results.len(), 1);
    assert_eq!(doc.general.votes.len(), 1);
    assert_eq!(
        doc.phase,
        PhaseState::Picking {
            mission_size: 3,
            mission_fails_allowed: 0
        }
    );
    Ok(())
}

#[tokio::test]
async fn good_win_opens_assassination() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;
    good_takes_three(&state, &game_id).await?;

    let snap = snapshot(&state, &game_id).await?;
    assert_eq!(snap.game.state.good_score, 3);
    assert!(!snap.game.state.game_over);
    assert_eq!(snap.game.phase(), Phase::Assassination);

    let doc = state_document_for(&state, &game_id, "p3").await?;
    match doc.phase {
        PhaseState::Assassination {
            assassin,
            known_evil,
        } => {
            assert_eq!(assassin, 3);
            assert_eq!(known_evil.len(), 1);
            assert_eq!(known_evil[0].players, vec![3, 4]);
        }
        other => panic!("expected assassination, got {other:?}"),
    }

    assert_rejected(
        propose(&state, &game_id, "p2", 3, 1, &[0, 1]).await,
        ErrorCode::AssassinationInProgress,
        "Assassination is in progress",
    );
    assert_rejected(
        assassinate(&state, &game_id, "p0", 3).await,
        ErrorCode::NotAssassin,
        "You are not the assassin",
    );
    assert_rejected(
        assassinate(&state, &game_id, "p3", 3).await,
        ErrorCode::InvalidTarget,
        "Invalid assassination target",
    );
    assert_rejected(
        assassinate(&state, &game_id, "p3", 9).await,
        ErrorCode::InvalidTarget,
        "Invalid assassination target",
    );
    Ok(())
}

#[tokio::test]
async fn assassinating_merlin_overturns_the_win() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;
    good_takes_three(&state, &game_id).await?;

    assassinate(&state, &game_id, "p3", 0).await?;

    let doc = state_document_for(&state, &game_id, "p1").await?;
    assert_eq!(
        doc.phase,
        PhaseState::Gameover {
            result: "Evil has won".into(),
            assassin_target: Some(0),
            cards: ["Merlin", "Good", "Good", "Assassin", "Evil"]
                .map(String::from)
                .to_vec(),
            winners: vec![false, false, false, true, true],
        }
    );
    Ok(())
}

#[tokio::test]
async fn missing_merlin_keeps_the_win() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;
    good_takes_three(&state, &game_id).await?;

    assassinate(&state, &game_id, "p3", 1).await?;

    let snap = snapshot(&state, &game_id).await?;
    assert!(snap.game.state.game_over);
    assert_eq!(snap.game.state.assassin_target, Some(1));

    let doc = state_document_for(&state, &game_id, "p0").await?;
    match doc.phase {
        PhaseState::Gameover { result, winners, .. } => {
            assert_eq!(result, "Good has won");
            assert_eq!(winners, vec![true, true, true, false, false]);
        }
        other => panic!("expected gameover, got {other:?}"),
    }

    assert_rejected(
        assassinate(&state, &game_id, "p3", 0).await,
        ErrorCode::GameOver,
        "This game is over",
    );
    Ok(())
}

#[tokio::test]
async fn three_failed_missions_end_the_game_for_evil() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;
    let evil_fails = |seat: usize| if seat >= 3 { "fail" } else { "success" };

    run_mission(&state, &game_id, &HUMANS, 0, 1, &[0, 4], evil_fails).await?;
    run_mission(&state, &game_id, &HUMANS, 1, 2, &[1, 2, 3], evil_fails).await?;
    run_mission(&state, &game_id, &HUMANS, 2, 3, &[2, 4], evil_fails).await?;

    let snap = snapshot(&state, &game_id).await?;
    assert_eq!(snap.game.state.evil_score, 3);
    assert_eq!(snap.game.state.good_score, 0);
    assert!(snap.game.state.game_over);

    let doc = state_document_for(&state, &game_id, "p4").await?;
    assert_eq!(doc.general.mission_results.len(), 3);
    assert!(doc.general.mission_results.iter().all(|r| r.fails == 1));
    match doc.phase {
        PhaseState::Gameover {
            result,
            assassin_target,
            winners,
            ..
        } => {
            assert_eq!(result, "Evil has won");
            assert_eq!(assassin_target, None);
            assert_eq!(winners, vec![false, false, false, true, true]);
        }
        other => panic!("expected gameover, got {other:?}"),
    }

    assert_rejected(
        vote(&state, &game_id, "p0", 3, 1, "approve").await,
        ErrorCode::GameOver,
        "This game is over",
    );
    Ok(())
}

#[tokio::test]
async fn good_wins_outright_without_an_assassin() -> Result<(), AppError> {
    use avalon_backend::domain::cards::Card;

    let state = build_test_state().await?;
    let cards = [Card::Good, Card::Good, Card::Good, Card::Evil, Card::Evil];
    let game_id = seed_game(&state, &HUMANS, &cards).await?;
    good_takes_three(&state, &game_id).await?;

    let snap = snapshot(&state, &game_id).await?;
    assert!(snap.game.state.game_over);
    assert_eq!(snap.game.phase(), Phase::Gameover);

    let doc = state_document_for(&state, &game_id, "p3").await?;
    match doc.phase {
        PhaseState::Gameover { result, .. } => assert_eq!(result, "Good has won"),
        other => panic!("expected gameover, got {other:?}"),
    }
    Ok(())
}
