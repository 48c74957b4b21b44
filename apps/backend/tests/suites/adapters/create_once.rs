// Proposals, actions and results are written once per key; a second
// insert surfaces as a unique-violation conflict.

use avalon_backend::db::txn::with_txn;
use avalon_backend::domain::{Actions, MissionResult, Proposal, VoteResult};
use avalon_backend::repos::{results, rounds};
use avalon_backend::{AppError, ErrorCode};

use crate::support::build_test_state;
use crate::support::game_setup::seed_classic;

#[tokio::test]
async fn second_proposal_for_a_round_conflicts() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;
    let proposal = Proposal::new(0, vec![0, 1], 5, false);

    let (id, first) = (game_id.clone(), proposal.clone());
    with_txn(&state, move |txn| {
        Box::pin(async move {
            rounds::create_proposal(txn, &id, 0, 0, &first).await?;
            Ok(())
        })
    })
    .await?;

    let (id, again) = (game_id.clone(), proposal.clone());
    let err = with_txn(&state, move |txn| {
        Box::pin(async move {
            rounds::create_proposal(txn, &id, 0, 0, &again).await?;
            Ok(())
        })
    })
    .await
    .expect_err("duplicate proposal must conflict");
    assert_eq!(err.code(), ErrorCode::UniqueViolation);
    assert!(err.to_string().contains("Proposal already exists"), "{err}");

    // Another attempt of the same mission is a different key.
    let (id, next) = (game_id.clone(), proposal.clone());
    let loaded = with_txn(&state, move |txn| {
        Box::pin(async move {
            rounds::create_proposal(txn, &id, 0, 1, &next).await?;
            Ok(rounds::find_proposal(txn, &id, 0, 1).await?)
        })
    })
    .await?;
    assert_eq!(loaded, Some(proposal));
    Ok(())
}

#[tokio::test]
async fn actions_round_trip_and_update_in_place() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;

    let id = game_id.clone();
    let (stored, err) = with_txn(&state, move |txn| {
        Box::pin(async move {
            let mut actions = Actions::new(0, 0, 2);
            rounds::create_actions(txn, &id, &actions).await?;

            actions.acted[1] = true;
            actions.actions[1] = false;
            rounds::save_actions(txn, &id, &actions).await?;
            let stored = rounds::find_actions(txn, &id, 0).await?;

            let duplicate = rounds::create_actions(txn, &id, &Actions::new(0, 3, 2))
                .await
                .expect_err("second actions row for a mission must conflict");
            Ok((stored, AppError::from(duplicate)))
        })
    })
    .await?;

    let stored = stored.expect("actions should be stored");
    assert_eq!(stored.acted, vec![false, true]);
    assert_eq!(stored.fails(), 1);
    assert_eq!(err.code(), ErrorCode::UniqueViolation);
    Ok(())
}

#[tokio::test]
async fn results_list_in_order() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;

    let id = game_id.clone();
    let (missions, votes) = with_txn(&state, move |txn| {
        Box::pin(async move {
            for mission in [1, 0] {
                let result = MissionResult {
                    mission,
                    attempt: 0,
                    leader: mission,
                    players: vec![0, 1],
                    fails: mission,
                    fails_allowed: 0,
                };
                results::create_mission_result(txn, &id, &result).await?;
            }
            for index in 0..3 {
                let vote = VoteResult {
                    index,
                    mission: 0,
                    attempt: index,
                    leader: index,
                    players: vec![index, 4],
                    votes: vec![false; 5],
                };
                results::create_vote_result(txn, &id, &vote).await?;
            }
            let missions = results::list_mission_results(txn, &id).await?;
            let votes = results::list_vote_results(txn, &id).await?;
            Ok((missions, votes))
        })
    })
    .await?;

    assert_eq!(missions.iter().map(|m| m.mission).collect::<Vec<_>>(), vec![0, 1]);
    assert!(!missions[0].evil_won());
    assert!(missions[1].evil_won());
    assert_eq!(votes.iter().map(|v| v.index).collect::<Vec<_>>(), vec![0, 1, 2]);
    Ok(())
}
