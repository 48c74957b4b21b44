// Optimistic locking on the single mutable game row.

use avalon_backend::db::txn::with_txn;
use avalon_backend::repos::game_states;
use avalon_backend::{AppError, ErrorCode};

use crate::support::build_test_state;
use crate::support::game_setup::{seed_classic, snapshot};

#[tokio::test]
async fn save_advances_lock_version() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;
    let mut game_state = snapshot(&state, &game_id).await?.game.state;
    assert_eq!(game_state.lock_version, 1);

    game_state.leader = 2;
    let id = game_id.clone();
    let saved = with_txn(&state, move |txn| {
        Box::pin(async move {
            game_states::save_with_lock(txn, &id, &mut game_state).await?;
            Ok(game_state)
        })
    })
    .await?;
    assert_eq!(saved.lock_version, 2);

    let reloaded = snapshot(&state, &game_id).await?.game.state;
    assert_eq!(reloaded, saved);
    Ok(())
}

#[tokio::test]
async fn stale_copy_is_refused() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;
    let fresh = snapshot(&state, &game_id).await?.game.state;
    let mut stale = fresh.clone();

    let id = game_id.clone();
    let mut winner = fresh;
    winner.this_vote = 1;
    with_txn(&state, move |txn| {
        Box::pin(async move {
            game_states::save_with_lock(txn, &id, &mut winner).await?;
            Ok(())
        })
    })
    .await?;

    let id = game_id.clone();
    stale.leader = 3;
    let err = with_txn(&state, move |txn| {
        Box::pin(async move {
            game_states::save_with_lock(txn, &id, &mut stale).await?;
            Ok(())
        })
    })
    .await
    .expect_err("stale lock version must be refused");
    assert_eq!(err.code(), ErrorCode::OptimisticLock);

    let current = snapshot(&state, &game_id).await?.game.state;
    assert_eq!(current.this_vote, 1);
    assert_eq!(current.leader, 0);
    assert_eq!(current.lock_version, 2);
    Ok(())
}

#[tokio::test]
async fn missing_row_is_not_a_lock_conflict() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;
    let mut game_state = snapshot(&state, &game_id).await?.game.state;

    let err = with_txn(&state, move |txn| {
        Box::pin(async move {
            game_states::save_with_lock(txn, "no-such-game", &mut game_state).await?;
            Ok(())
        })
    })
    .await
    .expect_err("saving an unknown game must fail");
    assert_eq!(err.code(), ErrorCode::NotFound);
    Ok(())
}
