// Seat occupant records: one row per seat, replaced on rejoin.

use avalon_backend::db::txn::with_txn;
use avalon_backend::repos::player_ids;
use avalon_backend::AppError;

use crate::support::build_test_state;
use crate::support::game_setup::seed_classic;

#[tokio::test]
async fn upsert_replaces_the_participant() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;

    let id = game_id.clone();
    let (seat_two, all) = with_txn(&state, move |txn| {
        Box::pin(async move {
            player_ids::upsert(txn, &id, 2, "first").await?;
            player_ids::upsert(txn, &id, 0, "other").await?;
            player_ids::upsert(txn, &id, 2, "second").await?;
            let seat_two = player_ids::find_by_seat(txn, &id, 2).await?;
            let all = player_ids::list_for_game(txn, &id).await?;
            Ok((seat_two, all))
        })
    })
    .await?;

    let seat_two = seat_two.expect("seat 2 has a participant");
    assert_eq!(seat_two.participant_id, "second");
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|p| p.seat == 0 && p.participant_id == "other"));
    Ok(())
}

#[tokio::test]
async fn empty_seat_has_no_record() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;

    let found = with_txn(&state, move |txn| {
        Box::pin(async move { Ok(player_ids::find_by_seat(txn, &game_id, 4).await?) })
    })
    .await?;
    assert_eq!(found, None);
    Ok(())
}
