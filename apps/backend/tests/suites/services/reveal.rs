// Start-of-game knowledge as served to each seat.

use avalon_backend::domain::cards::Card;
use avalon_backend::domain::RevealEntry;
use avalon_backend::services::games::reveal_for;
use avalon_backend::{AppError, ErrorCode};

use crate::support::game_setup::{seed_game, HUMANS};
use crate::support::{assert_rejected, build_test_state};

const TABLE: [Card; 5] = [Card::Merlin, Card::Percival, Card::Good, Card::Mordred, Card::Morgana];

#[tokio::test]
async fn each_seat_learns_what_its_card_allows() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_game(&state, &HUMANS, &TABLE).await?;

    assert_eq!(
        reveal_for(&state, &game_id, "p0").await?,
        vec![
            RevealEntry::new("Your card: Merlin", vec![]),
            RevealEntry::new("These are the evil players (excluding Mordred)", vec![4]),
        ]
    );
    assert_eq!(
        reveal_for(&state, &game_id, "p1").await?,
        vec![
            RevealEntry::new("Your card: Percival", vec![]),
            RevealEntry::new("This is Merlin and Morgana", vec![0, 4]),
        ]
    );
    assert_eq!(
        reveal_for(&state, &game_id, "p2").await?,
        vec![RevealEntry::new("Your card: Good", vec![])]
    );
    assert_eq!(
        reveal_for(&state, &game_id, "p3").await?,
        vec![
            RevealEntry::new("Your card: Mordred", vec![]),
            RevealEntry::new("These are the evil players", vec![3, 4]),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn outsiders_get_nothing() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_game(&state, &HUMANS, &TABLE).await?;

    assert_rejected(
        reveal_for(&state, &game_id, "stranger").await,
        ErrorCode::NotAParticipant,
        "You are not a player in this game",
    );
    assert_rejected(
        reveal_for(&state, "no-such-game", "p0").await,
        ErrorCode::GameNotFound,
        "Game no-such-game not found",
    );
    Ok(())
}
