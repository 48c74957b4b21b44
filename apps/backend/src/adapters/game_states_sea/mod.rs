//! SeaORM adapter for per-game mutable state with optimistic locking.

use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entities::game_states;
use crate::infra::db_errors::OPTIMISTIC_LOCK_PREFIX;

pub mod dto;

pub use dto::GameStateWrite;

pub async fn find_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Option<game_states::Model>, sea_orm::DbErr> {
    game_states::Entity::find_by_id(game_id.to_string())
        .one(conn)
        .await
}

pub async fn create_state<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameStateWrite,
) -> Result<game_states::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let active = game_states::ActiveModel {
        game_id: Set(dto.game_id),
        data_version: Set(dto.data_version),
        game_begun: Set(dto.game_begun),
        have_proposal: Set(dto.have_proposal),
        leader: Set(dto.leader),
        this_mission: Set(dto.this_mission),
        this_proposal: Set(dto.this_proposal),
        this_vote: Set(dto.this_vote),
        have_actions: Set(dto.have_actions),
        missions_complete: Set(dto.missions_complete),
        good_score: Set(dto.good_score),
        evil_score: Set(dto.evil_score),
        assassin_target: Set(dto.assassin_target),
        game_over: Set(dto.game_over),
        lock_version: Set(1),
        updated_at: Set(now),
    };
    active.insert(conn).await
}

/// Write every mutable column when `lock_version` still equals
/// `expected_lock_version`, bumping it by one.
///
/// Zero affected rows means another transaction got there first (or the
/// game is gone); both surface as errors so the caller's transaction aborts.
pub async fn update_with_lock<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameStateWrite,
    expected_lock_version: i32,
) -> Result<i32, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_id = dto.game_id.clone();

    let result = game_states::Entity::update_many()
        .col_expr(game_states::Column::DataVersion, Expr::value(dto.data_version))
        .col_expr(game_states::Column::GameBegun, Expr::value(dto.game_begun))
        .col_expr(game_states::Column::HaveProposal, Expr::value(dto.have_proposal))
        .col_expr(game_states::Column::Leader, Expr::value(dto.leader))
        .col_expr(game_states::Column::ThisMission, Expr::value(dto.this_mission))
        .col_expr(game_states::Column::ThisProposal, Expr::value(dto.this_proposal))
        .col_expr(game_states::Column::ThisVote, Expr::value(dto.this_vote))
        .col_expr(game_states::Column::HaveActions, Expr::value(dto.have_actions))
        .col_expr(
            game_states::Column::MissionsComplete,
            Expr::value(dto.missions_complete),
        )
        .col_expr(game_states::Column::GoodScore, Expr::value(dto.good_score))
        .col_expr(game_states::Column::EvilScore, Expr::value(dto.evil_score))
        .col_expr(
            game_states::Column::AssassinTarget,
            Expr::value(dto.assassin_target),
        )
        .col_expr(game_states::Column::GameOver, Expr::value(dto.game_over))
        .col_expr(game_states::Column::UpdatedAt, Expr::value(now))
        .col_expr(
            game_states::Column::LockVersion,
            Expr::col(game_states::Column::LockVersion).add(1),
        )
        .filter(game_states::Column::GameId.eq(game_id.as_str()))
        .filter(game_states::Column::LockVersion.eq(expected_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_game(conn, &game_id).await? {
            Some(current) => Err(sea_orm::DbErr::Custom(format!(
                "{OPTIMISTIC_LOCK_PREFIX}game {game_id} expected {expected_lock_version} actual {}",
                current.lock_version
            ))),
            None => Err(sea_orm::DbErr::RecordNotFound(format!(
                "game_states:{game_id}"
            ))),
        };
    }

    Ok(expected_lock_version + 1)
}
