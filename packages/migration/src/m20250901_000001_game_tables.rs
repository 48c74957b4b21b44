use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Games {
    Table,
    Id,
    Hangout,
    CreatedAt,
    Setup,
    Players,
    Bots,
    Roles,
    RngSeed,
}

#[derive(Iden)]
enum GameStates {
    Table,
    GameId,
    DataVersion,
    GameBegun,
    HaveProposal,
    Leader,
    ThisMission,
    ThisProposal,
    ThisVote,
    HaveActions,
    MissionsComplete,
    GoodScore,
    EvilScore,
    AssassinTarget,
    GameOver,
    LockVersion,
    UpdatedAt,
}

#[derive(Iden)]
enum Proposals {
    Table,
    Id,
    GameId,
    Mission,
    Attempt,
    Leader,
    Players,
    Votes,
    Voted,
}

#[derive(Iden)]
enum MissionActions {
    Table,
    Id,
    GameId,
    Mission,
    Attempt,
    Actions,
    Acted,
}

#[derive(Iden)]
enum MissionResults {
    Table,
    Id,
    GameId,
    Mission,
    Attempt,
    Leader,
    Players,
    Fails,
    FailsAllowed,
}

#[derive(Iden)]
enum VoteResults {
    Table,
    Id,
    GameId,
    VoteIndex,
    Mission,
    Attempt,
    Leader,
    Players,
    Votes,
}

#[derive(Iden)]
enum PlayerIds {
    Table,
    Id,
    GameId,
    Seat,
    ParticipantId,
    UpdatedAt,
}

fn id_col<T: Iden + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

fn int_col<T: Iden + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col).integer().not_null().to_owned()
}

fn json_col<T: Iden + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col).json_binary().not_null().to_owned()
}

fn game_fk<T: Iden + 'static, C: Iden + 'static>(
    name: &str,
    table: T,
    col: C,
) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(table, col)
        .to(Games::Table, Games::Id)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // games: immutable per-game setup
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Games::Hangout).string().not_null())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(json_col(Games::Setup))
                    .col(json_col(Games::Players))
                    .col(json_col(Games::Bots))
                    .col(json_col(Games::Roles))
                    .col(ColumnDef::new(Games::RngSeed).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_hangout_created")
                    .table(Games::Table)
                    .col(Games::Hangout)
                    .col(Games::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // game_states: mutable progress, one row per game
        manager
            .create_table(
                Table::create()
                    .table(GameStates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameStates::GameId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(int_col(GameStates::DataVersion))
                    .col(ColumnDef::new(GameStates::GameBegun).boolean().not_null().default(false))
                    .col(ColumnDef::new(GameStates::HaveProposal).boolean().not_null().default(false))
                    .col(int_col(GameStates::Leader))
                    .col(int_col(GameStates::ThisMission))
                    .col(int_col(GameStates::ThisProposal))
                    .col(int_col(GameStates::ThisVote))
                    .col(ColumnDef::new(GameStates::HaveActions).boolean().not_null().default(false))
                    .col(json_col(GameStates::MissionsComplete))
                    .col(int_col(GameStates::GoodScore))
                    .col(int_col(GameStates::EvilScore))
                    .col(ColumnDef::new(GameStates::AssassinTarget).integer().null())
                    .col(ColumnDef::new(GameStates::GameOver).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(GameStates::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(GameStates::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(&mut game_fk(
                        "fk_game_states_game_id",
                        GameStates::Table,
                        GameStates::GameId,
                    ))
                    .to_owned(),
            )
            .await?;

        // proposals: one per (game, mission, attempt)
        manager
            .create_table(
                Table::create()
                    .table(Proposals::Table)
                    .if_not_exists()
                    .col(id_col(Proposals::Id))
                    .col(ColumnDef::new(Proposals::GameId).string().not_null())
                    .col(int_col(Proposals::Mission))
                    .col(int_col(Proposals::Attempt))
                    .col(int_col(Proposals::Leader))
                    .col(json_col(Proposals::Players))
                    .col(json_col(Proposals::Votes))
                    .col(json_col(Proposals::Voted))
                    .foreign_key(&mut game_fk(
                        "fk_proposals_game_id",
                        Proposals::Table,
                        Proposals::GameId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_proposals_round")
                    .table(Proposals::Table)
                    .col(Proposals::GameId)
                    .col(Proposals::Mission)
                    .col(Proposals::Attempt)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // mission_actions: one per (game, mission)
        manager
            .create_table(
                Table::create()
                    .table(MissionActions::Table)
                    .if_not_exists()
                    .col(id_col(MissionActions::Id))
                    .col(ColumnDef::new(MissionActions::GameId).string().not_null())
                    .col(int_col(MissionActions::Mission))
                    .col(int_col(MissionActions::Attempt))
                    .col(json_col(MissionActions::Actions))
                    .col(json_col(MissionActions::Acted))
                    .foreign_key(&mut game_fk(
                        "fk_mission_actions_game_id",
                        MissionActions::Table,
                        MissionActions::GameId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mission_actions_mission")
                    .table(MissionActions::Table)
                    .col(MissionActions::GameId)
                    .col(MissionActions::Mission)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // mission_results: immutable, one per completed mission
        manager
            .create_table(
                Table::create()
                    .table(MissionResults::Table)
                    .if_not_exists()
                    .col(id_col(MissionResults::Id))
                    .col(ColumnDef::new(MissionResults::GameId).string().not_null())
                    .col(int_col(MissionResults::Mission))
                    .col(int_col(MissionResults::Attempt))
                    .col(int_col(MissionResults::Leader))
                    .col(json_col(MissionResults::Players))
                    .col(int_col(MissionResults::Fails))
                    .col(int_col(MissionResults::FailsAllowed))
                    .foreign_key(&mut game_fk(
                        "fk_mission_results_game_id",
                        MissionResults::Table,
                        MissionResults::GameId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mission_results_mission")
                    .table(MissionResults::Table)
                    .col(MissionResults::GameId)
                    .col(MissionResults::Mission)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // vote_results: immutable, one per resolved vote round
        manager
            .create_table(
                Table::create()
                    .table(VoteResults::Table)
                    .if_not_exists()
                    .col(id_col(VoteResults::Id))
                    .col(ColumnDef::new(VoteResults::GameId).string().not_null())
                    .col(int_col(VoteResults::VoteIndex))
                    .col(int_col(VoteResults::Mission))
                    .col(int_col(VoteResults::Attempt))
                    .col(int_col(VoteResults::Leader))
                    .col(json_col(VoteResults::Players))
                    .col(json_col(VoteResults::Votes))
                    .foreign_key(&mut game_fk(
                        "fk_vote_results_game_id",
                        VoteResults::Table,
                        VoteResults::GameId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vote_results_index")
                    .table(VoteResults::Table)
                    .col(VoteResults::GameId)
                    .col(VoteResults::VoteIndex)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // player_ids: current occupant per seat
        manager
            .create_table(
                Table::create()
                    .table(PlayerIds::Table)
                    .if_not_exists()
                    .col(id_col(PlayerIds::Id))
                    .col(ColumnDef::new(PlayerIds::GameId).string().not_null())
                    .col(int_col(PlayerIds::Seat))
                    .col(ColumnDef::new(PlayerIds::ParticipantId).string().not_null())
                    .col(
                        ColumnDef::new(PlayerIds::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(&mut game_fk(
                        "fk_player_ids_game_id",
                        PlayerIds::Table,
                        PlayerIds::GameId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_player_ids_seat")
                    .table(PlayerIds::Table)
                    .col(PlayerIds::GameId)
                    .col(PlayerIds::Seat)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop children before games; indexes go with their tables
        manager
            .drop_table(Table::drop().table(PlayerIds::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VoteResults::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MissionResults::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MissionActions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Proposals::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GameStates::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
