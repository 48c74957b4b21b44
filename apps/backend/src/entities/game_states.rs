use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_states")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "game_id")]
    pub game_id: String,
    #[sea_orm(column_name = "data_version")]
    pub data_version: i32,
    #[sea_orm(column_name = "game_begun")]
    pub game_begun: bool,
    #[sea_orm(column_name = "have_proposal")]
    pub have_proposal: bool,
    pub leader: i32,
    #[sea_orm(column_name = "this_mission")]
    pub this_mission: i32,
    #[sea_orm(column_name = "this_proposal")]
    pub this_proposal: i32,
    #[sea_orm(column_name = "this_vote")]
    pub this_vote: i32,
    #[sea_orm(column_name = "have_actions")]
    pub have_actions: bool,
    #[sea_orm(column_name = "missions_complete", column_type = "JsonBinary")]
    pub missions_complete: Json,
    #[sea_orm(column_name = "good_score")]
    pub good_score: i32,
    #[sea_orm(column_name = "evil_score")]
    pub evil_score: i32,
    #[sea_orm(column_name = "assassin_target")]
    pub assassin_target: Option<i32>,
    #[sea_orm(column_name = "game_over")]
    pub game_over: bool,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id"
    )]
    Game,
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
