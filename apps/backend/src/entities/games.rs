use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub hangout: String,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_type = "JsonBinary")]
    pub setup: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub players: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub bots: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub roles: Json,
    #[sea_orm(column_name = "rng_seed")]
    pub rng_seed: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::game_states::Entity")]
    GameState,
}

impl Related<super::game_states::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameState.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
