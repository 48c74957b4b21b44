pub mod game_states;
pub mod games;
pub mod mission_actions;
pub mod mission_results;
pub mod player_ids;
pub mod proposals;
pub mod vote_results;

pub use game_states::Entity as GameStates;
pub use games::Entity as Games;
pub use mission_actions::Entity as MissionActions;
pub use mission_results::Entity as MissionResults;
pub use player_ids::Entity as PlayerIds;
pub use proposals::Entity as Proposals;
pub use vote_results::Entity as VoteResults;
