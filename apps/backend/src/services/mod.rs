pub mod game_flow;
pub mod game_reads;
pub mod game_txn;
pub mod games;
