//! Error codes for the Avalon backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Identity
    /// No caller identity supplied by the upstream proxy
    Unauthorized,
    /// Caller does not hold a seat in the game
    NotAParticipant,

    // Turn and phase rules
    GameOver,
    /// Submitted mission/proposal does not match the current round
    RoundMismatch,
    NotLeader,
    AlreadyProposed,
    NoProposal,
    NoVoteOnMission,
    AlreadyVoted,
    NoMission,
    NotOnMission,
    AlreadyActed,
    NoAssassination,
    /// Missions are closed while the assassin chooses
    AssassinationInProgress,
    NotAssassin,

    // Request validation
    InvalidTeam,
    InvalidVote,
    InvalidAction,
    /// Role is not allowed to submit this action
    ActionNotPermitted,
    InvalidTarget,
    InvalidPlayerCount,
    InvalidSetup,
    UnknownCard,
    InvalidGameId,
    ValidationError,
    BadRequest,

    // Resources
    GameNotFound,
    NotFound,

    // Conflicts
    OptimisticLock,
    UniqueViolation,
    Conflict,

    // Infrastructure
    DbError,
    DbUnavailable,
    DbTimeout,
    DataCorruption,
    CacheError,
    Internal,
    ConfigError,
}

impl ErrorCode {
    pub const ALL: &'static [ErrorCode] = &[
        Self::Unauthorized,
        Self::NotAParticipant,
        Self::GameOver,
        Self::RoundMismatch,
        Self::NotLeader,
        Self::AlreadyProposed,
        Self::NoProposal,
        Self::NoVoteOnMission,
        Self::AlreadyVoted,
        Self::NoMission,
        Self::NotOnMission,
        Self::AlreadyActed,
        Self::NoAssassination,
        Self::AssassinationInProgress,
        Self::NotAssassin,
        Self::InvalidTeam,
        Self::InvalidVote,
        Self::InvalidAction,
        Self::ActionNotPermitted,
        Self::InvalidTarget,
        Self::InvalidPlayerCount,
        Self::InvalidSetup,
        Self::UnknownCard,
        Self::InvalidGameId,
        Self::ValidationError,
        Self::BadRequest,
        Self::GameNotFound,
        Self::NotFound,
        Self::OptimisticLock,
        Self::UniqueViolation,
        Self::Conflict,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::DataCorruption,
        Self::CacheError,
        Self::Internal,
        Self::ConfigError,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotAParticipant => "NOT_A_PARTICIPANT",
            Self::GameOver => "GAME_OVER",
            Self::RoundMismatch => "ROUND_MISMATCH",
            Self::NotLeader => "NOT_LEADER",
            Self::AlreadyProposed => "ALREADY_PROPOSED",
            Self::NoProposal => "NO_PROPOSAL",
            Self::NoVoteOnMission => "NO_VOTE_ON_MISSION",
            Self::AlreadyVoted => "ALREADY_VOTED",
            Self::NoMission => "NO_MISSION",
            Self::NotOnMission => "NOT_ON_MISSION",
            Self::AlreadyActed => "ALREADY_ACTED",
            Self::NoAssassination => "NO_ASSASSINATION",
            Self::AssassinationInProgress => "ASSASSINATION_IN_PROGRESS",
            Self::NotAssassin => "NOT_ASSASSIN",
            Self::InvalidTeam => "INVALID_TEAM",
            Self::InvalidVote => "INVALID_VOTE",
            Self::InvalidAction => "INVALID_ACTION",
            Self::ActionNotPermitted => "ACTION_NOT_PERMITTED",
            Self::InvalidTarget => "INVALID_TARGET",
            Self::InvalidPlayerCount => "INVALID_PLAYER_COUNT",
            Self::InvalidSetup => "INVALID_SETUP",
            Self::UnknownCard => "UNKNOWN_CARD",
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::Conflict => "CONFLICT",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::CacheError => "CACHE_ERROR",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
