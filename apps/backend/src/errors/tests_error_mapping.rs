// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_rule_violations_to_400() {
    let cases = [
        (ValidationKind::GameOver, "GAME_OVER"),
        (ValidationKind::NotLeader, "NOT_LEADER"),
        (ValidationKind::InvalidTeam, "INVALID_TEAM"),
        (ValidationKind::NoVoteOnMission, "NO_VOTE_ON_MISSION"),
        (ValidationKind::ActionNotPermitted, "ACTION_NOT_PERMITTED"),
        (ValidationKind::InvalidTarget, "INVALID_TARGET"),
        (ValidationKind::AssassinationInProgress, "ASSASSINATION_IN_PROGRESS"),
        (ValidationKind::UnknownCard, "UNKNOWN_CARD"),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::validation(kind, "rule").into();
        assert_eq!(app.code().as_str(), code);
        assert_eq!(app.status().as_u16(), 400);
    }
}

#[test]
fn other_validation_falls_back_to_generic_code() {
    let de = DomainError::validation(
        ValidationKind::Other("house rule".into()),
        "Not allowed at this table",
    );
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn maps_conflicts() {
    let lock = DomainError::conflict(ConflictKind::OptimisticLock, "stale");
    let app: AppError = lock.into();
    assert_eq!(app.code().as_str(), "OPTIMISTIC_LOCK");
    assert_eq!(app.status().as_u16(), 409);

    let unique = DomainError::conflict(ConflictKind::AlreadyExists, "proposal exists");
    let app: AppError = unique.into();
    assert_eq!(app.code().as_str(), "UNIQUE_VIOLATION");
    assert_eq!(app.status().as_u16(), 409);

    let other = DomainError::conflict(
        ConflictKind::Other("some conflict".to_string()),
        "generic conflict",
    );
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Game, "no game");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "GAME_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);

    let nf = DomainError::not_found(NotFoundKind::Proposal, "no proposal");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "NOT_FOUND");
}

#[test]
fn maps_infra() {
    let down = DomainError::infra(InfraErrorKind::DbUnavailable, "down");
    let app: AppError = down.into();
    assert_eq!(app.code().as_str(), "DB_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let corr = DomainError::infra(InfraErrorKind::DataCorruption, "bad");
    let app: AppError = corr.into();
    assert_eq!(app.code().as_str(), "DATA_CORRUPTION");
    assert_eq!(app.status().as_u16(), 500);

    let timeout = DomainError::infra(InfraErrorKind::Timeout, "slow");
    let app: AppError = timeout.into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");

    let other = DomainError::infra(InfraErrorKind::Other("unknown".to_string()), "other");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "DB_ERROR");
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn constructor_helpers() {
    let conflict = DomainError::conflict(ConflictKind::OptimisticLock, "stale");
    assert!(matches!(
        conflict,
        DomainError::Conflict(ConflictKind::OptimisticLock, _)
    ));

    let not_found = DomainError::not_found(NotFoundKind::GameState, "missing");
    assert!(matches!(
        not_found,
        DomainError::NotFound(NotFoundKind::GameState, _)
    ));
    assert_eq!(not_found.detail(), "missing");
}
