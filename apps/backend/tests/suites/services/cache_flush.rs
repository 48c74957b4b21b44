// The transaction wrapper flushes cached rows the transition may have
// changed, and a broken cache never blocks a move.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use avalon_backend::cache::{get_json, CacheError, CacheKey, GameCache};
use avalon_backend::domain::{GameState, PhaseState, Proposal};
use avalon_backend::services::games::state_document_for;
use avalon_backend::AppError;

use crate::support::build_test_state;
use crate::support::game_setup::{seed_classic, snapshot, HUMANS};
use crate::support::moves::{propose, vote, vote_all};

#[tokio::test]
async fn transition_evicts_cached_state() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;
    let key = CacheKey::game_state(&game_id);

    // Reading the document populates the cache.
    state_document_for(&state, &game_id, "p0").await?;
    assert!(get_json::<GameState>(state.cache.as_ref(), &key).await.is_some());

    propose(&state, &game_id, "p0", 1, 1, &[0, 1]).await?;
    assert!(get_json::<GameState>(state.cache.as_ref(), &key).await.is_none());

    let doc = state_document_for(&state, &game_id, "p0").await?;
    assert!(matches!(doc.phase, PhaseState::Voting { .. }));
    Ok(())
}

#[tokio::test]
async fn each_vote_refreshes_the_cached_proposal() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let game_id = seed_classic(&state).await?;
    let key = CacheKey::proposal(&game_id, 0, 0);
    propose(&state, &game_id, "p0", 1, 1, &[0, 1]).await?;

    for (seat, user) in HUMANS.iter().enumerate().take(4) {
        let doc = state_document_for(&state, &game_id, user).await?;
        match doc.phase {
            PhaseState::Voting { voted, .. } => {
                assert_eq!(voted.iter().filter(|v| **v).count(), seat);
            }
            other => panic!("expected voting, got {other:?}"),
        }
        vote(&state, &game_id, user, 1, 1, "approve").await?;
        assert!(get_json::<Proposal>(state.cache.as_ref(), &key).await.is_none());
    }
    Ok(())
}

/// Reads miss and writes fail; counts every call.
#[derive(Default)]
struct DownCache {
    calls: AtomicUsize,
}

#[async_trait]
impl GameCache for DownCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Backend("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> Result<(), CacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Backend("connection refused".into()))
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Backend("connection refused".into()))
    }
}

#[tokio::test]
async fn moves_commit_while_the_cache_is_down() -> Result<(), AppError> {
    let base = build_test_state().await?;
    let down = Arc::new(DownCache::default());
    let state = base.with_cache(down.clone());
    let game_id = seed_classic(&state).await?;

    propose(&state, &game_id, "p0", 1, 1, &[0, 1]).await?;
    vote_all(&state, &game_id, &HUMANS, 1, 1, "approve").await?;

    let snap = snapshot(&state, &game_id).await?;
    assert!(snap.game.state.have_actions);
    assert!(down.calls.load(Ordering::SeqCst) > 0);

    let doc = state_document_for(&state, &game_id, "p1").await?;
    assert!(matches!(doc.phase, PhaseState::Mission { .. }));
    Ok(())
}
