//! What `with_txn` does with a transaction whose closure succeeded.

use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TxnPolicy {
    #[default]
    CommitOnOk,
    /// Roll back even on success. Lets a test exercise full game
    /// transitions against a shared database without leaving rows behind.
    RollbackOnOk,
}

impl FromStr for TxnPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commit" => Ok(Self::CommitOnOk),
            "rollback" => Ok(Self::RollbackOnOk),
            other => Err(AppError::config(format!("Unknown TXN_POLICY '{other}'"))),
        }
    }
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// Policy from `TXN_POLICY` (`commit` | `rollback`), commit when unset or
/// unparseable.
fn from_env() -> TxnPolicy {
    std::env::var("TXN_POLICY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

/// The process policy. Fixed by the first call to this or [`set_txn_policy`].
pub fn current() -> TxnPolicy {
    *POLICY.get_or_init(from_env)
}

/// Fix the process policy. Ignored once a policy is in place.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}
