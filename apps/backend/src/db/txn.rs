use futures::future::BoxFuture;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::warn;

use super::{require_db, txn_policy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Execute a function within a database transaction.
///
/// Begins a transaction, runs the closure, then applies the process
/// [`txn_policy`] on `Ok` or rolls back on `Err`.
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'t> FnOnce(&'t DatabaseTransaction) -> BoxFuture<'t, Result<R, AppError>> + Send,
    R: Send,
{
    let db = require_db(state)?;
    let txn = db.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => match txn_policy::current() {
            txn_policy::TxnPolicy::CommitOnOk => {
                txn.commit().await?;
                Ok(val)
            }
            txn_policy::TxnPolicy::RollbackOnOk => {
                txn.rollback().await?;
                Ok(val)
            }
        },
        Err(err) => {
            // Preserve the original error
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "Rollback failed");
            }
            Err(err)
        }
    }
}
