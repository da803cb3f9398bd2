use crate::db::repository::Storage;
use crate::store::TransactionStore;

impl<S: Storage> TransactionStore<S> {
    /// Deletes the transaction with `id`. An unknown id is a no-op.
    ///
    /// Returns whether a transaction was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        let removed = self.transactions.len() != before;

        if removed {
            tracing::info!("Removed transaction {}", id);
        } else {
            tracing::debug!("No transaction with ID {} to remove", id);
        }
        self.persist();

        removed
    }
}
