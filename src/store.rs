use crate::db::repository::{Storage, TRANSACTIONS_KEY};
use crate::error::StorageError;
use crate::models::transaction::{Transaction, is_amount_in_range};

/// The ordered transaction list, mirrored to a [`Storage`] after every mutation.
///
/// The list is kept most-recent-first. Operations live in `crate::operations`.
pub struct TransactionStore<S: Storage> {
    storage: S,
    pub(crate) transactions: Vec<Transaction>,
    storage_warning: Option<StorageError>,
}

impl<S: Storage> TransactionStore<S> {
    /// Reads the persisted list. Missing or unreadable data starts an empty ledger.
    ///
    /// Records are decoded one by one; a record that does not decode or whose amount
    /// is out of range is dropped with a warning and the rest still load.
    pub fn load(storage: S) -> Self {
        let transactions = match read_transactions(&storage) {
            Ok(Some(transactions)) => {
                tracing::info!("Loaded {} transactions from storage", transactions.len());
                transactions
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Could not load stored transactions, starting empty: {}", e);
                Vec::new()
            }
        };

        Self {
            storage,
            transactions,
            storage_warning: None,
        }
    }

    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the last write failure, if any, and clears it.
    pub fn take_storage_warning(&mut self) -> Option<StorageError> {
        self.storage_warning.take()
    }

    /// Writes the whole list. A failure is kept as a warning; memory stays authoritative.
    pub(crate) fn persist(&mut self) {
        let result = serde_json::to_string(&self.transactions)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set_item(TRANSACTIONS_KEY, &json));

        if let Err(e) = result {
            tracing::warn!("Failed to persist transactions: {}", e);
            self.storage_warning = Some(e);
        }
    }
}

fn read_transactions<S: Storage>(storage: &S) -> Result<Option<Vec<Transaction>>, StorageError> {
    let Some(json) = storage.get_item(TRANSACTIONS_KEY)? else {
        return Ok(None);
    };
    let records: Vec<serde_json::Value> = serde_json::from_str(&json)?;

    let mut transactions = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Transaction>(record) {
            Ok(transaction) if is_amount_in_range(transaction.amount) => {
                transactions.push(transaction)
            }
            Ok(transaction) => tracing::warn!(
                "Skipping stored transaction {} with out-of-range amount {}",
                transaction.id,
                transaction.amount
            ),
            Err(e) => tracing::warn!("Skipping unreadable stored transaction #{}: {}", index, e),
        }
    }
    Ok(Some(transactions))
}
