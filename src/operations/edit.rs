use super::add::validate_fields;
use crate::db::repository::Storage;
use crate::error::LedgerError;
use crate::models::transaction::Transaction;
use crate::store::TransactionStore;

impl<S: Storage> TransactionStore<S> {
    /// Replaces the editable fields of a transaction. Id and date are preserved.
    pub fn update(
        &mut self,
        id: &str,
        description: &str,
        amount: &str,
        category: &str,
        transaction_type: &str,
    ) -> Result<Transaction, LedgerError> {
        let index = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        let fields = validate_fields(description, amount, category, transaction_type)?;

        let transaction = &mut self.transactions[index];
        transaction.description = fields.description;
        transaction.amount = fields.amount;
        transaction.category = fields.category;
        transaction.transaction_type = fields.transaction_type;
        let updated = transaction.clone();

        self.persist();
        tracing::info!("Updated transaction {}", updated.id);

        Ok(updated)
    }
}
