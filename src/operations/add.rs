use crate::db::repository::Storage;
use crate::error::LedgerError;
use crate::models::category::Category;
use crate::models::transaction::{MAX_AMOUNT, Transaction, TransactionType, parse_amount};
use crate::store::TransactionStore;
use chrono::Utc;
use rust_decimal::Decimal;
use std::str::FromStr;

/// User-entered fields after validation.
pub(crate) struct TransactionFields {
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
    pub transaction_type: TransactionType,
}

pub(crate) fn validate_fields(
    description: &str,
    amount: &str,
    category: &str,
    transaction_type: &str,
) -> Result<TransactionFields, LedgerError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(LedgerError::Validation("Description cannot be empty".to_string()));
    }

    let amount = parse_amount(amount).ok_or_else(|| {
        LedgerError::Validation(format!(
            "Invalid amount format {}. Please provide a valid decimal number.",
            amount.trim()
        ))
    })?;
    if amount <= Decimal::ZERO {
        return Err(LedgerError::Validation("Amount must be greater than zero".to_string()));
    }
    if amount > MAX_AMOUNT {
        return Err(LedgerError::Validation(format!("Amount cannot exceed {}", MAX_AMOUNT)));
    }

    let category = category.trim();
    if category.is_empty() {
        return Err(LedgerError::Validation("Category cannot be empty".to_string()));
    }

    let transaction_type =
        TransactionType::from_str(transaction_type.trim()).map_err(LedgerError::Validation)?;

    Ok(TransactionFields {
        description: description.to_string(),
        amount,
        category: Category::from_key(category),
        transaction_type,
    })
}

impl<S: Storage> TransactionStore<S> {
    /// Records a new transaction at the front of the list, stamped with the current time.
    pub fn add(
        &mut self,
        description: &str,
        amount: &str,
        category: &str,
        transaction_type: &str,
    ) -> Result<Transaction, LedgerError> {
        let fields = validate_fields(description, amount, category, transaction_type)?;

        let transaction = Transaction::new(
            fields.description,
            fields.amount,
            fields.category,
            fields.transaction_type,
            Utc::now(),
        );

        self.transactions.insert(0, transaction.clone());
        self.persist();
        tracing::info!("Added {} transaction {}", transaction.transaction_type, transaction.id);

        Ok(transaction)
    }
}
