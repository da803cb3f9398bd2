use crate::db::repository::Storage;
use crate::models::transaction::Transaction;
use crate::store::TransactionStore;

pub fn search_transactions_by_category<'a>(
    category: &str,
    transactions: &'a [Transaction],
) -> Vec<&'a Transaction> {
    let category = category.trim();
    transactions
        .iter()
        .filter(|transaction| {
            transaction.category.key().eq_ignore_ascii_case(category)
                || transaction.category.label().eq_ignore_ascii_case(category)
        })
        .collect()
}

impl<S: Storage> TransactionStore<S> {
    pub fn search_by_category(&self, category: &str) -> Vec<&Transaction> {
        search_transactions_by_category(category, self.list())
    }
}
