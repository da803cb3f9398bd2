use crate::db::repository::Storage;
use crate::models::category::Category;
use crate::models::transaction::{Transaction, TransactionType};
use crate::store::TransactionStore;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub count: usize,
}

pub fn summarize(transactions: &[Transaction]) -> Summary {
    let total_for = |kind: TransactionType| {
        transactions
            .iter()
            .filter(|t| t.transaction_type == kind)
            .fold(Decimal::ZERO, |acc, t| acc + t.amount)
    };
    let total_income = total_for(TransactionType::Income);
    let total_expenses = total_for(TransactionType::Expense);

    Summary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        count: transactions.len(),
    }
}

/// Sums amounts of one transaction type per category.
///
/// Categories appear in the order they are first seen in `transactions`, which
/// keeps chart legends stable.
pub fn category_breakdown(
    transactions: &[Transaction],
    kind: TransactionType,
) -> Vec<(Category, Decimal)> {
    let mut totals: Vec<(Category, Decimal)> = Vec::new();

    for transaction in transactions.iter().filter(|t| t.transaction_type == kind) {
        match totals.iter_mut().find(|(c, _)| *c == transaction.category) {
            Some((_, total)) => *total += transaction.amount,
            None => totals.push((transaction.category.clone(), transaction.amount)),
        }
    }

    totals
}

impl<S: Storage> TransactionStore<S> {
    pub fn summarize(&self) -> Summary {
        summarize(self.list())
    }

    pub fn category_breakdown(&self, kind: TransactionType) -> Vec<(Category, Decimal)> {
        category_breakdown(self.list(), kind)
    }
}
