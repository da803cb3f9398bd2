use crate::models::category::Category;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err("Invalid transaction type. Use 'income' or 'expense'.".to_string()),
        }
    }
}

impl TryFrom<String> for TransactionType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub date: DateTime<Utc>,
}

impl Transaction {
    /// Creates a record with a fresh id.
    pub fn new(
        description: String,
        amount: Decimal,
        category: Category,
        transaction_type: TransactionType,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description,
            amount,
            category,
            transaction_type,
            date,
        }
    }

    /// Amount as shown in listings, e.g. `+$2000.00` or `-$4.50`.
    pub fn display_amount(&self) -> String {
        let sign = match self.transaction_type {
            TransactionType::Income => '+',
            TransactionType::Expense => '-',
        };
        format!("{}${}", sign, format_money(self.amount))
    }
}

/// Largest amount a single transaction may carry (one trillion).
///
/// Ledger sums stay far below `Decimal::MAX` with amounts capped here.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Parses an amount written as a plain decimal (`4.50`) or in scientific notation (`4.5e2`).
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Whether a stored or imported amount is non-negative and within [`MAX_AMOUNT`].
pub fn is_amount_in_range(amount: Decimal) -> bool {
    !amount.is_sign_negative() && amount <= MAX_AMOUNT
}

/// Rounds to cents and always prints two decimal places.
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}
