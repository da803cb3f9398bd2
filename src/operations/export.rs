use crate::db::repository::Storage;
use crate::error::LedgerError;
use crate::models::transaction::Transaction;
use crate::store::TransactionStore;
use chrono::{Local, NaiveDate};
use std::fmt::Write as _;
use std::path::Path;

pub const CSV_HEADER: &str = "Date,Description,Amount,Category,Type";
pub const CSV_MIME_TYPE: &str = "text/csv";
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Leading characters that make spreadsheet applications evaluate a cell.
const FORMULA_TRIGGERS: [char; 4] = ['=', '+', '-', '@'];

pub fn export_file_name(today: NaiveDate) -> String {
    format!("expenses-{}.csv", today.format("%Y-%m-%d"))
}

/// Prefixes a `'` so the value is shown as text instead of run as a formula.
fn neutralize_formula(value: &str) -> String {
    if value.starts_with(FORMULA_TRIGGERS) {
        format!("'{}", value)
    } else {
        value.to_string()
    }
}

/// Encodes transactions as CSV: a literal header, then one fully quoted row each.
///
/// Dates are rendered in local time with `date_format`. There is no trailing newline.
pub fn encode_csv(
    transactions: &[Transaction],
    date_format: &str,
) -> Result<String, LedgerError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for transaction in transactions {
        let mut date = String::new();
        write!(date, "{}", transaction.date.with_timezone(&Local).format(date_format))
            .map_err(|_| LedgerError::CsvWrite(format!("Invalid date format '{}'", date_format)))?;

        let amount = transaction.amount.to_string();
        let fields = [
            date.as_str(),
            transaction.description.as_str(),
            amount.as_str(),
            transaction.category.key(),
            transaction.transaction_type.as_str(),
        ];
        writer.write_record(fields.iter().map(|field| neutralize_formula(field)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| LedgerError::CsvWrite(e.to_string()))?;
    let rows = String::from_utf8(bytes).map_err(|e| LedgerError::CsvWrite(e.to_string()))?;

    let mut csv = String::from(CSV_HEADER);
    if let Some(rows) = rows.strip_suffix('\n') {
        csv.push('\n');
        csv.push_str(rows);
    }
    Ok(csv)
}

impl<S: Storage> TransactionStore<S> {
    pub fn export_csv(&self, date_format: &str) -> Result<String, LedgerError> {
        if self.list().is_empty() {
            return Err(LedgerError::NothingToExport);
        }
        encode_csv(self.list(), date_format)
    }

    /// Writes the CSV export to `path` and returns the number of rows written.
    pub fn export_csv_file(&self, path: &Path, date_format: &str) -> Result<usize, LedgerError> {
        let csv = self.export_csv(date_format)?;
        std::fs::write(path, csv).map_err(|e| {
            LedgerError::CsvWrite(format!("Failed to write '{}': {}", path.display(), e))
        })?;
        tracing::info!("Exported {} transactions to {}", self.list().len(), path.display());
        Ok(self.list().len())
    }
}
