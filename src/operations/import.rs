use crate::db::repository::Storage;
use crate::error::LedgerError;
use crate::models::category::Category;
use crate::models::transaction::{
    Transaction, TransactionType, is_amount_in_range, parse_amount,
};
use crate::store::TransactionStore;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::str::FromStr;

/// Splits one CSV line into fields.
///
/// A `"` opens a quoted section anywhere in a field; inside it `""` is a literal
/// quote and a lone `"` closes the section. Commas only separate fields outside
/// quotes. The last field is emitted even if a quote was left open.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (in_quotes, c) {
            (false, '"') => in_quotes = true,
            (false, ',') => fields.push(std::mem::take(&mut field)),
            (true, '"') if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            (true, '"') => in_quotes = false,
            _ => field.push(c),
        }
    }

    fields.push(field);
    fields
}

/// Removes one leading and one trailing `"` left over from sloppy quoting.
fn strip_quote_remnants(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

/// Turns one parsed CSV row into a transaction, or `None` if the row is unusable.
///
/// Columns are `Date,Description,Amount,Category,Type`. The date column is ignored
/// and the record is stamped with `imported_at`.
fn transaction_from_row(fields: &[String], imported_at: DateTime<Utc>) -> Option<Transaction> {
    if fields.len() < 5 {
        return None;
    }

    // Quotes inside a description are real text, so remnants only count for the blank check.
    let description = fields[1].trim();
    let description = description.strip_prefix('\'').unwrap_or(description);
    let amount = parse_amount(&fields[2].replace('"', ""))?;
    let category = strip_quote_remnants(fields[3].trim());
    let category = category.strip_prefix('\'').unwrap_or(category);
    let transaction_type = strip_quote_remnants(fields[4].trim());

    if strip_quote_remnants(description).is_empty()
        || category.is_empty()
        || transaction_type.is_empty()
    {
        return None;
    }
    if !is_amount_in_range(amount) {
        return None;
    }
    let transaction_type = TransactionType::from_str(transaction_type).ok()?;

    Some(Transaction::new(
        description.to_string(),
        amount,
        Category::from_key(category),
        transaction_type,
        imported_at,
    ))
}

/// Decodes CSV text into new transactions, in file order.
///
/// The first line is a header and is not checked. Blank and invalid lines are skipped.
pub fn decode_csv(text: &str, imported_at: DateTime<Utc>) -> Vec<Transaction> {
    let mut transactions = Vec::new();

    for (line_index, line) in text.trim().lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let fields = parse_csv_line(line);
        match transaction_from_row(&fields, imported_at) {
            Some(transaction) => transactions.push(transaction),
            None => tracing::debug!("Skipping invalid CSV row on line {}", line_index + 1),
        }
    }

    transactions
}

impl<S: Storage> TransactionStore<S> {
    /// Imports CSV text and returns how many rows were accepted.
    ///
    /// The imported batch goes to the front of the list keeping its file order.
    /// Zero accepted rows leaves the store and its storage untouched.
    pub fn import_csv(&mut self, text: &str) -> usize {
        let mut imported = decode_csv(text, Utc::now());
        let count = imported.len();

        if count > 0 {
            imported.append(&mut self.transactions);
            self.transactions = imported;
            self.persist();
            tracing::info!("Imported {} transactions", count);
        } else {
            tracing::info!("No valid transactions found in CSV");
        }

        count
    }

    pub fn import_csv_file(&mut self, path: &Path) -> Result<usize, LedgerError> {
        let text = std::fs::read_to_string(path).map_err(|e| LedgerError::CsvRead {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(self.import_csv(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;
    use crate::db::repository::TRANSACTIONS_KEY;
    use crate::models::transaction::MAX_AMOUNT;
    use crate::operations::export::{DEFAULT_DATE_FORMAT, encode_csv};
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_store() -> TransactionStore<Connection> {
        TransactionStore::load(establish_test_connection().unwrap())
    }

    fn write_temp_csv(contents: &[u8]) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().expect("Failed to create temp file");
        tmp.write_all(contents).expect("Failed to write test CSV");
        tmp
    }

    #[test]
    fn test_parse_csv_line_plain_fields() {
        assert_eq!(parse_csv_line("a,b,,c"), vec!["a", "b", "", "c"]);
        assert_eq!(parse_csv_line(""), vec![""]);
    }

    #[test]
    fn test_parse_csv_line_quoted_fields() {
        assert_eq!(
            parse_csv_line(r#""1/2/2025","Lunch, with team","12.00","food","expense""#),
            vec!["1/2/2025", "Lunch, with team", "12.00", "food", "expense"]
        );
    }

    #[test]
    fn test_parse_csv_line_escaped_quotes() {
        assert_eq!(
            parse_csv_line(r#""x","He said ""hi""","1""#),
            vec!["x", r#"He said "hi""#, "1"]
        );
    }

    #[test]
    fn test_parse_csv_line_quote_mid_field_and_unterminated() {
        assert_eq!(parse_csv_line(r#"ab"c,d"e"#), vec!["abc,de"]);
        assert_eq!(parse_csv_line(r#""open,field"#), vec!["open,field"]);
    }

    #[test]
    fn test_import_csv_success() {
        let mut store = create_test_store();
        let csv = "Date,Description,Amount,Category,Type\n\
                   \"11/10/2025\",\"Salary\",\"1500.00\",\"salary\",\"income\"\r\n\
                   \"11/11/2025\",\"Coffee\",\"3.50\",\"food\",\"expense\"";

        let count = store.import_csv(csv);

        assert_eq!(count, 2);
        assert_eq!(store.list().len(), 2);
        assert_eq!(store.list()[0].description, "Salary");
        assert_eq!(store.list()[0].transaction_type, TransactionType::Income);
        assert_eq!(store.list()[1].amount, Decimal::from_str("3.50").unwrap());
        assert_eq!(store.list()[1].category, Category::Food);
        assert!(store.storage().get_item(TRANSACTIONS_KEY).unwrap().is_some());
    }

    #[test]
    fn test_import_batch_goes_before_existing_records() {
        let mut store = create_test_store();
        store.add("Existing", "1", "other", "expense").unwrap();

        store.import_csv("h\n,A,1,food,expense\n,B,2,food,expense");

        let descriptions: Vec<&str> =
            store.list().iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["A", "B", "Existing"]);
    }

    #[test]
    fn test_import_assigns_fresh_ids_and_import_time() {
        let mut store = create_test_store();
        let before = Utc::now();

        store.import_csv("h\n\"01/01/1999\",A,1,food,expense\n\"01/01/1999\",A,1,food,expense");

        let list = store.list();
        assert_ne!(list[0].id, list[1].id);
        assert!(list.iter().all(|t| t.date >= before));
    }

    #[test]
    fn test_import_header_only() {
        let mut store = create_test_store();

        assert_eq!(store.import_csv("Date,Description,Amount,Category,Type"), 0);
        assert_eq!(store.import_csv(""), 0);
        assert!(store.list().is_empty());
        assert_eq!(store.storage().get_item(TRANSACTIONS_KEY).unwrap(), None);
    }

    #[test]
    fn test_import_skips_invalid_rows() {
        let mut store = create_test_store();
        let csv = "Date,Description,Amount,Category,Type\n\
                   \n\
                   d,Too,few,fields\n\
                   d,,1,food,expense\n\
                   d,Bad amount,abc,food,expense\n\
                   d,No category,1,,expense\n\
                   d,No type,1,food,\n\
                   d,Transfer,1,food,transfer\n\
                   d,Negative,-5,food,expense\n\
                   d,Too large,2e12,food,expense\n\
                   d,Marker only,1,',expense\n\
                   d,Good,5,food,expense";

        assert_eq!(store.import_csv(csv), 1);
        assert_eq!(store.list()[0].description, "Good");
    }

    #[test]
    fn test_import_treats_quote_only_description_as_blank() {
        let mut store = create_test_store();
        let csv = "h\nd,\"\"\"\"\"\",1,food,expense\nd,'\"He said \"\"hi\"\"\",1,food,expense";

        assert_eq!(store.import_csv(csv), 1);
        assert_eq!(store.list()[0].description, "He said \"hi\"");
    }

    #[test]
    fn test_import_accepts_foreign_categories_and_extra_columns() {
        let mut store = create_test_store();
        let count = store.import_csv("h\nd,Books,20,Education,Expense,extra");

        assert_eq!(count, 1);
        assert_eq!(store.list()[0].category, Category::Custom("Education".to_string()));
        assert_eq!(store.list()[0].transaction_type, TransactionType::Expense);
    }

    #[test]
    fn test_import_strips_one_formula_marker() {
        let mut store = create_test_store();
        let csv = "h\n\"d\",\"'=SUM(A1)\",\"1\",\"other\",\"expense\"\nd,''x,1,other,expense";
        store.import_csv(csv);

        assert_eq!(store.list()[0].description, "=SUM(A1)");
        assert_eq!(store.list()[1].description, "'x");
    }

    #[test]
    fn test_import_strips_formula_marker_from_category() {
        let mut store = create_test_store();
        store.import_csv("h\n\"d\",\"x\",\"1\",\"'@cat\",\"expense\"\nd,y,1,''+gift,income");

        assert_eq!(store.list()[0].category, Category::Custom("@cat".to_string()));
        assert_eq!(store.list()[1].category, Category::Custom("'+gift".to_string()));
    }

    #[test]
    fn test_import_amount_grammar_matches_add() {
        let mut store = create_test_store();
        let csv = "h\nd,Rent,\"8e2\",utilities,expense\nd,Cap,1000000000000,other,income";

        assert_eq!(store.import_csv(csv), 2);
        assert_eq!(store.list()[0].amount, Decimal::new(800, 0));
        assert_eq!(store.list()[1].amount, MAX_AMOUNT);
        assert!(store.add("Rent", "8e2", "utilities", "expense").is_ok());
        assert_eq!(store.summarize().total_income, MAX_AMOUNT);
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let mut source = create_test_store();
        source.add("He said \"hi\"", "4.50", "food", "expense").unwrap();
        source.add("=SUM(A1)", "2000", "salary", "income").unwrap();
        source.add("Rent, March", "800", "utilities", "expense").unwrap();
        source.add("Raffle", "5", "@cat", "income").unwrap();
        let csv = source.export_csv(DEFAULT_DATE_FORMAT).unwrap();

        let mut target = create_test_store();
        assert_eq!(target.import_csv(&csv), source.list().len());

        for (original, imported) in source.list().iter().zip(target.list()) {
            assert_eq!(imported.description, original.description);
            assert_eq!(imported.amount, original.amount);
            assert_eq!(imported.category, original.category);
            assert_eq!(imported.transaction_type, original.transaction_type);
            assert_ne!(imported.id, original.id);
        }
    }

    #[test]
    fn test_decoded_field_matches_encoded_description() {
        let tx = Transaction::new(
            "He said \"hi\"".to_string(),
            Decimal::ONE,
            Category::Other,
            TransactionType::Expense,
            Utc::now(),
        );
        let csv = encode_csv(&[tx], DEFAULT_DATE_FORMAT).unwrap();
        let row = csv.lines().nth(1).unwrap();

        assert_eq!(parse_csv_line(row)[1], "He said \"hi\"");
    }

    #[test]
    fn test_import_csv_file_success() {
        let mut store = create_test_store();
        let tmp = write_temp_csv(
            b"Date,Description,Amount,Category,Type\n\"x\",\"Coffee\",\"3.50\",\"food\",\"expense\"\n",
        );

        let result = store.import_csv_file(tmp.path());
        assert_eq!(result.unwrap(), 1);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let mut store = create_test_store();
        store.add("Existing", "1", "other", "expense").unwrap();

        let result = store.import_csv_file(Path::new("nonexistent.csv"));

        assert!(matches!(result, Err(LedgerError::CsvRead { .. })));
        assert!(result.unwrap_err().to_string().contains("Failed to read file"));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_import_non_utf8_file() {
        let mut store = create_test_store();
        let tmp = write_temp_csv(&[0xff, 0xfe, 0x00, 0x41]);

        let result = store.import_csv_file(tmp.path());
        assert!(matches!(result, Err(LedgerError::CsvRead { .. })));
        assert!(store.list().is_empty());
    }
}
