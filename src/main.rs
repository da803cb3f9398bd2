mod config;
mod db;
mod error;
mod models;
mod operations;
mod store;

use chrono::Local;
use clap::Parser;
use config::AppConfig;
use models::category::Category;
use models::transaction::{Transaction, TransactionType, format_money};
use operations::export::{CSV_MIME_TYPE, export_file_name};
use operations::preferences::{load_language, load_theme, toggle_language, toggle_theme};
use rusqlite::Connection;
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use store::TransactionStore;
use tracing_subscriber::EnvFilter;

pub enum UserCommands {
    Add,
    Edit,
    Remove,
    Print,
    Summary,
    Breakdown,
    Search,
    Export,
    Import,
    Theme,
    Language,
    Exit,
}

fn main() {
    let config = AppConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log))
        .with_writer(io::stderr)
        .init();

    let conn = match db::connection::establish_connection(&config.db) {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Failed to open ledger database '{}': {}", config.db.display(), e);
            process::exit(1);
        }
    };
    let mut store = TransactionStore::load(conn);

    println!("Welcome to pocket ledger!");
    println!(
        "Theme: {}, language: {}",
        load_theme(store.storage()).as_str(),
        load_language(store.storage()).as_str()
    );

    loop {
        println!(
            "Please enter a command (add, edit, remove, print, summary, breakdown, search, export, import, theme, language, exit):"
        );

        let input = match read_user_input() {
            Ok(cmd) => cmd,
            Err(e) => {
                println!("{}", e);
                break;
            }
        };
        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }
        let command = match check_for_command(parts[0]) {
            Some(command) => command,
            None => {
                println!("Unknown command '{}'.", parts[0]);
                continue;
            }
        };

        match command {
            UserCommands::Add => {
                println!(
                    "Enter transaction details in the format:\ndescription, amount, category({}), type(income/expense)",
                    known_categories()
                );
                let Some(fields) = prompt_fields() else { continue };
                match store.add(&fields[0], &fields[1], &fields[2], &fields[3]) {
                    Ok(tx) => println!("Transaction {} added successfully!", tx.id),
                    Err(e) => {
                        println!("Error adding transaction: {}", e);
                        println!("Please try again.");
                    }
                }
            }
            UserCommands::Edit => {
                println!("Provide the transaction ID to edit:");
                let Ok(id) = read_user_input() else { continue };
                let Some(existing) = store.list().iter().find(|t| t.id == id) else {
                    println!("Transaction with ID {} not found.", id);
                    continue;
                };
                println!("Current: {}", describe(existing));
                println!("Enter new details: description, amount, category, type(income/expense)");
                let Some(fields) = prompt_fields() else { continue };
                match store.update(&id, &fields[0], &fields[1], &fields[2], &fields[3]) {
                    Ok(_) => println!("Transaction updated successfully!"),
                    Err(e) => println!("Error updating transaction: {}", e),
                }
            }
            UserCommands::Remove => {
                println!("Provide the transaction ID to remove:");
                let Ok(id) = read_user_input() else { continue };
                println!("Are you sure you want to delete this transaction? (y/n)");
                match read_user_input() {
                    Ok(answer) if answer.eq_ignore_ascii_case("y") => {
                        if store.remove(&id) {
                            println!("Transaction removed successfully.");
                        } else {
                            println!("Transaction with ID {} not found.", id);
                        }
                    }
                    _ => println!("Deletion cancelled."),
                }
            }
            UserCommands::Print => {
                if store.list().is_empty() {
                    println!("No transactions yet. Add your first transaction to get started!");
                }
                for transaction in store.list() {
                    println!("{}", describe(transaction));
                }
            }
            UserCommands::Summary => {
                let summary = store.summarize();
                println!("Balance:        ${}", format_money(summary.balance));
                println!("Total income:   ${}", format_money(summary.total_income));
                println!("Total expenses: ${}", format_money(summary.total_expenses));
                println!("Transactions:   {}", summary.count);
            }
            UserCommands::Breakdown => {
                let kind = match parts.get(1).map(|s| s.parse::<TransactionType>()) {
                    None => TransactionType::Expense,
                    Some(Ok(kind)) => kind,
                    Some(Err(e)) => {
                        println!("{}", e);
                        continue;
                    }
                };
                let breakdown = store.category_breakdown(kind);
                if breakdown.is_empty() {
                    println!("No {} transactions.", kind);
                }
                for (category, total) in breakdown {
                    println!("{:<15} ${}", category.label(), format_money(total));
                }
            }
            UserCommands::Search => {
                println!("Provide the category to search for:");
                let Ok(category) = read_user_input() else { continue };
                let results = store.search_by_category(&category);
                if results.is_empty() {
                    println!("No transactions found for category: {}", category);
                } else {
                    println!("Transactions found for category '{}':", category);
                    for transaction in results {
                        println!("{}", describe(transaction));
                    }
                }
            }
            UserCommands::Export => {
                let path = parts
                    .get(1)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(export_file_name(Local::now().date_naive())));
                match store.export_csv_file(&path, &config.date_format) {
                    Ok(count) => println!(
                        "Exported {} transactions to {} ({}).",
                        count,
                        path.display(),
                        CSV_MIME_TYPE
                    ),
                    Err(e) => println!("Error exporting transactions: {}", e),
                }
            }
            UserCommands::Import => {
                println!("Enter the path of the CSV file to import:");
                let Ok(path) = read_user_input() else { continue };
                match store.import_csv_file(Path::new(&path)) {
                    Ok(0) => println!("No valid transactions found in CSV!"),
                    Ok(count) => println!("Successfully imported {} transactions.", count),
                    Err(e) => println!("Error importing transactions: {}", e),
                }
            }
            UserCommands::Theme => match toggle_theme(store.storage()) {
                Ok(theme) => println!("Theme updated to {}.", theme.as_str()),
                Err(e) => println!("Error saving theme: {}", e),
            },
            UserCommands::Language => match toggle_language(store.storage()) {
                Ok(language) => println!("Language updated to {}.", language.as_str()),
                Err(e) => println!("Error saving language: {}", e),
            },
            UserCommands::Exit => {
                println!("Exiting the application.");
                break;
            }
        }

        warn_on_storage_failure(&mut store);
    }
}

fn warn_on_storage_failure(store: &mut TransactionStore<Connection>) {
    if let Some(e) = store.take_storage_warning() {
        println!("Warning: changes could not be saved: {}", e);
    }
}

fn known_categories() -> String {
    Category::KNOWN
        .iter()
        .map(|c| c.key())
        .collect::<Vec<_>>()
        .join("/")
}

fn describe(transaction: &Transaction) -> String {
    let date = transaction.date.with_timezone(&Local).date_naive();
    format!(
        "{}  {} • {}  {}  [{}]",
        transaction.description,
        transaction.category.label(),
        date,
        transaction.display_amount(),
        transaction.id
    )
}

/// Reads `description, amount, category, type` from one line.
fn prompt_fields() -> Option<Vec<String>> {
    let input = match read_user_input() {
        Ok(details) => details,
        Err(e) => {
            println!("Error reading input: {}", e);
            return None;
        }
    };
    let fields: Vec<String> = input.split(',').map(|s| s.trim().to_string()).collect();
    if fields.len() != 4 {
        println!(
            "Invalid number of details provided. Expected 4 details separated by commas but got {}",
            fields.len()
        );
        return None;
    }
    Some(fields)
}

fn read_user_input() -> Result<String, String> {
    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .map_err(|_| "Failed to read line".to_string())?;
    if read == 0 {
        return Err("End of input.".to_string());
    }
    Ok(input.trim().to_string())
}

fn check_for_command(input: &str) -> Option<UserCommands> {
    match input {
        "add" => Some(UserCommands::Add),
        "edit" => Some(UserCommands::Edit),
        "remove" => Some(UserCommands::Remove),
        "print" => Some(UserCommands::Print),
        "summary" => Some(UserCommands::Summary),
        "breakdown" => Some(UserCommands::Breakdown),
        "search" => Some(UserCommands::Search),
        "export" => Some(UserCommands::Export),
        "import" => Some(UserCommands::Import),
        "theme" => Some(UserCommands::Theme),
        "language" => Some(UserCommands::Language),
        "exit" => Some(UserCommands::Exit),
        _ => None,
    }
}
