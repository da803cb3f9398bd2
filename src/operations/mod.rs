pub mod add;
pub mod edit;
pub mod export;
pub mod import;
pub mod preferences;
pub mod remove;
pub mod search_by_category;
pub mod summary;
