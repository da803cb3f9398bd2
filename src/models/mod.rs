pub mod category;
pub mod preferences;
pub mod transaction;
