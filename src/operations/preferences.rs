use crate::db::repository::{LANGUAGE_KEY, Storage, THEME_KEY};
use crate::error::LedgerError;
use crate::models::preferences::{Language, Theme};

pub fn load_theme(storage: &impl Storage) -> Theme {
    match storage.get_item(THEME_KEY) {
        Ok(value) => value.as_deref().map(Theme::from_stored).unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Could not read theme preference: {}", e);
            Theme::default()
        }
    }
}

pub fn load_language(storage: &impl Storage) -> Language {
    match storage.get_item(LANGUAGE_KEY) {
        Ok(value) => value.as_deref().map(Language::from_stored).unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Could not read language preference: {}", e);
            Language::default()
        }
    }
}

pub fn toggle_theme(storage: &impl Storage) -> Result<Theme, LedgerError> {
    let theme = load_theme(storage).toggled();
    storage.set_item(THEME_KEY, theme.as_str())?;
    Ok(theme)
}

pub fn toggle_language(storage: &impl Storage) -> Result<Language, LedgerError> {
    let language = load_language(storage).toggled();
    storage.set_item(LANGUAGE_KEY, language.as_str())?;
    Ok(language)
}
