//! Invoicing settings.
//!
//! # Responsibility
//! - Hold tunables for history storage, pagination and numbering.
//! - Load them from JSON with defaults for every missing field.
//!
//! # Invariants
//! - A validated `Settings` has a non-empty history key and `page_size > 0`.

use crate::repo::history_repo::DEFAULT_HISTORY_KEY;
use crate::service::numbering::NumberingStrategy;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read settings: {err}"),
            Self::Parse(err) => write!(f, "failed to parse settings: {err}"),
            Self::Invalid(reason) => write!(f, "invalid settings: {reason}"),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

/// Runtime tunables for the invoicing service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Store key holding the history sequence.
    pub history_key: String,
    /// Rows per history page.
    pub page_size: usize,
    pub numbering_strategy: NumberingStrategy,
    /// Empty the cart after a successful, durable finalize.
    pub clear_cart_on_finalize: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_key: DEFAULT_HISTORY_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            numbering_strategy: NumberingStrategy::LastAppended,
            clear_cart_on_finalize: false,
        }
    }
}

impl Settings {
    pub fn from_json_str(raw: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(raw).map_err(SettingsError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path).map_err(SettingsError::Io)?;
        Self::from_json_str(raw.as_str())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.history_key.trim().is_empty() {
            return Err(SettingsError::Invalid("history_key cannot be empty"));
        }
        if self.page_size == 0 {
            return Err(SettingsError::Invalid("page_size must be greater than zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Settings, SettingsError};
    use crate::service::numbering::NumberingStrategy;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings = Settings::from_json_str(r#"{"page_size": 20}"#).unwrap();
        assert_eq!(settings.page_size, 20);
        assert_eq!(settings.history_key, "invoiceHistory");
        assert_eq!(settings.numbering_strategy, NumberingStrategy::LastAppended);
    }

    #[test]
    fn parses_numbering_strategy() {
        let settings =
            Settings::from_json_str(r#"{"numbering_strategy": "highest_existing"}"#).unwrap();
        assert_eq!(
            settings.numbering_strategy,
            NumberingStrategy::HighestExisting
        );
    }

    #[test]
    fn rejects_zero_page_size_and_blank_key() {
        let err = Settings::from_json_str(r#"{"page_size": 0}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_json_str(r#"{"history_key": "  "}"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"clear_cart_on_finalize": true}"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert!(settings.clear_cart_on_finalize);
    }
}
