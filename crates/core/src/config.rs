//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the session. The core never reads process-wide environment variables itself;
//! binaries read them and hand the raw values to the `*_from_env_value` helpers below.

use crate::catalog::CaseCatalog;
use crate::constants::DEFAULT_TICKET_BUDGET;
use crate::{QuizError, QuizResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizConfig {
    ticket_budget: u32,
    seed: Option<u64>,
    catalog_path: Option<PathBuf>,
}

impl QuizConfig {
    /// Create a new `QuizConfig`.
    ///
    /// `seed` makes case selection reproducible; `None` seeds from OS entropy.
    /// `catalog_path` selects a YAML catalog; `None` uses the embedded catalog.
    pub fn new(
        ticket_budget: u32,
        seed: Option<u64>,
        catalog_path: Option<PathBuf>,
    ) -> QuizResult<Self> {
        if ticket_budget == 0 {
            return Err(QuizError::InvalidConfig(
                "ticket budget must be at least 1".into(),
            ));
        }

        Ok(Self {
            ticket_budget,
            seed,
            catalog_path,
        })
    }

    pub fn ticket_budget(&self) -> u32 {
        self.ticket_budget
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            ticket_budget: DEFAULT_TICKET_BUDGET,
            seed: None,
            catalog_path: None,
        }
    }
}

/// Load the catalog named by `config`, or the embedded one.
pub fn resolve_catalog(config: &QuizConfig) -> QuizResult<CaseCatalog> {
    match config.catalog_path() {
        Some(path) => {
            if !path.is_file() {
                return Err(QuizError::InvalidConfig(format!(
                    "catalog path {} is not a file",
                    path.display()
                )));
            }
            CaseCatalog::load(path)
        }
        None => CaseCatalog::builtin(),
    }
}

/// Parse the ticket budget from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default budget.
pub fn ticket_budget_from_env_value(value: Option<String>) -> QuizResult<u32> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        Some(v) => {
            let budget = v.parse::<u32>().map_err(|_| {
                QuizError::InvalidConfig(format!("ticket budget must be a positive integer, got {v:?}"))
            })?;
            if budget == 0 {
                return Err(QuizError::InvalidConfig(
                    "ticket budget must be at least 1".into(),
                ));
            }
            Ok(budget)
        }
        None => Ok(DEFAULT_TICKET_BUDGET),
    }
}

/// Parse an RNG seed from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `None`.
pub fn seed_from_env_value(value: Option<String>) -> QuizResult<Option<u64>> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<u64>().map_err(|_| {
                QuizError::InvalidConfig(format!("seed must be an unsigned integer, got {v:?}"))
            })
        })
        .transpose()
}

/// Parse a catalog path from an optional string value.
pub fn catalog_path_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BUILTIN_CATALOG_YAML;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_uses_eight_tickets() {
        let config = QuizConfig::default();
        assert_eq!(config.ticket_budget(), 8);
        assert_eq!(config.seed(), None);
        assert!(config.catalog_path().is_none());
    }

    #[test]
    fn test_config_rejects_zero_budget() {
        let err = QuizConfig::new(0, None, None).expect_err("zero budget");
        assert!(matches!(err, QuizError::InvalidConfig(_)));
    }

    #[test]
    fn test_ticket_budget_from_env_value() {
        assert_eq!(ticket_budget_from_env_value(None).unwrap(), 8);
        assert_eq!(ticket_budget_from_env_value(Some("  ".into())).unwrap(), 8);
        assert_eq!(ticket_budget_from_env_value(Some(" 12 ".into())).unwrap(), 12);
        assert!(ticket_budget_from_env_value(Some("0".into())).is_err());
        assert!(ticket_budget_from_env_value(Some("-3".into())).is_err());
        assert!(ticket_budget_from_env_value(Some("eight".into())).is_err());
    }

    #[test]
    fn test_seed_from_env_value() {
        assert_eq!(seed_from_env_value(None).unwrap(), None);
        assert_eq!(seed_from_env_value(Some("".into())).unwrap(), None);
        assert_eq!(seed_from_env_value(Some("42".into())).unwrap(), Some(42));
        let err = seed_from_env_value(Some("abc".into())).expect_err("bad seed");
        assert!(matches!(err, QuizError::InvalidConfig(msg) if msg.contains("abc")));
    }

    #[test]
    fn test_catalog_path_from_env_value() {
        assert_eq!(catalog_path_from_env_value(Some(" ".into())), None);
        assert_eq!(
            catalog_path_from_env_value(Some("cases.yaml".into())),
            Some(PathBuf::from("cases.yaml"))
        );
    }

    #[test]
    fn test_resolve_catalog_defaults_to_builtin() {
        let catalog = resolve_catalog(&QuizConfig::default()).unwrap();
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_resolve_catalog_reads_configured_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cases.yaml");
        fs::write(&path, BUILTIN_CATALOG_YAML).unwrap();

        let config = QuizConfig::new(8, None, Some(path)).unwrap();
        assert_eq!(resolve_catalog(&config).unwrap().len(), 4);
    }

    #[test]
    fn test_resolve_catalog_rejects_directory() {
        let temp = TempDir::new().unwrap();
        let config = QuizConfig::new(8, None, Some(temp.path().to_path_buf())).unwrap();
        let err = resolve_catalog(&config).expect_err("directory is not a catalog");
        assert!(matches!(err, QuizError::InvalidConfig(msg) if msg.contains("not a file")));
    }
}
