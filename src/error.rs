//! Error types for the TimePulse engine.
//!
//! The calculation functions themselves never fail; these errors come from
//! the shells around them (policy loading, the entry store, backups).

use thiserror::Error;

/// The main error type for the TimePulse engine.
///
/// # Example
///
/// ```
/// use timepulse_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policy.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policy.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The key-value store could not read or write a blob.
    #[error("Store error for key '{key}': {message}")]
    StoreError {
        /// The store key involved.
        key: String,
        /// A description of the failure.
        message: String,
    },

    /// A shift record was rejected before being stored.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// An imported backup did not have the expected shape.
    #[error("Invalid backup: {message}")]
    InvalidBackup {
        /// A description of the problem.
        message: String,
    },

    /// No entry with the given ID exists.
    #[error("Entry not found: {id}")]
    EntryNotFound {
        /// The missing entry ID.
        id: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/policy.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/policy.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_store_error_displays_key_and_message() {
        let error = EngineError::StoreError {
            key: "tp_entries".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Store error for key 'tp_entries': permission denied"
        );
    }

    #[test]
    fn test_invalid_shift_displays_id_and_message() {
        let error = EngineError::InvalidShift {
            shift_id: "entry_001".to_string(),
            message: "start and end time are identical".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid shift 'entry_001': start and end time are identical"
        );
    }

    #[test]
    fn test_invalid_backup_and_entry_not_found() {
        let error = EngineError::InvalidBackup {
            message: "missing settings".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid backup: missing settings");

        let error = EngineError::EntryNotFound {
            id: "abc".to_string(),
        };
        assert_eq!(error.to_string(), "Entry not found: abc");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::EntryNotFound {
                id: "missing".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
