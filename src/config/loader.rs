//! Pay policy loading.
//!
//! This module provides the [`PolicyLoader`] type, which reads a policy from
//! a YAML or JSON file and merges it field by field against
//! [`PayPolicy::default`].

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

use super::types::PayPolicy;

/// Key used by early versions of the settings blob for the unpaid break.
const LEGACY_BREAK_KEY: &str = "paidMinutes";
const BREAK_KEY: &str = "unpaidBreakMinutes";

/// Loads pay policies and merges stored values against the defaults.
///
/// # Example
///
/// ```no_run
/// use timepulse_engine::config::PolicyLoader;
///
/// let policy = PolicyLoader::load("./config/default_policy.yaml")?;
/// println!("Default shift: {}-{}", policy.default_start_time, policy.default_end_time);
/// # Ok::<(), timepulse_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyLoader;

impl PolicyLoader {
    /// Loads a policy file. Files ending in `.json` are parsed as JSON,
    /// anything else as YAML.
    ///
    /// Returns `ConfigNotFound` when the file cannot be read and
    /// `ConfigParseError` when it is not a mapping.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<PayPolicy> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let value = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str::<Value>(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?
        } else {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                    path: path_str.clone(),
                    message: e.to_string(),
                })?;
            serde_json::to_value(yaml).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?
        };

        if !value.is_object() {
            return Err(EngineError::ConfigParseError {
                path: path_str,
                message: "policy must be a mapping".to_string(),
            });
        }

        debug!(path = %path_str, "Loaded pay policy file");
        Ok(Self::merge_with_defaults(value))
    }

    /// Merges a stored settings value against the default policy.
    ///
    /// Unknown keys are ignored. A key whose value cannot be read as the
    /// field's type keeps the default instead of failing the whole policy.
    /// The legacy `paidMinutes` key is renamed to `unpaidBreakMinutes` when
    /// the latter is absent. Anything other than a JSON object yields the
    /// defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use timepulse_engine::config::PolicyLoader;
    ///
    /// let stored = serde_json::json!({"paidMinutes": 30, "hourlyRate": "oops"});
    /// let policy = PolicyLoader::merge_with_defaults(stored);
    /// assert_eq!(policy.unpaid_break_minutes, 30);
    /// assert!(policy.hourly_rate.is_zero());
    /// ```
    pub fn merge_with_defaults(stored: Value) -> PayPolicy {
        let Value::Object(mut stored) = stored else {
            return PayPolicy::default();
        };
        migrate_legacy_keys(&mut stored);

        if let Ok(policy) = serde_json::from_value::<PayPolicy>(Value::Object(stored.clone())) {
            return policy;
        }

        let mut merged = match serde_json::to_value(PayPolicy::default()) {
            Ok(Value::Object(map)) => map,
            _ => return PayPolicy::default(),
        };

        for (key, value) in stored {
            if !merged.contains_key(&key) {
                continue;
            }
            let previous = merged.insert(key.clone(), value);
            if serde_json::from_value::<PayPolicy>(Value::Object(merged.clone())).is_err() {
                warn!(field = %key, "Ignoring unreadable policy field, keeping default");
                if let Some(previous) = previous {
                    merged.insert(key, previous);
                }
            }
        }

        serde_json::from_value(Value::Object(merged)).unwrap_or_default()
    }
}

fn migrate_legacy_keys(stored: &mut Map<String, Value>) {
    if let Some(legacy) = stored.remove(LEGACY_BREAK_KEY) {
        if !stored.contains_key(BREAK_KEY) {
            stored.insert(BREAK_KEY.to_string(), legacy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DateFormat, TimeFormat};
    use rust_decimal::Decimal;
    use serde_json::json;

    fn temp_file(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("timepulse-loader-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_shipped_default_policy() {
        let policy = PolicyLoader::load("./config/default_policy.yaml").unwrap();
        assert_eq!(policy.default_start_time, "09:00");
        assert_eq!(policy.default_end_time, "17:30");
        assert_eq!(policy.ot_rate_multiplier, Decimal::new(15, 1));
    }

    #[test]
    fn test_load_yaml_partial_policy() {
        let path = temp_file(
            "policy.yaml",
            concat!(
                "hourlyRate: 20\n",
                "roundingEnabled: true\n",
                "clockInRoundingMinutes: 4\n",
                "dateFormat: DD/MM/YYYY\n",
            ),
        );
        let policy = PolicyLoader::load(&path).unwrap();
        assert_eq!(policy.hourly_rate, Decimal::new(20, 0));
        assert!(policy.rounding_enabled);
        assert_eq!(policy.clock_in_rounding_minutes, 4);
        assert_eq!(policy.date_format, DateFormat::DayMonthYear);
        assert_eq!(policy.time_format, TimeFormat::TwelveHour);
    }

    #[test]
    fn test_load_json_policy() {
        let path = temp_file("policy.json", r#"{"otEnabled": true, "otThresholdMinutes": 15}"#);
        let policy = PolicyLoader::load(&path).unwrap();
        assert!(policy.ot_enabled);
        assert_eq!(policy.ot_threshold_minutes, 15);
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = PolicyLoader::load("/nonexistent/policy.yaml");
        assert!(matches!(result, Err(EngineError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_non_mapping_returns_parse_error() {
        let path = temp_file("policy.yaml", "- just\n- a list\n");
        let result = PolicyLoader::load(&path);
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let path = temp_file("policy.yaml", "hourlyRate: [unclosed\n");
        let result = PolicyLoader::load(&path);
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_legacy_break_key_is_migrated() {
        let policy = PolicyLoader::merge_with_defaults(json!({"paidMinutes": 45}));
        assert_eq!(policy.unpaid_break_minutes, 45);
    }

    #[test]
    fn test_current_break_key_wins_over_legacy() {
        let policy =
            PolicyLoader::merge_with_defaults(json!({"paidMinutes": 45, "unpaidBreakMinutes": 30}));
        assert_eq!(policy.unpaid_break_minutes, 30);
    }

    #[test]
    fn test_unreadable_field_falls_back_to_default() {
        let policy = PolicyLoader::merge_with_defaults(json!({
            "hourlyRate": 18,
            "otThresholdMinutes": "fifteen",
            "theme": "neon"
        }));
        assert_eq!(policy.hourly_rate, Decimal::new(18, 0));
        assert_eq!(policy.ot_threshold_minutes, 0);
        assert_eq!(policy.theme, crate::config::Theme::Light);
    }

    #[test]
    fn test_non_object_yields_defaults() {
        assert_eq!(PolicyLoader::merge_with_defaults(json!(null)), PayPolicy::default());
        assert_eq!(PolicyLoader::merge_with_defaults(json!([1, 2])), PayPolicy::default());
    }
}
