//! Backup and spreadsheet export formats.
//!
//! A backup is a single JSON document holding every entry, the settings
//! and the moment it was taken. The CSV export is one row per entry with
//! the engine's outputs rounded to two places.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calculation::{
    HoursMode, compute_earnings, compute_overtime_minutes, compute_worked_hours,
};
use crate::config::{PayPolicy, PolicyLoader};
use crate::error::{EngineError, EngineResult};
use crate::models::ShiftRecord;

/// Header row of the CSV export.
pub const CSV_HEADER: &str = concat!(
    "Date,Start Time,End Time,Lunch Start,Lunch End,",
    "Total Hours,Rate,Earnings,Overtime Minutes,Notes,Holiday,Holiday Worked"
);

/// A full backup document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
    /// Every stored entry.
    pub entries: Vec<ShiftRecord>,
    /// The stored policy.
    pub settings: PayPolicy,
    /// When the backup was produced.
    pub export_date: DateTime<Utc>,
}

impl Backup {
    /// Snapshots the given entries and policy at `export_date`.
    pub fn new(entries: &[ShiftRecord], settings: &PayPolicy, export_date: DateTime<Utc>) -> Self {
        Self {
            entries: entries.to_vec(),
            settings: settings.clone(),
            export_date,
        }
    }

    /// Pretty-printed JSON for download.
    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::InvalidBackup {
            message: e.to_string(),
        })
    }
}

/// Parses a backup document into entries and a policy.
///
/// Both `entries` and `settings` must be present; anything else is
/// rejected. Settings go through the same default merge as stored ones, so
/// backups written by older versions still load. `exportDate` is optional.
pub fn parse_backup(json: &str) -> EngineResult<(Vec<ShiftRecord>, PayPolicy)> {
    let document: Value = serde_json::from_str(json).map_err(|e| EngineError::InvalidBackup {
        message: e.to_string(),
    })?;

    let Value::Object(mut fields) = document else {
        return Err(EngineError::InvalidBackup {
            message: "expected a JSON object".to_string(),
        });
    };

    let (Some(entries), Some(settings)) = (fields.remove("entries"), fields.remove("settings"))
    else {
        return Err(EngineError::InvalidBackup {
            message: "both 'entries' and 'settings' are required".to_string(),
        });
    };

    let entries: Vec<ShiftRecord> =
        serde_json::from_value(entries).map_err(|e| EngineError::InvalidBackup {
            message: format!("entries: {}", e),
        })?;

    if !settings.is_object() {
        return Err(EngineError::InvalidBackup {
            message: "settings must be an object".to_string(),
        });
    }

    Ok((entries, PolicyLoader::merge_with_defaults(settings)))
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

fn two_places(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// One CSV row for an entry, using the wage hours and earnings.
pub fn csv_row(record: &ShiftRecord, policy: &PayPolicy) -> String {
    [
        record.date.to_string(),
        record.start_time.clone(),
        record.end_time.clone(),
        record.lunch_start.clone(),
        record.lunch_end.clone(),
        two_places(compute_worked_hours(record, policy, HoursMode::Wage)),
        two_places(record.base_rate(policy)),
        two_places(compute_earnings(record, policy)),
        compute_overtime_minutes(record, policy).to_string(),
        quote(&record.notes),
        record.is_holiday.to_string(),
        record.holiday_worked.to_string(),
    ]
    .join(",")
}

/// Renders the whole CSV document, header included.
pub fn entries_to_csv(entries: &[ShiftRecord], policy: &PayPolicy) -> String {
    std::iter::once(CSV_HEADER.to_string())
        .chain(entries.iter().map(|record| csv_row(record, policy)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn rate_policy() -> PayPolicy {
        PayPolicy {
            hourly_rate: Decimal::new(20, 0),
            ..PayPolicy::default()
        }
    }

    #[test]
    fn test_csv_row_formats_numbers_and_quotes_notes() {
        let mut record = ShiftRecord::new("a", make_date("2026-01-12"), "09:00", "17:20");
        record.notes = "Said \"hi\", left".to_string();

        let row = csv_row(&record, &rate_policy());
        assert_eq!(
            row,
            "2026-01-12,09:00,17:20,,,8.33,20.00,166.67,0,\"Said \"\"hi\"\", left\",false,false"
        );
    }

    #[test]
    fn test_csv_document_has_header_and_rows() {
        let records = vec![
            ShiftRecord::new("a", make_date("2026-01-12"), "09:00", "17:00"),
            ShiftRecord::new("b", make_date("2026-01-11"), "09:00", "13:00"),
        ];
        let csv = entries_to_csv(&records, &rate_policy());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[2].starts_with("2026-01-11,09:00,13:00"));
        assert!(lines[2].contains(",4.00,20.00,80.00,"));
    }

    #[test]
    fn test_empty_notes_are_still_quoted() {
        let record = ShiftRecord::new("a", make_date("2026-01-12"), "09:00", "17:00");
        assert!(csv_row(&record, &rate_policy()).contains(",\"\","));
    }

    #[test]
    fn test_backup_json_uses_camel_case_keys() {
        let records = vec![ShiftRecord::new("a", make_date("2026-01-12"), "09:00", "17:00")];
        let exported_at = DateTime::parse_from_rfc3339("2026-01-20T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let json = Backup::new(&records, &rate_policy(), exported_at)
            .to_json()
            .unwrap();

        assert!(json.contains("\"exportDate\""));
        assert!(json.contains("\"startTime\": \"09:00\""));
        assert!(json.contains("\"hourlyRate\""));

        let (entries, policy) = parse_backup(&json).unwrap();
        assert_eq!(entries, records);
        assert_eq!(policy, rate_policy());
    }

    #[test]
    fn test_parse_backup_requires_entries_and_settings() {
        assert!(matches!(
            parse_backup(r#"{"entries": []}"#),
            Err(EngineError::InvalidBackup { .. })
        ));
        assert!(matches!(
            parse_backup(r#"{"settings": {}}"#),
            Err(EngineError::InvalidBackup { .. })
        ));
        assert!(matches!(
            parse_backup("[1, 2]"),
            Err(EngineError::InvalidBackup { .. })
        ));
        assert!(matches!(
            parse_backup("not json"),
            Err(EngineError::InvalidBackup { .. })
        ));
    }

    #[test]
    fn test_parse_backup_merges_partial_settings() {
        let json = r#"{
            "entries": [
                {"id": "x", "date": "2026-01-12", "startTime": "09:00", "endTime": "17:00"}
            ],
            "settings": {"hourlyRate": 25, "paidMinutes": 30}
        }"#;
        let (entries, policy) = parse_backup(json).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(policy.hourly_rate, Decimal::new(25, 0));
        assert_eq!(policy.unpaid_break_minutes, 30);
        assert_eq!(policy.default_end_time, "17:30");
    }
}
