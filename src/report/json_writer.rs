//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Writes rows to a file as a pretty-printed JSON array.
///
/// # Format
/// ```json
/// [
///   {"sender": "Alice", "messages": 2, "percentage": 66.67},
///   {"sender": "Bob", "messages": 1, "percentage": 33.33}
/// ]
/// ```
pub fn write_json<T: Serialize>(rows: &[T], output_path: &Path) -> Result<()> {
    let json = to_json(rows)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts rows to a JSON array string.
///
/// Same format as [`write_json`].
pub fn to_json<T: Serialize>(rows: &[T]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DateCount;
    use chrono::NaiveDate;

    fn quiet_days() -> Vec<DateCount> {
        vec![DateCount {
            date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            count: 0,
        }]
    }

    #[test]
    fn test_to_json_array() {
        let json = to_json(&quiet_days()).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains(r#""date": "2024-01-03""#));
        assert!(json.contains(r#""count": 0"#));

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_rows() {
        let rows: Vec<DateCount> = Vec::new();
        assert_eq!(to_json(&rows).unwrap(), "[]");
    }

    #[test]
    fn test_write_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiet.json");
        write_json(&quiet_days(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("2024-01-03"));
    }
}
