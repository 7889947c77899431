//! CSV ingestion for the merged crash extract.

use std::path::Path;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::dataset::record::CrashRecord;
use crate::dataset::{Columns, Dataset};
use crate::error::EngineResult;

/// Datetime layouts seen in the merged extract, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Load the dataset from a CSV file, capping at `max_rows` rows when given.
///
/// Column presence is captured from the header row; `year`/`month`/`day`
/// are derived from `crash_datetime`, with unparseable values coerced to
/// `None` rather than failing the load. An empty file yields an empty
/// dataset, not an error.
pub fn load_csv(path: &Path, max_rows: Option<usize>) -> EngineResult<Dataset> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let columns = Columns::from_headers(reader.headers()?.iter());

    let mut records = Vec::new();
    for row in reader.deserialize() {
        if max_rows.is_some_and(|cap| records.len() >= cap) {
            break;
        }
        let mut record: CrashRecord = row?;
        if let Some((year, month, day)) = crash_date_parts(record.crash_datetime.as_deref()) {
            record.year = Some(year);
            record.month = Some(month);
            record.day = Some(day);
        }
        records.push(record);
    }

    log::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(Dataset::new(records, columns))
}

fn crash_date_parts(raw: Option<&str>) -> Option<(i32, u32, u32)> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some((parsed.year(), parsed.month(), parsed.day()));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(raw, format) {
            return Some((parsed.year(), parsed.month(), parsed.day()));
        }
    }
    None
}
