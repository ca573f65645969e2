use serde_json::{Map, Value};
use time::Date;

use crate::error::{AppError, AppResult};

/// One exported row; column order follows key insertion order
pub type CsvRecord = Map<String, Value>;

/// Serialize records to CSV. The header row is taken from the first record.
pub fn to_csv(records: &[CsvRecord]) -> AppResult<String> {
    let Some(first) = records.first() else {
        return Ok(String::new());
    };
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(&headers)?;
    for record in records {
        writer.write_record(
            headers
                .iter()
                .map(|header| cell_text(record.get(*header))),
        )?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))?;
    let mut text = String::from_utf8(bytes)
        .map_err(|e| AppError::Internal(format!("CSV export failed: {}", e)))?;

    // No trailing terminator after the last row
    if text.ends_with('\n') {
        text.pop();
    }

    Ok(text)
}

/// Download name for the respondent export, e.g. `data_responden_2025-03-01.csv`
pub fn export_filename(date: Date) -> String {
    format!(
        "data_responden_{:04}-{:02}-{:02}.csv",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
