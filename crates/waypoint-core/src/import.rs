//! Bulk transaction import from CSV
//!
//! Expected headers (any order, case-insensitive): `type`, `category`,
//! `amount`, `date`, `description`. Malformed rows never abort the import:
//! they are collected with the raw row echoed back, and every valid row is
//! still written.

use std::io::Read;

use chrono::NaiveDate;
use csv::{ByteRecord, ReaderBuilder, StringRecord};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{today, NewTransaction, OwnerId, Recurrence, TransactionType};
use crate::store::TransactionStore;
use crate::transactions::validate_transaction;

pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_DESCRIPTION: &str = "Bulk Import";

/// A source row that could not be imported
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportRowError {
    /// The row as it appeared in the source, keyed by header
    pub row: Value,
    #[serde(rename = "msg")]
    pub message: String,
}

/// Rows ready to insert plus the rows that were rejected while parsing
#[derive(Debug, Clone, Default)]
pub struct ParsedImport {
    pub records: Vec<NewTransaction>,
    pub errors: Vec<ImportRowError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub success_count: usize,
    pub error_count: usize,
    pub errors: Vec<ImportRowError>,
}

/// Convert a CSV record to a JSON object using headers as keys
fn record_to_json(headers: &StringRecord, record: &StringRecord) -> Value {
    let mut map = serde_json::Map::new();
    for (i, header) in headers.iter().enumerate() {
        if let Some(value) = record.get(i) {
            map.insert(header.to_string(), Value::String(value.to_string()));
        }
    }
    Value::Object(map)
}

/// Like `record_to_json`, for a row that failed UTF-8 decoding
fn byte_record_to_json(headers: &StringRecord, record: &ByteRecord) -> Value {
    let mut map = serde_json::Map::new();
    for (i, header) in headers.iter().enumerate() {
        if let Some(value) = record.get(i) {
            map.insert(
                header.to_string(),
                Value::String(String::from_utf8_lossy(value).into_owned()),
            );
        }
    }
    Value::Object(map)
}

/// Column positions for the known headers
#[derive(Debug, Default)]
struct Columns {
    transaction_type: Option<usize>,
    category: Option<usize>,
    amount: Option<usize>,
    date: Option<usize>,
    description: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut columns = Self::default();
        for (i, header) in headers.iter().enumerate() {
            match header.trim().to_lowercase().as_str() {
                "type" => columns.transaction_type = Some(i),
                "category" => columns.category = Some(i),
                "amount" => columns.amount = Some(i),
                "date" => columns.date = Some(i),
                "description" => columns.description = Some(i),
                _ => {}
            }
        }
        columns
    }
}

/// Non-empty trimmed value of a column
fn field(record: &StringRecord, column: Option<usize>) -> Option<&str> {
    column
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Parse a date string in the common formats
fn parse_date(s: &str) -> Option<NaiveDate> {
    let formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        // ISO timestamps: keep the date part
        .or_else(|| s.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

/// Parse an amount, ignoring thousands separators and spaces
fn parse_amount(s: &str) -> Option<f64> {
    s.replace([',', ' '], "").parse::<f64>().ok()
}

fn parse_row(
    record: &StringRecord,
    columns: &Columns,
    today: NaiveDate,
) -> std::result::Result<NewTransaction, String> {
    let (raw_type, raw_amount) = match (
        field(record, columns.transaction_type),
        field(record, columns.amount),
    ) {
        (Some(t), Some(a)) => (t, a),
        _ => return Err("Missing amount or type".to_string()),
    };

    let transaction_type: TransactionType = raw_type.parse()?;

    let amount = parse_amount(raw_amount)
        .filter(|a| a.is_finite() && *a > 0.0)
        .ok_or_else(|| format!("Invalid amount: {}", raw_amount))?;

    let date = match field(record, columns.date) {
        Some(raw) => parse_date(raw).ok_or_else(|| format!("Unable to parse date: {}", raw))?,
        None => today,
    };

    Ok(NewTransaction {
        transaction_type,
        category: field(record, columns.category)
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string(),
        amount,
        description: field(record, columns.description)
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string(),
        is_recurring: false,
        is_locked: false,
        recurrence: Recurrence::None,
        date,
    })
}

/// Parse CSV rows, dating rows without a date on `today`
pub fn parse_csv_at<R: Read>(reader: R, today: NaiveDate) -> Result<ParsedImport> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: StringRecord = rdr
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect::<Vec<_>>()
        .into();
    let columns = Columns::from_headers(&headers);
    let mut parsed = ParsedImport::default();

    // Undecodable rows are reported like any other bad row
    for result in rdr.byte_records() {
        let record = match StringRecord::from_byte_record(result?) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e.utf8_error(), "Skipping row that is not valid UTF-8");
                parsed.errors.push(ImportRowError {
                    row: byte_record_to_json(&headers, &e.into_byte_record()),
                    message: "Row is not valid UTF-8".to_string(),
                });
                continue;
            }
        };
        match parse_row(&record, &columns, today) {
            Ok(tx) => parsed.records.push(tx),
            Err(message) => parsed.errors.push(ImportRowError {
                row: record_to_json(&headers, &record),
                message,
            }),
        }
    }

    debug!(
        parsed = parsed.records.len(),
        rejected = parsed.errors.len(),
        "Parsed CSV import"
    );
    Ok(parsed)
}

pub fn parse_csv<R: Read>(reader: R) -> Result<ParsedImport> {
    parse_csv_at(reader, today())
}

/// Insert every valid record and report the rejected ones
///
/// Records are re-validated; any that fail join `errors` instead of aborting
/// the batch.
pub fn import_records<S: TransactionStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    records: Vec<NewTransaction>,
    mut errors: Vec<ImportRowError>,
) -> Result<ImportReport> {
    let mut valid = Vec::with_capacity(records.len());
    for record in records {
        match validate_transaction(&record) {
            Ok(()) => valid.push(record),
            Err(e) => {
                warn!(owner, error = %e, "Rejected import record");
                errors.push(ImportRowError {
                    row: serde_json::to_value(&record)?,
                    message: e.to_string(),
                });
            }
        }
    }

    let success_count = if valid.is_empty() {
        0
    } else {
        store.insert_transactions(owner, &valid)?
    };

    info!(
        owner,
        imported = success_count,
        rejected = errors.len(),
        "Import complete"
    );
    Ok(ImportReport {
        success_count,
        error_count: errors.len(),
        errors,
    })
}

/// Parse a CSV source and import it for `owner`
pub fn import_csv<R: Read, S: TransactionStore + ?Sized>(
    store: &S,
    owner: OwnerId,
    reader: R,
) -> Result<ImportReport> {
    let parsed = parse_csv(reader)?;
    import_records(store, owner, parsed.records, parsed.errors)
}
