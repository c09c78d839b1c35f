use super::{CaseRecord, RecordSet, SchemaCapabilities};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub(crate) const COL_NAME: &str = "Housemaid Name";
pub(crate) const COL_ID: &str = "Housemaid Id";
pub(crate) const COL_VISA_STEP: &str = "Current Visa Step";
pub(crate) const COL_LIVE_TYPE: &str = "Live out type";

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read case export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid case CSV data: {0}")]
    Csv(#[from] csv::Error),
}

pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RecordSet, IngestError> {
    let file = std::fs::File::open(path)?;
    from_reader(file)
}

pub fn from_reader<R: Read>(reader: R) -> Result<RecordSet, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let capabilities = SchemaCapabilities::detect(csv_reader.headers()?);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<CaseRow>() {
        records.push(row?.into_record());
    }

    debug!(records = records.len(), "parsed case export");
    Ok(RecordSet::new(records, capabilities))
}

#[derive(Debug, Deserialize)]
struct CaseRow {
    #[serde(rename = "Housemaid Name", default)]
    name: String,
    #[serde(rename = "Housemaid Id", default, deserialize_with = "empty_as_none")]
    id: Option<String>,
    #[serde(rename = "Nationality", default, deserialize_with = "empty_as_none")]
    nationality: Option<String>,
    #[serde(rename = "Live out type", default, deserialize_with = "empty_as_none")]
    live_out_type: Option<String>,
    #[serde(
        rename = "Current Visa Step",
        default,
        deserialize_with = "empty_as_none"
    )]
    visa_step: Option<String>,
    #[serde(
        rename = "pending arrival task",
        default,
        deserialize_with = "empty_as_none"
    )]
    pending_task: Option<String>,
    #[serde(rename = "Type of Visa", default, deserialize_with = "empty_as_none")]
    visa_type: Option<String>,
    #[serde(
        rename = "Landed In Dubai",
        default,
        deserialize_with = "empty_as_none"
    )]
    landed: Option<String>,
    #[serde(rename = "GCC", default, deserialize_with = "empty_as_none")]
    gcc_status: Option<String>,
    #[serde(
        rename = "GCC Application Reference Number Upload Date",
        default,
        deserialize_with = "empty_as_none"
    )]
    gcc_ref_date: Option<String>,
}

impl CaseRow {
    fn into_record(self) -> CaseRecord {
        let landed_at = self.landed.as_deref().and_then(parse_datetime);
        CaseRecord {
            name: self.name,
            id: self.id,
            nationality: self.nationality,
            live_out_type: self.live_out_type,
            visa_step: self.visa_step,
            pending_task: self.pending_task,
            visa_type: self.visa_type,
            landed_at,
            landed_raw: self.landed,
            gcc_status: self.gcc_status,
            gcc_ref_date: self.gcc_ref_date,
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Lenient landing-date parser. Unparseable values become `None` so a single
/// bad cell never aborts the batch.
fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }

    for format in ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}
