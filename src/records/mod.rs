pub mod ingest;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Normalized housing arrangement derived from the free-text "Live out type"
/// column. Anything other than the two exact codes maps to `Unknown`,
/// including wrong-case or empty values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiveType {
    LiveIn,
    LiveOut,
    Unknown,
}

impl LiveType {
    pub fn from_raw(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("CC") => Self::LiveIn,
            Some("CC (Live out)") => Self::LiveOut,
            _ => Self::Unknown,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LiveIn => "Live In",
            Self::LiveOut => "Live Out",
            Self::Unknown => "Unknown",
        }
    }
}

/// Visa bucket used for landing thresholds. Only "Entry Visa" is special;
/// tourist visas, blanks, missing values and anything unexpected all share
/// the tourist thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisaKind {
    Entry,
    Tourist,
}

impl VisaKind {
    pub fn from_raw(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("Entry Visa") => Self::Entry,
            _ => Self::Tourist,
        }
    }

    /// Days after landing beyond which a case becomes an alert.
    pub const fn alert_threshold(self) -> i64 {
        match self {
            Self::Entry => 3,
            Self::Tourist => 8,
        }
    }

    /// Exact day count at which a case is at risk (one day before alerting).
    pub const fn risk_threshold(self) -> i64 {
        self.alert_threshold() - 1
    }
}

/// One parsed case row. Raw free-text fields are kept verbatim; normalized
/// views are derived on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub name: String,
    pub id: Option<String>,
    pub nationality: Option<String>,
    pub live_out_type: Option<String>,
    pub visa_step: Option<String>,
    pub pending_task: Option<String>,
    pub visa_type: Option<String>,
    /// Landing timestamp when the raw value parsed; `None` keeps the record
    /// out of alerting without failing the batch.
    pub landed_at: Option<NaiveDateTime>,
    /// Raw landing cell as uploaded, preserved for display.
    pub landed_raw: Option<String>,
    pub gcc_status: Option<String>,
    pub gcc_ref_date: Option<String>,
}

impl CaseRecord {
    pub fn live_type(&self) -> LiveType {
        LiveType::from_raw(self.live_out_type.as_deref())
    }

    pub fn visa_kind(&self) -> VisaKind {
        VisaKind::from_raw(self.visa_type.as_deref())
    }
}

/// Presence flags for the columns whose absence changes behavior, detected
/// once from the header row rather than per record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SchemaCapabilities {
    pub name: bool,
    pub visa_step: bool,
    pub live_type: bool,
    pub id: bool,
}

impl SchemaCapabilities {
    pub fn detect(headers: &csv::StringRecord) -> Self {
        let has = |column: &str| headers.iter().any(|header| header.trim() == column);
        Self {
            name: has(ingest::COL_NAME),
            visa_step: has(ingest::COL_VISA_STEP),
            live_type: has(ingest::COL_LIVE_TYPE),
            id: has(ingest::COL_ID),
        }
    }
}

/// A parsed record set plus what its header row actually provided.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<CaseRecord>,
    capabilities: SchemaCapabilities,
}

impl RecordSet {
    pub fn new(records: Vec<CaseRecord>, capabilities: SchemaCapabilities) -> Self {
        Self {
            records,
            capabilities,
        }
    }

    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn capabilities(&self) -> SchemaCapabilities {
        self.capabilities
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CaseRecord> {
        self.records.iter()
    }
}
