use crate::records::ingest::{COL_LIVE_TYPE, COL_NAME, COL_VISA_STEP};
use crate::records::{LiveType, RecordSet, SchemaCapabilities};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Which of the two compared record sets a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetSide {
    First,
    Second,
}

impl fmt::Display for SetSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetSide::First => write!(f, "first"),
            SetSide::Second => write!(f, "second"),
        }
    }
}

/// Required columns missing from one side's header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumns {
    pub side: SetSide,
    pub columns: Vec<&'static str>,
}

#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("missing required columns: {}", describe_gaps(.0))]
    Schema(Vec<MissingColumns>),
}

fn describe_gaps(gaps: &[MissingColumns]) -> String {
    gaps.iter()
        .map(|gap| format!("{} file: {}", gap.side, gap.columns.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// One pairing of a first-set record with a second-set record sharing
/// (name, visa step). Per-side ids are only carried when that side's
/// schema includes the id column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseMatch {
    pub name: String,
    pub visa_step: String,
    pub first_live_type: LiveType,
    pub second_live_type: LiveType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_id: Option<String>,
}

/// Joins two exports on the (name, visa step) composite key, in first-set
/// iteration order. When the second set holds duplicate keys, only its first
/// occurrence is paired; later duplicates are dropped.
pub fn match_sets(first: &RecordSet, second: &RecordSet) -> Result<Vec<CaseMatch>, MatchError> {
    let mut gaps = Vec::new();
    if let Some(columns) = missing_columns(first.capabilities()) {
        gaps.push(MissingColumns {
            side: SetSide::First,
            columns,
        });
    }
    if let Some(columns) = missing_columns(second.capabilities()) {
        gaps.push(MissingColumns {
            side: SetSide::Second,
            columns,
        });
    }
    if !gaps.is_empty() {
        return Err(MatchError::Schema(gaps));
    }

    let mut matches = Vec::new();
    for record in first.iter() {
        // A record missing either half of the composite key can never match;
        // a blank name cell must not pair with another blank name cell.
        if record.name.trim().is_empty() {
            continue;
        }
        let Some(step) = record.visa_step.as_deref() else {
            continue;
        };

        let counterpart = second.iter().find(|candidate| {
            candidate.name == record.name && candidate.visa_step.as_deref() == Some(step)
        });

        if let Some(counterpart) = counterpart {
            matches.push(CaseMatch {
                name: record.name.clone(),
                visa_step: step.to_string(),
                first_live_type: record.live_type(),
                second_live_type: counterpart.live_type(),
                first_id: if first.capabilities().id {
                    record.id.clone()
                } else {
                    None
                },
                second_id: if second.capabilities().id {
                    counterpart.id.clone()
                } else {
                    None
                },
            });
        }
    }

    debug!(matches = matches.len(), "cross-referenced case exports");
    Ok(matches)
}

fn missing_columns(capabilities: SchemaCapabilities) -> Option<Vec<&'static str>> {
    let mut columns = Vec::new();
    if !capabilities.name {
        columns.push(COL_NAME);
    }
    if !capabilities.visa_step {
        columns.push(COL_VISA_STEP);
    }
    if !capabilities.live_type {
        columns.push(COL_LIVE_TYPE);
    }
    (!columns.is_empty()).then_some(columns)
}
