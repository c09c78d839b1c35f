use crate::records::{CaseRecord, LiveType, RecordSet, VisaKind};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

/// Whole calendar days between landing and `now`, truncated, or `None` when
/// the landing date is absent or never parsed. `now` is always supplied by
/// the caller so the engine stays pure.
pub fn days_since_landing(record: &CaseRecord, now: NaiveDateTime) -> Option<i64> {
    record.landed_at.map(|landed| (now - landed).num_days())
}

/// One case past its visa bucket's landing threshold.
#[derive(Debug, Clone, Serialize)]
pub struct AlertCase {
    pub name: String,
    pub visa_type: Option<String>,
    pub visa_kind: VisaKind,
    pub landed: Option<String>,
    pub days_since_landing: i64,
    pub live_type: LiveType,
    pub visa_step: Option<String>,
}

/// One case sitting exactly one day before its alert threshold.
#[derive(Debug, Clone, Serialize)]
pub struct AtRiskCase {
    #[serde(flatten)]
    pub case: AlertCase,
}

impl AtRiskCase {
    /// Label for the threshold the case is approaching. Deliberately the
    /// alert threshold, not the day count the case currently sits at.
    pub fn threshold_label(&self) -> String {
        format!("{} days", self.case.visa_kind.alert_threshold())
    }
}

/// Alert and at-risk lists, each sorted by days since landing descending.
/// Records matching neither bucket are excluded entirely.
#[derive(Debug, Default)]
pub struct AlertReport {
    pub alerts: Vec<AlertCase>,
    pub at_risk: Vec<AtRiskCase>,
}

pub fn classify(records: &RecordSet, now: NaiveDateTime) -> AlertReport {
    let mut report = AlertReport::default();

    for record in records.iter() {
        let Some(days) = days_since_landing(record, now) else {
            continue;
        };

        let kind = record.visa_kind();
        if days > kind.alert_threshold() {
            report.alerts.push(snapshot(record, kind, days));
        } else if days == kind.risk_threshold() {
            report.at_risk.push(AtRiskCase {
                case: snapshot(record, kind, days),
            });
        }
    }

    report
        .alerts
        .sort_by(|a, b| b.days_since_landing.cmp(&a.days_since_landing));
    report
        .at_risk
        .sort_by(|a, b| b.case.days_since_landing.cmp(&a.case.days_since_landing));

    debug!(
        alerts = report.alerts.len(),
        at_risk = report.at_risk.len(),
        "classified landing aging"
    );
    report
}

fn snapshot(record: &CaseRecord, kind: VisaKind, days: i64) -> AlertCase {
    AlertCase {
        name: record.name.clone(),
        visa_type: record.visa_type.clone(),
        visa_kind: kind,
        landed: record.landed_raw.clone(),
        days_since_landing: days,
        live_type: record.live_type(),
        visa_step: record.visa_step.clone(),
    }
}
