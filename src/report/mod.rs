//! Serializable boundary views handed to the display/export collaborators.

mod views;

pub use views::{
    AlertCaseView, AtRiskCaseView, CaseMatchView, CategoryCount, ExportPlan, HeadcountSummary,
    NationalityEntry, SheetPlan,
};

use crate::alerts::{AlertCase, AlertReport, AtRiskCase};
use crate::matching::CaseMatch;
use crate::records::{LiveType, RecordSet};
use crate::triage::Partition;

/// Spreadsheet formats cap sheet names at 31 characters.
pub const SHEET_NAME_LIMIT: usize = 31;

/// Per-category counts for display, omitting empty categories.
pub fn category_summary(partition: &Partition) -> Vec<CategoryCount> {
    partition
        .categories()
        .iter()
        .filter(|category| !category.is_empty())
        .map(|category| CategoryCount {
            category: category.name,
            count: category.len(),
        })
        .collect()
}

/// Multi-sheet export layout: one sheet per non-empty category, names
/// truncated to the spreadsheet limit.
pub fn export_plan(partition: &Partition) -> ExportPlan {
    let sheets = partition
        .categories()
        .iter()
        .filter(|category| !category.is_empty())
        .map(|category| SheetPlan {
            sheet_name: truncate_sheet_name(category.name),
            category: category.name,
            rows: category.indices.clone(),
        })
        .collect();
    ExportPlan { sheets }
}

fn truncate_sheet_name(name: &str) -> String {
    name.chars().take(SHEET_NAME_LIMIT).collect()
}

/// Headline counts: total, live-in/live-out split, and the per-nationality
/// breakdown (first-seen order, nationalities with at least one counted
/// arrangement only).
pub fn headcount(records: &RecordSet) -> HeadcountSummary {
    let mut summary = HeadcountSummary {
        total: records.len(),
        ..Default::default()
    };

    for record in records.iter() {
        let live_type = record.live_type();
        match live_type {
            LiveType::LiveIn => summary.live_in += 1,
            LiveType::LiveOut => summary.live_out += 1,
            LiveType::Unknown => {}
        }

        let Some(nationality) = record.nationality.as_deref() else {
            continue;
        };
        if live_type == LiveType::Unknown {
            continue;
        }

        let entry = match summary
            .by_nationality
            .iter_mut()
            .find(|entry| entry.nationality == nationality)
        {
            Some(entry) => entry,
            None => {
                summary.by_nationality.push(NationalityEntry {
                    nationality: nationality.to_string(),
                    live_in: 0,
                    live_out: 0,
                });
                summary
                    .by_nationality
                    .last_mut()
                    .expect("entry just pushed")
            }
        };
        match live_type {
            LiveType::LiveIn => entry.live_in += 1,
            LiveType::LiveOut => entry.live_out += 1,
            LiveType::Unknown => {}
        }
    }

    summary
}

impl AlertCase {
    pub fn to_view(&self) -> AlertCaseView {
        AlertCaseView {
            name: self.name.clone(),
            visa_type: self.visa_type.clone(),
            visa_kind: self.visa_kind,
            landing_date: self.landed.clone(),
            days_since_landing: self.days_since_landing,
            live_type: self.live_type,
            live_type_label: self.live_type.label(),
            visa_step: self.visa_step.clone(),
        }
    }
}

impl AtRiskCase {
    pub fn to_view(&self) -> AtRiskCaseView {
        AtRiskCaseView {
            case: self.case.to_view(),
            threshold: self.threshold_label(),
        }
    }
}

impl CaseMatch {
    pub fn to_view(&self) -> CaseMatchView {
        CaseMatchView {
            name: self.name.clone(),
            visa_step: self.visa_step.clone(),
            first_live_type_label: self.first_live_type.label(),
            second_live_type_label: self.second_live_type.label(),
            first_id: self.first_id.clone(),
            second_id: self.second_id.clone(),
        }
    }
}

/// View rows for both alert lists, preserving their sort order.
pub fn alert_views(report: &AlertReport) -> (Vec<AlertCaseView>, Vec<AtRiskCaseView>) {
    let alerts = report.alerts.iter().map(AlertCase::to_view).collect();
    let at_risk = report.at_risk.iter().map(AtRiskCase::to_view).collect();
    (alerts, at_risk)
}
