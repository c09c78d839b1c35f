use crate::records::{LiveType, VisaKind};
use serde::Serialize;

/// Count of records in one non-empty category, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: &'static str,
    pub count: usize,
}

/// One sheet of a multi-sheet export: category name truncated to the
/// spreadsheet limit, plus the record indices the sheet owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetPlan {
    pub sheet_name: String,
    pub category: &'static str,
    pub rows: Vec<usize>,
}

/// Sheets for every non-empty category, in rule order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportPlan {
    pub sheets: Vec<SheetPlan>,
}

/// Live-in/live-out split for one nationality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NationalityEntry {
    pub nationality: String,
    pub live_in: usize,
    pub live_out: usize,
}

/// Headline counts over the whole record set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HeadcountSummary {
    pub total: usize,
    pub live_in: usize,
    pub live_out: usize,
    pub by_nationality: Vec<NationalityEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertCaseView {
    pub name: String,
    pub visa_type: Option<String>,
    pub visa_kind: VisaKind,
    pub landing_date: Option<String>,
    pub days_since_landing: i64,
    pub live_type: LiveType,
    pub live_type_label: &'static str,
    pub visa_step: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AtRiskCaseView {
    #[serde(flatten)]
    pub case: AlertCaseView,
    /// Alert threshold the case is approaching, e.g. "3 days".
    pub threshold: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseMatchView {
    pub name: String,
    pub visa_step: String,
    pub first_live_type_label: &'static str,
    pub second_live_type_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_id: Option<String>,
}
