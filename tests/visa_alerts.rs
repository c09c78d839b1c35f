use caseflow::alerts::classify;
use caseflow::records::ingest;
use caseflow::records::LiveType;
use caseflow::report::alert_views;
use chrono::{NaiveDate, NaiveDateTime};
use std::io::Cursor;

const HEADER: &str = "Housemaid Name,Live out type,Current Visa Step,Type of Visa,Landed In Dubai";

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 10)
        .expect("valid date")
        .and_hms_opt(9, 0, 0)
        .expect("valid time")
}

fn landed(days_ago: i64) -> String {
    (now().date() - chrono::Duration::days(days_ago))
        .format("%Y-%m-%d")
        .to_string()
}

#[test]
fn entry_visa_threshold_boundaries() {
    let csv = format!(
        "{HEADER}\nTwoDays,CC,step,Entry Visa,{}\nThreeDays,CC,step,Entry Visa,{}\nFourDays,CC,step,Entry Visa,{}\n",
        landed(2),
        landed(3),
        landed(4),
    );
    let records = ingest::from_reader(Cursor::new(csv)).expect("fixture parses");
    let report = classify(&records, now());

    assert_eq!(report.alerts.len(), 1, "only the 4-day case alerts");
    assert_eq!(report.alerts[0].name, "FourDays");

    assert_eq!(report.at_risk.len(), 1, "only the 2-day case is at risk");
    assert_eq!(report.at_risk[0].case.name, "TwoDays");
    assert_eq!(report.at_risk[0].threshold_label(), "3 days");
}

#[test]
fn missing_visa_type_uses_tourist_thresholds() {
    let csv = format!(
        "{HEADER}\nEight,CC,step,,{}\nSeven,CC,step,,{}\nNine,CC,step,Tourist Visa,{}\n",
        landed(8),
        landed(7),
        landed(9),
    );
    let records = ingest::from_reader(Cursor::new(csv)).expect("fixture parses");
    let report = classify(&records, now());

    // 8 days is not > 8: the blank-visa case lands in neither list.
    assert!(report.alerts.iter().all(|case| case.name != "Eight"));
    assert!(report.at_risk.iter().all(|case| case.case.name != "Eight"));

    assert_eq!(report.at_risk.len(), 1);
    assert_eq!(report.at_risk[0].case.name, "Seven");
    assert_eq!(report.at_risk[0].threshold_label(), "8 days");

    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.alerts[0].name, "Nine");
}

#[test]
fn unexpected_visa_values_fall_into_tourist_bucket() {
    let csv = format!("{HEADER}\nOdd,CC,step,Golden Visa,{}\n", landed(9));
    let records = ingest::from_reader(Cursor::new(csv)).expect("fixture parses");
    let report = classify(&records, now());
    assert_eq!(report.alerts.len(), 1);
}

#[test]
fn cases_without_landing_dates_are_excluded() {
    let csv = format!("{HEADER}\nNoDate,CC,step,Entry Visa,\nBadDate,CC,step,Entry Visa,soon\n");
    let records = ingest::from_reader(Cursor::new(csv)).expect("fixture parses");
    let report = classify(&records, now());
    assert!(report.alerts.is_empty());
    assert!(report.at_risk.is_empty());
}

#[test]
fn alert_lists_sort_by_days_descending() {
    let csv = format!(
        "{HEADER}\nOld,CC,step,Entry Visa,{}\nOlder,CC,step,Entry Visa,{}\nOldest,CC,step,Entry Visa,{}\n",
        landed(5),
        landed(9),
        landed(30),
    );
    let records = ingest::from_reader(Cursor::new(csv)).expect("fixture parses");
    let report = classify(&records, now());

    let days: Vec<i64> = report
        .alerts
        .iter()
        .map(|case| case.days_since_landing)
        .collect();
    assert_eq!(days, vec![30, 9, 5]);
}

#[test]
fn views_carry_live_type_status_and_threshold() {
    let csv = format!(
        "{HEADER}\nAlerted,CC (Live out),Waiting for the PRO Update,Entry Visa,{}\nRisky,cc,Prepare EID application,Entry Visa,{}\n",
        landed(10),
        landed(2),
    );
    let records = ingest::from_reader(Cursor::new(csv)).expect("fixture parses");
    let report = classify(&records, now());
    let (alert_rows, at_risk_rows) = alert_views(&report);

    assert_eq!(alert_rows.len(), 1);
    let alerted = &alert_rows[0];
    assert_eq!(alerted.live_type, LiveType::LiveOut);
    assert_eq!(alerted.live_type_label, "Live Out");
    assert_eq!(alerted.visa_step.as_deref(), Some("Waiting for the PRO Update"));
    assert_eq!(alerted.days_since_landing, 10);

    assert_eq!(at_risk_rows.len(), 1);
    let risky = &at_risk_rows[0];
    // Wrong-case live code normalizes to Unknown.
    assert_eq!(risky.case.live_type, LiveType::Unknown);
    assert_eq!(risky.threshold, "3 days");
}
