use caseflow::matching::{match_sets, MatchError, SetSide};
use caseflow::records::ingest;
use caseflow::records::LiveType;
use std::io::Cursor;

const FULL_HEADER: &str = "Housemaid Name,Housemaid Id,Live out type,Current Visa Step";
const NO_ID_HEADER: &str = "Housemaid Name,Live out type,Current Visa Step";

fn parse(csv: &str) -> caseflow::records::RecordSet {
    ingest::from_reader(Cursor::new(csv.to_string())).expect("fixture parses")
}

#[test]
fn matches_on_name_and_step_in_first_set_order() {
    let first = parse(&format!(
        "{FULL_HEADER}\nZainab,10,CC,Apply for entry Visa\nAmina,11,CC,Prepare EID application\nNoPair,12,CC,Waiting\n"
    ));
    let second = parse(&format!(
        "{FULL_HEADER}\nAmina,21,CC (Live out),Prepare EID application\nZainab,20,CC,Apply for entry Visa\n"
    ));

    let matches = match_sets(&first, &second).expect("schema satisfied");
    let names: Vec<&str> = matches.iter().map(|case| case.name.as_str()).collect();
    assert_eq!(names, vec!["Zainab", "Amina"], "first-set order preserved");

    let amina = &matches[1];
    assert_eq!(amina.first_live_type, LiveType::LiveIn);
    assert_eq!(amina.second_live_type, LiveType::LiveOut);
    assert_eq!(amina.first_id.as_deref(), Some("11"));
    assert_eq!(amina.second_id.as_deref(), Some("21"));
}

#[test]
fn duplicate_rows_in_second_set_use_first_occurrence() {
    let first = parse(&format!("{FULL_HEADER}\nX,1,CC,S\n"));
    let second = parse(&format!(
        "{FULL_HEADER}\nX,2,CC,S\nX,3,CC (Live out),S\n"
    ));

    let matches = match_sets(&first, &second).expect("schema satisfied");
    assert_eq!(matches.len(), 1, "duplicates never produce extra matches");
    assert_eq!(matches[0].second_id.as_deref(), Some("2"));
    assert_eq!(
        matches[0].second_live_type,
        LiveType::LiveIn,
        "first second-set occurrence wins"
    );
}

#[test]
fn name_match_alone_is_not_enough() {
    let first = parse(&format!("{FULL_HEADER}\nX,1,CC,Apply for entry Visa\n"));
    let second = parse(&format!("{FULL_HEADER}\nX,2,CC,Prepare EID application\n"));

    let matches = match_sets(&first, &second).expect("schema satisfied");
    assert!(matches.is_empty());
}

#[test]
fn records_without_steps_never_match() {
    let first = parse(&format!("{FULL_HEADER}\nX,1,CC,\n"));
    let second = parse(&format!("{FULL_HEADER}\nX,2,CC,\n"));

    let matches = match_sets(&first, &second).expect("schema satisfied");
    assert!(matches.is_empty());
}

#[test]
fn records_without_names_never_match() {
    let first = parse(&format!("{FULL_HEADER}\n,1,CC,S\n"));
    let second = parse(&format!("{FULL_HEADER}\n,2,CC,S\n"));

    let matches = match_sets(&first, &second).expect("schema satisfied");
    assert!(matches.is_empty(), "blank name cells must never pair");
}

#[test]
fn ids_are_omitted_when_a_side_lacks_the_column() {
    let first = parse(&format!("{NO_ID_HEADER}\nX,CC,S\n"));
    let second = parse(&format!("{FULL_HEADER}\nX,2,CC,S\n"));

    let matches = match_sets(&first, &second).expect("schema satisfied");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].first_id, None);
    assert_eq!(matches[0].second_id.as_deref(), Some("2"));
}

#[test]
fn schema_errors_name_missing_columns_per_side() {
    let first = parse("Housemaid Name,Live out type\nX,CC\n");
    let second = parse("Housemaid Name,Current Visa Step\nX,S\n");

    let error = match_sets(&first, &second).expect_err("schema incomplete");
    let MatchError::Schema(gaps) = error;
    assert_eq!(gaps.len(), 2);

    let first_gap = gaps
        .iter()
        .find(|gap| gap.side == SetSide::First)
        .expect("first side reported");
    assert_eq!(first_gap.columns, vec!["Current Visa Step"]);

    let second_gap = gaps
        .iter()
        .find(|gap| gap.side == SetSide::Second)
        .expect("second side reported");
    assert_eq!(second_gap.columns, vec!["Live out type"]);

    let message = MatchError::Schema(gaps).to_string();
    assert!(message.contains("first file: Current Visa Step"));
    assert!(message.contains("second file: Live out type"));
}
