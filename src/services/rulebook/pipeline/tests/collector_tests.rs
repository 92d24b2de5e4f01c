use super::*;
use crate::services::config::RulebookConfig;
use crate::services::rulebook::models::types::CellValue;

fn index() -> KeywordIndex {
    KeywordIndex::build(&RulebookConfig::default())
}

fn values(candidates: &CandidateMap, field: CanonicalField) -> Vec<String> {
    candidates
        .get(field)
        .iter()
        .map(|c| c.value.to_string())
        .collect()
}

// Covers: a bare "7" is accepted by exactly one numeric parser
#[test]
fn test_bare_seven_only_notice() {
    let row = Row::new().with("Misc", "7");
    let candidates = collect_candidates(&row, &index());

    assert_eq!(values(&candidates, CanonicalField::NoticePeriod), vec!["7"]);
    assert!(candidates.get(CanonicalField::Experience).is_empty());
    assert!(candidates.get(CanonicalField::Ctc).is_empty());
    assert!(candidates.get(CanonicalField::ExpectedSalary).is_empty());
    assert_eq!(candidates.total(), 1);
}

#[test]
fn test_experience_header_takes_bare_number() {
    let row = Row::new().with("Total Exp", 5.0);
    let candidates = collect_candidates(&row, &index());

    let experience = candidates.get(CanonicalField::Experience);
    assert_eq!(experience.len(), 1);
    assert_eq!(experience[0].value, FieldValue::Number(5.0));
    assert_eq!(experience[0].score, 85.0);
    assert!(candidates.get(CanonicalField::NoticePeriod).is_empty());
}

#[test]
fn test_salary_header_takes_bare_number() {
    let row = Row::new().with("Current CTC", "7");
    let candidates = collect_candidates(&row, &index());

    assert!(candidates.get(CanonicalField::NoticePeriod).is_empty());
    let ctc = candidates.get(CanonicalField::Ctc);
    assert_eq!(ctc[0].value, FieldValue::Number(7.0));
    assert_eq!(ctc[0].score, 80.0);
    assert!(candidates.get(CanonicalField::ExpectedSalary).is_empty());
}

#[test]
fn test_unlabelled_salary_feeds_both_fields() {
    let row = Row::new().with("Misc", "12 LPA");
    let candidates = collect_candidates(&row, &index());

    assert_eq!(candidates.get(CanonicalField::Ctc)[0].score, 80.0);
    assert_eq!(candidates.get(CanonicalField::ExpectedSalary)[0].score, 80.0);
}

#[test]
fn test_placeholders_and_ignored_headers_contribute_nothing() {
    let row = Row::new()
        .with("Interview Date", "12/01/2024")
        .with("Remarks", "Rahul Sharma")
        .with("Name", "N/A")
        .with("Phone", CellValue::Empty);
    let candidates = collect_candidates(&row, &index());
    assert!(candidates.is_empty());
}

#[test]
fn test_contact_cells() {
    let row = Row::new()
        .with("Contact", "+91-7359355840")
        .with("Mail", "a@b.com");
    let candidates = collect_candidates(&row, &index());

    assert_eq!(values(&candidates, CanonicalField::Phone), vec!["+91-7359355840"]);
    assert_eq!(values(&candidates, CanonicalField::Email), vec!["a@b.com"]);
    assert_eq!(candidates.total(), 2);
}

#[test]
fn test_malformed_email_needs_email_header() {
    let hinted = collect_candidates(&Row::new().with("Email", "rahul@gmail"), &index());
    let email = hinted.get(CanonicalField::Email);
    assert_eq!(email.len(), 1);
    assert_eq!(email[0].score, 65.0);

    let unhinted = collect_candidates(&Row::new().with("Misc", "rahul@gmail"), &index());
    assert!(unhinted.is_empty());
}

#[test]
fn test_name_header_rejects_status_values() {
    let row = Row::new().with("Candidate Name", "Selected");
    let candidates = collect_candidates(&row, &index());

    assert!(candidates.get(CanonicalField::Name).is_empty());
    assert_eq!(values(&candidates, CanonicalField::Status), vec!["Selected"]);
}

#[test]
fn test_one_cell_feeds_several_fields() {
    let row = Row::new().with("Col A", "Rahul Sharma");
    let candidates = collect_candidates(&row, &index());

    assert_eq!(candidates.get(CanonicalField::Name)[0].score, 70.0);
    assert_eq!(candidates.get(CanonicalField::Spoc)[0].score, 70.0);
    assert!(candidates.get(CanonicalField::Company).is_empty());
}

#[test]
fn test_header_hint_bonus() {
    let row = Row::new().with("Candidate Name", "Rahul Sharma");
    let candidates = collect_candidates(&row, &index());

    assert_eq!(candidates.get(CanonicalField::Name)[0].score, 95.0);
    assert!(candidates.get(CanonicalField::Spoc).is_empty());
    assert_eq!(
        candidates.get(CanonicalField::Name)[0].source_header,
        "Candidate Name"
    );
}

#[test]
fn test_unknown_value_under_matching_header() {
    let row = Row::new().with("Location", "Andheri");
    let candidates = collect_candidates(&row, &index());

    let location = candidates.get(CanonicalField::Location);
    assert_eq!(location.len(), 1);
    assert_eq!(location[0].score, 35.0);
}

#[test]
fn test_cells_visited_in_column_order() {
    let row = Row::new()
        .with("First", "Rahul Kumar")
        .with("Second", "Rohit Verma");
    let candidates = collect_candidates(&row, &index());
    assert_eq!(
        values(&candidates, CanonicalField::Name),
        vec!["Rahul Kumar", "Rohit Verma"]
    );
}

#[test]
fn test_recruiter_column_is_not_a_candidate_name() {
    let row = Row::new().with("Recruiter", "Priya Nair");
    let candidates = collect_candidates(&row, &index());

    assert!(candidates.get(CanonicalField::Name).is_empty());
    assert_eq!(candidates.get(CanonicalField::Spoc)[0].score, 95.0);
}

#[test]
fn test_client_column_is_not_a_company() {
    let row = Row::new().with("Client", "HDFC Bank").with("Company", "Infosys");
    let candidates = collect_candidates(&row, &index());

    assert_eq!(values(&candidates, CanonicalField::Company), vec!["Infosys"]);
    assert_eq!(values(&candidates, CanonicalField::Client), vec!["HDFC Bank"]);
}

#[test]
fn test_labelled_salary_below_bare_minimum_stays_salary() {
    let row = Row::new().with("Current CTC", "1");
    let candidates = collect_candidates(&row, &index());

    assert!(candidates.get(CanonicalField::NoticePeriod).is_empty());
    let ctc = candidates.get(CanonicalField::Ctc);
    assert_eq!(ctc[0].value, FieldValue::Number(1.0));
    assert_eq!(ctc[0].score, LABELLED_RAW_NUMBER_SCORE + HEADER_HINT_BONUS);
}

#[test]
fn test_out_of_range_notice_stays_notice() {
    let row = Row::new().with("Notice Period", "400");
    let candidates = collect_candidates(&row, &index());

    assert!(candidates.get(CanonicalField::Ctc).is_empty());
    assert!(candidates.get(CanonicalField::ExpectedSalary).is_empty());
    assert_eq!(
        candidates.get(CanonicalField::NoticePeriod)[0].value,
        FieldValue::Number(400.0)
    );
}
