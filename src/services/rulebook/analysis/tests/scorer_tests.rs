use super::*;
use crate::services::config::RulebookConfig;

fn index() -> KeywordIndex {
    KeywordIndex::build(&RulebookConfig::default())
}

#[test]
fn test_person_names_score_high() {
    let index = index();
    assert_eq!(score(&index, CanonicalField::Name, "Rahul Sharma"), 70.0);
    assert!(score(&index, CanonicalField::Name, "priya") >= MIN_CANDIDATE_SCORE);
    assert_eq!(score(&index, CanonicalField::Spoc, "Rahul Sharma"), 70.0);
}

#[test]
fn test_person_names_reject_vocabulary_and_digits() {
    let index = index();
    assert!(score(&index, CanonicalField::Name, "Selected") < MIN_CANDIDATE_SCORE);
    assert!(score(&index, CanonicalField::Name, "Naukri") < MIN_CANDIDATE_SCORE);
    assert!(score(&index, CanonicalField::Name, "Pune") < MIN_CANDIDATE_SCORE);
    assert!(score(&index, CanonicalField::Name, "R4hul") < MIN_CANDIDATE_SCORE);
    assert_eq!(score(&index, CanonicalField::Name, "a@b.com"), 0.0);
    assert_eq!(
        score(&index, CanonicalField::Name, "one two three four five"),
        0.0
    );
}

#[test]
fn test_contact_fields() {
    let index = index();
    assert_eq!(score(&index, CanonicalField::Email, "a@b.com"), 100.0);
    assert_eq!(score(&index, CanonicalField::Email, "rahul"), 0.0);
    assert_eq!(score(&index, CanonicalField::Phone, "98765 43210"), 95.0);
    assert_eq!(score(&index, CanonicalField::Phone, "12345"), 0.0);
}

#[test]
fn test_position_needs_keyword() {
    let index = index();
    assert_eq!(score(&index, CanonicalField::Position, "Java Developer"), 70.0);
    assert_eq!(score(&index, CanonicalField::Position, "Rahul Sharma"), 0.0);
}

#[test]
fn test_org_scoring() {
    let index = index();
    assert_eq!(
        score(&index, CanonicalField::Company, "Infosys Technologies Pvt Ltd"),
        90.0
    );
    assert_eq!(score(&index, CanonicalField::Company, "Wipro"), 30.0);
    assert_eq!(score(&index, CanonicalField::Client, "TCS"), 30.0);
    assert!(score(&index, CanonicalField::Company, "Rahul Sharma") < MIN_CANDIDATE_SCORE);
    assert_eq!(score(&index, CanonicalField::Company, "Pune"), 0.0);
}

#[test]
fn test_vocabulary_fields() {
    let index = index();
    assert_eq!(score(&index, CanonicalField::Location, "Pune"), 90.0);
    assert_eq!(score(&index, CanonicalField::Location, "Pune, Maharashtra"), 90.0);
    assert_eq!(score(&index, CanonicalField::Location, "Rahul"), 0.0);
    assert_eq!(score(&index, CanonicalField::Status, "Selected"), 90.0);
    assert_eq!(score(&index, CanonicalField::Status, "Selected in L1"), 65.0);
    assert_eq!(score(&index, CanonicalField::SourceOfCv, "Naukri"), 90.0);
}

#[test]
fn test_numeric_fields() {
    let index = index();
    assert_eq!(score(&index, CanonicalField::NoticePeriod, "30 Days"), 85.0);
    assert_eq!(score(&index, CanonicalField::Experience, "5 Years"), 85.0);
    assert_eq!(score(&index, CanonicalField::Experience, "5"), 0.0);
    assert_eq!(score(&index, CanonicalField::Ctc, "12 LPA"), 80.0);
    assert_eq!(score(&index, CanonicalField::ExpectedSalary, "12"), 55.0);
    assert_eq!(score(&index, CanonicalField::Ctc, "negotiable"), 0.0);
}

#[test]
fn test_scores_stay_in_range() {
    let index = index();
    let samples = [
        "", "   ", "Rahul Sharma", "#$%@!", "Selected Java Developer Pvt Ltd Pune",
        "9876543210", "12 lpa", "R2D2 C3PO",
    ];
    for field in CanonicalField::ALL {
        for sample in samples {
            let s = score(&index, field, sample);
            assert!((0.0..=100.0).contains(&s), "{field} {sample:?} -> {s}");
        }
    }
}

#[test]
fn test_name_shape() {
    assert!(is_name_shaped("Mary-Jane O'Neil"));
    assert!(!is_name_shaped("Rahul 2"));
    assert!(!is_name_shaped(""));
}

#[test]
fn test_status_word_as_name_costs_status_penalty() {
    let score = score(&index(), CanonicalField::Name, "Selected");
    assert_eq!(score, NAME_BASE + NAME_CAPITALIZED - PERSON_STATUS_PENALTY);
    assert!(score < 30.0);
}
