use super::*;
use crate::services::config::RulebookConfig;
use crate::services::rulebook::models::types::FieldValue;

fn index() -> KeywordIndex {
    KeywordIndex::build(&RulebookConfig::default())
}

#[test]
fn test_name_with_position_keyword_moves_to_position() {
    let record = DetectedRecord::new().with_text(CanonicalField::Name, "Java Developer");
    let (corrected, applied) = correct(record, &index());

    assert_eq!(
        corrected.text(CanonicalField::Position),
        Some("Java Developer")
    );
    assert!(!corrected.has(CanonicalField::Name));
    assert_eq!(applied, vec!["name_is_position"]);
}

#[test]
fn test_name_kept_when_position_already_set() {
    let record = DetectedRecord::new()
        .with_text(CanonicalField::Name, "Java Developer")
        .with_text(CanonicalField::Position, "Tester");
    let (corrected, applied) = correct(record, &index());

    assert_eq!(corrected.text(CanonicalField::Name), Some("Java Developer"));
    assert!(applied.is_empty());
}

#[test]
fn test_position_with_org_keyword_moves_to_company() {
    let mut record = DetectedRecord::new().with_text(CanonicalField::Position, "Infosys Technologies");
    record
        .sources
        .insert(CanonicalField::Position, "Col 4".to_string());
    let (corrected, applied) = correct(record, &index());

    assert_eq!(
        corrected.text(CanonicalField::Company),
        Some("Infosys Technologies")
    );
    assert_eq!(corrected.sources[&CanonicalField::Company], "Col 4");
    assert!(!corrected.has(CanonicalField::Position));
    assert_eq!(applied, vec!["position_is_company"]);
}

#[test]
fn test_short_company_moves_to_spoc() {
    let mut record = DetectedRecord::new().with_text(CanonicalField::Company, "RK");
    record
        .sources
        .insert(CanonicalField::Company, "Misc".to_string());
    let (corrected, applied) = correct(record, &index());

    assert_eq!(corrected.text(CanonicalField::Spoc), Some("RK"));
    assert!(!corrected.has(CanonicalField::Company));
    assert_eq!(applied, vec!["short_company_is_spoc"]);
}

#[test]
fn test_short_company_under_company_header_stays() {
    let mut record = DetectedRecord::new().with_text(CanonicalField::Company, "TCS");
    record
        .sources
        .insert(CanonicalField::Company, "Company Name".to_string());
    let (corrected, applied) = correct(record, &index());

    assert_eq!(corrected.text(CanonicalField::Company), Some("TCS"));
    assert!(applied.is_empty());
}

#[test]
fn test_finance_company_swaps_into_client() {
    let record = DetectedRecord::new()
        .with_text(CanonicalField::Company, "HDFC Bank")
        .with_text(CanonicalField::Client, "Infosys");
    let (corrected, applied) = correct(record, &index());

    assert_eq!(corrected.text(CanonicalField::Company), Some("Infosys"));
    assert_eq!(corrected.text(CanonicalField::Client), Some("HDFC Bank"));
    assert_eq!(applied, vec!["finance_company_is_client"]);
}

#[test]
fn test_no_swap_when_both_are_finance() {
    let record = DetectedRecord::new()
        .with_text(CanonicalField::Company, "HDFC Bank")
        .with_text(CanonicalField::Client, "ICICI Securities");
    let (corrected, applied) = correct(record.clone(), &index());

    assert_eq!(corrected, record);
    assert!(applied.is_empty());
}

#[test]
fn test_rules_run_in_order() {
    // Name → position, then the moved value is recognised as a company.
    let record = DetectedRecord::new().with_text(CanonicalField::Name, "Sales Solutions");
    let (corrected, applied) = correct(record, &index());

    assert_eq!(
        corrected.text(CanonicalField::Company),
        Some("Sales Solutions")
    );
    assert_eq!(applied, vec!["name_is_position", "position_is_company"]);
}

#[test]
fn test_rule_table_names_are_unique() {
    let mut names: Vec<&str> = CORRECTION_RULES.iter().map(|rule| rule.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), CORRECTION_RULES.len());
}

#[test]
fn test_moved_value_takes_its_alternatives_along() {
    let mut record = DetectedRecord::new().with_text(CanonicalField::Name, "Java Developer");
    record
        .duplicates
        .insert(CanonicalField::Name, vec![FieldValue::text("Tester")]);
    let (corrected, _) = correct(record, &index());

    assert!(!corrected.duplicates.contains_key(&CanonicalField::Name));
    assert_eq!(
        corrected.duplicates[&CanonicalField::Position],
        vec![FieldValue::text("Tester")]
    );
}

#[test]
fn test_swap_exchanges_alternatives() {
    let mut record = DetectedRecord::new()
        .with_text(CanonicalField::Company, "HDFC Bank")
        .with_text(CanonicalField::Client, "Infosys");
    record
        .duplicates
        .insert(CanonicalField::Company, vec![FieldValue::text("ICICI Bank")]);
    let (corrected, _) = correct(record, &index());

    assert!(!corrected.duplicates.contains_key(&CanonicalField::Company));
    assert_eq!(
        corrected.duplicates[&CanonicalField::Client],
        vec![FieldValue::text("ICICI Bank")]
    );
}
