use super::*;

#[test]
fn test_change_log_format() {
    let record = DetectedRecord::new().with_text(CanonicalField::Name, "  rahul   sharma ");
    let (fixed, changes) = auto_fix(record);

    assert_eq!(fixed.text(CanonicalField::Name), Some("Rahul Sharma"));
    assert_eq!(changes, vec!["name: \"  rahul   sharma \" → \"Rahul Sharma\"".to_string()]);
}

#[test]
fn test_unchanged_fields_are_not_logged() {
    let record = DetectedRecord::new()
        .with_text(CanonicalField::Name, "Rahul Sharma")
        .with_text(CanonicalField::Location, "Pune")
        .with_number(CanonicalField::Ctc, 12.0);
    let (fixed, changes) = auto_fix(record.clone());

    assert!(changes.is_empty());
    assert_eq!(fixed.into_detected(), record);
}

#[test]
fn test_case_rules() {
    let record = DetectedRecord::new()
        .with_text(CanonicalField::Email, "RAHUL@GMAIL.COM")
        .with_text(CanonicalField::Status, "Shortlisted")
        .with_text(CanonicalField::SourceOfCv, "LinkedIn")
        .with_text(CanonicalField::Spoc, "PRIYA NAIR")
        .with_text(CanonicalField::Company, "Infosys  Technologies");
    let (fixed, changes) = auto_fix(record);

    assert_eq!(fixed.text(CanonicalField::Email), Some("rahul@gmail.com"));
    assert_eq!(fixed.text(CanonicalField::Status), Some("shortlisted"));
    assert_eq!(fixed.text(CanonicalField::SourceOfCv), Some("linkedin"));
    assert_eq!(fixed.text(CanonicalField::Spoc), Some("Priya Nair"));
    // Other text keeps its case.
    assert_eq!(
        fixed.text(CanonicalField::Company),
        Some("Infosys Technologies")
    );
    assert_eq!(changes.len(), 5);
}

#[test]
fn test_title_case_word_boundaries() {
    assert_eq!(title_case("mary-jane watson"), "Mary-Jane Watson");
    assert_eq!(title_case("JOSÉ müller"), "José Müller");
    assert_eq!(title_case("r. k. singh"), "R. K. Singh");
}

#[test]
fn test_numeric_coercion() {
    let record = DetectedRecord::new()
        .with_text(CanonicalField::Experience, "5 years")
        .with_text(CanonicalField::Ctc, "12 LPA")
        .with_number(CanonicalField::ExpectedSalary, 15.456)
        .with_text(CanonicalField::NoticePeriod, "2 months");
    let (fixed, _) = auto_fix(record);

    assert_eq!(fixed.number(CanonicalField::Experience), Some(5.0));
    assert_eq!(fixed.number(CanonicalField::Ctc), Some(12.0));
    assert_eq!(fixed.number(CanonicalField::ExpectedSalary), Some(15.46));
    assert_eq!(fixed.number(CanonicalField::NoticePeriod), Some(60.0));
}

#[test]
fn test_numeric_text_and_day_rounding() {
    let record = DetectedRecord::new()
        .with_text(CanonicalField::Experience, " 3.5 ")
        .with_number(CanonicalField::NoticePeriod, 30.4)
        .with_text(CanonicalField::Ctc, "8,50,000");
    let (fixed, _) = auto_fix(record);

    assert_eq!(fixed.number(CanonicalField::Experience), Some(3.5));
    assert_eq!(fixed.number(CanonicalField::NoticePeriod), Some(30.0));
    assert_eq!(fixed.number(CanonicalField::Ctc), Some(8.5));
}

#[test]
fn test_unreadable_numbers_stay_text() {
    let record = DetectedRecord::new()
        .with_text(CanonicalField::Experience, "several  years")
        .with_text(CanonicalField::NoticePeriod, "after bonus");
    let (fixed, changes) = auto_fix(record);

    assert_eq!(
        fixed.get(CanonicalField::Experience),
        Some(&FieldValue::text("several years"))
    );
    assert_eq!(
        fixed.get(CanonicalField::NoticePeriod),
        Some(&FieldValue::text("after bonus"))
    );
    assert_eq!(changes.len(), 1);
}

#[test]
fn test_phone_keeps_last_ten_digits() {
    let record = DetectedRecord::new().with_text(CanonicalField::Phone, "+91-73593 55840");
    let (fixed, _) = auto_fix(record);
    assert_eq!(fixed.text(CanonicalField::Phone), Some("7359355840"));

    let record = DetectedRecord::new().with_number(CanonicalField::Phone, 9876543210.0);
    let (fixed, _) = auto_fix(record);
    assert_eq!(fixed.text(CanonicalField::Phone), Some("9876543210"));

    let record = DetectedRecord::new().with_text(CanonicalField::Phone, "call later");
    let (fixed, changes) = auto_fix(record);
    assert_eq!(fixed.text(CanonicalField::Phone), Some("call later"));
    assert!(changes.is_empty());
}

#[test]
fn test_idempotent() {
    let record = DetectedRecord::new()
        .with_text(CanonicalField::Name, "rahul  SHARMA")
        .with_text(CanonicalField::Phone, "+91 7359355840")
        .with_text(CanonicalField::Email, "Rahul@Gmail.com")
        .with_text(CanonicalField::Experience, "4 yrs 6 months")
        .with_text(CanonicalField::Ctc, "₹ 12.5 lakh")
        .with_text(CanonicalField::NoticePeriod, "Immediate")
        .with_text(CanonicalField::Status, "On Hold");
    let (once, first_changes) = auto_fix(record);
    let (twice, second_changes) = auto_fix(once.clone().into_detected());

    assert!(!first_changes.is_empty());
    assert!(second_changes.is_empty());
    assert_eq!(once, twice);
    assert_eq!(once.number(CanonicalField::Experience), Some(4.5));
    assert_eq!(once.number(CanonicalField::Ctc), Some(12.5));
    assert_eq!(once.number(CanonicalField::NoticePeriod), Some(0.0));
}

#[test]
fn test_sources_and_duplicates_survive() {
    let mut record = DetectedRecord::new().with_text(CanonicalField::Name, "rahul");
    record.sources.insert(CanonicalField::Name, "FLS".to_string());
    record
        .duplicates
        .insert(CanonicalField::Name, vec![FieldValue::text("Rohit")]);
    let (fixed, _) = auto_fix(record);

    assert_eq!(fixed.record.sources[&CanonicalField::Name], "FLS");
    assert_eq!(fixed.record.duplicates[&CanonicalField::Name].len(), 1);
}
