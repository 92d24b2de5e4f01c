use super::*;
use crate::services::rulebook::ImportCategory;
use tempfile::TempDir;

const ROWS: &str = r#"[
    {
        "Candidate Name": "rahul  sharma",
        "Mobile": "+91 98765 43210",
        "Email ID": "Rahul.Sharma@Gmail.com",
        "Current CTC": "12 LPA",
        "Expected CTC": "15 LPA"
    },
    { "Candidate Name": "", "Mobile": "N/A" }
]"#;

#[test]
fn test_parse_rows_accepts_array_and_wrapper() {
    assert_eq!(parse_rows(ROWS).unwrap().len(), 2);

    let wrapped = format!(r#"{{ "rows": {ROWS} }}"#);
    let rows = parse_rows(&wrapped).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0].headers().collect::<Vec<_>>(),
        vec!["Candidate Name", "Mobile", "Email ID", "Current CTC", "Expected CTC"]
    );
}

#[test]
fn test_parse_rows_rejects_bad_shapes() {
    assert!(matches!(
        parse_rows(r#"{ "data": [] }"#),
        Err(RulebookError::InvalidInput(_))
    ));
    assert!(matches!(
        parse_rows(r#"[ {"a": "b"}, 5 ]"#),
        Err(RulebookError::InvalidInput(msg)) if msg.contains("row 1")
    ));
    assert!(matches!(parse_rows("[ oops"), Err(RulebookError::Json(_))));
}

#[test]
fn test_process_rows_json_batch() {
    let rulebook = Rulebook::default();
    let batch = process_rows_json(&rulebook, ROWS).unwrap();

    assert_eq!(batch.stats.total, 2);
    assert_eq!(batch.results.len(), 2);

    let first = &batch.results[0];
    assert_eq!(first.fixed.text(CanonicalField::Name), Some("Rahul Sharma"));
    assert_eq!(first.fixed.text(CanonicalField::Phone), Some("9876543210"));
    assert_eq!(
        first.fixed.text(CanonicalField::Email),
        Some("rahul.sharma@gmail.com")
    );
    assert_eq!(first.fixed.number(CanonicalField::Ctc), Some(12.0));
    assert_eq!(first.fixed.number(CanonicalField::ExpectedSalary), Some(15.0));
    assert!(first.validation.errors.is_empty());

    let second = &batch.results[1];
    assert_eq!(second.validation.category, ImportCategory::Blocked);
    assert!(second.validation.has_error_for(CanonicalField::Name));
    assert_eq!(batch.stats.blocked, 1);
}

#[test]
fn test_process_rows_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("rows.json");
    std::fs::write(&path, ROWS).unwrap();

    let batch = process_rows_file(&Rulebook::default(), &path).unwrap();
    assert_eq!(batch.stats.total, 2);

    let missing = process_rows_file(&Rulebook::default(), &temp.path().join("nope.json"));
    assert!(matches!(missing, Err(RulebookError::Io(_))));
}

#[test]
fn test_revalidate_flat_record() {
    let rulebook = Rulebook::default();
    let result = revalidate_json(
        &rulebook,
        r#"{ "name": "  priya  nair ", "phone": 9876543210, "email": null, "ctc": "12" }"#,
    )
    .unwrap();

    assert_eq!(result.fixed.text(CanonicalField::Name), Some("Priya Nair"));
    assert_eq!(result.fixed.text(CanonicalField::Phone), Some("9876543210"));
    assert_eq!(result.fixed.number(CanonicalField::Ctc), Some(12.0));
    assert!(result.validation.has_warning_for(CanonicalField::Email));
    assert!(result.fingerprint.is_empty());
}

#[test]
fn test_revalidate_wrapped_record() {
    let result = revalidate_json(
        &Rulebook::default(),
        r#"{ "fields": { "name": "Priya Nair", "phone": "9876543210", "sourceOfCV": "Naukri" } }"#,
    )
    .unwrap();
    assert_eq!(result.fixed.text(CanonicalField::SourceOfCv), Some("naukri"));
}

#[test]
fn test_revalidate_rejects_unknown_field() {
    let err = revalidate_json(&Rulebook::default(), r#"{ "nickname": "Ro" }"#).unwrap_err();
    assert!(matches!(err, RulebookError::InvalidInput(msg) if msg.contains("nickname")));
}

#[test]
fn test_load_rulebook_defaults_without_path() {
    let rulebook = load_rulebook(None).unwrap();
    assert_eq!(rulebook.config(), &RulebookConfig::default());
}
