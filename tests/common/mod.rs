use candidate_rulebook::Row;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Row from `(header, value)` pairs, in column order.
pub fn row(cells: &[(&str, &str)]) -> Row {
    cells
        .iter()
        .fold(Row::new(), |row, (header, value)| row.with(*header, *value))
}

/// A typical fully-labelled recruiter sheet row.
pub fn labelled_row(name: &str, phone: &str) -> Row {
    row(&[
        ("Candidate Name", name),
        ("Mobile No", phone),
        ("Email ID", "candidate@example.com"),
        ("Location", "Hyderabad"),
        ("Role", "QA Engineer"),
        ("Experience", "3 yrs"),
        ("Current CTC", "6 LPA"),
        ("Expected CTC", "8 LPA"),
        ("Notice Period", "15 days"),
        ("Company", "Infosys"),
        ("Client", "Axis Bank"),
        ("SPOC", "Anita Rao"),
        ("Status", "Screening"),
        ("Source", "LinkedIn"),
    ])
}
