use chrono::{Datelike, NaiveDate, Weekday};
use recurdate_core::{Expander, RecurError, RecurrenceRule, StopReason, expand};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn second_monday_of_each_month() {
    let rule = RecurrenceRule::from_toml_str(
        r#"
        start = "2023-01-01"
        end = "never"

        [repeat]
        kind = "monthly"
        on = { nth = 2, weekday = 1 }
        "#,
    )
    .unwrap();

    let dates = expand(&rule, 10);
    assert_eq!(dates.len(), 10);
    assert_eq!(dates[0], date(2023, 1, 9));
    for d in &dates {
        assert_eq!(d.weekday(), Weekday::Mon);
        assert!((8..=14).contains(&d.day()));
    }
}

#[test]
fn fortnightly_monday_and_wednesday() {
    let rule = RecurrenceRule::from_toml_str(
        r#"
        start = "2023-05-01"
        interval = 2

        [repeat]
        kind = "weekly"
        days = ["mon", "wed"]
        "#,
    )
    .unwrap();

    let dates = expand(&rule, 10);
    assert_eq!(
        &dates[..4],
        &[date(2023, 5, 1), date(2023, 5, 3), date(2023, 5, 15), date(2023, 5, 17)]
    );
}

#[test]
fn empty_weekday_set_never_matches() {
    let rule = RecurrenceRule::from_toml_str(
        r#"
        start = "2023-05-01"
        repeat = { kind = "weekly" }
        "#,
    )
    .unwrap();

    let expansion = Expander::default().expand_detailed(&rule);
    assert!(expansion.dates.is_empty());
    assert_eq!(expansion.stop, StopReason::Horizon);
}

#[test]
fn invalid_range_is_reported_by_validation_only() {
    let rule = RecurrenceRule::from_toml_str(
        r#"
        start = "2023-05-10"
        end = { on = "2023-05-01" }
        repeat = { kind = "daily" }
        "#,
    )
    .unwrap();

    assert!(matches!(rule.validate(), Err(RecurError::InvalidRange { .. })));
    assert!(expand(&rule, 10).is_empty());
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rule.toml");
    std::fs::write(
        &path,
        r#"
        start = "2023-01-01"
        end = { after = 3 }
        repeat = { kind = "yearly", month = 2, day = 29 }
        "#,
    )
    .unwrap();

    let rule = RecurrenceRule::load(&path).unwrap();
    assert_eq!(
        expand(&rule, 10),
        vec![date(2024, 2, 29), date(2028, 2, 29), date(2032, 2, 29)]
    );
}

#[test]
fn load_reports_path_on_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "start = \"not a date\"").unwrap();

    match RecurrenceRule::load(&path) {
        Err(RecurError::RuleParse(msg)) => assert!(msg.contains("broken.toml")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RecurrenceRule::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, RecurError::Io(_)));
}
