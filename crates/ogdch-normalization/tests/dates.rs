//! Tests for date normalization.

use ogdch_model::{DateOptions, Temporal};
use ogdch_normalization::datetime::parse_iso8601;
use ogdch_normalization::{DateNormalizer, DateParseError};

fn normalizer() -> DateNormalizer {
    DateNormalizer::default()
}

// =========================================================================
// Storage form
// =========================================================================

#[test]
fn storage_form_of_each_input_shape() {
    let n = normalizer();
    let cases = [
        ("02.04.2020", "2020-04-02T00:00:00"),
        ("2022-01-02T00:00:00", "2022-01-02T00:00:00"),
        ("2008-09-03T20:56:35.450686Z", "2008-09-03T20:56:35.450686Z"),
        ("957398400", "2000-05-04T00:00:00"),
        ("04.05.00", "2000-05-04T00:00:00"),
        ("1655-01-02", "1655-01-02T00:00:00"),
        ("", ""),
        ("False", ""),
    ];
    for (raw, expected) in cases {
        let stored = n.normalize_to_storage(raw).expect(raw);
        assert_eq!(stored.as_str(), expected, "input {raw:?}");
    }
}

#[test]
fn unknown_value_is_unparseable() {
    let err = normalizer().normalize_to_storage("Hallo").unwrap_err();
    assert_eq!(err.to_string(), r#"unparseable date value: "Hallo""#);
}

#[test]
fn digit_heavy_iso_is_not_a_timestamp() {
    let stored = normalizer()
        .normalize_to_storage("20201105T000000")
        .unwrap_err();
    assert!(matches!(stored, DateParseError::Unparseable { .. }));
    let stored = normalizer()
        .normalize_to_storage("2020-11-05T00:00")
        .unwrap();
    assert_eq!(stored.as_str(), "2020-11-05T00:00");
}

#[test]
fn custom_picker_pattern_is_tried_first() {
    let options = DateOptions::default().with_picker_format("%m/%d/%Y");
    let n = DateNormalizer::new(options).unwrap();
    assert_eq!(
        n.normalize_to_storage("11/05/2020").unwrap().as_str(),
        "2020-11-05T00:00:00"
    );
    // The default picker pattern no longer applies; the short-year legacy
    // pattern still does.
    assert!(n.normalize_to_storage("05.11.2020").is_err());
    assert_eq!(
        n.normalize_to_storage("05.11.20").unwrap().as_str(),
        "2020-11-05T00:00:00"
    );
}

#[test]
fn pivot_is_configurable() {
    let options = DateOptions::default().with_two_digit_year_pivot(30);
    let n = DateNormalizer::new(options).unwrap();
    assert_eq!(
        n.normalize_to_storage("01.01.45").unwrap().as_str(),
        "1945-01-01T00:00:00"
    );
    assert_eq!(
        n.normalize_to_storage("01.01.29").unwrap().as_str(),
        "2029-01-01T00:00:00"
    );
}

// =========================================================================
// Index form
// =========================================================================

#[test]
fn index_form_appends_z() {
    let n = normalizer();
    assert_eq!(
        n.to_index_form("2020-11-05T00:00:00").unwrap().as_str(),
        "2020-11-05T00:00:00Z"
    );
    assert_eq!(
        n.to_index_form("2020-11-05T15:30:04").unwrap().as_str(),
        "2020-11-05T15:30:04Z"
    );
}

#[test]
fn index_form_relabels_offset() {
    let n = normalizer();
    assert_eq!(
        n.to_index_form("2022-10-11T15:30:04.359000+02:00")
            .unwrap()
            .as_str(),
        "2022-10-11T15:30:04Z"
    );
    assert_eq!(
        n.to_index_form("2022-10-11T23:00:00-05:00").unwrap().as_str(),
        "2022-10-11T23:00:00Z"
    );
}

#[test]
fn index_form_of_other_shapes() {
    let n = normalizer();
    assert_eq!(n.to_index_form("05.11.2020").unwrap().as_str(), "2020-11-05T00:00:00Z");
    assert_eq!(n.to_index_form("").unwrap().as_str(), "");
    assert_eq!(n.to_index_form("False").unwrap().as_str(), "");
    assert!(n.to_index_form("Hallo").is_err());
}

// =========================================================================
// Display form
// =========================================================================

#[test]
fn display_uses_picker_pattern_by_default() {
    let n = normalizer();
    assert_eq!(n.display("2022-01-02T12:10:10"), "02.01.2022");
    assert_eq!(n.display("957398400"), "04.05.2000");
    assert_eq!(n.display("2022-10-11T15:30:04+02:00"), "11.10.2022");
}

#[test]
fn display_with_explicit_pattern() {
    let n = normalizer();
    assert_eq!(
        n.to_display_form("02.04.2020", "%Y-%m-%dT%H:%M:%S"),
        "2020-04-02T00:00:00"
    );
}

#[test]
fn display_degrades_to_empty() {
    let n = normalizer();
    assert_eq!(n.display("False"), "");
    assert_eq!(n.display(""), "");
    assert_eq!(n.display("Hallo"), "");
    assert_eq!(n.to_display_form("2022-01-02T00:00:00", "%Q"), "");
}

// =========================================================================
// Latest, timestamps, temporals
// =========================================================================

#[test]
fn latest_compares_storage_forms() {
    let n = normalizer();
    assert_eq!(
        n.latest(["01.01.2019", "2020-06-01T00:00:00", "957398400"]),
        "2020-06-01T00:00:00"
    );
    assert_eq!(n.latest(Vec::<String>::new()), "");
    assert_eq!(n.latest(["Hallo", "01.01.2019"]), "2019-01-01T00:00:00");
}

#[test]
fn timestamp_conversion() {
    assert_eq!(
        DateNormalizer::timestamp_to_iso("1604534400").as_deref(),
        Some("2020-11-05T00:00:00")
    );
    assert_eq!(DateNormalizer::timestamp_to_iso("-5"), None);
    assert_eq!(DateNormalizer::timestamp_to_iso("abc"), None);
}

#[test]
fn temporal_bounds_are_normalized() {
    let n = normalizer();
    let temporal = Temporal {
        start_date: Some("1604534400".to_string()),
        end_date: Some(String::new()),
    };
    let normalized = n.normalize_temporal(&temporal);
    assert_eq!(normalized.start_date.as_deref(), Some("2020-11-05T00:00:00"));
    assert_eq!(normalized.end_date, None);

    let bad = Temporal {
        start_date: Some("Hallo".to_string()),
        end_date: None,
    };
    assert_eq!(n.normalize_temporal(&bad), Temporal::default());
}

#[test]
fn iso_parser_accepts_storage_output() {
    let parsed = parse_iso8601("2022-10-11T15:30:04.359000+02:00").unwrap();
    assert_eq!(parsed.local.to_string(), "2022-10-11 15:30:04.359");
}

// =========================================================================
// Data-quality warnings
// =========================================================================

mod warnings {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    use super::normalizer;

    #[derive(Clone, Default)]
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    /// Run `f` and return its result with the number of warnings it logged.
    fn count_warnings<T>(f: impl FnOnce() -> T) -> (T, usize) {
        let counter = WarnCounter::default();
        let subscriber = tracing_subscriber::registry().with(counter.clone());
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, counter.0.load(Ordering::SeqCst))
    }

    #[test]
    fn unparseable_storage_input_is_logged() {
        let (result, warnings) = count_warnings(|| normalizer().normalize_to_storage("Hallo"));
        assert!(result.is_err());
        assert_eq!(warnings, 1);
    }

    #[test]
    fn unparseable_index_input_is_logged() {
        let (result, warnings) = count_warnings(|| normalizer().to_index_form("Hallo"));
        assert!(result.is_err());
        assert_eq!(warnings, 1);
    }

    #[test]
    fn false_sentinel_is_logged_when_displayed() {
        let (display, warnings) =
            count_warnings(|| normalizer().to_display_form("False", "%d.%m.%Y"));
        assert_eq!(display, "");
        assert_eq!(warnings, 1);
    }

    #[test]
    fn false_sentinel_is_logged_when_indexed() {
        let (index, warnings) = count_warnings(|| normalizer().to_index_form("False"));
        assert_eq!(index.unwrap().as_str(), "");
        assert_eq!(warnings, 1);
    }

    #[test]
    fn valid_and_empty_dates_are_silent() {
        let n = normalizer();
        let (_, warnings) = count_warnings(|| {
            n.normalize_to_storage("05.11.2020").unwrap();
            n.to_index_form("").unwrap();
            n.to_display_form("", "%d.%m.%Y")
        });
        assert_eq!(warnings, 0);
    }

    #[test]
    fn latest_logs_each_skipped_value_once() {
        let (latest, warnings) =
            count_warnings(|| normalizer().latest(["garbage", "05.11.2020", "nope"]));
        assert_eq!(latest, "2020-11-05T00:00:00");
        assert_eq!(warnings, 2);
    }
}
