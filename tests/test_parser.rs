//! Series parser and merger tests, including the end-to-end conversion.

mod common;

use olive_prices::parser::{parse_to_store, ParseCursor, SeriesParser};
use olive_prices::{merge, Grade, ParserConfig};

// ---------------------------------------------------------------------------
// end-to-end
// ---------------------------------------------------------------------------

#[test]
fn sample_text_produces_expected_store() {
    let (store, report) = parse_to_store(common::SAMPLE_TEXT.lines(), &ParserConfig::historical());

    assert_eq!(
        store.get(Grade::VirgenExtra).records(),
        &[
            common::record("2025-08-26", 3.833),
            common::record("2025-08-27", 3.9)
        ]
    );
    assert_eq!(
        store.get(Grade::Virgen).records(),
        &[common::record("2025-08-26", 3.25)]
    );
    assert_eq!(
        store.get(Grade::Lampante).records(),
        &[common::record("2025-08-26", 3.1)]
    );

    assert_eq!(report.date_headers, 2);
    assert_eq!(report.records, 4);
    assert_eq!(report.noise, 1);
}

#[test]
fn lines_before_first_date_are_ignored() {
    let text = "Aceite de oliva virgen extra 9,999 €\n01-09-2025\nAceite de oliva virgen extra 4,000 €\n";
    let (store, report) = parse_to_store(text.lines(), &ParserConfig::historical());

    assert_eq!(
        store.get(Grade::VirgenExtra).records(),
        &[common::record("2025-09-01", 4.0)]
    );
    assert_eq!(report.undated, 1);
}

#[test]
fn invalid_date_header_clears_context() {
    let text = "\
01-09-2025
Aceite de oliva lampante 3,000 €
31-09-2025
Aceite de oliva lampante 3,500 €
02-09-2025
Aceite de oliva lampante 3,200 €
";
    let (store, report) = parse_to_store(text.lines(), &ParserConfig::historical());

    assert_eq!(
        store.get(Grade::Lampante).records(),
        &[
            common::record("2025-09-01", 3.0),
            common::record("2025-09-02", 3.2)
        ]
    );
    assert_eq!(report.invalid_dates, 1);
    assert_eq!(report.undated, 1);
}

#[test]
fn unparseable_and_out_of_range_prices_are_dropped() {
    let text = "\
01-09-2025
Aceite de oliva virgen extra 75,000 €
Aceite de oliva virgen sin precio
Aceite de oliva lampante 1.234,5 €
Aceite de girasol 1,5 €
";
    let (store, report) = parse_to_store(text.lines(), &ParserConfig::historical());

    assert_eq!(store.total_points(), 0);
    assert_eq!(report.missing_price, 3);
    assert_eq!(report.unrecognized, 1);
    assert_eq!(report.dropped(), 4);
}

#[test]
fn same_day_duplicate_keeps_later_line() {
    let text = "\
01-09-2025
Aceite de oliva virgen extra 4,000 €
Aceite de oliva virgen extra 4,100 €
";
    let (store, _) = parse_to_store(text.lines(), &ParserConfig::historical());

    assert_eq!(
        store.get(Grade::VirgenExtra).records(),
        &[common::record("2025-09-01", 4.1)]
    );
}

#[test]
fn out_of_order_blocks_are_sorted_and_deduplicated() {
    let text = "\
03-09-2025
Aceite de oliva virgen 3,3 €
01-09-2025
Aceite de oliva virgen 3,1 €
03-09-2025
Aceite de oliva virgen 3,35 €
";
    let (store, _) = parse_to_store(text.lines(), &ParserConfig::historical());
    common::assert_canonical(&store);

    assert_eq!(
        store.get(Grade::Virgen).records(),
        &[
            common::record("2025-09-01", 3.1),
            common::record("2025-09-03", 3.35)
        ]
    );
}

#[test]
fn custom_bound_changes_acceptance() {
    let text = "01-09-2025\nAceite de oliva virgen extra 75 €\n";
    let config = ParserConfig::historical().upper_bound(80.0);
    let (store, _) = parse_to_store(text.lines(), &config);

    assert_eq!(
        store.get(Grade::VirgenExtra).records(),
        &[common::record("2025-09-01", 75.0)]
    );
}

#[test]
fn raw_series_preserves_input_order() {
    let parser = SeriesParser::default();
    let (raw, _) = parser.parse_str("02-09-2025\nvirgen extra 4 €\n01-09-2025\nvirgen extra 3 €\n");

    assert_eq!(raw.len(), 2);
    let dates: Vec<_> = raw
        .records(Grade::VirgenExtra)
        .iter()
        .map(|r| r.date())
        .collect();
    assert_eq!(dates, vec![common::date("2025-09-02"), common::date("2025-09-01")]);
    assert!(raw.records(Grade::Lampante).is_empty());
}

#[test]
fn empty_input_gives_three_empty_series() {
    let (store, report) = parse_to_store(Vec::<String>::new(), &ParserConfig::historical());
    assert_eq!(report.lines, 0);
    for grade in Grade::ALL {
        assert!(store.get(grade).is_empty());
    }
}

// ---------------------------------------------------------------------------
// ParseCursor
// ---------------------------------------------------------------------------

#[test]
fn cursor_starts_empty_and_follows_headers() {
    let mut cursor = ParseCursor::new();
    assert_eq!(cursor.current(), None);

    cursor.advance(Some(common::date("2025-09-01")));
    assert_eq!(cursor.current(), Some(common::date("2025-09-01")));

    cursor.advance(None);
    assert_eq!(cursor.current(), None);
}

// ---------------------------------------------------------------------------
// merge_series
// ---------------------------------------------------------------------------

#[test]
fn merge_series_is_last_write_wins_and_stable() {
    let series = merge::merge_series(vec![
        common::record("2025-09-02", 2.0),
        common::record("2025-09-01", 1.0),
        common::record("2025-09-02", 2.5),
        common::record("2025-09-01", 1.5),
    ]);

    assert!(series.is_strictly_ascending());
    assert_eq!(
        series.records(),
        &[
            common::record("2025-09-01", 1.5),
            common::record("2025-09-02", 2.5)
        ]
    );
}
