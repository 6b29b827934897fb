//! Canonical file I/O tests: format, atomic save, validation, input detection.

mod common;

use std::fs;

use olive_prices::storage::{detect_input, load_store, read_raw_lines, save_store, validate_file};
use olive_prices::{Grade, InputKind, PriceError, Store};

#[test]
fn save_writes_pretty_utf8_in_grade_order() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("precio-aceite-historico.json");
    let store = common::store_with(&[
        (Grade::Lampante, &[("2025-08-26", 3.1)]),
        (Grade::VirgenExtra, &[("2025-08-26", 3.833)]),
    ]);

    save_store(&path, &store).unwrap();
    let text = fs::read_to_string(&path).unwrap();

    let extra = text.find("Aceite de oliva virgen extra").unwrap();
    let virgen = text.find("\"Aceite de oliva virgen\"").unwrap();
    let lampante = text.find("Aceite de oliva lampante").unwrap();
    assert!(extra < virgen && virgen < lampante);

    assert!(text.contains("\n  \"Aceite de oliva virgen extra\": [\n"));
    assert!(text.contains("\"fecha\": \"2025-08-26\""));
    assert!(text.contains("\"precio_eur_kg\": 3.833"));
    assert!(text.contains("\"Aceite de oliva virgen\": []"));
}

#[test]
fn save_then_load_gives_same_store() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("series.json");
    let store = common::store_with(&[(
        Grade::Virgen,
        &[("2025-08-26", 3.25), ("2025-08-27", 3.3)],
    )]);

    save_store(&path, &store).unwrap();
    assert_eq!(load_store(&path).unwrap(), store);
}

#[test]
fn save_leaves_no_temp_files_behind() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("series.json");

    save_store(&path, &Store::new()).unwrap();
    save_store(&path, &Store::new()).unwrap();

    let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn missing_inputs_are_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("historico.txt");

    assert!(matches!(read_raw_lines(&path), Err(PriceError::MissingInput(_))));
    assert!(matches!(load_store(&path), Err(PriceError::MissingInput(_))));
    assert!(matches!(detect_input(&path), Err(PriceError::MissingInput(_))));
}

#[test]
fn load_fills_missing_grades_and_rejects_unknown_ones() {
    let (path, _tmp) = common::write_temp(
        "partial.json",
        r#"{ "Aceite de oliva virgen": [ { "fecha": "2025-08-26", "precio_eur_kg": 3.25 } ] }"#,
    );
    let store = load_store(&path).unwrap();
    assert_eq!(store.get(Grade::Virgen).len(), 1);
    assert!(store.get(Grade::VirgenExtra).is_empty());
    assert!(store.get(Grade::Lampante).is_empty());

    let (path, _tmp) = common::write_temp("unknown.json", r#"{ "Aceite de orujo": [] }"#);
    assert!(matches!(load_store(&path), Err(PriceError::Json(_))));
}

#[test]
fn detect_input_tells_raw_text_from_canonical() {
    let (path, _tmp) = common::write_temp("precio-aceite-historico.json", common::SAMPLE_TEXT);
    match detect_input(&path).unwrap() {
        InputKind::RawText(lines) => assert_eq!(lines[0], "26-08-2025"),
        other => panic!("expected raw text, got {:?}", other),
    }

    let (path, _tmp) = common::write_temp("series.json", "{}");
    assert_eq!(detect_input(&path).unwrap(), InputKind::Canonical(Store::new()));
}

#[test]
fn validate_file_flags_unordered_series() {
    let (path, _tmp) = common::write_temp(
        "bad.json",
        r#"{ "Aceite de oliva lampante": [
            { "fecha": "2025-08-27", "precio_eur_kg": 3.2 },
            { "fecha": "2025-08-26", "precio_eur_kg": 3.1 }
        ] }"#,
    );
    let err = validate_file(&path).unwrap_err();
    assert!(err.is_validation_failure());
    assert!(!err.is_fetch_failure());
}

#[test]
fn validate_file_flags_raw_text() {
    let (path, _tmp) = common::write_temp("series.json", common::SAMPLE_TEXT);
    assert!(validate_file(&path).unwrap_err().is_validation_failure());
}

// ---------------------------------------------------------------------------
// invariants on load
// ---------------------------------------------------------------------------

const BROKEN_SERIES: &str = r#"{ "Aceite de oliva virgen extra": [
    { "fecha": "2025-08-27", "precio_eur_kg": 3.9 },
    { "fecha": "2025-08-26", "precio_eur_kg": 3.8 }
] }"#;

#[test]
fn load_rejects_unordered_dates_as_invalid_input() {
    let (path, _tmp) = common::write_temp("series.json", BROKEN_SERIES);

    let err = load_store(&path).unwrap_err();
    assert!(matches!(err, PriceError::InvalidStore { .. }));
    assert!(!err.is_validation_failure());
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn load_rejects_duplicate_dates() {
    let (path, _tmp) = common::write_temp(
        "series.json",
        r#"{ "Aceite de oliva virgen": [
            { "fecha": "2025-08-26", "precio_eur_kg": 3.2 },
            { "fecha": "2025-08-26", "precio_eur_kg": 3.3 }
        ] }"#,
    );
    assert!(matches!(load_store(&path), Err(PriceError::InvalidStore { .. })));
}

#[test]
fn load_rejects_implausible_prices() {
    let (path, _tmp) = common::write_temp(
        "series.json",
        r#"{ "Aceite de oliva lampante": [
            { "fecha": "2025-08-26", "precio_eur_kg": -5.0 }
        ] }"#,
    );
    let err = load_store(&path).unwrap_err();
    assert!(matches!(err, PriceError::InvalidStore { .. }));
    assert!(err.to_string().contains("Aceite de oliva lampante"));
}

#[test]
fn detect_input_does_not_pass_broken_store_as_canonical() {
    let (path, _tmp) = common::write_temp("series.json", BROKEN_SERIES);
    assert!(matches!(detect_input(&path), Err(PriceError::InvalidStore { .. })));
}

#[test]
fn validate_file_flags_implausible_prices() {
    let (path, _tmp) = common::write_temp(
        "series.json",
        r#"{ "Aceite de oliva virgen": [ { "fecha": "2025-08-26", "precio_eur_kg": 75.0 } ] }"#,
    );
    assert!(validate_file(&path).unwrap_err().is_validation_failure());
}
