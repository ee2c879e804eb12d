//! Catalog and config loading from files on disk.

use std::fs;

use chrono::NaiveDate;
use fundflow_core::catalog::{read_history_csv, CatalogError, FundRepository, InMemoryCatalog};
use fundflow_core::config::DashboardConfig;
use fundflow_core::dashboard::{DashboardBuilder, HistorySource};
use fundflow_core::rng::RngHierarchy;

#[test]
fn csv_history_is_sorted_by_date() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("DIV-100.csv");
    fs::write(
        &path,
        "date,value\n2025-03-03,55.2\n2025-03-01,54.0\n2025-03-02,54.6\n",
    )
    .unwrap();

    let points = read_history_csv("DIV-100", &path).unwrap();
    let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
        ]
    );
    assert_eq!(points[0].value, 54.0);
}

#[test]
fn csv_rejects_bad_rows() {
    let dir = tempfile::tempdir().unwrap();

    let garbage = dir.path().join("A.csv");
    fs::write(&garbage, "date,value\nnot-a-date,1.0\n").unwrap();
    assert!(matches!(
        read_history_csv("A", &garbage),
        Err(CatalogError::InvalidHistory { .. })
    ));

    let zero = dir.path().join("B.csv");
    fs::write(&zero, "date,value\n2025-01-01,0.0\n").unwrap();
    assert!(matches!(
        read_history_csv("B", &zero),
        Err(CatalogError::InvalidHistory { .. })
    ));

    let empty = dir.path().join("C.csv");
    fs::write(&empty, "date,value\n").unwrap();
    assert!(read_history_csv("C", &empty).is_err());
}

#[test]
fn history_dir_attaches_matching_codes_only() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("TECH-001.csv"),
        "date,value\n2025-06-27,140.1\n2025-06-30,142.5\n",
    )
    .unwrap();
    fs::write(dir.path().join("UNLISTED.csv"), "date,value\n2025-06-30,1.0\n").unwrap();

    let catalog = InMemoryCatalog::builtin()
        .load_history_dir(dir.path())
        .unwrap();
    assert_eq!(catalog.recorded_history("TECH-001").unwrap().len(), 2);
    assert!(catalog.recorded_history("GREEN-055").is_none());

    let view = DashboardBuilder::new(&catalog, RngHierarchy::new(9))
        .build("TECH-001")
        .unwrap();
    assert_eq!(view.history_source, HistorySource::Recorded);
    // peers fall back to synthetic history; missing indices normalize to 0
    assert_eq!(view.comparison.len(), 2);
}

#[test]
fn config_file_points_at_catalog_and_history() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("funds.toml");
    fs::write(
        &catalog_path,
        r#"
[[funds]]
id = "x"
code = "ONLY"
name = "Only Fund"
current_price = 12.5
day_change_percent = -0.8
sector = "General"
risk_level = "Low"
market_cap = 10.0
currency = "USD"
description = "single"
"#,
    )
    .unwrap();
    let closes = dir.path().join("closes");
    fs::create_dir(&closes).unwrap();
    fs::write(closes.join("ONLY.csv"), "date,value\n2025-01-02,12.0\n").unwrap();

    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[catalog]\npath = {:?}\nhistory_dir = {:?}\n[rng]\nmaster_seed = 5\n",
            catalog_path.display().to_string(),
            closes.display().to_string()
        ),
    )
    .unwrap();

    let config = DashboardConfig::load(Some(&config_path)).unwrap();
    let catalog = config.open_catalog().unwrap();
    assert_eq!(catalog.funds().len(), 1);
    assert!(catalog.peers("ONLY", 3).is_empty());
    assert_eq!(catalog.recorded_history("ONLY").unwrap().len(), 1);

    let view = DashboardBuilder::from_config(&catalog, &config)
        .unwrap()
        .build("ONLY")
        .unwrap();
    assert!(view.peers.is_empty());
    assert_eq!(view.intraday.last().unwrap().value, 12.5);
}

#[test]
fn missing_catalog_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = InMemoryCatalog::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}
