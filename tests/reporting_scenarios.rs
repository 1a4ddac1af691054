//! Reporting Scenarios
//!
//! Field-crew workflows driven through the public library API: records are
//! built from the same JSON the dashboard forms submit, accepted through the
//! submission rules, appended to a store, and read back through the join,
//! chart and export paths.

use chrono::NaiveDate;
use serde_json::{json, Value};

use drillbook::export::{build_export, read_export, DateRange};
use drillbook::reports::{
    count_by, dashboard_summary, joined_rows, maintenance_status_distribution, monthly_progress,
    rock_type_distribution,
};
use drillbook::submission::accept;
use drillbook::types::CellValue;
use drillbook::{
    CoreSample, DrillingRecord, MaintenanceLog, ProgressReport, RecordStore, ReportField,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn drilling(hole_id: &str, date: &str, depth: f64) -> DrillingRecord {
    serde_json::from_value(json!({
        "projectName": "Project Alpha",
        "holeId": hole_id,
        "date": date,
        "location": {"latitude": -30.75, "longitude": 121.47, "elevation": 370.0},
        "depth": depth,
        "diameter": 63.5,
        "angle": 60.0,
        "azimuth": 45.0,
        "coreRecovery": 85.0,
        "rqd": 75.0,
        "driller": "John Smith",
        "supervisor": "Alice Brown"
    }))
    .unwrap()
}

fn progress(site_id: &str, date: &str, core_recovery: f64) -> ProgressReport {
    serde_json::from_value(json!({
        "date": date,
        "shift": "day",
        "siteId": site_id,
        "operator": "Chris Black",
        "startDepth": 100.0,
        "endDepth": 150.0,
        "coreRecovery": core_recovery,
        "timeBreakdown": {"drilling": 6.0, "coring": 3.0, "maintenance": 1.0, "delays": 1.0},
        "notes": "Normal operations"
    }))
    .unwrap()
}

fn core_sample(hole_id: &str, rock_type: &str) -> CoreSample {
    serde_json::from_value(json!({
        "sampleId": format!("CS-{hole_id}"),
        "holeId": hole_id,
        "fromDepth": 12.0,
        "toDepth": 14.5,
        "rockType": rock_type,
        "mineralogy": "Quartz, Mica",
        "alterationType": "Silicification",
        "alterationIntensity": "moderate",
        "structuralFeatures": "Veins",
        "sampleType": "quarter-core",
        "labId": "LAB-7",
        "assayResults": "Au: 1.20 g/t",
        "notes": "Bagged and tagged"
    }))
    .unwrap()
}

fn maintenance(equipment_id: &str, statuses: &[&str]) -> MaintenanceLog {
    let items: Vec<Value> = statuses
        .iter()
        .enumerate()
        .map(|(i, s)| json!({"item": format!("Item {i}"), "status": s}))
        .collect();
    serde_json::from_value(json!({
        "date": "2024-01-20",
        "equipmentId": equipment_id,
        "type": "preventive",
        "maintenanceItems": items,
        "technicianName": "Sarah Fix",
        "hoursSpent": 3.5,
        "notes": "",
        "nextMaintenanceDate": "2024-02-20"
    }))
    .unwrap()
}

#[test]
fn maintenance_status_counts_flatten_items() {
    let logs = vec![
        maintenance("EQ001", &["good", "replaced", "good"]),
        maintenance("EQ002", &["needs-attention"]),
        maintenance("EQ003", &["good"]),
    ];

    let counts = maintenance_status_distribution(&logs);
    let pairs: Vec<(&str, usize)> = counts.iter().map(|c| (c.name.as_str(), c.value)).collect();
    assert_eq!(pairs, [("good", 3), ("replaced", 1), ("needs-attention", 1)]);
}

#[test]
fn count_by_works_on_arbitrary_keys() {
    let reports = vec![
        progress("H002", "2024-01-03", 80.0),
        progress("H001", "2024-01-04", 90.0),
        progress("H002", "2024-01-05", 85.0),
    ];
    let by_site = count_by(&reports, |p| p.site_id.clone());
    assert_eq!(by_site, [("H002".to_string(), 2), ("H001".to_string(), 1)]);

    let empty: Vec<ProgressReport> = Vec::new();
    assert!(count_by(&empty, |p| p.shift).is_empty());
}

#[test]
fn progress_without_core_sample_joins_partially() {
    let mut store = RecordStore::new();
    store.append(accept(drilling("H001", "2024-01-15", 150.0)).unwrap());
    store.append(accept(progress("H001", "2024-01-15", 90.0)).unwrap());

    let rows = joined_rows(&store);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.depth, 150.0);
    assert_eq!(row.core_recovery, 90.0);
    assert_eq!(row.total_meters, Some(50.0));
    assert!(row.rock_type.is_none());
    assert_eq!(row.cell(ReportField::RockType), CellValue::Empty);
}

#[test]
fn join_takes_first_match_per_site_and_keeps_drilling_order() {
    let mut store = RecordStore::new();
    store.append(drilling("H002", "2024-01-02", 80.0));
    store.append(drilling("H001", "2024-01-01", 120.0));
    store.append(drilling("H003", "2024-01-03", 60.0));
    store.append(core_sample("H001", "igneous"));
    store.append(core_sample("H001", "metamorphic"));
    store.append(core_sample("H002", "sedimentary"));

    let rows = joined_rows(&store);
    let holes: Vec<&str> = rows.iter().map(|r| r.hole_id.as_str()).collect();
    assert_eq!(holes, ["H002", "H001", "H003"]);
    assert_eq!(rows[1].sample_id.as_deref(), Some("CS-H001"));
    assert_eq!(rows[1].cell(ReportField::RockType), CellValue::text("igneous"));
    assert!(rows[2].sample_id.is_none());

    let rocks = rock_type_distribution(store.core_samples());
    assert_eq!(rocks.len(), 3);
    assert_eq!(rocks[0].name, "igneous");
}

#[test]
fn export_keeps_only_rows_inside_range() {
    let mut store = RecordStore::new();
    store.append(drilling("H001", "2024-01-15", 150.0));
    store.append(drilling("H002", "2024-02-01", 90.0));
    store.append(drilling("H003", "2024-01-31", 75.0));

    let range = DateRange::new(date("2024-01-01"), date("2024-01-31")).unwrap();
    let fields = [ReportField::HoleId, ReportField::Date, ReportField::Depth];
    let bytes = build_export(&joined_rows(&store), range, &fields, "Drilling Report").unwrap();

    let table = read_export(&bytes).unwrap();
    assert_eq!(table.headers(), ["Hole ID", "Date", "Depth (m)"]);
    let holes: Vec<&CellValue> = table.rows.iter().map(|r| &r[0]).collect();
    assert_eq!(holes, [&CellValue::text("H001"), &CellValue::text("H003")]);
    assert_eq!(table.rows[0][2], CellValue::Number(150.0));
}

#[test]
fn export_of_loose_json_rows_skips_bad_dates() {
    let rows: Vec<serde_json::Map<String, Value>> = [
        json!({"holeId": "H001", "date": "2024-01-10", "location": {"latitude": -30.5}}),
        json!({"holeId": "H002", "date": "not a date"}),
        json!({"holeId": "H003"}),
    ]
    .into_iter()
    .filter_map(|v| v.as_object().cloned())
    .collect();

    let range = DateRange::new(date("2024-01-01"), date("2024-12-31")).unwrap();
    let bytes = build_export(
        &rows,
        range,
        &[ReportField::HoleId, ReportField::Latitude, ReportField::Depth],
        "Sheet1",
    )
    .unwrap();

    let table = read_export(&bytes).unwrap();
    assert_eq!(table.rows.len(), 1);
    assert_eq!(
        table.rows[0],
        [CellValue::text("H001"), CellValue::Number(-30.5), CellValue::Empty]
    );
}

#[test]
fn dashboard_reflects_store_contents() {
    let mut store = RecordStore::new();
    store.append(drilling("H001", "2024-01-15", 150.0));
    store.append(drilling("H002", "2024-01-16", 50.0));
    store.append(accept(progress("H001", "2024-01-15", 90.0)).unwrap());
    store.append(accept(progress("H002", "2024-02-02", 80.0)).unwrap());
    store.append(maintenance("EQ001", &["good"]));

    store.append(maintenance("EQ002", &["good", "needs-attention"]));

    let summary = dashboard_summary(&store);
    assert_eq!(summary.record_counts.drilling, 2);
    assert_eq!(summary.record_counts.maintenance, 2);
    assert_eq!(summary.total_meters_drilled, 100.0);
    assert_eq!(summary.average_core_recovery, Some(85.0));
    assert_eq!(summary.active_sites, 2);
    assert_eq!(summary.equipment_needing_attention, 1);

    let months = monthly_progress(store.progress_reports());
    let labels: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(labels, ["2024-01", "2024-02"]);
    assert_eq!(months[0].meters, 50.0);
    assert_eq!(months[1].reports, 1);
}
