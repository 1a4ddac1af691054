//! Placeholder field data generated on startup
//!
//! Reporting records are not persisted, so every process start fills the
//! store with `count` records per kind. Record `i` (1-based) of every kind
//! shares the site identifier `H{i:03}`, so seeded drilling records always
//! join to a progress report and a core sample. Dates start 2024-01-02 and
//! advance one day per record.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::RecordStore;
use crate::types::{
    AlterationIntensity, CoreSample, DrillingRecord, ItemStatus, Location, MaintenanceItem,
    MaintenanceLog, MaintenanceType, ProgressReport, RockType, SampleType, Shift, TimeBreakdown,
};

const PROJECTS: [&str; 5] = ["Alpha", "Beta", "Gamma", "Delta", "Epsilon"];
const DRILLERS: [&str; 5] = ["John Smith", "Jane Doe", "Bob Wilson", "Alice Brown", "Mike Johnson"];
const OPERATORS: [&str; 4] = ["Alex Green", "Sam White", "Chris Black", "Pat Brown"];
const TECHNICIANS: [&str; 4] = ["Tom Tech", "Sarah Fix", "Ray Repair", "Mary Mend"];
const MINERALS: [&str; 5] = ["Quartz", "Feldspar", "Mica", "Hornblende", "Calcite"];
const ALTERATIONS: [&str; 4] = ["Silicification", "Chloritization", "Sericitization", "Carbonatization"];
const MAINTENANCE_ITEMS: [&str; 4] = ["Drill bit", "Hydraulic system", "Engine", "Control panel"];

/// Fill `store` with `count` generated records of each kind.
///
/// A fixed `rng_seed` makes the data reproducible; `None` seeds from entropy.
pub fn seed_store(store: &mut RecordStore, count: usize, rng_seed: Option<u64>) {
    let mut rng = match rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for id in 1..=count {
        store.append(drilling_record(&mut rng, id));
    }
    for id in 1..=count {
        store.append(core_sample(&mut rng, id));
    }
    for id in 1..=count {
        store.append(progress_report(&mut rng, id));
    }
    for id in 1..=count {
        store.append(maintenance_log(&mut rng, id));
    }

    tracing::info!(per_kind = count, seeded = rng_seed.is_some(), "Seed records generated");
}

fn pick<'a, R: Rng>(rng: &mut R, items: &'a [&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn pick_copy<R: Rng, T: Copy>(rng: &mut R, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

fn site_id(id: usize) -> String {
    format!("H{id:03}")
}

/// 2024-01-01 plus `offset` days.
fn january_date(offset: usize) -> NaiveDate {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN);
    base.checked_add_days(Days::new(offset as u64)).unwrap_or(base)
}

/// 2024-02-01 plus `offset` days.
fn february_date(offset: usize) -> NaiveDate {
    let base = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap_or(NaiveDate::MIN);
    base.checked_add_days(Days::new(offset as u64)).unwrap_or(base)
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn drilling_record<R: Rng>(rng: &mut R, id: usize) -> DrillingRecord {
    DrillingRecord {
        project_name: format!("Project {}", pick(rng, &PROJECTS)),
        hole_id: site_id(id),
        date: january_date(id),
        location: Location {
            latitude: -33.865143 + rng.gen::<f64>(),
            longitude: 151.2099 + rng.gen::<f64>(),
            elevation: 100.0 + rng.gen::<f64>() * 1000.0,
        },
        depth: 100.0 + rng.gen::<f64>() * 400.0,
        diameter: 50.0 + rng.gen::<f64>() * 25.0,
        angle: rng.gen::<f64>() * 90.0,
        azimuth: rng.gen::<f64>() * 360.0,
        core_recovery: 75.0 + rng.gen::<f64>() * 25.0,
        rqd: 70.0 + rng.gen::<f64>() * 30.0,
        notes: None,
        driller: pick(rng, &DRILLERS).to_string(),
        supervisor: pick(rng, &DRILLERS).to_string(),
    }
}

fn core_sample<R: Rng>(rng: &mut R, id: usize) -> CoreSample {
    CoreSample {
        sample_id: format!("CS{id:03}"),
        hole_id: site_id(id),
        from_depth: rng.gen::<f64>() * 200.0,
        to_depth: 200.0 + rng.gen::<f64>() * 200.0,
        rock_type: pick_copy(rng, &RockType::ALL),
        mineralogy: format!("{}, {}", pick(rng, &MINERALS), pick(rng, &MINERALS)),
        alteration_type: pick(rng, &ALTERATIONS).to_string(),
        alteration_intensity: pick_copy(rng, &AlterationIntensity::ALL),
        structural_features: "Fractures, joints, and veins".to_string(),
        sample_type: pick_copy(rng, &SampleType::ALL),
        lab_id: format!("LAB{id:03}"),
        assay_results: format!(
            "Au: {:.2} g/t, Ag: {:.2} g/t",
            rng.gen::<f64>() * 10.0,
            rng.gen::<f64>() * 100.0
        ),
        notes: "Standard sampling procedure followed".to_string(),
        timestamp: midnight(january_date(id)),
    }
}

fn progress_report<R: Rng>(rng: &mut R, id: usize) -> ProgressReport {
    let start_depth = rng.gen::<f64>() * 200.0;
    let end_depth = 200.0 + rng.gen::<f64>() * 200.0;
    let date = january_date(id);
    ProgressReport {
        date,
        shift: pick_copy(rng, &[Shift::Day, Shift::Night]),
        site_id: site_id(id),
        operator: pick(rng, &OPERATORS).to_string(),
        start_depth,
        end_depth,
        core_recovery: 75.0 + rng.gen::<f64>() * 25.0,
        time_breakdown: TimeBreakdown {
            drilling: 4.0 + rng.gen::<f64>() * 4.0,
            coring: 2.0 + rng.gen::<f64>() * 4.0,
            maintenance: rng.gen::<f64>() * 2.0,
            delays: rng.gen::<f64>() * 2.0,
        },
        notes: "Normal operations".to_string(),
        total_meters: end_depth - start_depth,
        timestamp: midnight(date),
    }
}

fn maintenance_log<R: Rng>(rng: &mut R, id: usize) -> MaintenanceLog {
    let maintenance_items = MAINTENANCE_ITEMS
        .iter()
        .map(|name| MaintenanceItem::new(*name, pick_copy(rng, &ItemStatus::ALL)))
        .collect();
    let date = january_date(id);
    MaintenanceLog {
        date,
        equipment_id: format!("EQ{id:03}"),
        maintenance_type: pick_copy(rng, &[MaintenanceType::Preventive, MaintenanceType::Corrective]),
        maintenance_items,
        technician_name: pick(rng, &TECHNICIANS).to_string(),
        hours_spent: 1.0 + rng.gen::<f64>() * 8.0,
        notes: "Routine maintenance completed".to_string(),
        next_maintenance_date: february_date(id),
        timestamp: midnight(date),
    }
}
