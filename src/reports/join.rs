//! Record Joiner
//!
//! Left-outer join of drilling records with the first progress report and
//! the first core sample sharing the hole identifier. One output row per
//! drilling record, in drilling order; unmatched sides stay `None`.

use std::collections::HashMap;

use crate::types::{CoreSample, DrillingRecord, JoinedRow, ProgressReport};

/// Join drilling records to progress reports (`site_id`) and core samples
/// (`hole_id`) by site.
///
/// When several progress reports or core samples share a site, the first one
/// in insertion order wins; the rest are ignored.
pub fn join_by_site(
    drilling: &[DrillingRecord],
    progress: &[ProgressReport],
    core: &[CoreSample],
) -> Vec<JoinedRow> {
    let progress_by_site = first_by_key(progress, |p| p.site_id.as_str());
    let core_by_hole = first_by_key(core, |c| c.hole_id.as_str());

    drilling
        .iter()
        .map(|d| {
            let p = progress_by_site.get(d.hole_id.as_str()).copied();
            let c = core_by_hole.get(d.hole_id.as_str()).copied();
            merge(d, p, c)
        })
        .collect()
}

/// Map each key to its first-seen item.
fn first_by_key<'a, T, F>(items: &'a [T], key: F) -> HashMap<&'a str, &'a T>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        map.entry(key(item)).or_insert(item);
    }
    map
}

/// Field union of `d`, `p`, `c`.
///
/// Precedence for shared fields is d < p < c:
/// - `date`, `core_recovery`: progress, else drilling
/// - `notes`: core, else progress, else drilling
/// - `timestamp`: core, else progress
pub fn merge(d: &DrillingRecord, p: Option<&ProgressReport>, c: Option<&CoreSample>) -> JoinedRow {
    let notes = c
        .map(|c| c.notes.clone())
        .or_else(|| p.map(|p| p.notes.clone()))
        .or_else(|| d.notes.clone());

    JoinedRow {
        project_name: d.project_name.clone(),
        hole_id: d.hole_id.clone(),
        date: p.map_or(d.date, |p| p.date),
        location: d.location,
        depth: d.depth,
        diameter: d.diameter,
        angle: d.angle,
        azimuth: d.azimuth,
        core_recovery: p.map_or(d.core_recovery, |p| p.core_recovery),
        rqd: d.rqd,
        notes,
        driller: d.driller.clone(),
        supervisor: d.supervisor.clone(),

        shift: p.map(|p| p.shift),
        site_id: p.map(|p| p.site_id.clone()),
        operator: p.map(|p| p.operator.clone()),
        start_depth: p.map(|p| p.start_depth),
        end_depth: p.map(|p| p.end_depth),
        time_breakdown: p.map(|p| p.time_breakdown),
        total_meters: p.map(|p| p.total_meters),

        timestamp: c.map(|c| c.timestamp).or_else(|| p.map(|p| p.timestamp)),

        sample_id: c.map(|c| c.sample_id.clone()),
        from_depth: c.map(|c| c.from_depth),
        to_depth: c.map(|c| c.to_depth),
        rock_type: c.map(|c| c.rock_type),
        mineralogy: c.map(|c| c.mineralogy.clone()),
        alteration_type: c.map(|c| c.alteration_type.clone()),
        alteration_intensity: c.map(|c| c.alteration_intensity),
        structural_features: c.map(|c| c.structural_features.clone()),
        sample_type: c.map(|c| c.sample_type),
        lab_id: c.map(|c| c.lab_id.clone()),
        assay_results: c.map(|c| c.assay_results.clone()),
    }
}
