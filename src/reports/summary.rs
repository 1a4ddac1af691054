//! Dashboard headline figures and the monthly progress series

use std::collections::{BTreeMap, HashSet};

use crate::store::RecordStore;
use crate::types::{DashboardSummary, ItemStatus, MonthlyProgress, ProgressReport};

/// KPI cards shown above the charts.
pub fn dashboard_summary(store: &RecordStore) -> DashboardSummary {
    let progress = store.progress_reports();

    let total_meters_drilled = progress.iter().map(|p| p.total_meters).sum();
    let average_core_recovery = if progress.is_empty() {
        None
    } else {
        Some(progress.iter().map(|p| p.core_recovery).sum::<f64>() / progress.len() as f64)
    };

    let active_sites = store
        .drilling_records()
        .iter()
        .map(|d| d.hole_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let equipment_needing_attention = store
        .maintenance_logs()
        .iter()
        .filter(|log| {
            log.maintenance_items
                .iter()
                .any(|item| item.status == ItemStatus::NeedsAttention)
        })
        .map(|log| log.equipment_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    DashboardSummary {
        total_meters_drilled,
        average_core_recovery,
        active_sites,
        equipment_needing_attention,
        record_counts: store.counts(),
    }
}

#[derive(Default)]
struct MonthAccumulator {
    meters: f64,
    recovery_sum: f64,
    reports: usize,
}

/// Progress grouped by calendar month, oldest month first.
pub fn monthly_progress(reports: &[ProgressReport]) -> Vec<MonthlyProgress> {
    let mut months: BTreeMap<String, MonthAccumulator> = BTreeMap::new();
    for report in reports {
        let acc = months
            .entry(report.date.format("%Y-%m").to_string())
            .or_default();
        acc.meters += report.total_meters;
        acc.recovery_sum += report.core_recovery;
        acc.reports += 1;
    }

    months
        .into_iter()
        .map(|(month, acc)| MonthlyProgress {
            month,
            meters: acc.meters,
            avg_core_recovery: acc.recovery_sum / acc.reports as f64,
            reports: acc.reports,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::{drilling, maintenance, progress};

    #[test]
    fn test_summary_of_empty_store() {
        let summary = dashboard_summary(&RecordStore::new());
        assert_eq!(summary.total_meters_drilled, 0.0);
        assert_eq!(summary.average_core_recovery, None);
        assert_eq!(summary.active_sites, 0);
        assert_eq!(summary.equipment_needing_attention, 0);
    }

    #[test]
    fn test_summary_counts_distinct_sites_and_equipment() {
        let mut store = RecordStore::new();
        store.append(drilling("H001", 100.0));
        store.append(drilling("H001", 110.0));
        store.append(drilling("H002", 120.0));

        let mut a = progress("H001", "2024-01-02");
        a.total_meters = 30.0;
        a.core_recovery = 90.0;
        let mut b = progress("H002", "2024-01-03");
        b.total_meters = 12.5;
        b.core_recovery = 80.0;
        store.append(a);
        store.append(b);

        use ItemStatus::*;
        store.append(maintenance("EQ001", &[Good, NeedsAttention]));
        store.append(maintenance("EQ001", &[NeedsAttention]));
        store.append(maintenance("EQ002", &[Repaired]));

        let summary = dashboard_summary(&store);
        assert_eq!(summary.total_meters_drilled, 42.5);
        assert_eq!(summary.average_core_recovery, Some(85.0));
        assert_eq!(summary.active_sites, 2);
        assert_eq!(summary.equipment_needing_attention, 1);
        assert_eq!(summary.record_counts.drilling, 3);
        assert_eq!(summary.record_counts.maintenance, 3);
    }

    #[test]
    fn test_monthly_progress_is_chronological() {
        let mut feb = progress("H001", "2024-02-10");
        feb.total_meters = 10.0;
        feb.core_recovery = 100.0;
        let mut jan_a = progress("H002", "2024-01-31");
        jan_a.total_meters = 5.0;
        jan_a.core_recovery = 80.0;
        let mut jan_b = progress("H003", "2024-01-01");
        jan_b.total_meters = 7.0;
        jan_b.core_recovery = 90.0;

        let months = monthly_progress(&[feb, jan_a, jan_b]);
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, "2024-01");
        assert_eq!(months[0].meters, 12.0);
        assert_eq!(months[0].avg_core_recovery, 85.0);
        assert_eq!(months[0].reports, 2);
        assert_eq!(months[1].month, "2024-02");
    }
}
