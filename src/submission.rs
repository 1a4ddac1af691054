//! Submission rules for incoming records
//!
//! Every rule is checked and all failures are reported together, so a form
//! can highlight every bad field in one round trip. Nothing reaches the
//! store until `validate` passes.

use crate::types::{CoreSample, DrillingRecord, MaintenanceLog, ProgressReport};

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("invalid submission: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl SubmissionError {
    pub fn messages(&self) -> &[String] {
        match self {
            SubmissionError::Invalid(errors) => errors,
        }
    }
}

/// Field-level checks run before a record is accepted.
pub trait Validate {
    /// Fill derived fields. Runs before `validate`.
    fn normalize(&mut self) {}

    fn validate(&self) -> Result<(), SubmissionError>;
}

// ============================================================================
// Rule Helpers
// ============================================================================

#[derive(Default)]
struct Rules {
    errors: Vec<String>,
}

impl Rules {
    fn non_empty(&mut self, name: &str, value: &str) {
        if value.trim().is_empty() {
            self.errors.push(format!("{name} is required"));
        }
    }

    fn min_chars(&mut self, name: &str, value: &str, min: usize) {
        if value.trim().chars().count() < min {
            self.errors
                .push(format!("{name} must be at least {min} characters"));
        }
    }

    fn finite(&mut self, name: &str, value: f64) -> bool {
        if value.is_finite() {
            true
        } else {
            self.errors.push(format!("{name} must be a finite number"));
            false
        }
    }

    fn at_least(&mut self, name: &str, value: f64, min: f64) {
        if self.finite(name, value) && value < min {
            self.errors.push(format!("{name} must be >= {min} (got {value})"));
        }
    }

    fn within(&mut self, name: &str, value: f64, min: f64, max: f64) {
        if self.finite(name, value) && !(min..=max).contains(&value) {
            self.errors
                .push(format!("{name} must be between {min} and {max} (got {value})"));
        }
    }

    fn finish(self) -> Result<(), SubmissionError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SubmissionError::Invalid(self.errors))
        }
    }
}

// ============================================================================
// Record Rules
// ============================================================================

impl Validate for DrillingRecord {
    fn validate(&self) -> Result<(), SubmissionError> {
        let mut r = Rules::default();
        r.min_chars("projectName", &self.project_name, 2);
        r.non_empty("holeId", &self.hole_id);
        r.finite("location.latitude", self.location.latitude);
        r.finite("location.longitude", self.location.longitude);
        r.finite("location.elevation", self.location.elevation);
        r.at_least("depth", self.depth, 0.0);
        r.at_least("diameter", self.diameter, 0.0);
        r.within("angle", self.angle, 0.0, 90.0);
        r.within("azimuth", self.azimuth, 0.0, 360.0);
        r.within("coreRecovery", self.core_recovery, 0.0, 100.0);
        r.within("rqd", self.rqd, 0.0, 100.0);
        r.min_chars("driller", &self.driller, 2);
        r.min_chars("supervisor", &self.supervisor, 2);
        r.finish()
    }
}

impl Validate for CoreSample {
    fn validate(&self) -> Result<(), SubmissionError> {
        let mut r = Rules::default();
        r.non_empty("sampleId", &self.sample_id);
        r.non_empty("holeId", &self.hole_id);
        r.at_least("fromDepth", self.from_depth, 0.0);
        r.at_least("toDepth", self.to_depth, 0.0);
        r.finish()
    }
}

impl Validate for ProgressReport {
    fn normalize(&mut self) {
        self.total_meters = self.end_depth - self.start_depth;
    }

    fn validate(&self) -> Result<(), SubmissionError> {
        let mut r = Rules::default();
        r.non_empty("siteId", &self.site_id);
        r.min_chars("operator", &self.operator, 2);
        r.at_least("startDepth", self.start_depth, 0.0);
        r.at_least("endDepth", self.end_depth, 0.0);
        r.within("coreRecovery", self.core_recovery, 0.0, 100.0);
        let t = &self.time_breakdown;
        r.within("timeBreakdown.drilling", t.drilling, 0.0, 12.0);
        r.within("timeBreakdown.coring", t.coring, 0.0, 12.0);
        r.within("timeBreakdown.maintenance", t.maintenance, 0.0, 12.0);
        r.within("timeBreakdown.delays", t.delays, 0.0, 12.0);
        r.finite("totalMeters", self.total_meters);
        r.finish()
    }
}

impl Validate for MaintenanceLog {
    fn validate(&self) -> Result<(), SubmissionError> {
        let mut r = Rules::default();
        r.non_empty("equipmentId", &self.equipment_id);
        if self.maintenance_items.is_empty() {
            r.errors
                .push("maintenanceItems must contain at least one item".to_string());
        }
        for (i, item) in self.maintenance_items.iter().enumerate() {
            r.non_empty(&format!("maintenanceItems[{i}].item"), &item.item);
        }
        r.min_chars("technicianName", &self.technician_name, 2);
        r.within("hoursSpent", self.hours_spent, 0.0, 24.0);
        r.finish()
    }
}

/// Normalize then validate, handing back the accepted record.
pub fn accept<R: Validate>(mut record: R) -> Result<R, SubmissionError> {
    record.normalize();
    record.validate()?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemStatus, Location, MaintenanceItem, MaintenanceType, Shift, TimeBreakdown};
    use chrono::{NaiveDate, Utc};

    fn drilling() -> DrillingRecord {
        DrillingRecord {
            project_name: "Project Alpha".to_string(),
            hole_id: "H001".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            location: Location {
                latitude: -33.4,
                longitude: 151.7,
                elevation: 420.0,
            },
            depth: 150.0,
            diameter: 63.5,
            angle: 60.0,
            azimuth: 270.0,
            core_recovery: 92.0,
            rqd: 81.0,
            notes: None,
            driller: "Jane Doe".to_string(),
            supervisor: "Bob Wilson".to_string(),
        }
    }

    #[test]
    fn test_valid_drilling_record_passes() {
        assert!(drilling().validate().is_ok());
    }

    #[test]
    fn test_all_drilling_failures_reported() {
        let mut d = drilling();
        d.project_name = "A".to_string();
        d.angle = 95.0;
        d.rqd = -1.0;
        d.depth = f64::NAN;

        let err = d.validate().unwrap_err();
        let messages = err.messages();
        assert_eq!(messages.len(), 4, "{messages:?}");
        assert!(messages.iter().any(|m| m.starts_with("projectName")));
        assert!(messages.iter().any(|m| m.starts_with("angle")));
        assert!(messages.iter().any(|m| m.starts_with("rqd")));
        assert!(messages.iter().any(|m| m == "depth must be a finite number"));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let mut d = drilling();
        d.angle = 90.0;
        d.azimuth = 0.0;
        d.core_recovery = 100.0;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_progress_total_meters_derived_on_accept() {
        let report = ProgressReport {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            shift: Shift::Night,
            site_id: "H001".to_string(),
            operator: "Sam White".to_string(),
            start_depth: 100.0,
            end_depth: 137.5,
            core_recovery: 95.0,
            time_breakdown: TimeBreakdown {
                drilling: 6.0,
                coring: 3.0,
                maintenance: 1.0,
                delays: 13.0,
            },
            notes: String::new(),
            total_meters: 0.0,
            timestamp: Utc::now(),
        };

        let err = accept(report.clone()).unwrap_err();
        assert_eq!(err.messages().len(), 1);
        assert!(err.messages()[0].starts_with("timeBreakdown.delays"));

        let mut fixed = report;
        fixed.time_breakdown.delays = 2.0;
        let accepted = accept(fixed).unwrap();
        assert_eq!(accepted.total_meters, 37.5);
    }

    #[test]
    fn test_maintenance_requires_items_and_hours_in_day() {
        let mut log = MaintenanceLog {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            equipment_id: "EQ001".to_string(),
            maintenance_type: MaintenanceType::Preventive,
            maintenance_items: Vec::new(),
            technician_name: "Tom Tech".to_string(),
            hours_spent: 25.0,
            notes: String::new(),
            next_maintenance_date: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
            timestamp: Utc::now(),
        };
        assert_eq!(log.validate().unwrap_err().messages().len(), 2);

        log.maintenance_items
            .push(MaintenanceItem::new("Engine", ItemStatus::Good));
        log.hours_spent = 24.0;
        assert!(log.validate().is_ok());
    }

    #[test]
    fn test_error_display_joins_messages() {
        let err = SubmissionError::Invalid(vec!["a is required".into(), "b is required".into()]);
        assert_eq!(err.to_string(), "invalid submission: a is required; b is required");
    }
}
