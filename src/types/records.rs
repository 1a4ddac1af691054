//! Field record types submitted by the data-entry forms
//!
//! Four record kinds share the store:
//! - `DrillingRecord`: hole collar, orientation and recovery for one hole
//! - `CoreSample`: logged interval with lithology and assay notes
//! - `ProgressReport`: one shift of drilling on a site
//! - `MaintenanceLog`: equipment service with per-item status
//!
//! Wire format is camelCase JSON, matching what the dashboard forms post.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Record Kinds
// ============================================================================

/// Discriminant for the four record collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    Drilling,
    CoreSample,
    Progress,
    Maintenance,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Drilling,
        RecordKind::CoreSample,
        RecordKind::Progress,
        RecordKind::Maintenance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Drilling => "drilling",
            RecordKind::CoreSample => "core-sample",
            RecordKind::Progress => "progress",
            RecordKind::Maintenance => "maintenance",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Drilling Details
// ============================================================================

/// Collar position of a hole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Metres above sea level
    pub elevation: f64,
}

/// Drilling details for one hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillingRecord {
    pub project_name: String,
    pub hole_id: String,
    #[serde(with = "flexible_date")]
    pub date: NaiveDate,
    pub location: Location,
    /// Hole depth (m)
    pub depth: f64,
    /// Core diameter (mm)
    pub diameter: f64,
    /// Dip from horizontal, 0-90 degrees
    pub angle: f64,
    /// 0-360 degrees
    pub azimuth: f64,
    /// Core recovery (%)
    pub core_recovery: f64,
    /// Rock quality designation (%)
    pub rqd: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub driller: String,
    pub supervisor: String,
}

// ============================================================================
// Core Samples
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RockType {
    Igneous,
    Sedimentary,
    Metamorphic,
}

impl RockType {
    pub const ALL: [RockType; 3] = [RockType::Igneous, RockType::Sedimentary, RockType::Metamorphic];

    pub fn as_str(self) -> &'static str {
        match self {
            RockType::Igneous => "igneous",
            RockType::Sedimentary => "sedimentary",
            RockType::Metamorphic => "metamorphic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlterationIntensity {
    Weak,
    Moderate,
    Strong,
    Intense,
}

impl AlterationIntensity {
    pub const ALL: [AlterationIntensity; 4] = [
        AlterationIntensity::Weak,
        AlterationIntensity::Moderate,
        AlterationIntensity::Strong,
        AlterationIntensity::Intense,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AlterationIntensity::Weak => "weak",
            AlterationIntensity::Moderate => "moderate",
            AlterationIntensity::Strong => "strong",
            AlterationIntensity::Intense => "intense",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SampleType {
    WholeRock,
    Channel,
    Chip,
    QuarterCore,
}

impl SampleType {
    pub const ALL: [SampleType; 4] = [
        SampleType::WholeRock,
        SampleType::Channel,
        SampleType::Chip,
        SampleType::QuarterCore,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SampleType::WholeRock => "whole-rock",
            SampleType::Channel => "channel",
            SampleType::Chip => "chip",
            SampleType::QuarterCore => "quarter-core",
        }
    }
}

/// Core sample analysis for a logged interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreSample {
    pub sample_id: String,
    pub hole_id: String,
    pub from_depth: f64,
    /// Expected >= `from_depth`, not enforced
    pub to_depth: f64,
    pub rock_type: RockType,
    pub mineralogy: String,
    pub alteration_type: String,
    pub alteration_intensity: AlterationIntensity,
    pub structural_features: String,
    pub sample_type: SampleType,
    pub lab_id: String,
    pub assay_results: String,
    pub notes: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Drilling Progress
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Day,
    Night,
}

impl Shift {
    pub fn as_str(self) -> &'static str {
        match self {
            Shift::Day => "day",
            Shift::Night => "night",
        }
    }
}

/// Hours spent per activity during a shift. Each entry is 0-12 h.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeBreakdown {
    pub drilling: f64,
    pub coring: f64,
    pub maintenance: f64,
    pub delays: f64,
}

impl TimeBreakdown {
    pub fn total_hours(&self) -> f64 {
        self.drilling + self.coring + self.maintenance + self.delays
    }
}

/// Shift progress report for one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    #[serde(with = "flexible_date")]
    pub date: NaiveDate,
    pub shift: Shift,
    /// Matches `DrillingRecord::hole_id`
    pub site_id: String,
    pub operator: String,
    pub start_depth: f64,
    pub end_depth: f64,
    pub core_recovery: f64,
    pub time_breakdown: TimeBreakdown,
    pub notes: String,
    /// `end_depth - start_depth`, computed at submission
    #[serde(default)]
    pub total_meters: f64,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Equipment Maintenance
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceType {
    Preventive,
    Corrective,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    Good,
    Replaced,
    Repaired,
    NeedsAttention,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::Good,
        ItemStatus::Replaced,
        ItemStatus::Repaired,
        ItemStatus::NeedsAttention,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Good => "good",
            ItemStatus::Replaced => "replaced",
            ItemStatus::Repaired => "repaired",
            ItemStatus::NeedsAttention => "needs-attention",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceItem {
    pub item: String,
    pub status: ItemStatus,
}

impl MaintenanceItem {
    pub fn new(item: impl Into<String>, status: ItemStatus) -> Self {
        Self {
            item: item.into(),
            status,
        }
    }
}

/// Equipment maintenance log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceLog {
    #[serde(with = "flexible_date")]
    pub date: NaiveDate,
    pub equipment_id: String,
    #[serde(rename = "type")]
    pub maintenance_type: MaintenanceType,
    pub maintenance_items: Vec<MaintenanceItem>,
    pub technician_name: String,
    pub hours_spent: f64,
    pub notes: String,
    #[serde(with = "flexible_date")]
    pub next_maintenance_date: NaiveDate,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Date Parsing
// ============================================================================

/// Parse a calendar date from either `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// Browser date pickers post `Date.toISOString()`, so both shapes arrive.
pub fn parse_flexible_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

/// Serde adapter: serializes as `YYYY-MM-DD`, accepts date or RFC 3339.
pub mod flexible_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_flexible_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flexible_date_accepts_both_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_flexible_date("2024-01-15"), Some(expected));
        assert_eq!(parse_flexible_date("2024-01-15T08:30:00.000Z"), Some(expected));
        assert_eq!(parse_flexible_date("15/01/2024"), None);
        assert_eq!(parse_flexible_date(""), None);
    }

    #[test]
    fn test_drilling_record_wire_format() {
        let json = serde_json::json!({
            "projectName": "Diamond Creek Project",
            "holeId": "DCH-2024-001",
            "date": "2024-03-02T10:00:00.000Z",
            "location": { "latitude": 45.5017, "longitude": -73.5673, "elevation": 425.5 },
            "depth": 157.3,
            "diameter": 47.6,
            "angle": 65.0,
            "azimuth": 270.0,
            "coreRecovery": 98.5,
            "rqd": 85.0,
            "driller": "John Smith",
            "supervisor": "Robert Johnson"
        });
        let record: DrillingRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.hole_id, "DCH-2024-001");
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert!(record.notes.is_none());

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["date"], "2024-03-02");
        assert_eq!(back["coreRecovery"], 98.5);
        assert!(back.get("notes").is_none());
    }

    #[test]
    fn test_enum_wire_values() {
        assert_eq!(serde_json::to_value(ItemStatus::NeedsAttention).unwrap(), "needs-attention");
        assert_eq!(serde_json::to_value(SampleType::QuarterCore).unwrap(), "quarter-core");
        assert_eq!(serde_json::to_value(RockType::Metamorphic).unwrap(), "metamorphic");
        assert_eq!(serde_json::to_value(Shift::Night).unwrap(), "night");
        let t: MaintenanceType = serde_json::from_value(serde_json::json!("corrective")).unwrap();
        assert_eq!(t, MaintenanceType::Corrective);
    }

    #[test]
    fn test_maintenance_type_serializes_as_type_key() {
        let log = MaintenanceLog {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            equipment_id: "DRILL-003".to_string(),
            maintenance_type: MaintenanceType::Preventive,
            maintenance_items: vec![MaintenanceItem::new("Drill bit", ItemStatus::Replaced)],
            technician_name: "Mike Anderson".to_string(),
            hours_spent: 4.5,
            notes: String::new(),
            next_maintenance_date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
            timestamp: Utc::now(),
        };
        let v = serde_json::to_value(&log).unwrap();
        assert_eq!(v["type"], "preventive");
        assert_eq!(v["maintenanceItems"][0]["status"], "replaced");
        assert_eq!(v["nextMaintenanceDate"], "2024-01-09");
    }
}
