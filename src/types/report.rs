//! Derived reporting types: joined report rows, exportable fields, chart data

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::records::{
    AlterationIntensity, Location, RockType, SampleType, Shift, TimeBreakdown,
};

// ============================================================================
// Joined Report Row
// ============================================================================

/// One row of the drilling report table.
///
/// Field union of a drilling record with its first matching progress report
/// and core sample. Drilling fields are always present; progress and core
/// fields are `None` when the join found no match.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedRow {
    // Drilling details
    pub project_name: String,
    pub hole_id: String,
    #[serde(with = "super::records::flexible_date")]
    pub date: NaiveDate,
    pub location: Location,
    pub depth: f64,
    pub diameter: f64,
    pub angle: f64,
    pub azimuth: f64,
    pub core_recovery: f64,
    pub rqd: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub driller: String,
    pub supervisor: String,

    // Progress report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<Shift>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_depth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_depth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_breakdown: Option<TimeBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_meters: Option<f64>,

    /// Progress or core sample creation time (core wins)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    // Core sample
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_depth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_depth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rock_type: Option<RockType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mineralogy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alteration_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alteration_intensity: Option<AlterationIntensity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structural_features: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_type: Option<SampleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lab_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assay_results: Option<String>,
}

impl JoinedRow {
    /// Cell value for a report field. Absent join fields yield `CellValue::Empty`.
    pub fn cell(&self, field: ReportField) -> CellValue {
        use ReportField as F;
        match field {
            F::ProjectName => CellValue::text(&self.project_name),
            F::HoleId => CellValue::text(&self.hole_id),
            F::Date => CellValue::Text(self.date.format("%Y-%m-%d").to_string()),
            F::Latitude => CellValue::Number(self.location.latitude),
            F::Longitude => CellValue::Number(self.location.longitude),
            F::Elevation => CellValue::Number(self.location.elevation),
            F::Depth => CellValue::Number(self.depth),
            F::Diameter => CellValue::Number(self.diameter),
            F::Angle => CellValue::Number(self.angle),
            F::Azimuth => CellValue::Number(self.azimuth),
            F::CoreRecovery => CellValue::Number(self.core_recovery),
            F::Rqd => CellValue::Number(self.rqd),
            F::Notes => CellValue::opt_text(self.notes.as_deref()),
            F::Driller => CellValue::text(&self.driller),
            F::Supervisor => CellValue::text(&self.supervisor),
            F::Shift => CellValue::opt_text(self.shift.map(Shift::as_str)),
            F::SiteId => CellValue::opt_text(self.site_id.as_deref()),
            F::Operator => CellValue::opt_text(self.operator.as_deref()),
            F::StartDepth => CellValue::opt_number(self.start_depth),
            F::EndDepth => CellValue::opt_number(self.end_depth),
            F::DrillingHours => CellValue::opt_number(self.time_breakdown.map(|t| t.drilling)),
            F::CoringHours => CellValue::opt_number(self.time_breakdown.map(|t| t.coring)),
            F::MaintenanceHours => CellValue::opt_number(self.time_breakdown.map(|t| t.maintenance)),
            F::DelayHours => CellValue::opt_number(self.time_breakdown.map(|t| t.delays)),
            F::TotalMeters => CellValue::opt_number(self.total_meters),
            F::Timestamp => match self.timestamp {
                Some(ts) => CellValue::Text(ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
                None => CellValue::Empty,
            },
            F::SampleId => CellValue::opt_text(self.sample_id.as_deref()),
            F::FromDepth => CellValue::opt_number(self.from_depth),
            F::ToDepth => CellValue::opt_number(self.to_depth),
            F::RockType => CellValue::opt_text(self.rock_type.map(RockType::as_str)),
            F::Mineralogy => CellValue::opt_text(self.mineralogy.as_deref()),
            F::AlterationType => CellValue::opt_text(self.alteration_type.as_deref()),
            F::AlterationIntensity => {
                CellValue::opt_text(self.alteration_intensity.map(AlterationIntensity::as_str))
            }
            F::StructuralFeatures => CellValue::opt_text(self.structural_features.as_deref()),
            F::SampleType => CellValue::opt_text(self.sample_type.map(SampleType::as_str)),
            F::LabId => CellValue::opt_text(self.lab_id.as_deref()),
            F::AssayResults => CellValue::opt_text(self.assay_results.as_deref()),
        }
    }
}

// ============================================================================
// Cell Values
// ============================================================================

/// A single spreadsheet / table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Number(f64),
    Bool(bool),
    Text(String),
}

impl CellValue {
    /// Text cell. An empty string is an empty cell, since xlsx cannot
    /// store it.
    pub fn text(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }

    pub fn opt_text(s: Option<&str>) -> Self {
        s.map_or(CellValue::Empty, CellValue::text)
    }

    pub fn opt_number(n: Option<f64>) -> Self {
        n.map_or(CellValue::Empty, CellValue::Number)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

// ============================================================================
// Report Fields
// ============================================================================

/// Closed set of fields a report row can expose.
///
/// Each field has an accessor key (the camelCase JSON path, dotted for nested
/// values) and a header label used in the table and the export header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportField {
    ProjectName,
    HoleId,
    Date,
    Latitude,
    Longitude,
    Elevation,
    Depth,
    Diameter,
    Angle,
    Azimuth,
    CoreRecovery,
    Rqd,
    Notes,
    Driller,
    Supervisor,
    Shift,
    SiteId,
    Operator,
    StartDepth,
    EndDepth,
    DrillingHours,
    CoringHours,
    MaintenanceHours,
    DelayHours,
    TotalMeters,
    Timestamp,
    SampleId,
    FromDepth,
    ToDepth,
    RockType,
    Mineralogy,
    AlterationType,
    AlterationIntensity,
    StructuralFeatures,
    SampleType,
    LabId,
    AssayResults,
}

impl ReportField {
    pub const ALL: [ReportField; 37] = [
        ReportField::ProjectName,
        ReportField::HoleId,
        ReportField::Date,
        ReportField::Latitude,
        ReportField::Longitude,
        ReportField::Elevation,
        ReportField::Depth,
        ReportField::Diameter,
        ReportField::Angle,
        ReportField::Azimuth,
        ReportField::CoreRecovery,
        ReportField::Rqd,
        ReportField::Notes,
        ReportField::Driller,
        ReportField::Supervisor,
        ReportField::Shift,
        ReportField::SiteId,
        ReportField::Operator,
        ReportField::StartDepth,
        ReportField::EndDepth,
        ReportField::DrillingHours,
        ReportField::CoringHours,
        ReportField::MaintenanceHours,
        ReportField::DelayHours,
        ReportField::TotalMeters,
        ReportField::Timestamp,
        ReportField::SampleId,
        ReportField::FromDepth,
        ReportField::ToDepth,
        ReportField::RockType,
        ReportField::Mineralogy,
        ReportField::AlterationType,
        ReportField::AlterationIntensity,
        ReportField::StructuralFeatures,
        ReportField::SampleType,
        ReportField::LabId,
        ReportField::AssayResults,
    ];

    /// Columns shown in the drilling report table.
    pub const TABLE_COLUMNS: [ReportField; 6] = [
        ReportField::ProjectName,
        ReportField::HoleId,
        ReportField::Depth,
        ReportField::CoreRecovery,
        ReportField::RockType,
        ReportField::Mineralogy,
    ];

    pub fn key(self) -> &'static str {
        use ReportField as F;
        match self {
            F::ProjectName => "projectName",
            F::HoleId => "holeId",
            F::Date => "date",
            F::Latitude => "location.latitude",
            F::Longitude => "location.longitude",
            F::Elevation => "location.elevation",
            F::Depth => "depth",
            F::Diameter => "diameter",
            F::Angle => "angle",
            F::Azimuth => "azimuth",
            F::CoreRecovery => "coreRecovery",
            F::Rqd => "rqd",
            F::Notes => "notes",
            F::Driller => "driller",
            F::Supervisor => "supervisor",
            F::Shift => "shift",
            F::SiteId => "siteId",
            F::Operator => "operator",
            F::StartDepth => "startDepth",
            F::EndDepth => "endDepth",
            F::DrillingHours => "timeBreakdown.drilling",
            F::CoringHours => "timeBreakdown.coring",
            F::MaintenanceHours => "timeBreakdown.maintenance",
            F::DelayHours => "timeBreakdown.delays",
            F::TotalMeters => "totalMeters",
            F::Timestamp => "timestamp",
            F::SampleId => "sampleId",
            F::FromDepth => "fromDepth",
            F::ToDepth => "toDepth",
            F::RockType => "rockType",
            F::Mineralogy => "mineralogy",
            F::AlterationType => "alterationType",
            F::AlterationIntensity => "alterationIntensity",
            F::StructuralFeatures => "structuralFeatures",
            F::SampleType => "sampleType",
            F::LabId => "labId",
            F::AssayResults => "assayResults",
        }
    }

    pub fn label(self) -> &'static str {
        use ReportField as F;
        match self {
            F::ProjectName => "Project Name",
            F::HoleId => "Hole ID",
            F::Date => "Date",
            F::Latitude => "Latitude",
            F::Longitude => "Longitude",
            F::Elevation => "Elevation (m)",
            F::Depth => "Depth (m)",
            F::Diameter => "Diameter (mm)",
            F::Angle => "Angle (deg)",
            F::Azimuth => "Azimuth (deg)",
            F::CoreRecovery => "Recovery (%)",
            F::Rqd => "RQD (%)",
            F::Notes => "Notes",
            F::Driller => "Driller",
            F::Supervisor => "Supervisor",
            F::Shift => "Shift",
            F::SiteId => "Site ID",
            F::Operator => "Operator",
            F::StartDepth => "Start Depth (m)",
            F::EndDepth => "End Depth (m)",
            F::DrillingHours => "Drilling (h)",
            F::CoringHours => "Coring (h)",
            F::MaintenanceHours => "Maintenance (h)",
            F::DelayHours => "Delays (h)",
            F::TotalMeters => "Total Meters",
            F::Timestamp => "Timestamp",
            F::SampleId => "Sample ID",
            F::FromDepth => "From (m)",
            F::ToDepth => "To (m)",
            F::RockType => "Rock Type",
            F::Mineralogy => "Mineralogy",
            F::AlterationType => "Alteration Type",
            F::AlterationIntensity => "Alteration Intensity",
            F::StructuralFeatures => "Structural Features",
            F::SampleType => "Sample Type",
            F::LabId => "Lab ID",
            F::AssayResults => "Assay Results",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.label() == label)
    }

    /// Parse a comma-separated list of accessor keys, preserving order.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|k| k.parse())
            .collect()
    }
}

impl std::fmt::Display for ReportField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for ReportField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
            .or_else(|| Self::from_label(s))
            .ok_or_else(|| format!("unknown report field '{s}'"))
    }
}

impl Serialize for ReportField {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for ReportField {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Field descriptor for the export dialog (`{ header, accessorKey }`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub header: &'static str,
    pub accessor_key: &'static str,
}

impl From<ReportField> for FieldDescriptor {
    fn from(field: ReportField) -> Self {
        Self {
            header: field.label(),
            accessor_key: field.key(),
        }
    }
}

// ============================================================================
// Chart Data
// ============================================================================

/// Pie-chart datum: category label and occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub value: usize,
}

/// Drilling progress aggregated over one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProgress {
    /// `YYYY-MM`
    pub month: String,
    pub meters: f64,
    pub avg_core_recovery: f64,
    pub reports: usize,
}

/// Record counts per collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCounts {
    pub drilling: usize,
    pub core_samples: usize,
    pub progress: usize,
    pub maintenance: usize,
}

/// Headline figures for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_meters_drilled: f64,
    pub average_core_recovery: Option<f64>,
    pub active_sites: usize,
    pub equipment_needing_attention: usize,
    pub record_counts: RecordCounts,
}
