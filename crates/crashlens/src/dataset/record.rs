use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One crash event, as merged from the collision and vehicle extracts.
///
/// Field names follow the engine's vocabulary; serde renames map them back
/// to the source CSV headers (which the API also serves, so existing
/// frontends keep working). Every column is optional: the merged extract has
/// holes everywhere and a missing value is never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CrashRecord {
    #[serde(default)]
    pub borough: Option<String>,
    #[serde(default)]
    pub crash_datetime: Option<String>,
    /// Derived from `crash_datetime` at load time; not a CSV column.
    #[serde(default, skip_deserializing)]
    pub year: Option<i32>,
    #[serde(default, skip_deserializing)]
    pub month: Option<u32>,
    #[serde(default, skip_deserializing)]
    pub day: Option<u32>,
    #[serde(default, rename = "vehicle_type_code_1")]
    pub vehicle_type_primary: Option<String>,
    #[serde(default, rename = "vehicle_type_code_2")]
    pub vehicle_type_secondary: Option<String>,
    #[serde(default, rename = "contributing_factor_vehicle_1")]
    pub contributing_factor_primary: Option<String>,
    #[serde(default, rename = "contributing_factor_vehicle_2")]
    pub contributing_factor_secondary: Option<String>,
    #[serde(default, rename = "number_of_persons_injured")]
    pub persons_injured: Option<u32>,
    #[serde(default, rename = "number_of_persons_killed")]
    pub persons_killed: Option<u32>,
    #[serde(default)]
    pub on_street_name: Option<String>,
    #[serde(default)]
    pub cross_street_name: Option<String>,
    #[serde(default)]
    pub off_street_name: Option<String>,
}

impl CrashRecord {
    /// The single vehicle value used by the vehicle-type dimension: primary
    /// if non-empty, else secondary, else the empty string. This is a
    /// coalesce, unlike contributing factors which OR across both columns.
    pub fn coalesced_vehicle_type(&self) -> &str {
        let primary = text(&self.vehicle_type_primary);
        if !primary.is_empty() {
            primary
        } else {
            text(&self.vehicle_type_secondary)
        }
    }

    /// The text columns scanned by substring search, missing values as empty
    /// strings.
    pub fn searchable_fields(&self) -> [&str; 8] {
        [
            text(&self.borough),
            text(&self.vehicle_type_primary),
            text(&self.vehicle_type_secondary),
            text(&self.contributing_factor_primary),
            text(&self.contributing_factor_secondary),
            text(&self.on_street_name),
            text(&self.cross_street_name),
            text(&self.off_street_name),
        ]
    }
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}
