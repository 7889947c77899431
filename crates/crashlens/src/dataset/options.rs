use std::collections::BTreeSet;

use serde::Serialize;
use utoipa::ToSchema;

use crate::dataset::record::CrashRecord;
use crate::dataset::Columns;

/// Unique values per dimension, for dropdown population.
///
/// Computed once at load. Vehicle types and contributing factors come from
/// the primary column only, matching what the dropdowns have always shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct FilterOptions {
    pub boroughs: Vec<String>,
    pub years: Vec<i32>,
    pub vehicle_types: Vec<String>,
    pub contributing_factors: Vec<String>,
    /// Present only when both injury-count columns exist in the source.
    pub injury_types: Vec<String>,
}

impl FilterOptions {
    pub fn collect(records: &[CrashRecord], columns: &Columns) -> Self {
        let mut boroughs = BTreeSet::new();
        let mut years = BTreeSet::new();
        let mut vehicle_types = BTreeSet::new();
        let mut contributing_factors = BTreeSet::new();

        for record in records {
            if let Some(borough) = non_empty(&record.borough) {
                boroughs.insert(borough.to_string());
            }
            if let Some(year) = record.year {
                years.insert(year);
            }
            if let Some(vehicle) = non_empty(&record.vehicle_type_primary) {
                vehicle_types.insert(vehicle.to_string());
            }
            if let Some(factor) = non_empty(&record.contributing_factor_primary) {
                contributing_factors.insert(factor.to_string());
            }
        }

        let injury_types = if columns.persons_injured && columns.persons_killed {
            vec![
                "Injured".to_string(),
                "Killed".to_string(),
                "None".to_string(),
            ]
        } else {
            Vec::new()
        };

        FilterOptions {
            boroughs: boroughs.into_iter().collect(),
            years: years.into_iter().collect(),
            vehicle_types: vehicle_types.into_iter().collect(),
            contributing_factors: contributing_factors.into_iter().collect(),
            injury_types,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
