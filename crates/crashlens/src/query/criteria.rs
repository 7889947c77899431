use serde_json::Value;

use crate::error::{EngineError, EngineResult};

/// Requested injury outcome for the injury-type dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum InjuryType {
    Injured,
    Killed,
    None,
}

impl InjuryType {
    /// Parse the wire value used by the dropdowns. Anything else is a caller
    /// contract violation, reported rather than swallowed.
    pub fn parse(value: &str) -> EngineResult<Self> {
        match value {
            "Injured" => Ok(InjuryType::Injured),
            "Killed" => Ok(InjuryType::Killed),
            "None" => Ok(InjuryType::None),
            other => Err(EngineError::InvalidFilterValue(format!(
                "unknown injury type: {other:?}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InjuryType::Injured => "Injured",
            InjuryType::Killed => "Killed",
            InjuryType::None => "None",
        }
    }
}

/// One query's structured filter set.
///
/// Empty dimensions are unconstrained. Values within a dimension are ORed;
/// dimensions combine with AND. `search_text` carries the raw free text and
/// is ANDed with the structured dimensions by the evaluator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub boroughs: Vec<String>,
    pub years: Vec<i32>,
    pub vehicle_types: Vec<String>,
    pub contributing_factors: Vec<String>,
    pub injury_types: Vec<InjuryType>,
    pub search_text: Option<String>,
}

impl FilterCriteria {
    /// Canonical cache key: dimensions are sorted and deduplicated so
    /// equivalent criteria share one cache entry. Search text participates
    /// verbatim.
    pub fn cache_key(&self) -> String {
        let mut boroughs = self.boroughs.clone();
        boroughs.sort();
        boroughs.dedup();
        let mut years = self.years.clone();
        years.sort_unstable();
        years.dedup();
        let mut vehicle_types = self.vehicle_types.clone();
        vehicle_types.sort();
        vehicle_types.dedup();
        let mut factors = self.contributing_factors.clone();
        factors.sort();
        factors.dedup();
        let mut injury_types = self.injury_types.clone();
        injury_types.sort_unstable();
        injury_types.dedup();

        format!(
            "b={boroughs:?}|y={years:?}|v={vehicle_types:?}|f={factors:?}|i={injuries:?}|s={search:?}",
            injuries = injury_types.iter().map(InjuryType::as_str).collect::<Vec<_>>(),
            search = self.search_text,
        )
    }
}

/// Coerce a caller-supplied year to an integer. The dropdowns send numbers,
/// older frontends send numeric strings; both are fine. Anything else is an
/// [`EngineError::InvalidFilterValue`].
pub fn coerce_year(value: &Value) -> EngineResult<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .and_then(|y| i32::try_from(y).ok())
            .ok_or_else(|| EngineError::InvalidFilterValue(format!("year is not an integer: {n}"))),
        Value::String(s) => s.trim().parse::<i32>().map_err(|_| {
            EngineError::InvalidFilterValue(format!("year is not coercible to an integer: {s:?}"))
        }),
        other => Err(EngineError::InvalidFilterValue(format!(
            "year must be a number or string, got {other}"
        ))),
    }
}
