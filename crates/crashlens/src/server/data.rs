use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::dataset::CrashRecord;
use crate::error::EngineResult;
use crate::query::criteria::{coerce_year, FilterCriteria, InjuryType};
use crate::server::error::{ApiError, ApiErrorResponse};
use crate::server::ServerState;

/// Filter selections as the frontend sends them: one array per dimension
/// plus the free-text search box. Everything is optional.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct QueryRequest {
    #[serde(default)]
    pub borough: Vec<String>,
    /// Years as numbers or numeric strings.
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub year: Vec<Value>,
    #[serde(default)]
    pub vehicle_type: Vec<String>,
    #[serde(default)]
    pub contributing_factor: Vec<String>,
    /// Any of "Injured", "Killed", "None".
    #[serde(default)]
    pub injury_type: Vec<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl QueryRequest {
    pub(crate) fn into_criteria(self) -> EngineResult<FilterCriteria> {
        let years = self.year.iter().map(coerce_year).collect::<EngineResult<Vec<_>>>()?;
        let injury_types = self
            .injury_type
            .iter()
            .map(|value| InjuryType::parse(value))
            .collect::<EngineResult<Vec<_>>>()?;
        let search_text = self.search.filter(|text| !text.is_empty());

        Ok(FilterCriteria {
            boroughs: self.borough,
            years,
            vehicle_types: self.vehicle_type,
            contributing_factors: self.contributing_factor,
            injury_types,
            search_text,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QueryResponse {
    pub count: usize,
    pub data: Vec<CrashRecord>,
}

#[utoipa::path(
    post,
    path = "/api/data",
    tag = "data",
    request_body = QueryRequest,
    responses(
        (status = 200, body = QueryResponse),
        (status = 400, body = ApiErrorResponse),
    )
)]
pub(crate) async fn query_data(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let criteria = payload.into_criteria()?;
    let results = state.engine.query(criteria);
    Ok(Json(QueryResponse {
        count: results.len(),
        data: results.as_ref().clone(),
    }))
}
