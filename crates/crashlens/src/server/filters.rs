use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::dataset::FilterOptions;
use crate::server::ServerState;

#[utoipa::path(
    get,
    path = "/api/filters",
    tag = "filters",
    responses(
        (status = 200, body = FilterOptions),
    )
)]
pub(crate) async fn filter_options(State(state): State<Arc<ServerState>>) -> Json<FilterOptions> {
    let snapshot = state.engine.dataset().snapshot();
    Json(snapshot.options().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{CrashRecord, Dataset, DatasetHandle};
    use crate::query::QueryEngine;

    fn state() -> Arc<ServerState> {
        let records = vec![
            CrashRecord {
                borough: Some("Brooklyn".to_string()),
                year: Some(2021),
                ..CrashRecord::default()
            },
            CrashRecord {
                borough: Some("Queens".to_string()),
                year: Some(2019),
                ..CrashRecord::default()
            },
        ];
        Arc::new(ServerState {
            engine: QueryEngine::new(DatasetHandle::new(Dataset::from_records(records))),
        })
    }

    #[tokio::test]
    async fn returns_precomputed_options() {
        let Json(options) = filter_options(State(state())).await;
        assert_eq!(options.boroughs, vec!["Brooklyn", "Queens"]);
        assert_eq!(options.years, vec![2019, 2021]);
        assert_eq!(options.injury_types, vec!["Injured", "Killed", "None"]);
    }
}
