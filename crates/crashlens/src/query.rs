//! Query engine: free-text translation, criteria merging, evaluation, and
//! the result cache.

pub mod criteria;
pub mod evaluate;
pub mod translate;

pub use criteria::{coerce_year, FilterCriteria, InjuryType};
pub use evaluate::evaluate;
pub use translate::{translate, ParsedQuery};

use std::sync::Arc;

use crate::cache::ResultCache;
use crate::dataset::{CrashRecord, Dataset, DatasetHandle};

const CACHE_MAX_ENTRIES: u32 = 256;
const CACHE_TTL_SECONDS: u64 = 300;

/// The query orchestrator: owns the dataset handle and the result cache,
/// merges translator output into caller-supplied criteria, and evaluates.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    dataset: DatasetHandle,
    cache: ResultCache,
}

impl QueryEngine {
    pub fn new(dataset: DatasetHandle) -> Self {
        QueryEngine {
            dataset,
            cache: ResultCache::new(CACHE_MAX_ENTRIES, CACHE_TTL_SECONDS),
        }
    }

    pub fn dataset(&self) -> &DatasetHandle {
        &self.dataset
    }

    /// Run one query: resolve the criteria, consult the cache, evaluate
    /// against the current dataset snapshot.
    pub fn query(&self, criteria: FilterCriteria) -> Arc<Vec<CrashRecord>> {
        let criteria = Self::resolve_criteria(criteria);
        let key = criteria.cache_key();
        if let Some(hit) = self.cache.get(&key) {
            log::debug!("cache hit for {key}");
            return hit;
        }

        let snapshot = self.dataset.snapshot();
        let results = Arc::new(evaluate(&snapshot, &criteria));
        log::debug!("{} of {} records matched", results.len(), snapshot.len());
        self.cache.insert(key, results.clone());
        results
    }

    /// Merge translator output into the caller's criteria.
    ///
    /// Per dimension, a caller-supplied non-empty value wins outright and
    /// the translator's value is discarded; otherwise the translator's
    /// singleton is adopted. The raw text is always retained as
    /// `search_text` when non-empty, so substring search ANDs with whatever
    /// structured dimensions ended up active.
    pub fn resolve_criteria(mut criteria: FilterCriteria) -> FilterCriteria {
        let Some(text) = criteria.search_text.as_deref() else {
            return criteria;
        };
        if text.is_empty() {
            criteria.search_text = None;
            return criteria;
        }

        let parsed = translate(text);
        if criteria.boroughs.is_empty() {
            criteria.boroughs.extend(parsed.borough);
        }
        if criteria.years.is_empty() {
            criteria.years.extend(parsed.year);
        }
        if criteria.vehicle_types.is_empty() {
            criteria.vehicle_types.extend(parsed.vehicle_type);
        }
        if criteria.contributing_factors.is_empty() {
            criteria.contributing_factors.extend(parsed.contributing_factor);
        }
        if criteria.injury_types.is_empty() {
            criteria.injury_types.extend(parsed.injury_type);
        }
        criteria
    }

    /// Swap in a freshly loaded dataset and drop every cached result.
    pub fn reload(&self, dataset: Dataset) {
        log::info!("dataset reloaded: {} records", dataset.len());
        self.dataset.replace(dataset);
        self.cache.clear();
    }
}
