pub mod server;

pub mod cache;
pub mod dataset;
pub mod error;
pub mod query;

pub use crate::dataset::{CrashRecord, Dataset, DatasetHandle};
pub use crate::error::{EngineError, EngineResult};
pub use crate::query::{FilterCriteria, InjuryType, QueryEngine};
