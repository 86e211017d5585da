//! Static type analyzer (spec §3.5, §4.4): walks the same definition graph
//! the evaluator does, but produces types instead of values.

pub mod analyze;
pub mod context;
pub mod report;

pub use analyze::{analyze, analyze_all, analyze_scoped};
pub use context::{AnalyzeContext, CacheKey, cache_key};
pub use report::{AnalysisFailure, AnalysisReport, AnalyzeResult, DefTag};
