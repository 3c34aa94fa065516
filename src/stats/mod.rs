//! Dataset-level statistics
//!
//! - `correlations`: Pearson r with Student's-t significance testing over
//!   the curated diagenesis pair table (statrs)
//! - `aggregator`: classification counts + significant correlations →
//!   discrete site-level interpretation facts

mod aggregator;
mod correlations;

pub use aggregator::{
    summarize, summarize_with_means, ElementMean, SiteSummary, SummaryFact,
};
pub use correlations::{CorrelationEngine, MIN_PAIR_SAMPLES};
