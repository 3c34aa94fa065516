//! residua: archaeological residue taphonomy engine
//!
//! Classifies SEM-EDS point analyses of archaeological residues into
//! taphonomic categories and quantifies diagnostic elemental correlations to
//! infer site-level diagenetic processes.
//!
//! ## Architecture
//!
//! - **Classifier**: ordered diagnostic rule chain (first match wins), with
//!   context-corrected variants for known depositional environments
//! - **Stats**: significance-tested Pearson correlations over a curated
//!   diagenesis pair table, plus site-level interpretation facts
//! - **Ingest**: tolerant reduction of raw CSV/JSON rows to validated readings
//!
//! Everything in the core is a pure, synchronous function over immutable
//! inputs: classification is row-independent, correlation is
//! population-level over the full dataset snapshot.

pub mod classifier;
pub mod ingest;
pub mod report;
pub mod stats;
pub mod types;

// Re-export the analysis entry points
pub use classifier::{classify, classify_batch, classify_with_context};
pub use report::AnalysisReport;
pub use stats::{
    summarize, summarize_with_means, CorrelationEngine, ElementMean, SiteSummary, SummaryFact,
};

// Re-export commonly used types
pub use types::{
    Classification, ConfidenceLevel, ContextClassification, ContextProfile, ContextType,
    ContextVerdict, CorrelationResult, Element, ElementPairSpec, ElementReading,
    ExpectedDirection, Recommendation, ResidueLabel, DIAGENESIS_PAIRS,
};
