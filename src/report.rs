//! Analysis report assembly
//!
//! Bundles the three analysis outputs (per-point classifications, pairwise
//! correlations, site summary) with the context methodology metadata into a
//! single serializable record. The structured fields are the contract;
//! `render_text` is a convenience view for terminal use.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classifier;
use crate::stats::{self, CorrelationEngine, SiteSummary};
use crate::types::{
    Classification, ContextClassification, ContextType, CorrelationResult, ElementReading,
    DIAGENESIS_PAIRS,
};

/// Full analysis output for one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    /// Depositional context applied, when one was supplied
    pub context: Option<ContextType>,
    /// Method name from the context reference table
    pub methodology: &'static str,
    /// Key publications behind the applied criteria
    pub references: &'static [&'static str],
    pub row_count: usize,
    /// Context-free verdicts, one per row in input order
    pub classifications: Vec<Classification>,
    /// Context-adjusted verdicts, present when a context was supplied
    pub context_classifications: Option<Vec<ContextClassification>>,
    pub correlations: Vec<CorrelationResult>,
    pub summary: SiteSummary,
}

impl AnalysisReport {
    /// Run the full pipeline over a dataset snapshot.
    pub fn build(readings: &[ElementReading], context: Option<ContextType>) -> Self {
        let classifications = classifier::classify_batch(readings);

        let context_classifications = context.map(|ctx| {
            readings
                .iter()
                .map(|r| classifier::classify_with_context(r, ctx))
                .collect()
        });

        let correlations = CorrelationEngine::analyze(readings);
        let summary = stats::summarize_with_means(readings, &classifications, &correlations);

        let profile = context.unwrap_or(ContextType::Unknown).profile();

        Self {
            generated_at: Utc::now(),
            context,
            methodology: profile.method,
            references: profile.key_papers,
            row_count: readings.len(),
            classifications,
            context_classifications,
            correlations,
            summary,
        }
    }

    /// Plain-text rendering for terminal output.
    pub fn render_text(&self) -> String {
        use std::fmt::Write as _;

        let mut out = String::new();
        let _ = writeln!(out, "Residue analysis report ({} points)", self.row_count);
        let _ = writeln!(out, "Methodology: {}", self.methodology);
        if let Some(ctx) = self.context {
            let _ = writeln!(out, "Context: {}", ctx.profile().name);
        }

        let _ = writeln!(out, "\n== Classifications ==");
        for (i, c) in self.classifications.iter().enumerate() {
            let _ = writeln!(
                out,
                "  #{:<3} {} [{}]",
                i + 1,
                c.label,
                c.confidence
            );
        }

        if let Some(ref ctx_rows) = self.context_classifications {
            let _ = writeln!(out, "\n== Context-adjusted classifications ==");
            for (i, c) in ctx_rows.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  #{:<3} {} [{}]",
                    i + 1,
                    c.verdict,
                    c.confidence
                );
                if let Some(ref note) = c.correction_note {
                    let _ = writeln!(out, "       {note}");
                }
                if let Some(ref note) = c.guano_indicator {
                    let _ = writeln!(out, "       {note}");
                }
                if let Some(ref note) = c.contamination_note {
                    let _ = writeln!(out, "       {note}");
                }
            }
        }

        let _ = writeln!(out, "\n== Correlations ==");
        if self.correlations.is_empty() {
            let _ = writeln!(out, "  (insufficient co-detected rows for every pair)");
        }
        for r in &self.correlations {
            let _ = writeln!(
                out,
                "  {:<5} r={:+.3} p={:.4} n={} {}",
                r.pair_name,
                r.pearson_r,
                r.p_value,
                r.n,
                if r.significant { "SIGNIFICANT" } else { "-" }
            );
            if r.significant {
                if let Some(spec) = DIAGENESIS_PAIRS
                    .iter()
                    .find(|p| p.x == r.element_x && p.y == r.element_y)
                {
                    let _ = writeln!(out, "       {} [{}]", spec.interpretation, spec.citation);
                }
            }
        }

        let _ = writeln!(out, "\n== Site summary ==");
        let _ = writeln!(
            out,
            "  organic: {}  mineral: {}  ambiguous: {}",
            self.summary.organic_count, self.summary.mineral_count, self.summary.ambiguous_count
        );
        if let Some(mean) = self.summary.mean_ca_p {
            let _ = writeln!(out, "  mean Ca/P: {mean:.2}");
        }
        for fact in &self.summary.facts {
            let _ = writeln!(out, "  - {}", fact.describe());
        }

        let _ = writeln!(out, "\nReferences:");
        for paper in self.references {
            let _ = writeln!(out, "  {paper}");
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContextVerdict, ResidueLabel};

    fn sample_readings() -> Vec<ElementReading> {
        vec![
            ElementReading { c: 30.0, mn: 0.2, p: 1.5, ca: 2.0, ..Default::default() },
            ElementReading { c: 5.0, mn: 0.1, p: 12.0, ca: 20.0, ..Default::default() },
            ElementReading { c: 5.0, mn: 8.0, p: 2.0, ca: 1.0, ..Default::default() },
        ]
    }

    #[test]
    fn test_report_without_context() {
        let report = AnalysisReport::build(&sample_readings(), None);
        assert_eq!(report.row_count, 3);
        assert_eq!(report.classifications[0].label, ResidueLabel::OrganicAdhesive);
        assert_eq!(report.classifications[1].label, ResidueLabel::BiogenicApatite);
        assert_eq!(report.classifications[2].label, ResidueLabel::MnPhosphateMimic);
        assert!(report.context_classifications.is_none());
        assert!(report.summary.organic_count >= 1);
    }

    #[test]
    fn test_report_with_context_keeps_both_views() {
        let report = AnalysisReport::build(&sample_readings(), Some(ContextType::PeatBog));
        let ctx_rows = report.context_classifications.as_ref().unwrap();
        assert_eq!(ctx_rows.len(), 3);
        assert_eq!(ctx_rows[0].verdict, ContextVerdict::OrganicModerate);
        assert!(ctx_rows.iter().all(|c| c.ca_p_ignored));
        // Context-free view is still present for comparison
        assert_eq!(report.classifications.len(), 3);
        assert_eq!(report.methodology, ContextType::PeatBog.profile().method);
    }

    #[test]
    fn test_report_serializes() {
        let report = AnalysisReport::build(&sample_readings(), Some(ContextType::CaveGuano));
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"summary\""));
        assert!(json.contains("Karkanas"));
    }

    #[test]
    fn test_empty_dataset_report() {
        let report = AnalysisReport::build(&[], None);
        assert_eq!(report.row_count, 0);
        assert!(report.classifications.is_empty());
        assert!(report.correlations.is_empty());
        assert!(report.summary.facts.is_empty());
        // Text rendering stays total on empty input
        assert!(report.render_text().contains("0 points"));
    }
}
