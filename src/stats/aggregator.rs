//! Population-level interpretation
//!
//! Turns the per-point classification set and the correlation set into
//! discrete summary facts for reporting. Every fact carries the numbers that
//! back it and is re-derivable from the two input sets. This is a
//! deterministic threshold function, not narrative generation.

use serde::{Deserialize, Serialize};

use crate::types::thresholds::residue_thresholds as t;
use crate::types::{
    Classification, CorrelationResult, Element, ElementReading, DIAGNOSTIC_ELEMENTS,
};

/// One discrete interpretation fact with its backing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SummaryFact {
    /// Mean Ca/P sits in the biogenic hydroxyapatite/dahllite window
    BiogenicApatite { mean_ca_p: f64 },
    /// Significant P-Ca coupling: guano-driven diagenesis
    GuanoDrivenDiagenesis { r: f64 },
    /// Significant K-Al coupling: acidic K-Al phosphate formation
    AcidicPhosphateFormation { r: f64 },
    /// Significant C-P anticorrelation: phosphate replacing organic carbon
    PhosphateReplacingOrganics { r: f64 },
    /// Organic residues present: molecular confirmation is warranted
    MolecularConfirmationWarranted { organic_count: usize },
    /// Mineral phases present: exclude them from organic analysis
    ExcludeFromOrganicAnalysis { mineral_count: usize },
    /// Sub-High-confidence points need high-magnification morphology review
    MorphologyReviewNeeded { ambiguous_count: usize },
}

impl SummaryFact {
    /// One-line analyst-facing statement of the fact.
    pub fn describe(&self) -> String {
        match self {
            Self::BiogenicApatite { mean_ca_p } => format!(
                "Mean Ca/P {mean_ca_p:.2} is consistent with biogenic hydroxyapatite/dahllite"
            ),
            Self::GuanoDrivenDiagenesis { r } => format!(
                "P-Ca correlation (r={r:.2}) indicates guano-driven diagenesis"
            ),
            Self::AcidicPhosphateFormation { r } => format!(
                "K-Al correlation (r={r:.2}) indicates acidic K-Al phosphate formation"
            ),
            Self::PhosphateReplacingOrganics { r } => format!(
                "C-P anticorrelation (r={r:.2}) indicates phosphate replacing organic carbon"
            ),
            Self::MolecularConfirmationWarranted { organic_count } => format!(
                "{organic_count} organic point(s): proceed with molecular confirmation"
            ),
            Self::ExcludeFromOrganicAnalysis { mineral_count } => format!(
                "{mineral_count} mineral point(s): exclude from organic analysis"
            ),
            Self::MorphologyReviewNeeded { ambiguous_count } => format!(
                "{ambiguous_count} ambiguous point(s): high-magnification morphology needed"
            ),
        }
    }
}

/// Per-element dataset mean over detected (value > 0) readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementMean {
    pub element: Element,
    pub mean: f64,
    /// Readings where the element was detected
    pub detected_n: usize,
}

/// Site-level summary assembled from classifications and correlations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSummary {
    pub organic_count: usize,
    pub mineral_count: usize,
    pub ambiguous_count: usize,
    /// Mean Ca/P over points where the ratio was defined
    pub mean_ca_p: Option<f64>,
    /// Dataset means for the diagnostic elements
    pub element_means: Vec<ElementMean>,
    pub facts: Vec<SummaryFact>,
}

/// Derive the site summary from the two analysis outputs.
///
/// Empty inputs produce zero counts, no mean, and no facts, never an error.
pub fn summarize(
    classifications: &[Classification],
    correlations: &[CorrelationResult],
) -> SiteSummary {
    let organic_count = classifications
        .iter()
        .filter(|c| c.label.counts_as_organic())
        .count();
    let mineral_count = classifications
        .iter()
        .filter(|c| c.label.counts_as_mineral())
        .count();
    let ambiguous_count = classifications
        .iter()
        .filter(|c| c.confidence.needs_review())
        .count();

    let ratios: Vec<f64> = classifications.iter().filter_map(|c| c.ca_p_ratio).collect();
    let mean_ca_p = if ratios.is_empty() {
        None
    } else {
        Some(ratios.iter().sum::<f64>() / ratios.len() as f64)
    };

    let mut facts = Vec::new();

    if let Some(mean) = mean_ca_p {
        if (t::APATITE_CA_P_MIN..=t::APATITE_CA_P_MAX).contains(&mean) {
            facts.push(SummaryFact::BiogenicApatite { mean_ca_p: mean });
        }
    }

    // Only three pairs carry a canned narrative; the rest are support data.
    for result in correlations.iter().filter(|r| r.significant) {
        if result.is_pair(Element::P, Element::Ca) && result.pearson_r > 0.7 {
            facts.push(SummaryFact::GuanoDrivenDiagenesis { r: result.pearson_r });
        } else if result.is_pair(Element::K, Element::Al) && result.pearson_r > 0.6 {
            facts.push(SummaryFact::AcidicPhosphateFormation { r: result.pearson_r });
        } else if result.is_pair(Element::C, Element::P) && result.pearson_r < -0.3 {
            facts.push(SummaryFact::PhosphateReplacingOrganics { r: result.pearson_r });
        }
    }

    if organic_count > 0 {
        facts.push(SummaryFact::MolecularConfirmationWarranted { organic_count });
    }
    if mineral_count > 0 {
        facts.push(SummaryFact::ExcludeFromOrganicAnalysis { mineral_count });
    }
    if ambiguous_count > 0 {
        facts.push(SummaryFact::MorphologyReviewNeeded { ambiguous_count });
    }

    SiteSummary {
        organic_count,
        mineral_count,
        ambiguous_count,
        mean_ca_p,
        element_means: Vec::new(),
        facts,
    }
}

/// [`summarize`] plus per-element dataset means for the report.
pub fn summarize_with_means(
    readings: &[ElementReading],
    classifications: &[Classification],
    correlations: &[CorrelationResult],
) -> SiteSummary {
    let mut summary = summarize(classifications, correlations);
    summary.element_means = element_means(readings);
    summary
}

/// Mean of each diagnostic element over readings where it was detected.
fn element_means(readings: &[ElementReading]) -> Vec<ElementMean> {
    DIAGNOSTIC_ELEMENTS
        .iter()
        .filter_map(|&element| {
            let detected: Vec<f64> = readings
                .iter()
                .filter(|r| r.detected(element))
                .map(|r| r.value_of(element))
                .collect();
            if detected.is_empty() {
                return None;
            }
            Some(ElementMean {
                element,
                mean: detected.iter().sum::<f64>() / detected.len() as f64,
                detected_n: detected.len(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConfidenceLevel, ExpectedDirection, Recommendation, ResidueLabel};

    fn classification(
        label: ResidueLabel,
        confidence: ConfidenceLevel,
        ca_p: Option<f64>,
    ) -> Classification {
        Classification {
            label,
            confidence,
            reasoning: Vec::new(),
            recommendation: Recommendation::FurtherAnalysis,
            ca_p_ratio: ca_p,
        }
    }

    fn correlation(
        x: Element,
        y: Element,
        r: f64,
        significant: bool,
        expected: ExpectedDirection,
        threshold: f64,
    ) -> CorrelationResult {
        CorrelationResult {
            element_x: x,
            element_y: y,
            pair_name: format!("{}-{}", x.symbol(), y.symbol()),
            pearson_r: r,
            r_squared: r * r,
            p_value: 0.001,
            n: 10,
            significant,
            expected,
            threshold,
        }
    }

    #[test]
    fn test_empty_inputs_empty_summary() {
        let summary = summarize(&[], &[]);
        assert_eq!(summary.organic_count, 0);
        assert_eq!(summary.mineral_count, 0);
        assert_eq!(summary.ambiguous_count, 0);
        assert_eq!(summary.mean_ca_p, None);
        assert!(summary.facts.is_empty());
    }

    #[test]
    fn test_counts_and_recommendation_facts() {
        let classifications = vec![
            classification(ResidueLabel::OrganicAdhesive, ConfidenceLevel::High, None),
            classification(ResidueLabel::MnPhosphateMimic, ConfidenceLevel::High, None),
            classification(ResidueLabel::Ambiguous, ConfidenceLevel::Low, None),
        ];
        let summary = summarize(&classifications, &[]);
        assert_eq!(summary.organic_count, 1);
        assert_eq!(summary.mineral_count, 1);
        assert_eq!(summary.ambiguous_count, 1);
        assert!(summary
            .facts
            .contains(&SummaryFact::MolecularConfirmationWarranted { organic_count: 1 }));
        assert!(summary
            .facts
            .contains(&SummaryFact::ExcludeFromOrganicAnalysis { mineral_count: 1 }));
        assert!(summary
            .facts
            .contains(&SummaryFact::MorphologyReviewNeeded { ambiguous_count: 1 }));
    }

    #[test]
    fn test_partially_mineralized_counts_twice() {
        let classifications = vec![classification(
            ResidueLabel::PartiallyMineralized,
            ConfidenceLevel::Medium,
            None,
        )];
        let summary = summarize(&classifications, &[]);
        assert_eq!(summary.organic_count, 1);
        assert_eq!(summary.mineral_count, 1);
        assert_eq!(summary.ambiguous_count, 1);
    }

    #[test]
    fn test_mean_ca_p_window_emits_apatite_fact() {
        let classifications = vec![
            classification(ResidueLabel::BiogenicApatite, ConfidenceLevel::High, Some(1.6)),
            classification(ResidueLabel::BiogenicApatite, ConfidenceLevel::High, Some(1.7)),
            classification(ResidueLabel::Ambiguous, ConfidenceLevel::Low, None),
        ];
        let summary = summarize(&classifications, &[]);
        let mean = summary.mean_ca_p.unwrap();
        assert!((mean - 1.65).abs() < 1e-9);
        assert!(summary
            .facts
            .iter()
            .any(|f| matches!(f, SummaryFact::BiogenicApatite { .. })));
    }

    #[test]
    fn test_mean_ca_p_outside_window_no_fact() {
        let classifications = vec![classification(
            ResidueLabel::Ambiguous,
            ConfidenceLevel::Low,
            Some(2.4),
        )];
        let summary = summarize(&classifications, &[]);
        assert!(!summary
            .facts
            .iter()
            .any(|f| matches!(f, SummaryFact::BiogenicApatite { .. })));
    }

    #[test]
    fn test_narrative_correlation_facts() {
        let correlations = vec![
            correlation(Element::P, Element::Ca, 0.85, true, ExpectedDirection::Positive, 0.7),
            correlation(Element::K, Element::Al, 0.72, true, ExpectedDirection::Positive, 0.6),
            correlation(Element::C, Element::P, -0.55, true, ExpectedDirection::Negative, -0.3),
        ];
        let summary = summarize(&[], &correlations);
        assert_eq!(summary.facts.len(), 3);
        assert!(matches!(summary.facts[0], SummaryFact::GuanoDrivenDiagenesis { r } if (r - 0.85).abs() < 1e-9));
        assert!(matches!(summary.facts[1], SummaryFact::AcidicPhosphateFormation { .. }));
        assert!(matches!(summary.facts[2], SummaryFact::PhosphateReplacingOrganics { .. }));
    }

    #[test]
    fn test_support_pairs_drive_no_narrative() {
        // Fe-P and C-Mn are computed and significant but carry no canned fact
        let correlations = vec![
            correlation(Element::Fe, Element::P, 0.9, true, ExpectedDirection::Positive, 0.5),
            correlation(Element::C, Element::Mn, -0.6, true, ExpectedDirection::Negative, -0.2),
        ];
        let summary = summarize(&[], &correlations);
        assert!(summary.facts.is_empty());
    }

    #[test]
    fn test_insignificant_correlations_ignored() {
        let correlations = vec![correlation(
            Element::P,
            Element::Ca,
            0.9,
            false,
            ExpectedDirection::Positive,
            0.7,
        )];
        let summary = summarize(&[], &correlations);
        assert!(summary.facts.is_empty());
    }

    #[test]
    fn test_element_means_skip_undetected() {
        let readings = vec![
            ElementReading { c: 10.0, p: 2.0, ..Default::default() },
            ElementReading { c: 20.0, ..Default::default() },
        ];
        let summary = summarize_with_means(&readings, &[], &[]);
        let c_mean = summary
            .element_means
            .iter()
            .find(|m| m.element == Element::C)
            .unwrap();
        assert!((c_mean.mean - 15.0).abs() < 1e-9);
        assert_eq!(c_mean.detected_n, 2);

        let p_mean = summary
            .element_means
            .iter()
            .find(|m| m.element == Element::P)
            .unwrap();
        assert_eq!(p_mean.detected_n, 1);
        assert!(!summary.element_means.iter().any(|m| m.element == Element::Fe));
    }
}
