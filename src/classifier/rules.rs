//! Base diagnostic rule chain
//!
//! Maps one [`ElementReading`] to one [`Classification`] through an ordered
//! sequence of predicates; first match wins. The order is load-bearing: a
//! Mn-phosphate signature must preempt the organic rules even when carbon is
//! high, so the rules cannot be checked independently.
//!
//! Pure and total: every reading, including all-zero, resolves to a label.

use rayon::prelude::*;

use crate::types::thresholds::residue_thresholds as t;
use crate::types::{
    Classification, ConfidenceLevel, ElementReading, Recommendation, ResidueLabel,
};

/// Classify a single analysis point with the context-free rule chain.
pub fn classify(reading: &ElementReading) -> Classification {
    let c = reading.c;
    let mn = reading.mn;
    let p = reading.p;
    let ca = reading.ca;
    let k = reading.k;
    let al = reading.al;
    let fe = reading.fe;
    let ca_p = reading.ca_p_ratio();

    // Rule 1: Mn-phosphate mineral mimic. Checked first: high Mn overrides
    // every organic signature.
    if mn > t::MIMIC_MN_MIN {
        return verdict(
            ResidueLabel::MnPhosphateMimic,
            ConfidenceLevel::High,
            vec![
                format!(
                    "Mn {:.2}% exceeds the {:.0}% mineral-mimic threshold",
                    mn,
                    t::MIMIC_MN_MIN
                ),
                "Mn-phosphate coatings reproduce the texture of organic residue".to_string(),
            ],
            Recommendation::ExcludeFromOrganic,
            ca_p,
        );
    }

    // Rule 2: biogenic apatite. Requires the Ca/P ratio, which is undefined
    // (not zero) when P is absent; the rule is simply skipped then.
    if p > t::APATITE_P_MIN {
        if let Some(ratio) = ca_p {
            if (t::APATITE_CA_P_MIN..=t::APATITE_CA_P_MAX).contains(&ratio)
                && c < t::APATITE_C_MAX
            {
                return verdict(
                    ResidueLabel::BiogenicApatite,
                    ConfidenceLevel::High,
                    vec![
                        format!("P {:.1}% above the {:.0}% apatite minimum", p, t::APATITE_P_MIN),
                        format!(
                            "Ca/P {:.2} within the biogenic hydroxyapatite window {:.1}-{:.1}",
                            ratio,
                            t::APATITE_CA_P_MIN,
                            t::APATITE_CA_P_MAX
                        ),
                        format!("C {:.1}% below the {:.0}% organic interference ceiling", c, t::APATITE_C_MAX),
                    ],
                    Recommendation::ExcludeFromOrganic,
                    ca_p,
                );
            }
        }
    }

    // Rule 3: K-Al phosphate from acidic diagenesis (taranakite group).
    if k > t::KAL_K_MIN && al > t::KAL_AL_MIN && p > t::KAL_P_MIN {
        return verdict(
            ResidueLabel::KAlPhosphate,
            ConfidenceLevel::High,
            vec![
                format!(
                    "K {:.1}% and Al {:.1}% both above {:.0}% with P {:.1}% above {:.0}%",
                    k,
                    al,
                    t::KAL_K_MIN,
                    p,
                    t::KAL_P_MIN
                ),
                "K-Al phosphate assemblage indicates acidic phosphatic diagenesis".to_string(),
            ],
            Recommendation::ExcludeFromOrganic,
            ca_p,
        );
    }

    // Rule 4: organic adhesive: high C with clean Mn and P.
    if c > t::ORGANIC_C_MIN && mn < t::ORGANIC_MN_MAX && p < t::ORGANIC_P_MAX {
        return verdict(
            ResidueLabel::OrganicAdhesive,
            ConfidenceLevel::High,
            vec![
                format!("C {:.1}% exceeds the {:.0}% adhesive threshold", c, t::ORGANIC_C_MIN),
                format!(
                    "Mn {:.2}% and P {:.1}% below mineral-interference ceilings ({:.0}%, {:.0}%)",
                    mn,
                    p,
                    t::ORGANIC_MN_MAX,
                    t::ORGANIC_P_MAX
                ),
            ],
            Recommendation::MolecularConfirmation,
            ca_p,
        );
    }

    // Rule 5: ochre-loaded compound adhesive: organic carbon plus an iron
    // oxide pigment load.
    if c > t::OCHRE_C_MIN && fe > t::OCHRE_FE_MIN && mn < t::OCHRE_MN_MAX && p < t::OCHRE_P_MAX {
        return verdict(
            ResidueLabel::OchreCompoundAdhesive,
            ConfidenceLevel::High,
            vec![
                format!("C {:.1}% above the {:.0}% compound-adhesive threshold", c, t::OCHRE_C_MIN),
                format!("Fe {:.1}% above the {:.0}% ochre-load threshold", fe, t::OCHRE_FE_MIN),
            ],
            Recommendation::MolecularConfirmation,
            ca_p,
        );
    }

    // Rule 6: partially mineralized organic; all three windows inclusive.
    if (t::PARTIAL_C_MIN..=t::PARTIAL_C_MAX).contains(&c)
        && (t::PARTIAL_MN_MIN..=t::PARTIAL_MN_MAX).contains(&mn)
        && (t::PARTIAL_P_MIN..=t::PARTIAL_P_MAX).contains(&p)
    {
        return verdict(
            ResidueLabel::PartiallyMineralized,
            ConfidenceLevel::Medium,
            vec![
                format!(
                    "C {:.1}%, Mn {:.2}%, P {:.1}% all within the partial-mineralization windows",
                    c, mn, p
                ),
                "Signature consistent with organic material under phosphatic replacement"
                    .to_string(),
            ],
            Recommendation::MorphologyReview,
            ca_p,
        );
    }

    // Rule 7: possible organic: carbon-led but short of the adhesive call.
    if c > t::POSSIBLE_C_MIN && mn < t::POSSIBLE_MN_MAX && p < t::POSSIBLE_P_MAX {
        return verdict(
            ResidueLabel::PossibleOrganic,
            ConfidenceLevel::Medium,
            vec![
                format!("C {:.1}% above the {:.0}% organic indicator", c, t::POSSIBLE_C_MIN),
                "Below the adhesive threshold; organic origin plausible but unconfirmed"
                    .to_string(),
            ],
            Recommendation::MolecularConfirmation,
            ca_p,
        );
    }

    // Rule 8: no diagnostic signature matched.
    verdict(
        ResidueLabel::Ambiguous,
        ConfidenceLevel::Low,
        vec![format!(
            "No diagnostic signature: C {:.1}%, Mn {:.2}%, P {:.1}%, Ca {:.1}%",
            c, mn, p, ca
        )],
        Recommendation::FurtherAnalysis,
        ca_p,
    )
}

/// Classify a whole dataset, fanning out across readings.
///
/// Rows are independent by construction, so the fan-out has no ordering or
/// synchronization requirements; results come back in input order.
pub fn classify_batch(readings: &[ElementReading]) -> Vec<Classification> {
    readings.par_iter().map(classify).collect()
}

fn verdict(
    label: ResidueLabel,
    confidence: ConfidenceLevel,
    reasoning: Vec<String>,
    recommendation: Recommendation,
    ca_p_ratio: Option<f64>,
) -> Classification {
    Classification {
        label,
        confidence,
        reasoning,
        recommendation,
        ca_p_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(c: f64, mn: f64, p: f64, ca: f64) -> ElementReading {
        ElementReading {
            c,
            mn,
            p,
            ca,
            ..Default::default()
        }
    }

    #[test]
    fn test_mn_mimic_fires_first() {
        // High C would satisfy the organic rule if Mn did not preempt it
        let r = reading(30.0, 6.0, 1.0, 2.0);
        let result = classify(&r);
        assert_eq!(result.label, ResidueLabel::MnPhosphateMimic);
        assert_eq!(result.confidence, ConfidenceLevel::High);
    }

    #[test]
    fn test_mn_mimic_ignores_everything_else() {
        let r = reading(5.0, 8.0, 2.0, 1.0);
        assert_eq!(classify(&r).label, ResidueLabel::MnPhosphateMimic);
    }

    #[test]
    fn test_biogenic_apatite() {
        // Ca/P = 20/12 = 1.667, inside the hydroxyapatite window
        let r = reading(5.0, 0.1, 12.0, 20.0);
        let result = classify(&r);
        assert_eq!(result.label, ResidueLabel::BiogenicApatite);
        assert_eq!(result.confidence, ConfidenceLevel::High);
        let ratio = result.ca_p_ratio.unwrap();
        assert!((ratio - 1.6667).abs() < 0.001);
    }

    #[test]
    fn test_apatite_rejected_outside_ca_p_window() {
        // Ca/P = 30/12 = 2.5, above the window
        let r = reading(5.0, 0.1, 12.0, 30.0);
        assert_ne!(classify(&r).label, ResidueLabel::BiogenicApatite);
    }

    #[test]
    fn test_apatite_rejected_when_carbon_high() {
        // Ratio is right but C >= 10 blocks the call
        let r = reading(12.0, 0.1, 12.0, 20.0);
        assert_ne!(classify(&r).label, ResidueLabel::BiogenicApatite);
    }

    #[test]
    fn test_kal_phosphate() {
        let r = ElementReading {
            k: 3.0,
            al: 4.0,
            p: 6.0,
            c: 5.0,
            ..Default::default()
        };
        assert_eq!(classify(&r).label, ResidueLabel::KAlPhosphate);
    }

    #[test]
    fn test_organic_adhesive_scenario() {
        let r = ElementReading {
            c: 30.0,
            mn: 0.2,
            p: 1.5,
            ca: 2.0,
            ..Default::default()
        };
        let result = classify(&r);
        assert_eq!(result.label, ResidueLabel::OrganicAdhesive);
        assert_eq!(result.confidence, ConfidenceLevel::High);
        assert_eq!(result.recommendation, Recommendation::MolecularConfirmation);
        let ratio = result.ca_p_ratio.unwrap();
        assert!((ratio - 1.3333).abs() < 0.001);
    }

    #[test]
    fn test_ochre_compound_adhesive() {
        let r = ElementReading {
            c: 22.0,
            fe: 8.0,
            mn: 0.3,
            p: 2.0,
            ..Default::default()
        };
        assert_eq!(classify(&r).label, ResidueLabel::OchreCompoundAdhesive);
    }

    #[test]
    fn test_partially_mineralized_windows_are_inclusive() {
        let r = reading(15.0, 1.0, 3.0, 0.0);
        let result = classify(&r);
        assert_eq!(result.label, ResidueLabel::PartiallyMineralized);
        assert_eq!(result.confidence, ConfidenceLevel::Medium);

        let r = reading(25.0, 5.0, 8.0, 0.0);
        assert_eq!(classify(&r).label, ResidueLabel::PartiallyMineralized);
    }

    #[test]
    fn test_possible_organic() {
        let r = reading(18.0, 0.5, 4.0, 0.0);
        let result = classify(&r);
        assert_eq!(result.label, ResidueLabel::PossibleOrganic);
        assert_eq!(result.confidence, ConfidenceLevel::Medium);
    }

    #[test]
    fn test_all_zero_resolves_to_ambiguous() {
        let result = classify(&ElementReading::default());
        assert_eq!(result.label, ResidueLabel::Ambiguous);
        assert_eq!(result.confidence, ConfidenceLevel::Low);
        assert_eq!(result.ca_p_ratio, None);
        assert_eq!(result.recommendation, Recommendation::FurtherAnalysis);
    }

    #[test]
    fn test_zero_phosphorus_never_panics() {
        let r = reading(30.0, 0.0, 0.0, 10.0);
        let result = classify(&r);
        assert_eq!(result.ca_p_ratio, None);
        assert_eq!(result.label, ResidueLabel::OrganicAdhesive);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let r = reading(17.0, 2.0, 5.0, 3.0);
        assert_eq!(classify(&r), classify(&r));
    }

    #[test]
    fn test_batch_preserves_input_order() {
        let readings: Vec<ElementReading> = (0..50)
            .map(|i| reading(f64::from(i), 0.0, 0.0, 0.0))
            .collect();
        let results = classify_batch(&readings);
        assert_eq!(results.len(), 50);
        for (r, result) in readings.iter().zip(&results) {
            assert_eq!(result, &classify(r));
        }
    }
}
