//! Context-aware classification
//!
//! When the depositional context of a site is known, raw thresholds are
//! corrected for the background chemistry that context produces before
//! reclassifying. Contexts without a dedicated correction branch
//! (rockshelter, carbonate cave, unknown) delegate to the full base rule
//! chain, the same verdict the context-free path produces.

use crate::types::thresholds::context_thresholds as t;
use crate::types::{
    ContextClassification, ContextType, ContextVerdict, ConfidenceLevel, ElementReading,
};

use super::rules;

/// Classify one analysis point under a known depositional context.
///
/// Unknown or unsupported contexts fall back to the base rule chain,
/// never an error.
pub fn classify_with_context(
    reading: &ElementReading,
    context: ContextType,
) -> ContextClassification {
    match context {
        ContextType::CaveGuano => classify_guano_cave(reading),
        ContextType::OpenAirSand | ContextType::OpenAirClay => {
            classify_open_air(reading, context)
        }
        ContextType::PeatBog => classify_peat_bog(reading),
        ContextType::Rockshelter | ContextType::CaveCarbonate | ContextType::Unknown => {
            classify_fallback(reading, context)
        }
    }
}

/// Guano-rich cave: subtract the guano P baseline and its estimated organic
/// carbon contribution, then reclassify against corrected values.
fn classify_guano_cave(reading: &ElementReading) -> ContextClassification {
    let c = reading.c;
    let p = reading.p;
    let mn = reading.mn;

    let corrected_p = (p - t::GUANO_P_BASELINE).max(0.0);

    let mut reasoning = vec![format!(
        "Guano P baseline {:.1}% subtracted: corrected P {:.1}%",
        t::GUANO_P_BASELINE,
        corrected_p
    )];

    // Estimate the guano organic contribution only where both C and P are
    // elevated enough for guano to plausibly account for part of the carbon.
    let (corrected_c, correction_note) = if c > 10.0 && p > 5.0 {
        let guano_c = (p / t::GUANO_P_BASELINE) * t::GUANO_C_BASELINE;
        let corrected = (c - guano_c).max(0.0);
        reasoning.push(format!(
            "Estimated guano organic contribution {:.1}% subtracted from C",
            guano_c
        ));
        (
            corrected,
            Some(format!("C corrected for guano ({guano_c:.1}%)")),
        )
    } else {
        (c, None)
    };

    // Bat-guano marker, independent of the classification branch.
    let guano_indicator = if mn > t::GUANO_MN_INDICATOR {
        Some(format!("Bat guano signature (Mn {mn:.2}%)"))
    } else {
        None
    };

    let ca_p = reading.ca_p_ratio();

    let (verdict, confidence) = if corrected_c > t::GUANO_ORGANIC_C_MIN {
        reasoning.push(format!(
            "Corrected C {:.1}% above the {:.0}% organic threshold",
            corrected_c,
            t::GUANO_ORGANIC_C_MIN
        ));
        let confidence = if corrected_p < t::GUANO_ORGANIC_CLEAN_P_MAX {
            ConfidenceLevel::High
        } else {
            ConfidenceLevel::Medium
        };
        (ContextVerdict::Organic, confidence)
    } else if corrected_p > t::GUANO_APATITE_P_MIN
        && ca_p.is_some_and(|r| r < t::GUANO_APATITE_CA_P_MAX)
    {
        reasoning.push(format!(
            "Corrected P {corrected_p:.1}% with low Ca/P; guano apatite formation complicates the call"
        ));
        (ContextVerdict::Apatite, ConfidenceLevel::Medium)
    } else if corrected_c < t::GUANO_MIMIC_C_MAX && corrected_p < t::GUANO_MIMIC_P_MAX {
        reasoning.push(format!(
            "Corrected C {corrected_c:.1}% and P {corrected_p:.1}% both below mimic ceilings"
        ));
        (ContextVerdict::Mimic, ConfidenceLevel::High)
    } else {
        reasoning.push("Corrected values fit no single guano-cave signature".to_string());
        (ContextVerdict::MixedUncertain, ConfidenceLevel::Low)
    };

    ContextClassification {
        context: ContextType::CaveGuano,
        verdict,
        confidence,
        corrected_carbon: corrected_c,
        corrected_phosphorus: corrected_p,
        correction_note,
        guano_indicator,
        contamination_note: None,
        ca_p_ignored: false,
        ca_p_ratio: ca_p,
        reasoning,
        base: None,
    }
}

/// Open-air (sand or clay): organics should not survive leaching-prone
/// exposure, so their presence is itself the finding.
fn classify_open_air(reading: &ElementReading, context: ContextType) -> ContextClassification {
    let c = reading.c;
    let p = reading.p;
    let si = reading.si;
    let expected_p_max = context.profile().expected_p.1;

    let contamination_note = if si > t::OPEN_AIR_SI_CONTAMINATION {
        Some(format!(
            "High Si ({si:.1}%) - sediment contamination likely"
        ))
    } else {
        None
    };

    let mut reasoning = Vec::new();

    let (verdict, confidence) = if c > t::OPEN_AIR_ORGANIC_C_MIN {
        reasoning.push(format!(
            "C {:.1}% survives a leaching-prone open-air context; preservation is exceptional",
            c
        ));
        (ContextVerdict::OrganicExceptional, ConfidenceLevel::High)
    } else if p > expected_p_max {
        reasoning.push(format!(
            "P {p:.1}% above the {expected_p_max:.1}% expected for this context; \
             possible protected microenvironment"
        ));
        (ContextVerdict::ApatiteUnexpected, ConfidenceLevel::Low)
    } else if c < t::OPEN_AIR_MIMIC_C_MAX && p < t::OPEN_AIR_MIMIC_P_MAX {
        reasoning.push(format!(
            "C {c:.1}% and P {p:.1}% consistent with open-air degradation"
        ));
        (ContextVerdict::MimicExpected, ConfidenceLevel::High)
    } else {
        reasoning.push("Intermediate signature; degraded or mixed material".to_string());
        (ContextVerdict::MixedDegraded, ConfidenceLevel::Medium)
    };

    ContextClassification {
        context,
        verdict,
        confidence,
        corrected_carbon: c,
        corrected_phosphorus: p,
        correction_note: None,
        guano_indicator: None,
        contamination_note,
        ca_p_ignored: false,
        ca_p_ratio: reading.ca_p_ratio(),
        reasoning,
        base: None,
    }
}

/// Peat bog: acidic chemistry dissolves mineral phases, so only organic
/// indicators are read. Ca/P is not computed at all; reporting it for a bog
/// sample would be actively misleading.
fn classify_peat_bog(reading: &ElementReading) -> ContextClassification {
    let c = reading.c;
    let p = reading.p;

    let mut reasoning = vec!["Ca/P ignored: meaningless under acidic bog chemistry".to_string()];

    let (verdict, confidence) = if c > t::BOG_ORGANIC_C_MIN {
        reasoning.push(format!(
            "C {:.1}% above the {:.0}% well-preserved threshold",
            c,
            t::BOG_ORGANIC_C_MIN
        ));
        (ContextVerdict::OrganicWellPreserved, ConfidenceLevel::High)
    } else if c > t::BOG_MODERATE_C_MIN {
        reasoning.push(format!(
            "C {:.1}% above the {:.0}% moderate-preservation threshold",
            c,
            t::BOG_MODERATE_C_MIN
        ));
        (ContextVerdict::OrganicModerate, ConfidenceLevel::Medium)
    } else if p > t::BOG_ANOMALOUS_P_MIN {
        reasoning.push(format!(
            "P {p:.1}% persisting in an acidic bog is unexpected; recent contamination?"
        ));
        (ContextVerdict::Anomalous, ConfidenceLevel::Low)
    } else {
        reasoning.push("No organic signal and no anomalous mineral signal".to_string());
        (ContextVerdict::Uncertain, ConfidenceLevel::Low)
    };

    ContextClassification {
        context: ContextType::PeatBog,
        verdict,
        confidence,
        corrected_carbon: c,
        corrected_phosphorus: p,
        correction_note: None,
        guano_indicator: None,
        contamination_note: None,
        ca_p_ignored: true,
        ca_p_ratio: None,
        reasoning,
        base: None,
    }
}

/// Contexts without a correction branch delegate to the full base rule
/// chain, so the verdict matches the context-free path exactly.
fn classify_fallback(reading: &ElementReading, context: ContextType) -> ContextClassification {
    let base = rules::classify(reading);

    ContextClassification {
        context,
        verdict: ContextVerdict::Standard(base.label),
        confidence: base.confidence,
        corrected_carbon: reading.c,
        corrected_phosphorus: reading.p,
        correction_note: None,
        guano_indicator: None,
        contamination_note: None,
        ca_p_ignored: false,
        ca_p_ratio: base.ca_p_ratio,
        reasoning: base.reasoning.clone(),
        base: Some(base),
    }
}
