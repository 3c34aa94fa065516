//! Classification output types
//!
//! A [`Classification`] is the immutable verdict for one analysis point:
//! label, confidence, the reasoning chain that produced it, and the
//! follow-up recommendation. It is a pure function of the reading and is
//! always safe to recompute.

use serde::{Deserialize, Serialize};

/// Closed set of taphonomic labels produced by the base rule chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResidueLabel {
    /// Mn-phosphate mineral phase masquerading as residue
    MnPhosphateMimic,
    /// Biogenic (hydroxy)apatite: bone, dentine, or derived phases
    BiogenicApatite,
    /// K-Al phosphate formed under acidic diagenesis (taranakite group)
    KAlPhosphate,
    /// Organic adhesive residue (tar, resin, gum)
    OrganicAdhesive,
    /// Organic adhesive loaded with ochre (iron oxide)
    OchreCompoundAdhesive,
    /// Organic material partway through phosphatic mineral replacement
    PartiallyMineralized,
    /// Organic-leaning signature without a firm adhesive call
    PossibleOrganic,
    /// No diagnostic signature matched
    Ambiguous,
}

impl ResidueLabel {
    /// Human-readable label as reported to analysts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MnPhosphateMimic => "Mn-Phosphate Mineral Mimic",
            Self::BiogenicApatite => "Apatite (Biogenic)",
            Self::KAlPhosphate => "K-Al Phosphate (Acidic Diagenesis)",
            Self::OrganicAdhesive => "Organic Adhesive",
            Self::OchreCompoundAdhesive => "Ochre-Loaded Compound Adhesive",
            Self::PartiallyMineralized => "Partially Mineralized Organic",
            Self::PossibleOrganic => "Possible Organic Material",
            Self::Ambiguous => "Ambiguous",
        }
    }

    /// Whether this label counts toward the organic population in site
    /// summaries (label text contains "Organic").
    pub fn counts_as_organic(&self) -> bool {
        matches!(
            self,
            Self::OrganicAdhesive | Self::PartiallyMineralized | Self::PossibleOrganic
        )
    }

    /// Whether this label counts toward the mineral population in site
    /// summaries (label text contains "Mineral" or "Phosphate").
    pub fn counts_as_mineral(&self) -> bool {
        matches!(
            self,
            Self::MnPhosphateMimic | Self::KAlPhosphate | Self::PartiallyMineralized
        )
    }
}

impl std::fmt::Display for ResidueLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Confidence attached to a classification verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Medium and Low verdicts need review before downstream use.
    pub fn needs_review(&self) -> bool {
        matches!(self, Self::Medium | Self::Low)
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Follow-up action category attached to every classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Proceed to molecular confirmation (GC-MS, FTIR)
    MolecularConfirmation,
    /// Exclude from organic residue analysis
    ExcludeFromOrganic,
    /// Caution: needs high-magnification morphology review
    MorphologyReview,
    /// Undetermined: additional analyses needed
    FurtherAnalysis,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MolecularConfirmation => {
                "Proceed to molecular confirmation (GC-MS or FTIR)"
            }
            Self::ExcludeFromOrganic => "Exclude from organic residue analysis",
            Self::MorphologyReview => {
                "Caution: verify with high-magnification morphology before accepting"
            }
            Self::FurtherAnalysis => "Undetermined: additional analyses needed",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable classification verdict for one analysis point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: ResidueLabel,
    pub confidence: ConfidenceLevel,
    /// Ordered diagnostic reasoning, citing each threshold crossed with the
    /// observed value. Presentation text; label/confidence carry the contract.
    pub reasoning: Vec<String>,
    pub recommendation: Recommendation,
    /// Ca/P mass ratio, None when P was not detected
    pub ca_p_ratio: Option<f64>,
}
