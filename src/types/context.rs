//! Depositional context types and the context reference table
//!
//! Identical elemental signatures mean different things in different burial
//! environments: elevated P inside a guano cave is background, not residue.
//! Each supported context carries a literal profile: expected signatures,
//! correction constants, method name, and the key publications behind the
//! criteria. The citations are part of the reporting contract.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{Classification, ConfidenceLevel};

/// Closed set of supported depositional contexts.
///
/// Any unrecognized context string maps to `Unknown`, which falls back to the
/// context-free rule chain, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextType {
    CaveGuano,
    CaveCarbonate,
    OpenAirSand,
    OpenAirClay,
    Rockshelter,
    PeatBog,
    Unknown,
}

impl ContextType {
    /// Wire/storage key for this context.
    pub fn key(&self) -> &'static str {
        match self {
            Self::CaveGuano => "cave_guano",
            Self::CaveCarbonate => "cave_carbonate",
            Self::OpenAirSand => "open_air_sand",
            Self::OpenAirClay => "open_air_clay",
            Self::Rockshelter => "rockshelter",
            Self::PeatBog => "peat_bog",
            Self::Unknown => "unknown",
        }
    }

    /// Reference-table entry for this context.
    pub fn profile(&self) -> &'static ContextProfile {
        match self {
            Self::CaveGuano => &CAVE_GUANO,
            Self::CaveCarbonate => &CAVE_CARBONATE,
            Self::OpenAirSand => &OPEN_AIR_SAND,
            Self::OpenAirClay => &OPEN_AIR_CLAY,
            Self::Rockshelter => &ROCKSHELTER,
            Self::PeatBog => &PEAT_BOG,
            Self::Unknown => &UNKNOWN_CONTEXT,
        }
    }

    /// Resolve a stored context key. Unrecognized strings become `Unknown`:
    /// a missing or garbled context is a fallback, never an error.
    pub fn from_key(s: &str) -> Self {
        match s {
            "cave_guano" => Self::CaveGuano,
            "cave_carbonate" => Self::CaveCarbonate,
            "open_air_sand" => Self::OpenAirSand,
            "open_air_clay" => Self::OpenAirClay,
            "rockshelter" => Self::Rockshelter,
            "peat_bog" => Self::PeatBog,
            _ => Self::Unknown,
        }
    }
}

impl FromStr for ContextType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_key(s))
    }
}

impl std::fmt::Display for ContextType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Literal reference-table entry for one depositional context.
///
/// `expected_p` is the (min, max) mass-% phosphorus window the environment
/// itself produces; readings outside it are notable.
#[derive(Debug, Clone, Serialize)]
pub struct ContextProfile {
    pub name: &'static str,
    pub method: &'static str,
    pub key_papers: &'static [&'static str],
    pub interpretation: &'static str,
    pub expected_p: (f64, f64),
}

static CAVE_GUANO: ContextProfile = ContextProfile {
    name: "Cave (Guano-Rich)",
    method: "Karkanas (2000) guano-cave criteria with corrections",
    key_papers: &[
        "Karkanas, P., Bar-Yosef, O., Goldberg, P., & Weiner, S. (2000). Diagenesis in prehistoric caves. Journal of Archaeological Science, 27(10), 915-929.",
        "Weiner, S. (2010). Microarchaeology: Beyond the Visible Archaeological Record. Cambridge University Press.",
        "Goldberg, P., Miller, C. E., & Mentzer, S. M. (2017). Recognizing fire in the Paleolithic archaeological record. Current Anthropology, 58(S16), S175-S190.",
    ],
    interpretation: "Elevated P from bat/bird guano is expected, not contamination. \
        C enrichment from guano organics requires correction, and Mn above 0.5% is \
        diagnostic of bat guano. Authentication must distinguish residue organics \
        from guano organics.",
    expected_p: (3.0, 20.0),
};

static CAVE_CARBONATE: ContextProfile = ContextProfile {
    name: "Cave (Carbonate-Rich)",
    method: "Standard Karkanas & Weiner (2010) with carbonate consideration",
    key_papers: &[
        "Karkanas, P., & Goldberg, P. (2019). Reconstructing Archaeological Sites: Understanding the Geoarchaeological Matrix. Wiley-Blackwell.",
        "Shahack-Gross, R. (2011). Herbivorous livestock dung: formation, taphonomy, methods for identification, and archaeological significance. Journal of Archaeological Science, 38(2), 205-218.",
    ],
    interpretation: "Alkaline pH promotes carbonate formation and moderate organic \
        preservation; Ca enrichment from speleothem growth is background.",
    expected_p: (0.5, 3.0),
};

static OPEN_AIR_SAND: ContextProfile = ContextProfile {
    name: "Open-Air (Sand/Sandstone)",
    method: "Goldberg & Berna (2010) open-air criteria with leaching correction",
    key_papers: &[
        "Goldberg, P., & Berna, F. (2010). Micromorphology and context. Quaternary International, 214(1-2), 56-62.",
        "Miller, C. E., Goldberg, P., & Berna, F. (2013). Geoarchaeological investigations at Diepkloof Rock Shelter. Journal of Archaeological Science, 40(9), 3432-3452.",
    ],
    interpretation: "Poor preservation: P depletion from leaching, rapid oxidation \
        of organics, Si enrichment from the sand matrix. Any surviving organic \
        residue is a significant finding.",
    expected_p: (0.1, 2.0),
};

static OPEN_AIR_CLAY: ContextProfile = ContextProfile {
    name: "Open-Air (Clay/Silt)",
    method: "Modified Karkanas & Weiner for clay contexts",
    key_papers: &[
        "Goldberg, P., & Berna, F. (2010). Micromorphology and context. Quaternary International, 214(1-2), 56-62.",
        "Macphail, R. I., & Goldberg, P. (2018). Applied Soils and Micromorphology in Archaeology. Cambridge University Press.",
    ],
    interpretation: "Clay minerals can sequester and protect organics; Al and Fe \
        enrichment comes from the clay itself, and P retention is better than sand.",
    expected_p: (0.2, 3.0),
};

static ROCKSHELTER: ContextProfile = ContextProfile {
    name: "Rockshelter",
    method: "Standard Karkanas & Weiner (2010) criteria",
    key_papers: &[
        "Karkanas, P., Shahack-Gross, R., Ayalon, A., et al. (2007). Evidence for habitual use of fire at the end of the Lower Paleolithic. Journal of Human Evolution, 53(2), 197-212.",
        "Goldberg, P., Miller, C. E., Schiegl, S., et al. (2009). Bedding, hearths, and site maintenance in the Middle Stone Age of Sibudu Cave. Archaeological and Anthropological Sciences, 1(2), 95-122.",
    ],
    interpretation: "Good intermediate preservation: protection from direct \
        weathering, variable pH from bedrock, hearth ash can shift local chemistry.",
    expected_p: (0.5, 5.0),
};

static PEAT_BOG: ContextProfile = ContextProfile {
    name: "Peat Bog",
    method: "Bog-specific organic-only analysis (mineral criteria ignored)",
    key_papers: &[
        "van Geel, B. (2001). Non-pollen palynomorphs. In Tracking Environmental Change Using Lake Sediments (pp. 99-119). Springer.",
        "Harrault, L., Milek, K., Jarde, E., et al. (2019). Faecal biomarkers can distinguish specific mammalian species in modern and past environments. PLoS ONE, 14(2), e0211119.",
    ],
    interpretation: "Acidic, waterlogged, anaerobic: exceptional organic \
        preservation, mineral phases dissolved. Ca/P ratios are meaningless and \
        must not be reported.",
    expected_p: (0.0, 0.5),
};

static UNKNOWN_CONTEXT: ContextProfile = ContextProfile {
    name: "Unknown / Unspecified",
    method: "Standard context-free diagnostic rule chain",
    key_papers: &[
        "Weiner, S. (2010). Microarchaeology: Beyond the Visible Archaeological Record. Cambridge University Press.",
    ],
    interpretation: "No depositional information available; readings are \
        classified with the context-free criteria.",
    expected_p: (0.0, f64::MAX),
};

/// Context-branch verdicts.
///
/// The guano, open-air, and bog branches produce their own coarse labels
/// (the corrections change what the raw numbers mean); contexts without a
/// dedicated branch delegate to the full base rule chain and wrap its label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ContextVerdict {
    // Guano cave branch
    Organic,
    Apatite,
    Mimic,
    MixedUncertain,
    // Open-air branch
    OrganicExceptional,
    ApatiteUnexpected,
    MimicExpected,
    MixedDegraded,
    // Peat bog branch
    OrganicWellPreserved,
    OrganicModerate,
    Anomalous,
    Uncertain,
    // Fallback: full base rule chain
    Standard(super::ResidueLabel),
}

impl ContextVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organic => "Organic",
            Self::Apatite => "Apatite",
            Self::Mimic => "Mimic",
            Self::MixedUncertain => "Mixed/Uncertain",
            Self::OrganicExceptional => "Organic (Exceptional Preservation)",
            Self::ApatiteUnexpected => "Apatite (Unexpected)",
            Self::MimicExpected => "Mimic (Expected)",
            Self::MixedDegraded => "Mixed/Degraded",
            Self::OrganicWellPreserved => "Organic (Well-Preserved)",
            Self::OrganicModerate => "Organic (Moderate)",
            Self::Anomalous => "Anomalous (Mineral in Acidic Bog)",
            Self::Uncertain => "Uncertain",
            Self::Standard(label) => label.as_str(),
        }
    }
}

impl std::fmt::Display for ContextVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Context-adjusted classification for one analysis point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextClassification {
    pub context: ContextType,
    pub verdict: ContextVerdict,
    pub confidence: ConfidenceLevel,
    /// Carbon after subtracting the context's estimated background (mass-%)
    pub corrected_carbon: f64,
    /// Phosphorus after subtracting the context's baseline (mass-%)
    pub corrected_phosphorus: f64,
    /// Set when a carbon correction was actually applied
    pub correction_note: Option<String>,
    /// Bat-guano marker annotation (guano caves, Mn-driven)
    pub guano_indicator: Option<String>,
    /// Sediment contamination annotation (open-air, Si-driven)
    pub contamination_note: Option<String>,
    /// True in acidic-bog contexts where Ca/P must not be reported
    pub ca_p_ignored: bool,
    /// Ca/P mass ratio; always None when `ca_p_ignored`
    pub ca_p_ratio: Option<f64>,
    pub reasoning: Vec<String>,
    /// Verdict from the full base rule chain, present on fallback contexts
    pub base: Option<Classification>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_strings_fall_back() {
        let ctx: ContextType = "unknown_xyz".parse().unwrap();
        assert_eq!(ctx, ContextType::Unknown);
        let ctx: ContextType = "".parse().unwrap();
        assert_eq!(ctx, ContextType::Unknown);
    }

    #[test]
    fn test_known_keys_roundtrip() {
        for ctx in [
            ContextType::CaveGuano,
            ContextType::CaveCarbonate,
            ContextType::OpenAirSand,
            ContextType::OpenAirClay,
            ContextType::Rockshelter,
            ContextType::PeatBog,
        ] {
            assert_eq!(ctx.key().parse::<ContextType>().unwrap(), ctx);
        }
    }

    #[test]
    fn test_every_context_has_citations() {
        for ctx in [
            ContextType::CaveGuano,
            ContextType::CaveCarbonate,
            ContextType::OpenAirSand,
            ContextType::OpenAirClay,
            ContextType::Rockshelter,
            ContextType::PeatBog,
            ContextType::Unknown,
        ] {
            let profile = ctx.profile();
            assert!(!profile.key_papers.is_empty());
            assert!(!profile.method.is_empty());
        }
    }
}
