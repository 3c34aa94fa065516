//! Elemental correlation types and the curated diagenesis pair table
//!
//! The six pairs below are the published diagnostic correlations for
//! phosphatic diagenesis. Each carries a signed significance threshold and an
//! expected sign: the significance test is directional, not a generic |r|
//! cut, because only the expected direction has a geochemical reading.

use serde::{Deserialize, Serialize};

use super::Element;

/// Expected sign of a diagnostic correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedDirection {
    Positive,
    Negative,
}

/// One entry in the curated diagenesis pair table.
#[derive(Debug, Clone, Copy)]
pub struct ElementPairSpec {
    pub x: Element,
    pub y: Element,
    pub expected: ExpectedDirection,
    /// Signed r threshold; comparison direction follows `expected`
    pub threshold: f64,
    pub interpretation: &'static str,
    pub citation: &'static str,
}

impl ElementPairSpec {
    /// Display name, e.g. "P-Ca".
    pub fn pair_name(&self) -> String {
        format!("{}-{}", self.x.symbol(), self.y.symbol())
    }
}

/// The fixed, literature-calibrated pair table. Order is report order.
pub const DIAGENESIS_PAIRS: [ElementPairSpec; 6] = [
    ElementPairSpec {
        x: Element::P,
        y: Element::Ca,
        expected: ExpectedDirection::Positive,
        threshold: 0.7,
        interpretation: "Coupled P-Ca enrichment: authigenic apatite formation, \
            typically guano-driven in cave sediments",
        citation: "Karkanas et al. (2000), J. Archaeol. Sci. 27(10)",
    },
    ElementPairSpec {
        x: Element::K,
        y: Element::Al,
        expected: ExpectedDirection::Positive,
        threshold: 0.6,
        interpretation: "K-Al covariation: taranakite/leucophosphite formation \
            under acidic phosphatic diagenesis",
        citation: "Karkanas & Goldberg (2019), Reconstructing Archaeological Sites",
    },
    ElementPairSpec {
        x: Element::K,
        y: Element::P,
        expected: ExpectedDirection::Positive,
        threshold: 0.6,
        interpretation: "K-P covariation: potassium phosphate phases replacing \
            primary sediment minerals",
        citation: "Karkanas & Goldberg (2019), Reconstructing Archaeological Sites",
    },
    ElementPairSpec {
        x: Element::C,
        y: Element::P,
        expected: ExpectedDirection::Negative,
        threshold: -0.3,
        interpretation: "C-P anticorrelation: phosphate phases progressively \
            replacing organic carbon",
        citation: "Weiner (2010), Microarchaeology",
    },
    ElementPairSpec {
        x: Element::C,
        y: Element::Mn,
        expected: ExpectedDirection::Negative,
        threshold: -0.2,
        interpretation: "C-Mn anticorrelation: manganese oxide coatings forming \
            where organics have degraded",
        citation: "Shahack-Gross (2011), J. Archaeol. Sci. 38(2)",
    },
    ElementPairSpec {
        x: Element::Fe,
        y: Element::P,
        expected: ExpectedDirection::Positive,
        threshold: 0.5,
        interpretation: "Fe-P covariation: iron phosphate (vivianite-group) \
            formation in reducing microenvironments",
        citation: "Goldberg & Berna (2010), Quat. Int. 214",
    },
];

/// Result of one significance-tested pairwise correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub element_x: Element,
    pub element_y: Element,
    /// Display name, e.g. "P-Ca"
    pub pair_name: String,
    /// Pearson correlation coefficient (-1 to 1)
    pub pearson_r: f64,
    /// Coefficient of determination (r squared)
    pub r_squared: f64,
    /// Two-sided p-value from Student's t with n-2 degrees of freedom
    pub p_value: f64,
    /// Co-detected rows used for the calculation (always >= 3)
    pub n: usize,
    /// Whether r crossed the pair's signed threshold in the expected direction
    pub significant: bool,
    pub expected: ExpectedDirection,
    /// The pair's signed threshold, echoed for report fidelity
    pub threshold: f64,
}

impl CorrelationResult {
    /// Is this the given (unordered) element pair?
    pub fn is_pair(&self, a: Element, b: Element) -> bool {
        (self.element_x == a && self.element_y == b)
            || (self.element_x == b && self.element_y == a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_table_is_complete_and_ordered() {
        let names: Vec<String> = DIAGENESIS_PAIRS.iter().map(|p| p.pair_name()).collect();
        assert_eq!(names, vec!["P-Ca", "K-Al", "K-P", "C-P", "C-Mn", "Fe-P"]);
    }

    #[test]
    fn test_negative_pairs_carry_negative_thresholds() {
        for pair in &DIAGENESIS_PAIRS {
            match pair.expected {
                ExpectedDirection::Positive => assert!(pair.threshold > 0.0),
                ExpectedDirection::Negative => assert!(pair.threshold < 0.0),
            }
        }
    }
}
