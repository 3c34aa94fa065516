//! Elemental reading types
//!
//! An [`ElementReading`] is one SEM-EDS point analysis reduced to mass-percent
//! values. Every recognized element is a named field rather than a map entry,
//! so an unknown symbol cannot silently pass through the pipeline.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Closed set of element symbols recognized by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    C,
    N,
    O,
    P,
    Ca,
    K,
    Al,
    Mn,
    Fe,
    Si,
    Mg,
    Na,
    S,
    Cl,
    Ti,
    Zn,
    Ba,
    Sr,
}

/// All recognized elements, in periodic-report column order.
pub const ALL_ELEMENTS: [Element; 18] = [
    Element::C,
    Element::N,
    Element::O,
    Element::P,
    Element::Ca,
    Element::K,
    Element::Al,
    Element::Mn,
    Element::Fe,
    Element::Si,
    Element::Mg,
    Element::Na,
    Element::S,
    Element::Cl,
    Element::Ti,
    Element::Zn,
    Element::Ba,
    Element::Sr,
];

/// The seven elements carrying diagnostic weight in classification and
/// site-level statistics.
pub const DIAGNOSTIC_ELEMENTS: [Element; 7] = [
    Element::C,
    Element::P,
    Element::Ca,
    Element::K,
    Element::Al,
    Element::Mn,
    Element::Fe,
];

impl Element {
    /// Canonical case-sensitive symbol as it appears in EDS export columns.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::C => "C",
            Self::N => "N",
            Self::O => "O",
            Self::P => "P",
            Self::Ca => "Ca",
            Self::K => "K",
            Self::Al => "Al",
            Self::Mn => "Mn",
            Self::Fe => "Fe",
            Self::Si => "Si",
            Self::Mg => "Mg",
            Self::Na => "Na",
            Self::S => "S",
            Self::Cl => "Cl",
            Self::Ti => "Ti",
            Self::Zn => "Zn",
            Self::Ba => "Ba",
            Self::Sr => "Sr",
        }
    }
}

impl FromStr for Element {
    type Err = ();

    /// Exact, case-sensitive symbol match ("Ca" parses, "CA" does not).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_ELEMENTS
            .iter()
            .find(|e| e.symbol() == s)
            .copied()
            .ok_or(())
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One validated EDS point analysis.
///
/// All values are non-negative mass-%. A missing or non-numeric source cell
/// is 0.0; absence of an element is data ("not detected"), never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementReading {
    /// Owning residue/sample reference (weak; classification ignores it)
    #[serde(default)]
    pub sample_id: Option<String>,
    /// Ordering key within a residue, unique per residue
    #[serde(default)]
    pub analysis_point: Option<u32>,

    #[serde(default)]
    pub c: f64,
    #[serde(default)]
    pub n: f64,
    #[serde(default)]
    pub o: f64,
    #[serde(default)]
    pub p: f64,
    #[serde(default)]
    pub ca: f64,
    #[serde(default)]
    pub k: f64,
    #[serde(default)]
    pub al: f64,
    #[serde(default)]
    pub mn: f64,
    #[serde(default)]
    pub fe: f64,
    #[serde(default)]
    pub si: f64,
    #[serde(default)]
    pub mg: f64,
    #[serde(default)]
    pub na: f64,
    #[serde(default)]
    pub s: f64,
    #[serde(default)]
    pub cl: f64,
    #[serde(default)]
    pub ti: f64,
    #[serde(default)]
    pub zn: f64,
    #[serde(default)]
    pub ba: f64,
    #[serde(default)]
    pub sr: f64,
}

impl Default for ElementReading {
    fn default() -> Self {
        Self {
            sample_id: None,
            analysis_point: None,
            c: 0.0,
            n: 0.0,
            o: 0.0,
            p: 0.0,
            ca: 0.0,
            k: 0.0,
            al: 0.0,
            mn: 0.0,
            fe: 0.0,
            si: 0.0,
            mg: 0.0,
            na: 0.0,
            s: 0.0,
            cl: 0.0,
            ti: 0.0,
            zn: 0.0,
            ba: 0.0,
            sr: 0.0,
        }
    }
}

impl ElementReading {
    /// Mass-% value for a given element.
    pub fn value_of(&self, element: Element) -> f64 {
        match element {
            Element::C => self.c,
            Element::N => self.n,
            Element::O => self.o,
            Element::P => self.p,
            Element::Ca => self.ca,
            Element::K => self.k,
            Element::Al => self.al,
            Element::Mn => self.mn,
            Element::Fe => self.fe,
            Element::Si => self.si,
            Element::Mg => self.mg,
            Element::Na => self.na,
            Element::S => self.s,
            Element::Cl => self.cl,
            Element::Ti => self.ti,
            Element::Zn => self.zn,
            Element::Ba => self.ba,
            Element::Sr => self.sr,
        }
    }

    /// Set the mass-% value for a given element (used by row ingestion).
    pub fn set_value(&mut self, element: Element, value: f64) {
        let slot = match element {
            Element::C => &mut self.c,
            Element::N => &mut self.n,
            Element::O => &mut self.o,
            Element::P => &mut self.p,
            Element::Ca => &mut self.ca,
            Element::K => &mut self.k,
            Element::Al => &mut self.al,
            Element::Mn => &mut self.mn,
            Element::Fe => &mut self.fe,
            Element::Si => &mut self.si,
            Element::Mg => &mut self.mg,
            Element::Na => &mut self.na,
            Element::S => &mut self.s,
            Element::Cl => &mut self.cl,
            Element::Ti => &mut self.ti,
            Element::Zn => &mut self.zn,
            Element::Ba => &mut self.ba,
            Element::Sr => &mut self.sr,
        };
        // Mass-% is non-negative; clamp instrument artifacts at zero.
        *slot = value.max(0.0);
    }

    /// Ca/P mass ratio, diagnostic of apatite phases.
    ///
    /// `None` when P is not detected: the ratio is undefined, and any rule
    /// depending on it is skipped rather than fed a sentinel value.
    pub fn ca_p_ratio(&self) -> Option<f64> {
        if self.p > 0.0 {
            Some(self.ca / self.p)
        } else {
            None
        }
    }

    /// Whether this element was detected at this point (value strictly > 0).
    pub fn detected(&self, element: Element) -> bool {
        self.value_of(element) > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_symbol_roundtrip() {
        for e in ALL_ELEMENTS {
            assert_eq!(e.symbol().parse::<Element>(), Ok(e));
        }
    }

    #[test]
    fn test_element_parse_is_case_sensitive() {
        assert!("CA".parse::<Element>().is_err());
        assert!("ca".parse::<Element>().is_err());
        assert_eq!("Ca".parse::<Element>(), Ok(Element::Ca));
    }

    #[test]
    fn test_ca_p_ratio_undefined_without_phosphorus() {
        let reading = ElementReading {
            ca: 10.0,
            c: 30.0,
            ..Default::default()
        };
        assert_eq!(reading.ca_p_ratio(), None);
    }

    #[test]
    fn test_ca_p_ratio_computed() {
        let reading = ElementReading {
            ca: 20.0,
            p: 12.0,
            ..Default::default()
        };
        let ratio = reading.ca_p_ratio().unwrap();
        assert!((ratio - 1.6667).abs() < 0.001);
    }

    #[test]
    fn test_set_value_clamps_negatives() {
        let mut reading = ElementReading::default();
        reading.set_value(Element::C, -4.2);
        assert_eq!(reading.c, 0.0);
    }

    #[test]
    fn test_missing_fields_deserialize_to_zero() {
        let reading: ElementReading = serde_json::from_str(r#"{"c": 12.5}"#).unwrap();
        assert_eq!(reading.c, 12.5);
        assert_eq!(reading.p, 0.0);
        assert_eq!(reading.sample_id, None);
    }
}
