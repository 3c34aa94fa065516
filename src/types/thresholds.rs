//! Diagnostic thresholds for residue classification
//!
//! All values are mass-% unless noted. These encode published
//! geoarchaeological criteria (Karkanas & Weiner-derived), calibrated against
//! reference material; they are part of the domain model, not tunables.

/// Thresholds for the base classification rule chain.
pub mod residue_thresholds {
    // === Rule 1: Mn-phosphate mineral mimic ===
    /// Mn above this indicates a manganese-phosphate mineral phase
    pub const MIMIC_MN_MIN: f64 = 5.0;

    // === Rule 2: Biogenic apatite ===
    /// Minimum P for an apatite identification
    pub const APATITE_P_MIN: f64 = 10.0;
    /// Hydroxyapatite/dahllite Ca/P mass-ratio window (inclusive)
    pub const APATITE_CA_P_MIN: f64 = 1.5;
    pub const APATITE_CA_P_MAX: f64 = 1.8;
    /// C above this is too organic-rich for a clean apatite call
    pub const APATITE_C_MAX: f64 = 10.0;

    // === Rule 3: K-Al phosphate (acidic diagenesis) ===
    /// Minimum K for taranakite-group identification
    pub const KAL_K_MIN: f64 = 2.0;
    /// Minimum Al for taranakite-group identification
    pub const KAL_AL_MIN: f64 = 2.0;
    /// Minimum P for taranakite-group identification
    pub const KAL_P_MIN: f64 = 5.0;

    // === Rule 4: Organic adhesive ===
    /// C above this with clean Mn/P is an organic adhesive signature
    pub const ORGANIC_C_MIN: f64 = 25.0;
    /// Mn must stay below this for an organic call
    pub const ORGANIC_MN_MAX: f64 = 1.0;
    /// P must stay below this for an organic call
    pub const ORGANIC_P_MAX: f64 = 3.0;

    // === Rule 5: Ochre-loaded compound adhesive ===
    /// Minimum C for an ochre-loaded adhesive
    pub const OCHRE_C_MIN: f64 = 20.0;
    /// Minimum Fe marking an ochre (iron oxide) load
    pub const OCHRE_FE_MIN: f64 = 5.0;
    /// Mn ceiling for the ochre-adhesive call
    pub const OCHRE_MN_MAX: f64 = 1.0;
    /// P ceiling for the ochre-adhesive call
    pub const OCHRE_P_MAX: f64 = 5.0;

    // === Rule 6: Partially mineralized organic (inclusive windows) ===
    pub const PARTIAL_C_MIN: f64 = 15.0;
    pub const PARTIAL_C_MAX: f64 = 25.0;
    pub const PARTIAL_MN_MIN: f64 = 1.0;
    pub const PARTIAL_MN_MAX: f64 = 5.0;
    pub const PARTIAL_P_MIN: f64 = 3.0;
    pub const PARTIAL_P_MAX: f64 = 8.0;

    // === Rule 7: Possible organic material ===
    pub const POSSIBLE_C_MIN: f64 = 15.0;
    pub const POSSIBLE_MN_MAX: f64 = 1.0;
    pub const POSSIBLE_P_MAX: f64 = 5.0;
}

/// Thresholds for context-specific correction branches.
pub mod context_thresholds {
    // === Guano cave corrections (Karkanas 2000 criteria) ===
    /// Background P contribution from guano, subtracted before reclassification
    pub const GUANO_P_BASELINE: f64 = 5.0;
    /// Guano organic-carbon contribution per baseline P unit
    pub const GUANO_C_BASELINE: f64 = 10.0;
    /// Mn above this is diagnostic of bat guano (Karkanas 2000)
    pub const GUANO_MN_INDICATOR: f64 = 0.5;
    /// Corrected-C floor for an organic call in a guano cave
    pub const GUANO_ORGANIC_C_MIN: f64 = 20.0;
    /// Corrected-P below this upgrades the organic call to High confidence
    pub const GUANO_ORGANIC_CLEAN_P_MAX: f64 = 2.0;
    /// Corrected-P above this with low Ca/P reads as apatite
    pub const GUANO_APATITE_P_MIN: f64 = 10.0;
    /// Ca/P ceiling for the guano apatite branch
    pub const GUANO_APATITE_CA_P_MAX: f64 = 2.0;
    /// Corrected-C ceiling for a mimic call
    pub const GUANO_MIMIC_C_MAX: f64 = 5.0;
    /// Corrected-P ceiling for a mimic call
    pub const GUANO_MIMIC_P_MAX: f64 = 2.0;

    // === Open-air corrections (Goldberg & Berna 2010 criteria) ===
    /// Si above this flags sediment contamination from the sand/clay matrix
    pub const OPEN_AIR_SI_CONTAMINATION: f64 = 20.0;
    /// C above this in a leaching-prone context is exceptional preservation
    pub const OPEN_AIR_ORGANIC_C_MIN: f64 = 20.0;
    /// C ceiling for the expected-mimic call
    pub const OPEN_AIR_MIMIC_C_MAX: f64 = 10.0;
    /// P ceiling for the expected-mimic call
    pub const OPEN_AIR_MIMIC_P_MAX: f64 = 1.0;

    // === Peat bog (organic-only analysis) ===
    /// C above this is well-preserved organic material
    pub const BOG_ORGANIC_C_MIN: f64 = 30.0;
    /// C above this is moderately preserved organic material
    pub const BOG_MODERATE_C_MIN: f64 = 15.0;
    /// P above this is anomalous; mineral phases dissolve in acidic bogs
    pub const BOG_ANOMALOUS_P_MIN: f64 = 1.0;
}
