//! Residue classification
//!
//! Two entry points over the same reading type:
//! - [`classify`]: the context-free diagnostic rule chain (first match wins)
//! - [`classify_with_context`]: context-corrected variants for sites with a
//!   known depositional environment, falling back to the base chain when the
//!   context carries no correction branch

mod contextual;
mod rules;

pub use contextual::classify_with_context;
pub use rules::{classify, classify_batch};
