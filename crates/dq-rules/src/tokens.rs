//! Token classification for name handling.
//!
//! Name particles ("de", "van der") and company legal-entity suffixes
//! ("S.A.", "GmbH") share one mechanism: a known-token table drives the
//! behavior, so locale additions are data edits rather than new string
//! code paths.

use std::collections::{BTreeMap, BTreeSet};

/// How a recognized token behaves under casing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// Lowercase-preserving name component ("de", "von").
    Particle,
    /// Trailing legal-entity marker, extracted from company names.
    LegalSuffix,
    /// Kept fully uppercase ("III", generation suffixes).
    Acronym,
}

/// Compact comparison key: uppercase alphanumerics only, so "S.A." and
/// "sa" collide as intended.
pub fn compact_key(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_uppercase())
        .collect()
}

/// The token table consulted by name normalization.
#[derive(Debug, Clone)]
pub struct TokenTable {
    particles: BTreeSet<String>,
    /// compact key -> canonical display form
    legal_suffixes: BTreeMap<String, String>,
    acronyms: BTreeSet<String>,
}

impl TokenTable {
    /// Built-in table covering the locales the built-in rules cover.
    pub fn builtin() -> Self {
        let particles = [
            "de", "del", "la", "las", "los", "da", "das", "dos", "di", "du", "le", "van", "von",
            "der", "den", "ter", "ten", "y", "e",
        ];
        let legal_suffixes: [(&str, &[&str]); 12] = [
            ("S.A.", &["S.A.", "SA"]),
            ("S.A.S.", &["S.A.S.", "SAS"]),
            ("S.R.L.", &["S.R.L.", "SRL"]),
            ("S.L.", &["S.L."]),
            ("Inc.", &["Inc.", "Inc", "Incorporated"]),
            ("Ltd.", &["Ltd.", "Ltd", "Limited"]),
            ("LLC", &["LLC", "L.L.C."]),
            ("GmbH", &["GmbH"]),
            ("AG", &["A.G."]),
            ("B.V.", &["B.V.", "BV"]),
            ("Corp.", &["Corp.", "Corp", "Corporation"]),
            ("Pty.", &["Pty.", "Pty"]),
        ];
        let acronyms = ["II", "III", "IV"];

        let mut table = Self {
            particles: particles.iter().map(|p| (*p).to_string()).collect(),
            legal_suffixes: BTreeMap::new(),
            acronyms: acronyms.iter().map(|a| (*a).to_string()).collect(),
        };
        for (canonical, variants) in legal_suffixes {
            for variant in variants {
                table
                    .legal_suffixes
                    .insert(compact_key(variant), canonical.to_string());
            }
        }
        table
    }

    /// Register an extra particle (lowercased on insert).
    pub fn add_particle(&mut self, particle: &str) {
        self.particles.insert(particle.to_lowercase());
    }

    /// Register an extra legal-suffix variant mapping to its canonical form.
    pub fn add_legal_suffix(&mut self, variant: &str, canonical: &str) {
        self.legal_suffixes
            .insert(compact_key(variant), canonical.to_string());
    }

    pub fn is_particle(&self, token: &str) -> bool {
        self.particles.contains(&token.to_lowercase())
    }

    pub fn is_acronym(&self, token: &str) -> bool {
        self.acronyms.contains(&token.to_uppercase())
    }

    /// Canonical display form when `token` is a known legal-entity suffix.
    pub fn legal_suffix(&self, token: &str) -> Option<&str> {
        let key = compact_key(token);
        if key.is_empty() {
            return None;
        }
        self.legal_suffixes.get(&key).map(String::as_str)
    }

    pub fn classify(&self, token: &str) -> Option<TokenClass> {
        if self.is_particle(token) {
            Some(TokenClass::Particle)
        } else if self.is_acronym(token) {
            Some(TokenClass::Acronym)
        } else if self.legal_suffix(token).is_some() {
            Some(TokenClass::LegalSuffix)
        } else {
            None
        }
    }
}

impl Default for TokenTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particles_match_case_insensitively() {
        let table = TokenTable::builtin();
        assert!(table.is_particle("de"));
        assert!(table.is_particle("De"));
        assert!(table.is_particle("VON"));
        assert!(!table.is_particle("smith"));
    }

    #[test]
    fn suffix_variants_collapse_to_canonical() {
        let table = TokenTable::builtin();
        assert_eq!(table.legal_suffix("S.A."), Some("S.A."));
        assert_eq!(table.legal_suffix("sa"), Some("S.A."));
        assert_eq!(table.legal_suffix("GMBH"), Some("GmbH"));
        assert_eq!(table.legal_suffix("Acme"), None);
    }

    #[test]
    fn classify_orders_particle_before_suffix() {
        // "SA" and "de" never collide, but classification priority is
        // particle > acronym > suffix for the tokens that do.
        let table = TokenTable::builtin();
        assert_eq!(table.classify("van"), Some(TokenClass::Particle));
        assert_eq!(table.classify("III"), Some(TokenClass::Acronym));
        assert_eq!(table.classify("Ltd"), Some(TokenClass::LegalSuffix));
        assert_eq!(table.classify("xyzzy"), None);
    }
}
