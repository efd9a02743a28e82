#![deny(unsafe_code)]

//! The locale rule table: loaded once at startup, read-only afterwards,
//! safe to share across any number of concurrent pipeline invocations.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use dq_model::{CountryCode, FieldKind};

use crate::error::RulesError;
use crate::rule::{ChecksumAlgorithm, LocaleRule};
use crate::tokens::TokenTable;

type RuleKey = (FieldKind, Option<CountryCode>);

/// Registry of [`LocaleRule`]s keyed by (field kind, country).
///
/// Lookup falls back from the country-specific rule to a generic
/// (country-less) rule for the same kind; only when neither exists does it
/// report `UnsupportedLocale` and the caller decides between generic
/// cleanup and rejection.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: BTreeMap<RuleKey, Vec<LocaleRule>>,
    tokens: TokenTable,
}

impl RuleRegistry {
    /// Registry with the built-in rule set.
    pub fn builtin() -> Self {
        let mut registry = Self {
            rules: BTreeMap::new(),
            tokens: TokenTable::builtin(),
        };
        for rule in builtin_rules() {
            registry.register(rule);
        }
        registry
    }

    /// Empty registry (rules come from `register`/`merge`).
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
            tokens: TokenTable::builtin(),
        }
    }

    /// Register a rule. Dated variants accumulate; an undated rule
    /// replaces the previous undated rule for the same key.
    pub fn register(&mut self, rule: LocaleRule) {
        let key = (rule.kind, rule.country.clone());
        let slot = self.rules.entry(key).or_default();
        if rule.effective.is_none() {
            slot.retain(|existing| existing.effective.is_some());
        }
        slot.push(rule);
    }

    /// Overlay a batch of loaded rules onto this registry.
    pub fn merge(&mut self, rules: Vec<LocaleRule>) {
        for rule in rules {
            self.register(rule);
        }
    }

    /// Current rule for a (kind, country) pair, with generic fallback.
    pub fn lookup(
        &self,
        kind: FieldKind,
        country: Option<&CountryCode>,
    ) -> Result<&LocaleRule, RulesError> {
        self.lookup_as_of(kind, country, None)
    }

    /// Rule applying on `as_of` (dated variants preferred over undated).
    /// `as_of == None` selects only undated rules.
    pub fn lookup_as_of(
        &self,
        kind: FieldKind,
        country: Option<&CountryCode>,
        as_of: Option<NaiveDate>,
    ) -> Result<&LocaleRule, RulesError> {
        if let Some(country) = country
            && let Some(rule) = self.select(kind, Some(country), as_of)
        {
            return Ok(rule);
        }
        if let Some(rule) = self.select(kind, None, as_of) {
            return Ok(rule);
        }
        Err(RulesError::UnsupportedLocale {
            kind,
            locale: country.map_or_else(|| "*".to_string(), |c| c.as_str().to_string()),
        })
    }

    fn select(
        &self,
        kind: FieldKind,
        country: Option<&CountryCode>,
        as_of: Option<NaiveDate>,
    ) -> Option<&LocaleRule> {
        let slot = self.rules.get(&(kind, country.cloned()))?;
        if let Some(date) = as_of {
            // Dated variant containing the date wins over the undated rule.
            if let Some(rule) = slot
                .iter()
                .find(|rule| rule.effective.is_some_and(|range| range.contains(date)))
            {
                return Some(rule);
            }
        }
        slot.iter().find(|rule| rule.effective.is_none())
    }

    /// All registered rules, in key order.
    pub fn iter(&self) -> impl Iterator<Item = &LocaleRule> {
        self.rules.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Token table used by name normalization.
    pub fn tokens(&self) -> &TokenTable {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut TokenTable {
        &mut self.tokens
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn country(code: &str) -> Option<CountryCode> {
    // Built-in codes are literals; a typo here is a programmer error
    // caught by the registry tests.
    CountryCode::new(code).ok()
}

/// The built-in rule set. Rules are data; the code below only states them.
fn builtin_rules() -> Vec<LocaleRule> {
    vec![
        // Argentine CUIT/CUIL: 11 digits rendered NN-NNNNNNNN-N, mod-11
        // check digit over the first ten.
        LocaleRule::new(FieldKind::NationalId, country("AR"), r"^\d{2}-\d{8}-\d$")
            .with_template("NN-NNNNNNNN-N")
            .with_checksum(ChecksumAlgorithm::ArCuitMod11)
            .with_length(11, 11)
            .with_notes("CUIT/CUIL"),
        // Phones canonicalize to E.164.
        LocaleRule::new(FieldKind::Phone, country("US"), r"^\+1[2-9]\d{9}$")
            .with_length(11, 11)
            .with_notes("NANP; +1 is shared with CA but registered to US here"),
        LocaleRule::new(FieldKind::Phone, country("AR"), r"^\+54\d{10}$").with_length(12, 12),
        LocaleRule::new(FieldKind::Phone, None, r"^\+[1-9]\d{6,14}$").with_length(7, 15),
        // USPS ZIP: five digits, optional +4; assigned block 00501-99950.
        LocaleRule::new(FieldKind::PostalCode, country("US"), r"^\d{5}(-\d{4})?$")
            .with_template("NNNNN")
            .with_length(5, 9)
            .with_assigned_range(501, 99_950),
        // Argentine CPA (letter + 4 digits + 3 letters) or legacy 4-digit.
        LocaleRule::new(
            FieldKind::PostalCode,
            country("AR"),
            r"^([A-Z]\d{4}[A-Z]{3}|\d{4})$",
        )
        .with_length(4, 8),
        LocaleRule::new(
            FieldKind::Email,
            None,
            r"^[a-z0-9][a-z0-9._%+-]*@[a-z0-9.-]+\.[a-z]{2,}$",
        )
        .with_length(6, 254),
        LocaleRule::new(FieldKind::PersonalName, None, r"^\p{L}+(?:[ '\-]\p{L}+)*$")
            .with_length(1, 200),
        LocaleRule::new(
            FieldKind::CompanyName,
            None,
            r"^[\p{L}0-9][\p{L}0-9&.,' \-]*$",
        )
        .with_length(1, 200),
        LocaleRule::new(
            FieldKind::StreetAddress,
            None,
            r"^[\p{L}0-9][\p{L}0-9°ºª#/.,' \-]*$",
        )
        .with_length(1, 400),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_field_kind_somehow() {
        let registry = RuleRegistry::builtin();
        for kind in FieldKind::ALL {
            let specific = registry.lookup(kind, country("AR").as_ref());
            let generic = registry.lookup(kind, None);
            assert!(
                specific.is_ok() || generic.is_ok() || kind == FieldKind::NationalId,
                "no rule path for {kind}"
            );
        }
    }

    #[test]
    fn lookup_falls_back_to_generic() {
        let registry = RuleRegistry::builtin();
        let rule = registry
            .lookup(FieldKind::Email, country("DE").as_ref())
            .expect("generic email rule");
        assert!(rule.country.is_none());
    }

    #[test]
    fn missing_kind_and_locale_is_unsupported() {
        let registry = RuleRegistry::builtin();
        let err = registry
            .lookup(FieldKind::NationalId, country("US").as_ref())
            .unwrap_err();
        assert!(matches!(err, RulesError::UnsupportedLocale { .. }));
    }

    #[test]
    fn dated_variant_preferred_when_date_given() {
        let mut registry = RuleRegistry::builtin();
        let cutover = NaiveDate::from_ymd_opt(1968, 1, 1).unwrap();
        registry.register(
            LocaleRule::new(FieldKind::NationalId, country("AR"), r"^\d{7}$")
                .with_effective(None, Some(cutover))
                .with_notes("pre-1968 DNI, synthetic test rule"),
        );

        let historic = registry
            .lookup_as_of(
                FieldKind::NationalId,
                country("AR").as_ref(),
                NaiveDate::from_ymd_opt(1960, 6, 1),
            )
            .unwrap();
        assert_eq!(historic.pattern, r"^\d{7}$");

        let current = registry
            .lookup_as_of(
                FieldKind::NationalId,
                country("AR").as_ref(),
                NaiveDate::from_ymd_opt(2020, 6, 1),
            )
            .unwrap();
        assert!(current.checksum_algorithm.is_some());
    }

    #[test]
    fn undated_register_replaces_previous_undated() {
        let mut registry = RuleRegistry::empty();
        registry.register(LocaleRule::new(FieldKind::Email, None, r"^a$"));
        registry.register(LocaleRule::new(FieldKind::Email, None, r"^b$"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup(FieldKind::Email, None).unwrap().pattern, "^b$");
    }
}
