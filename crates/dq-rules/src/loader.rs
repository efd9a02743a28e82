#![deny(unsafe_code)]

//! Loading rule sets from TOML files.
//!
//! The file is an array of `[[rule]]` tables. Recognized keys are the
//! configuration surface (`field_kind`, `country`, `pattern`,
//! `canonical_template`, `checksum_algorithm`, `length_min`, `length_max`,
//! plus the assigned-range and effective-date extensions); unknown keys
//! are ignored with a warning, never a fatal error.

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use toml::Value;
use tracing::warn;

use dq_model::{CountryCode, FieldKind};

use crate::error::RulesError;
use crate::rule::{AssignedRange, ChecksumAlgorithm, EffectiveRange, LocaleRule};

const KNOWN_KEYS: &[&str] = &[
    "field_kind",
    "country",
    "pattern",
    "canonical_template",
    "checksum_algorithm",
    "length_min",
    "length_max",
    "assigned_min",
    "assigned_max",
    "effective_from",
    "effective_to",
    "notes",
];

/// Load a rule set from a TOML file.
pub fn load_rule_set(path: &Path) -> Result<Vec<LocaleRule>, RulesError> {
    let text = std::fs::read_to_string(path).map_err(|source| RulesError::io(path, source))?;
    parse_rule_set(&text)
}

/// Parse a rule set from TOML text.
pub fn parse_rule_set(text: &str) -> Result<Vec<LocaleRule>, RulesError> {
    let value: Value = toml::from_str(text).map_err(|source| RulesError::Toml { source })?;
    let table = value
        .as_table()
        .ok_or_else(|| RulesError::invalid_rule(0, "rule set must be a TOML table"))?;

    for key in table.keys() {
        if key != "rule" {
            warn!(key, "ignoring unknown top-level key in rule set");
        }
    }

    let entries = match table.get("rule") {
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(RulesError::invalid_rule(
                0,
                "`rule` must be an array of tables ([[rule]])",
            ));
        }
        None => return Ok(Vec::new()),
    };

    let mut rules = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let entry = entry
            .as_table()
            .ok_or_else(|| RulesError::invalid_rule(index, "rule entry must be a table"))?;
        rules.push(parse_rule(index, entry)?);
    }
    Ok(rules)
}

fn parse_rule(index: usize, entry: &toml::Table) -> Result<LocaleRule, RulesError> {
    for key in entry.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn!(key, index, "ignoring unknown key in rule entry");
        }
    }

    let kind_raw = require_str(index, entry, "field_kind")?;
    let kind = FieldKind::from_str(kind_raw)
        .map_err(|e| RulesError::invalid_rule(index, e.to_string()))?;

    let country = match optional_str(index, entry, "country")? {
        Some(raw) => Some(
            CountryCode::new(raw).map_err(|e| RulesError::invalid_rule(index, e.to_string()))?,
        ),
        None => None,
    };

    let pattern = require_str(index, entry, "pattern")?;
    let mut rule = LocaleRule::new(kind, country, pattern);

    if let Some(template) = optional_str(index, entry, "canonical_template")? {
        rule.canonical_template = Some(template.to_string());
    }
    if let Some(algorithm) = optional_str(index, entry, "checksum_algorithm")? {
        rule.checksum_algorithm = Some(
            ChecksumAlgorithm::from_str(algorithm)
                .map_err(|e| RulesError::invalid_rule(index, e))?,
        );
    }
    rule.length_min = optional_usize(index, entry, "length_min")?;
    rule.length_max = optional_usize(index, entry, "length_max")?;

    let assigned_min = optional_u32(index, entry, "assigned_min")?;
    let assigned_max = optional_u32(index, entry, "assigned_max")?;
    rule.assigned_range = match (assigned_min, assigned_max) {
        (Some(min), Some(max)) => Some(AssignedRange { min, max }),
        (None, None) => None,
        _ => {
            return Err(RulesError::invalid_rule(
                index,
                "assigned_min and assigned_max must be given together",
            ));
        }
    };

    let effective_from = optional_date(index, entry, "effective_from")?;
    let effective_to = optional_date(index, entry, "effective_to")?;
    if effective_from.is_some() || effective_to.is_some() {
        rule.effective = Some(EffectiveRange {
            from: effective_from,
            to: effective_to,
        });
    }

    if let Some(notes) = optional_str(index, entry, "notes")? {
        rule.notes = Some(notes.to_string());
    }

    Ok(rule)
}

fn require_str<'a>(
    index: usize,
    entry: &'a toml::Table,
    key: &str,
) -> Result<&'a str, RulesError> {
    optional_str(index, entry, key)?
        .ok_or_else(|| RulesError::invalid_rule(index, format!("missing required key `{key}`")))
}

fn optional_str<'a>(
    index: usize,
    entry: &'a toml::Table,
    key: &str,
) -> Result<Option<&'a str>, RulesError> {
    match entry.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(RulesError::invalid_rule(
            index,
            format!("`{key}` must be a string"),
        )),
    }
}

fn optional_usize(
    index: usize,
    entry: &toml::Table,
    key: &str,
) -> Result<Option<usize>, RulesError> {
    match entry.get(key) {
        None => Ok(None),
        Some(Value::Integer(n)) if *n >= 0 => Ok(Some(*n as usize)),
        Some(_) => Err(RulesError::invalid_rule(
            index,
            format!("`{key}` must be a non-negative integer"),
        )),
    }
}

fn optional_u32(index: usize, entry: &toml::Table, key: &str) -> Result<Option<u32>, RulesError> {
    match entry.get(key) {
        None => Ok(None),
        Some(Value::Integer(n)) if (0..=i64::from(u32::MAX)).contains(n) => Ok(Some(*n as u32)),
        Some(_) => Err(RulesError::invalid_rule(
            index,
            format!("`{key}` must be a non-negative integer"),
        )),
    }
}

fn optional_date(
    index: usize,
    entry: &toml::Table,
    key: &str,
) -> Result<Option<NaiveDate>, RulesError> {
    match optional_str(index, entry, key)? {
        None => Ok(None),
        Some(raw) => raw
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|e| RulesError::invalid_rule(index, format!("`{key}`: {e}"))),
    }
}
