//! Subcommand implementations.

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::{debug, info, info_span, trace};

use dq_cli::logging::redact_value;
use dq_core::Pipeline;
use dq_match::similarity;
use dq_model::{FieldKind, RecordReport, RecordSchema};
use dq_rules::{RuleRegistry, load_rule_set};

use crate::cli::{CheckArgs, RulesArgs};
use crate::input::{parse_required_kinds, read_records};
use crate::summary::{apply_table_style, header_cell};

/// A likely-duplicate pair found by the `--find-duplicates` scan.
#[derive(Debug, Clone)]
pub struct DuplicatePair {
    pub left_index: usize,
    pub right_index: usize,
    pub left_name: String,
    pub right_name: String,
    pub score: f64,
}

/// Everything `check` produced, handed to the summary printer.
pub struct CheckResult {
    pub reports: Vec<RecordReport>,
    pub duplicates: Vec<DuplicatePair>,
    pub json_path: Option<std::path::PathBuf>,
}

impl CheckResult {
    pub fn invalid_count(&self) -> usize {
        self.reports.iter().filter(|report| !report.valid).count()
    }
}

pub fn run_check(args: &CheckArgs) -> Result<CheckResult> {
    let span = info_span!("check", input = %args.input.display());
    let _guard = span.enter();

    let registry = Arc::new(build_registry(args.rules.as_deref())?);
    let pipeline = Pipeline::new(Arc::clone(&registry)).context("compile locale rules")?;

    let schema = match &args.require {
        Some(spec) => parse_required_kinds(spec)?.into_iter().collect(),
        None => RecordSchema::new(),
    };

    let records = read_records(&args.input, args.format)?;
    info!(records = records.len(), "loaded input records");

    let mut reports = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let report = pipeline.process(record, &schema);
        debug!(record = index, valid = report.valid, "processed record");
        for (kind, field) in &report.fields {
            if !field.outcome.is_valid() {
                trace!(
                    record = index,
                    kind = kind.as_str(),
                    raw = redact_value(&field.raw),
                    outcome = field.outcome.label(),
                    "field did not validate"
                );
            }
        }
        reports.push(report);
    }

    let duplicates = if args.find_duplicates {
        scan_duplicates(&reports, args.threshold)
    } else {
        Vec::new()
    };

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&reports).context("serialize reports")?;
        fs::write(path, json).with_context(|| format!("write reports to {}", path.display()))?;
        info!(path = %path.display(), "wrote JSON reports");
    }

    Ok(CheckResult {
        reports,
        duplicates,
        json_path: args.json.clone(),
    })
}

/// Pairwise scan over normalized personal names. Quadratic, fine for
/// batch sizes this tool is meant for.
fn scan_duplicates(reports: &[RecordReport], threshold: f64) -> Vec<DuplicatePair> {
    let names: Vec<(usize, &str)> = reports
        .iter()
        .enumerate()
        .filter_map(|(index, report)| {
            report
                .get(FieldKind::PersonalName)
                .map(|field| (index, field.normalized.as_str()))
        })
        .filter(|(_, name)| !name.is_empty())
        .collect();

    let mut pairs = Vec::new();
    for (position, &(left_index, left_name)) in names.iter().enumerate() {
        for &(right_index, right_name) in &names[position + 1..] {
            let score = similarity(left_name, right_name);
            if score >= threshold {
                pairs.push(DuplicatePair {
                    left_index,
                    right_index,
                    left_name: left_name.to_string(),
                    right_name: right_name.to_string(),
                    score,
                });
            }
        }
    }
    pairs.sort_by(|a, b| b.score.total_cmp(&a.score));
    pairs
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let registry = build_registry(args.rules.as_deref())?;

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Locale"),
        header_cell("Pattern"),
        header_cell("Template"),
        header_cell("Checksum"),
        header_cell("Length"),
        header_cell("Effective"),
    ]);
    apply_table_style(&mut table);

    for rule in registry.iter() {
        table.add_row(vec![
            Cell::new(rule.kind.as_str()),
            Cell::new(rule.locale_label()),
            Cell::new(&rule.pattern),
            Cell::new(rule.canonical_template.as_deref().unwrap_or("-")),
            Cell::new(
                rule.checksum_algorithm
                    .as_ref()
                    .map_or("-", |algorithm| algorithm.as_str()),
            ),
            Cell::new(length_label(rule.length_min, rule.length_max)),
            Cell::new(effective_label(rule.effective.as_ref())),
        ]);
    }
    println!("{table}");
    println!("{} rules registered", registry.len());
    Ok(())
}

fn build_registry(extra: Option<&std::path::Path>) -> Result<RuleRegistry> {
    let mut registry = RuleRegistry::builtin();
    if let Some(path) = extra {
        let rules = load_rule_set(path)
            .with_context(|| format!("load rule set {}", path.display()))?;
        info!(path = %path.display(), count = rules.len(), "merged extra rule set");
        registry.merge(rules);
    }
    Ok(registry)
}

fn length_label(min: Option<usize>, max: Option<usize>) -> String {
    match (min, max) {
        (Some(min), Some(max)) if min == max => min.to_string(),
        (Some(min), Some(max)) => format!("{min}-{max}"),
        (Some(min), None) => format!("{min}+"),
        (None, Some(max)) => format!("<={max}"),
        (None, None) => "-".to_string(),
    }
}

fn effective_label(effective: Option<&dq_rules::EffectiveRange>) -> String {
    match effective {
        None => "always".to_string(),
        Some(range) => {
            let from = range
                .from
                .map_or_else(|| "..".to_string(), |date| date.to_string());
            let to = range
                .to
                .map_or_else(|| "..".to_string(), |date| date.to_string());
            format!("{from} / {to}")
        }
    }
}
