//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//! Each `cmd_*` prints to stdout; the `load_*`/`assess_*`/`render_*` helpers
//! they are built from return values so they can be tested directly.

use crate::config::AppConfig;
use readiness_core::{
    EntitySnapshot, EntityType, EntityTypeMetadata, PresenceInspection, ReadinessError,
    ReadinessReport, assess, assess_strict, primitives::MAX_BATCH_LENGTH,
};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Flags shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json_mode: bool,
    pub quiet: bool,
    pub verbose: bool,
}

// =============================================================================
// INPUT VALIDATION
// =============================================================================

/// Validate file path.
///
/// Canonicalizes the path (resolving symlinks and "..") and ensures it is a
/// regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, ReadinessError> {
    let canonical = path.canonicalize().map_err(|e| {
        ReadinessError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(ReadinessError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), ReadinessError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| ReadinessError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(ReadinessError::InvalidSnapshot(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

// =============================================================================
// SNAPSHOT LOADING
// =============================================================================

/// Snapshots read from one input document.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotBatch {
    /// The document was a single object rather than an array.
    pub single: bool,
    pub snapshots: Vec<EntitySnapshot>,
}

impl SnapshotBatch {
    /// Interpret a parsed document: an object is one snapshot, an array is a batch.
    pub fn from_json(document: Value) -> Result<Self, ReadinessError> {
        let (single, items) = match document {
            Value::Object(_) => (true, vec![document]),
            Value::Array(items) => (false, items),
            other => {
                return Err(ReadinessError::InvalidSnapshot(format!(
                    "expected an object or an array of objects, found {}",
                    json_kind(&other)
                )));
            }
        };

        if items.len() > MAX_BATCH_LENGTH {
            return Err(ReadinessError::InvalidSnapshot(format!(
                "Snapshot count {} exceeds maximum allowed {}",
                items.len(),
                MAX_BATCH_LENGTH
            )));
        }

        let snapshots = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<EntitySnapshot>(item).map_err(|e| {
                    ReadinessError::InvalidSnapshot(format!("snapshot {}: {}", index, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { single, snapshots })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read and parse a snapshot file.
pub fn load_snapshots(path: &Path, max_bytes: u64) -> Result<SnapshotBatch, ReadinessError> {
    let validated_path = validate_file_path(path)?;
    validate_file_size(&validated_path, max_bytes)?;

    let contents = std::fs::read(&validated_path)
        .map_err(|e| ReadinessError::IoError(format!("Read file: {}", e)))?;

    let document: Value = serde_json::from_slice(&contents)
        .map_err(|e| ReadinessError::InvalidSnapshot(format!("{}: {}", path.display(), e)))?;

    let batch = SnapshotBatch::from_json(document)?;
    tracing::info!(
        "Loaded {} snapshot(s) from {:?}",
        batch.snapshots.len(),
        validated_path
    );
    Ok(batch)
}

// =============================================================================
// ASSESSMENT
// =============================================================================

/// Assess every snapshot in a batch.
///
/// Malformed payloads inside a snapshot are logged and treated as absent.
/// In strict mode an unknown entity tag fails the whole batch.
pub fn assess_batch(
    batch: &SnapshotBatch,
    strict: bool,
) -> Result<Vec<ReadinessReport>, ReadinessError> {
    let mut reports = Vec::with_capacity(batch.snapshots.len());

    for (index, snapshot) in batch.snapshots.iter().enumerate() {
        let report = if strict {
            assess_strict(snapshot).map_err(|e| {
                ReadinessError::InvalidSnapshot(format!("snapshot {}: {}", index, e))
            })?
        } else {
            match snapshot.entity_tag() {
                Some(tag) if tag.parse::<EntityType>().is_err() => {
                    tracing::warn!(index, tag, "Unknown entity type, assessing as Planning Entity");
                }
                None => tracing::warn!(index, "Missing entity type, assessing as Planning Entity"),
                Some(_) => {}
            }
            assess(snapshot)
        };

        for warning in &report.warnings {
            tracing::warn!(index, "{}", warning);
        }
        tracing::debug!(
            index,
            entity_type = %report.entity_type,
            current_tab = ?report.current_tab,
            progress = %report.progress,
            "Assessed snapshot"
        );

        reports.push(report);
    }

    Ok(reports)
}

// =============================================================================
// RENDERING
// =============================================================================

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Render one report as text.
pub fn render_report_text(index: usize, report: &ReadinessReport, verbose: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", index, report.entity_type);
    let _ = writeln!(
        out,
        "  Progress:   {} (max {}%)",
        report.progress, report.max_progress
    );
    let _ = writeln!(
        out,
        "  Steps:      {} / {} complete",
        report.completed_steps.len(),
        report.tab_count
    );
    match report.next_step {
        Some(step) => {
            let _ = writeln!(out, "  Next step:  {}", step);
        }
        None => {
            let _ = writeln!(out, "  Setup complete");
        }
    }

    if verbose {
        let p = &report.presence;
        let _ = writeln!(out, "  Presence:");
        let _ = writeln!(
            out,
            "    Countries & Currencies: {}",
            yes_no(p.has_countries_and_currencies)
        );
        let _ = writeln!(out, "    Period Setup:           {}", yes_no(p.has_period_setup));
        let _ = writeln!(out, "    Modules:                {}", yes_no(p.has_modules));
        if let Some(tab) = report.current_tab {
            let _ = writeln!(out, "  Current tab: {}", tab);
        }
    }

    for warning in &report.warnings {
        let _ = writeln!(out, "  Warning: {}", warning);
    }

    out
}

/// Render a value as pretty JSON.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ReadinessError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ReadinessError::SerializationError(e.to_string()))
}

/// Render reports as JSON, mirroring the input shape (object or array).
pub fn render_reports_json(
    single: bool,
    reports: &[ReadinessReport],
) -> Result<String, ReadinessError> {
    match reports {
        [report] if single => render_json(report),
        _ => render_json(reports),
    }
}

// =============================================================================
// PROGRESS COMMAND
// =============================================================================

/// Assess snapshots and print readiness reports.
pub fn cmd_progress(
    file: &Path,
    config: &AppConfig,
    opts: OutputOptions,
) -> Result<(), ReadinessError> {
    let batch = load_snapshots(file, config.assessment.max_input_bytes)?;
    let reports = assess_batch(&batch, config.assessment.strict_entity_types)?;

    if opts.json_mode {
        println!("{}", render_reports_json(batch.single, &reports)?);
        return Ok(());
    }

    if !opts.quiet {
        println!("Entity Readiness");
        println!("================");
        println!();
    }

    for (index, report) in reports.iter().enumerate() {
        print!("{}", render_report_text(index, report, opts.verbose));
    }

    if !opts.quiet && reports.len() > 1 {
        let complete = reports.iter().filter(|r| r.complete).count();
        println!();
        println!("{} of {} entities fully set up", complete, reports.len());
    }

    Ok(())
}

// =============================================================================
// PRESENCE COMMAND
// =============================================================================

/// Presence signals for one snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceRow {
    pub index: usize,
    pub has_countries_and_currencies: bool,
    pub has_period_setup: bool,
    pub has_modules: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Compute presence rows for a batch.
pub fn presence_rows(batch: &SnapshotBatch) -> Vec<PresenceRow> {
    batch
        .snapshots
        .iter()
        .enumerate()
        .map(|(index, snapshot)| {
            let PresenceInspection {
                presence,
                diagnostics,
            } = snapshot.inspect();

            let warnings: Vec<String> = diagnostics
                .issues()
                .iter()
                .map(ToString::to_string)
                .collect();
            for warning in &warnings {
                tracing::warn!(index, "{}", warning);
            }

            PresenceRow {
                index,
                has_countries_and_currencies: presence.has_countries_and_currencies,
                has_period_setup: presence.has_period_setup,
                has_modules: presence.has_modules,
                warnings,
            }
        })
        .collect()
}

/// Print the presence signals of snapshots.
pub fn cmd_presence(
    file: &Path,
    config: &AppConfig,
    opts: OutputOptions,
) -> Result<(), ReadinessError> {
    let batch = load_snapshots(file, config.assessment.max_input_bytes)?;
    let rows = presence_rows(&batch);

    if opts.json_mode {
        println!("{}", render_json(&rows)?);
        return Ok(());
    }

    if !opts.quiet {
        println!("idx  countries/currencies  period setup  modules");
    }
    for row in &rows {
        println!(
            "{:<4} {:<21} {:<13} {}",
            row.index,
            yes_no(row.has_countries_and_currencies),
            yes_no(row.has_period_setup),
            yes_no(row.has_modules)
        );
    }

    Ok(())
}

// =============================================================================
// METADATA COMMAND
// =============================================================================

/// Resolve an entity tag according to the configured strictness.
pub fn resolve_entity_type(tag: &str, strict: bool) -> Result<EntityType, ReadinessError> {
    if strict {
        return tag.parse();
    }

    if tag.parse::<EntityType>().is_err() {
        tracing::warn!(tag, "Unknown entity type, treating as Planning Entity");
    }
    Ok(EntityType::from_tag(tag))
}

fn print_metadata(meta: &EntityTypeMetadata) {
    println!("{}", meta.entity_type);
    println!("  Tabs:         {}", meta.tab_count);
    println!("  Max progress: {}%", meta.max_progress);
    for (i, step) in meta.steps.iter().enumerate() {
        println!("  Step {}:       {}", i + 1, step);
    }
}

/// Show metadata for one entity type.
pub fn cmd_metadata(
    tag: &str,
    config: &AppConfig,
    opts: OutputOptions,
) -> Result<(), ReadinessError> {
    let entity_type = resolve_entity_type(tag, config.assessment.strict_entity_types)?;
    let meta = EntityTypeMetadata::for_type(entity_type);

    if opts.json_mode {
        println!("{}", render_json(&meta)?);
    } else {
        print_metadata(&meta);
    }

    Ok(())
}

/// Show metadata for every entity type.
pub fn cmd_overview(opts: OutputOptions) -> Result<(), ReadinessError> {
    let all: Vec<EntityTypeMetadata> = [EntityType::Planning, EntityType::Rollup]
        .into_iter()
        .map(EntityTypeMetadata::for_type)
        .collect();

    if opts.json_mode {
        println!("{}", render_json(&all)?);
        return Ok(());
    }

    if !opts.quiet {
        println!("Entity Types");
        println!("============");
    }
    for meta in &all {
        print_metadata(meta);
    }

    Ok(())
}
