use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span, warn};

use tt_cli::config::{OptionOverrides, load_options, resolve_options};
use tt_cli::logging::redact_value;
use tt_core::{SessionContext, assign_batches, run_check as check_timetable};
use tt_ingest::{StudentColumns, list_roster_files, load_roster, load_timetable, subject_from_path};
use tt_model::{Enrollment, ProcessingOptions, ScheduleMode};
use tt_output::{
    BATCH_ALLOCATION_STEM, CONFLICTS_STEM, OutputFormat, RESOLUTIONS_STEM, batch_frame,
    conflict_frame, resolution_frame, write_frame, write_named,
};

use crate::cli::{BatchesArgs, BatchingArgs, CheckArgs, RosterArgs, ScanArgs};
use crate::types::{BatchesResult, CheckResult, RosterReport, ScanEntry};

/// Resolves processing options from config file and flags.
pub fn options_for(
    config: Option<&Path>,
    batching: &BatchingArgs,
    overrides: OptionOverrides,
) -> Result<ProcessingOptions> {
    let cwd = env::current_dir().context("resolve working directory")?;
    let base = load_options(config, &cwd)?;
    let overrides = OptionOverrides {
        batch_size: batching.batch_size.or(overrides.batch_size),
        batch_code_style: batching
            .code_style
            .map(Into::into)
            .or(overrides.batch_code_style),
        ..overrides
    };
    resolve_options(base, &overrides)
}

/// Loads enrollments from several rosters, recording per-file failures.
fn load_enrollments(
    paths: &[PathBuf],
    subject_column: Option<&str>,
    options: &ProcessingOptions,
    errors: &mut Vec<String>,
) -> Vec<Enrollment> {
    let mut enrollments = Vec::new();
    for path in paths {
        let span = info_span!("roster", path = %path.display());
        let _guard = span.enter();
        let loaded = load_roster(path, options).and_then(|roster| {
            roster
                .with_subject_column(subject_column)
                .enrollments(StudentColumns::Required)
        });
        match loaded {
            Ok(rows) => {
                debug!(enrollments = rows.len(), "roster loaded");
                enrollments.extend(rows);
            }
            Err(error) => {
                warn!(%error, "skipping roster");
                errors.push(format!("{}: {error}", path.display()));
            }
        }
    }
    enrollments
}

pub fn run_batches(args: &BatchesArgs, config: Option<&Path>) -> Result<BatchesResult> {
    let options = options_for(config, &args.batching, OptionOverrides::default())?;
    let mut errors = Vec::new();
    let enrollments =
        load_enrollments(&args.rosters, args.subject_column.as_deref(), &options, &mut errors);
    if enrollments.is_empty() && !errors.is_empty() {
        bail!("no roster could be read:\n  {}", errors.join("\n  "));
    }

    let table = assign_batches(&enrollments, &options).context("form batches")?;
    let format: OutputFormat = args.format.into();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{BATCH_ALLOCATION_STEM}.{}", format.extension())));
    let df = batch_frame(&table)?;
    write_frame(&df, &output, format)?;

    Ok(BatchesResult {
        table,
        output,
        options,
        errors,
    })
}

pub fn run_check(args: &CheckArgs, config: Option<&Path>) -> Result<CheckResult> {
    let overrides = OptionOverrides {
        malformed_time: args.on_bad_time.map(Into::into),
        ..OptionOverrides::default()
    };
    let options = options_for(config, &args.batching, overrides)?;
    let check_span = info_span!("check", timetable = %args.timetable.display());
    let _check_guard = check_span.enter();
    let start = Instant::now();

    let timetable = load_timetable(&args.timetable, &options)
        .with_context(|| format!("load timetable {}", args.timetable.display()))?;

    let mut errors = Vec::new();
    let enrollments = match timetable.mode() {
        ScheduleMode::Direct => {
            let Some(path) = &args.allocation else {
                bail!("a direct timetable needs --allocation with the subject allocation file");
            };
            let roster = load_roster(path, &options)
                .with_context(|| format!("load allocation {}", path.display()))?;
            roster
                .enrollments(StudentColumns::Optional)
                .with_context(|| format!("read allocation {}", path.display()))?
        }
        ScheduleMode::Grid => {
            if args.rosters.is_empty() {
                bail!("a grid timetable needs --roster files to form batches from");
            }
            let enrollments = load_enrollments(&args.rosters, None, &options, &mut errors);
            if enrollments.is_empty() && !errors.is_empty() {
                bail!("no roster could be read:\n  {}", errors.join("\n  "));
            }
            enrollments
        }
    };

    let mut context = SessionContext::new(options)?;
    let outcome = check_timetable(&mut context, &timetable, &enrollments)?;
    for conflict in &outcome.detection.conflicts {
        debug!(
            roll_no = redact_value(&conflict.roll_no),
            day = %conflict.day,
            moved = conflict.moved_label().unwrap_or_default(),
            "conflict"
        );
    }

    let format: OutputFormat = args.format.into();
    let mut outputs = vec![
        write_named(
            &conflict_frame(&outcome.detection.conflicts, outcome.mode)?,
            &args.output_dir,
            CONFLICTS_STEM,
            format,
        )?,
        write_named(
            &resolution_frame(&outcome.resolutions, outcome.mode)?,
            &args.output_dir,
            RESOLUTIONS_STEM,
            format,
        )?,
    ];
    let batches = context.batches().cloned();
    if let Some(table) = &batches {
        outputs.push(write_named(
            &batch_frame(table)?,
            &args.output_dir,
            BATCH_ALLOCATION_STEM,
            format,
        )?);
    }

    info!(
        mode = outcome.mode.as_str(),
        conflicts = outcome.detection.conflicts.len(),
        duration_ms = start.elapsed().as_millis(),
        "check complete"
    );
    Ok(CheckResult {
        timetable: args.timetable.clone(),
        outcome,
        batches,
        outputs,
        errors,
    })
}

pub fn run_roster(args: &RosterArgs, config: Option<&Path>) -> Result<RosterReport> {
    let options = options_for(config, &BatchingArgs::default(), OptionOverrides::default())?;
    let roster = load_roster(&args.file, &options).map_err(|error| {
        let hint = if error.is_schema_error() {
            "\nhint: the header row must name a roll-number column (Roll No, Reg No, Registration Number)"
        } else {
            ""
        };
        anyhow::anyhow!("{}: {error}{hint}", args.file.display())
    })?;
    Ok(RosterReport {
        path: args.file.clone(),
        header_row: roster.table.header_row + 1,
        has_subject_column: roster.has_subject_column(),
        subject: roster.file_subject.as_ref().map(ToString::to_string),
        columns: roster.table.columns,
        rows: roster.table.rows.len(),
    })
}

pub fn run_scan(args: &ScanArgs) -> Result<Vec<ScanEntry>> {
    let files = list_roster_files(&args.dir)
        .with_context(|| format!("scan {}", args.dir.display()))?;
    info!(dir = %args.dir.display(), files = files.len(), "scanned roster directory");
    Ok(files
        .into_iter()
        .map(|path| ScanEntry {
            subject: subject_from_path(&path).as_ref().map(ToString::to_string),
            path,
        })
        .collect())
}
