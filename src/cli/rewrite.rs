use clap::Args;
use rayon::prelude::*;
use respec::config;
use respec::errors::{RespecError, Result};
use respec::output::{
    json, text, FileReport, Metadata, OutputFormat, RewriteEntry, RewriteReport, RunMode,
    SourceTypeLabel,
};
use respec::policy::{PathPolicy, SuffixRemap};
use respec::rewrite::RewriteTarget;
use respec::scan::{Language, ScanOptions, SourceType};
use respec::walk;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Args)]
pub struct RewriteArgs {
    /// Path to rewrite
    pub path: PathBuf,

    /// Source language (auto-detected per file when omitted)
    #[arg(long, value_parser = parse_language)]
    pub lang: Option<Language>,

    /// Parse sources as modules or classic scripts
    #[arg(long, value_parser = parse_source_type)]
    pub source_type: Option<SourceType>,

    /// Local suffix that marks a specifier as rewritable
    #[arg(long)]
    pub from: Option<String>,

    /// Target suffix the local suffix is remapped to
    #[arg(long)]
    pub to: Option<String>,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Include glob patterns
    #[arg(long)]
    pub include: Vec<String>,

    /// Exclude glob patterns
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Suppress progress output
    #[arg(long)]
    pub quiet: bool,
}

fn parse_language(s: &str) -> std::result::Result<Language, String> {
    s.parse()
}

fn parse_source_type(s: &str) -> std::result::Result<SourceType, String> {
    s.parse()
}

/// Outcome of processing one discovered file.
enum FileOutcome {
    Clean,
    Changed(FileReport),
    Skipped,
    Failed(RespecError),
}

/// Output settings resolved from CLI flags and the config file.
pub(crate) struct EmitSettings {
    pub format: OutputFormat,
    pub quiet: bool,
}

pub fn run(args: &RewriteArgs) -> Result<()> {
    let (report, settings) = execute(args, RunMode::Rewrite)?;
    emit(&settings, &report)
}

/// Discover, scan, and plan every file under the target root; write the
/// changed ones back when `mode` is `Rewrite`.
pub(crate) fn execute(args: &RewriteArgs, mode: RunMode) -> Result<(RewriteReport, EmitSettings)> {
    let start = Instant::now();

    let root = args
        .path
        .canonicalize()
        .map_err(|_| RespecError::NoFiles {
            path: args.path.clone(),
        })?;

    let config = config::load(&root)?;

    let lang = args.lang.or(config.lang);
    let source_type = args
        .source_type
        .unwrap_or(config.source_type);
    let from = args.from.clone().unwrap_or_else(|| config.from.clone());
    let to = args.to.clone().unwrap_or_else(|| config.to.clone());
    let include = if args.include.is_empty() {
        config.include.clone()
    } else {
        args.include.clone()
    };
    let exclude = if args.exclude.is_empty() {
        config.exclude.clone()
    } else {
        args.exclude.clone()
    };
    let quiet = args.quiet || config.quiet;
    let format = match args.format {
        Some(f) => f,
        None => match config.format.as_deref() {
            Some(name) => <OutputFormat as clap::ValueEnum>::from_str(name, true)
                .map_err(RespecError::Config)?,
            None => OutputFormat::default(),
        },
    };

    // Fails fast, before any file is opened.
    let policy: Arc<dyn PathPolicy> = Arc::new(SuffixRemap::new(from.clone(), to.clone())?);

    let files = walk::discover_files(&root, lang, &include, &exclude)?;
    if files.is_empty() {
        return Err(RespecError::NoFiles { path: root });
    }

    let progress = if !quiet {
        let pb = indicatif::ProgressBar::new(files.len() as u64);
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let write = mode == RunMode::Rewrite;

    // Parallel per-file pipeline: each worker owns its parser and target.
    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|file_path| {
            let outcome = process_file(
                file_path,
                &root,
                lang,
                source_type,
                Arc::clone(&policy),
                write,
            );
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
            outcome
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let files_scanned = files.len();
    let mut files_skipped = 0usize;
    let mut file_reports = Vec::new();

    for outcome in outcomes {
        match outcome {
            FileOutcome::Clean => {}
            FileOutcome::Skipped => files_skipped += 1,
            FileOutcome::Changed(report) => file_reports.push(report),
            FileOutcome::Failed(err) => return Err(err),
        }
    }

    file_reports.sort_by(|a, b| a.path.cmp(&b.path));
    let literals_rewritten = file_reports.iter().map(|f| f.rewrites.len()).sum();

    let report = RewriteReport {
        metadata: Metadata {
            mode,
            root,
            language: lang.map(|l| l.to_string()),
            source_type: SourceTypeLabel(source_type),
            from,
            to,
            files_scanned,
            files_changed: file_reports.len(),
            files_skipped,
            literals_rewritten,
            elapsed_ms: start.elapsed().as_millis() as u64,
        },
        files: file_reports,
    };

    Ok((report, EmitSettings { format, quiet }))
}

fn process_file(
    file_path: &std::path::Path,
    root: &std::path::Path,
    forced_lang: Option<Language>,
    source_type: SourceType,
    policy: Arc<dyn PathPolicy>,
    write: bool,
) -> FileOutcome {
    let language = match forced_lang.or_else(|| Language::from_path(file_path)) {
        Some(l) => l,
        None => return FileOutcome::Skipped,
    };

    let options = ScanOptions::new(language).with_source_type(source_type);
    let mut target = RewriteTarget::new(file_path, options, policy);

    if let Err(e) = target.scan() {
        tracing::warn!("Skipping {}: {}", file_path.display(), e);
        return FileOutcome::Skipped;
    }

    let rewrites: Vec<RewriteEntry> = match target.plan() {
        Ok(plan) => plan
            .iter()
            .map(|entry| RewriteEntry {
                line: entry.literal.line,
                column: entry.literal.column,
                from: entry.original_inner().to_string(),
                to: entry.replacement.clone(),
            })
            .collect(),
        Err(e) => return FileOutcome::Failed(e),
    };

    if rewrites.is_empty() {
        return FileOutcome::Clean;
    }

    if write {
        if let Err(e) = target.write_to_file() {
            return FileOutcome::Failed(e);
        }
    }

    FileOutcome::Changed(FileReport {
        path: file_path.strip_prefix(root).unwrap_or(file_path).to_path_buf(),
        rewrites,
    })
}

/// Print the report in the requested format, plus a stderr summary.
pub(crate) fn emit(settings: &EmitSettings, report: &RewriteReport) -> Result<()> {
    let mut stdout = std::io::stdout();

    match settings.format {
        OutputFormat::Json => json::write_report_json(&mut stdout, report)?,
        OutputFormat::Text => text::write_report_text(&mut stdout, report)?,
    }

    if !settings.quiet {
        eprintln!(
            "Scanned {} files, {} changed ({} specifiers) in {:.2}s",
            report.metadata.files_scanned,
            report.metadata.files_changed,
            report.metadata.literals_rewritten,
            report.metadata.elapsed_ms as f64 / 1000.0
        );
    }

    Ok(())
}
