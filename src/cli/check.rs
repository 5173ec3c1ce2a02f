use crate::cli::rewrite::{self, RewriteArgs};
use respec::errors::Result;
use respec::output::RunMode;

/// Dry-run variant of `rewrite`: same discovery and planning, no writes.
/// Exits 1 when any file has pending rewrites, so CI can gate on it.
pub fn run(args: &RewriteArgs) -> Result<()> {
    let (report, settings) = rewrite::execute(args, RunMode::Check)?;
    rewrite::emit(&settings, &report)?;

    if report.metadata.files_changed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
