use crate::errors::Result;
use crate::output::RewriteReport;
use std::io::Write;

/// Write the rewrite report as pretty-printed JSON.
pub fn write_report_json<W: Write>(writer: &mut W, report: &RewriteReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}
