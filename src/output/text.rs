use crate::errors::Result;
use crate::output::{RewriteReport, RunMode};
use std::io::Write;

/// Write the rewrite report as human-readable text.
pub fn write_report_text<W: Write>(writer: &mut W, report: &RewriteReport) -> Result<()> {
    let metadata = &report.metadata;
    let title = match metadata.mode {
        RunMode::Rewrite => "Respec Rewrite Report",
        RunMode::Check => "Respec Check Report",
    };
    writeln!(writer, "{title}")?;
    writeln!(writer, "{}", "=".repeat(title.len()))?;
    writeln!(writer)?;
    writeln!(
        writer,
        "Language:  {}",
        metadata.language.as_deref().unwrap_or("auto")
    )?;
    writeln!(writer, "Root:      {}", metadata.root.display())?;
    writeln!(writer, "Remap:     {} -> {}", metadata.from, metadata.to)?;
    writeln!(writer, "Scanned:   {} files", metadata.files_scanned)?;
    writeln!(writer, "Changed:   {} files", metadata.files_changed)?;
    writeln!(writer, "Skipped:   {} files", metadata.files_skipped)?;
    writeln!(
        writer,
        "Rewrites:  {} specifiers",
        metadata.literals_rewritten
    )?;
    writeln!(writer)?;

    for file in &report.files {
        writeln!(writer, "{}", file.path.display())?;
        for entry in &file.rewrites {
            writeln!(
                writer,
                "  {}:{}  {} -> {}",
                entry.line, entry.column, entry.from, entry.to
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{FileReport, Metadata, RewriteEntry, SourceTypeLabel};
    use crate::scan::SourceType;
    use std::path::PathBuf;

    #[test]
    fn text_report_lists_files_and_entries() {
        let report = RewriteReport {
            metadata: Metadata {
                mode: RunMode::Rewrite,
                root: PathBuf::from("/project"),
                language: None,
                source_type: SourceTypeLabel(SourceType::Module),
                from: ".ts".to_string(),
                to: ".js".to_string(),
                files_scanned: 1,
                files_changed: 1,
                files_skipped: 0,
                literals_rewritten: 2,
                elapsed_ms: 3,
            },
            files: vec![FileReport {
                path: PathBuf::from("src/index.ts"),
                rewrites: vec![
                    RewriteEntry {
                        line: 1,
                        column: 20,
                        from: "./util.ts".to_string(),
                        to: "./util.js".to_string(),
                    },
                    RewriteEntry {
                        line: 2,
                        column: 15,
                        from: "./types.ts".to_string(),
                        to: "./types.js".to_string(),
                    },
                ],
            }],
        };

        let mut out = Vec::new();
        write_report_text(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Respec Rewrite Report"));
        assert!(text.contains("Remap:     .ts -> .js"));
        assert!(text.contains("src/index.ts"));
        assert!(text.contains("1:20  ./util.ts -> ./util.js"));
        assert!(text.contains("Language:  auto"));
    }
}
